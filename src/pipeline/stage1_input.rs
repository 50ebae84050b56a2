use anyhow::{Context, Result, bail};
use tracing::{info, warn};

use crate::ctx::Ctx;
use crate::input::ColumnLayout;
use crate::io::table;
use crate::pipeline::Stage;

pub struct Stage1Input;

impl Stage1Input {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage1Input {
    fn name(&self) -> &'static str {
        "stage1_input"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let table = table::read_table(&ctx.input, ctx.config.delimiter)
            .with_context(|| format!("failed to read input table {}", ctx.input.display()))?;
        if table.rows.is_empty() {
            bail!("input table {} has no data rows", ctx.input.display());
        }

        let layout = ColumnLayout::discover(&table.headers, &ctx.config.prefixes)?;

        for (name, group) in layout.groups() {
            if group.is_empty() {
                warn!(group = name, prefix = %group.prefix, "column group is empty");
                ctx.warnings.push(format!(
                    "no {} columns found with prefix '{}'",
                    name, group.prefix
                ));
            }
        }
        for name in &layout.missing_static {
            warn!(column = %name, "static column missing; values left empty");
            ctx.warnings
                .push(format!("static column '{}' missing; values left empty", name));
        }

        info!(
            rows = table.rows.len(),
            columns = table.headers.len(),
            treatment_time = layout.treatment_time.len(),
            recurrence_time = layout.recurrence_time.len(),
            treatment_type = layout.treatment_type.len(),
            response = layout.response.len(),
            genes = layout.genes.len(),
            "input_table_loaded"
        );

        ctx.input_meta.rows = Some(table.rows.len() as u64);
        ctx.input_meta.columns = Some(table.headers.len() as u64);
        ctx.table = Some(table);
        ctx.layout = Some(layout);

        Ok(())
    }
}
