use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::ctx::Ctx;
use crate::pipeline::Stage;
use crate::timeline::extract::extract_record;
use crate::timeline::truncate::truncate;

pub struct Stage2Extract;

impl Stage2Extract {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage2Extract {
    fn name(&self) -> &'static str {
        "stage2_extract"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let table = ctx.table.as_ref().context("input table missing")?;
        let layout = ctx.layout.as_ref().context("column layout missing")?;

        let mut records = Vec::with_capacity(table.rows.len());
        let mut skipped = 0u64;
        let mut truncated = 0u64;
        for (i, row) in table.rows.iter().enumerate() {
            let mut extraction = match extract_record(row, layout) {
                Ok(extraction) => extraction,
                Err(err) => {
                    // Header is line 1.
                    let line = i + 2;
                    warn!(line, error = %err, "row skipped");
                    ctx.warnings.push(format!("line {}: {}", line, err));
                    skipped += 1;
                    continue;
                }
            };
            if truncate(&mut extraction.record.sequences).is_some() {
                truncated += 1;
            }
            ctx.diagnostics.malformed.extend(extraction.malformed);
            records.push(extraction.record);
        }

        info!(
            patients = records.len(),
            skipped,
            truncated,
            malformed = ctx.diagnostics.malformed.len(),
            "patient_records_ready"
        );

        ctx.input_meta.patients = Some(records.len() as u64);
        ctx.input_meta.skipped_rows = skipped;
        ctx.input_meta.truncated_patients = truncated;
        ctx.records = records;
        Ok(())
    }
}
