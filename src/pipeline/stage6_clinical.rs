use anyhow::{Context, Result, bail};
use tracing::{info, warn};

use crate::ctx::Ctx;
use crate::io::table;
use crate::pipeline::Stage;
use crate::prepare::clinical::{ClinicalLayout, survival_days, vital_status};
use crate::prepare::{PrepareSummary, PreparedPatient, PreparedTable};
use crate::timeline::extract::cell;

pub struct Stage6Clinical;

impl Stage6Clinical {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage6Clinical {
    fn name(&self) -> &'static str {
        "stage6_clinical"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let genes = ctx
            .prepare
            .as_ref()
            .context("prepare sources missing")?
            .genes
            .clone();
        let table = table::read_table(&ctx.input, ctx.config.delimiter)
            .with_context(|| format!("failed to read patient table {}", ctx.input.display()))?;
        if table.rows.is_empty() {
            bail!("patient table {} has no data rows", ctx.input.display());
        }
        let layout = ClinicalLayout::discover(&table.headers, &genes)?;

        let mut summary = PrepareSummary {
            rows: table.rows.len(),
            ..PrepareSummary::default()
        };
        let mut patients = Vec::with_capacity(table.rows.len());
        for (i, row) in table.rows.iter().enumerate() {
            let line = i + 2;
            let patient_id = cell(row, layout.barcode).trim();
            if patient_id.is_empty() {
                warn!(line, "row without patient barcode skipped");
                ctx.warnings
                    .push(format!("line {}: empty patient barcode", line));
                summary.skipped_rows += 1;
                continue;
            }
            let survival_in_days =
                survival_days(cell(row, layout.death_days), cell(row, layout.last_contact));
            if survival_in_days <= 0 {
                warn!(line, patient_id, survival_in_days, "non-positive survival; patient dropped");
                ctx.warnings.push(format!(
                    "line {}: patient {} dropped, survival_in_days {}",
                    line, patient_id, survival_in_days
                ));
                summary.dropped_survival += 1;
                continue;
            }
            patients.push(PreparedPatient {
                patient_id: patient_id.to_string(),
                status: vital_status(cell(row, layout.vital_status)),
                survival_in_days,
                passthrough: layout
                    .passthrough
                    .iter()
                    .map(|c| cell(row, c.index).to_string())
                    .collect(),
                genes: Vec::new(),
                pfs: None,
            });
        }

        info!(
            rows = summary.rows,
            patients = patients.len(),
            dropped_survival = summary.dropped_survival,
            passthrough = layout.passthrough.len(),
            "clinical_table_loaded"
        );

        ctx.input_meta.rows = Some(table.rows.len() as u64);
        ctx.input_meta.columns = Some(table.headers.len() as u64);
        ctx.input_meta.patients = Some(patients.len() as u64);
        ctx.input_meta.skipped_rows = summary.skipped_rows as u64;
        ctx.prepared = Some(PreparedTable {
            passthrough_headers: layout.passthrough_names(),
            genes,
            patients,
            with_pfs: false,
            summary,
        });
        Ok(())
    }
}
