use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::ctx::Ctx;
use crate::io::table;
use crate::pipeline::Stage;
use crate::prepare::mutations::MutationIndex;

pub struct Stage7Mutations;

impl Stage7Mutations {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage7Mutations {
    fn name(&self) -> &'static str {
        "stage7_mutations"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let config = ctx.prepare.as_ref().context("prepare sources missing")?;
        let table = table::read_table(&config.mutations, config.mutations_delimiter)
            .with_context(|| {
                format!(
                    "failed to read mutation table {}",
                    config.mutations.display()
                )
            })?;
        let index = MutationIndex::from_table(&table)?;

        let prepared = ctx.prepared.as_mut().context("clinical table missing")?;
        let mut mutated = 0usize;
        for patient in &mut prepared.patients {
            patient.genes = index.flags(&patient.patient_id, &prepared.genes);
            if patient.genes.iter().any(|&flag| flag) {
                mutated += 1;
            }
            debug!(patient_id = %patient.patient_id, flags = ?patient.genes, "gene_flags");
        }
        prepared.summary.mutated_patients = mutated;

        info!(
            mutation_rows = table.rows.len(),
            samples = index.samples(),
            genes = prepared.genes.len(),
            mutated_patients = mutated,
            "gene_flags_ready"
        );
        Ok(())
    }
}
