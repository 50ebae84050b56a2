use anyhow::{Context, Result};
use tracing::info;

use crate::ctx::Ctx;
use crate::io::prepared_writer;
use crate::pipeline::Stage;

pub struct Stage9PreparedOutput;

impl Stage9PreparedOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage9PreparedOutput {
    fn name(&self) -> &'static str {
        "stage9_prepared_output"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let prepared = ctx.prepared.as_ref().context("prepared table missing")?;
        prepared_writer::write_prepared(&ctx.output.prepared_path, prepared)?;
        info!(
            csv = %ctx.output.prepared_path.display(),
            rows = prepared.patients.len(),
            "prepared_table_ready"
        );
        Ok(())
    }
}
