use anyhow::Result;
use tracing::info;

use crate::ctx::Ctx;
use crate::io::{csv_writer, json_writer};
use crate::pipeline::Stage;

pub struct Stage5Output;

impl Stage5Output {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage5Output {
    fn name(&self) -> &'static str {
        "stage5_output"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        ctx.report = json_writer::build_report(ctx)?;

        csv_writer::write_episodes(&ctx.output.csv_path, ctx)?;
        if ctx.write_json {
            json_writer::write_json(&ctx.output.json_path, &ctx.report)?;
        }

        info!(
            csv = %ctx.output.csv_path.display(),
            rows = ctx.episodes.len(),
            "stage5_output_ready"
        );
        Ok(())
    }
}
