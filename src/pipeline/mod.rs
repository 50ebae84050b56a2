use anyhow::Result;
use std::time::Instant;
use tracing::{info, warn};

use crate::ctx::Ctx;

pub mod stage0_scaffold;
pub mod stage1_input;
pub mod stage2_extract;
pub mod stage3_episodes;
pub mod stage4_outcomes;
pub mod stage5_output;
pub mod stage6_clinical;
pub mod stage7_mutations;
pub mod stage8_pfs;
pub mod stage9_prepared_output;

pub trait Stage {
    fn name(&self) -> &'static str;
    fn run(&self, ctx: &mut Ctx) -> Result<()>;
}

pub struct Pipeline {
    stages: Vec<Box<dyn Stage>>,
}

impl Pipeline {
    pub fn new(stages: Vec<Box<dyn Stage>>) -> Self {
        Self { stages }
    }

    pub fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let prefixes = &ctx.config.prefixes;
        info!(
            input = %ctx.input.display(),
            format = ?ctx.input_format,
            stages = self.stages.len(),
            treatment_time = %prefixes.treatment_time,
            recurrence_time = %prefixes.recurrence_time,
            treatment_type = %prefixes.treatment_type,
            response = %prefixes.response,
            sentinel_floor = ctx.config.sentinel_floor,
            "timeline pipeline started"
        );
        for stage in &self.stages {
            let start = Instant::now();
            info!(stage = stage.name(), "stage started");
            if let Err(err) = stage.run(ctx) {
                let elapsed_ms = start.elapsed().as_millis();
                warn!(
                    stage = stage.name(),
                    elapsed_ms = elapsed_ms as u64,
                    "stage failed"
                );
                return Err(err);
            }
            let elapsed_ms = start.elapsed().as_millis();
            info!(
                stage = stage.name(),
                elapsed_ms = elapsed_ms as u64,
                patients = ctx.records.len(),
                episodes = ctx.episodes.len(),
                "stage finished"
            );
        }
        info!(
            episodes = ctx.episodes.len(),
            warnings = ctx.warnings.len(),
            clean = ctx.diagnostics.is_clean(),
            "timeline pipeline finished"
        );
        Ok(())
    }
}
