use anyhow::Result;
use tracing::{error, info};

use crate::ctx::Ctx;
use crate::pipeline::Stage;
use crate::timeline::episodes::reconstruct;

pub struct Stage3Episodes;

impl Stage3Episodes {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage3Episodes {
    fn name(&self) -> &'static str {
        "stage3_episodes"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let floor = ctx.config.sentinel_floor;
        let mut episodes = Vec::new();
        let mut rejected = 0usize;

        for record in &ctx.records {
            match reconstruct(record, floor) {
                Ok(reconstruction) => {
                    ctx.diagnostics
                        .record_all(&record.patient_id, reconstruction.issues);
                    if reconstruction.rejected {
                        rejected += 1;
                    }
                    episodes.extend(reconstruction.episodes);
                }
                Err(err) => {
                    error!(patient_id = %record.patient_id, error = %err, "internal consistency error");
                    ctx.diagnostics.internal_errors.push(err);
                }
            }
        }

        info!(
            episodes = episodes.len(),
            rejected,
            internal_errors = ctx.diagnostics.internal_errors.len(),
            lost_times = ctx.diagnostics.lost_times.len(),
            lost_response_treatment = ctx.diagnostics.lost_response_treatment.len(),
            "episodes_reconstructed"
        );

        ctx.episodes = episodes;
        Ok(())
    }
}
