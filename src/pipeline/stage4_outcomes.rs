use anyhow::Result;
use tracing::info;

use crate::ctx::Ctx;
use crate::pipeline::Stage;
use crate::timeline::outcome::{OutcomeOptions, derive_outcomes};

pub struct Stage4Outcomes;

impl Stage4Outcomes {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage4Outcomes {
    fn name(&self) -> &'static str {
        "stage4_outcomes"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let options = OutcomeOptions {
            response_horizon: ctx.config.response_horizon,
            drop_censored: ctx.config.drop_censored,
        };
        let summary = derive_outcomes(&mut ctx.episodes, options);
        info!(
            rows = ctx.episodes.len(),
            dropped_negative = summary.dropped_negative,
            dropped_censored = summary.dropped_censored,
            responders = summary.responders,
            "outcomes_ready"
        );
        ctx.outcome = Some(summary);
        Ok(())
    }
}
