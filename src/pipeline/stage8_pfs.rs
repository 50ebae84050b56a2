use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::ctx::Ctx;
use crate::io::table;
use crate::pipeline::Stage;
use crate::prepare::pfs::PfsTable;

pub struct Stage8Pfs;

impl Stage8Pfs {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage8Pfs {
    fn name(&self) -> &'static str {
        "stage8_pfs"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let config = ctx.prepare.as_ref().context("prepare sources missing")?;
        let Some(path) = config.pfs.as_ref() else {
            info!("no progression-free survival table given");
            return Ok(());
        };
        let table = table::read_table(path, config.pfs_delimiter)
            .with_context(|| format!("failed to read PFS table {}", path.display()))?;
        let pfs = PfsTable::from_table(&table)?;
        if pfs.duplicates > 0 {
            warn!(duplicates = pfs.duplicates, "duplicate PFS rows ignored");
            ctx.warnings.push(format!(
                "{} duplicate PFS rows ignored; first row per patient kept",
                pfs.duplicates
            ));
        }

        let prepared = ctx.prepared.as_mut().context("clinical table missing")?;
        let before = prepared.patients.len();
        // Inner join: patients without a PFS row are dropped.
        prepared.patients.retain_mut(|patient| match pfs.get(&patient.patient_id) {
            Some(value) => {
                patient.pfs = Some(value.clone());
                true
            }
            None => {
                debug!(patient_id = %patient.patient_id, "no PFS row; patient dropped");
                false
            }
        });
        let dropped = before - prepared.patients.len();
        prepared.with_pfs = true;
        prepared.summary.dropped_without_pfs = dropped;
        ctx.input_meta.patients = Some(prepared.patients.len() as u64);
        if dropped > 0 {
            warn!(dropped, "patients without PFS row dropped");
            ctx.warnings
                .push(format!("{} patients without a PFS row dropped", dropped));
        }

        info!(
            pfs_rows = pfs.len(),
            patients = prepared.patients.len(),
            dropped,
            "pfs_merged"
        );
        Ok(())
    }
}
