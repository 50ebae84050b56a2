pub mod clinical;
pub mod mutations;
pub mod pfs;

use crate::prepare::pfs::ProgressionFree;
use crate::timeline::VitalStatus;

pub const PROGRESSION_FREE_TIME_COLUMN: &str = "progression-free-time";
pub const PROGRESSION_FREE_STATUS_COLUMN: &str = "progression-free-time-status";

#[derive(Debug, Clone, PartialEq)]
pub struct PreparedPatient {
    pub patient_id: String,
    pub status: VitalStatus,
    pub survival_in_days: i64,
    /// Clinical values copied through, aligned with `PreparedTable::passthrough_headers`.
    pub passthrough: Vec<String>,
    /// One flag per requested gene, aligned with `PreparedTable::genes`.
    pub genes: Vec<bool>,
    pub pfs: Option<ProgressionFree>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrepareSummary {
    pub rows: usize,
    pub skipped_rows: usize,
    pub dropped_survival: usize,
    pub dropped_without_pfs: usize,
    pub mutated_patients: usize,
}

#[derive(Debug, Clone, Default)]
pub struct PreparedTable {
    pub passthrough_headers: Vec<String>,
    pub genes: Vec<String>,
    pub patients: Vec<PreparedPatient>,
    pub with_pfs: bool,
    pub summary: PrepareSummary,
}

/// Trims, drops empties and keeps the first occurrence of each gene symbol.
pub fn normalize_genes<I, S>(genes: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for gene in genes {
        let gene = gene.as_ref().trim();
        if !gene.is_empty() && !out.iter().any(|g| g == gene) {
            out.push(gene.to_string());
        }
    }
    out
}
