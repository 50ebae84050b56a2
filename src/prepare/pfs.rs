use std::collections::HashMap;

use anyhow::{Context, Result};

use crate::io::table::Table;
use crate::timeline::extract::{cell, is_absent};

pub const PFS_BARCODE_COLUMN: &str = "bcr_patient_barcode";
pub const PFS_TIME_COLUMN: &str = "PFI.time.1";
pub const PFS_STATUS_COLUMN: &str = "PFI.1";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressionFree {
    pub time: Option<String>,
    pub status: Option<String>,
}

pub fn pfs_value(token: &str) -> Option<String> {
    let token = token.trim();
    if is_absent(token) {
        None
    } else {
        Some(token.to_string())
    }
}

#[derive(Debug, Clone, Default)]
pub struct PfsTable {
    by_patient: HashMap<String, ProgressionFree>,
    pub duplicates: usize,
}

impl PfsTable {
    pub fn from_table(table: &Table) -> Result<Self> {
        let column = |name: &str| -> Result<usize> {
            table
                .headers
                .iter()
                .position(|h| h == name)
                .with_context(|| format!("PFS table has no '{}' column", name))
        };
        let barcode = column(PFS_BARCODE_COLUMN)?;
        let time = column(PFS_TIME_COLUMN)?;
        let status = column(PFS_STATUS_COLUMN)?;

        let mut out = Self::default();
        for row in &table.rows {
            let id = cell(row, barcode).trim();
            if id.is_empty() {
                continue;
            }
            if out.by_patient.contains_key(id) {
                // First row wins.
                out.duplicates += 1;
                continue;
            }
            out.by_patient.insert(
                id.to_string(),
                ProgressionFree {
                    time: pfs_value(cell(row, time)),
                    status: pfs_value(cell(row, status)),
                },
            );
        }
        Ok(out)
    }

    pub fn get(&self, patient_id: &str) -> Option<&ProgressionFree> {
        self.by_patient.get(patient_id)
    }

    pub fn len(&self) -> usize {
        self.by_patient.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_patient.is_empty()
    }
}
