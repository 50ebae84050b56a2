use anyhow::{Context, Result};

use crate::input::{Column, GENE_PREFIX, PATIENT_ID_COLUMN, STATUS_COLUMN, SURVIVAL_COLUMN};
use crate::prepare::{PROGRESSION_FREE_STATUS_COLUMN, PROGRESSION_FREE_TIME_COLUMN};
use crate::timeline::VitalStatus;
use crate::timeline::extract::{is_absent, parse_integer};

pub const PATIENT_BARCODE_COLUMN: &str = "bcr_patient_barcode";
pub const VITAL_STATUS_COLUMN: &str = "vital_status";
pub const DEATH_DAYS_COLUMN: &str = "death_days_to";
pub const LAST_CONTACT_COLUMN: &str = "last_contact_days_to";

pub const UNPARSABLE_SURVIVAL: i64 = -1;

const RENAMED: [(&str, &str); 1] = [("gender", "sex")];

/// Empty, NaN-like or a bracketed export placeholder such as `[Not Available]`.
fn is_placeholder(token: &str) -> bool {
    let token = token.trim();
    is_absent(token) || (token.starts_with('[') && token.ends_with(']'))
}

/// Days of death if recorded, otherwise days of last contact. Day 0 counts
/// as day 1; anything unparsable becomes `UNPARSABLE_SURVIVAL`.
pub fn survival_days(death_days: &str, last_contact_days: &str) -> i64 {
    let token = if is_placeholder(death_days) {
        last_contact_days
    } else {
        death_days
    };
    match parse_integer(token.trim()) {
        Some(0) => 1,
        Some(days) => days,
        None => UNPARSABLE_SURVIVAL,
    }
}

pub fn vital_status(token: &str) -> VitalStatus {
    if token.trim().eq_ignore_ascii_case("dead") {
        VitalStatus::Deceased
    } else {
        VitalStatus::Alive
    }
}

#[derive(Debug, Clone)]
pub struct ClinicalLayout {
    pub barcode: usize,
    pub vital_status: usize,
    pub death_days: usize,
    pub last_contact: usize,
    /// Copied columns under their output names.
    pub passthrough: Vec<Column>,
}

impl ClinicalLayout {
    pub fn discover(headers: &[String], genes: &[String]) -> Result<Self> {
        let required = |name: &str| -> Result<usize> {
            headers
                .iter()
                .position(|h| h == name)
                .with_context(|| format!("required clinical column '{}' not found", name))
        };
        let barcode = required(PATIENT_BARCODE_COLUMN)?;
        let vital_status = required(VITAL_STATUS_COLUMN)?;
        let death_days = required(DEATH_DAYS_COLUMN)?;
        let last_contact = required(LAST_CONTACT_COLUMN)?;

        let generated: Vec<String> = [
            PATIENT_ID_COLUMN,
            STATUS_COLUMN,
            SURVIVAL_COLUMN,
            PROGRESSION_FREE_TIME_COLUMN,
            PROGRESSION_FREE_STATUS_COLUMN,
        ]
        .iter()
        .map(|s| s.to_string())
        .chain(genes.iter().map(|g| format!("{}{}", GENE_PREFIX, g)))
        .collect();
        let consumed = [barcode, vital_status, death_days, last_contact];

        let passthrough = headers
            .iter()
            .enumerate()
            .filter(|(index, _)| !consumed.contains(index))
            .map(|(index, name)| {
                let name = RENAMED
                    .iter()
                    .find(|(from, _)| *from == name.as_str())
                    .map(|(_, to)| to.to_string())
                    .unwrap_or_else(|| name.clone());
                Column { name, index }
            })
            .filter(|column| !generated.contains(&column.name))
            .collect();

        Ok(Self {
            barcode,
            vital_status,
            death_days,
            last_contact,
            passthrough,
        })
    }

    pub fn passthrough_names(&self) -> Vec<String> {
        self.passthrough.iter().map(|c| c.name.clone()).collect()
    }
}
