use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::input::{GENE_PREFIX, PATIENT_ID_COLUMN, STATUS_COLUMN, SURVIVAL_COLUMN};
use crate::prepare::{
    PROGRESSION_FREE_STATUS_COLUMN, PROGRESSION_FREE_TIME_COLUMN, PreparedPatient, PreparedTable,
};
use crate::timeline::VitalStatus;

fn flag(value: bool) -> String {
    let text = if value { "True" } else { "False" };
    text.to_string()
}

pub fn prepared_header(table: &PreparedTable) -> Vec<String> {
    let mut header = vec![
        PATIENT_ID_COLUMN.to_string(),
        STATUS_COLUMN.to_string(),
        SURVIVAL_COLUMN.to_string(),
    ];
    header.extend(table.passthrough_headers.iter().cloned());
    header.extend(table.genes.iter().map(|g| format!("{}{}", GENE_PREFIX, g)));
    if table.with_pfs {
        header.push(PROGRESSION_FREE_TIME_COLUMN.to_string());
        header.push(PROGRESSION_FREE_STATUS_COLUMN.to_string());
    }
    header
}

pub fn prepared_row(patient: &PreparedPatient, with_pfs: bool) -> Vec<String> {
    let mut row = vec![
        patient.patient_id.clone(),
        flag(patient.status == VitalStatus::Deceased),
        patient.survival_in_days.to_string(),
    ];
    row.extend(patient.passthrough.iter().cloned());
    row.extend(patient.genes.iter().map(|&g| flag(g)));
    if with_pfs {
        let pfs = patient.pfs.clone().unwrap_or_default();
        row.push(pfs.time.unwrap_or_default());
        row.push(pfs.status.unwrap_or_default());
    }
    row
}

pub fn write_prepared(path: &Path, table: &PreparedTable) -> Result<()> {
    let header = prepared_header(table);
    let mut w = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    w.write_record(&header)?;
    for patient in &table.patients {
        let row = prepared_row(patient, table.with_pfs);
        if row.len() != header.len() {
            bail!(
                "prepared row for patient {} has {} fields, header has {}",
                patient.patient_id,
                row.len(),
                header.len()
            );
        }
        w.write_record(&row)?;
    }
    w.flush()?;
    Ok(())
}
