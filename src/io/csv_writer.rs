use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::ctx::Ctx;
use crate::io::fmt_opt;
use crate::timeline::TreatmentEpisode;

pub const LEADING_COLUMNS: [&str; 23] = [
    "tindex",
    "tnum",
    "treatment_group",
    "treatment_time",
    "recc_time",
    "response",
    "treatment_type",
    "status",
    "disease_free_time",
    "patient_id",
    "anatomic_stage",
    "cancer_type",
    "smoking",
    "alcohol_history",
    "drugs",
    "age_level",
    "number_of_mutation",
    "sex",
    "p16",
    "race",
    "age",
    "overall_survival",
    "current_treatment",
];

pub const TRAILING_COLUMNS: [&str; 2] = ["binary_response", "maxtnum"];

pub fn episode_header(gene_columns: &[String]) -> Vec<String> {
    LEADING_COLUMNS
        .iter()
        .map(|s| s.to_string())
        .chain(gene_columns.iter().cloned())
        .chain(TRAILING_COLUMNS.iter().map(|s| s.to_string()))
        .collect()
}

pub fn episode_row(e: &TreatmentEpisode) -> Vec<String> {
    let a = &e.attributes;
    let mut row = vec![
        e.tindex.to_string(),
        e.tnum.to_string(),
        e.treatment_group.to_string(),
        e.treatment_time.to_string(),
        fmt_opt(e.recc_time),
        fmt_opt(e.response),
        fmt_opt(e.treatment_type),
        e.status.to_string(),
        fmt_opt(e.disease_free_time),
        e.patient_id.clone(),
        a.anatomic_stage.clone(),
        a.cancer_type.clone(),
        a.smoking.clone(),
        a.alcohol_history.clone(),
        a.drugs.clone(),
        a.age_level.clone(),
        e.number_of_mutation.to_string(),
        a.sex.clone(),
        a.p16.clone(),
        a.race.clone(),
        a.age.clone(),
        a.overall_survival.clone(),
        a.current_treatment.clone(),
    ];
    row.extend(e.genes.iter().cloned());
    row.push(fmt_opt(e.binary_response));
    row.push(fmt_opt(e.maxtnum));
    row
}

pub fn write_episodes(path: &Path, ctx: &Ctx) -> Result<()> {
    let genes = ctx
        .layout
        .as_ref()
        .map(|l| l.gene_names())
        .unwrap_or_default();
    let header = episode_header(&genes);

    let mut w = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    w.write_record(&header)?;
    for e in &ctx.episodes {
        let row = episode_row(e);
        if row.len() != header.len() {
            bail!(
                "episode row for patient {} has {} fields, header has {}",
                e.patient_id,
                row.len(),
                header.len()
            );
        }
        w.write_record(&row)?;
    }
    w.flush()?;
    Ok(())
}
