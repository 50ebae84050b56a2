use std::path::Path;

use anyhow::{Context, Result};

use crate::ctx::Ctx;
use crate::schema::v1::{
    ColumnGroupSizes, ColumnPrefixes, Diagnostics, EpisodeCounts, InputMeta, LostFieldEntry,
    LostTimeEntry, MalformedEntry, TimelineReportV1,
};

pub fn build_report(ctx: &Ctx) -> Result<TimelineReportV1> {
    let outcome = ctx.outcome.as_ref().context("episode outcomes missing")?;

    let prefixes = &ctx.config.prefixes;
    let groups = ctx.layout.as_ref().map(|l| ColumnGroupSizes {
        treatment_time: l.treatment_time.len() as u64,
        recurrence_time: l.recurrence_time.len() as u64,
        treatment_type: l.treatment_type.len() as u64,
        response: l.response.len() as u64,
        genes: l.genes.len() as u64,
    });

    let input_meta = InputMeta {
        rows: ctx.input_meta.rows,
        columns: ctx.input_meta.columns,
        patients: ctx.input_meta.patients,
        skipped_rows: ctx.input_meta.skipped_rows,
        truncated_patients: ctx.input_meta.truncated_patients,
        prefixes: Some(ColumnPrefixes {
            treatment_time: prefixes.treatment_time.clone(),
            recurrence_time: prefixes.recurrence_time.clone(),
            treatment_type: prefixes.treatment_type.clone(),
            response: prefixes.response.clone(),
        }),
        groups,
    };

    let episodes = EpisodeCounts {
        reconstructed: outcome.input_rows as u64,
        dropped_negative: outcome.dropped_negative as u64,
        dropped_censored: outcome.dropped_censored as u64,
        written: ctx.episodes.len() as u64,
        responders: outcome.responders as u64,
        patients: outcome.patients as u64,
    };

    let diag = &ctx.diagnostics;
    let lost_times = diag
        .lost_times
        .iter()
        .flat_map(|(id, items)| {
            items.iter().map(move |lost| LostTimeEntry {
                patient_id: id.clone(),
                code: lost.code(),
                reason: lost.describe(),
            })
        })
        .collect();
    let lost_response_treatment = diag
        .lost_response_treatment
        .iter()
        .flat_map(|(id, items)| {
            items.iter().map(move |lost| LostFieldEntry {
                patient_id: id.clone(),
                code: lost.code(),
                field: lost.field.name().to_string(),
                index: lost.index as u64,
            })
        })
        .collect();
    let malformed_values = diag
        .malformed
        .iter()
        .map(|m| MalformedEntry {
            patient_id: m.patient_id.clone(),
            column: m.column.clone(),
            token: m.token.clone(),
        })
        .collect();

    let diagnostics = Diagnostics {
        lost_times_patients: diag.lost_times.len() as u64,
        rejected_patients: diag.rejected_patients() as u64,
        lost_response_treatment_patients: diag.lost_response_treatment.len() as u64,
        lost_times,
        lost_response_treatment,
        malformed_values,
        internal_errors: diag.internal_errors.iter().map(|e| e.to_string()).collect(),
    };

    Ok(TimelineReportV1 {
        tool: "kira-timeline".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        schema_version: "v1".to_string(),
        input_meta,
        episodes,
        diagnostics,
        outputs: ctx.report.outputs.clone(),
        warnings: ctx.warnings.clone(),
    })
}

pub fn write_json(path: &Path, report: &TimelineReportV1) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let writer = std::io::BufWriter::new(file);
    serde_json::to_writer_pretty(writer, report)?;
    Ok(())
}
