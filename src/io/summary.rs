use crate::ctx::Ctx;

pub fn format_summary(ctx: &Ctx) -> String {
    let version = env!("CARGO_PKG_VERSION");
    let verbosity = ctx.config.verbosity;
    let diag = &ctx.diagnostics;

    let mut out = String::new();
    out.push_str(&format!("kira-timeline v{}\n", version));
    out.push_str(&format!(
        "Input: {} rows, {} patients\n",
        ctx.input_meta.rows.unwrap_or(0),
        ctx.input_meta.patients.unwrap_or(0)
    ));
    match &ctx.outcome {
        Some(outcome) => out.push_str(&format!(
            "Episodes: {} written ({} reconstructed, {} negative dropped, {} censored dropped)\n",
            ctx.episodes.len(),
            outcome.input_rows,
            outcome.dropped_negative,
            outcome.dropped_censored
        )),
        None => out.push_str(&format!("Episodes: {} reconstructed\n", ctx.episodes.len())),
    }

    if verbosity == 0 {
        return out;
    }

    out.push_str(&format!(
        "Patients with missing treatment time: {} ({} rejected)\n",
        diag.lost_times.len(),
        diag.rejected_patients()
    ));
    out.push_str(&format!(
        "Patients with missing response or treatment type: {}\n",
        diag.lost_response_treatment.len()
    ));
    if !diag.malformed.is_empty() {
        out.push_str(&format!("Malformed values dropped: {}\n", diag.malformed.len()));
    }
    if !diag.internal_errors.is_empty() {
        out.push_str(&format!(
            "Internal consistency errors: {}\n",
            diag.internal_errors.len()
        ));
    }

    if verbosity < 2 {
        return out;
    }

    if !diag.lost_times.is_empty() {
        out.push_str("Missing treatment time:\n");
        for (id, items) in &diag.lost_times {
            let codes: Vec<String> = items
                .iter()
                .map(|l| format!("{} ({})", l.code(), l.describe()))
                .collect();
            out.push_str(&format!("- {}: {}\n", id, codes.join(", ")));
        }
    }
    if !diag.lost_response_treatment.is_empty() {
        out.push_str("Missing response or treatment type:\n");
        for (id, items) in &diag.lost_response_treatment {
            let codes: Vec<String> = items
                .iter()
                .map(|l| format!("{} ({}[{}])", l.code(), l.field.name(), l.index))
                .collect();
            out.push_str(&format!("- {}: {}\n", id, codes.join(", ")));
        }
    }
    for m in &diag.malformed {
        out.push_str(&format!(
            "- malformed {} in {} for {}\n",
            m.token, m.column, m.patient_id
        ));
    }
    for err in &diag.internal_errors {
        out.push_str(&format!("- {}\n", err));
    }

    out
}

pub fn format_prepare_summary(ctx: &Ctx) -> String {
    let version = env!("CARGO_PKG_VERSION");
    let mut out = String::new();
    out.push_str(&format!("kira-timeline prepare v{}\n", version));
    let Some(prepared) = ctx.prepared.as_ref() else {
        out.push_str("No patients prepared\n");
        return out;
    };
    let summary = &prepared.summary;
    out.push_str(&format!(
        "Patients: {} written ({} rows, {} skipped, {} non-positive survival dropped)\n",
        prepared.patients.len(),
        summary.rows,
        summary.skipped_rows,
        summary.dropped_survival
    ));
    if prepared.with_pfs {
        out.push_str(&format!(
            "PFS merged: {} patients without a PFS row dropped\n",
            summary.dropped_without_pfs
        ));
    }
    out.push_str(&format!(
        "Genes: {} flagged, {} patients with at least one mutation\n",
        prepared.genes.len(),
        summary.mutated_patients
    ));
    for (i, gene) in prepared.genes.iter().enumerate() {
        let count = prepared
            .patients
            .iter()
            .filter(|p| p.genes.get(i).copied().unwrap_or(false))
            .count();
        out.push_str(&format!("- {}: {}\n", gene, count));
    }
    out
}
