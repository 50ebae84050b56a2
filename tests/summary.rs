use kira_timeline::config::TimelineConfig;
use kira_timeline::ctx::Ctx;
use kira_timeline::io::summary::format_summary;
use kira_timeline::timeline::diagnostics::{EventField, Issue, LostField, LostTime};
use kira_timeline::timeline::outcome::OutcomeSummary;

fn make_ctx(verbosity: u8) -> Ctx {
    let config = TimelineConfig {
        verbosity,
        ..TimelineConfig::default()
    };
    let mut ctx = Ctx::new(
        std::path::PathBuf::from("input.csv"),
        std::path::PathBuf::from("out"),
        config,
        false,
        "0.0.0-test",
    );
    ctx.input_meta.rows = Some(12);
    ctx.input_meta.patients = Some(11);
    ctx.outcome = Some(OutcomeSummary {
        input_rows: 20,
        dropped_negative: 2,
        dropped_censored: 0,
        responders: 9,
        patients: 9,
    });
    ctx.diagnostics
        .record("TCGA-01", Issue::LostTime(LostTime::MissingFirst));
    ctx.diagnostics
        .record("TCGA-02", Issue::LostTime(LostTime::Gap { index: 3 }));
    ctx.diagnostics.record(
        "TCGA-03",
        Issue::LostField(LostField {
            field: EventField::Response,
            index: 1,
        }),
    );
    ctx
}

#[test]
fn summary_counts() {
    let s = format_summary(&make_ctx(1));
    assert!(s.contains("kira-timeline v"));
    assert!(s.contains("Input: 12 rows, 11 patients"));
    assert!(s.contains("Episodes: 0 written (20 reconstructed, 2 negative dropped"));
    assert!(s.contains("Patients with missing treatment time: 2 (1 rejected)"));
    assert!(s.contains("Patients with missing response or treatment type: 1"));
    assert!(!s.contains("TCGA-01"));
}

#[test]
fn summary_itemized_at_high_verbosity() {
    let s = format_summary(&make_ctx(2));
    assert!(s.contains("- TCGA-01: -2 (first treatment time missing)"));
    assert!(s.contains("- TCGA-02: 3 (missing time before index 3)"));
    assert!(s.contains("- TCGA-03: -31 (response[1])"));
}

#[test]
fn summary_quiet() {
    let s = format_summary(&make_ctx(0));
    assert!(!s.contains("Patients with missing"));
}
