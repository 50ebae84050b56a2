use kira_timeline::config::TimelineConfig;
use kira_timeline::ctx::Ctx;
use kira_timeline::io::json_writer::build_report;
use kira_timeline::timeline::TimelineError;
use kira_timeline::timeline::diagnostics::{EventField, Issue, LostField, LostTime};
use kira_timeline::timeline::extract::MalformedValue;
use kira_timeline::timeline::outcome::OutcomeSummary;

#[test]
fn json_report_populated() {
    let mut ctx = Ctx::new(
        std::path::PathBuf::from("input.csv"),
        std::path::PathBuf::from("out"),
        TimelineConfig::default(),
        true,
        "0.0.0-test",
    );
    ctx.input_meta.rows = Some(3);
    ctx.input_meta.patients = Some(3);
    ctx.outcome = Some(OutcomeSummary {
        input_rows: 5,
        dropped_negative: 1,
        dropped_censored: 0,
        responders: 2,
        patients: 2,
    });
    ctx.diagnostics.record(
        "P1",
        Issue::LostTime(LostTime::SentinelFloor {
            index: 0,
            value: -7000,
        }),
    );
    ctx.diagnostics.record(
        "P2",
        Issue::LostField(LostField {
            field: EventField::TreatmentType,
            index: 2,
        }),
    );
    ctx.diagnostics.malformed.push(MalformedValue {
        patient_id: "P2".to_string(),
        column: "response_3".to_string(),
        token: "PR?".to_string(),
    });
    ctx.diagnostics
        .internal_errors
        .push(TimelineError::ResponseTreatmentMismatch {
            patient_id: "P3".to_string(),
            responses: 1,
            treatments: 2,
        });

    let report = build_report(&ctx).unwrap();
    let json = serde_json::to_value(report).unwrap();

    assert_eq!(json["tool"], "kira-timeline");
    assert_eq!(json["schema_version"], "v1");
    assert_eq!(json["input_meta"]["rows"], 3);
    assert_eq!(json["input_meta"]["prefixes"]["recurrence_time"], "reccurence_time");
    assert_eq!(json["episodes"]["dropped_negative"], 1);
    assert_eq!(json["diagnostics"]["rejected_patients"], 1);
    assert_eq!(json["diagnostics"]["lost_times"][0]["code"], -1);
    assert_eq!(json["diagnostics"]["lost_response_treatment"][0]["code"], -22);
    assert_eq!(
        json["diagnostics"]["lost_response_treatment"][0]["field"],
        "treatment_type"
    );
    assert_eq!(json["diagnostics"]["malformed_values"][0]["token"], "PR?");
    assert!(
        json["diagnostics"]["internal_errors"][0]
            .as_str()
            .unwrap()
            .contains("P3")
    );
}

#[test]
fn report_requires_outcomes() {
    let ctx = Ctx::new(
        std::path::PathBuf::from("input.csv"),
        std::path::PathBuf::from("out"),
        TimelineConfig::default(),
        true,
        "0.0.0-test",
    );
    assert!(build_report(&ctx).is_err());
}
