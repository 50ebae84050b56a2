use std::fs;
use std::path::Path;

use kira_timeline::config::TimelineConfig;
use kira_timeline::ctx::Ctx;
use kira_timeline::pipeline::Pipeline;
use kira_timeline::pipeline::stage0_scaffold::Stage0Scaffold;
use kira_timeline::pipeline::stage1_input::Stage1Input;
use kira_timeline::pipeline::stage2_extract::Stage2Extract;
use kira_timeline::pipeline::stage3_episodes::Stage3Episodes;
use kira_timeline::pipeline::stage4_outcomes::Stage4Outcomes;
use kira_timeline::pipeline::stage5_output::Stage5Output;
use serde_json::Value;
use tempfile::TempDir;

const CLINICAL: &str = "\
patient_id,status,survival_in_days,treatment_time1,treatment_time2,reccurence_time1,reccurence_time2,treatment_type1,treatment_type2,response_1,response_2,sex,gene_TP53
P1,0,400,0,100,,250,1,2,0.5,1.0,Male,1
P2,1,500,30,,,,1,none,3,none,Female,0
P3,0,800,-9999,10,,,1,1,1,1,Male,0
P4,1,200,,50,,,1,1,1,1,Female,1
P5,bogus,10,0,,,,1,,1,,Male,0
";

fn run_pipeline(input: &Path, out: &Path, write_json: bool) -> Ctx {
    let mut ctx = Ctx::new(
        input.to_path_buf(),
        out.to_path_buf(),
        TimelineConfig::default(),
        write_json,
        "0.0.0-test",
    );
    let pipeline = Pipeline::new(vec![
        Box::new(Stage0Scaffold::new()),
        Box::new(Stage1Input::new()),
        Box::new(Stage2Extract::new()),
        Box::new(Stage3Episodes::new()),
        Box::new(Stage4Outcomes::new()),
        Box::new(Stage5Output::new()),
    ]);
    pipeline.run(&mut ctx).unwrap();
    ctx
}

#[test]
fn full_pipeline_writes_episode_table() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("clinical.csv");
    fs::write(&input, CLINICAL).unwrap();
    let out = tmp.path().join("out");

    let ctx = run_pipeline(&input, &out, true);

    assert_eq!(ctx.input_meta.rows, Some(5));
    assert_eq!(ctx.input_meta.patients, Some(4));
    assert_eq!(ctx.input_meta.skipped_rows, 1);
    assert_eq!(ctx.input_meta.truncated_patients, 1);
    assert_eq!(ctx.episodes.len(), 4);
    assert_eq!(ctx.diagnostics.lost_times.len(), 2);
    assert_eq!(ctx.diagnostics.rejected_patients(), 2);

    let content = fs::read_to_string(out.join("episodes.csv")).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[0].starts_with("tindex,tnum,treatment_group,treatment_time,recc_time"));
    assert!(lines[0].ends_with("gene_TP53,binary_response,maxtnum"));
    assert!(lines[1].starts_with("1,1,1,0,250,0.5,1,0,250,P1,"));
    assert!(lines[2].starts_with("2,2,2,100,,1,2,0,,P1,"));
    // Baseline before the first treatment on day 30, then the treatment itself.
    assert!(lines[3].starts_with("1,0,1,0,500,,,0,500,P2,"));
    assert!(lines[4].starts_with("2,1,1,30,500,3,1,1,470,P2,"));
    assert!(lines[4].ends_with(",0,1"));

    let json: Value =
        serde_json::from_str(&fs::read_to_string(out.join("timeline_report.json")).unwrap())
            .unwrap();
    assert_eq!(json["tool"], "kira-timeline");
    assert_eq!(json["episodes"]["written"], 4);
    assert_eq!(json["diagnostics"]["rejected_patients"], 2);
    assert_eq!(json["outputs"]["episodes_csv"], "episodes.csv");
    assert_eq!(json["outputs"]["timeline_json"], "timeline_report.json");
}

#[test]
fn json_report_is_optional() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("clinical.csv");
    fs::write(&input, CLINICAL).unwrap();
    let out = tmp.path().join("out");

    let ctx = run_pipeline(&input, &out, false);

    assert!(out.join("episodes.csv").exists());
    assert!(ctx.report.outputs.timeline_json.is_none());
    assert!(!out.join("timeline_report.json").exists());
}

#[test]
fn missing_required_column_fails_pipeline() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("clinical.csv");
    fs::write(&input, "patient_id,treatment_time1\nP1,0\n").unwrap();

    let mut ctx = Ctx::new(
        input,
        tmp.path().join("out"),
        TimelineConfig::default(),
        false,
        "0.0.0-test",
    );
    let pipeline = Pipeline::new(vec![Box::new(Stage1Input::new())]);
    assert!(pipeline.run(&mut ctx).is_err());
}

const TRAILING_END_MARKER: &str = "\
patient_id,status,survival_in_days,treatment_time1,treatment_time2,treatment_time3,reccurence_time1,reccurence_time2,reccurence_time3,treatment_type1,treatment_type2,treatment_type3,response_1,response_2,response_3
Q1,1,900,0,100,,,250,380,1,2,none,1,1,none
Q2,0,600,0,200,,,,410,1,1,none,1,1,none
";

#[test]
fn trailing_end_marker_keeps_last_recurrence() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("clinical.csv");
    fs::write(&input, TRAILING_END_MARKER).unwrap();
    let out = tmp.path().join("out");

    let ctx = run_pipeline(&input, &out, false);
    assert_eq!(ctx.input_meta.truncated_patients, 2);
    assert_eq!(ctx.episodes.len(), 4);

    let content = fs::read_to_string(out.join("episodes.csv")).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[1].starts_with("1,1,1,0,250,1,1,0,250,Q1,"));
    assert!(lines[2].starts_with("2,2,2,100,380,1,2,1,280,Q1,"));
    assert!(lines[3].starts_with("1,1,1,0,,1,1,0,,Q2,"));
    assert!(lines[4].starts_with("2,2,2,200,410,1,1,0,210,Q2,"));
}
