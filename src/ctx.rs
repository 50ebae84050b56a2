use std::path::{Path, PathBuf};

use crate::config::{PrepareConfig, TimelineConfig};
use crate::input::ColumnLayout;
use crate::io::table::Table;
use crate::prepare::PreparedTable;
use crate::schema::v1::TimelineReportV1;
use crate::timeline::diagnostics::Diagnostics;
use crate::timeline::outcome::OutcomeSummary;
use crate::timeline::{PatientRecord, TreatmentEpisode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    CsvGz,
}

impl InputFormat {
    pub fn detect(path: &Path) -> Self {
        if path.extension().and_then(|s| s.to_str()) == Some("gz") {
            Self::CsvGz
        } else {
            Self::Csv
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct InputMeta {
    pub rows: Option<u64>,
    pub columns: Option<u64>,
    pub patients: Option<u64>,
    pub skipped_rows: u64,
    pub truncated_patients: u64,
}

#[derive(Debug, Clone)]
pub struct OutputPaths {
    pub out_dir: PathBuf,
    pub csv_path: PathBuf,
    pub json_path: PathBuf,
    pub prepared_path: PathBuf,
}

#[derive(Debug)]
pub struct Ctx {
    pub input: PathBuf,
    pub input_format: InputFormat,
    pub config: TimelineConfig,
    pub write_json: bool,
    pub table: Option<Table>,
    pub layout: Option<ColumnLayout>,
    pub records: Vec<PatientRecord>,
    pub episodes: Vec<TreatmentEpisode>,
    pub diagnostics: Diagnostics,
    pub outcome: Option<OutcomeSummary>,
    pub warnings: Vec<String>,
    pub input_meta: InputMeta,
    pub output: OutputPaths,
    pub report: TimelineReportV1,
    pub prepare: Option<PrepareConfig>,
    pub prepared: Option<PreparedTable>,
}

impl Ctx {
    pub fn new(
        input: PathBuf,
        out_dir: PathBuf,
        config: TimelineConfig,
        write_json: bool,
        tool_version: &str,
    ) -> Self {
        let csv_path = out_dir.join("episodes.csv");
        let json_path = out_dir.join("timeline_report.json");
        let prepared_path = out_dir.join("clinical.csv");
        Self {
            input_format: InputFormat::detect(&input),
            input,
            config,
            write_json,
            table: None,
            layout: None,
            records: Vec::new(),
            episodes: Vec::new(),
            diagnostics: Diagnostics::default(),
            outcome: None,
            warnings: Vec::new(),
            input_meta: InputMeta::default(),
            output: OutputPaths {
                out_dir,
                csv_path,
                json_path,
                prepared_path,
            },
            report: TimelineReportV1::empty(tool_version),
            prepare: None,
            prepared: None,
        }
    }
}
