use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnPrefixes {
    pub treatment_time: String,
    pub recurrence_time: String,
    pub treatment_type: String,
    pub response: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnGroupSizes {
    pub treatment_time: u64,
    pub recurrence_time: u64,
    pub treatment_type: u64,
    pub response: u64,
    pub genes: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputMeta {
    pub rows: Option<u64>,
    pub columns: Option<u64>,
    pub patients: Option<u64>,
    pub skipped_rows: u64,
    pub truncated_patients: u64,
    pub prefixes: Option<ColumnPrefixes>,
    pub groups: Option<ColumnGroupSizes>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeCounts {
    pub reconstructed: u64,
    pub dropped_negative: u64,
    pub dropped_censored: u64,
    pub written: u64,
    pub responders: u64,
    pub patients: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LostTimeEntry {
    pub patient_id: String,
    pub code: i64,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LostFieldEntry {
    pub patient_id: String,
    pub code: i64,
    pub field: String,
    pub index: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MalformedEntry {
    pub patient_id: String,
    pub column: String,
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostics {
    pub lost_times_patients: u64,
    pub rejected_patients: u64,
    pub lost_response_treatment_patients: u64,
    pub lost_times: Vec<LostTimeEntry>,
    pub lost_response_treatment: Vec<LostFieldEntry>,
    pub malformed_values: Vec<MalformedEntry>,
    pub internal_errors: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Outputs {
    pub episodes_csv: Option<String>,
    pub timeline_json: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineReportV1 {
    pub tool: String,
    pub version: String,
    pub schema_version: String,
    pub input_meta: InputMeta,
    pub episodes: EpisodeCounts,
    pub diagnostics: Diagnostics,
    pub outputs: Outputs,
    pub warnings: Vec<String>,
}

impl TimelineReportV1 {
    pub fn empty(tool_version: &str) -> Self {
        Self {
            tool: "kira-timeline".to_string(),
            version: tool_version.to_string(),
            schema_version: "v1".to_string(),
            input_meta: InputMeta {
                rows: None,
                columns: None,
                patients: None,
                skipped_rows: 0,
                truncated_patients: 0,
                prefixes: None,
                groups: None,
            },
            episodes: EpisodeCounts {
                reconstructed: 0,
                dropped_negative: 0,
                dropped_censored: 0,
                written: 0,
                responders: 0,
                patients: 0,
            },
            diagnostics: Diagnostics {
                lost_times_patients: 0,
                rejected_patients: 0,
                lost_response_treatment_patients: 0,
                lost_times: Vec::new(),
                lost_response_treatment: Vec::new(),
                malformed_values: Vec::new(),
                internal_errors: Vec::new(),
            },
            outputs: Outputs {
                episodes_csv: None,
                timeline_json: None,
            },
            warnings: Vec::new(),
        }
    }
}
