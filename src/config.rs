use std::path::PathBuf;

pub const DEFAULT_SENTINEL_FLOOR: i64 = -5000;
pub const DEFAULT_RESPONSE_HORIZON: i64 = 180;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnPrefixes {
    pub treatment_time: String,
    pub recurrence_time: String,
    pub treatment_type: String,
    pub response: String,
}

impl Default for ColumnPrefixes {
    fn default() -> Self {
        Self {
            treatment_time: "treatment_time".to_string(),
            // Spelling follows the clinical export headers.
            recurrence_time: "reccurence_time".to_string(),
            treatment_type: "treatment_type".to_string(),
            response: "response_".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TimelineConfig {
    pub delimiter: u8,
    pub prefixes: ColumnPrefixes,
    /// Treatment times at or below this value mark a known-bad timeline.
    pub sentinel_floor: i64,
    /// Disease-free days under which an equivocal response still counts as a response.
    pub response_horizon: i64,
    pub verbosity: u8,
    pub drop_censored: bool,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            prefixes: ColumnPrefixes::default(),
            sentinel_floor: DEFAULT_SENTINEL_FLOOR,
            response_horizon: DEFAULT_RESPONSE_HORIZON,
            verbosity: 2,
            drop_censored: false,
        }
    }
}

/// Sources joined onto the clinical patient table by `prepare`.
#[derive(Debug, Clone)]
pub struct PrepareConfig {
    pub mutations: PathBuf,
    pub mutations_delimiter: u8,
    pub pfs: Option<PathBuf>,
    pub pfs_delimiter: u8,
    pub genes: Vec<String>,
}
