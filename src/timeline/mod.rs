pub mod diagnostics;
pub mod episodes;
pub mod extract;
pub mod outcome;
pub mod truncate;
pub mod validate;

use thiserror::Error;

/// One coerced treatment-type or response cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventValue {
    Number(f64),
    /// The `none` token: no further events were recorded.
    End,
    Unknown,
    Missing,
}

impl EventValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            EventValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_end(&self) -> bool {
        matches!(self, EventValue::End)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventSequences {
    pub treatment_time: Vec<Option<i64>>,
    pub recurrence_time: Vec<Option<i64>>,
    pub treatment_type: Vec<EventValue>,
    pub response: Vec<EventValue>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VitalStatus {
    Alive,
    Deceased,
}

impl VitalStatus {
    pub fn code(&self) -> u8 {
        match self {
            VitalStatus::Alive => 0,
            VitalStatus::Deceased => 1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaticAttributes {
    pub anatomic_stage: String,
    pub cancer_type: String,
    pub smoking: String,
    pub alcohol_history: String,
    pub drugs: String,
    pub sex: String,
    pub race: String,
    pub age: String,
    pub age_level: String,
    pub p16: String,
    pub overall_survival: String,
    pub current_treatment: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PatientRecord {
    pub patient_id: String,
    pub status: VitalStatus,
    pub survival_in_days: i64,
    pub attributes: StaticAttributes,
    /// Values of the `gene_*` columns, in layout order.
    pub genes: Vec<String>,
    pub number_of_mutation: u32,
    pub sequences: EventSequences,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TreatmentEpisode {
    pub patient_id: String,
    pub tindex: usize,
    pub tnum: usize,
    pub treatment_group: u8,
    pub treatment_time: i64,
    pub recc_time: Option<i64>,
    pub response: Option<f64>,
    pub treatment_type: Option<f64>,
    pub status: u8,
    pub disease_free_time: Option<i64>,
    pub attributes: StaticAttributes,
    pub genes: Vec<String>,
    pub number_of_mutation: u32,
    pub binary_response: Option<u8>,
    pub maxtnum: Option<usize>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimelineError {
    #[error(
        "patient {patient_id}: response and treatment lists differ in length ({responses} != {treatments})"
    )]
    ResponseTreatmentMismatch {
        patient_id: String,
        responses: usize,
        treatments: usize,
    },
    #[error("patient {patient_id}: disease-free time from day {start} to day {end} overflows")]
    DiseaseFreeTimeOverflow {
        patient_id: String,
        start: i64,
        end: i64,
    },
}
