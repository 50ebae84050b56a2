use std::collections::BTreeMap;

use crate::timeline::TimelineError;
use crate::timeline::extract::MalformedValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LostTime {
    /// A treatment time at or below the sentinel floor; the patient is rejected.
    SentinelFloor { index: usize, value: i64 },
    /// The first treatment time is absent or the timeline is empty; the patient is rejected.
    MissingFirst,
    /// An absent time followed by a present one at `index`.
    Gap { index: usize },
}

impl LostTime {
    pub fn code(&self) -> i64 {
        match self {
            LostTime::SentinelFloor { .. } => -1,
            LostTime::MissingFirst => -2,
            LostTime::Gap { index } => *index as i64,
        }
    }

    pub fn rejects(&self) -> bool {
        !matches!(self, LostTime::Gap { .. })
    }

    pub fn describe(&self) -> String {
        match self {
            LostTime::SentinelFloor { index, value } => {
                format!("sentinel time {} at index {}", value, index)
            }
            LostTime::MissingFirst => "first treatment time missing".to_string(),
            LostTime::Gap { index } => format!("missing time before index {}", index),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventField {
    Response,
    TreatmentType,
}

impl EventField {
    pub fn name(&self) -> &'static str {
        match self {
            EventField::Response => "response",
            EventField::TreatmentType => "treatment_type",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LostField {
    pub field: EventField,
    pub index: usize,
}

impl LostField {
    pub fn code(&self) -> i64 {
        let base = match self.field {
            EventField::Response => 3,
            EventField::TreatmentType => 2,
        };
        -base * 10 - self.index as i64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Issue {
    LostTime(LostTime),
    LostField(LostField),
}

#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    pub lost_times: BTreeMap<String, Vec<LostTime>>,
    pub lost_response_treatment: BTreeMap<String, Vec<LostField>>,
    pub malformed: Vec<MalformedValue>,
    pub internal_errors: Vec<TimelineError>,
}

impl Diagnostics {
    pub fn record(&mut self, patient_id: &str, issue: Issue) {
        match issue {
            Issue::LostTime(lost) => self
                .lost_times
                .entry(patient_id.to_string())
                .or_default()
                .push(lost),
            Issue::LostField(lost) => self
                .lost_response_treatment
                .entry(patient_id.to_string())
                .or_default()
                .push(lost),
        }
    }

    pub fn record_all(&mut self, patient_id: &str, issues: impl IntoIterator<Item = Issue>) {
        for issue in issues {
            self.record(patient_id, issue);
        }
    }

    pub fn rejected_patients(&self) -> usize {
        self.lost_times
            .values()
            .filter(|items| items.iter().any(LostTime::rejects))
            .count()
    }

    pub fn is_clean(&self) -> bool {
        self.lost_times.is_empty()
            && self.lost_response_treatment.is_empty()
            && self.malformed.is_empty()
            && self.internal_errors.is_empty()
    }
}
