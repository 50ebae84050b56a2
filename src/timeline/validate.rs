use crate::timeline::EventSequences;
use crate::timeline::diagnostics::{EventField, LostField, LostTime};

/// A position whose response and treatment type are read: its time is
/// present and the preceding time is not absent. Index 0 has no predecessor.
pub fn is_walked(times: &[Option<i64>], i: usize) -> bool {
    match times.get(i) {
        Some(Some(_)) => i == 0 || times[i - 1].is_some(),
        _ => false,
    }
}

/// A present time directly after an absent one.
pub fn is_gap(times: &[Option<i64>], i: usize) -> bool {
    i > 0 && matches!(times.get(i), Some(Some(_))) && times[i - 1].is_none()
}

pub fn validate_timeline(seqs: &EventSequences, sentinel_floor: i64) -> Result<(), LostTime> {
    let times = &seqs.treatment_time;
    let sentinel = times
        .iter()
        .enumerate()
        .find_map(|(index, t)| t.filter(|v| *v <= sentinel_floor).map(|value| (index, value)));
    if let Some((index, value)) = sentinel {
        return Err(LostTime::SentinelFloor { index, value });
    }
    match times.first() {
        Some(Some(_)) => Ok(()),
        _ => Err(LostTime::MissingFirst),
    }
}

pub fn flag_fields(seqs: &EventSequences) -> Vec<LostField> {
    let times = &seqs.treatment_time;
    let mut flags = Vec::new();
    for index in (0..times.len()).filter(|&i| is_walked(times, i)) {
        let response = seqs.response.get(index).and_then(|v| v.as_number());
        if response.is_none() {
            flags.push(LostField {
                field: EventField::Response,
                index,
            });
        }
        let treatment = seqs.treatment_type.get(index).and_then(|v| v.as_number());
        if treatment.is_none() {
            flags.push(LostField {
                field: EventField::TreatmentType,
                index,
            });
        }
    }
    flags
}
