use tracing::debug;

use crate::timeline::diagnostics::{Issue, LostTime};
use crate::timeline::validate::{flag_fields, is_gap, is_walked, validate_timeline};
use crate::timeline::{EventValue, PatientRecord, TimelineError, TreatmentEpisode, VitalStatus};

/// One treatment event with everything aligned to it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpisodeSlot {
    /// Raw event index; `None` for the implicit baseline.
    pub raw_index: Option<usize>,
    pub time: i64,
    pub response: EventValue,
    pub treatment_type: EventValue,
    pub next_recurrence: Option<i64>,
}

#[derive(Debug, Clone, Default)]
pub struct Reconstruction {
    pub episodes: Vec<TreatmentEpisode>,
    pub issues: Vec<Issue>,
    pub rejected: bool,
}

pub fn treatment_group(tnum: usize) -> u8 {
    match tnum {
        0 | 1 => 1,
        2 | 3 => 2,
        _ => 3,
    }
}

/// Builds the episode slots for a validated patient.
///
/// The slot for raw treatment index `k` is followed by raw recurrence index
/// `k + 1`; an implicit baseline at day 0 is prepended when the first
/// treatment happens after day 0 and is followed by recurrence index 0.
pub fn align_slots(record: &PatientRecord) -> Result<(Vec<EpisodeSlot>, Vec<Issue>), TimelineError> {
    let seqs = &record.sequences;
    let times = &seqs.treatment_time;

    let issues: Vec<Issue> = (0..times.len())
        .filter(|&i| is_gap(times, i))
        .map(|index| Issue::LostTime(LostTime::Gap { index }))
        .collect();

    let walked: Vec<usize> = (0..times.len()).filter(|&i| is_walked(times, i)).collect();
    let responses: Vec<EventValue> = walked
        .iter()
        .filter_map(|&i| seqs.response.get(i).copied())
        .collect();
    let treatments: Vec<EventValue> = walked
        .iter()
        .filter_map(|&i| seqs.treatment_type.get(i).copied())
        .collect();
    if responses.len() != treatments.len() {
        return Err(TimelineError::ResponseTreatmentMismatch {
            patient_id: record.patient_id.clone(),
            responses: responses.len(),
            treatments: treatments.len(),
        });
    }

    let recurrence_at = |i: usize| seqs.recurrence_time.get(i).copied().flatten();
    let mut walked_values = responses.into_iter().zip(treatments);
    let mut slots = Vec::with_capacity(walked.len() + 1);
    for (i, t) in times.iter().enumerate() {
        let Some(time) = *t else { continue };
        let (response, treatment_type) = if is_walked(times, i) {
            walked_values
                .next()
                .unwrap_or((EventValue::Missing, EventValue::Missing))
        } else {
            (EventValue::Missing, EventValue::Missing)
        };
        slots.push(EpisodeSlot {
            raw_index: Some(i),
            time,
            response,
            treatment_type,
            next_recurrence: recurrence_at(i + 1),
        });
    }

    if slots.first().is_some_and(|s| s.time > 0) {
        slots.insert(
            0,
            EpisodeSlot {
                raw_index: None,
                time: 0,
                response: EventValue::Missing,
                treatment_type: EventValue::Missing,
                next_recurrence: recurrence_at(0),
            },
        );
    }

    Ok((slots, issues))
}

fn days_between(patient_id: &str, start: i64, end: i64) -> Result<i64, TimelineError> {
    end.checked_sub(start)
        .ok_or_else(|| TimelineError::DiseaseFreeTimeOverflow {
            patient_id: patient_id.to_string(),
            start,
            end,
        })
}

pub fn build_episodes(
    record: &PatientRecord,
    slots: &[EpisodeSlot],
) -> Result<Vec<TreatmentEpisode>, TimelineError> {
    let mut episodes = Vec::with_capacity(slots.len());
    let mut tnum = 0usize;
    for (i, slot) in slots.iter().enumerate() {
        let recc_time = match (slot.next_recurrence, record.status) {
            (Some(recurrence), _) => Some(recurrence),
            (None, VitalStatus::Deceased) => Some(record.survival_in_days),
            (None, VitalStatus::Alive) => None,
        };
        let disease_free_time = recc_time
            .map(|end| days_between(&record.patient_id, slot.time, end))
            .transpose()?;
        let response = slot.response.as_number();
        if response.is_some() {
            tnum += 1;
        }
        episodes.push(TreatmentEpisode {
            patient_id: record.patient_id.clone(),
            tindex: i + 1,
            tnum,
            treatment_group: treatment_group(tnum),
            treatment_time: slot.time,
            recc_time,
            response,
            treatment_type: slot.treatment_type.as_number(),
            status: record.status.code(),
            disease_free_time,
            attributes: record.attributes.clone(),
            genes: record.genes.clone(),
            number_of_mutation: record.number_of_mutation,
            binary_response: None,
            maxtnum: None,
        });
    }
    Ok(episodes)
}

pub fn reconstruct(
    record: &PatientRecord,
    sentinel_floor: i64,
) -> Result<Reconstruction, TimelineError> {
    if let Err(lost) = validate_timeline(&record.sequences, sentinel_floor) {
        debug!(
            patient_id = %record.patient_id,
            reason = %lost.describe(),
            "patient rejected"
        );
        return Ok(Reconstruction {
            episodes: Vec::new(),
            issues: vec![Issue::LostTime(lost)],
            rejected: true,
        });
    }

    let mut issues: Vec<Issue> = flag_fields(&record.sequences)
        .into_iter()
        .map(Issue::LostField)
        .collect();
    let (slots, gaps) = align_slots(record)?;
    issues.extend(gaps);

    debug!(
        patient_id = %record.patient_id,
        times = ?slots.iter().map(|s| s.time).collect::<Vec<_>>(),
        responses = ?slots.iter().map(|s| s.response).collect::<Vec<_>>(),
        treatments = ?slots.iter().map(|s| s.treatment_type).collect::<Vec<_>>(),
        "timeline aligned"
    );

    Ok(Reconstruction {
        episodes: build_episodes(record, &slots)?,
        issues,
        rejected: false,
    })
}
