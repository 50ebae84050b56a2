use std::collections::HashMap;

use crate::timeline::TreatmentEpisode;

/// Stand-in for a response that is not a number: equivocal, not good.
pub const EQUIVOCAL_RESPONSE: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutcomeOptions {
    pub response_horizon: i64,
    pub drop_censored: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutcomeSummary {
    pub input_rows: usize,
    pub dropped_negative: usize,
    pub dropped_censored: usize,
    pub responders: usize,
    pub patients: usize,
}

pub fn binary_response(response: Option<f64>, disease_free_time: Option<i64>, horizon: i64) -> u8 {
    let response = response.unwrap_or(EQUIVOCAL_RESPONSE);
    let within_horizon = disease_free_time.is_some_and(|d| d < horizon);
    if response < EQUIVOCAL_RESPONSE || (response == EQUIVOCAL_RESPONSE && within_horizon) {
        1
    } else {
        0
    }
}

/// Drops rows with negative disease-free time (and censored rows if asked).
pub fn drop_invalid(
    episodes: &mut Vec<TreatmentEpisode>,
    drop_censored: bool,
) -> (usize, usize) {
    let mut negative = 0;
    let mut censored = 0;
    episodes.retain(|e| match e.disease_free_time {
        Some(d) if d < 0 => {
            negative += 1;
            false
        }
        None if drop_censored => {
            censored += 1;
            false
        }
        _ => true,
    });
    (negative, censored)
}

/// Only the last row carrying the patient's maximum `tnum` keeps the vital status.
pub fn correct_status(episodes: &mut [TreatmentEpisode]) -> usize {
    let mut last_max: HashMap<&str, (usize, usize)> = HashMap::new();
    for (row, e) in episodes.iter().enumerate() {
        let entry = last_max.entry(e.patient_id.as_str()).or_insert((e.tnum, row));
        if e.tnum >= entry.0 {
            *entry = (e.tnum, row);
        }
    }
    let retained: HashMap<String, (usize, usize)> = last_max
        .into_iter()
        .map(|(id, v)| (id.to_string(), v))
        .collect();

    for (row, e) in episodes.iter_mut().enumerate() {
        if let Some(&(maxtnum, keep_row)) = retained.get(&e.patient_id) {
            e.maxtnum = Some(maxtnum);
            if row != keep_row {
                e.status = 0;
            }
        }
    }
    retained.len()
}

pub fn derive_outcomes(
    episodes: &mut Vec<TreatmentEpisode>,
    options: OutcomeOptions,
) -> OutcomeSummary {
    let input_rows = episodes.len();
    let (dropped_negative, dropped_censored) = drop_invalid(episodes, options.drop_censored);

    let mut responders = 0;
    for e in episodes.iter_mut() {
        let label = binary_response(e.response, e.disease_free_time, options.response_horizon);
        responders += label as usize;
        e.binary_response = Some(label);
    }

    let patients = correct_status(episodes);

    OutcomeSummary {
        input_rows,
        dropped_negative,
        dropped_censored,
        responders,
        patients,
    }
}
