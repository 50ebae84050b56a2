use anyhow::{Context, Result, bail};
use tracing::warn;

use crate::input::{
    ColumnGroup, ColumnLayout, PATIENT_ID_COLUMN, STATUS_COLUMN, SURVIVAL_COLUMN,
};
use crate::timeline::{EventSequences, EventValue, PatientRecord, StaticAttributes, VitalStatus};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedValue {
    pub patient_id: String,
    pub column: String,
    pub token: String,
}

#[derive(Debug, Clone)]
pub struct Extraction {
    pub record: PatientRecord,
    pub malformed: Vec<MalformedValue>,
}

/// Maps the absence tokens; `None` means the token is not one of them.
fn absent_token(token: &str) -> Option<EventValue> {
    match token.to_ascii_lowercase().as_str() {
        "none" => Some(EventValue::End),
        "unknown" => Some(EventValue::Unknown),
        "" | "nan" | "na" | "n/a" | "#n/a" | "null" => Some(EventValue::Missing),
        _ => None,
    }
}

/// Empty or NaN-like token.
pub fn is_absent(token: &str) -> bool {
    matches!(absent_token(token.trim()), Some(EventValue::Missing))
}

pub fn parse_integer(token: &str) -> Option<i64> {
    if let Ok(v) = token.parse::<i64>() {
        return Some(v);
    }
    let v = token.parse::<f64>().ok()?;
    if v.is_finite() && v.fract() == 0.0 && v.abs() < i64::MAX as f64 {
        Some(v as i64)
    } else {
        None
    }
}

/// Outer `None` means the token is malformed; inner `None` is an absent time.
pub fn coerce_time(token: &str) -> Option<Option<i64>> {
    let token = token.trim();
    if absent_token(token).is_some() {
        return Some(None);
    }
    parse_integer(token).map(Some)
}

/// `None` means the token is malformed.
pub fn coerce_event(token: &str) -> Option<EventValue> {
    let token = token.trim();
    if let Some(absent) = absent_token(token) {
        return Some(absent);
    }
    match token.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(EventValue::Number(v)),
        _ => None,
    }
}

pub fn parse_status(token: &str) -> Option<VitalStatus> {
    match token.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "dead" | "deceased" => Some(VitalStatus::Deceased),
        "0" | "false" | "alive" | "living" => Some(VitalStatus::Alive),
        other => match parse_integer(other) {
            Some(1) => Some(VitalStatus::Deceased),
            Some(0) => Some(VitalStatus::Alive),
            _ => None,
        },
    }
}

pub fn is_truthy(token: &str) -> bool {
    match token.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => true,
        other => other
            .parse::<f64>()
            .map(|v| v.is_finite() && v != 0.0)
            .unwrap_or(false),
    }
}

pub(crate) fn cell<'a>(row: &'a [String], index: usize) -> &'a str {
    row.get(index).map(String::as_str).unwrap_or("")
}

fn collect_group<T>(
    row: &[String],
    group: &ColumnGroup,
    patient_id: &str,
    coerce: impl Fn(&str) -> Option<T>,
    malformed: &mut Vec<MalformedValue>,
) -> Vec<T> {
    let mut out = Vec::with_capacity(group.len());
    for column in &group.columns {
        let token = cell(row, column.index);
        match coerce(token) {
            Some(value) => out.push(value),
            None => {
                warn!(
                    patient_id,
                    column = %column.name,
                    token,
                    "malformed value dropped"
                );
                malformed.push(MalformedValue {
                    patient_id: patient_id.to_string(),
                    column: column.name.clone(),
                    token: token.to_string(),
                });
            }
        }
    }
    out
}

pub fn extract_sequences(
    row: &[String],
    layout: &ColumnLayout,
    patient_id: &str,
) -> (EventSequences, Vec<MalformedValue>) {
    let mut malformed = Vec::new();
    let sequences = EventSequences {
        treatment_time: collect_group(
            row,
            &layout.treatment_time,
            patient_id,
            coerce_time,
            &mut malformed,
        ),
        recurrence_time: collect_group(
            row,
            &layout.recurrence_time,
            patient_id,
            coerce_time,
            &mut malformed,
        ),
        treatment_type: collect_group(
            row,
            &layout.treatment_type,
            patient_id,
            coerce_event,
            &mut malformed,
        ),
        response: collect_group(
            row,
            &layout.response,
            patient_id,
            coerce_event,
            &mut malformed,
        ),
    };
    (sequences, malformed)
}

fn static_attributes(row: &[String], layout: &ColumnLayout) -> StaticAttributes {
    let value = |name: &str| {
        layout
            .position(name)
            .map(|i| cell(row, i).trim().to_string())
            .unwrap_or_default()
    };
    StaticAttributes {
        anatomic_stage: value("anatomic_stage"),
        cancer_type: value("cancer_type"),
        smoking: value("smoking"),
        alcohol_history: value("alcohol_history"),
        drugs: value("drugs"),
        sex: value("sex"),
        race: value("race"),
        age: value("age"),
        age_level: value("age_level"),
        p16: value("p16"),
        overall_survival: value("overall_survival_in_days"),
        current_treatment: value("current_treatment"),
    }
}

pub fn extract_record(row: &[String], layout: &ColumnLayout) -> Result<Extraction> {
    let patient_id = cell(row, layout.patient_id).trim().to_string();
    if patient_id.is_empty() {
        bail!("empty {}", PATIENT_ID_COLUMN);
    }

    let status_token = cell(row, layout.status);
    let status = parse_status(status_token).with_context(|| {
        format!(
            "patient {}: unrecognized {} '{}'",
            patient_id, STATUS_COLUMN, status_token
        )
    })?;

    let survival_token = cell(row, layout.survival_in_days).trim();
    let survival_in_days = parse_integer(survival_token).with_context(|| {
        format!(
            "patient {}: unparsable {} '{}'",
            patient_id, SURVIVAL_COLUMN, survival_token
        )
    })?;
    if survival_in_days <= 0 {
        bail!(
            "patient {}: {} must be positive, got {}",
            patient_id,
            SURVIVAL_COLUMN,
            survival_in_days
        );
    }

    let genes: Vec<String> = layout
        .genes
        .iter()
        .map(|c| cell(row, c.index).trim().to_string())
        .collect();
    let number_of_mutation = genes.iter().filter(|g| is_truthy(g)).count() as u32;

    let (sequences, malformed) = extract_sequences(row, layout, &patient_id);

    Ok(Extraction {
        record: PatientRecord {
            attributes: static_attributes(row, layout),
            patient_id,
            status,
            survival_in_days,
            genes,
            number_of_mutation,
            sequences,
        },
        malformed,
    })
}
