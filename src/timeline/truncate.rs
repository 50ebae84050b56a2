use crate::timeline::{EventSequences, EventValue};

fn first_end(values: &[EventValue]) -> Option<usize> {
    values.iter().position(EventValue::is_end)
}

/// Index of the `none` marker that ends the observed events. A marker in the
/// response sequence overrides one in the treatment-type sequence.
pub fn end_index(seqs: &EventSequences) -> Option<usize> {
    first_end(&seqs.response).or_else(|| first_end(&seqs.treatment_type))
}

/// Cuts the sequences at the end marker; returns the cut index.
///
/// Recurrence times keep one extra slot: the recurrence at `k` follows the
/// last kept treatment.
pub fn truncate(seqs: &mut EventSequences) -> Option<usize> {
    let k = end_index(seqs)?;
    seqs.treatment_time.truncate(k);
    seqs.recurrence_time.truncate(k + 1);
    seqs.treatment_type.truncate(k);
    seqs.response.truncate(k);
    Some(k)
}
