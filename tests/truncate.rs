use kira_timeline::timeline::truncate::{end_index, truncate};
use kira_timeline::timeline::{EventSequences, EventValue};

fn n(v: f64) -> EventValue {
    EventValue::Number(v)
}

fn seqs(treatment_type: Vec<EventValue>, response: Vec<EventValue>) -> EventSequences {
    EventSequences {
        treatment_time: vec![Some(0), Some(10), Some(20), None],
        recurrence_time: vec![None, Some(5), Some(15), None],
        treatment_type,
        response,
    }
}

#[test]
fn cuts_all_sequences_at_type_marker() {
    let mut s = seqs(
        vec![n(1.0), n(2.0), EventValue::End, EventValue::End],
        vec![n(1.0), n(1.0), EventValue::Missing, EventValue::Missing],
    );
    assert_eq!(truncate(&mut s), Some(2));
    assert_eq!(s.treatment_time, vec![Some(0), Some(10)]);
    assert_eq!(s.recurrence_time, vec![None, Some(5), Some(15)]);
    assert_eq!(s.treatment_type, vec![n(1.0), n(2.0)]);
    assert_eq!(s.response, vec![n(1.0), n(1.0)]);
}

#[test]
fn response_marker_takes_precedence() {
    let s = seqs(
        vec![n(1.0), EventValue::End, EventValue::End, EventValue::End],
        vec![n(1.0), n(2.0), EventValue::End, EventValue::End],
    );
    assert_eq!(end_index(&s), Some(2));
}

#[test]
fn no_marker_keeps_full_length() {
    let mut s = seqs(
        vec![n(1.0), EventValue::Unknown, n(1.0), EventValue::Missing],
        vec![n(1.0), n(1.0), n(1.0), EventValue::Missing],
    );
    let before = s.clone();
    assert_eq!(truncate(&mut s), None);
    assert_eq!(s, before);
}

#[test]
fn marker_at_start_empties_timeline() {
    let mut s = seqs(
        vec![EventValue::End, EventValue::End, EventValue::End, EventValue::End],
        vec![EventValue::End, EventValue::End, EventValue::End, EventValue::End],
    );
    assert_eq!(truncate(&mut s), Some(0));
    assert!(s.treatment_time.is_empty());
    assert_eq!(s.recurrence_time, vec![None]);
}
