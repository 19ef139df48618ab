use crate::model::{Label, Record};

/// Record with the highest confidence among those labelled `label`.
///
/// Returns `None` when no record carries the label. Equal confidences
/// resolve to the earliest record in input order.
pub fn most_confident(records: &[Record], label: Label) -> Option<&Record> {
    let mut best: Option<&Record> = None;
    for record in records.iter().filter(|r| r.label() == label) {
        match best {
            Some(b) if record.confidence() <= b.confidence() => {}
            _ => best = Some(record),
        }
    }
    best
}

pub fn most_positive(records: &[Record]) -> Option<&Record> {
    most_confident(records, Label::Positive)
}

pub fn most_negative(records: &[Record]) -> Option<&Record> {
    most_confident(records, Label::Negative)
}
