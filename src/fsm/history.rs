//! Transition log for machine instances.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Record of a single taken transition.
///
/// Records carry the declared names rather than the wrapped data, so a
/// log is serializable regardless of the state data type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// Name of the event that triggered the transition
    pub event: String,
    /// Name of the state transitioned from
    pub from: String,
    /// Name of the state transitioned to
    pub to: String,
    /// When the transition occurred
    pub timestamp: DateTime<Utc>,
}

/// Ordered log of taken transitions.
///
/// The log is immutable: [`record`](TransitionLog::record) returns a new
/// log with the entry appended. No-op event handling (an event with no
/// edge from the current state) is never recorded.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionLog {
    records: Vec<TransitionRecord>,
}

impl TransitionLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record, returning a new log.
    pub fn record(&self, record: TransitionRecord) -> Self {
        let mut records = self.records.clone();
        records.push(record);
        Self { records }
    }

    /// All records, oldest first.
    pub fn records(&self) -> &[TransitionRecord] {
        &self.records
    }

    /// The most recent record, if any.
    pub fn last(&self) -> Option<&TransitionRecord> {
        self.records.last()
    }

    /// Number of recorded transitions.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The visited state names: the starting state of the first record
    /// followed by each record's target state. Empty for an empty log.
    pub fn path(&self) -> Vec<&str> {
        let mut path = Vec::with_capacity(self.records.len() + 1);
        if let Some(first) = self.records.first() {
            path.push(first.from.as_str());
        }
        for record in &self.records {
            path.push(record.to.as_str());
        }
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(event: &str, from: &str, to: &str) -> TransitionRecord {
        TransitionRecord {
            event: event.to_string(),
            from: from.to_string(),
            to: to.to_string(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn record_is_pure() {
        let log = TransitionLog::new();
        let updated = log.record(record("go", "yellow", "green"));

        assert!(log.is_empty());
        assert_eq!(updated.len(), 1);
    }

    #[test]
    fn path_follows_recorded_transitions() {
        let log = TransitionLog::new()
            .record(record("go", "yellow", "green"))
            .record(record("slowdown", "green", "yellow"))
            .record(record("stop", "yellow", "red"));

        assert_eq!(log.path(), vec!["yellow", "green", "yellow", "red"]);
        assert_eq!(log.last().unwrap().event, "stop");
    }

    #[test]
    fn empty_log_has_empty_path() {
        let log = TransitionLog::new();
        assert!(log.path().is_empty());
        assert!(log.last().is_none());
    }

    #[test]
    fn log_serializes_round_trip() {
        let log = TransitionLog::new().record(record("go", "yellow", "green"));
        let json = serde_json::to_string(&log).unwrap();
        let back: TransitionLog = serde_json::from_str(&json).unwrap();
        assert_eq!(log, back);
    }
}
