use serde::{Deserialize, Serialize};

use crate::types::Seconds;

/// Outcome of challenging the record with a finished game's time
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RecordOutcome {
    /// No record existed yet, this time set it
    FirstRecord,
    /// The time matches or beats the record and replaces it
    NewBest,
    /// The record stands
    Unbeaten,
}

impl RecordOutcome {
    /// Whether the record changed and should be written back to the store
    pub const fn is_record(self) -> bool {
        match self {
            Self::FirstRecord => true,
            Self::NewBest => true,
            Self::Unbeaten => false,
        }
    }
}

/// Fastest completion in whole seconds, if any game was ever finished.
///
/// Serializes transparently: `Some(12)` persists as the bare number `12`,
/// which keeps values written by older builds readable.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BestTimeRecord(Option<Seconds>);

impl BestTimeRecord {
    pub const fn new(best: Option<Seconds>) -> Self {
        Self(best)
    }

    /// The record to display, if one exists.
    pub const fn best(self) -> Option<Seconds> {
        self.0
    }

    /// Challenges the record, keeping the faster time. Ties go to the newer
    /// run, so finishing exactly on the record still counts as one.
    pub fn challenge(&mut self, finished_in: Seconds) -> RecordOutcome {
        use RecordOutcome::*;

        match self.0 {
            None => {
                self.0 = Some(finished_in);
                log::debug!("First recorded time: {finished_in}s");
                FirstRecord
            }
            Some(best) if finished_in <= best => {
                self.0 = Some(finished_in);
                log::debug!("New best time: {finished_in}s, was {best}s");
                NewBest
            }
            Some(_) => Unbeaten,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_finish_sets_the_record() {
        let mut record = BestTimeRecord::default();

        let outcome = record.challenge(12);

        assert_eq!(outcome, RecordOutcome::FirstRecord);
        assert!(outcome.is_record());
        assert_eq!(record.best(), Some(12));
    }

    #[test]
    fn faster_time_beats_the_record() {
        // 9 wins over 12 even though "9" sorts after "12" as text
        let mut record = BestTimeRecord::new(Some(12));

        let outcome = record.challenge(9);

        assert_eq!(outcome, RecordOutcome::NewBest);
        assert_eq!(record.best(), Some(9));
    }

    #[test]
    fn slower_time_leaves_the_record() {
        let mut record = BestTimeRecord::new(Some(9));

        let outcome = record.challenge(12);

        assert_eq!(outcome, RecordOutcome::Unbeaten);
        assert!(!outcome.is_record());
        assert_eq!(record.best(), Some(9));
    }

    #[test]
    fn tying_the_record_still_records() {
        let mut record = BestTimeRecord::new(Some(12));

        let outcome = record.challenge(12);

        assert_eq!(outcome, RecordOutcome::NewBest);
        assert!(outcome.is_record());
        assert_eq!(record.best(), Some(12));
    }

    #[test]
    fn legacy_plain_numbers_deserialize() {
        let record: BestTimeRecord = serde_json::from_str("12").unwrap();

        assert_eq!(record.best(), Some(12));
    }

    #[test]
    fn record_serializes_as_a_bare_number() {
        let json = serde_json::to_string(&BestTimeRecord::new(Some(9))).unwrap();

        assert_eq!(json, "9");
        assert_eq!(
            serde_json::to_string(&BestTimeRecord::default()).unwrap(),
            "null"
        );
    }
}
