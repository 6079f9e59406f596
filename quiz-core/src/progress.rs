//! Per-expectation practice progress for the curriculum browser.

use crate::curriculum::{get_strand, get_substrand, total_expectations};
use crate::store::{load_or_default, save_json, KeyValueStore, StoreError, PRACTICE_PROGRESS_KEY};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Rounded percentage of correct answers, 0 when nothing was attempted.
pub fn accuracy_percent(correct: u32, attempted: u32) -> u32 {
    if attempted == 0 {
        return 0;
    }
    (100.0 * f64::from(correct) / f64::from(attempted)).round() as u32
}

/// Practice record for one expectation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpectationProgress {
    pub code: String,
    pub attempted: u32,
    pub correct: u32,
    pub last_attempted: Option<DateTime<Utc>>,
}

impl ExpectationProgress {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            attempted: 0,
            correct: 0,
            last_attempted: None,
        }
    }

    pub fn accuracy(&self) -> u32 {
        accuracy_percent(self.correct, self.attempted)
    }
}

/// The whole persisted progress map, keyed by expectation code.
pub type ProgressMap = BTreeMap<String, ExpectationProgress>;

/// Totals over a set of progress records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProgressSummary {
    pub total_attempted: u32,
    pub total_correct: u32,
    pub accuracy: u32,
    /// Expectations with at least one attempt.
    pub practiced: usize,
    /// Expectations in scope, practiced or not.
    pub total_expectations: usize,
}

/// Tracks practice answers and writes them through to a store.
pub struct ProgressTracker<S: KeyValueStore> {
    store: S,
    progress: ProgressMap,
}

impl<S: KeyValueStore> ProgressTracker<S> {
    /// Load the progress map from the store, or start empty.
    pub fn load(store: S) -> Self {
        let progress: ProgressMap = load_or_default(&store, PRACTICE_PROGRESS_KEY);
        debug!(records = progress.len(), "practice progress loaded");
        Self { store, progress }
    }

    /// Record one answer for `code`, stamped with the current time.
    pub fn record_answer(
        &mut self,
        code: &str,
        was_correct: bool,
    ) -> Result<&ExpectationProgress, StoreError> {
        self.record_answer_at(code, was_correct, Utc::now())
    }

    /// Record one answer for `code` with an explicit timestamp.
    ///
    /// The in-memory record is updated before the write; if the write fails
    /// the error is returned and memory keeps the new count.
    pub fn record_answer_at(
        &mut self,
        code: &str,
        was_correct: bool,
        at: DateTime<Utc>,
    ) -> Result<&ExpectationProgress, StoreError> {
        let entry = self
            .progress
            .entry(code.to_string())
            .or_insert_with(|| ExpectationProgress::new(code));
        entry.attempted += 1;
        if was_correct {
            entry.correct += 1;
        }
        entry.last_attempted = Some(at);
        debug!(
            code,
            was_correct,
            attempted = entry.attempted,
            correct = entry.correct,
            "answer recorded"
        );

        save_json(&mut self.store, PRACTICE_PROGRESS_KEY, &self.progress)?;
        Ok(&self.progress[code])
    }

    /// Progress for `code`, or `None` if it was never attempted.
    pub fn get(&self, code: &str) -> Option<&ExpectationProgress> {
        self.progress.get(code)
    }

    pub fn all(&self) -> &ProgressMap {
        &self.progress
    }

    /// Clear every record and the persisted copy.
    pub fn reset(&mut self) -> Result<(), StoreError> {
        self.progress.clear();
        self.store.remove(PRACTICE_PROGRESS_KEY)?;
        info!("practice progress reset");
        Ok(())
    }

    /// Totals over the whole curriculum.
    pub fn summary(&self) -> ProgressSummary {
        let mut summary = self.summarize(self.progress.values());
        summary.total_expectations = total_expectations();
        summary
    }

    /// Totals restricted to one strand, or `None` for an unknown strand.
    pub fn strand_summary(&self, strand_id: &str) -> Option<ProgressSummary> {
        let strand = get_strand(strand_id)?;
        let records = strand
            .expectations()
            .filter_map(|e| self.progress.get(&e.code));
        let mut summary = self.summarize(records);
        summary.total_expectations = strand.expectations().count();
        Some(summary)
    }

    /// Number of practiced expectations in one substrand.
    pub fn practiced_in_substrand(&self, strand_id: &str, substrand_id: &str) -> Option<usize> {
        let (_, substrand) = get_substrand(strand_id, substrand_id)?;
        Some(
            substrand
                .expectations
                .iter()
                .filter(|e| self.progress.get(&e.code).is_some_and(|p| p.attempted > 0))
                .count(),
        )
    }

    fn summarize<'a>(
        &self,
        records: impl Iterator<Item = &'a ExpectationProgress>,
    ) -> ProgressSummary {
        let mut summary = ProgressSummary::default();
        for record in records {
            summary.total_attempted += record.attempted;
            summary.total_correct += record.correct;
            if record.attempted > 0 {
                summary.practiced += 1;
            }
        }
        summary.accuracy = accuracy_percent(summary.total_correct, summary.total_attempted);
        summary
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use chrono::TimeZone;
    use proptest::prelude::*;

    #[test]
    fn test_accuracy_percent() {
        assert_eq!(accuracy_percent(0, 0), 0);
        assert_eq!(accuracy_percent(1, 3), 33);
        assert_eq!(accuracy_percent(2, 3), 67);
        assert_eq!(accuracy_percent(1, 2), 50);
        assert_eq!(accuracy_percent(5, 5), 100);
    }

    #[test]
    fn test_first_answer_creates_record() {
        let mut tracker = ProgressTracker::load(MemoryStore::new());
        assert!(tracker.get("B1.1").is_none());

        let at = Utc.with_ymd_and_hms(2024, 9, 3, 8, 30, 0).unwrap();
        let record = tracker.record_answer_at("B1.1", true, at).unwrap();
        assert_eq!(record.attempted, 1);
        assert_eq!(record.correct, 1);
        assert_eq!(record.last_attempted, Some(at));
    }

    #[test]
    fn test_wrong_answer_only_counts_attempt() {
        let mut tracker = ProgressTracker::load(MemoryStore::new());
        tracker.record_answer("B1.1", true).unwrap();
        tracker.record_answer("B1.1", false).unwrap();

        let record = tracker.get("B1.1").unwrap();
        assert_eq!(record.attempted, 2);
        assert_eq!(record.correct, 1);
        assert_eq!(record.accuracy(), 50);
    }

    #[test]
    fn test_each_answer_is_persisted() {
        let mut tracker = ProgressTracker::load(MemoryStore::new());
        tracker.record_answer("C2.3", true).unwrap();

        let reloaded = ProgressTracker::load(tracker.into_store());
        assert_eq!(reloaded.get("C2.3").unwrap().correct, 1);
    }

    #[test]
    fn test_persisted_shape_uses_camel_case() {
        let mut tracker = ProgressTracker::load(MemoryStore::new());
        let at = Utc.with_ymd_and_hms(2024, 9, 3, 8, 30, 0).unwrap();
        tracker.record_answer_at("E2.5", false, at).unwrap();

        let raw = tracker.store().load(PRACTICE_PROGRESS_KEY).unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["E2.5"]["code"], "E2.5");
        assert_eq!(json["E2.5"]["attempted"], 1);
        assert_eq!(json["E2.5"]["lastAttempted"], "2024-09-03T08:30:00Z");
    }

    #[test]
    fn test_reset_clears_memory_and_store() {
        let mut tracker = ProgressTracker::load(MemoryStore::new());
        tracker.record_answer("B1.1", true).unwrap();
        tracker.reset().unwrap();

        assert!(tracker.all().is_empty());
        assert!(tracker.store().is_empty());

        let reloaded = ProgressTracker::load(tracker.into_store());
        assert!(reloaded.all().is_empty());
    }

    #[test]
    fn test_corrupt_store_loads_empty() {
        let mut store = MemoryStore::new();
        store.save(PRACTICE_PROGRESS_KEY, "[1, 2, 3").unwrap();
        let tracker = ProgressTracker::load(store);
        assert!(tracker.all().is_empty());
    }

    #[test]
    fn test_summary() {
        let mut tracker = ProgressTracker::load(MemoryStore::new());
        tracker.record_answer("B1.1", true).unwrap();
        tracker.record_answer("B1.1", true).unwrap();
        tracker.record_answer("D2.2", false).unwrap();

        let summary = tracker.summary();
        assert_eq!(summary.total_attempted, 3);
        assert_eq!(summary.total_correct, 2);
        assert_eq!(summary.accuracy, 67);
        assert_eq!(summary.practiced, 2);
        assert_eq!(summary.total_expectations, 50);
    }

    #[test]
    fn test_strand_summary() {
        let mut tracker = ProgressTracker::load(MemoryStore::new());
        tracker.record_answer("B1.1", true).unwrap();
        tracker.record_answer("B2.4", false).unwrap();
        tracker.record_answer("D2.2", true).unwrap();

        let number = tracker.strand_summary("B").unwrap();
        assert_eq!(number.total_attempted, 2);
        assert_eq!(number.total_correct, 1);
        assert_eq!(number.practiced, 2);
        assert_eq!(number.total_expectations, 17);

        let financial = tracker.strand_summary("F").unwrap();
        assert_eq!(financial.practiced, 0);
        assert_eq!(financial.accuracy, 0);

        assert!(tracker.strand_summary("Z").is_none());
    }

    #[test]
    fn test_practiced_in_substrand() {
        let mut tracker = ProgressTracker::load(MemoryStore::new());
        tracker.record_answer("C2.1", true).unwrap();
        tracker.record_answer("C2.3", false).unwrap();
        tracker.record_answer("C1.1", false).unwrap();

        assert_eq!(tracker.practiced_in_substrand("C", "C2"), Some(2));
        assert_eq!(tracker.practiced_in_substrand("C", "C3"), Some(0));
        assert_eq!(tracker.practiced_in_substrand("C", "X1"), None);
    }

    proptest! {
        #[test]
        fn prop_correct_never_exceeds_attempted(
            answers in prop::collection::vec((0usize..4, any::<bool>()), 0..60)
        ) {
            let codes = ["B1.1", "C2.3", "D1.5", "F1.3"];
            let mut tracker = ProgressTracker::load(MemoryStore::new());
            for (idx, correct) in answers {
                let record = tracker.record_answer(codes[idx], correct).unwrap();
                prop_assert!(record.correct <= record.attempted);
            }
            for record in tracker.all().values() {
                prop_assert!(record.correct <= record.attempted);
            }
        }
    }
}
