//! Testing utilities for the quiz.
//!
//! This module provides tools for integration testing:
//! - Fixed quest questions with known answers and rewards
//! - `TestHarness` for scripted battle and practice scenarios
//! - Assertion helpers for verifying player state

use crate::progress::ProgressTracker;
use crate::quest::{
    AnswerOutcome, BattleReport, BattleState, Difficulty, PlayerProgress, QuestError, QuestGame,
    QuestQuestion, QuestStrand,
};
use crate::store::MemoryStore;

/// `count` easy number questions. Question `i` has id `q-<i>` and its
/// correct option at index `i % 4`.
pub fn sample_questions(count: usize) -> Vec<QuestQuestion> {
    (0..count)
        .map(|i| {
            QuestQuestion::new(
                format!("q-{i}"),
                QuestStrand::Number,
                "Test",
                Difficulty::Easy,
                format!("What is {i} + 1?"),
                &["a", "b", "c", "d"],
                i % 4,
            )
        })
        .collect()
}

/// The option index that answers `question` correctly or not.
pub fn choice_for(question: &QuestQuestion, correct: bool) -> usize {
    if correct {
        question.correct_answer
    } else {
        (question.correct_answer + 1) % question.options.len().max(1)
    }
}

/// Answer a standalone battle from a script of right/wrong answers.
///
/// Panics if the battle ends before the script does.
#[track_caller]
pub fn answer_script(battle: &mut BattleState, script: &[bool]) -> Vec<AnswerOutcome> {
    script
        .iter()
        .map(|&correct| {
            let choice = match battle.current_question() {
                Some(q) => choice_for(q, correct),
                None => panic!("battle ended before the script did"),
            };
            battle.answer(choice).unwrap_or_else(|e| panic!("answer failed: {e}"))
        })
        .collect()
}

/// Test harness backed by in-memory stores.
pub struct TestHarness {
    pub game: QuestGame<MemoryStore>,
    pub tracker: ProgressTracker<MemoryStore>,
}

impl TestHarness {
    /// A fresh player with a fixed shuffle seed.
    pub fn new() -> Self {
        Self {
            game: QuestGame::with_seed(MemoryStore::new(), 1),
            tracker: ProgressTracker::load(MemoryStore::new()),
        }
    }

    /// A harness whose quest store already holds `player`.
    pub fn with_player(player: &PlayerProgress) -> Self {
        let mut store = MemoryStore::new();
        crate::store::save_json(&mut store, crate::store::QUEST_PROGRESS_KEY, player)
            .unwrap_or_else(|e| panic!("seeding store failed: {e}"));
        Self {
            game: QuestGame::with_seed(store, 1),
            tracker: ProgressTracker::load(MemoryStore::new()),
        }
    }

    /// Start a battle over `sample_questions(count)`.
    pub fn start_sample_battle(&mut self, battle_id: &str, count: usize) -> &mut Self {
        self.game
            .start_with_questions(battle_id, sample_questions(count))
            .unwrap_or_else(|e| panic!("could not start battle: {e}"));
        self
    }

    /// Answer the active battle from a script of right/wrong answers.
    pub fn play(&mut self, script: &[bool]) -> Vec<AnswerOutcome> {
        script
            .iter()
            .map(|&correct| {
                let choice = match self.game.battle().and_then(BattleState::current_question) {
                    Some(q) => choice_for(q, correct),
                    None => panic!("no question to answer"),
                };
                self.game
                    .answer(choice)
                    .unwrap_or_else(|e| panic!("answer failed: {e}"))
            })
            .collect()
    }

    /// Start, play and complete a sample battle in one go.
    pub fn run_battle(&mut self, battle_id: &str, count: usize, script: &[bool]) -> BattleReport {
        self.start_sample_battle(battle_id, count);
        self.play(script);
        self.complete()
            .unwrap_or_else(|e| panic!("completing battle failed: {e}"))
    }

    pub fn complete(&mut self) -> Result<BattleReport, QuestError> {
        self.game.complete_battle()
    }

    pub fn player(&self) -> &PlayerProgress {
        self.game.player()
    }

    pub fn hearts(&self) -> Option<u32> {
        self.game.battle().map(BattleState::hearts)
    }

    pub fn in_battle(&self) -> bool {
        self.game.battle().is_some()
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Assertion Helpers
// ============================================================================

/// Assert the player's level and XP toward the next level.
#[track_caller]
pub fn assert_level(harness: &TestHarness, level: u32, xp: u64) {
    let player = harness.player();
    assert_eq!(
        (player.level, player.xp),
        (level, xp),
        "Expected level {level} with {xp} XP, got level {} with {} XP",
        player.level,
        player.xp
    );
}

/// Assert the stored stars for one battle.
#[track_caller]
pub fn assert_stars(harness: &TestHarness, battle_id: &str, stars: u32) {
    let actual = harness.player().result(battle_id).map(|r| r.stars);
    assert_eq!(
        actual,
        Some(stars),
        "Expected {stars} stars for '{battle_id}', got {actual:?}"
    );
}

/// Assert that no result was recorded for a battle.
#[track_caller]
pub fn assert_no_result(harness: &TestHarness, battle_id: &str) {
    assert!(
        harness.player().result(battle_id).is_none(),
        "Expected no result for '{battle_id}'"
    );
}

#[track_caller]
pub fn assert_has_achievement(harness: &TestHarness, id: &str) {
    assert!(
        harness.player().has_achievement(id),
        "Expected achievement '{id}' to be unlocked"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_questions() {
        let questions = sample_questions(6);
        assert_eq!(questions.len(), 6);
        assert_eq!(questions[5].id, "q-5");
        assert_eq!(questions[5].correct_answer, 1);
        assert_eq!(questions[0].xp_reward, 10);
    }

    #[test]
    fn test_choice_for() {
        let q = &sample_questions(4)[3];
        assert_eq!(choice_for(q, true), 3);
        assert_eq!(choice_for(q, false), 0);
    }

    #[test]
    fn test_harness_battle_flow() {
        let mut harness = TestHarness::new();
        assert!(!harness.in_battle());

        harness.start_sample_battle("fraction-caverns", 5);
        assert_eq!(harness.hearts(), Some(3));
        harness.play(&[true, false]);
        assert_eq!(harness.hearts(), Some(2));

        harness.play(&[true, true, true]);
        let report = harness.complete().unwrap();
        assert!(report.summary.passed);
        assert!(!harness.in_battle());
        assert_stars(&harness, "fraction-caverns", 2);
        assert_has_achievement(&harness, "first-victory");
    }

    #[test]
    fn test_with_player() {
        let player = PlayerProgress {
            level: 3,
            xp: 20,
            xp_to_next_level: 225,
            ..PlayerProgress::default()
        };
        let harness = TestHarness::with_player(&player);
        assert_level(&harness, 3, 20);
        assert_no_result(&harness, "fraction-caverns");
    }
}
