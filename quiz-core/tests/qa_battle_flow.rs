//! QA tests for quest battles, from the first dungeon through unlocking
//! the rest of the map.
//!
//! Run with: `cargo test -p quiz-core --test qa_battle_flow`

use quiz_core::quest::{get_chapter, pass_threshold, xp_for_level, PlayerProgress, QuestError};
use quiz_core::testing::{
    assert_has_achievement, assert_level, assert_no_result, assert_stars, TestHarness,
};

// =============================================================================
// Scoring
// =============================================================================

#[test]
fn test_nine_of_ten_passes_with_two_stars() {
    let mut harness = TestHarness::new();
    let mut script = [true; 10];
    script[6] = false;

    let report = harness.run_battle("fraction-caverns", 10, &script);

    assert_eq!(pass_threshold(10), 8);
    assert!(report.summary.passed);
    assert_eq!(report.summary.stars, 2);
    assert_eq!(report.summary.correct_answers, 9);
    // Nine easy answers at 10 XP / 5 gold each
    assert_eq!(report.summary.xp_awarded, 90);
    assert_eq!(report.summary.gold_awarded, 45);
    assert_stars(&harness, "fraction-caverns", 2);
}

#[test]
fn test_running_out_of_hearts_loses_the_battle() {
    let mut harness = TestHarness::new();
    harness.start_sample_battle("fraction-caverns", 10);

    let outcomes = harness.play(&[false, true, false, true, false]);
    let last = outcomes.last().unwrap();
    assert_eq!(last.hearts, 0);
    assert!(last.is_complete());

    let report = harness.complete().unwrap();
    assert!(!report.summary.passed);
    assert_eq!(report.summary.stars, 0);
    assert_eq!(report.summary.xp_awarded, 0);
    assert_no_result(&harness, "fraction-caverns");

    // Answers still count toward lifetime totals
    assert_eq!(harness.player().total_answered, 5);
    assert_eq!(harness.player().total_correct, 2);
}

#[test]
fn test_replays_keep_best_result() {
    let mut harness = TestHarness::new();
    harness.run_battle("fraction-caverns", 5, &[true; 5]);

    let mut script = [true; 5];
    script[2] = false;
    harness.run_battle("fraction-caverns", 5, &script);

    let result = harness.player().result("fraction-caverns").unwrap();
    assert_eq!(result.stars, 3);
    assert_eq!(result.best_score, 5);
    assert_eq!(result.attempts, 2);
    assert!(result.perfect_run);
}

#[test]
fn test_retreat_commits_nothing() {
    let mut harness = TestHarness::new();
    harness.start_sample_battle("fraction-caverns", 5);
    harness.play(&[true, true]);

    let report = harness.complete().unwrap();
    assert!(!report.summary.passed);
    assert!(report.new_achievements.is_empty());
    assert_level(&harness, 1, 0);
    assert_eq!(harness.player().gold, 0);
}

// =============================================================================
// Progression
// =============================================================================

#[test]
fn test_stars_unlock_the_second_dungeon() {
    let mut harness = TestHarness::new();
    assert!(matches!(
        harness.game.start_dungeon("number", "tower-of-powers"),
        Err(QuestError::StarsLocked { .. })
    ));

    // One wrong answer is worth exactly the two stars the tower needs
    let mut script = [true; 5];
    script[0] = false;
    harness.run_battle("fraction-caverns", 5, &script);

    let battle = harness.game.start_dungeon("number", "tower-of-powers").unwrap();
    assert_eq!(battle.questions().len(), 10);
}

#[test]
fn test_levels_unlock_chapters() {
    let algebra = get_chapter("algebra").unwrap();
    let mut harness = TestHarness::new();
    assert!(matches!(
        harness.game.start_boss("algebra"),
        Err(QuestError::LevelLocked { required_level: 2, .. })
    ));

    // A perfect run plus its achievements is worth well over 100 XP
    harness.run_battle("fraction-caverns", 5, &[true; 5]);
    assert!(harness.player().level >= algebra.required_level);

    let battle = harness.game.start_boss("algebra").unwrap();
    assert_eq!(battle.battle_id(), "algebra-boss");
    assert_eq!(battle.questions().len(), 5);
}

#[test]
fn test_streak_achievements_span_battles() {
    let mut harness = TestHarness::new();
    harness.run_battle("b1", 5, &[true; 5]);
    harness.run_battle("b2", 5, &[true; 5]);

    assert_eq!(harness.player().best_streak, 10);
    assert_has_achievement(&harness, "streak-5");
    assert_has_achievement(&harness, "streak-10");
}

#[test]
fn test_achievements_unlock_once() {
    let mut harness = TestHarness::new();
    let first = harness.run_battle("b1", 5, &[true; 5]);
    let second = harness.run_battle("b2", 5, &[true; 5]);

    let first_ids: Vec<_> = first.new_achievements.iter().map(|a| a.id).collect();
    let second_ids: Vec<_> = second.new_achievements.iter().map(|a| a.id).collect();
    assert!(first_ids.contains(&"first-victory"));
    assert!(!second_ids.contains(&"first-victory"));
    assert_eq!(second_ids, vec!["streak-10"]);
}

#[test]
fn test_high_level_player_levels_with_curve() {
    let player = PlayerProgress {
        level: 4,
        xp: 330,
        xp_to_next_level: xp_for_level(4),
        ..PlayerProgress::default()
    };
    let mut harness = TestHarness::with_player(&player);

    // 330 + 40 XP crosses the 337 needed for level 5
    let mut script = [true; 5];
    script[4] = false;
    let report = harness.run_battle("b", 5, &script);
    assert_eq!(report.summary.xp_awarded, 40);
    assert!(report.summary.levels_gained >= 1);
    assert_has_achievement(&harness, "level-5");
    assert_eq!(harness.player().level, 5);
}
