//! A single battle: a run of quest questions against a pool of hearts.
//!
//! A battle is in progress until every question is answered or the hearts
//! run out. Rewards accumulate per correct answer but only reach the player
//! when a passed battle is committed.

use super::chapters::QuestQuestion;
use super::player::PlayerProgress;
use chrono::{DateTime, Duration, Utc};
use thiserror::Error;
use tracing::{debug, info};

/// Hearts at the start of every battle.
pub const MAX_HEARTS: u32 = 3;

/// Correct answers needed to pass: `ceil(0.8 × question_count)`.
pub fn pass_threshold(question_count: usize) -> usize {
    (question_count * 4).div_ceil(5)
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BattleError {
    #[error("a battle needs at least one question")]
    NoQuestions,

    #[error("the battle is already over")]
    AlreadyComplete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattlePhase {
    InProgress,
    Complete { passed: bool },
}

/// What happened when one answer was submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub correct_answer: usize,
    pub explanation: Option<String>,
    /// XP and gold banked by this answer (zero when wrong).
    pub xp_earned: u64,
    pub gold_earned: u64,
    pub hearts: u32,
    pub phase: BattlePhase,
}

impl AnswerOutcome {
    pub fn is_complete(&self) -> bool {
        matches!(self.phase, BattlePhase::Complete { .. })
    }
}

/// Result of committing a finished battle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattleSummary {
    pub battle_id: String,
    pub passed: bool,
    pub stars: u32,
    pub correct_answers: u32,
    pub wrong_answers: u32,
    pub question_count: usize,
    /// Rewards actually added to the player; zero when not passed.
    pub xp_awarded: u64,
    pub gold_awarded: u64,
    pub levels_gained: u32,
    pub duration: Duration,
}

#[derive(Debug, Clone)]
pub struct BattleState {
    battle_id: String,
    questions: Vec<QuestQuestion>,
    current: usize,
    hearts: u32,
    correct_answers: u32,
    wrong_answers: u32,
    xp_earned: u64,
    gold_earned: u64,
    answers: Vec<Option<usize>>,
    started_at: DateTime<Utc>,
    phase: BattlePhase,
}

impl BattleState {
    pub fn new(battle_id: impl Into<String>, questions: Vec<QuestQuestion>) -> Result<Self, BattleError> {
        if questions.is_empty() {
            return Err(BattleError::NoQuestions);
        }
        Ok(Self {
            battle_id: battle_id.into(),
            answers: vec![None; questions.len()],
            questions,
            current: 0,
            hearts: MAX_HEARTS,
            correct_answers: 0,
            wrong_answers: 0,
            xp_earned: 0,
            gold_earned: 0,
            started_at: Utc::now(),
            phase: BattlePhase::InProgress,
        })
    }

    pub fn battle_id(&self) -> &str {
        &self.battle_id
    }

    pub fn questions(&self) -> &[QuestQuestion] {
        &self.questions
    }

    /// The question awaiting an answer, or `None` once complete.
    pub fn current_question(&self) -> Option<&QuestQuestion> {
        match self.phase {
            BattlePhase::InProgress => self.questions.get(self.current),
            BattlePhase::Complete { .. } => None,
        }
    }

    /// Zero-based index of the current question.
    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn hearts(&self) -> u32 {
        self.hearts
    }

    pub fn correct_answers(&self) -> u32 {
        self.correct_answers
    }

    pub fn wrong_answers(&self) -> u32 {
        self.wrong_answers
    }

    pub fn xp_earned(&self) -> u64 {
        self.xp_earned
    }

    pub fn gold_earned(&self) -> u64 {
        self.gold_earned
    }

    /// Chosen option per question; `None` for questions never reached.
    pub fn answers(&self) -> &[Option<usize>] {
        &self.answers
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.phase, BattlePhase::Complete { .. })
    }

    pub fn is_passed(&self) -> bool {
        matches!(self.phase, BattlePhase::Complete { passed: true })
    }

    /// Stars for the run: 0 if not passed, 3 with no wrong answers,
    /// 2 with exactly one, otherwise 1.
    pub fn stars(&self) -> u32 {
        if !self.is_passed() {
            return 0;
        }
        match self.wrong_answers {
            0 => 3,
            1 => 2,
            _ => 1,
        }
    }

    /// Answer the current question with option `choice`.
    ///
    /// A choice outside the options counts as wrong.
    pub fn answer(&mut self, choice: usize) -> Result<AnswerOutcome, BattleError> {
        let question = match (self.phase, self.questions.get(self.current)) {
            (BattlePhase::InProgress, Some(q)) => q,
            _ => return Err(BattleError::AlreadyComplete),
        };

        let correct = choice == question.correct_answer;
        let correct_answer = question.correct_answer;
        let explanation = question.explanation.clone();
        let (xp, gold) = if correct {
            (question.xp_reward, question.gold_reward)
        } else {
            (0, 0)
        };

        self.answers[self.current] = Some(choice);
        if correct {
            self.correct_answers += 1;
            self.xp_earned += xp;
            self.gold_earned += gold;
        } else {
            self.wrong_answers += 1;
            self.hearts = self.hearts.saturating_sub(1);
        }

        let exhausted = self.current + 1 >= self.questions.len();
        if exhausted || self.hearts == 0 {
            // Running out of hearts with questions left is always a loss.
            let passed = (exhausted || self.hearts > 0)
                && self.correct_answers as usize >= pass_threshold(self.questions.len());
            self.phase = BattlePhase::Complete { passed };
            info!(
                battle_id = %self.battle_id,
                passed,
                correct = self.correct_answers,
                wrong = self.wrong_answers,
                "battle complete"
            );
        } else {
            self.current += 1;
        }

        Ok(AnswerOutcome {
            correct,
            correct_answer,
            explanation,
            xp_earned: xp,
            gold_earned: gold,
            hearts: self.hearts,
            phase: self.phase,
        })
    }

    /// End an in-progress battle as a loss.
    pub fn retreat(&mut self) {
        if !self.is_complete() {
            debug!(battle_id = %self.battle_id, "retreated");
            self.phase = BattlePhase::Complete { passed: false };
        }
    }

    /// Apply the battle to the player and consume it.
    ///
    /// An unfinished battle is treated as a retreat. Only a passed battle
    /// grants its XP and gold and updates the dungeon result.
    pub fn commit(mut self, player: &mut PlayerProgress) -> BattleSummary {
        self.retreat();
        let passed = self.is_passed();
        let stars = self.stars();

        let (xp_awarded, gold_awarded, levels_gained) = if passed {
            let levels = player.add_xp(self.xp_earned);
            player.add_gold(self.gold_earned);
            player.record_result(
                &self.battle_id,
                stars,
                self.correct_answers,
                self.wrong_answers == 0,
            );
            (self.xp_earned, self.gold_earned, levels)
        } else {
            (0, 0, 0)
        };

        BattleSummary {
            passed,
            stars,
            correct_answers: self.correct_answers,
            wrong_answers: self.wrong_answers,
            question_count: self.questions.len(),
            xp_awarded,
            gold_awarded,
            levels_gained,
            duration: Utc::now() - self.started_at,
            battle_id: self.battle_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{answer_script, sample_questions};

    #[test]
    fn test_pass_threshold() {
        assert_eq!(pass_threshold(1), 1);
        assert_eq!(pass_threshold(3), 3);
        assert_eq!(pass_threshold(5), 4);
        assert_eq!(pass_threshold(10), 8);
        assert_eq!(pass_threshold(12), 10);
    }

    #[test]
    fn test_empty_battle_is_rejected() {
        let err = BattleState::new("empty", Vec::new()).unwrap_err();
        assert_eq!(err, BattleError::NoQuestions);
    }

    #[test]
    fn test_new_battle() {
        let battle = BattleState::new("fraction-caverns", sample_questions(10)).unwrap();
        assert_eq!(battle.hearts(), MAX_HEARTS);
        assert_eq!(battle.current_index(), 0);
        assert_eq!(battle.phase(), BattlePhase::InProgress);
        assert!(battle.current_question().is_some());
        assert_eq!(battle.stars(), 0);
    }

    #[test]
    fn test_correct_answer_banks_rewards() {
        let questions = sample_questions(3);
        let right = questions[0].correct_answer;
        let mut battle = BattleState::new("b", questions).unwrap();

        let outcome = battle.answer(right).unwrap();
        assert!(outcome.correct);
        assert_eq!(outcome.xp_earned, 10);
        assert_eq!(outcome.gold_earned, 5);
        assert_eq!(outcome.hearts, 3);
        assert!(!outcome.is_complete());
        assert_eq!(battle.current_index(), 1);
        assert_eq!(battle.xp_earned(), 10);
    }

    #[test]
    fn test_wrong_answer_costs_a_heart() {
        let questions = sample_questions(3);
        let wrong = (questions[0].correct_answer + 1) % 4;
        let mut battle = BattleState::new("b", questions).unwrap();

        let outcome = battle.answer(wrong).unwrap();
        assert!(!outcome.correct);
        assert_eq!(outcome.xp_earned, 0);
        assert_eq!(outcome.hearts, 2);
        assert_eq!(battle.answers()[0], Some(wrong));
    }

    #[test]
    fn test_out_of_range_choice_is_wrong() {
        let mut battle = BattleState::new("b", sample_questions(2)).unwrap();
        let outcome = battle.answer(99).unwrap();
        assert!(!outcome.correct);
        assert_eq!(battle.wrong_answers(), 1);
    }

    #[test]
    fn test_perfect_run_gets_three_stars() {
        let mut battle = BattleState::new("b", sample_questions(5)).unwrap();
        answer_script(&mut battle, &[true; 5]);
        assert!(battle.is_passed());
        assert_eq!(battle.stars(), 3);
    }

    #[test]
    fn test_one_mistake_gets_two_stars() {
        let mut battle = BattleState::new("b", sample_questions(10)).unwrap();
        let mut script = [true; 10];
        script[4] = false;
        answer_script(&mut battle, &script);
        assert!(battle.is_passed());
        assert_eq!(battle.stars(), 2);
    }

    #[test]
    fn test_two_mistakes_get_one_star() {
        let mut battle = BattleState::new("b", sample_questions(10)).unwrap();
        let mut script = [true; 10];
        script[0] = false;
        script[9] = false;
        answer_script(&mut battle, &script);
        assert!(battle.is_passed());
        assert_eq!(battle.stars(), 1);
    }

    #[test]
    fn test_below_threshold_fails() {
        // 5 questions need 4 correct; 3 of 5 with hearts left still fails
        let mut battle = BattleState::new("b", sample_questions(5)).unwrap();
        answer_script(&mut battle, &[true, false, true, false, true]);
        assert!(battle.is_complete());
        assert!(!battle.is_passed());
        assert_eq!(battle.stars(), 0);
    }

    #[test]
    fn test_hearts_out_ends_early() {
        let mut battle = BattleState::new("b", sample_questions(10)).unwrap();
        answer_script(&mut battle, &[false, true, false, false]);
        assert!(battle.is_complete());
        assert!(!battle.is_passed());
        assert_eq!(battle.hearts(), 0);
        assert_eq!(battle.answers()[4], None);
        assert!(battle.current_question().is_none());
    }

    #[test]
    fn test_hearts_out_early_never_passes() {
        // 20 questions need 16 correct; losing the last heart on question 19 is still a loss
        let mut battle = BattleState::new("b", sample_questions(20)).unwrap();
        let mut script = vec![true; 19];
        script[0] = false;
        script[1] = false;
        script[18] = false;
        answer_script(&mut battle, &script);
        assert_eq!(battle.correct_answers(), 16);
        assert!(battle.is_complete());
        assert!(!battle.is_passed());
    }

    #[test]
    fn test_answer_after_complete_errors() {
        let mut battle = BattleState::new("b", sample_questions(1)).unwrap();
        answer_script(&mut battle, &[true]);
        assert_eq!(battle.answer(0).unwrap_err(), BattleError::AlreadyComplete);
    }

    #[test]
    fn test_commit_passed_battle() {
        let mut battle = BattleState::new("fraction-caverns", sample_questions(10)).unwrap();
        let mut script = [true; 10];
        script[3] = false;
        answer_script(&mut battle, &script);

        let mut player = PlayerProgress::default();
        let summary = battle.commit(&mut player);
        assert!(summary.passed);
        assert_eq!(summary.stars, 2);
        assert_eq!(summary.xp_awarded, 90);
        assert_eq!(summary.gold_awarded, 45);
        assert_eq!(player.xp, 90);
        assert_eq!(player.gold, 45);

        let result = player.result("fraction-caverns").unwrap();
        assert_eq!(result.stars, 2);
        assert_eq!(result.best_score, 9);
        assert_eq!(result.attempts, 1);
        assert!(!result.perfect_run);
    }

    #[test]
    fn test_commit_failed_battle_awards_nothing() {
        let mut battle = BattleState::new("b", sample_questions(10)).unwrap();
        answer_script(&mut battle, &[true, false, false, false]);

        let mut player = PlayerProgress::default();
        let summary = battle.commit(&mut player);
        assert!(!summary.passed);
        assert_eq!(summary.xp_awarded, 0);
        assert_eq!(player, PlayerProgress::default());
    }

    #[test]
    fn test_commit_unfinished_battle_is_retreat() {
        let mut battle = BattleState::new("b", sample_questions(5)).unwrap();
        answer_script(&mut battle, &[true, true]);

        let mut player = PlayerProgress::default();
        let summary = battle.commit(&mut player);
        assert!(!summary.passed);
        assert_eq!(summary.stars, 0);
        assert!(player.result("b").is_none());
    }
}
