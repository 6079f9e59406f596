//! The quest game: player progress, the active battle and persistence.

use super::achievements::{unlock_achievements, Achievement};
use super::battle::{AnswerOutcome, BattleError, BattleState, BattleSummary};
use super::chapters::{get_chapter, get_dungeon, random_quest_questions, QuestQuestion};
use super::player::PlayerProgress;
use crate::store::{load_or_default, save_json, KeyValueStore, StoreError, QUEST_PROGRESS_KEY};
use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum QuestError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("{name} unlocks at level {required_level}")]
    LevelLocked { name: String, required_level: u32 },

    #[error("{name} needs {required_stars} stars in this chapter (you have {stars})")]
    StarsLocked {
        name: String,
        required_stars: u32,
        stars: u32,
    },

    #[error("a battle is already in progress")]
    BattleInProgress,

    #[error("no battle in progress")]
    NoBattle,

    #[error(transparent)]
    Battle(#[from] BattleError),

    #[error("failed to save quest progress: {0}")]
    Store(#[from] StoreError),
}

/// Everything that came out of finishing a battle.
#[derive(Debug)]
pub struct BattleReport {
    pub summary: BattleSummary,
    pub new_achievements: Vec<&'static Achievement>,
}

/// Quest progress for one player, written through to a store after
/// every change.
pub struct QuestGame<S: KeyValueStore> {
    store: S,
    player: PlayerProgress,
    battle: Option<BattleState>,
    rng: StdRng,
}

impl<S: KeyValueStore> QuestGame<S> {
    /// Load the player from the store, or start a new one.
    pub fn load(store: S) -> Self {
        Self::with_rng(store, StdRng::from_entropy())
    }

    /// Like `load`, with a fixed question-shuffling seed.
    pub fn with_seed(store: S, seed: u64) -> Self {
        Self::with_rng(store, StdRng::seed_from_u64(seed))
    }

    /// Load with a caller-supplied shuffle source.
    pub fn with_rng(store: S, rng: StdRng) -> Self {
        let player: PlayerProgress = load_or_default(&store, QUEST_PROGRESS_KEY);
        debug!(level = player.level, xp = player.xp, "quest progress loaded");
        Self {
            store,
            player,
            battle: None,
            rng,
        }
    }

    pub fn player(&self) -> &PlayerProgress {
        &self.player
    }

    pub fn battle(&self) -> Option<&BattleState> {
        self.battle.as_ref()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Start a dungeon battle with random questions from its chapter.
    pub fn start_dungeon(&mut self, chapter_id: &str, dungeon_id: &str) -> Result<&BattleState, QuestError> {
        let (chapter, dungeon) = get_dungeon(chapter_id, dungeon_id)
            .ok_or_else(|| QuestError::NotFound(format!("dungeon {chapter_id}/{dungeon_id}")))?;
        if !self.player.chapter_unlocked(chapter) {
            return Err(QuestError::LevelLocked {
                name: chapter.name.clone(),
                required_level: chapter.required_level,
            });
        }
        let stars = self.player.chapter_stars(chapter);
        if stars < dungeon.required_stars {
            return Err(QuestError::StarsLocked {
                name: dungeon.name.clone(),
                required_stars: dungeon.required_stars,
                stars,
            });
        }
        self.ensure_idle()?;

        let questions = random_quest_questions(chapter.strand, dungeon.question_count, &mut self.rng);
        self.start_with_questions(&dungeon.id, questions)
    }

    /// Start the chapter's boss battle.
    pub fn start_boss(&mut self, chapter_id: &str) -> Result<&BattleState, QuestError> {
        let chapter = get_chapter(chapter_id)
            .ok_or_else(|| QuestError::NotFound(format!("chapter {chapter_id}")))?;
        if !self.player.chapter_unlocked(chapter) {
            return Err(QuestError::LevelLocked {
                name: chapter.name.clone(),
                required_level: chapter.required_level,
            });
        }
        self.ensure_idle()?;

        let questions = random_quest_questions(chapter.strand, chapter.boss.question_count, &mut self.rng);
        self.start_with_questions(&chapter.boss.id, questions)
    }

    /// Start a battle over an explicit question list. No unlock checks.
    pub fn start_with_questions(
        &mut self,
        battle_id: &str,
        questions: Vec<QuestQuestion>,
    ) -> Result<&BattleState, QuestError> {
        self.ensure_idle()?;
        let battle = BattleState::new(battle_id, questions)?;
        info!(battle_id, questions = battle.questions().len(), "battle started");
        Ok(self.battle.insert(battle))
    }

    fn ensure_idle(&self) -> Result<(), QuestError> {
        match &self.battle {
            Some(_) => Err(QuestError::BattleInProgress),
            None => Ok(()),
        }
    }

    /// Answer the current question. Lifetime totals and streaks update
    /// immediately, whether or not the battle is eventually passed.
    pub fn answer(&mut self, choice: usize) -> Result<AnswerOutcome, QuestError> {
        let battle = self.battle.as_mut().ok_or(QuestError::NoBattle)?;
        let outcome = battle.answer(choice)?;
        self.player.record_answer(outcome.correct);
        self.save()?;
        Ok(outcome)
    }

    /// Finish the active battle: commit its rewards if passed, then check
    /// achievements. An unfinished battle counts as a retreat.
    pub fn complete_battle(&mut self) -> Result<BattleReport, QuestError> {
        let battle = self.battle.take().ok_or(QuestError::NoBattle)?;
        let summary = battle.commit(&mut self.player);
        let new_achievements = unlock_achievements(&mut self.player);
        info!(
            battle_id = %summary.battle_id,
            passed = summary.passed,
            stars = summary.stars,
            achievements = new_achievements.len(),
            "battle committed"
        );
        self.save()?;
        Ok(BattleReport {
            summary,
            new_achievements,
        })
    }

    /// Drop all quest progress and any active battle.
    pub fn reset(&mut self) -> Result<(), QuestError> {
        self.battle = None;
        self.player = PlayerProgress::default();
        self.store.remove(QUEST_PROGRESS_KEY)?;
        info!("quest progress reset");
        Ok(())
    }

    fn save(&mut self) -> Result<(), StoreError> {
        save_json(&mut self.store, QUEST_PROGRESS_KEY, &self.player)
    }
}
