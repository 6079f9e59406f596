//! Quest mode: chapters of dungeons and bosses, fought with hearts, paid in
//! XP and gold.

pub mod achievements;
pub mod battle;
pub mod chapters;
pub mod game;
pub mod player;

pub use achievements::{get_achievement, unlock_achievements, Achievement, ACHIEVEMENTS};
pub use battle::{
    pass_threshold, AnswerOutcome, BattleError, BattlePhase, BattleState, BattleSummary, MAX_HEARTS,
};
pub use chapters::{
    boss_battle_id, chapters, get_chapter, get_dungeon, quest_questions_for, random_quest_questions,
    Boss, Chapter, Difficulty, Dungeon, QuestQuestion, QuestStrand,
};
pub use game::{BattleReport, QuestError, QuestGame};
pub use player::{xp_for_level, DungeonResult, PlayerProgress};
