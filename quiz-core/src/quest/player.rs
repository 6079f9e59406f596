//! The quest player record: level, XP, gold, streaks and dungeon results.

use super::chapters::{Chapter, Dungeon};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::info;

/// XP needed to go from `level` to `level + 1`.
///
/// `floor(100 × 1.5^(level - 1))`: 100, 150, 225, 337, 506, ...
pub fn xp_for_level(level: u32) -> u64 {
    let exponent = i32::try_from(level.max(1) - 1).unwrap_or(i32::MAX);
    (100.0 * 1.5f64.powi(exponent)).floor() as u64
}

/// Best result so far for one dungeon or boss.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DungeonResult {
    pub dungeon_id: String,
    pub stars: u32,
    pub best_score: u32,
    pub attempts: u32,
    pub completed: bool,
    pub perfect_run: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerProgress {
    pub level: u32,
    /// XP toward the next level, always below `xp_to_next_level`.
    pub xp: u64,
    pub xp_to_next_level: u64,
    pub gold: u64,
    pub total_correct: u32,
    pub total_answered: u32,
    pub completed_dungeons: BTreeMap<String, DungeonResult>,
    pub achievements: Vec<String>,
    pub current_streak: u32,
    pub best_streak: u32,
}

impl Default for PlayerProgress {
    fn default() -> Self {
        Self {
            level: 1,
            xp: 0,
            xp_to_next_level: xp_for_level(1),
            gold: 0,
            total_correct: 0,
            total_answered: 0,
            completed_dungeons: BTreeMap::new(),
            achievements: Vec::new(),
            current_streak: 0,
            best_streak: 0,
        }
    }
}

impl PlayerProgress {
    /// Add XP, carrying over into as many levels as it covers.
    /// Returns the number of levels gained.
    pub fn add_xp(&mut self, amount: u64) -> u32 {
        if self.xp_to_next_level == 0 {
            self.xp_to_next_level = xp_for_level(self.level);
        }
        self.xp = self.xp.saturating_add(amount);

        let mut gained = 0;
        while self.xp >= self.xp_to_next_level {
            self.xp -= self.xp_to_next_level;
            self.level += 1;
            self.xp_to_next_level = xp_for_level(self.level);
            gained += 1;
        }
        if gained > 0 {
            info!(level = self.level, gained, "level up");
        }
        gained
    }

    pub fn add_gold(&mut self, amount: u64) {
        self.gold = self.gold.saturating_add(amount);
    }

    /// Count one battle answer toward the lifetime totals and streaks.
    pub fn record_answer(&mut self, correct: bool) {
        self.total_answered += 1;
        if correct {
            self.total_correct += 1;
            self.current_streak += 1;
            self.best_streak = self.best_streak.max(self.current_streak);
        } else {
            self.current_streak = 0;
        }
    }

    /// Merge a passed attempt into the stored best result.
    pub fn record_result(
        &mut self,
        dungeon_id: &str,
        stars: u32,
        score: u32,
        perfect: bool,
    ) -> &DungeonResult {
        self.completed_dungeons
            .entry(dungeon_id.to_string())
            .and_modify(|r| {
                r.stars = r.stars.max(stars);
                r.best_score = r.best_score.max(score);
                r.attempts += 1;
                r.completed = true;
                r.perfect_run |= perfect;
            })
            .or_insert_with(|| DungeonResult {
                dungeon_id: dungeon_id.to_string(),
                stars,
                best_score: score,
                attempts: 1,
                completed: true,
                perfect_run: perfect,
            })
    }

    pub fn result(&self, dungeon_id: &str) -> Option<&DungeonResult> {
        self.completed_dungeons.get(dungeon_id)
    }

    pub fn total_stars(&self) -> u32 {
        self.completed_dungeons.values().map(|r| r.stars).sum()
    }

    /// Stars earned in the chapter's dungeons. Boss results do not count.
    pub fn chapter_stars(&self, chapter: &Chapter) -> u32 {
        chapter
            .dungeons
            .iter()
            .filter_map(|d| self.result(&d.id))
            .map(|r| r.stars)
            .sum()
    }

    pub fn chapter_unlocked(&self, chapter: &Chapter) -> bool {
        self.level >= chapter.required_level
    }

    pub fn dungeon_unlocked(&self, chapter: &Chapter, dungeon: &Dungeon) -> bool {
        self.chapter_unlocked(chapter) && self.chapter_stars(chapter) >= dungeon.required_stars
    }

    pub fn has_achievement(&self, id: &str) -> bool {
        self.achievements.iter().any(|a| a == id)
    }

    /// Lifetime battle accuracy as a rounded percentage.
    pub fn accuracy(&self) -> u32 {
        crate::progress::accuracy_percent(self.total_correct, self.total_answered)
    }
}
