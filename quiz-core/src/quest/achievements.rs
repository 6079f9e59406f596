//! One-time achievements checked after every committed battle.

use super::player::PlayerProgress;
use std::fmt;
use tracing::info;

pub struct Achievement {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub reward_xp: u64,
    pub reward_gold: u64,
    condition: fn(&PlayerProgress) -> bool,
}

impl fmt::Debug for Achievement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Achievement")
            .field("id", &self.id)
            .field("reward_xp", &self.reward_xp)
            .field("reward_gold", &self.reward_gold)
            .finish_non_exhaustive()
    }
}

impl Achievement {
    /// Whether the player currently meets the condition.
    pub fn is_met(&self, player: &PlayerProgress) -> bool {
        (self.condition)(player)
    }
}

pub static ACHIEVEMENTS: &[Achievement] = &[
    Achievement {
        id: "first-victory",
        name: "First Victory",
        description: "Pass your first battle.",
        reward_xp: 50,
        reward_gold: 25,
        condition: |p| p.completed_dungeons.values().any(|r| r.completed),
    },
    Achievement {
        id: "perfect-run",
        name: "Flawless",
        description: "Finish a battle without a wrong answer.",
        reward_xp: 100,
        reward_gold: 50,
        condition: |p| p.completed_dungeons.values().any(|r| r.perfect_run),
    },
    Achievement {
        id: "streak-5",
        name: "On a Roll",
        description: "Answer 5 questions in a row correctly.",
        reward_xp: 50,
        reward_gold: 20,
        condition: |p| p.best_streak >= 5,
    },
    Achievement {
        id: "streak-10",
        name: "Unstoppable",
        description: "Answer 10 questions in a row correctly.",
        reward_xp: 100,
        reward_gold: 50,
        condition: |p| p.best_streak >= 10,
    },
    Achievement {
        id: "level-5",
        name: "Seasoned Adventurer",
        description: "Reach level 5.",
        reward_xp: 0,
        reward_gold: 100,
        condition: |p| p.level >= 5,
    },
    Achievement {
        id: "century",
        name: "Century",
        description: "Answer 100 battle questions correctly.",
        reward_xp: 200,
        reward_gold: 100,
        condition: |p| p.total_correct >= 100,
    },
    Achievement {
        id: "star-collector",
        name: "Star Collector",
        description: "Hold 15 stars across all battles.",
        reward_xp: 150,
        reward_gold: 75,
        condition: |p| p.total_stars() >= 15,
    },
];

pub fn get_achievement(id: &str) -> Option<&'static Achievement> {
    ACHIEVEMENTS.iter().find(|a| a.id == id)
}

/// Unlock every achievement the player newly qualifies for and pay out
/// its rewards. Rewards can level the player up, so checking repeats
/// until nothing new unlocks.
pub fn unlock_achievements(player: &mut PlayerProgress) -> Vec<&'static Achievement> {
    let mut unlocked = Vec::new();
    loop {
        let newly: Vec<&'static Achievement> = ACHIEVEMENTS
            .iter()
            .filter(|a| !player.has_achievement(a.id) && a.is_met(player))
            .collect();
        if newly.is_empty() {
            break;
        }
        for achievement in newly {
            player.achievements.push(achievement.id.to_string());
            player.add_xp(achievement.reward_xp);
            player.add_gold(achievement.reward_gold);
            info!(id = achievement.id, "achievement unlocked");
            unlocked.push(achievement);
        }
    }
    unlocked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        for (i, a) in ACHIEVEMENTS.iter().enumerate() {
            assert!(ACHIEVEMENTS[i + 1..].iter().all(|b| b.id != a.id));
        }
        assert!(get_achievement("century").is_some());
        assert!(get_achievement("nope").is_none());
    }

    #[test]
    fn test_fresh_player_has_nothing_to_unlock() {
        let mut player = PlayerProgress::default();
        assert!(unlock_achievements(&mut player).is_empty());
        assert_eq!(player, PlayerProgress::default());
    }

    #[test]
    fn test_first_victory_pays_out_once() {
        let mut player = PlayerProgress::default();
        player.record_result("fraction-caverns", 1, 8, false);

        let unlocked = unlock_achievements(&mut player);
        assert_eq!(unlocked.len(), 1);
        assert_eq!(unlocked[0].id, "first-victory");
        assert_eq!(player.xp, 50);
        assert_eq!(player.gold, 25);

        assert!(unlock_achievements(&mut player).is_empty());
        assert_eq!(player.gold, 25);
    }

    #[test]
    fn test_perfect_run_and_streak() {
        let mut player = PlayerProgress::default();
        for _ in 0..5 {
            player.record_answer(true);
        }
        player.record_result("number-boss", 3, 5, true);

        let ids: Vec<_> = unlock_achievements(&mut player).iter().map(|a| a.id).collect();
        assert_eq!(ids, vec!["first-victory", "perfect-run", "streak-5"]);
        // 50 + 100 + 50 XP crosses level 2
        assert_eq!(player.level, 2);
        assert_eq!(player.xp, 100);
        assert_eq!(player.gold, 95);
    }

    #[test]
    fn test_reward_level_up_can_unlock_more() {
        let mut player = PlayerProgress {
            level: 4,
            xp: 300,
            xp_to_next_level: 337,
            best_streak: 5,
            ..PlayerProgress::default()
        };

        let ids: Vec<_> = unlock_achievements(&mut player).iter().map(|a| a.id).collect();
        assert_eq!(ids, vec!["streak-5", "level-5"]);
        assert_eq!(player.level, 5);
        assert_eq!(player.gold, 120);
    }
}
