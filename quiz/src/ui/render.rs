//! Plain-text views for the curriculum browser and the quest screens.

use super::widgets::{progress_bar, stars};
use quiz_core::curriculum::{strands, ExpectationEntry, Strand, Substrand};
use quiz_core::progress::ProgressTracker;
use quiz_core::quest::{chapters, PlayerProgress, ACHIEVEMENTS};
use quiz_core::questions::questions_for_expectation;
use quiz_core::store::KeyValueStore;
use std::io::{self, Write};

const BAR_WIDTH: usize = 20;

// ============================================================================
// Curriculum
// ============================================================================

pub fn strand_list<S: KeyValueStore>(out: &mut impl Write, tracker: &ProgressTracker<S>) -> io::Result<()> {
    writeln!(out, "Grade 7 Mathematics")?;
    writeln!(out)?;
    for strand in strands() {
        write_strand_heading(out, strand, tracker)?;
        for substrand in &strand.substrands {
            write_substrand_line(out, strand, substrand, tracker)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn strand_view<S: KeyValueStore>(
    out: &mut impl Write,
    strand: &Strand,
    tracker: &ProgressTracker<S>,
) -> io::Result<()> {
    write_strand_heading(out, strand, tracker)?;
    writeln!(out, "{}", strand.description)?;
    writeln!(out)?;
    for substrand in &strand.substrands {
        write_substrand_line(out, strand, substrand, tracker)?;
    }
    Ok(())
}

pub fn substrand_view<S: KeyValueStore>(
    out: &mut impl Write,
    strand: &Strand,
    substrand: &Substrand,
    tracker: &ProgressTracker<S>,
) -> io::Result<()> {
    writeln!(out, "{} > {}. {}", strand.name, substrand.id, substrand.name)?;
    writeln!(out)?;
    for expectation in &substrand.expectations {
        let status = match tracker.get(&expectation.code) {
            Some(p) if p.attempted > 0 => {
                format!("{}/{} correct ({}%)", p.correct, p.attempted, p.accuracy())
            }
            _ => "not started".to_string(),
        };
        writeln!(out, "  {:<6} {:<40} {status}", expectation.code, expectation.title)?;
    }
    Ok(())
}

pub fn expectation_view<S: KeyValueStore>(
    out: &mut impl Write,
    entry: ExpectationEntry<'_>,
    tracker: &ProgressTracker<S>,
) -> io::Result<()> {
    let expectation = entry.expectation;
    writeln!(
        out,
        "{} > {}. {}",
        entry.strand.name, entry.substrand.id, entry.substrand.name
    )?;
    writeln!(out)?;
    writeln!(out, "{}  {}", expectation.code, expectation.title)?;
    writeln!(out, "{}", expectation.description)?;
    writeln!(out)?;

    match tracker.get(&expectation.code) {
        Some(p) if p.attempted > 0 => {
            writeln!(out, "Attempted: {}", p.attempted)?;
            writeln!(out, "Correct:   {}", p.correct)?;
            writeln!(
                out,
                "Accuracy:  {}% {}",
                p.accuracy(),
                progress_bar(u64::from(p.correct), u64::from(p.attempted), BAR_WIDTH)
            )?;
            if let Some(at) = p.last_attempted {
                writeln!(out, "Last:      {}", at.format("%Y-%m-%d %H:%M UTC"))?;
            }
        }
        _ => writeln!(out, "Not practiced yet.")?,
    }

    let count = questions_for_expectation(&expectation.code).len();
    if count == 0 {
        writeln!(out, "No practice questions yet.")?;
    } else {
        writeln!(out, "{count} practice question(s): quiz practice {}", expectation.code)?;
    }
    Ok(())
}

pub fn progress_dashboard<S: KeyValueStore>(
    out: &mut impl Write,
    tracker: &ProgressTracker<S>,
) -> io::Result<()> {
    let summary = tracker.summary();
    writeln!(out, "Progress")?;
    writeln!(out)?;
    writeln!(
        out,
        "Expectations practiced: {}/{} {}",
        summary.practiced,
        summary.total_expectations,
        progress_bar(summary.practiced as u64, summary.total_expectations as u64, BAR_WIDTH)
    )?;
    writeln!(out, "Questions answered:     {}", summary.total_attempted)?;
    writeln!(out, "Correct answers:        {}", summary.total_correct)?;
    writeln!(out, "Accuracy:               {}%", summary.accuracy)?;
    writeln!(out)?;

    for strand in strands() {
        if let Some(s) = tracker.strand_summary(&strand.id) {
            writeln!(
                out,
                "  {} {:<28} {} {}/{}",
                strand.id,
                strand.name,
                progress_bar(s.practiced as u64, s.total_expectations as u64, BAR_WIDTH),
                s.practiced,
                s.total_expectations
            )?;
        }
    }
    Ok(())
}

fn write_strand_heading<S: KeyValueStore>(
    out: &mut impl Write,
    strand: &Strand,
    tracker: &ProgressTracker<S>,
) -> io::Result<()> {
    let (practiced, total) = tracker
        .strand_summary(&strand.id)
        .map(|s| (s.practiced, s.total_expectations))
        .unwrap_or((0, 0));
    writeln!(out, "{}. {}  ({practiced}/{total} practiced)", strand.id, strand.name)
}

fn write_substrand_line<S: KeyValueStore>(
    out: &mut impl Write,
    strand: &Strand,
    substrand: &Substrand,
    tracker: &ProgressTracker<S>,
) -> io::Result<()> {
    let practiced = tracker
        .practiced_in_substrand(&strand.id, &substrand.id)
        .unwrap_or(0);
    writeln!(
        out,
        "   {:<4} {:<40} {practiced}/{}",
        substrand.id,
        substrand.name,
        substrand.expectations.len()
    )
}

// ============================================================================
// Quest
// ============================================================================

pub fn player_card(out: &mut impl Write, player: &PlayerProgress) -> io::Result<()> {
    writeln!(out, "Level {}", player.level)?;
    writeln!(
        out,
        "XP     {} {}/{}",
        progress_bar(player.xp, player.xp_to_next_level, BAR_WIDTH),
        player.xp,
        player.xp_to_next_level
    )?;
    writeln!(out, "Gold   {}", player.gold)?;
    writeln!(out, "Stars  {}", player.total_stars())?;
    writeln!(
        out,
        "Answers {}/{} correct ({}%)",
        player.total_correct,
        player.total_answered,
        player.accuracy()
    )?;
    writeln!(
        out,
        "Streak {} (best {})",
        player.current_streak, player.best_streak
    )?;
    writeln!(
        out,
        "Achievements {}/{}",
        player.achievements.len(),
        ACHIEVEMENTS.len()
    )
}

pub fn quest_map(out: &mut impl Write, player: &PlayerProgress) -> io::Result<()> {
    for chapter in chapters() {
        if !player.chapter_unlocked(chapter) {
            writeln!(
                out,
                "[locked] {} (level {})",
                chapter.name, chapter.required_level
            )?;
            writeln!(out)?;
            continue;
        }

        writeln!(
            out,
            "{}  [{}]  {}/{} stars",
            chapter.name,
            chapter.id,
            player.chapter_stars(chapter),
            chapter.max_stars()
        )?;
        for dungeon in &chapter.dungeons {
            let earned = player.result(&dungeon.id).map(|r| r.stars).unwrap_or(0);
            let lock = if player.dungeon_unlocked(chapter, dungeon) {
                String::new()
            } else {
                format!("  (needs {} stars)", dungeon.required_stars)
            };
            writeln!(
                out,
                "  {} {:<20} {:<18} {}{lock}",
                stars(earned, 3),
                dungeon.name,
                dungeon.id,
                dungeon.difficulty
            )?;
        }
        let boss_stars = player.result(&chapter.boss.id).map(|r| r.stars).unwrap_or(0);
        writeln!(out, "  {} Boss: {}", stars(boss_stars, 3), chapter.boss.name)?;
        writeln!(out)?;
    }
    Ok(())
}

pub fn achievement_list(out: &mut impl Write, player: &PlayerProgress) -> io::Result<()> {
    for achievement in ACHIEVEMENTS {
        let mark = if player.has_achievement(achievement.id) {
            "[x]"
        } else {
            "[ ]"
        };
        writeln!(
            out,
            "{mark} {:<20} {}  (+{} XP, +{} gold)",
            achievement.name, achievement.description, achievement.reward_xp, achievement.reward_gold
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::curriculum::{get_expectation, get_strand, get_substrand};
    use quiz_core::store::MemoryStore;

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn tracker() -> ProgressTracker<MemoryStore> {
        let mut tracker = ProgressTracker::load(MemoryStore::new());
        tracker.record_answer("B1.1", true).unwrap();
        tracker.record_answer("B1.1", false).unwrap();
        tracker
    }

    #[test]
    fn test_strand_list_counts_practice() {
        let tracker = tracker();
        let text = render(|out| strand_list(out, &tracker));
        assert!(text.contains("B. Number  (1/17 practiced)"));
        assert!(text.contains("F. Financial Literacy"));
    }

    #[test]
    fn test_substrand_view() {
        let tracker = tracker();
        let strand = get_strand("B").unwrap();
        let (_, substrand) = get_substrand("B", "B1").unwrap();
        let text = render(|out| substrand_view(out, strand, substrand, &tracker));
        assert!(text.contains("1/2 correct (50%)"));
        assert!(text.contains("not started"));
    }

    #[test]
    fn test_expectation_view() {
        let tracker = tracker();
        let entry = get_expectation("B1.1").unwrap();
        let text = render(|out| expectation_view(out, entry, &tracker));
        assert!(text.contains("Attempted: 2"));
        assert!(text.contains("quiz practice B1.1"));
    }

    #[test]
    fn test_progress_dashboard() {
        let tracker = tracker();
        let text = render(|out| progress_dashboard(out, &tracker));
        assert!(text.contains("Expectations practiced: 1/50"));
        assert!(text.contains("Accuracy:               50%"));
    }

    #[test]
    fn test_quest_map_shows_locks() {
        let player = PlayerProgress::default();
        let text = render(|out| quest_map(out, &player));
        assert!(text.contains("The Number Realm  [number]  0/6 stars"));
        assert!(text.contains("(needs 2 stars)"));
        assert!(text.contains("[locked] Algebra Archipelago (level 2)"));
    }

    #[test]
    fn test_player_card_and_achievements() {
        let mut player = PlayerProgress::default();
        player.add_xp(50);
        player.achievements.push("first-victory".to_string());

        let card = render(|out| player_card(out, &player));
        assert!(card.contains("Level 1"));
        assert!(card.contains("50/100"));

        let list = render(|out| achievement_list(out, &player));
        assert!(list.contains("[x] First Victory"));
        assert!(list.contains("[ ] Century"));
    }
}
