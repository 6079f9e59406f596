//! Line-oriented interactive loops for practice and battles.
//!
//! One answer per line. Lines starting with `#` are commands:
//! - `#quit` leaves (a battle in progress counts as a retreat)
//! - `#hint` shows the practice hint, if any
//! - `#help` lists the commands
//!
//! End of input behaves like `#quit`.

use crate::ui::widgets::{hearts, numbered, stars};
use anyhow::{Context, Result};
use quiz_core::practice::PracticeSession;
use quiz_core::progress::ProgressTracker;
use quiz_core::quest::{BattleReport, QuestGame, MAX_HEARTS};
use quiz_core::questions::{Question, QuestionKind};
use quiz_core::store::KeyValueStore;
use std::io::{BufRead, Write};

enum Input {
    Answer(String),
    Command(String),
    Eof,
}

fn read_input(lines: &mut impl Iterator<Item = std::io::Result<String>>) -> Result<Input> {
    for line in lines {
        let line = line.context("Failed to read input")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(command) = line.strip_prefix('#') {
            return Ok(Input::Command(command.trim().to_lowercase()));
        }
        return Ok(Input::Answer(line.to_string()));
    }
    Ok(Input::Eof)
}

// ============================================================================
// Practice
// ============================================================================

/// Map a typed answer onto a practice question. For questions with choices
/// an option number selects that choice.
fn practice_answer(question: &Question, input: &str) -> String {
    if question.kind != QuestionKind::NumericInput {
        if let Ok(n) = input.parse::<usize>() {
            if let Some(choice) = n.checked_sub(1).and_then(|i| question.choices.get(i)) {
                return choice.clone();
            }
        }
    }
    input.to_string()
}

pub fn run_practice<S, R, W>(
    session: &mut PracticeSession,
    tracker: &mut ProgressTracker<S>,
    input: R,
    out: &mut W,
) -> Result<()>
where
    S: KeyValueStore,
    R: BufRead,
    W: Write,
{
    let mut lines = input.lines();
    let entry = session.entry();
    writeln!(out, "=== Practice {}: {} ===", session.code(), entry.expectation.title)?;
    writeln!(out, "Answer with the option number or the answer itself. #hint, #quit")?;

    loop {
        let Some(question) = session.question() else {
            write_practice_summary(session, out)?;
            writeln!(out, "Type #retry to practice again or #quit to leave.")?;
            match read_input(&mut lines)? {
                Input::Command(c) if c == "retry" => {
                    session.restart();
                    continue;
                }
                Input::Command(c) if c == "quit" || c == "exit" => break,
                Input::Eof => break,
                _ => continue,
            }
        };

        writeln!(out)?;
        writeln!(
            out,
            "[Q {}/{}] {}",
            session.current_index() + 1,
            session.questions().len(),
            question.prompt
        )?;
        if !question.choices.is_empty() {
            writeln!(out, "{}", numbered(&question.choices))?;
        }
        out.flush().ok();

        let answer = match read_input(&mut lines)? {
            Input::Eof => break,
            Input::Command(c) => match c.as_str() {
                "quit" | "exit" => break,
                "hint" => {
                    match &question.hint {
                        Some(hint) => writeln!(out, "[HINT] {hint}")?,
                        None => writeln!(out, "[HINT] No hint for this question.")?,
                    }
                    continue;
                }
                "help" => {
                    writeln!(out, "[HELP] #hint shows a hint, #quit leaves")?;
                    continue;
                }
                _ => {
                    writeln!(out, "[ERROR] Unknown command. Type #help for help.")?;
                    continue;
                }
            },
            Input::Answer(a) => practice_answer(question, &a),
        };

        let feedback = session
            .check(tracker, &answer)
            .context("Failed to record answer")?;
        if feedback.correct {
            writeln!(out, "[CORRECT]")?;
        } else {
            writeln!(out, "[WRONG] The answer is {}", feedback.correct_answer)?;
        }
        if !feedback.explanation.is_empty() {
            writeln!(out, "{}", feedback.explanation)?;
        }
        session.next_question()?;
    }

    Ok(())
}

fn write_practice_summary(session: &PracticeSession, out: &mut impl Write) -> Result<()> {
    let results = session.results();
    writeln!(out)?;
    writeln!(
        out,
        "[DONE] {}/{} {}",
        session.correct_count(),
        results.len(),
        session.verdict()
    )?;
    for (i, correct) in results.iter().enumerate() {
        let label = if *correct { "Correct" } else { "Incorrect" };
        writeln!(out, "  Q{}: {label}", i + 1)?;
    }
    Ok(())
}

// ============================================================================
// Battle
// ============================================================================

/// Play the active battle to the end and commit it.
pub fn run_battle<S, R, W>(game: &mut QuestGame<S>, input: R, out: &mut W) -> Result<BattleReport>
where
    S: KeyValueStore,
    R: BufRead,
    W: Write,
{
    let mut lines = input.lines();
    if let Some(battle) = game.battle() {
        writeln!(
            out,
            "=== {} ({} questions) ===",
            battle.battle_id(),
            battle.questions().len()
        )?;
        writeln!(out, "Answer with the option number. #quit retreats.")?;
    }

    loop {
        let Some(battle) = game.battle() else { break };
        let Some(question) = battle.current_question() else { break };
        let option_count = question.options.len();

        writeln!(out)?;
        writeln!(
            out,
            "[Q {}/{}] {}  {}",
            battle.current_index() + 1,
            battle.questions().len(),
            hearts(battle.hearts(), MAX_HEARTS),
            question.prompt
        )?;
        writeln!(out, "{}", numbered(&question.options))?;
        out.flush().ok();

        let choice = match read_input(&mut lines)? {
            Input::Eof => break,
            Input::Command(c) => match c.as_str() {
                "quit" | "exit" | "retreat" => break,
                "help" => {
                    writeln!(out, "[HELP] Type 1-{option_count} to answer, #quit to retreat")?;
                    continue;
                }
                _ => {
                    writeln!(out, "[ERROR] Unknown command. Type #help for help.")?;
                    continue;
                }
            },
            Input::Answer(a) => match a.parse::<usize>() {
                Ok(n) if (1..=option_count).contains(&n) => n - 1,
                _ => {
                    writeln!(out, "[ERROR] Enter a number from 1 to {option_count}.")?;
                    continue;
                }
            },
        };

        let outcome = game.answer(choice).context("Failed to record answer")?;
        if outcome.correct {
            writeln!(
                out,
                "[HIT] +{} XP, +{} gold",
                outcome.xp_earned, outcome.gold_earned
            )?;
        } else {
            writeln!(
                out,
                "[MISS] The answer was {}. {}",
                outcome.correct_answer + 1,
                hearts(outcome.hearts, MAX_HEARTS)
            )?;
        }
        if let Some(explanation) = &outcome.explanation {
            writeln!(out, "{explanation}")?;
        }
        if outcome.is_complete() {
            break;
        }
    }

    let report = game.complete_battle().context("Failed to save battle result")?;
    write_battle_report(&report, out)?;
    Ok(report)
}

fn write_battle_report(report: &BattleReport, out: &mut impl Write) -> Result<()> {
    let summary = &report.summary;
    writeln!(out)?;
    if summary.passed {
        writeln!(out, "[VICTORY] {}", stars(summary.stars, 3))?;
    } else {
        writeln!(out, "[DEFEAT]")?;
    }
    writeln!(
        out,
        "{}/{} correct",
        summary.correct_answers, summary.question_count
    )?;
    if summary.passed {
        writeln!(
            out,
            "Rewards: +{} XP, +{} gold",
            summary.xp_awarded, summary.gold_awarded
        )?;
    }
    if summary.levels_gained > 0 {
        writeln!(out, "[LEVEL UP] +{}", summary.levels_gained)?;
    }
    for achievement in &report.new_achievements {
        writeln!(
            out,
            "[ACHIEVEMENT] {}: {}",
            achievement.name, achievement.description
        )?;
    }
    Ok(())
}

/// Ask a yes/no question; anything but `y`/`yes` is no.
pub fn confirm<R: BufRead, W: Write>(prompt: &str, input: R, out: &mut W) -> Result<bool> {
    write!(out, "{prompt} [y/N] ")?;
    out.flush().ok();
    let mut lines = input.lines();
    Ok(match read_input(&mut lines)? {
        Input::Answer(a) => matches!(a.to_lowercase().as_str(), "y" | "yes"),
        _ => false,
    })
}
