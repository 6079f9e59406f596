//! Ontario Grade 7 math quiz.
//!
//! Browse the curriculum, practice expectations and play the math quest
//! from the terminal. Progress is saved as JSON under the data directory.
//!
//! ```bash
//! quiz strands
//! quiz practice B1.1
//! quiz quest battle number --dungeon fraction-caverns
//! ```

mod cli;
mod headless;
mod ui;

use anyhow::{bail, Context, Result};
use clap::Parser;
use quiz_core::curriculum::{get_expectation, get_strand, get_substrand};
use quiz_core::practice::PracticeSession;
use quiz_core::progress::ProgressTracker;
use quiz_core::quest::{get_chapter, QuestGame};
use quiz_core::store::FileStore;
use quiz_core::QuizConfig;
use std::io::{self, Write};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command, QuestCommand};

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let config = QuizConfig::resolve(cli.data_dir.clone(), cli.seed)
        .context("Failed to resolve configuration")?;
    debug!(data_dir = %config.data_dir.display(), seed = ?config.seed, "config resolved");

    let stdin = io::stdin();
    let mut out = io::stdout().lock();

    match cli.command {
        Command::Quest { command } => run_quest(command, &config, stdin.lock(), &mut out),
        command => run_curriculum(command, &config, stdin.lock(), &mut out),
    }
}

/// `-v` and `-vv` override `RUST_LOG`; otherwise only warnings are shown.
fn setup_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run_curriculum(
    command: Command,
    config: &QuizConfig,
    input: impl io::BufRead,
    out: &mut impl Write,
) -> Result<()> {
    let mut tracker = ProgressTracker::load(config.store());

    match command {
        Command::Strands => ui::render::strand_list(out, &tracker)?,
        Command::Strand { id } => {
            let Some(strand) = get_strand(&id.to_uppercase()) else {
                bail!("Strand not found: {id}");
            };
            ui::render::strand_view(out, strand, &tracker)?;
        }
        Command::Substrand { strand, substrand } => {
            let Some((s, sub)) = get_substrand(&strand.to_uppercase(), &substrand.to_uppercase())
            else {
                bail!("Substrand not found: {strand} {substrand}");
            };
            ui::render::substrand_view(out, s, sub, &tracker)?;
        }
        Command::Show { code } => {
            let Some(entry) = get_expectation(&code.to_uppercase()) else {
                bail!("Expectation not found: {code}");
            };
            ui::render::expectation_view(out, entry, &tracker)?;
        }
        Command::Practice { code } => {
            let mut session = PracticeSession::start(&code.to_uppercase())
                .with_context(|| format!("Cannot practice {code}"))?;
            headless::run_practice(&mut session, &mut tracker, input, out)?;
        }
        Command::Progress => ui::render::progress_dashboard(out, &tracker)?,
        Command::ResetProgress { yes } => {
            if yes || headless::confirm("Clear all practice progress?", input, out)? {
                tracker.reset().context("Failed to reset practice progress")?;
                writeln!(out, "Practice progress cleared.")?;
            } else {
                writeln!(out, "Nothing changed.")?;
            }
        }
        Command::Quest { .. } => unreachable!("quest commands are dispatched separately"),
    }
    Ok(())
}

fn run_quest(
    command: QuestCommand,
    config: &QuizConfig,
    input: impl io::BufRead,
    out: &mut impl Write,
) -> Result<()> {
    let mut game = QuestGame::with_rng(config.store(), config.rng());

    match command {
        QuestCommand::Status => ui::render::player_card(out, game.player())?,
        QuestCommand::Map => ui::render::quest_map(out, game.player())?,
        QuestCommand::Achievements => ui::render::achievement_list(out, game.player())?,
        QuestCommand::Battle {
            chapter,
            dungeon,
            boss,
        } => {
            start_battle(&mut game, &chapter.to_lowercase(), dungeon, boss)?;
            headless::run_battle(&mut game, input, out)?;
        }
        QuestCommand::Reset { yes } => {
            if yes || headless::confirm("Clear all quest progress?", input, out)? {
                game.reset().context("Failed to reset quest progress")?;
                writeln!(out, "Quest progress cleared.")?;
            } else {
                writeln!(out, "Nothing changed.")?;
            }
        }
    }
    Ok(())
}

fn start_battle(
    game: &mut QuestGame<FileStore>,
    chapter_id: &str,
    dungeon: Option<String>,
    boss: bool,
) -> Result<()> {
    let Some(chapter) = get_chapter(chapter_id) else {
        bail!("Chapter not found: {chapter_id}");
    };

    if boss {
        game.start_boss(&chapter.id)
            .with_context(|| format!("Cannot fight {}", chapter.boss.name))?;
        return Ok(());
    }

    let dungeon_id = match dungeon {
        Some(id) => id.to_lowercase(),
        None => match chapter.dungeons.first() {
            Some(first) => first.id.clone(),
            None => bail!("Chapter {} has no dungeons", chapter.id),
        },
    };
    game.start_dungeon(&chapter.id, &dungeon_id)
        .with_context(|| format!("Cannot enter {dungeon_id}"))?;
    Ok(())
}
