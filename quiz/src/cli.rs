//! Command-line interface definition.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Ontario Grade 7 math: curriculum practice and the math quest
#[derive(Debug, Parser)]
#[command(name = "quiz", version)]
pub struct Cli {
    /// Directory holding progress files (default: platform data dir)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Seed for question shuffling
    #[arg(long, global = true, value_name = "N")]
    pub seed: Option<u64>,

    /// Log more to stderr (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List strands and substrands with practice counts
    Strands,

    /// Show a strand's substrands
    Strand {
        /// Strand id, e.g. B
        id: String,
    },

    /// Show a substrand's expectations with progress
    Substrand {
        /// Strand id, e.g. B
        strand: String,
        /// Substrand id, e.g. B1
        substrand: String,
    },

    /// Show one expectation and its progress
    Show {
        /// Expectation code, e.g. B1.1
        code: String,
    },

    /// Practice the questions of one expectation
    Practice {
        /// Expectation code, e.g. B1.1
        code: String,
    },

    /// Progress dashboard
    Progress,

    /// Clear curriculum practice progress
    ResetProgress {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// The math quest
    Quest {
        #[command(subcommand)]
        command: QuestCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum QuestCommand {
    /// Player card: level, XP, gold and streaks
    Status,

    /// Chapters, lock state and stars per dungeon
    Map,

    /// Fight a dungeon or the chapter boss
    Battle {
        /// Chapter id, e.g. number
        chapter: String,

        /// Dungeon id (default: the chapter's first dungeon)
        #[arg(long, conflicts_with = "boss")]
        dungeon: Option<String>,

        /// Fight the chapter boss
        #[arg(long)]
        boss: bool,
    },

    /// Unlocked and locked achievements
    Achievements,

    /// Clear quest progress
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_battle() {
        let cli = Cli::try_parse_from(["quiz", "--seed", "3", "quest", "battle", "number", "--boss"]).unwrap();
        assert_eq!(cli.seed, Some(3));
        match cli.command {
            Command::Quest {
                command: QuestCommand::Battle { chapter, dungeon, boss },
            } => {
                assert_eq!(chapter, "number");
                assert_eq!(dungeon, None);
                assert!(boss);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_dungeon_conflicts_with_boss() {
        let result = Cli::try_parse_from([
            "quiz", "quest", "battle", "number", "--boss", "--dungeon", "fraction-caverns",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["quiz", "progress", "-vv", "--data-dir", "/tmp/q"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/q")));
    }
}
