//! Ontario Grade 7 mathematics quiz engine.
//!
//! This crate provides:
//! - The Grade 7 curriculum tree and a practice question bank
//! - Per-expectation practice progress
//! - A quest mode with levels, dungeons, boss battles and achievements
//! - JSON persistence through a small key-value store
//!
//! # Quick Start
//!
//! ```no_run
//! use quiz_core::{FileStore, ProgressTracker, QuestGame};
//!
//! let mut tracker = ProgressTracker::load(FileStore::new("progress"));
//! tracker.record_answer("B1.1", true)?;
//!
//! let mut game = QuestGame::load(FileStore::new("progress"));
//! game.start_dungeon("number", "fraction-caverns")?;
//! game.answer(0)?;
//! let report = game.complete_battle()?;
//! println!("passed: {}", report.summary.passed);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod curriculum;
pub mod practice;
pub mod progress;
pub mod quest;
pub mod questions;
pub mod store;
pub mod testing;

// Primary public API
pub use config::{ConfigError, QuizConfig};
pub use curriculum::{get_expectation, get_strand, get_substrand, strands, Expectation, Strand, Substrand};
pub use practice::{Feedback, PracticeError, PracticeSession, Verdict};
pub use progress::{ExpectationProgress, ProgressSummary, ProgressTracker};
pub use quest::{BattleReport, BattleState, PlayerProgress, QuestError, QuestGame};
pub use questions::{Question, QuestionKind};
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};
pub use testing::TestHarness;
