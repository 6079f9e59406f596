//! Runtime configuration: where progress lives and how questions are shuffled.

use crate::store::FileStore;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "QUIZ_DATA_DIR";

/// Environment variable fixing the shuffle seed.
pub const SEED_ENV: &str = "QUIZ_SEED";

const APP_DIR: &str = "ontario-math-quiz";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid seed {0:?}: expected an unsigned integer")]
    InvalidSeed(String),

    #[error("no data directory available; set QUIZ_DATA_DIR or pass --data-dir")]
    NoDataDir,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizConfig {
    /// Directory holding the progress files.
    pub data_dir: PathBuf,

    /// Seed for question shuffling. `None` draws from the OS.
    pub seed: Option<u64>,
}

impl QuizConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            seed: None,
        }
    }

    /// Resolve from the process environment, falling back to the platform
    /// data directory.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::resolve(None, None)
    }

    /// Resolve with explicit overrides taking precedence over the
    /// environment.
    pub fn resolve(data_dir: Option<PathBuf>, seed: Option<u64>) -> Result<Self, ConfigError> {
        Self::resolve_with(data_dir, seed, |key| std::env::var(key).ok())
    }

    /// Like `resolve`, reading variables through `lookup`.
    pub fn resolve_with(
        data_dir: Option<PathBuf>,
        seed: Option<u64>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let data_dir = match data_dir.or_else(|| var(DATA_DIR_ENV).map(PathBuf::from)) {
            Some(dir) => dir,
            None => default_data_dir().ok_or(ConfigError::NoDataDir)?,
        };
        let seed = match seed {
            Some(seed) => Some(seed),
            None => var(SEED_ENV).map(|v| parse_seed(&v)).transpose()?,
        };
        Ok(Self { data_dir, seed })
    }

    /// Set the data directory.
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Set a fixed shuffle seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn store(&self) -> FileStore {
        FileStore::new(&self.data_dir)
    }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// `<platform data dir>/ontario-math-quiz`, if the platform has one.
pub fn default_data_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join(APP_DIR))
}

pub fn parse_seed(value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidSeed(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_env_overrides() {
        let config = QuizConfig::resolve_with(None, None, lookup(&[
            (DATA_DIR_ENV, "/tmp/quiz"),
            (SEED_ENV, " 42 "),
        ]))
        .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/quiz"));
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_invalid_seed() {
        let err = QuizConfig::resolve_with(None, None, lookup(&[(DATA_DIR_ENV, "/tmp/quiz"), (SEED_ENV, "abc")]))
            .unwrap_err();
        assert_eq!(err, ConfigError::InvalidSeed("abc".to_string()));
    }

    #[test]
    fn test_blank_values_are_ignored() {
        let config = QuizConfig::resolve_with(
            None,
            None,
            lookup(&[(DATA_DIR_ENV, "/tmp/quiz"), (SEED_ENV, "")]),
        )
        .unwrap();
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_explicit_values_beat_environment() {
        let env = lookup(&[(DATA_DIR_ENV, "/tmp/env"), (SEED_ENV, "not a number")]);
        let config = QuizConfig::resolve_with(Some(PathBuf::from("/tmp/cli")), Some(5), env).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/cli"));
        assert_eq!(config.seed, Some(5));
    }

    #[test]
    fn test_builder_overrides() {
        let config = QuizConfig::new("/a").with_data_dir("/b").with_seed(7);
        assert_eq!(config.data_dir, PathBuf::from("/b"));
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.store().dir(), std::path::Path::new("/b"));
    }

    #[test]
    fn test_seeded_rng_is_repeatable() {
        let config = QuizConfig::new("/a").with_seed(9);
        let a: u64 = config.rng().gen();
        let b: u64 = config.rng().gen();
        assert_eq!(a, b);
    }
}
