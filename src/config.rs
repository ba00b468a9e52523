//! Table configuration.
//!
//! Resolution order: built-in defaults, then a TOML file (explicit path or the
//! `POKER_TABLE_CONFIG` environment variable), then command-line overrides.
//! The result is validated before a table is built from it.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "POKER_TABLE_CONFIG";
pub const MAX_PLAYERS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TableConfig {
    pub players: usize,
    pub humans: usize,
    pub starting_stack: u64,
    pub small_blind: u64,
    pub big_blind: u64,
    pub seed: Option<u64>,
    pub max_rounds: Option<u32>,
    pub max_retries: u32,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            players: 4,
            humans: 1,
            starting_stack: 1000,
            small_blind: 10,
            big_blind: 20,
            seed: None,
            max_rounds: None,
            max_retries: 5,
        }
    }
}

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Values given on the command line; `None` leaves the lower layer alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub players: Option<usize>,
    pub humans: Option<usize>,
    pub starting_stack: Option<u64>,
    pub small_blind: Option<u64>,
    pub big_blind: Option<u64>,
    pub seed: Option<u64>,
    pub max_rounds: Option<u32>,
    pub max_retries: Option<u32>,
}

impl TableConfig {
    /// Defaults overlaid with the file at `path`, or at `$POKER_TABLE_CONFIG`
    /// when no path is given. Not validated yet.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let from_env = std::env::var_os(CONFIG_ENV).filter(|v| !v.is_empty()).map(PathBuf::from);
        match path.map(Path::to_path_buf).or(from_env) {
            Some(p) => Self::from_file(&p),
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        let cfg: TableConfig = toml::from_str(&text)?;
        log::debug!("loaded config from {}", path.display());
        Ok(cfg)
    }

    pub fn with_overrides(mut self, o: &ConfigOverrides) -> Self {
        if let Some(v) = o.players {
            self.players = v;
        }
        if let Some(v) = o.humans {
            self.humans = v;
        }
        if let Some(v) = o.starting_stack {
            self.starting_stack = v;
        }
        if let Some(v) = o.small_blind {
            self.small_blind = v;
        }
        if let Some(v) = o.big_blind {
            self.big_blind = v;
        }
        if o.seed.is_some() {
            self.seed = o.seed;
        }
        if o.max_rounds.is_some() {
            self.max_rounds = o.max_rounds;
        }
        if let Some(v) = o.max_retries {
            self.max_retries = v;
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));
        if self.players < 2 || self.players > MAX_PLAYERS {
            return invalid(format!("players must be 2..={MAX_PLAYERS}, got {}", self.players));
        }
        if self.humans > self.players {
            return invalid(format!(
                "humans ({}) cannot exceed players ({})",
                self.humans, self.players
            ));
        }
        if self.starting_stack == 0 {
            return invalid("starting_stack must be > 0".into());
        }
        if self.big_blind == 0 {
            return invalid("big_blind must be > 0".into());
        }
        if self.small_blind > self.big_blind {
            return invalid(format!(
                "small_blind ({}) cannot exceed big_blind ({})",
                self.small_blind, self.big_blind
            ));
        }
        if self.max_retries == 0 {
            return invalid("max_retries must be >= 1".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = TableConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!((cfg.small_blind, cfg.big_blind), (10, 20));
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg: TableConfig = toml::from_str("players = 6\nseed = 9\n").unwrap();
        assert_eq!(cfg.players, 6);
        assert_eq!(cfg.seed, Some(9));
        assert_eq!(cfg.starting_stack, 1000);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(toml::from_str::<TableConfig>("player = 6\n").is_err());
    }

    #[test]
    fn overrides_win() {
        let o = ConfigOverrides { players: Some(3), seed: Some(1), ..Default::default() };
        let cfg = TableConfig::default().with_overrides(&o);
        assert_eq!(cfg.players, 3);
        assert_eq!(cfg.seed, Some(1));
        assert_eq!(cfg.humans, 1);
    }

    #[test]
    fn validation_rejects_bad_tables() {
        let bad = [
            TableConfig { players: 1, humans: 0, ..Default::default() },
            TableConfig { players: 11, ..Default::default() },
            TableConfig { players: 2, humans: 3, ..Default::default() },
            TableConfig { starting_stack: 0, ..Default::default() },
            TableConfig { big_blind: 0, small_blind: 0, ..Default::default() },
            TableConfig { small_blind: 30, ..Default::default() },
            TableConfig { max_retries: 0, ..Default::default() },
        ];
        for cfg in bad {
            assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))), "{cfg:?}");
        }
    }
}
