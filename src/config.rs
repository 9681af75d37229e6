//! Configuration file support for evchain.
//!
//! Configuration is loaded from `~/.config/evchain/config.toml` with the following precedence:
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`EVCHAIN_SEED`)
//! 3. Configuration file
//! 4. Default values (lowest priority)
//!
//! # Example Configuration
//!
//! ```toml
//! # ~/.config/evchain/config.toml
//! seed = 917
//! chain = "timer,keypress,mouse"
//! limit = 500
//! debug_run = true
//!
//! [weights]
//! mouse = 7
//! keypress = 11
//! timer = 5
//! terminate = 1
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::Result;
use crate::events::{DEFAULT_SEED, Weights};
use crate::handlers::{Role, parse_roles};

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Seed for the event generator
    pub seed: Option<u64>,

    /// Handler chain: a preset name or comma-separated roles, outermost first
    pub chain: Option<String>,

    /// Maximum number of events dispatched per run
    pub limit: Option<usize>,

    /// Whether to do the second, debug-wrapped run
    pub debug_run: Option<bool>,

    /// Relative draw weights per event kind
    pub weights: Weights,

    /// Seed given on the command line; outranks the environment
    #[serde(skip)]
    cli_seed: Option<u64>,
}

impl Config {
    /// Load configuration from the default config file path.
    pub fn load() -> Self {
        Self::load_or_default(&Self::config_path())
    }

    /// Load configuration from `path`.
    ///
    /// Returns default configuration if the file doesn't exist or can't be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match Self::load_from(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Warning: Failed to load config file: {}", e);
                Self::default()
            }
        }
    }

    /// Load configuration from an explicit path. Any failure is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Get the default configuration file path.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("evchain")
            .join("config.toml")
    }

    /// Merge with CLI overrides.
    ///
    /// CLI arguments take precedence over config file values.
    pub fn with_overrides(
        mut self,
        seed: Option<u64>,
        chain: Option<String>,
        limit: Option<usize>,
        skip_debug_run: bool,
    ) -> Self {
        if seed.is_some() {
            self.cli_seed = seed;
        }
        if chain.is_some() {
            self.chain = chain;
        }
        if limit.is_some() {
            self.limit = limit;
        }
        if skip_debug_run {
            self.debug_run = Some(false);
        }
        self
    }

    /// Get the seed: CLI, then `EVCHAIN_SEED`, then the config file, then the default.
    pub fn seed(&self) -> u64 {
        self.resolve_seed(std::env::var("EVCHAIN_SEED").ok().as_deref())
    }

    fn resolve_seed(&self, env_seed: Option<&str>) -> u64 {
        self.cli_seed
            .or_else(|| env_seed.and_then(|s| s.trim().parse().ok()))
            .or(self.seed)
            .unwrap_or(DEFAULT_SEED)
    }

    /// Get the handler roles, defaulting to the classic chain.
    pub fn roles(&self) -> Result<Vec<Role>> {
        parse_roles(self.chain.as_deref().unwrap_or("classic"))
    }

    pub fn debug_run(&self) -> bool {
        self.debug_run.unwrap_or(true)
    }

    /// Check that the weight table can drive a finite run.
    pub fn validate(&self) -> Result<()> {
        self.weights.validate(self.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChainError;
    use crate::events::EventKind;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.seed.is_none());
        assert!(config.chain.is_none());
        assert!(config.limit.is_none());
        assert!(config.debug_run());
        assert_eq!(config.weights, Weights::default());
        assert_eq!(config.roles().unwrap().len(), 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
            seed = 42
            chain = "pipeline"
            limit = 10
            debug_run = false

            [weights]
            terminate = 0
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.resolve_seed(None), 42);
        assert_eq!(config.roles().unwrap()[0], Role::Consume(EventKind::KeyPress));
        assert_eq!(config.limit, Some(10));
        assert!(!config.debug_run());
        assert_eq!(config.weights.mouse, 7);
        assert_eq!(config.weights.terminate, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_endless_weights_need_limit() {
        let config: Config = toml::from_str("[weights]\nterminate = 0\n").unwrap();
        assert!(matches!(config.validate(), Err(ChainError::InvalidWeights(_))));

        let capped = config.with_overrides(None, None, Some(5), false);
        assert!(capped.validate().is_ok());
    }

    #[test]
    fn test_overrides_take_precedence() {
        let config: Config = toml::from_str("seed = 1\nchain = \"mouse\"\n").unwrap();
        let config = config.with_overrides(Some(2), Some("key,timer".to_string()), None, true);
        assert_eq!(config.resolve_seed(Some("9")), 2);
        assert_eq!(
            config.roles().unwrap(),
            vec![Role::Consume(EventKind::KeyPress), Role::Consume(EventKind::Timer)]
        );
        assert!(!config.debug_run());
    }

    #[test]
    fn test_bad_chain_is_rejected() {
        let config: Config = toml::from_str("chain = \"mouse,wheel\"\n").unwrap();
        assert!(matches!(config.roles(), Err(ChainError::UnknownHandler(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "seed = 123").unwrap();
        writeln!(file, "[weights]").unwrap();
        writeln!(file, "mouse = 1").unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.resolve_seed(None), 123);
        assert_eq!(config.weights.mouse, 1);
        assert_eq!(config.weights.keypress, 11);
    }

    #[test]
    fn test_load_from_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "seed = \"not a number\"").unwrap();
        assert!(matches!(Config::load_from(file.path()), Err(ChainError::Config(_))));

        let missing = Path::new("/nonexistent/evchain/config.toml");
        assert!(matches!(Config::load_from(missing), Err(ChainError::Io(_))));
    }

    #[test]
    fn test_env_overrides_file() {
        let config: Config = toml::from_str("seed = 1\n").unwrap();
        let config = config.with_overrides(None, None, None, false);
        assert_eq!(config.resolve_seed(Some("5")), 5);
        assert_eq!(config.resolve_seed(None), 1);
        // garbage in the environment falls through to the file
        assert_eq!(config.resolve_seed(Some("five")), 1);
    }

    #[test]
    fn test_cli_overrides_env() {
        let config = Config::default().with_overrides(Some(8), None, None, false);
        assert_eq!(config.resolve_seed(Some("5")), 8);
        assert_eq!(Config::default().resolve_seed(Some(" 5 ")), 5);
        assert_eq!(Config::default().resolve_seed(None), DEFAULT_SEED);
    }

    #[test]
    fn test_unparsable_file_falls_back_to_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "seed = [not toml").unwrap();

        let config = Config::load_or_default(file.path());
        assert!(config.seed.is_none());
        assert_eq!(config.weights, Weights::default());
        assert!(config.debug_run());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(&dir.path().join("config.toml"));
        assert!(config.chain.is_none());
        assert!(config.limit.is_none());
    }
}
