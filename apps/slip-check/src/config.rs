//! # Checker Configuration
//!
//! Game profiles and runtime settings for the slip checker.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     SLIPCHECK_DEFAULT_GAME=pick-three                                  │
//! │     SLIPCHECK_LOG_LEVEL=debug                                          │
//! │                                                                         │
//! │  2. TOML Config File, first of:                                        │
//! │     --config PATH                                                      │
//! │     SLIPCHECK_CONFIG=PATH                                              │
//! │     ~/.config/slipcheck/slipcheck.toml (Linux)                         │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     no games, log level "info"                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! default_game = "five-numbers"
//!
//! [log]
//! level = "info"
//!
//! [[games]]
//! name = "five-numbers"
//! bet_delimiter = "comma"
//! rules = [
//!     { check = "bet_number_between", min = 1, max = 11 },
//!     { check = "bet_not_repeat" },
//!     { check = "bet_counts_equals_combination", bet_length = 5 },
//!     { check = "total_amount_valid" },
//! ]
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use slip_core::GameProfile;

use crate::error::{CheckerError, CheckerResult};

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "SLIPCHECK_CONFIG";

// =============================================================================
// Log Settings
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogSettings {
    /// Filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogSettings {
    fn default() -> Self {
        LogSettings {
            level: default_log_level(),
        }
    }
}

// =============================================================================
// Checker Configuration
// =============================================================================

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckerConfig {
    /// Game used for slips that do not name one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_game: Option<String>,

    #[serde(default)]
    pub log: LogSettings,

    #[serde(default)]
    pub games: Vec<GameProfile>,
}

impl CheckerConfig {
    /// Loads configuration from file and environment.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file
    /// 3. Environment variables
    ///
    /// A path given explicitly (argument or `SLIPCHECK_CONFIG`) must exist;
    /// the platform default path is optional.
    pub fn load(config_path: Option<PathBuf>) -> CheckerResult<Self> {
        let explicit = config_path.or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));

        let mut config = match explicit {
            Some(path) => Self::load_from_file(&path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::load_from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Parses one TOML file without overrides or validation.
    pub fn load_from_file(path: &std::path::Path) -> CheckerResult<Self> {
        info!(?path, "Loading checker config from file");
        let contents = std::fs::read_to_string(path).map_err(|e| {
            CheckerError::ConfigLoadFailed(format!("{}: {}", path.display(), e))
        })?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CheckerResult<()> {
        let mut names = HashSet::new();
        for game in &self.games {
            if game.name.trim().is_empty() {
                return Err(CheckerError::InvalidConfig(
                    "game name must not be empty".into(),
                ));
            }
            if !names.insert(game.name.as_str()) {
                return Err(CheckerError::InvalidConfig(format!(
                    "game '{}' is defined more than once",
                    game.name
                )));
            }
            // A second count rule would reject every slip of the game
            if game.count_rules() > 1 {
                return Err(CheckerError::InvalidConfig(format!(
                    "game '{}' has {} count rules, at most one is allowed",
                    game.name,
                    game.count_rules()
                )));
            }
        }

        if let Some(ref name) = self.default_game {
            if !names.contains(name.as_str()) {
                return Err(CheckerError::InvalidConfig(format!(
                    "default_game '{}' has no profile",
                    name
                )));
            }
        }

        if self.log.level.parse::<tracing::Level>().is_err() {
            return Err(CheckerError::InvalidConfig(format!(
                "Unknown log level: '{}'. Valid options: trace, debug, info, warn, error",
                self.log.level
            )));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies `SLIPCHECK_*` overrides from any key lookup.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(game) = lookup("SLIPCHECK_DEFAULT_GAME") {
            debug!(game = %game, "Overriding default game from environment");
            self.default_game = Some(game);
        }

        if let Some(level) = lookup("SLIPCHECK_LOG_LEVEL") {
            if level.parse::<tracing::Level>().is_ok() {
                self.log.level = level;
            } else {
                warn!(level = %level, "Unknown log level in environment");
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "slipcheck", "slipcheck")
            .map(|dirs| dirs.config_dir().join("slipcheck.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Looks up a game profile by name.
    pub fn game(&self, name: &str) -> CheckerResult<&GameProfile> {
        self.games
            .iter()
            .find(|game| game.name == name)
            .ok_or_else(|| CheckerError::UnknownGame(name.to_string()))
    }

    /// Names of all configured games, in file order.
    pub fn game_names(&self) -> Vec<&str> {
        self.games.iter().map(|game| game.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    const SAMPLE: &str = r#"
        default_game = "five-numbers"

        [log]
        level = "debug"

        [[games]]
        name = "five-numbers"
        bet_delimiter = "comma"
        rules = [
            { check = "bet_number_between", min = 1, max = 11 },
            { check = "bet_counts_equals_combination", bet_length = 5 },
            { check = "total_amount_valid" },
        ]

        [[games]]
        name = "pick-three"
        bet_delimiter = "comma"
        rules = [{ check = "bet_counts_equals_permutation_items" }]
    "#;

    fn sample() -> CheckerConfig {
        toml::from_str(SAMPLE).unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = CheckerConfig::default();
        assert!(config.games.is_empty());
        assert_eq!(config.log.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_sample_parses() {
        let config = sample();
        assert_eq!(config.default_game.as_deref(), Some("five-numbers"));
        assert_eq!(config.log.level, "debug");
        assert_eq!(config.game_names(), vec!["five-numbers", "pick-three"]);
        assert_eq!(config.game("pick-three").unwrap().rules.len(), 1);
        assert!(matches!(
            config.game("keno"),
            Err(CheckerError::UnknownGame(_))
        ));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = sample();
        config.default_game = Some("keno".to_string());
        assert!(config.validate().is_err());

        let mut config = sample();
        config.games.push(config.games[0].clone());
        assert!(config.validate().is_err());

        let mut config = sample();
        config.log.level = "loud".to_string();
        assert!(config.validate().is_err());

        let mut config = sample();
        config.games[1]
            .rules
            .push(slip_core::Rule::BetCountsEqualsBets);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overrides() {
        let mut config = sample();
        config.apply_overrides(|key| match key {
            "SLIPCHECK_DEFAULT_GAME" => Some("pick-three".to_string()),
            "SLIPCHECK_LOG_LEVEL" => Some("nonsense".to_string()),
            _ => None,
        });
        assert_eq!(config.default_game.as_deref(), Some("pick-three"));
        // Unparseable level is ignored
        assert_eq!(config.log.level, "debug");
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_unknown_env_log_level_warns() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();

        let mut config = sample();
        tracing::subscriber::with_default(subscriber, || {
            config.apply_overrides(|key| match key {
                "SLIPCHECK_LOG_LEVEL" => Some("verbose".to_string()),
                _ => None,
            });
        });

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("Unknown log level in environment"));
        assert!(output.contains("verbose"));
        assert_eq!(config.log.level, "debug");
    }

    #[test]
    fn test_load_from_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let config = CheckerConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.games.len(), 2);
    }

    #[test]
    fn test_missing_explicit_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = CheckerConfig::load(Some(dir.path().join("absent.toml"))).unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_malformed_file_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[[games]]\nname = \"x\"\nrules = [{ check = \"no_such_check\" }]\n")
            .unwrap();
        let err = CheckerConfig::load_from_file(file.path()).unwrap_err();
        assert!(matches!(err, CheckerError::ConfigLoadFailed(_)));
    }

    #[test]
    fn test_shipped_sample_config() {
        let config: CheckerConfig = toml::from_str(include_str!("../slipcheck.toml")).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(
            config.game_names(),
            vec!["eleven-five-any", "three-digit-direct", "five-positions", "dice-sum"]
        );

        let slip = slip_core::Slip::new("01,02,03", 3, 30_000);
        let verdict = config.game("eleven-five-any").unwrap().validate(&slip).unwrap();
        assert_eq!(verdict.computed_count, Some(3));

        let slip = slip_core::Slip::new("123,234,345", 27, 270_000);
        assert!(config.game("three-digit-direct").unwrap().validate(&slip).is_ok());

        let slip = slip_core::Slip::new("1 2,3,4,5,6 7", 4, 80_000);
        assert!(config.game("five-positions").unwrap().validate(&slip).is_ok());

        let slip = slip_core::Slip::new("big,odd", 2, 20_000);
        assert!(config.game("dice-sum").unwrap().validate(&slip).is_ok());
    }

    #[test]
    fn test_toml_serialization() {
        let config = sample();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[log]"));
        let back: CheckerConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(back.game_names(), config.game_names());
        assert_eq!(back.games[0].rules, config.games[0].rules);
    }
}
