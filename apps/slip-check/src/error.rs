//! Error types for the slip checker.
//!
//! Slip rejections are not errors here: they become reports. These variants
//! cover what stops the whole run (config, I/O) or one line (routing).

use thiserror::Error;

/// Result type alias for checker operations.
pub type CheckerResult<T> = Result<T, CheckerError>;

#[derive(Debug, Error)]
pub enum CheckerError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Config file missing or unreadable, or not valid TOML.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Config parsed but makes no sense.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // =========================================================================
    // Routing Errors
    // =========================================================================
    /// A slip named a game with no profile.
    #[error("Unknown game: {0}")]
    UnknownGame(String),

    /// A bare slip arrived with neither --game nor default_game set.
    #[error("No game given for slip and no default game configured")]
    NoGame,

    // =========================================================================
    // Input / Output Errors
    // =========================================================================
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to write report: {0}")]
    Output(#[from] serde_json::Error),
}

impl From<toml::de::Error> for CheckerError {
    fn from(err: toml::de::Error) -> Self {
        CheckerError::ConfigLoadFailed(err.to_string())
    }
}

impl CheckerError {
    /// Snake-case label used in reports.
    pub fn kind(&self) -> &'static str {
        match self {
            CheckerError::ConfigLoadFailed(_) | CheckerError::InvalidConfig(_) => "config_error",
            CheckerError::UnknownGame(_) => "unknown_game",
            CheckerError::NoGame => "no_game",
            CheckerError::Io(_) | CheckerError::Output(_) => "io_error",
        }
    }

    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            CheckerError::ConfigLoadFailed(_) | CheckerError::InvalidConfig(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CheckerError::UnknownGame("keno".into());
        assert_eq!(err.to_string(), "Unknown game: keno");
        assert_eq!(err.kind(), "unknown_game");
    }

    #[test]
    fn test_toml_error_is_config_error() {
        let err: CheckerError = toml::from_str::<toml::Table>("games = [").unwrap_err().into();
        assert!(err.is_config_error());
        assert!(!CheckerError::NoGame.is_config_error());
    }
}
