//! # Line Processing
//!
//! Turns JSON input lines into JSON reports.
//!
//! ## Line Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  {"game":"g","slip":{..}}  or  {..bare slip..}                          │
//! │              │                                                          │
//! │              ▼                                                          │
//! │   parse ──✗──► report { accepted: false, kind: "malformed_input" }      │
//! │              │                                                          │
//! │              ▼                                                          │
//! │   route: line game > --game > default_game                              │
//! │              │──✗──► report { kind: "unknown_game" | "no_game" }        │
//! │              ▼                                                          │
//! │   GameProfile::validate ──► report { accepted, computed_count, error }  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A bad line never stops the run; only reading input or writing output can.

use serde::{Deserialize, Serialize};
use std::io::{BufRead, Write};
use tracing::{debug, warn};

use slip_core::{Slip, SlipError};

use crate::config::CheckerConfig;
use crate::error::{CheckerError, CheckerResult};

// =============================================================================
// Input / Output Shapes
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InputLine {
    Routed { game: String, slip: Slip },
    Bare(Slip),
}

/// Why a slip was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rejection {
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check: Option<String>,
    pub message: String,
}

impl From<&SlipError> for Rejection {
    fn from(err: &SlipError) -> Self {
        Rejection {
            kind: err.kind().to_string(),
            check: Some(err.check().to_string()),
            message: err.to_string(),
        }
    }
}

impl From<&CheckerError> for Rejection {
    fn from(err: &CheckerError) -> Self {
        Rejection {
            kind: err.kind().to_string(),
            check: None,
            message: err.to_string(),
        }
    }
}

/// One output line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// 1-based input line number.
    pub line: usize,
    pub game: Option<String>,
    pub accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub computed_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<Rejection>,
}

impl Report {
    fn rejected(line: usize, game: Option<String>, error: Rejection) -> Self {
        Report {
            line,
            game,
            accepted: false,
            computed_count: None,
            error: Some(error),
        }
    }
}

/// Totals for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub accepted: usize,
    pub rejected: usize,
}

impl Summary {
    pub fn total(&self) -> usize {
        self.accepted + self.rejected
    }
}

// =============================================================================
// Checker
// =============================================================================

/// Validates input lines against configured games.
pub struct Checker<'c> {
    config: &'c CheckerConfig,
    game: Option<String>,
}

impl<'c> Checker<'c> {
    /// `game` is used for bare slips before the config's `default_game`.
    pub fn new(config: &'c CheckerConfig, game: Option<String>) -> Self {
        Checker { config, game }
    }

    /// Checks one input line.
    pub fn check_line(&self, line: usize, text: &str) -> Report {
        let input: InputLine = match serde_json::from_str(text) {
            Ok(input) => input,
            Err(e) => {
                warn!(line, error = %e, "Malformed input line");
                return Report::rejected(
                    line,
                    None,
                    Rejection {
                        kind: "malformed_input".to_string(),
                        check: None,
                        message: e.to_string(),
                    },
                );
            }
        };

        let (game, slip) = match input {
            InputLine::Routed { game, slip } => (Some(game), slip),
            InputLine::Bare(slip) => (self.fallback_game(), slip),
        };

        let profile = match game.as_deref() {
            Some(name) => self.config.game(name),
            None => Err(CheckerError::NoGame),
        };
        let profile = match profile {
            Ok(profile) => profile,
            Err(e) => {
                warn!(line, error = %e, "Cannot route slip");
                return Report::rejected(line, game, Rejection::from(&e));
            }
        };

        match profile.validate(&slip) {
            Ok(verdict) => {
                debug!(
                    line,
                    game = %profile.name,
                    computed = ?verdict.computed_count,
                    "Slip accepted"
                );
                Report {
                    line,
                    game,
                    accepted: true,
                    computed_count: verdict.computed_count,
                    error: None,
                }
            }
            Err(e) => {
                debug!(
                    line,
                    game = %profile.name,
                    check = %e.check(),
                    error = %e,
                    "Slip rejected"
                );
                let computed_count = match &e {
                    SlipError::CountMismatch { computed, .. } => Some(*computed),
                    _ => None,
                };
                Report {
                    line,
                    game,
                    accepted: false,
                    computed_count,
                    error: Some(Rejection::from(&e)),
                }
            }
        }
    }

    /// Checks every non-blank line of `input`, writing one JSON report per
    /// line to `output`.
    pub fn run<R: BufRead, W: Write>(&self, input: R, mut output: W) -> CheckerResult<Summary> {
        let mut summary = Summary::default();

        for (index, text) in input.lines().enumerate() {
            let text = text?;
            if text.trim().is_empty() {
                continue;
            }

            let report = self.check_line(index + 1, &text);
            if report.accepted {
                summary.accepted += 1;
            } else {
                summary.rejected += 1;
            }

            serde_json::to_writer(&mut output, &report)?;
            output.write_all(b"\n")?;
        }

        output.flush()?;
        Ok(summary)
    }

    fn fallback_game(&self) -> Option<String> {
        self.game
            .clone()
            .or_else(|| self.config.default_game.clone())
    }
}
