//! # Tokenizer
//!
//! Splits raw bet text into bets, and bets into items.
//!
//! ## Two Levels of Splitting
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  raw:   "01 03,08 09,02 07"                                             │
//! │            │                                                            │
//! │            ▼  bet delimiter (comma)                                     │
//! │  bets:  ["01 03", "08 09", "02 07"]      ← stored, immutable           │
//! │            │                                                            │
//! │            ▼  item delimiter (space), on demand                        │
//! │  items: ["01","03"] ["08","09"] ["02","07"]                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Split Semantics
//! - Empty input yields a single empty token.
//! - Trailing empty tokens are dropped, interior ones are kept.
//! - [`Delimiter::Unsigned`] turns every character into a token and never
//!   yields a leading empty token: `"0123"` → `["0","1","2","3"]`.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

// =============================================================================
// Delimiter
// =============================================================================

/// How a piece of text is cut into tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "DelimiterSpec", into = "DelimiterSpec")]
pub enum Delimiter {
    /// One token per character.
    Unsigned,
    /// A fixed separator string.
    Literal(String),
    /// Any character outside `[A-Za-z0-9_]`.
    NonWord,
    /// A regular expression.
    Pattern(Regex),
}

impl Delimiter {
    pub fn unsigned() -> Self {
        Delimiter::Unsigned
    }

    pub fn comma() -> Self {
        Delimiter::Literal(",".to_string())
    }

    pub fn space() -> Self {
        Delimiter::Literal(" ".to_string())
    }

    pub fn dash() -> Self {
        Delimiter::Literal("-".to_string())
    }

    pub fn non_word() -> Self {
        Delimiter::NonWord
    }

    /// A literal separator. An empty separator splits per character.
    pub fn literal(separator: impl Into<String>) -> Self {
        let separator = separator.into();
        if separator.is_empty() {
            Delimiter::Unsigned
        } else {
            Delimiter::Literal(separator)
        }
    }

    /// A regex separator.
    pub fn pattern(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Delimiter::Pattern(Regex::new(pattern)?))
    }

    /// Splits `text` into tokens.
    ///
    /// ## Example
    /// ```rust
    /// use slip_core::tokenizer::Delimiter;
    ///
    /// assert_eq!(Delimiter::unsigned().split("0123"), vec!["0", "1", "2", "3"]);
    /// assert_eq!(Delimiter::comma().split("01,02,,"), vec!["01", "02"]);
    /// assert_eq!(Delimiter::comma().split(""), vec![""]);
    /// ```
    pub fn split<'a>(&self, text: &'a str) -> Vec<&'a str> {
        if text.is_empty() {
            return vec![""];
        }

        let mut tokens: Vec<&'a str> = match self {
            Delimiter::Unsigned => text
                .char_indices()
                .map(|(start, c)| &text[start..start + c.len_utf8()])
                .collect(),
            Delimiter::Literal(separator) => text.split(separator.as_str()).collect(),
            Delimiter::NonWord => text
                .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .collect(),
            Delimiter::Pattern(regex) => {
                let mut tokens: Vec<&'a str> = regex.split(text).collect();
                // A zero-width match at the very start does not open a token
                let leading_empty_match = regex
                    .find(text)
                    .is_some_and(|m| m.start() == 0 && m.end() == 0);
                if leading_empty_match && tokens.first() == Some(&"") {
                    tokens.remove(0);
                }
                tokens
            }
        };

        while tokens.last().is_some_and(|token| token.is_empty()) {
            tokens.pop();
        }
        tokens
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Delimiter::Unsigned => write!(f, "unsigned"),
            Delimiter::Literal(separator) => write!(f, "'{}'", separator),
            Delimiter::NonWord => write!(f, "non_word"),
            Delimiter::Pattern(regex) => write!(f, "/{}/", regex.as_str()),
        }
    }
}

/// Serialized form of [`Delimiter`]: a preset name or a table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum DelimiterSpec {
    Named(NamedDelimiter),
    Literal { literal: String },
    Pattern { pattern: String },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum NamedDelimiter {
    Unsigned,
    Comma,
    Space,
    Dash,
    NonWord,
}

impl TryFrom<DelimiterSpec> for Delimiter {
    type Error = regex::Error;

    fn try_from(spec: DelimiterSpec) -> Result<Self, Self::Error> {
        Ok(match spec {
            DelimiterSpec::Named(NamedDelimiter::Unsigned) => Delimiter::unsigned(),
            DelimiterSpec::Named(NamedDelimiter::Comma) => Delimiter::comma(),
            DelimiterSpec::Named(NamedDelimiter::Space) => Delimiter::space(),
            DelimiterSpec::Named(NamedDelimiter::Dash) => Delimiter::dash(),
            DelimiterSpec::Named(NamedDelimiter::NonWord) => Delimiter::non_word(),
            DelimiterSpec::Literal { literal } => Delimiter::literal(literal),
            DelimiterSpec::Pattern { pattern } => Delimiter::pattern(&pattern)?,
        })
    }
}

impl From<Delimiter> for DelimiterSpec {
    fn from(delimiter: Delimiter) -> Self {
        match delimiter {
            Delimiter::Unsigned => DelimiterSpec::Named(NamedDelimiter::Unsigned),
            Delimiter::NonWord => DelimiterSpec::Named(NamedDelimiter::NonWord),
            Delimiter::Literal(separator) => match separator.as_str() {
                "," => DelimiterSpec::Named(NamedDelimiter::Comma),
                " " => DelimiterSpec::Named(NamedDelimiter::Space),
                "-" => DelimiterSpec::Named(NamedDelimiter::Dash),
                _ => DelimiterSpec::Literal { literal: separator },
            },
            Delimiter::Pattern(regex) => DelimiterSpec::Pattern {
                pattern: regex.as_str().to_string(),
            },
        }
    }
}

// =============================================================================
// Substitution
// =============================================================================

/// Text removed from every bet after the bet split, e.g. `-` placeholders
/// for positions the player left empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Substitution(Regex);

impl Substitution {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Substitution(Regex::new(pattern)?))
    }

    /// Removes every match from `text`.
    pub fn apply<'a>(&self, text: &'a str) -> Cow<'a, str> {
        self.0.replace_all(text, "")
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for Substitution {
    type Error = regex::Error;

    fn try_from(pattern: String) -> Result<Self, Self::Error> {
        Substitution::new(&pattern)
    }
}

impl From<Substitution> for String {
    fn from(substitution: Substitution) -> Self {
        substitution.0.as_str().to_string()
    }
}

// =============================================================================
// Bets
// =============================================================================

/// The bet tokens of one slip. Items are split on demand.
#[derive(Debug, Clone)]
pub struct Bets {
    bets: Vec<String>,
    item_delimiter: Delimiter,
}

impl Bets {
    #[inline]
    pub fn len(&self) -> usize {
        self.bets.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bets.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.bets
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.bets.iter().map(String::as_str)
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.bets.get(index).map(String::as_str)
    }

    pub fn item_delimiter(&self) -> &Delimiter {
        &self.item_delimiter
    }

    /// Items of the bet at `index`; empty when out of range.
    pub fn items(&self, index: usize) -> Vec<&str> {
        self.get(index)
            .map(|bet| self.item_delimiter.split(bet))
            .unwrap_or_default()
    }

    /// Every bet paired with its items.
    pub fn with_items(&self) -> impl Iterator<Item = (&str, Vec<&str>)> {
        self.iter().map(|bet| (bet, self.item_delimiter.split(bet)))
    }
}

/// Tokenizes raw bet text.
///
/// The substitution runs per bet after the bet split, so removed text can
/// never merge two bets.
///
/// ## Example
/// ```rust
/// use slip_core::tokenizer::{tokenize, Delimiter};
///
/// let bets = tokenize("01,02,03,04", &Delimiter::comma(), &Delimiter::unsigned(), None);
/// assert_eq!(bets.len(), 4);
/// assert_eq!(bets.items(0), vec!["0", "1"]);
/// ```
pub fn tokenize(
    raw: &str,
    bet_delimiter: &Delimiter,
    item_delimiter: &Delimiter,
    substitution: Option<&Substitution>,
) -> Bets {
    let bets = bet_delimiter
        .split(raw)
        .into_iter()
        .map(|bet| match substitution {
            Some(substitution) => substitution.apply(bet).into_owned(),
            None => bet.to_string(),
        })
        .collect();

    Bets {
        bets,
        item_delimiter: item_delimiter.clone(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
