//! # Error Types
//!
//! Rejection types for slip-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  SlipError (this file)                                                  │
//! │  ├── Structural     - length / format / duplicate violations           │
//! │  ├── Content        - non-numeric, out of range, not allowed           │
//! │  ├── CountMismatch  - declared vs computed bet count                   │
//! │  ├── AmountMismatch - declared vs expected amount                      │
//! │  └── Sequencing     - count checks run twice / amount check too early  │
//! │                                                                         │
//! │  slip-check errors (separate crate)                                    │
//! │  └── CheckerError   - config, I/O, malformed input lines               │
//! │                                                                         │
//! │  Flow: SlipError → report line { kind, check, message } → caller      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Every variant names the check that failed
//! 3. Payloads are named fields, never pre-rendered text
//! 4. The first violation wins; there is no error accumulation

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// =============================================================================
// Check Names
// =============================================================================

/// Identifies the chain operation that produced a rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckName {
    BetHasText,
    BetLengthEquals,
    BetLengthBetween,
    BetLengthAtLeast,
    BetLengthAtMost,
    ItemLengthEquals,
    ItemLengthBetween,
    ItemLengthAtLeast,
    ItemLengthAtMost,
    BetsNotBlank,
    BetNotRepeat,
    ItemNotRepeat,
    IsSingleNote,
    BetIsNumber,
    ItemIsNumber,
    BetNumberBetween,
    ItemNumberBetween,
    BetIn,
    BetCountsEqualsBets,
    BetCountsEqualsCombination,
    BetCountsEqualsPermutationItems,
    BetCountsEqualsPermutationItemsWithRepeat,
    BetCountsEqualsSumItems,
    TotalAmountValid,
}

impl CheckName {
    /// Stable snake_case identifier, identical to the serde form.
    pub const fn as_str(&self) -> &'static str {
        match self {
            CheckName::BetHasText => "bet_has_text",
            CheckName::BetLengthEquals => "bet_length_equals",
            CheckName::BetLengthBetween => "bet_length_between",
            CheckName::BetLengthAtLeast => "bet_length_at_least",
            CheckName::BetLengthAtMost => "bet_length_at_most",
            CheckName::ItemLengthEquals => "item_length_equals",
            CheckName::ItemLengthBetween => "item_length_between",
            CheckName::ItemLengthAtLeast => "item_length_at_least",
            CheckName::ItemLengthAtMost => "item_length_at_most",
            CheckName::BetsNotBlank => "bets_not_blank",
            CheckName::BetNotRepeat => "bet_not_repeat",
            CheckName::ItemNotRepeat => "item_not_repeat",
            CheckName::IsSingleNote => "is_single_note",
            CheckName::BetIsNumber => "bet_is_number",
            CheckName::ItemIsNumber => "item_is_number",
            CheckName::BetNumberBetween => "bet_number_between",
            CheckName::ItemNumberBetween => "item_number_between",
            CheckName::BetIn => "bet_in",
            CheckName::BetCountsEqualsBets => "bet_counts_equals_bets",
            CheckName::BetCountsEqualsCombination => "bet_counts_equals_combination",
            CheckName::BetCountsEqualsPermutationItems => "bet_counts_equals_permutation_items",
            CheckName::BetCountsEqualsPermutationItemsWithRepeat => {
                "bet_counts_equals_permutation_items_with_repeat"
            }
            CheckName::BetCountsEqualsSumItems => "bet_counts_equals_sum_items",
            CheckName::TotalAmountValid => "total_amount_valid",
        }
    }
}

impl fmt::Display for CheckName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Error Kind
// =============================================================================

/// Coarse classification of a [`SlipError`], for callers that map
/// rejections onto their own messages or status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    StructuralViolation,
    ContentViolation,
    CountMismatch,
    AmountMismatch,
    SequencingError,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::StructuralViolation => "structural_violation",
            ErrorKind::ContentViolation => "content_violation",
            ErrorKind::CountMismatch => "count_mismatch",
            ErrorKind::AmountMismatch => "amount_mismatch",
            ErrorKind::SequencingError => "sequencing_error",
        };
        f.write_str(name)
    }
}

// =============================================================================
// Violation Payloads
// =============================================================================

/// What a length check was measuring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Subject {
    /// The bet sequence of the whole slip.
    Bets,
    /// The items of one bet.
    Items { bet: String },
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subject::Bets => f.write_str("bets"),
            Subject::Items { bet } => write!(f, "items of bet '{}'", bet),
        }
    }
}

/// Length, format and uniqueness violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralViolation {
    /// The raw bet detail is empty or whitespace.
    #[error("bet detail is blank")]
    BlankDetail,

    /// One bet token is empty or whitespace.
    #[error("bet at position {index} is blank")]
    BlankBet { index: usize },

    #[error("{subject} length {actual} is not {expected}")]
    LengthNotEqual {
        subject: Subject,
        expected: usize,
        actual: usize,
    },

    #[error("{subject} length {actual} is outside {min}..={max}")]
    LengthOutOfRange {
        subject: Subject,
        min: usize,
        max: usize,
        actual: usize,
    },

    #[error("{subject} length {actual} is below {min}")]
    TooShort {
        subject: Subject,
        min: usize,
        actual: usize,
    },

    #[error("{subject} length {actual} is above {max}")]
    TooLong {
        subject: Subject,
        max: usize,
        actual: usize,
    },

    /// The same bet appears more than once.
    #[error("bet '{value}' is repeated")]
    DuplicateBet { value: String },

    /// The same item appears more than once inside one bet.
    #[error("item '{value}' is repeated in bet '{bet}'")]
    DuplicateItem { bet: String, value: String },

    /// A combination slip was submitted where a single note is required.
    #[error("slip has {segments} comma-separated segments, expected a single note")]
    NotSingleNote { segments: usize },
}

/// Value-level violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentViolation {
    #[error("'{value}' is not a number")]
    NotNumeric { value: String },

    #[error("{value} is outside {min}..={max}")]
    OutOfRange { value: i64, min: i64, max: i64 },

    #[error("'{value}' is not one of {allowed:?}")]
    NotAllowed { value: String, allowed: Vec<String> },
}

/// Misuse of the count state machine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequencingViolation {
    /// A count-establishing check already ran on this chain.
    #[error("bet count was already established by {by}")]
    CountAlreadyEstablished { by: CheckName },

    /// The amount check ran before any count-establishing check.
    #[error("no count-establishing check has run yet")]
    CountNotEstablished,
}

// =============================================================================
// Slip Error
// =============================================================================

/// Rejection of a slip by a validation chain.
///
/// ## User Workflow
/// ```text
/// chain.bet_is_number()?.bet_counts_equals_bets()?.total_amount_valid()?
///      │
///      ▼
/// CountMismatch { check: bet_counts_equals_bets, declared: 5, computed: 4 }
///      │
///      ▼
/// Caller renders: "declared 5 bets, slip contains 4"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SlipError {
    #[error("[{check}] {violation}")]
    Structural {
        check: CheckName,
        violation: StructuralViolation,
    },

    #[error("[{check}] {violation}")]
    Content {
        check: CheckName,
        violation: ContentViolation,
    },

    #[error("[{check}] declared bet count {declared} does not match computed {computed}")]
    CountMismatch {
        check: CheckName,
        declared: u64,
        computed: u64,
    },

    #[error("[{check}] declared amount {declared} does not match expected {expected}")]
    AmountMismatch {
        check: CheckName,
        declared: u64,
        expected: u128,
    },

    #[error("[{check}] {violation}")]
    Sequencing {
        check: CheckName,
        violation: SequencingViolation,
    },
}

impl SlipError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SlipError::Structural { .. } => ErrorKind::StructuralViolation,
            SlipError::Content { .. } => ErrorKind::ContentViolation,
            SlipError::CountMismatch { .. } => ErrorKind::CountMismatch,
            SlipError::AmountMismatch { .. } => ErrorKind::AmountMismatch,
            SlipError::Sequencing { .. } => ErrorKind::SequencingError,
        }
    }

    /// The check that rejected the slip.
    pub fn check(&self) -> CheckName {
        match self {
            SlipError::Structural { check, .. }
            | SlipError::Content { check, .. }
            | SlipError::CountMismatch { check, .. }
            | SlipError::AmountMismatch { check, .. }
            | SlipError::Sequencing { check, .. } => *check,
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with SlipError.
pub type SlipResult<T> = Result<T, SlipError>;

// =============================================================================
// Unit Tests
// =============================================================================
