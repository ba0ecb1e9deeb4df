//! # Domain Types
//!
//! The slip as submitted by a player, read-only to the validator.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────────┐        ┌──────────────────────┐              │
//! │  │        Slip          │        │    Denomination      │              │
//! │  │  ──────────────────  │        │  ──────────────────  │              │
//! │  │  bet_detail          │        │  Major  (× 10000)    │              │
//! │  │  bet_counts          │───────►│  Minor  (× 1000)     │              │
//! │  │  bet_amount          │        └──────────────────────┘              │
//! │  │  multiple            │                                              │
//! │  │  denomination        │                                              │
//! │  └──────────────────────┘                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;
use ts_rs::TS;

// =============================================================================
// Denomination
// =============================================================================

/// The currency unit the player staked in.
///
/// The amount on a slip is always scaled to the smallest accounting unit,
/// so a one-unit stake is worth 10000 in major mode and 1000 in minor mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Denomination {
    /// Whole currency units.
    #[default]
    Major,
    /// Tenths of a currency unit.
    Minor,
}

impl Denomination {
    /// Scale factor applied to one bet at multiplier 1 and unit 1.
    #[inline]
    pub const fn factor(&self) -> u64 {
        match self {
            Denomination::Major => crate::MAJOR_FACTOR,
            Denomination::Minor => crate::MINOR_FACTOR,
        }
    }

    /// Maps the legacy integer sales unit code: `1` is major, anything else
    /// is minor.
    ///
    /// ## Example
    /// ```rust
    /// use slip_core::types::Denomination;
    ///
    /// assert_eq!(Denomination::from_sales_unit(1), Denomination::Major);
    /// assert_eq!(Denomination::from_sales_unit(2), Denomination::Minor);
    /// ```
    pub const fn from_sales_unit(code: i32) -> Self {
        if code == 1 {
            Denomination::Major
        } else {
            Denomination::Minor
        }
    }
}

impl fmt::Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Denomination::Major => write!(f, "major"),
            Denomination::Minor => write!(f, "minor"),
        }
    }
}

// =============================================================================
// Slip
// =============================================================================

/// A submitted wager: raw bet text plus the totals the client declared.
///
/// ## Example
/// ```rust
/// use slip_core::types::{Denomination, Slip};
///
/// let slip = Slip::new("01,02,03", 3, 30000).with_denomination(Denomination::Major);
/// assert_eq!(slip.multiple.get(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Slip {
    /// Raw bet text, e.g. `"01,02,03"` or `"123,234,345"`.
    pub bet_detail: String,

    /// Number of bets the client claims the slip contains.
    pub bet_counts: u64,

    /// Total stake in the smallest accounting unit.
    pub bet_amount: u64,

    /// Stake multiplier, at least 1.
    #[serde(default = "default_multiple")]
    #[ts(type = "number")]
    pub multiple: NonZeroU32,

    #[serde(default)]
    pub denomination: Denomination,
}

fn default_multiple() -> NonZeroU32 {
    NonZeroU32::MIN
}

impl Slip {
    /// Creates a slip with multiplier 1 in major denomination.
    pub fn new(bet_detail: impl Into<String>, bet_counts: u64, bet_amount: u64) -> Self {
        Slip {
            bet_detail: bet_detail.into(),
            bet_counts,
            bet_amount,
            multiple: default_multiple(),
            denomination: Denomination::default(),
        }
    }

    pub fn with_multiple(mut self, multiple: NonZeroU32) -> Self {
        self.multiple = multiple;
        self
    }

    pub fn with_denomination(mut self, denomination: Denomination) -> Self {
        self.denomination = denomination;
        self
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
