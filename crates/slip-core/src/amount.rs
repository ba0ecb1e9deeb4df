//! # Amount Module
//!
//! Expected stake arithmetic for the final amount check.
//!
//! ## Formula
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  expected = computed_count × multiple × unit × denomination factor      │
//! │                                                                         │
//! │  10 bets × 1 × 1 × 10000 (major) = 100000                              │
//! │  10 bets × 2 × 1 × 1000  (minor) =  20000                              │
//! │                                                                         │
//! │  Integers only. The product is taken in u128 and saturates, so a      │
//! │  saturated total can never equal a u64 declared amount.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::Denomination;

/// The factors that make up an expected stake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakeBreakdown {
    pub count: u64,
    pub multiple: u32,
    pub unit: u32,
    pub denomination: Denomination,
}

impl StakeBreakdown {
    /// Total stake in the smallest accounting unit.
    ///
    /// ## Example
    /// ```rust
    /// use slip_core::amount::StakeBreakdown;
    /// use slip_core::types::Denomination;
    ///
    /// let stake = StakeBreakdown {
    ///     count: 10,
    ///     multiple: 1,
    ///     unit: 1,
    ///     denomination: Denomination::Major,
    /// };
    /// assert_eq!(stake.total(), 100_000);
    /// ```
    #[inline]
    pub fn total(&self) -> u128 {
        (self.count as u128)
            .saturating_mul(self.multiple as u128)
            .saturating_mul(self.unit as u128)
            .saturating_mul(self.denomination.factor() as u128)
    }

    /// True when the declared amount equals [`total`](Self::total).
    #[inline]
    pub fn matches(&self, declared: u64) -> bool {
        declared as u128 == self.total()
    }
}

impl fmt::Display for StakeBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} × {} × {} × {} = {}",
            self.count,
            self.multiple,
            self.unit,
            self.denomination.factor(),
            self.total()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stake(count: u64, multiple: u32, unit: u32, denomination: Denomination) -> StakeBreakdown {
        StakeBreakdown {
            count,
            multiple,
            unit,
            denomination,
        }
    }

    #[test]
    fn test_major_total() {
        assert_eq!(stake(10, 1, 1, Denomination::Major).total(), 100_000);
        assert!(stake(10, 1, 1, Denomination::Major).matches(100_000));
        assert!(!stake(10, 1, 1, Denomination::Major).matches(99_999));
    }

    #[test]
    fn test_minor_total_with_unit() {
        // Two-unit games priced in minor mode
        assert_eq!(stake(3, 2, 2, Denomination::Minor).total(), 12_000);
    }

    #[test]
    fn test_zero_count_is_zero() {
        assert_eq!(stake(0, 5, 2, Denomination::Major).total(), 0);
    }

    #[test]
    fn test_no_overflow_at_extremes() {
        let max = stake(u64::MAX, u32::MAX, u32::MAX, Denomination::Major);
        assert!(max.total() > u64::MAX as u128);
        assert!(!max.matches(u64::MAX));
    }

    #[test]
    fn test_display() {
        assert_eq!(
            stake(2, 3, 1, Denomination::Minor).to_string(),
            "2 × 3 × 1 × 1000 = 6000"
        );
    }
}
