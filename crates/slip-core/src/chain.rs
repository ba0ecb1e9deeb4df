//! # Validation Chain
//!
//! Ordered, fluent checks over one tokenized slip.
//!
//! ## Validation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      One Validation Call                                │
//! │                                                                         │
//! │  Slip ──► tokenize ──► structural / content checks (any order)          │
//! │                              │                                          │
//! │                              ▼                                          │
//! │                  ONE count-establishing check                           │
//! │            CountState: Unprocessed ──► Processed { computed }           │
//! │                              │                                          │
//! │                              ▼                                          │
//! │                     total_amount_valid (optional)                       │
//! │                                                                         │
//! │  The first failing check returns its SlipError; nothing accumulates.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use slip_core::chain::ValidationChain;
//! use slip_core::tokenizer::Delimiter;
//! use slip_core::types::Slip;
//!
//! let slip = Slip::new("01,02,03,04", 4, 40000);
//! let mut chain = ValidationChain::with_bet_delimiter(&slip, Delimiter::comma());
//! chain
//!     .bet_has_text()?
//!     .bet_length_equals(4)?
//!     .bet_number_between(1, 11)?
//!     .bet_not_repeat()?
//!     .bet_counts_equals_bets()?
//!     .total_amount_valid()?;
//! assert_eq!(chain.computed_count(), Some(4));
//! # Ok::<(), slip_core::SlipError>(())
//! ```

use std::collections::HashSet;
use std::num::NonZeroU32;

use crate::amount::StakeBreakdown;
use crate::combinatorics::combination;
use crate::error::{
    CheckName, ContentViolation, SequencingViolation, SlipError, SlipResult, StructuralViolation,
    Subject,
};
use crate::tokenizer::{tokenize, Bets, Delimiter, Substitution};
use crate::tree::PermutationTree;
use crate::types::Slip;

// =============================================================================
// Count State
// =============================================================================

/// Whether the chain's computed bet count has been established.
///
/// The transition happens at most once per chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CountState {
    #[default]
    Unprocessed,
    Processed { computed: u64, by: CheckName },
}

/// Length bound shared by the bet and item length checks.
#[derive(Debug, Clone, Copy)]
enum LengthBound {
    Equals(usize),
    Between(usize, usize),
    AtLeast(usize),
    AtMost(usize),
}

impl LengthBound {
    fn violation(self, subject: Subject, actual: usize) -> Option<StructuralViolation> {
        match self {
            LengthBound::Equals(expected) if actual != expected => {
                Some(StructuralViolation::LengthNotEqual {
                    subject,
                    expected,
                    actual,
                })
            }
            LengthBound::Between(min, max) if actual < min || actual > max => {
                Some(StructuralViolation::LengthOutOfRange {
                    subject,
                    min,
                    max,
                    actual,
                })
            }
            LengthBound::AtLeast(min) if actual < min => Some(StructuralViolation::TooShort {
                subject,
                min,
                actual,
            }),
            LengthBound::AtMost(max) if actual > max => Some(StructuralViolation::TooLong {
                subject,
                max,
                actual,
            }),
            _ => None,
        }
    }
}

// =============================================================================
// Validation Chain
// =============================================================================

/// Checks for one slip. Create one per validation call.
#[derive(Debug, Clone)]
pub struct ValidationChain<'a> {
    slip: &'a Slip,
    bets: Bets,
    bet_delimiter: Delimiter,
    unit: NonZeroU32,
    state: CountState,
}

impl<'a> ValidationChain<'a> {
    /// Tokenizes the slip once with the given delimiters and substitution,
    /// at unit price 1.
    pub fn new(
        slip: &'a Slip,
        bet_delimiter: Delimiter,
        item_delimiter: Delimiter,
        substitution: Option<&Substitution>,
    ) -> Self {
        Self::with_unit(slip, bet_delimiter, item_delimiter, substitution, NonZeroU32::MIN)
    }

    /// Like [`new`](Self::new) with a per-bet unit price. The unit is fixed
    /// for the life of the chain.
    ///
    /// ## Example
    /// ```rust
    /// use std::num::NonZeroU32;
    /// use slip_core::chain::ValidationChain;
    /// use slip_core::tokenizer::Delimiter;
    /// use slip_core::types::Slip;
    ///
    /// let two = NonZeroU32::new(2).unwrap();
    /// let slip = Slip::new("1,2", 2, 40000);
    /// let mut chain =
    ///     ValidationChain::with_unit(&slip, Delimiter::comma(), Delimiter::unsigned(), None, two);
    /// chain.bet_counts_equals_bets()?.total_amount_valid()?;
    /// # Ok::<(), slip_core::SlipError>(())
    /// ```
    pub fn with_unit(
        slip: &'a Slip,
        bet_delimiter: Delimiter,
        item_delimiter: Delimiter,
        substitution: Option<&Substitution>,
        unit: NonZeroU32,
    ) -> Self {
        let bets = tokenize(&slip.bet_detail, &bet_delimiter, &item_delimiter, substitution);
        ValidationChain {
            slip,
            bets,
            bet_delimiter,
            unit,
            state: CountState::Unprocessed,
        }
    }

    /// One bet per character, one item per character: `"0123"` → 4 bets.
    pub fn unsigned(slip: &'a Slip) -> Self {
        Self::new(slip, Delimiter::unsigned(), Delimiter::unsigned(), None)
    }

    /// Bets split by `bet_delimiter`, items split per character.
    pub fn with_bet_delimiter(slip: &'a Slip, bet_delimiter: Delimiter) -> Self {
        Self::new(slip, bet_delimiter, Delimiter::unsigned(), None)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn bets(&self) -> &Bets {
        &self.bets
    }

    pub fn bet_delimiter(&self) -> &Delimiter {
        &self.bet_delimiter
    }

    pub fn unit(&self) -> NonZeroU32 {
        self.unit
    }

    pub fn state(&self) -> CountState {
        self.state
    }

    /// The established bet count, if a count check has run.
    pub fn computed_count(&self) -> Option<u64> {
        match self.state {
            CountState::Processed { computed, .. } => Some(computed),
            CountState::Unprocessed => None,
        }
    }

    /// The expected stake, once the count is known.
    pub fn stake(&self) -> Option<StakeBreakdown> {
        self.computed_count().map(|count| StakeBreakdown {
            count,
            multiple: self.slip.multiple.get(),
            unit: self.unit.get(),
            denomination: self.slip.denomination,
        })
    }

    // =========================================================================
    // Structural Checks
    // =========================================================================

    /// The raw bet detail must contain non-whitespace text.
    pub fn bet_has_text(&mut self) -> SlipResult<&mut Self> {
        if self.slip.bet_detail.trim().is_empty() {
            return Err(structural(
                CheckName::BetHasText,
                StructuralViolation::BlankDetail,
            ));
        }
        Ok(self)
    }

    pub fn bet_length_equals(&mut self, length: usize) -> SlipResult<&mut Self> {
        self.bet_length(CheckName::BetLengthEquals, LengthBound::Equals(length))
    }

    /// Inclusive on both ends.
    pub fn bet_length_between(&mut self, min: usize, max: usize) -> SlipResult<&mut Self> {
        self.bet_length(CheckName::BetLengthBetween, LengthBound::Between(min, max))
    }

    pub fn bet_length_at_least(&mut self, length: usize) -> SlipResult<&mut Self> {
        self.bet_length(CheckName::BetLengthAtLeast, LengthBound::AtLeast(length))
    }

    pub fn bet_length_at_most(&mut self, length: usize) -> SlipResult<&mut Self> {
        self.bet_length(CheckName::BetLengthAtMost, LengthBound::AtMost(length))
    }

    pub fn item_length_equals(&mut self, length: usize) -> SlipResult<&mut Self> {
        self.item_length(CheckName::ItemLengthEquals, LengthBound::Equals(length))
    }

    pub fn item_length_between(&mut self, min: usize, max: usize) -> SlipResult<&mut Self> {
        self.item_length(CheckName::ItemLengthBetween, LengthBound::Between(min, max))
    }

    pub fn item_length_at_least(&mut self, length: usize) -> SlipResult<&mut Self> {
        self.item_length(CheckName::ItemLengthAtLeast, LengthBound::AtLeast(length))
    }

    pub fn item_length_at_most(&mut self, length: usize) -> SlipResult<&mut Self> {
        self.item_length(CheckName::ItemLengthAtMost, LengthBound::AtMost(length))
    }

    /// Every bet must contain non-whitespace text.
    pub fn bets_not_blank(&mut self) -> SlipResult<&mut Self> {
        if let Some(index) = self.bets.iter().position(is_blank) {
            return Err(structural(
                CheckName::BetsNotBlank,
                StructuralViolation::BlankBet { index },
            ));
        }
        Ok(self)
    }

    pub fn bet_not_repeat(&mut self) -> SlipResult<&mut Self> {
        let mut seen = HashSet::new();
        if let Some(value) = self.bets.iter().find(|bet| !seen.insert(*bet)) {
            return Err(structural(
                CheckName::BetNotRepeat,
                StructuralViolation::DuplicateBet {
                    value: value.to_string(),
                },
            ));
        }
        Ok(self)
    }

    /// No bet may hold the same item twice.
    pub fn item_not_repeat(&mut self) -> SlipResult<&mut Self> {
        for (bet, items) in self.bets.with_items() {
            let mut seen = HashSet::new();
            if let Some(value) = items.into_iter().find(|item| !seen.insert(*item)) {
                return Err(structural(
                    CheckName::ItemNotRepeat,
                    StructuralViolation::DuplicateItem {
                        bet: bet.to_string(),
                        value: value.to_string(),
                    },
                ));
            }
        }
        Ok(self)
    }

    /// Rejects combination slips: the raw text may hold at most one
    /// comma-separated segment, whatever the chain's bet delimiter is.
    pub fn is_single_note(&mut self) -> SlipResult<&mut Self> {
        let segments = Delimiter::comma().split(&self.slip.bet_detail).len();
        if segments > 1 {
            return Err(structural(
                CheckName::IsSingleNote,
                StructuralViolation::NotSingleNote { segments },
            ));
        }
        Ok(self)
    }

    // =========================================================================
    // Content Checks
    // =========================================================================

    /// Every bet must be made of ASCII digits only.
    pub fn bet_is_number(&mut self) -> SlipResult<&mut Self> {
        if let Some(bet) = self.bets.iter().find(|bet| !is_digits(bet)) {
            return Err(not_numeric(CheckName::BetIsNumber, bet));
        }
        Ok(self)
    }

    /// Every bet must parse as an integer within `min..=max`.
    pub fn bet_number_between(&mut self, min: i64, max: i64) -> SlipResult<&mut Self> {
        for bet in self.bets.iter() {
            check_number(CheckName::BetNumberBetween, bet, min, max)?;
        }
        Ok(self)
    }

    /// Every non-blank item must be made of ASCII digits only.
    pub fn item_is_number(&mut self) -> SlipResult<&mut Self> {
        for (_, items) in self.bets.with_items() {
            if let Some(item) = items
                .into_iter()
                .filter(|item| !is_blank(item))
                .find(|item| !is_digits(item))
            {
                return Err(not_numeric(CheckName::ItemIsNumber, item));
            }
        }
        Ok(self)
    }

    /// Every non-blank item must parse as an integer within `min..=max`.
    pub fn item_number_between(&mut self, min: i64, max: i64) -> SlipResult<&mut Self> {
        for (_, items) in self.bets.with_items() {
            for item in items.into_iter().filter(|item| !is_blank(item)) {
                check_number(CheckName::ItemNumberBetween, item, min, max)?;
            }
        }
        Ok(self)
    }

    /// Every bet must be one of `allowed`.
    ///
    /// ## Example
    /// ```rust
    /// use slip_core::chain::ValidationChain;
    /// use slip_core::tokenizer::Delimiter;
    /// use slip_core::types::Slip;
    ///
    /// let slip = Slip::new("big,odd", 2, 20000);
    /// let mut chain = ValidationChain::with_bet_delimiter(&slip, Delimiter::comma());
    /// assert!(chain.bet_in(&["big", "small", "odd", "even"]).is_ok());
    /// assert!(chain.bet_in(&["big", "small"]).is_err());
    /// ```
    pub fn bet_in<S: AsRef<str>>(&mut self, allowed: &[S]) -> SlipResult<&mut Self> {
        let permitted: HashSet<&str> = allowed.iter().map(|value| value.as_ref()).collect();
        if let Some(bet) = self.bets.iter().find(|bet| !permitted.contains(bet)) {
            return Err(SlipError::Content {
                check: CheckName::BetIn,
                violation: ContentViolation::NotAllowed {
                    value: bet.to_string(),
                    allowed: allowed.iter().map(|value| value.as_ref().to_string()).collect(),
                },
            });
        }
        Ok(self)
    }

    // =========================================================================
    // Count-Establishing Checks
    // =========================================================================

    /// Count = number of bets.
    pub fn bet_counts_equals_bets(&mut self) -> SlipResult<&mut Self> {
        let check = CheckName::BetCountsEqualsBets;
        self.ensure_count_unset(check)?;
        let computed = self.bets.len() as u64;
        self.record_count(check, computed)
    }

    /// Count = C(number of bets, `bet_length`).
    pub fn bet_counts_equals_combination(&mut self, bet_length: i64) -> SlipResult<&mut Self> {
        let check = CheckName::BetCountsEqualsCombination;
        self.ensure_count_unset(check)?;
        let computed = combination(self.bets.len() as i64, bet_length);
        self.record_count(check, computed)
    }

    /// Count = ordered picks, one item per position, with no value used
    /// twice on one pick.
    ///
    /// `"12,12"` counts 2 (`1 2`, `2 1`); `"123,234,345"` counts 14.
    pub fn bet_counts_equals_permutation_items(&mut self) -> SlipResult<&mut Self> {
        self.permutation_count(CheckName::BetCountsEqualsPermutationItems, false)
    }

    /// Count = ordered picks, one item per position, values may repeat.
    ///
    /// `"12,12"` counts 4.
    pub fn bet_counts_equals_permutation_items_with_repeat(&mut self) -> SlipResult<&mut Self> {
        self.permutation_count(CheckName::BetCountsEqualsPermutationItemsWithRepeat, true)
    }

    /// Count = total items of the bets whose text is blank. Bets with text
    /// contribute nothing.
    pub fn bet_counts_equals_sum_items(&mut self) -> SlipResult<&mut Self> {
        let check = CheckName::BetCountsEqualsSumItems;
        self.ensure_count_unset(check)?;
        let computed = self
            .bets
            .with_items()
            .filter(|(bet, _)| is_blank(bet))
            .map(|(_, items)| items.len() as u64)
            .sum();
        self.record_count(check, computed)
    }

    // =========================================================================
    // Amount Check
    // =========================================================================

    /// Declared amount must equal count × multiple × unit × denomination
    /// factor. Needs a count-establishing check first.
    pub fn total_amount_valid(&mut self) -> SlipResult<&mut Self> {
        let check = CheckName::TotalAmountValid;
        let Some(stake) = self.stake() else {
            return Err(SlipError::Sequencing {
                check,
                violation: SequencingViolation::CountNotEstablished,
            });
        };

        if !stake.matches(self.slip.bet_amount) {
            return Err(SlipError::AmountMismatch {
                check,
                declared: self.slip.bet_amount,
                expected: stake.total(),
            });
        }
        Ok(self)
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn bet_length(&mut self, check: CheckName, bound: LengthBound) -> SlipResult<&mut Self> {
        if let Some(violation) = bound.violation(Subject::Bets, self.bets.len()) {
            return Err(structural(check, violation));
        }
        Ok(self)
    }

    fn item_length(&mut self, check: CheckName, bound: LengthBound) -> SlipResult<&mut Self> {
        for (bet, items) in self.bets.with_items() {
            let subject = Subject::Items {
                bet: bet.to_string(),
            };
            if let Some(violation) = bound.violation(subject, items.len()) {
                return Err(structural(check, violation));
            }
        }
        Ok(self)
    }

    fn permutation_count(&mut self, check: CheckName, allow_repeat: bool) -> SlipResult<&mut Self> {
        self.ensure_count_unset(check)?;
        let tree = PermutationTree::build(&self.bets, allow_repeat);
        let computed = tree.total(self.bets.len());
        self.record_count(check, computed)
    }

    fn ensure_count_unset(&self, check: CheckName) -> SlipResult<()> {
        match self.state {
            CountState::Unprocessed => Ok(()),
            CountState::Processed { by, .. } => Err(SlipError::Sequencing {
                check,
                violation: SequencingViolation::CountAlreadyEstablished { by },
            }),
        }
    }

    /// Records the count, then compares it with the declared one.
    fn record_count(&mut self, check: CheckName, computed: u64) -> SlipResult<&mut Self> {
        self.state = CountState::Processed {
            computed,
            by: check,
        };

        if computed != self.slip.bet_counts {
            return Err(SlipError::CountMismatch {
                check,
                declared: self.slip.bet_counts,
                computed,
            });
        }
        Ok(self)
    }
}

fn structural(check: CheckName, violation: StructuralViolation) -> SlipError {
    SlipError::Structural { check, violation }
}

fn not_numeric(check: CheckName, value: &str) -> SlipError {
    SlipError::Content {
        check,
        violation: ContentViolation::NotNumeric {
            value: value.to_string(),
        },
    }
}

fn check_number(check: CheckName, value: &str, min: i64, max: i64) -> SlipResult<()> {
    let number: i64 = value.parse().map_err(|_| not_numeric(check, value))?;
    if number < min || number > max {
        return Err(SlipError::Content {
            check,
            violation: ContentViolation::OutOfRange {
                value: number,
                min,
                max,
            },
        });
    }
    Ok(())
}

fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

fn is_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::types::Denomination;

    fn comma_chain(slip: &Slip) -> ValidationChain<'_> {
        ValidationChain::with_bet_delimiter(slip, Delimiter::comma())
    }

    #[test]
    fn test_full_chain_passes() {
        let slip = Slip::new("01,02,03,04,05", 5, 50000);
        let mut chain = comma_chain(&slip);
        chain
            .bet_has_text()
            .and_then(|c| c.bet_is_number())
            .and_then(|c| c.bet_length_between(1, 11))
            .and_then(|c| c.item_length_equals(2))
            .and_then(|c| c.bet_not_repeat())
            .and_then(|c| c.bet_counts_equals_bets())
            .and_then(|c| c.total_amount_valid())
            .unwrap();
        assert_eq!(chain.computed_count(), Some(5));
        assert_eq!(
            chain.state(),
            CountState::Processed {
                computed: 5,
                by: CheckName::BetCountsEqualsBets
            }
        );
    }

    #[test]
    fn test_blank_detail_rejected() {
        let slip = Slip::new("   ", 0, 0);
        let err = comma_chain(&slip).bet_has_text().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::StructuralViolation);
        assert_eq!(err.check(), CheckName::BetHasText);
    }

    #[test]
    fn test_bet_length_bounds() {
        let slip = Slip::new("0123", 4, 40000);
        let mut chain = ValidationChain::unsigned(&slip);
        assert!(chain.bet_length_equals(4).is_ok());
        assert!(chain.bet_length_at_least(4).is_ok());
        assert!(chain.bet_length_at_most(4).is_ok());

        let err = chain.bet_length_equals(3).unwrap_err();
        assert_eq!(
            err,
            SlipError::Structural {
                check: CheckName::BetLengthEquals,
                violation: StructuralViolation::LengthNotEqual {
                    subject: Subject::Bets,
                    expected: 3,
                    actual: 4,
                },
            }
        );
        assert!(chain.bet_length_between(5, 9).is_err());
        assert!(chain.bet_length_at_least(5).is_err());
        assert!(chain.bet_length_at_most(3).is_err());
    }

    #[test]
    fn test_item_length_reports_offending_bet() {
        let slip = Slip::new("01 03,08,02 07", 3, 30000);
        let mut chain = ValidationChain::new(&slip, Delimiter::comma(), Delimiter::space(), None);
        assert!(chain.item_length_between(1, 2).is_ok());
        assert!(chain.item_length_at_most(2).is_ok());

        let err = chain.item_length_at_least(2).unwrap_err();
        assert_eq!(
            err,
            SlipError::Structural {
                check: CheckName::ItemLengthAtLeast,
                violation: StructuralViolation::TooShort {
                    subject: Subject::Items {
                        bet: "08".to_string()
                    },
                    min: 2,
                    actual: 1,
                },
            }
        );
        assert!(chain.item_length_equals(2).is_err());
    }

    #[test]
    fn test_bet_not_repeat() {
        let slip = Slip::new("01,01,02", 3, 30000);
        let err = comma_chain(&slip).bet_not_repeat().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::StructuralViolation);
        assert_eq!(
            err,
            SlipError::Structural {
                check: CheckName::BetNotRepeat,
                violation: StructuralViolation::DuplicateBet {
                    value: "01".to_string()
                },
            }
        );
    }

    #[test]
    fn test_item_not_repeat() {
        let slip = Slip::new("0|1,2|2", 2, 20000);
        let mut chain =
            ValidationChain::new(&slip, Delimiter::comma(), Delimiter::literal("|"), None);
        let err = chain.item_not_repeat().unwrap_err();
        assert!(matches!(
            err,
            SlipError::Structural {
                violation: StructuralViolation::DuplicateItem { ref bet, ref value },
                ..
            } if bet == "2|2" && value == "2"
        ));
    }

    #[test]
    fn test_bets_not_blank() {
        let slip = Slip::new("01 03,-,08 09", 2, 20000);
        let dash = Substitution::new("-").unwrap();
        let mut chain =
            ValidationChain::new(&slip, Delimiter::comma(), Delimiter::space(), Some(&dash));
        let err = chain.bets_not_blank().unwrap_err();
        assert_eq!(
            err,
            SlipError::Structural {
                check: CheckName::BetsNotBlank,
                violation: StructuralViolation::BlankBet { index: 1 },
            }
        );
    }

    #[test]
    fn test_is_single_note() {
        let slip = Slip::new("0123", 1, 10000);
        assert!(ValidationChain::unsigned(&slip).is_single_note().is_ok());

        let slip = Slip::new("01,23", 2, 20000);
        let err = ValidationChain::unsigned(&slip).is_single_note().unwrap_err();
        assert_eq!(
            err,
            SlipError::Structural {
                check: CheckName::IsSingleNote,
                violation: StructuralViolation::NotSingleNote { segments: 2 },
            }
        );
    }

    #[test]
    fn test_bet_is_number() {
        let slip = Slip::new("01,0a,03", 3, 30000);
        let err = comma_chain(&slip).bet_is_number().unwrap_err();
        assert_eq!(
            err,
            SlipError::Content {
                check: CheckName::BetIsNumber,
                violation: ContentViolation::NotNumeric {
                    value: "0a".to_string()
                },
            }
        );
    }

    #[test]
    fn test_item_is_number_skips_blank_items() {
        let slip = Slip::new("01  03,08 09", 2, 20000);
        let mut chain = ValidationChain::new(&slip, Delimiter::comma(), Delimiter::space(), None);
        assert!(chain.item_is_number().is_ok());
        assert!(chain.item_number_between(1, 9).is_ok());

        let slip = Slip::new("01 x3", 1, 10000);
        let mut chain = ValidationChain::new(&slip, Delimiter::comma(), Delimiter::space(), None);
        assert_eq!(chain.item_is_number().unwrap_err().check(), CheckName::ItemIsNumber);
    }

    #[test]
    fn test_number_between() {
        let slip = Slip::new("01,11,12", 3, 30000);
        let err = comma_chain(&slip).bet_number_between(1, 11).unwrap_err();
        assert_eq!(
            err,
            SlipError::Content {
                check: CheckName::BetNumberBetween,
                violation: ContentViolation::OutOfRange {
                    value: 12,
                    min: 1,
                    max: 11
                },
            }
        );

        let slip = Slip::new("01,x", 2, 20000);
        let err = comma_chain(&slip).bet_number_between(0, 99).unwrap_err();
        assert!(matches!(
            err,
            SlipError::Content {
                violation: ContentViolation::NotNumeric { .. },
                ..
            }
        ));

        let slip = Slip::new("0|10,3|4", 2, 20000);
        let mut chain =
            ValidationChain::new(&slip, Delimiter::comma(), Delimiter::literal("|"), None);
        let err = chain.item_number_between(0, 9).unwrap_err();
        assert_eq!(err.check(), CheckName::ItemNumberBetween);
    }

    #[test]
    fn test_bet_in_reports_allowed_set() {
        let slip = Slip::new("big,tiny", 2, 20000);
        let err = comma_chain(&slip).bet_in(&["big", "small"]).unwrap_err();
        assert_eq!(
            err,
            SlipError::Content {
                check: CheckName::BetIn,
                violation: ContentViolation::NotAllowed {
                    value: "tiny".to_string(),
                    allowed: vec!["big".to_string(), "small".to_string()],
                },
            }
        );
    }

    #[test]
    fn test_count_mismatch_reports_both_values() {
        let slip = Slip::new("01,02,03", 4, 40000);
        let mut chain = comma_chain(&slip);
        let err = chain.bet_counts_equals_bets().unwrap_err();
        assert_eq!(
            err,
            SlipError::CountMismatch {
                check: CheckName::BetCountsEqualsBets,
                declared: 4,
                computed: 3,
            }
        );
        // The count is recorded even when it disagrees
        assert_eq!(chain.computed_count(), Some(3));
    }

    #[test]
    fn test_combination_count() {
        // Choose 2 of 5 numbers
        let slip = Slip::new("01,02,03,04,05", 10, 100_000);
        let mut chain = comma_chain(&slip);
        chain
            .bet_counts_equals_combination(2)
            .and_then(|c| c.total_amount_valid())
            .unwrap();

        let slip = Slip::new("01,02,03,04,05", 9, 90_000);
        let err = comma_chain(&slip).bet_counts_equals_combination(2).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CountMismatch);
    }

    #[test]
    fn test_permutation_count_with_repeat() {
        let slip = Slip::new("12,12", 4, 40000);
        let mut chain = comma_chain(&slip);
        chain.bet_counts_equals_permutation_items_with_repeat().unwrap();
        assert_eq!(chain.computed_count(), Some(4));

        let slip = Slip::new("12,12", 3, 30000);
        let err = comma_chain(&slip)
            .bet_counts_equals_permutation_items_with_repeat()
            .unwrap_err();
        assert_eq!(
            err,
            SlipError::CountMismatch {
                check: CheckName::BetCountsEqualsPermutationItemsWithRepeat,
                declared: 3,
                computed: 4,
            }
        );
    }

    #[test]
    fn test_permutation_count_without_repeat() {
        let slip = Slip::new("12,12", 2, 20000);
        comma_chain(&slip).bet_counts_equals_permutation_items().unwrap();
    }

    /// Canary: the documented complex-bet example must keep counting 14.
    #[test]
    fn test_permutation_count_documented_example() {
        let slip = Slip::new("123,234,345", 14, 140_000);
        let mut chain = comma_chain(&slip);
        chain
            .bet_counts_equals_permutation_items()
            .and_then(|c| c.total_amount_valid())
            .unwrap();
        assert_eq!(chain.computed_count(), Some(14));

        let slip = Slip::new("123,234,345", 6, 60000);
        let err = comma_chain(&slip).bet_counts_equals_permutation_items().unwrap_err();
        assert_eq!(
            err,
            SlipError::CountMismatch {
                check: CheckName::BetCountsEqualsPermutationItems,
                declared: 6,
                computed: 14,
            }
        );
    }

    #[test]
    fn test_sum_items_counts_only_blank_bets() {
        let slip = Slip::new("12,345", 0, 0);
        let mut chain = comma_chain(&slip);
        chain.bet_counts_equals_sum_items().unwrap();
        assert_eq!(chain.computed_count(), Some(0));

        let slip = Slip::new("12,-,345", 1, 10000);
        let dash = Substitution::new("-").unwrap();
        let mut chain =
            ValidationChain::new(&slip, Delimiter::comma(), Delimiter::unsigned(), Some(&dash));
        chain
            .bet_counts_equals_sum_items()
            .and_then(|c| c.total_amount_valid())
            .unwrap();
    }

    #[test]
    fn test_amount_before_count_is_sequencing_error() {
        let slip = Slip::new("01,02", 2, 1);
        let err = comma_chain(&slip).total_amount_valid().unwrap_err();
        assert_eq!(
            err,
            SlipError::Sequencing {
                check: CheckName::TotalAmountValid,
                violation: SequencingViolation::CountNotEstablished,
            }
        );
    }

    #[test]
    fn test_second_count_check_is_sequencing_error() {
        let slip = Slip::new("01,02", 2, 20000);
        let mut chain = comma_chain(&slip);
        chain.bet_counts_equals_bets().unwrap();
        let err = chain.bet_counts_equals_combination(1).unwrap_err();
        assert_eq!(
            err,
            SlipError::Sequencing {
                check: CheckName::BetCountsEqualsCombination,
                violation: SequencingViolation::CountAlreadyEstablished {
                    by: CheckName::BetCountsEqualsBets
                },
            }
        );
        // The first count stands
        assert_eq!(chain.computed_count(), Some(2));
    }

    /// A zero count is still an established count.
    #[test]
    fn test_zero_count_still_guards_second_check() {
        let slip = Slip::new("12,34", 0, 0);
        let mut chain = comma_chain(&slip);
        chain.bet_counts_equals_sum_items().unwrap();
        assert!(chain.total_amount_valid().is_ok());
        assert_eq!(
            chain.bet_counts_equals_bets().unwrap_err().kind(),
            ErrorKind::SequencingError
        );
    }

    #[test]
    fn test_amount_mismatch_major() {
        let detail = "01,02,03,04,05,06,07,08,09,10";
        let slip = Slip::new(detail, 10, 100_000);
        comma_chain(&slip)
            .bet_counts_equals_bets()
            .and_then(|c| c.total_amount_valid())
            .unwrap();

        let slip = Slip::new(detail, 10, 90_000);
        let err = comma_chain(&slip)
            .bet_counts_equals_bets()
            .and_then(|c| c.total_amount_valid())
            .unwrap_err();
        assert_eq!(
            err,
            SlipError::AmountMismatch {
                check: CheckName::TotalAmountValid,
                declared: 90_000,
                expected: 100_000,
            }
        );
    }

    #[test]
    fn test_amount_uses_unit_multiple_and_denomination() {
        let slip = Slip::new("1,2,3", 3, 18_000)
            .with_multiple(NonZeroU32::new(3).unwrap())
            .with_denomination(Denomination::Minor);
        let two = NonZeroU32::new(2).unwrap();
        let mut chain =
            ValidationChain::with_unit(&slip, Delimiter::comma(), Delimiter::unsigned(), None, two);
        chain
            .bet_counts_equals_bets()
            .and_then(|c| c.total_amount_valid())
            .unwrap();
        assert_eq!(chain.unit(), two);
        assert_eq!(chain.stake().map(|stake| stake.total()), Some(18_000));
    }

    /// The unit is part of construction, so the amount check always prices
    /// with the unit the chain started with.
    #[test]
    fn test_unit_is_fixed_at_construction() {
        let slip = Slip::new("01,02,03", 3, 30_000);
        let mut chain = comma_chain(&slip);
        chain.bet_counts_equals_bets().unwrap();
        assert_eq!(chain.unit(), NonZeroU32::MIN);
        chain.total_amount_valid().unwrap();
        assert_eq!(
            chain.stake(),
            Some(StakeBreakdown {
                count: 3,
                multiple: 1,
                unit: 1,
                denomination: Denomination::Major,
            })
        );
    }

    /// A zero stake can no longer be declared: the smallest multiple and
    /// unit are 1, so an amount of 0 never matches a non-empty count.
    #[test]
    fn test_zero_amount_rejected_for_counted_slip() {
        let slip = Slip::new("01,02,03", 3, 0);
        let mut chain = comma_chain(&slip);
        let err = chain
            .bet_counts_equals_bets()
            .and_then(|c| c.total_amount_valid())
            .unwrap_err();
        assert_eq!(
            err,
            SlipError::AmountMismatch {
                check: CheckName::TotalAmountValid,
                declared: 0,
                expected: 30_000,
            }
        );
    }

    #[test]
    fn test_chain_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ValidationChain<'static>>();
        assert_send_sync::<PermutationTree>();
        assert_send_sync::<SlipError>();
    }
}
