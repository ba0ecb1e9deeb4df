//! # Game Profiles
//!
//! A game's delimiters and check order as data, so a slip can be validated
//! from configuration instead of hand-written chains.
//!
//! ## Profile Format (TOML)
//! ```toml
//! [[games]]
//! name = "pick-three-complex"
//! bet_delimiter = "comma"
//! item_delimiter = "unsigned"
//! rules = [
//!     { check = "bet_has_text" },
//!     { check = "bet_length_equals", length = 3 },
//!     { check = "item_is_number" },
//!     { check = "bet_counts_equals_permutation_items" },
//!     { check = "total_amount_valid" },
//! ]
//! ```
//!
//! Rules run in the listed order and the first failure wins, exactly as
//! with a hand-written [`ValidationChain`].

use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;

use crate::amount::StakeBreakdown;
use crate::chain::ValidationChain;
use crate::error::{CheckName, SlipResult};
use crate::tokenizer::{Delimiter, Substitution};
use crate::types::Slip;

// =============================================================================
// Rule
// =============================================================================

/// One chain operation with its parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "check", rename_all = "snake_case")]
pub enum Rule {
    BetHasText,
    BetLengthEquals { length: usize },
    BetLengthBetween { min: usize, max: usize },
    BetLengthAtLeast { length: usize },
    BetLengthAtMost { length: usize },
    ItemLengthEquals { length: usize },
    ItemLengthBetween { min: usize, max: usize },
    ItemLengthAtLeast { length: usize },
    ItemLengthAtMost { length: usize },
    BetsNotBlank,
    BetNotRepeat,
    ItemNotRepeat,
    IsSingleNote,
    BetIsNumber,
    ItemIsNumber,
    BetNumberBetween { min: i64, max: i64 },
    ItemNumberBetween { min: i64, max: i64 },
    BetIn { values: Vec<String> },
    BetCountsEqualsBets,
    BetCountsEqualsCombination { bet_length: i64 },
    BetCountsEqualsPermutationItems,
    BetCountsEqualsPermutationItemsWithRepeat,
    BetCountsEqualsSumItems,
    TotalAmountValid,
}

impl Rule {
    /// The check this rule runs.
    pub fn name(&self) -> CheckName {
        match self {
            Rule::BetHasText => CheckName::BetHasText,
            Rule::BetLengthEquals { .. } => CheckName::BetLengthEquals,
            Rule::BetLengthBetween { .. } => CheckName::BetLengthBetween,
            Rule::BetLengthAtLeast { .. } => CheckName::BetLengthAtLeast,
            Rule::BetLengthAtMost { .. } => CheckName::BetLengthAtMost,
            Rule::ItemLengthEquals { .. } => CheckName::ItemLengthEquals,
            Rule::ItemLengthBetween { .. } => CheckName::ItemLengthBetween,
            Rule::ItemLengthAtLeast { .. } => CheckName::ItemLengthAtLeast,
            Rule::ItemLengthAtMost { .. } => CheckName::ItemLengthAtMost,
            Rule::BetsNotBlank => CheckName::BetsNotBlank,
            Rule::BetNotRepeat => CheckName::BetNotRepeat,
            Rule::ItemNotRepeat => CheckName::ItemNotRepeat,
            Rule::IsSingleNote => CheckName::IsSingleNote,
            Rule::BetIsNumber => CheckName::BetIsNumber,
            Rule::ItemIsNumber => CheckName::ItemIsNumber,
            Rule::BetNumberBetween { .. } => CheckName::BetNumberBetween,
            Rule::ItemNumberBetween { .. } => CheckName::ItemNumberBetween,
            Rule::BetIn { .. } => CheckName::BetIn,
            Rule::BetCountsEqualsBets => CheckName::BetCountsEqualsBets,
            Rule::BetCountsEqualsCombination { .. } => CheckName::BetCountsEqualsCombination,
            Rule::BetCountsEqualsPermutationItems => CheckName::BetCountsEqualsPermutationItems,
            Rule::BetCountsEqualsPermutationItemsWithRepeat => {
                CheckName::BetCountsEqualsPermutationItemsWithRepeat
            }
            Rule::BetCountsEqualsSumItems => CheckName::BetCountsEqualsSumItems,
            Rule::TotalAmountValid => CheckName::TotalAmountValid,
        }
    }

    /// True for the rules that establish the computed count.
    pub fn establishes_count(&self) -> bool {
        matches!(
            self,
            Rule::BetCountsEqualsBets
                | Rule::BetCountsEqualsCombination { .. }
                | Rule::BetCountsEqualsPermutationItems
                | Rule::BetCountsEqualsPermutationItemsWithRepeat
                | Rule::BetCountsEqualsSumItems
        )
    }
}

impl<'a> ValidationChain<'a> {
    /// Runs a single rule against this chain.
    pub fn apply(&mut self, rule: &Rule) -> SlipResult<&mut Self> {
        match rule {
            Rule::BetHasText => self.bet_has_text(),
            Rule::BetLengthEquals { length } => self.bet_length_equals(*length),
            Rule::BetLengthBetween { min, max } => self.bet_length_between(*min, *max),
            Rule::BetLengthAtLeast { length } => self.bet_length_at_least(*length),
            Rule::BetLengthAtMost { length } => self.bet_length_at_most(*length),
            Rule::ItemLengthEquals { length } => self.item_length_equals(*length),
            Rule::ItemLengthBetween { min, max } => self.item_length_between(*min, *max),
            Rule::ItemLengthAtLeast { length } => self.item_length_at_least(*length),
            Rule::ItemLengthAtMost { length } => self.item_length_at_most(*length),
            Rule::BetsNotBlank => self.bets_not_blank(),
            Rule::BetNotRepeat => self.bet_not_repeat(),
            Rule::ItemNotRepeat => self.item_not_repeat(),
            Rule::IsSingleNote => self.is_single_note(),
            Rule::BetIsNumber => self.bet_is_number(),
            Rule::ItemIsNumber => self.item_is_number(),
            Rule::BetNumberBetween { min, max } => self.bet_number_between(*min, *max),
            Rule::ItemNumberBetween { min, max } => self.item_number_between(*min, *max),
            Rule::BetIn { values } => self.bet_in(values),
            Rule::BetCountsEqualsBets => self.bet_counts_equals_bets(),
            Rule::BetCountsEqualsCombination { bet_length } => {
                self.bet_counts_equals_combination(*bet_length)
            }
            Rule::BetCountsEqualsPermutationItems => self.bet_counts_equals_permutation_items(),
            Rule::BetCountsEqualsPermutationItemsWithRepeat => {
                self.bet_counts_equals_permutation_items_with_repeat()
            }
            Rule::BetCountsEqualsSumItems => self.bet_counts_equals_sum_items(),
            Rule::TotalAmountValid => self.total_amount_valid(),
        }
    }
}

// =============================================================================
// Game Profile
// =============================================================================

/// Everything needed to validate slips of one game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameProfile {
    /// Game identifier used to route slips.
    pub name: String,

    #[serde(default = "Delimiter::unsigned")]
    pub bet_delimiter: Delimiter,

    #[serde(default = "Delimiter::unsigned")]
    pub item_delimiter: Delimiter,

    /// Pattern removed from every bet after splitting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub substitution: Option<Substitution>,

    /// Unit price per bet, at least 1.
    #[serde(default = "default_unit")]
    pub unit: NonZeroU32,

    #[serde(default)]
    pub rules: Vec<Rule>,
}

fn default_unit() -> NonZeroU32 {
    NonZeroU32::MIN
}

/// Outcome of an accepted slip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    /// Number of bet tokens after splitting.
    pub bets: usize,
    /// Set when the profile ran a count-establishing rule.
    pub computed_count: Option<u64>,
    pub stake: Option<StakeBreakdown>,
}

impl GameProfile {
    /// A fresh chain over `slip` with this profile's delimiters and unit.
    pub fn chain<'a>(&self, slip: &'a Slip) -> ValidationChain<'a> {
        ValidationChain::with_unit(
            slip,
            self.bet_delimiter.clone(),
            self.item_delimiter.clone(),
            self.substitution.as_ref(),
            self.unit,
        )
    }

    /// Runs every rule in order.
    ///
    /// ## Example
    /// ```rust
    /// use std::num::NonZeroU32;
    /// use slip_core::profile::{GameProfile, Rule};
    /// use slip_core::tokenizer::Delimiter;
    /// use slip_core::types::Slip;
    ///
    /// let profile = GameProfile {
    ///     name: "five-numbers".to_string(),
    ///     bet_delimiter: Delimiter::comma(),
    ///     item_delimiter: Delimiter::unsigned(),
    ///     substitution: None,
    ///     unit: NonZeroU32::MIN,
    ///     rules: vec![
    ///         Rule::BetNumberBetween { min: 1, max: 11 },
    ///         Rule::BetCountsEqualsCombination { bet_length: 2 },
    ///         Rule::TotalAmountValid,
    ///     ],
    /// };
    ///
    /// let verdict = profile.validate(&Slip::new("01,02,03,04,05", 10, 100_000)).unwrap();
    /// assert_eq!(verdict.computed_count, Some(10));
    /// ```
    pub fn validate(&self, slip: &Slip) -> SlipResult<Verdict> {
        let mut chain = self.chain(slip);
        for rule in &self.rules {
            chain.apply(rule)?;
        }

        Ok(Verdict {
            bets: chain.bets().len(),
            computed_count: chain.computed_count(),
            stake: chain.stake(),
        })
    }

    /// Number of rules that establish the count; more than one would make
    /// every slip fail with a sequencing error.
    pub fn count_rules(&self) -> usize {
        self.rules.iter().filter(|rule| rule.establishes_count()).count()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
