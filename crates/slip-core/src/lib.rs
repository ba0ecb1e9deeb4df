//! # slip-core: Pure Validation Logic for Wagering Slips
//!
//! This crate decides whether a submitted slip is internally consistent:
//! well-formed bet text, a declared bet count that matches the text, and a
//! declared amount that matches count × multiple × unit × denomination.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Slip Check Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 slip-check (CLI, JSON lines)                    │   │
//! │  │    config (TOML games) ──► read slip ──► write report          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ GameProfile::validate                  │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ slip-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ tokenizer │  │   chain   │  │   tree    │  │  amount   │  │   │
//! │  │   │ Delimiter │  │ checks +  │  │ complex   │  │  Stake    │  │   │
//! │  │   │   Bets    │  │ CountState│  │  counts   │  │ Breakdown │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO LOGGING • NO GLOBAL STATE • PURE FUNCTIONS       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - The slip record and its denomination
//! - [`tokenizer`] - Delimiters, substitution, bets and items
//! - [`chain`] - The fluent validation chain
//! - [`combinatorics`] - Binomial coefficients
//! - [`tree`] - Permutation tree for complex bets
//! - [`amount`] - Expected stake arithmetic
//! - [`profile`] - Game profiles as data
//! - [`error`] - Typed rejections
//!
//! ## Example Usage
//!
//! ```rust
//! use slip_core::{Delimiter, Slip, ValidationChain};
//!
//! // 3 positions, 14 distinct single bets, 1 yuan each
//! let slip = Slip::new("123,234,345", 14, 140_000);
//! let mut chain = ValidationChain::with_bet_delimiter(&slip, Delimiter::comma());
//! chain
//!     .bet_length_equals(3)?
//!     .item_is_number()?
//!     .bet_counts_equals_permutation_items()?
//!     .total_amount_valid()?;
//!
//! assert_eq!(chain.computed_count(), Some(14));
//! # Ok::<(), slip_core::SlipError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod amount;
pub mod chain;
pub mod combinatorics;
pub mod error;
pub mod profile;
pub mod tokenizer;
pub mod tree;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use amount::StakeBreakdown;
pub use chain::{CountState, ValidationChain};
pub use combinatorics::combination;
pub use error::{CheckName, ErrorKind, SlipError, SlipResult};
pub use profile::{GameProfile, Rule, Verdict};
pub use tokenizer::{tokenize, Bets, Delimiter, Substitution};
pub use tree::PermutationTree;
pub use types::{Denomination, Slip};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Smallest currency units per major unit (yuan).
pub const MAJOR_FACTOR: u64 = 10_000;

/// Smallest currency units per minor unit (jiao).
pub const MINOR_FACTOR: u64 = 1_000;
