//! # slip-check
//!
//! Batch checker for wagering slips, built on `slip-core`.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         slip-check Modules                              │
//! │                                                                         │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────────┐│
//! │  │  config        │  │  report        │  │  error                     ││
//! │  │                │  │                │  │                            ││
//! │  │ • TOML games   │  │ • parse line   │  │ • CheckerError             ││
//! │  │ • env override │  │ • route game   │  │ • report kinds             ││
//! │  │ • validate     │  │ • JSON report  │  │                            ││
//! │  └────────────────┘  └────────────────┘  └────────────────────────────┘│
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables:
//! - `SLIPCHECK_CONFIG` - Path of the TOML config file
//! - `SLIPCHECK_DEFAULT_GAME` - Game used for bare slips
//! - `SLIPCHECK_LOG_LEVEL` - Log level when `RUST_LOG` is unset
//! - `RUST_LOG` - Full `tracing` filter

pub mod config;
pub mod error;
pub mod report;

// Re-exports
pub use config::CheckerConfig;
pub use error::{CheckerError, CheckerResult};
pub use report::{Checker, Report, Summary};
