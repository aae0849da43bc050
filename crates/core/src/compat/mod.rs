//! CDJ compatibility rules and evaluation.
//!
//! The rule table is fixed at compile time. Every supported format lists the
//! sample rates, bit depths, channel counts and bitrate range that a CDJ will
//! play; [`evaluate`] compares a file's [`AudioProperties`] against it and
//! returns the violated constraints in a stable order.
//!
//! # Example
//!
//! ```
//! use cdjcheck_core::compat::{evaluate, AudioProperties};
//!
//! let props = AudioProperties {
//!     file_type: ".wav".to_string(),
//!     sample_rate: Some(44100),
//!     bit_depth: Some(16),
//!     channels: Some(2),
//!     bitrate_kbps: None,
//! };
//! assert!(evaluate(&props).is_compatible());
//! ```

mod evaluator;
mod rules;
mod types;

pub use evaluator::{evaluate, evaluate_against};
pub use rules::{BitrateRange, CompatibilityRule};
pub use types::{AudioProperties, Compatibility, FormatKey, Issue};
