//! # Engine Module
//!
//! The stateful logic of a Double Check run: configuration, fingerprint caching, the
//! similarity test, the representative set and the final report.
//!
//! - **Configuration** ([`config`]) - thresholds and the match policy
//! - **Similarity** ([`similarity`]) - the energy-then-geometry duplicate test
//! - **State** ([`state`]) - the representative set built during the merge scan
//! - **Report** ([`report`]) - ranked summary of the surviving representatives
//! - **Progress** ([`progress`]) - callback-based progress events
//! - **Error Handling** ([`error`]) - engine error types

pub mod cache;
pub mod config;
pub mod error;
pub mod progress;
pub mod report;
pub mod similarity;
pub mod state;
pub(crate) mod tasks;
