//! # KYBNMR Core Library
//!
//! Conformer ensemble handling for NMR workflows. The central operation is the
//! Double Check: collapsing a conformer ensemble to its distinct, lowest-energy members.
//!
//! ## Architecture
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Structure`, `Ensemble`),
//!   geometry fingerprints, unit conversion and file I/O (xyz ensembles, Gaussian output).
//!
//! - **[`engine`]: The Logic Core.** Configuration, the similarity test, the fingerprint
//!   cache, the representative set built during the merge scan, and the final report.
//!
//! - **[`workflows`]: The Public API.** Runs complete procedures such as
//!   [`workflows::double_check::run`].

pub mod core;
pub mod engine;
pub mod workflows;
