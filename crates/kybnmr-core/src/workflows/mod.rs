//! # Workflows Module
//!
//! High-level entry points that tie the `engine` and `core` layers together.
//!
//! - **Double Check** ([`double_check`]) - removes duplicate conformers from an ensemble and
//!   reports the surviving representatives ranked by energy.

pub mod double_check;
