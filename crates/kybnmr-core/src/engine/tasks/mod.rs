//! Computational stages of a Double Check run.
//!
//! `fingerprints` precomputes the comparison data of every structure, `clustering`
//! runs the order-dependent merge scan over that data.

pub mod clustering;
pub mod fingerprints;
