//! # Core Models Module
//!
//! - [`atom`] - an element symbol with Cartesian coordinates
//! - [`structure`] - one conformer: atoms plus a single-point energy in Hartree
//! - [`ensemble`] - an ordered collection of conformers of the same molecule
//! - [`element`] - periodic table lookups between symbols and atomic numbers

pub mod atom;
pub mod element;
pub mod ensemble;
pub mod structure;
