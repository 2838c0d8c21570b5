//! # Core Module
//!
//! Stateless building blocks: the molecular data model, geometry and unit helpers,
//! and readers/writers for the file formats the engine consumes.
//!
//! - **Models** ([`models`]) - atoms, structures, ensembles and the element table
//! - **File I/O** ([`io`]) - xyz ensembles and Gaussian output
//! - **Utilities** ([`utils`]) - distance fingerprints and Hartree/kcal conversion

pub mod io;
pub mod models;
pub mod utils;
