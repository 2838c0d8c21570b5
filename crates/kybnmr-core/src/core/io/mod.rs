//! Readers and writers for conformer ensembles.
//!
//! [`xyz`] handles multi-structure xyz files through the [`traits::EnsembleFile`]
//! interface; [`gaussian`] extracts the final geometry and SCF energy from a Gaussian log.

pub mod gaussian;
pub mod traits;
pub mod xyz;
