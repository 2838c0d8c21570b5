use crate::core::models::ensemble::Ensemble;
use crate::core::utils::units::hartree_to_kcal_mol;
use serde::Serialize;
use std::fmt;
use std::io::Write;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to write CSV report: {0}")]
    Csv(#[from] csv::Error),
    #[error("I/O error while writing report: {0}")]
    Io(#[from] std::io::Error),
}

/// One representative in the final, energy-ordered set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportEntry {
    /// 1-based position in the sorted output.
    pub rank: usize,
    /// 0-based position of the structure in the input ensemble.
    pub source_index: usize,
    pub energy_hartree: f64,
    pub relative_energy_kcal_mol: f64,
}

/// Summary of a Double Check run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub input_count: usize,
    pub representative_count: usize,
    pub min_energy: f64,
    pub replaced: usize,
    pub discarded: usize,
    pub entries: Vec<ReportEntry>,
}

impl Report {
    /// Builds the report over representatives that are already sorted by ascending energy.
    ///
    /// `source_indices[i]` is the input position of `representatives[i]`.
    pub fn build(
        input_count: usize,
        representatives: &Ensemble,
        source_indices: &[usize],
        replaced: usize,
        discarded: usize,
    ) -> Self {
        let energies = representatives.energies();
        let min_energy = energies.iter().copied().fold(f64::INFINITY, f64::min);

        let entries = energies
            .into_iter()
            .zip(source_indices)
            .enumerate()
            .map(|(i, (energy, &source_index))| ReportEntry {
                rank: i + 1,
                source_index,
                energy_hartree: energy,
                relative_energy_kcal_mol: hartree_to_kcal_mol(energy - min_energy),
            })
            .collect::<Vec<_>>();

        Self {
            input_count,
            representative_count: entries.len(),
            min_energy,
            replaced,
            discarded,
            entries,
        }
    }

    pub fn removed_count(&self) -> usize {
        self.input_count - self.representative_count
    }

    /// Writes one row per representative with a header line.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), ReportError> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for entry in &self.entries {
            csv_writer.serialize(entry)?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Double Check: {} structure(s) in, {} representative(s) out ({} replaced, {} discarded)",
            self.input_count, self.representative_count, self.replaced, self.discarded
        )?;
        writeln!(f, "Minimum energy: {:.8} Hartree", self.min_energy)?;
        writeln!(
            f,
            "{:>6}  {:>8}  {:>18}  {:>14}",
            "Rank", "Source", "Energy (Hartree)", "dE (kcal/mol)"
        )?;
        for entry in &self.entries {
            writeln!(
                f,
                "{:>6}  {:>8}  {:>18.8}  {:>14.4}",
                entry.rank, entry.source_index, entry.energy_hartree, entry.relative_energy_kcal_mol
            )?;
        }
        Ok(())
    }
}
