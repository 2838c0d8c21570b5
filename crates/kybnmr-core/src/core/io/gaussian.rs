use crate::core::models::atom::Atom;
use crate::core::models::element;
use crate::core::models::structure::Structure;
use nalgebra::Point3;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use thiserror::Error;
use tracing::warn;

const ORIENTATION_MARKER: &str = "Standard orientation:";
const ORIENTATION_HEADER_LINES: usize = 4;
const NATOMS_MARKER: &str = "NAtoms=";
const SCF_MARKER: &str = "SCF Done:";

#[derive(Debug, Error)]
pub enum GaussianError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse {
        line: usize,
        kind: GaussianParseErrorKind,
    },
    #[error("Missing required record: {0}")]
    MissingRecord(&'static str),
    #[error("Unknown atomic number {value} on line {line}")]
    UnknownAtomicNumber { line: usize, value: u32 },
    #[error("Last orientation table has {found} rows, expected {expected}")]
    TruncatedOrientation { expected: usize, found: usize },
}

#[derive(Debug, Error, PartialEq)]
pub enum GaussianParseErrorKind {
    #[error("Invalid integer for {field} (value: '{value}')")]
    InvalidInt { field: &'static str, value: String },
    #[error("Invalid float for {field} (value: '{value}')")]
    InvalidFloat { field: &'static str, value: String },
    #[error("Orientation row must have at least 6 fields, found {found}")]
    TooFewFields { found: usize },
}

/// Reader for the final geometry of a Gaussian output log.
///
/// Gaussian prints a `Standard orientation:` table after every geometry step; only the
/// last one is kept. The atom count comes from the first `NAtoms=` record and the
/// energy from the last `SCF Done:` record.
pub struct GaussianLog;

fn parse_error(line: usize, kind: GaussianParseErrorKind) -> GaussianError {
    GaussianError::Parse { line, kind }
}

fn parse_natoms(line: &str, line_num: usize) -> Result<Option<usize>, GaussianError> {
    let Some(pos) = line.find(NATOMS_MARKER) else {
        return Ok(None);
    };
    let value = line[pos + NATOMS_MARKER.len()..]
        .split_whitespace()
        .next()
        .unwrap_or("");
    value.parse().map(Some).map_err(|_| {
        parse_error(
            line_num,
            GaussianParseErrorKind::InvalidInt {
                field: "NAtoms",
                value: value.into(),
            },
        )
    })
}

fn parse_scf_energy(line: &str, line_num: usize) -> Result<Option<f64>, GaussianError> {
    if !line.contains(SCF_MARKER) {
        return Ok(None);
    }
    let value = line
        .split_once('=')
        .and_then(|(_, rest)| rest.split_whitespace().next())
        .unwrap_or("");
    value.parse().map(Some).map_err(|_| {
        parse_error(
            line_num,
            GaussianParseErrorKind::InvalidFloat {
                field: "SCF energy",
                value: value.into(),
            },
        )
    })
}

fn parse_orientation_row(line: &str, line_num: usize) -> Result<Atom, GaussianError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 6 {
        return Err(parse_error(
            line_num,
            GaussianParseErrorKind::TooFewFields {
                found: fields.len(),
            },
        ));
    }
    let atomic_number: u32 = fields[1].parse().map_err(|_| {
        parse_error(
            line_num,
            GaussianParseErrorKind::InvalidInt {
                field: "atomic number",
                value: fields[1].into(),
            },
        )
    })?;
    let symbol =
        element::symbol_for(atomic_number).ok_or(GaussianError::UnknownAtomicNumber {
            line: line_num,
            value: atomic_number,
        })?;
    let coordinate = |field: &'static str, value: &str| -> Result<f64, GaussianError> {
        value.parse().map_err(|_| {
            parse_error(
                line_num,
                GaussianParseErrorKind::InvalidFloat {
                    field,
                    value: value.into(),
                },
            )
        })
    };
    let x = coordinate("X coordinate", fields[3])?;
    let y = coordinate("Y coordinate", fields[4])?;
    let z = coordinate("Z coordinate", fields[5])?;
    Ok(Atom::new(symbol, Point3::new(x, y, z)))
}

impl GaussianLog {
    /// Reads the final structure of a Gaussian log.
    ///
    /// # Errors
    ///
    /// Returns `GaussianError::MissingRecord` if the log has no `NAtoms=` record or no
    /// orientation table, `GaussianError::TruncatedOrientation` if the last table is
    /// shorter than the atom count, and parse errors for malformed rows.
    pub fn read_from(reader: &mut impl BufRead) -> Result<Structure, GaussianError> {
        let mut natoms: Option<usize> = None;
        let mut energy: Option<f64> = None;
        let mut current_table: Option<Vec<(usize, String)>> = None;
        let mut last_table: Option<Vec<(usize, String)>> = None;
        let mut header_lines_left = 0;

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;

            if line.contains(ORIENTATION_MARKER) {
                current_table = Some(Vec::new());
                header_lines_left = ORIENTATION_HEADER_LINES;
                continue;
            }

            if let Some(rows) = current_table.as_mut() {
                if header_lines_left > 0 {
                    header_lines_left -= 1;
                } else if line.trim_start().starts_with("---") {
                    last_table = current_table.take();
                } else {
                    rows.push((line_num, line));
                }
                continue;
            }

            if natoms.is_none() {
                natoms = parse_natoms(&line, line_num)?;
            }
            if let Some(scf) = parse_scf_energy(&line, line_num)? {
                energy = Some(scf);
            }
        }

        if current_table.is_some() {
            last_table = current_table;
        }

        let natoms = natoms.ok_or(GaussianError::MissingRecord("NAtoms"))?;
        let rows = last_table.ok_or(GaussianError::MissingRecord("Standard orientation"))?;
        if rows.len() < natoms {
            return Err(GaussianError::TruncatedOrientation {
                expected: natoms,
                found: rows.len(),
            });
        }

        let atoms = rows
            .iter()
            .take(natoms)
            .map(|(line_num, line)| parse_orientation_row(line, *line_num))
            .collect::<Result<Vec<_>, _>>()?;

        let energy = energy.unwrap_or_else(|| {
            warn!("No SCF energy found in Gaussian output, using 0.0.");
            0.0
        });

        Ok(Structure::new(atoms, energy))
    }

    /// Reads the final structure of a Gaussian log from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Structure, GaussianError> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }
}
