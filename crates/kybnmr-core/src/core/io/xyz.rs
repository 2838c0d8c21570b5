use crate::core::io::traits::EnsembleFile;
use crate::core::models::atom::Atom;
use crate::core::models::ensemble::Ensemble;
use crate::core::models::structure::Structure;
use nalgebra::Point3;
use std::io::{self, BufRead, Write};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum XyzError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: XyzParseErrorKind },
    #[error("File ended inside a block: expected {expected} atom rows, found {found}")]
    TruncatedBlock { expected: usize, found: usize },
}

#[derive(Debug, Error, PartialEq)]
pub enum XyzParseErrorKind {
    #[error("Invalid atom count in block header (value: '{value}')")]
    InvalidAtomCount { value: String },
    #[error("Atom row must have 4 fields (symbol x y z), found {found}")]
    InvalidFieldCount { found: usize },
    #[error("Invalid or non-finite {axis} coordinate (value: '{value}')")]
    InvalidCoordinate { axis: char, value: String },
}

enum BlockState {
    Header,
    Energy {
        count: usize,
    },
    Atoms {
        count: usize,
        energy: f64,
        atoms: Vec<Atom>,
    },
}

/// Multi-structure XYZ ensemble files as produced by xtb and crest.
///
/// Each block is an atom-count line, an energy line and one `symbol x y z` row per
/// atom. The energy line is parsed leniently: anything that is not a plain number is
/// read as `0.0`.
pub struct XyzFile;

fn parse_energy(line: &str) -> f64 {
    line.trim().parse().unwrap_or_else(|_| {
        debug!(line, "Energy line is not numeric, using 0.0.");
        0.0
    })
}

fn parse_atom_row(line: &str, line_num: usize) -> Result<Atom, XyzError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != 4 {
        return Err(XyzError::Parse {
            line: line_num,
            kind: XyzParseErrorKind::InvalidFieldCount {
                found: fields.len(),
            },
        });
    }
    let coordinate = |axis: char, value: &str| -> Result<f64, XyzError> {
        let parsed: Option<f64> = value.parse().ok().filter(|v: &f64| v.is_finite());
        parsed.ok_or_else(|| XyzError::Parse {
            line: line_num,
            kind: XyzParseErrorKind::InvalidCoordinate {
                axis,
                value: value.into(),
            },
        })
    };
    let x = coordinate('x', fields[1])?;
    let y = coordinate('y', fields[2])?;
    let z = coordinate('z', fields[3])?;
    Ok(Atom::new(fields[0], Point3::new(x, y, z)))
}

impl EnsembleFile for XyzFile {
    type Error = XyzError;

    fn read_from(reader: &mut impl BufRead) -> Result<Ensemble, Self::Error> {
        let mut ensemble = Ensemble::new();
        let mut state = BlockState::Header;

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;

            state = match state {
                BlockState::Header => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        BlockState::Header
                    } else {
                        let count = trimmed.parse().map_err(|_| XyzError::Parse {
                            line: line_num,
                            kind: XyzParseErrorKind::InvalidAtomCount {
                                value: trimmed.into(),
                            },
                        })?;
                        BlockState::Energy { count }
                    }
                }
                BlockState::Energy { count } => {
                    let energy = parse_energy(&line);
                    if count == 0 {
                        ensemble.push(Structure::new(Vec::new(), energy));
                        BlockState::Header
                    } else {
                        BlockState::Atoms {
                            count,
                            energy,
                            atoms: Vec::with_capacity(count),
                        }
                    }
                }
                BlockState::Atoms {
                    count,
                    energy,
                    mut atoms,
                } => {
                    atoms.push(parse_atom_row(&line, line_num)?);
                    if atoms.len() == count {
                        ensemble.push(Structure::new(atoms, energy));
                        BlockState::Header
                    } else {
                        BlockState::Atoms {
                            count,
                            energy,
                            atoms,
                        }
                    }
                }
            };
        }

        match state {
            BlockState::Header => Ok(ensemble),
            BlockState::Energy { count } => Err(XyzError::TruncatedBlock {
                expected: count,
                found: 0,
            }),
            BlockState::Atoms { count, atoms, .. } => Err(XyzError::TruncatedBlock {
                expected: count,
                found: atoms.len(),
            }),
        }
    }

    fn write_to(ensemble: &Ensemble, writer: &mut impl Write) -> Result<(), Self::Error> {
        for structure in ensemble {
            writeln!(writer, "  {}", structure.atom_count())?;
            writeln!(writer, "\t\t{:.8}", structure.energy)?;
            for atom in &structure.atoms {
                writeln!(
                    writer,
                    "{:>2} \t\t{:14.10} \t\t{:14.10} \t\t{:14.10}",
                    atom.symbol, atom.position.x, atom.position.y, atom.position.z
                )?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const TWO_BLOCKS: &str = "\
3
     -44.77460877
C         -2.3118744671        0.7678923498       -1.6678111578
C         -1.6215849436       -0.3434974558       -1.2274196373
C         -1.1789998859       -0.4358310737        0.0929450274
3
     -44.70000000
C         -2.3118744671        0.7678923498       -1.6678111578
C         -1.6215849436       -0.3434974558       -1.2274196373
C         -1.1789998859       -0.4358310737        0.0929450274
";

    fn read(content: &str) -> Result<Ensemble, XyzError> {
        XyzFile::read_from(&mut Cursor::new(content))
    }

    #[test]
    fn reads_every_block_in_file_order() {
        let ensemble = read(TWO_BLOCKS).unwrap();
        assert_eq!(ensemble.len(), 2);
        assert_eq!(ensemble.energies(), vec![-44.77460877, -44.7]);
        let first = ensemble.get(0).unwrap();
        assert_eq!(first.atom_count(), 3);
        assert_eq!(first.atoms[0].symbol, "C");
        assert_eq!(first.atoms[2].position.z, 0.0929450274);
    }

    #[test]
    fn non_numeric_energy_line_is_read_as_zero() {
        let content = "2\n energy: -1.5 gnorm: 0.001\nH 0 0 0\nH 0 0 0.74\n";
        let ensemble = read(content).unwrap();
        assert_eq!(ensemble.energies(), vec![0.0]);
    }

    #[test]
    fn blank_lines_between_blocks_are_skipped() {
        let content = "2\n-1.0\nH 0 0 0\nH 0 0 0.74\n\n   \n2\n-2.0\nH 0 0 0\nH 0 0 0.75\n\n";
        let ensemble = read(content).unwrap();
        assert_eq!(ensemble.len(), 2);
    }

    #[test]
    fn empty_input_yields_empty_ensemble() {
        assert!(read("").unwrap().is_empty());
    }

    #[test]
    fn invalid_header_is_reported_with_line_number() {
        let err = read("2\n-1.0\nH 0 0 0\nH 0 0 0.74\nthree\n").unwrap_err();
        match err {
            XyzError::Parse { line, kind } => {
                assert_eq!(line, 5);
                assert_eq!(
                    kind,
                    XyzParseErrorKind::InvalidAtomCount {
                        value: "three".into()
                    }
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn atom_row_with_wrong_field_count_is_rejected() {
        let err = read("2\n-1.0\nH 0 0 0\nH 0 0\n").unwrap_err();
        assert!(matches!(
            err,
            XyzError::Parse {
                line: 4,
                kind: XyzParseErrorKind::InvalidFieldCount { found: 3 }
            }
        ));
    }

    #[test]
    fn atom_row_with_bad_coordinate_is_rejected() {
        let err = read("2\n-1.0\nH 0 0 0\nH 0 abc 0\n").unwrap_err();
        assert!(matches!(
            err,
            XyzError::Parse {
                line: 4,
                kind: XyzParseErrorKind::InvalidCoordinate { axis: 'y', .. }
            }
        ));
    }

    #[test]
    fn non_finite_coordinates_are_rejected() {
        for value in ["nan", "inf", "-inf", "NaN"] {
            let content = format!("2\n-1.0\nH 0 0 0\nH 0 0 {value}\n");
            let err = read(&content).unwrap_err();
            assert!(matches!(
                err,
                XyzError::Parse {
                    line: 4,
                    kind: XyzParseErrorKind::InvalidCoordinate { axis: 'z', .. }
                }
            ));
        }
    }

    #[test]
    fn zero_count_block_yields_an_empty_structure() {
        let content = "0\n-1.0\n2\n-2.0\nH 0 0 0\nH 0 0 0.74\n";
        let ensemble = read(content).unwrap();
        assert_eq!(ensemble.len(), 2);
        assert_eq!(ensemble.get(0).unwrap().atom_count(), 0);
        assert_eq!(ensemble.get(0).unwrap().energy, -1.0);
        assert_eq!(ensemble.get(1).unwrap().atom_count(), 2);
    }

    #[test]
    fn file_ending_inside_a_block_is_truncated() {
        let err = read("3\n-1.0\nH 0 0 0\n").unwrap_err();
        assert!(matches!(
            err,
            XyzError::TruncatedBlock {
                expected: 3,
                found: 1
            }
        ));
        let err = read("3\n").unwrap_err();
        assert!(matches!(
            err,
            XyzError::TruncatedBlock {
                expected: 3,
                found: 0
            }
        ));
    }

    #[test]
    fn writer_uses_fixed_precision_columns() {
        let ensemble = Ensemble::from_structures(vec![Structure::new(
            vec![
                Atom::new("C", Point3::new(-2.3118744671, 0.7678923498, -1.6678111578)),
                Atom::new("Cl", Point3::new(1.0, 0.0, 12.5)),
            ],
            -44.77460877,
        )]);
        let mut buffer = Vec::new();
        XyzFile::write_to(&ensemble, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "  2");
        assert_eq!(lines[1], "\t\t-44.77460877");
        assert_eq!(
            lines[2],
            " C \t\t -2.3118744671 \t\t  0.7678923498 \t\t -1.6678111578"
        );
        assert_eq!(
            lines[3],
            "Cl \t\t  1.0000000000 \t\t  0.0000000000 \t\t 12.5000000000"
        );
    }

    #[test]
    fn written_file_reads_back_to_the_same_ensemble() {
        let original = read(TWO_BLOCKS).unwrap();
        let mut buffer = Vec::new();
        XyzFile::write_to(&original, &mut buffer).unwrap();
        let reread = XyzFile::read_from(&mut Cursor::new(buffer)).unwrap();
        assert_eq!(reread, original);
    }

    #[test]
    fn append_to_path_extends_existing_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("ensemble.xyz");
        let ensemble = read(TWO_BLOCKS).unwrap();

        XyzFile::write_to_path(&ensemble, &path).unwrap();
        XyzFile::append_to_path(&ensemble, &path).unwrap();
        assert_eq!(XyzFile::read_from_path(&path).unwrap().len(), 4);

        XyzFile::write_to_path(&ensemble, &path).unwrap();
        assert_eq!(XyzFile::read_from_path(&path).unwrap().len(), 2);
    }
}
