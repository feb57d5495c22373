use super::traits::TextFile;
use crate::core::models::atom::{AtomRecord, RecordKind};
use nalgebra::{Point3, Vector3};
use std::io::{self, BufRead, Write};
use std::ops::Range;
use thiserror::Error;
use tracing::debug;

/// Byte range holding the three coordinate fields; everything outside it is preserved
/// verbatim when coordinates are rewritten.
pub const COORDINATE_COLUMNS: Range<usize> = 30..54;

const ALT_LOC_COLUMN: usize = 16;
const RESIDUE_NAME_COLUMNS: Range<usize> = 17..20;
const CHAIN_ID_COLUMN: usize = 21;
const RESIDUE_NUMBER_COLUMNS: Range<usize> = 22..26;
const X_COLUMNS: Range<usize> = 30..38;
const Y_COLUMNS: Range<usize> = 38..46;
const Z_COLUMNS: Range<usize> = 46..54;
const COORDINATE_WIDTH: usize = 8;

#[derive(Debug, Error)]
pub enum PdbqtError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Cannot rewrite line {line}: {source}")]
    Rewrite {
        line: usize,
        #[source]
        source: RewriteError,
    },
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum FieldError {
    #[error("Invalid float format in columns {columns} (value: '{value}')")]
    InvalidFloat { columns: &'static str, value: String },
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum RewriteError {
    #[error("Line is too short to hold coordinates ({length} bytes, need 54)")]
    LineTooShort { length: usize },
    #[error("Coordinate {value:.3} does not fit an 8-column field")]
    CoordinateOverflow { value: f64 },
}

pub(crate) fn slice_and_trim(line: &str, columns: Range<usize>) -> &str {
    line.get(columns).unwrap_or("").trim()
}

pub(crate) fn column_char(line: &str, index: usize) -> char {
    line.get(index..index + 1)
        .and_then(|s| s.chars().next())
        .unwrap_or(' ')
}

pub(crate) fn strip_line_ending(line: &str) -> &str {
    line.trim_end_matches(['\n', '\r'])
}

fn parse_coordinate(
    line: &str,
    columns: Range<usize>,
    label: &'static str,
) -> Result<f64, FieldError> {
    let raw = slice_and_trim(line, columns);
    raw.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| FieldError::InvalidFloat {
            columns: label,
            value: raw.to_string(),
        })
}

fn parse_position(line: &str) -> Result<Point3<f64>, FieldError> {
    Ok(Point3::new(
        parse_coordinate(line, X_COLUMNS, "31-38")?,
        parse_coordinate(line, Y_COLUMNS, "39-46")?,
        parse_coordinate(line, Z_COLUMNS, "47-54")?,
    ))
}

/// Parses one line into an [`AtomRecord`].
///
/// Returns `None` when the line is not an `ATOM`/`HETATM` record. A record whose
/// coordinates cannot be read yields a [`FieldError`]; a residue number that fails to parse
/// only clears [`AtomRecord::residue_number`] and keeps the record.
pub fn parse_record(line_index: usize, line: &str) -> Option<Result<AtomRecord<'_>, FieldError>> {
    let content = strip_line_ending(line);
    let kind = RecordKind::from_line(content)?;

    let residue_number_str = slice_and_trim(content, RESIDUE_NUMBER_COLUMNS);
    let residue_number = match residue_number_str.parse::<isize>() {
        Ok(number) => Some(number),
        Err(_) => {
            debug!(
                line = line_index + 1,
                value = residue_number_str,
                "Residue number in columns 23-26 is not an integer."
            );
            None
        }
    };

    Some(parse_position(content).map(|position| AtomRecord {
        line_index,
        kind,
        residue_name: slice_and_trim(content, RESIDUE_NAME_COLUMNS),
        chain_id: column_char(content, CHAIN_ID_COLUMN),
        residue_number,
        alt_loc: column_char(content, ALT_LOC_COLUMN),
        position,
        raw_line: content,
    }))
}

/// Lazily parses the atom records contained in a sequence of lines.
///
/// Non-coordinate lines are ignored and records with unreadable coordinates are skipped
/// with a debug log, so the sequence only ever yields usable atoms. The iterator is
/// single-pass; call again on the same lines for a fresh sequence.
pub fn parse_atom_records<'a, I>(lines: I) -> impl Iterator<Item = AtomRecord<'a>>
where
    I: IntoIterator<Item = &'a str>,
{
    lines
        .into_iter()
        .enumerate()
        .filter_map(|(index, line)| match parse_record(index, line)? {
            Ok(record) => Some(record),
            Err(e) => {
                debug!(line = index + 1, "Skipping atom record: {}", e);
                None
            }
        })
}

/// Replaces the three coordinate fields of a fixed-column line.
///
/// Each value is written right-justified with three decimals into its 8-column field.
/// Every byte outside [`COORDINATE_COLUMNS`], including the line terminator, is copied
/// unchanged, so the output has exactly the length of the input.
///
/// # Errors
///
/// Returns [`RewriteError::LineTooShort`] if the line cannot hold the coordinate
/// columns, or [`RewriteError::CoordinateOverflow`] if a value needs more than eight
/// characters (for example `-10000.000`).
pub fn rewrite_coordinates(line: &str, position: &Point3<f64>) -> Result<String, RewriteError> {
    let (Some(head), Some(tail)) = (
        line.get(..COORDINATE_COLUMNS.start),
        line.get(COORDINATE_COLUMNS.end..),
    ) else {
        return Err(RewriteError::LineTooShort { length: line.len() });
    };

    let mut rewritten = String::with_capacity(line.len());
    rewritten.push_str(head);
    for value in [position.x, position.y, position.z] {
        let field = format!("{:>8.3}", value);
        if field.len() != COORDINATE_WIDTH {
            return Err(RewriteError::CoordinateOverflow { value });
        }
        rewritten.push_str(&field);
    }
    rewritten.push_str(tail);
    Ok(rewritten)
}

/// The full text of a fixed-column structure file, kept line by line.
///
/// Lines retain their original terminators so that writing the structure back reproduces
/// the source byte for byte. Atom records are parsed on demand through [`Structure::atoms`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Structure {
    lines: Vec<String>,
}

impl Structure {
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.split_inclusive('\n').map(str::to_owned).collect(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Returns a fresh lazy sequence over the structure's valid atom records.
    pub fn atoms(&self) -> impl Iterator<Item = AtomRecord<'_>> {
        parse_atom_records(self.lines.iter().map(String::as_str))
    }

    /// Returns a copy of the structure with each of `atoms` moved by `delta`.
    ///
    /// `atoms` are records parsed from this structure, so a caller that already walked
    /// [`Structure::atoms`] reuses that pass. Records whose line index is out of range are
    /// ignored; every other line is carried over untouched.
    ///
    /// # Errors
    ///
    /// Returns [`PdbqtError::Rewrite`] if a moved coordinate no longer fits its column.
    pub fn translated(
        &self,
        atoms: &[AtomRecord<'_>],
        delta: &Vector3<f64>,
    ) -> Result<Self, PdbqtError> {
        let mut lines = self.lines.clone();
        for atom in atoms {
            let index = atom.line_index;
            let Some(line) = lines.get_mut(index) else {
                continue;
            };
            *line = rewrite_coordinates(line, &(atom.position + delta)).map_err(|source| {
                PdbqtError::Rewrite {
                    line: index + 1,
                    source,
                }
            })?;
        }
        Ok(Self { lines })
    }
}

/// Reader and writer for PDB/PDBQT text.
pub struct PdbqtFile;

impl TextFile for PdbqtFile {
    type Document = Structure;
    type Error = PdbqtError;

    fn read_from(reader: &mut impl BufRead) -> Result<Self::Document, Self::Error> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Ok(Structure::from_text(&text))
    }

    fn write_to(document: &Self::Document, writer: &mut impl Write) -> Result<(), Self::Error> {
        for line in document.lines() {
            writer.write_all(line.as_bytes())?;
        }
        Ok(())
    }
}
