use super::ids::ResidueKey;
use nalgebra::Point3;
use std::fmt;

/// The two fixed-column record tags that carry atom coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    /// A standard polymer atom (`ATOM`).
    Atom,
    /// A hetero atom such as a ligand, cofactor or solvent (`HETATM`).
    Hetatm,
}

impl RecordKind {
    /// Classifies a line by its record tag.
    ///
    /// Returns `None` for every line that is not an atom-coordinate record, such as
    /// `REMARK`, `ROOT`, `BRANCH`, `TER` or `END`.
    pub fn from_line(line: &str) -> Option<Self> {
        if line.starts_with("HETATM") {
            Some(Self::Hetatm)
        } else if line.starts_with("ATOM") {
            Some(Self::Atom)
        } else {
            None
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Self::Atom => "ATOM",
            Self::Hetatm => "HETATM",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Returns `true` for the alternate-location indicators retained when a receptor is cleaned.
///
/// Only the blank indicator and `A` denote the primary conformer; every other indicator is
/// dropped. The policy is fixed and not configurable.
pub fn is_primary_alt_loc(alt_loc: char) -> bool {
    matches!(alt_loc, ' ' | 'A')
}

/// One atom-coordinate line parsed from a fixed-column structure file.
///
/// The record borrows its source line so that it can be shared across the residue
/// selector, the bounding-box computation and the coordinate translator without copying
/// the file content. The record never changes once parsed; rewriting coordinates produces
/// a new line instead.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomRecord<'a> {
    /// Zero-based index of the source line within its file.
    pub line_index: usize,
    /// Whether the line is an `ATOM` or a `HETATM` record.
    pub kind: RecordKind,
    /// The three-letter residue name, trimmed.
    pub residue_name: &'a str,
    /// The chain identifier, or a blank when the column is empty.
    pub chain_id: char,
    /// The residue sequence number; `None` when the column did not parse as an integer.
    pub residue_number: Option<isize>,
    /// The alternate-location indicator, or a blank when unset.
    pub alt_loc: char,
    /// The Cartesian coordinates in Angstroms.
    pub position: Point3<f64>,
    /// The source line without its line terminator.
    pub raw_line: &'a str,
}

impl AtomRecord<'_> {
    /// The residue this atom belongs to, if its residue number is known.
    pub fn residue_key(&self) -> Option<ResidueKey> {
        self.residue_number
            .map(|number| ResidueKey::new(self.chain_id, number))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(residue_number: Option<isize>, alt_loc: char) -> AtomRecord<'static> {
        AtomRecord {
            line_index: 0,
            kind: RecordKind::Atom,
            residue_name: "ALA",
            chain_id: 'A',
            residue_number,
            alt_loc,
            position: Point3::origin(),
            raw_line: "",
        }
    }

    #[test]
    fn record_kind_recognizes_coordinate_records_only() {
        assert_eq!(RecordKind::from_line("ATOM      1  N"), Some(RecordKind::Atom));
        assert_eq!(
            RecordKind::from_line("HETATM    1  O"),
            Some(RecordKind::Hetatm)
        );
        assert_eq!(RecordKind::from_line("REMARK VINA RESULT"), None);
        assert_eq!(RecordKind::from_line("BRANCH   1   2"), None);
        assert_eq!(RecordKind::from_line(" ATOM"), None);
    }

    #[test]
    fn record_kind_tag_matches_column_text() {
        assert_eq!(RecordKind::Atom.to_string(), "ATOM");
        assert_eq!(RecordKind::Hetatm.tag(), "HETATM");
    }

    #[test]
    fn residue_key_requires_a_residue_number() {
        assert_eq!(
            record(Some(12), ' ').residue_key(),
            Some(ResidueKey::new('A', 12))
        );
        assert_eq!(record(None, ' ').residue_key(), None);
    }

    #[test]
    fn only_blank_and_a_alt_locs_are_primary() {
        assert!(is_primary_alt_loc(' '));
        assert!(is_primary_alt_loc('A'));
        assert!(!is_primary_alt_loc('B'));
        assert!(!is_primary_alt_loc('a'));
    }
}
