use crate::core::models::atom::AtomRecord;
use crate::core::models::ids::{ResidueKey, ResidueKeyParseError};
use std::collections::HashSet;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("No atoms matched the residue selection")]
    NoMatchingAtoms,
}

/// Parses a comma-separated residue list such as `"A:45, A:87,B:12"`.
///
/// Empty tokens (for example from a trailing comma) are skipped. The returned keys keep
/// the input order, duplicates included.
///
/// # Errors
///
/// Returns a [`ResidueKeyParseError`] for the first token that is not a valid
/// `Chain:ResidueNumber` pair; the error carries that token verbatim.
pub fn parse_residue_list(input: &str) -> Result<Vec<ResidueKey>, ResidueKeyParseError> {
    input
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::parse::<ResidueKey>)
        .collect()
}

/// Keeps the atoms that belong to a fixed set of residues.
///
/// Membership is decided per atom by its `(chain, residue number)` key, so every atom of
/// a selected residue passes and whole residues are kept. Atoms without a readable residue
/// number never match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResidueSelector {
    targets: HashSet<ResidueKey>,
}

impl ResidueSelector {
    pub fn new<I: IntoIterator<Item = ResidueKey>>(targets: I) -> Self {
        Self {
            targets: targets.into_iter().collect(),
        }
    }

    pub fn targets(&self) -> &HashSet<ResidueKey> {
        &self.targets
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn contains(&self, atom: &AtomRecord) -> bool {
        atom.residue_key()
            .is_some_and(|key| self.targets.contains(&key))
    }

    /// Lazily filters `atoms`, preserving their order.
    pub fn select<'a, I>(&self, atoms: I) -> impl Iterator<Item = AtomRecord<'a>>
    where
        I: IntoIterator<Item = AtomRecord<'a>>,
    {
        atoms.into_iter().filter(|atom| self.contains(atom))
    }

    /// Collects the matching atoms, treating an empty result as an error.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::NoMatchingAtoms`] if no atom belongs to any target
    /// residue.
    pub fn select_required<'a, I>(&self, atoms: I) -> Result<Vec<AtomRecord<'a>>, SelectionError>
    where
        I: IntoIterator<Item = AtomRecord<'a>>,
    {
        let selected: Vec<_> = self.select(atoms).collect();
        if selected.is_empty() {
            Err(SelectionError::NoMatchingAtoms)
        } else {
            Ok(selected)
        }
    }
}

impl FromStr for ResidueSelector {
    type Err = ResidueKeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_residue_list(s).map(Self::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::pdbqt::Structure;
    use crate::core::io::pdbqt::fixtures::atom_line;
    use crate::core::models::ids::BLANK_CHAIN;

    fn receptor() -> Structure {
        let lines = [
            atom_line("ATOM", 1, ' ', "SER", 'A', 10, [0.0, 0.0, 0.0]),
            atom_line("ATOM", 2, ' ', "SER", 'A', 10, [1.0, 0.0, 0.0]),
            atom_line("ATOM", 3, ' ', "GLY", 'A', 11, [2.0, 0.0, 0.0]),
            atom_line("ATOM", 4, ' ', "SER", 'B', 10, [3.0, 0.0, 0.0]),
            atom_line("HETATM", 5, ' ', "HEM", 'A', 500, [4.0, 0.0, 0.0]),
            atom_line("ATOM", 6, ' ', "GLY", 'A', 11, [5.0, 0.0, 0.0]),
        ];
        Structure::from_text(&format!("REMARK test\n{}\nEND\n", lines.join("\n")))
    }

    #[test]
    fn parse_residue_list_tolerates_whitespace_and_empty_tokens() {
        let keys = parse_residue_list(" A:10 ,B:10,, :7 ,").unwrap();
        assert_eq!(
            keys,
            vec![
                ResidueKey::new('A', 10),
                ResidueKey::new('B', 10),
                ResidueKey::new(BLANK_CHAIN, 7)
            ]
        );
    }

    #[test]
    fn parse_residue_list_names_the_offending_token() {
        let err = parse_residue_list("A:10, A-12 ,B:3").unwrap_err();
        assert_eq!(err.token, "A-12");
        assert!(err.to_string().contains("'A-12'"));
    }

    #[test]
    fn select_keeps_whole_residues_in_file_order() {
        let structure = receptor();
        let selector: ResidueSelector = "A:11, A:10".parse().unwrap();
        let serials: Vec<usize> = selector
            .select(structure.atoms())
            .map(|a| a.line_index)
            .collect();
        assert_eq!(serials, vec![1, 2, 3, 6]);
    }

    #[test]
    fn chain_is_part_of_the_residue_identity() {
        let structure = receptor();
        let selector = ResidueSelector::new([ResidueKey::new('B', 10)]);
        let selected: Vec<_> = selector.select(structure.atoms()).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].chain_id, 'B');
    }

    #[test]
    fn selection_is_idempotent() {
        let structure = receptor();
        let selector = ResidueSelector::new([ResidueKey::new('A', 10), ResidueKey::new('A', 500)]);
        let once: Vec<_> = selector.select(structure.atoms()).collect();
        let twice: Vec<_> = selector.select(once.clone()).collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn absent_residues_are_a_no_match_error() {
        let structure = receptor();
        let selector = ResidueSelector::new([ResidueKey::new('Z', 1)]);
        assert_eq!(
            selector.select_required(structure.atoms()),
            Err(SelectionError::NoMatchingAtoms)
        );
    }

    #[test]
    fn empty_selector_matches_nothing() {
        let structure = receptor();
        let selector: ResidueSelector = " , ".parse().unwrap();
        assert!(selector.is_empty());
        assert!(selector.select_required(structure.atoms()).is_err());
    }
}
