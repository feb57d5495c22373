use super::pdbqt::{column_char, slice_and_trim};
use crate::core::models::atom::{RecordKind, is_primary_alt_loc};
use phf::{Set, phf_set};
use std::collections::HashSet;
use std::ops::Range;

/// Residue names treated as bulk solvent and always removed.
static SOLVENT_RESIDUES: Set<&'static str> = phf_set! {
    "HOH", "WAT", "SOL",
};

/// Ligand-style torsion-tree records that a rigid receptor must not carry.
static TORSION_TAGS: Set<&'static str> = phf_set! {
    "ROOT", "ENDROOT", "BRANCH", "ENDBRANCH", "TORSDOF",
};

const RESIDUE_NAME_COLUMNS: Range<usize> = 17..20;
const ALT_LOC_COLUMN: usize = 16;
const CHAIN_ID_COLUMN: usize = 21;

const SELENOMETHIONINE: &str = "MSE";
const METHIONINE: &str = "MET";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanOptions {
    /// Chains to keep; `None` keeps every chain.
    pub chains: Option<HashSet<char>>,
    /// Keep `HETATM` records other than solvent (cofactors, ions, bound ligands).
    pub keep_cofactors: bool,
}

impl CleanOptions {
    fn keeps_chain(&self, chain_id: char) -> bool {
        self.chains
            .as_ref()
            .is_none_or(|chains| chains.contains(&chain_id))
    }
}

/// The cleaned receptor text and how many atom lines survived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cleaned {
    pub text: String,
    pub kept: usize,
    pub dropped: usize,
}

/// Reduces a raw structure to the atoms a docking receptor should contain.
///
/// Only `ATOM`/`HETATM` lines are considered; everything else (headers, `TER`, `CONECT`,
/// a trailing `END`) is discarded. An atom line is then removed when any of these hold:
///
/// - its residue name is a solvent (`HOH`, `WAT`, `SOL`);
/// - it is a `HETATM` record and cofactors are not kept;
/// - a chain list is given and its chain is not in it;
/// - its alternate-location indicator is neither blank nor `A`.
///
/// Selenomethionine (`MSE`) is renamed to `MET` in place without shifting any column.
/// The result always ends with a single `END` line.
pub fn clean_receptor(text: &str, options: &CleanOptions) -> Cleaned {
    let mut out = String::with_capacity(text.len());
    let mut kept = 0;
    let mut dropped = 0;

    for line in text.lines() {
        let Some(kind) = RecordKind::from_line(line) else {
            continue;
        };
        let residue_name = slice_and_trim(line, RESIDUE_NAME_COLUMNS);

        let keep = !SOLVENT_RESIDUES.contains(residue_name)
            && (kind == RecordKind::Atom || options.keep_cofactors)
            && options.keeps_chain(column_char(line, CHAIN_ID_COLUMN))
            && is_primary_alt_loc(column_char(line, ALT_LOC_COLUMN));
        if !keep {
            dropped += 1;
            continue;
        }

        if residue_name == SELENOMETHIONINE {
            out.push_str(&line[..RESIDUE_NAME_COLUMNS.start]);
            out.push_str(METHIONINE);
            out.push_str(&line[RESIDUE_NAME_COLUMNS.end..]);
        } else {
            out.push_str(line);
        }
        out.push('\n');
        kept += 1;
    }

    out.push_str("END\n");
    Cleaned {
        text: out,
        kept,
        dropped,
    }
}

/// Removes torsion-tree records (`ROOT`, `BRANCH`, `TORSDOF`, ...) from a prepared receptor.
///
/// Format converters emit these tags for flexible ligands; a receptor carrying them is
/// rejected by the docking engine. All other lines are copied with their terminators.
pub fn strip_torsion_tags(text: &str) -> String {
    text.split_inclusive('\n')
        .filter(|line| {
            line.split_whitespace()
                .next()
                .is_none_or(|tag| !TORSION_TAGS.contains(tag))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::pdbqt::fixtures::atom_line;

    fn raw_receptor() -> String {
        [
            "HEADER    HYDROLASE".to_string(),
            atom_line("ATOM", 1, ' ', "SER", 'A', 10, [0.0, 0.0, 0.0]),
            atom_line("ATOM", 2, 'A', "LYS", 'A', 11, [1.0, 0.0, 0.0]),
            atom_line("ATOM", 3, 'B', "LYS", 'A', 11, [1.1, 0.0, 0.0]),
            atom_line("ATOM", 4, ' ', "GLY", 'B', 5, [2.0, 0.0, 0.0]),
            atom_line("HETATM", 5, ' ', "MSE", 'A', 12, [3.0, 0.0, 0.0]),
            atom_line("HETATM", 6, ' ', "HOH", 'A', 900, [4.0, 0.0, 0.0]),
            atom_line("HETATM", 7, ' ', "ZN", 'A', 901, [5.0, 0.0, 0.0]),
            "TER".to_string(),
            "END".to_string(),
        ]
        .join("\n")
    }

    fn names(text: &str) -> Vec<String> {
        text.lines()
            .filter(|l| RecordKind::from_line(l).is_some())
            .map(|l| slice_and_trim(l, RESIDUE_NAME_COLUMNS).to_string())
            .collect()
    }

    #[test]
    fn default_options_drop_hetero_atoms_and_secondary_conformers() {
        let cleaned = clean_receptor(&raw_receptor(), &CleanOptions::default());
        assert_eq!(names(&cleaned.text), vec!["SER", "LYS", "GLY"]);
        assert_eq!(cleaned.kept, 3);
        assert_eq!(cleaned.dropped, 4);
        assert!(cleaned.text.ends_with("\nEND\n"));
        assert!(!cleaned.text.contains("HEADER"));
        assert!(!cleaned.text.contains("TER"));
    }

    #[test]
    fn keeping_cofactors_still_drops_solvent_and_renames_mse() {
        let options = CleanOptions {
            keep_cofactors: true,
            ..Default::default()
        };
        let cleaned = clean_receptor(&raw_receptor(), &options);
        assert_eq!(names(&cleaned.text), vec!["SER", "LYS", "GLY", "MET", "ZN"]);
    }

    #[test]
    fn mse_rename_preserves_column_layout() {
        let line = atom_line("HETATM", 5, ' ', "MSE", 'A', 12, [3.0, 0.0, 0.0]);
        let options = CleanOptions {
            keep_cofactors: true,
            ..Default::default()
        };
        let cleaned = clean_receptor(&line, &options);
        let renamed = cleaned.text.lines().next().unwrap();
        assert_eq!(renamed.len(), line.len());
        assert_eq!(&renamed[..17], &line[..17]);
        assert_eq!(&renamed[17..20], "MET");
        assert_eq!(&renamed[20..], &line[20..]);
    }

    #[test]
    fn chain_filter_keeps_only_requested_chains() {
        let options = CleanOptions {
            chains: Some(HashSet::from(['B'])),
            keep_cofactors: false,
        };
        let cleaned = clean_receptor(&raw_receptor(), &options);
        assert_eq!(names(&cleaned.text), vec!["GLY"]);
    }

    #[test]
    fn empty_input_still_gets_an_end_record() {
        let cleaned = clean_receptor("", &CleanOptions::default());
        assert_eq!(cleaned.text, "END\n");
        assert_eq!(cleaned.kept, 0);
    }

    #[test]
    fn torsion_tags_are_removed_and_atoms_kept() {
        let atom = atom_line("ATOM", 1, ' ', "SER", 'A', 10, [0.0, 0.0, 0.0]);
        let text = format!("REMARK x\nROOT\n{atom}\nENDROOT\nBRANCH   1   2\nENDBRANCH   1   2\nTORSDOF 1\nEND\n");
        assert_eq!(strip_torsion_tags(&text), format!("REMARK x\n{atom}\nEND\n"));
    }

    #[test]
    fn torsion_tag_match_is_on_the_whole_record_name() {
        let text = "ROOTS are not tags\n\nBRANCHING\n";
        assert_eq!(strip_torsion_tags(text), text);
    }
}
