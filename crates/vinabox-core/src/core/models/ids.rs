use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The character used for a blank chain identifier column.
pub const BLANK_CHAIN: char = ' ';

/// Identifies one residue inside a structure by its chain and sequence number.
///
/// This is the unit of residue selection: every atom sharing the same chain identifier
/// and residue number belongs to the same residue. Uniqueness is only meaningful within a
/// single model of a structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResidueKey {
    /// The chain identifier; [`BLANK_CHAIN`] when the column is empty.
    pub chain_id: char,
    /// The residue sequence number.
    pub residue_number: isize,
}

impl ResidueKey {
    pub fn new(chain_id: char, residue_number: isize) -> Self {
        Self {
            chain_id,
            residue_number,
        }
    }
}

impl fmt::Display for ResidueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.chain_id == BLANK_CHAIN {
            write!(f, ":{}", self.residue_number)
        } else {
            write!(f, "{}:{}", self.chain_id, self.residue_number)
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Invalid residue specifier: '{token}'. Use format Chain:ResidueNumber")]
pub struct ResidueKeyParseError {
    /// The offending token, verbatim.
    pub token: String,
}

impl FromStr for ResidueKey {
    type Err = ResidueKeyParseError;

    /// Parses a `Chain:ResidueNumber` token such as `A:145`.
    ///
    /// Whitespace around the token and around either component is ignored. An empty
    /// chain component (`:12`) selects residues with a blank chain identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ResidueKeyParseError`] carrying the untouched input when the separator is
    /// missing, the chain component is longer than one character, or the residue number
    /// is not an integer.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ResidueKeyParseError {
            token: s.to_string(),
        };

        let (chain, number) = s.trim().split_once(':').ok_or_else(malformed)?;

        let mut chain_chars = chain.trim().chars();
        let chain_id = match (chain_chars.next(), chain_chars.next()) {
            (None, _) => BLANK_CHAIN,
            (Some(c), None) => c,
            (Some(_), Some(_)) => return Err(malformed()),
        };
        let residue_number = number.trim().parse().map_err(|_| malformed())?;

        Ok(Self::new(chain_id, residue_number))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_chain_and_residue_number() {
        assert_eq!("A:145".parse::<ResidueKey>(), Ok(ResidueKey::new('A', 145)));
        assert_eq!("  B : -3 ".parse::<ResidueKey>(), Ok(ResidueKey::new('B', -3)));
    }

    #[test]
    fn empty_chain_component_maps_to_blank_chain() {
        assert_eq!(":12".parse::<ResidueKey>(), Ok(ResidueKey::new(BLANK_CHAIN, 12)));
    }

    #[test]
    fn missing_separator_reports_token_verbatim() {
        let err = "A-12".parse::<ResidueKey>().unwrap_err();
        assert_eq!(err.token, "A-12");
        assert!(err.to_string().contains("'A-12'"));
    }

    #[test]
    fn non_integer_residue_number_is_rejected() {
        assert!("A:12b".parse::<ResidueKey>().is_err());
        assert!("A:".parse::<ResidueKey>().is_err());
        assert!("A:1:2".parse::<ResidueKey>().is_err());
    }

    #[test]
    fn multi_character_chain_is_rejected() {
        let err = "AB:4".parse::<ResidueKey>().unwrap_err();
        assert_eq!(err.token, "AB:4");
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for key in [ResidueKey::new('C', 7), ResidueKey::new(BLANK_CHAIN, 88)] {
            assert_eq!(key.to_string().parse::<ResidueKey>(), Ok(key));
        }
    }
}
