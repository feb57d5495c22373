use nalgebra::Point3;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid center '{0}'. Expected three comma-separated numbers 'x,y,z'.")]
    InvalidCenter(String),

    #[error("Invalid chain '{0}' in chain list. Chain identifiers are single characters.")]
    InvalidChain(String),

    #[error("Invalid --set format: '{0}'. Expected KEY=VALUE.")]
    InvalidKeyValue(String),
}

/// Parses a target center written as `x,y,z`.
pub fn parse_center(input: &str) -> Result<Point3<f64>, ParseError> {
    let values = input
        .split(',')
        .map(|part| part.trim().parse::<f64>().ok().filter(|v| v.is_finite()))
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| ParseError::InvalidCenter(input.to_string()))?;

    match values.as_slice() {
        [x, y, z] => Ok(Point3::new(*x, *y, *z)),
        _ => Err(ParseError::InvalidCenter(input.to_string())),
    }
}

/// Parses a chain list such as `A,B` into a set of chain identifiers.
///
/// Returns `None` for a list with no chains at all, meaning "keep every chain".
pub fn parse_chain_list(input: &str) -> Result<Option<HashSet<char>>, ParseError> {
    let mut chains = HashSet::new();
    for token in input.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let mut chars = token.chars();
        match (chars.next(), chars.next()) {
            (Some(chain), None) => {
                chains.insert(chain);
            }
            _ => return Err(ParseError::InvalidChain(token.to_string())),
        }
    }
    Ok((!chains.is_empty()).then_some(chains))
}

/// Splits a `KEY=VALUE` override into its trimmed parts.
pub fn parse_key_value(input: &str) -> Result<(&str, &str), ParseError> {
    input
        .split_once('=')
        .map(|(key, value)| (key.trim(), value.trim()))
        .filter(|(key, _)| !key.is_empty())
        .ok_or_else(|| ParseError::InvalidKeyValue(input.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_accepts_signed_values_with_spaces() {
        assert_eq!(
            parse_center(" -1.5, 2 ,30.125").unwrap(),
            Point3::new(-1.5, 2.0, 30.125)
        );
    }

    #[test]
    fn center_rejects_wrong_arity_and_garbage() {
        for bad in ["1,2", "1,2,3,4", "1,two,3", "", "1,2,inf"] {
            assert_eq!(
                parse_center(bad),
                Err(ParseError::InvalidCenter(bad.to_string())),
                "input {bad:?}"
            );
        }
    }

    #[test]
    fn chain_list_collects_single_characters() {
        let chains = parse_chain_list("A, B,,A").unwrap().unwrap();
        assert_eq!(chains, HashSet::from(['A', 'B']));
    }

    #[test]
    fn empty_chain_list_means_all_chains() {
        assert_eq!(parse_chain_list(" , ").unwrap(), None);
    }

    #[test]
    fn multi_character_chain_is_rejected() {
        assert_eq!(
            parse_chain_list("A,BC"),
            Err(ParseError::InvalidChain("BC".to_string()))
        );
    }

    #[test]
    fn key_value_splits_on_the_first_equals_sign() {
        assert_eq!(
            parse_key_value("tools.vina = /opt/vina=1.2").unwrap(),
            ("tools.vina", "/opt/vina=1.2")
        );
        assert!(parse_key_value("padding").is_err());
        assert!(parse_key_value("=5").is_err());
    }
}
