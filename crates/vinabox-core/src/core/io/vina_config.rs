use super::traits::TextFile;
use crate::core::utils::geometry::BoundingBox;
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The search-effort parameters appended after the box geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct SearchParams {
    pub exhaustiveness: u32,
    pub num_modes: u32,
    pub energy_range: f64,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            exhaustiveness: 8,
            num_modes: 9,
            energy_range: 3.0,
        }
    }
}

#[derive(Debug, Error)]
pub enum VinaConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Line {line} is not a 'key = value' pair")]
    MalformedLine { line: usize },
    #[error("Invalid value for '{key}': '{value}'")]
    InvalidValue { key: &'static str, value: String },
    #[error("Missing required key '{0}'")]
    MissingKey(&'static str),
}

/// A docking-engine configuration: receptor, box geometry and search effort.
///
/// Its text form is a deterministic block of `key = value` lines written in a fixed order,
/// with the box center and size rounded to three decimals.
#[derive(Debug, Clone, PartialEq)]
pub struct VinaConfig {
    pub receptor: PathBuf,
    pub center: Point3<f64>,
    pub size: Vector3<f64>,
    pub search: SearchParams,
}

impl VinaConfig {
    pub fn new(receptor: impl Into<PathBuf>, bbox: &BoundingBox, search: SearchParams) -> Self {
        Self {
            receptor: receptor.into(),
            center: bbox.center(),
            size: bbox.size(),
            search,
        }
    }
}

impl fmt::Display for VinaConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "receptor = {}", self.receptor.display())?;
        writeln!(f, "center_x = {:.3}", self.center.x)?;
        writeln!(f, "center_y = {:.3}", self.center.y)?;
        writeln!(f, "center_z = {:.3}", self.center.z)?;
        writeln!(f, "size_x = {:.3}", self.size.x)?;
        writeln!(f, "size_y = {:.3}", self.size.y)?;
        writeln!(f, "size_z = {:.3}", self.size.z)?;
        writeln!(f, "exhaustiveness = {}", self.search.exhaustiveness)?;
        writeln!(f, "num_modes = {}", self.search.num_modes)?;
        writeln!(f, "energy_range = {}", self.search.energy_range)
    }
}

fn read_pairs(reader: &mut impl BufRead) -> Result<HashMap<String, String>, VinaConfigError> {
    let mut pairs = HashMap::new();
    for (line_num, line_res) in reader.lines().enumerate() {
        let line = line_res?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let (key, value) = trimmed
            .split_once('=')
            .ok_or(VinaConfigError::MalformedLine { line: line_num + 1 })?;
        pairs.insert(key.trim().to_string(), value.trim().to_string());
    }
    Ok(pairs)
}

fn required<'a>(
    pairs: &'a HashMap<String, String>,
    key: &'static str,
) -> Result<&'a str, VinaConfigError> {
    pairs
        .get(key)
        .map(String::as_str)
        .ok_or(VinaConfigError::MissingKey(key))
}

fn parse_value<T: std::str::FromStr>(
    pairs: &HashMap<String, String>,
    key: &'static str,
) -> Result<T, VinaConfigError> {
    let raw = required(pairs, key)?;
    raw.parse().map_err(|_| VinaConfigError::InvalidValue {
        key,
        value: raw.to_string(),
    })
}

fn parse_coordinate(
    pairs: &HashMap<String, String>,
    key: &'static str,
) -> Result<f64, VinaConfigError> {
    let value: f64 = parse_value(pairs, key)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(VinaConfigError::InvalidValue {
            key,
            value: value.to_string(),
        })
    }
}

fn parse_center(pairs: &HashMap<String, String>) -> Result<Point3<f64>, VinaConfigError> {
    Ok(Point3::new(
        parse_coordinate(pairs, "center_x")?,
        parse_coordinate(pairs, "center_y")?,
        parse_coordinate(pairs, "center_z")?,
    ))
}

/// Reads only the box center back from a configuration file.
///
/// Unknown keys and the remaining geometry are ignored, so hand-written engine configs
/// work as long as the three `center_*` keys are present.
pub fn read_center<P: AsRef<Path>>(path: P) -> Result<Point3<f64>, VinaConfigError> {
    let file = std::fs::File::open(path)?;
    let pairs = read_pairs(&mut io::BufReader::new(file))?;
    parse_center(&pairs)
}

/// Reader and writer for docking-engine configuration text.
pub struct VinaConfigFile;

impl TextFile for VinaConfigFile {
    type Document = VinaConfig;
    type Error = VinaConfigError;

    fn read_from(reader: &mut impl BufRead) -> Result<Self::Document, Self::Error> {
        let pairs = read_pairs(reader)?;
        Ok(VinaConfig {
            receptor: PathBuf::from(required(&pairs, "receptor")?),
            center: parse_center(&pairs)?,
            size: Vector3::new(
                parse_coordinate(&pairs, "size_x")?,
                parse_coordinate(&pairs, "size_y")?,
                parse_coordinate(&pairs, "size_z")?,
            ),
            search: SearchParams {
                exhaustiveness: parse_value(&pairs, "exhaustiveness")?,
                num_modes: parse_value(&pairs, "num_modes")?,
                energy_range: parse_value(&pairs, "energy_range")?,
            },
        })
    }

    fn write_to(document: &Self::Document, writer: &mut impl Write) -> Result<(), Self::Error> {
        write!(writer, "{}", document)?;
        Ok(())
    }
}
