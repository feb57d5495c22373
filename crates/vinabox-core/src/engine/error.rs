use std::path::PathBuf;
use thiserror::Error;

use super::config::ConfigError;
use super::services::ServiceError;
use crate::core::io::pdbqt::PdbqtError;
use crate::core::io::scores::ScoreError;
use crate::core::io::vina_config::VinaConfigError;
use crate::core::models::ids::ResidueKeyParseError;
use crate::core::utils::geometry::GeometryError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Input file not found: {}", path.display())]
    InputNotFound { path: PathBuf },

    #[error(transparent)]
    MalformedResidueSpecifier(#[from] ResidueKeyParseError),

    #[error("No atoms found for the selected residues in {}", path.display())]
    NoMatchingAtoms { path: PathBuf },

    #[error("No atom coordinates to recenter in {}", path.display())]
    TranslationNoCentroid { path: PathBuf },

    #[error(
        "{} would overwrite {}, already written for {}",
        path.display(),
        output.display(),
        first.display()
    )]
    DuplicateOutput {
        path: PathBuf,
        output: PathBuf,
        first: PathBuf,
    },

    #[error("Structure error in {}: {source}", path.display())]
    Structure {
        path: PathBuf,
        #[source]
        source: PdbqtError,
    },

    #[error("Docking configuration error in {}: {source}", path.display())]
    VinaConfig {
        path: PathBuf,
        #[source]
        source: VinaConfigError,
    },

    #[error("Box geometry error: {0}")]
    Geometry(#[from] GeometryError),

    #[error("Score table error for {}: {source}", path.display())]
    Scores {
        path: PathBuf,
        #[source]
        source: ScoreError,
    },

    #[error("No docking scores found in {}", path.display())]
    NoScores { path: PathBuf },

    #[error("External tool failed: {0}")]
    Service(#[from] ServiceError),

    #[error("File I/O error for {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

impl EngineError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn structure(path: impl Into<PathBuf>, source: PdbqtError) -> Self {
        Self::Structure {
            path: path.into(),
            source,
        }
    }
}
