//! Interfaces to the external programs a docking run depends on.
//!
//! vinabox never prepares structures, converts chemical formats or searches poses itself.
//! Workflows call these traits, and front-ends supply implementations backed by real tools
//! (or in-memory fakes in tests).

use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Failed to launch '{tool}': {source}")]
    Launch {
        tool: String,
        #[source]
        source: std::io::Error,
    },
    #[error("'{tool}' exited with {status}: {stderr}")]
    Failed {
        tool: String,
        status: ExitStatus,
        stderr: String,
    },
    #[error("'{tool}' did not produce the expected output {}", path.display())]
    MissingOutput { tool: String, path: PathBuf },
    #[error("I/O error while running '{tool}': {source}")]
    Io {
        tool: String,
        #[source]
        source: std::io::Error,
    },
}

/// Adds hydrogens and partial charges to a cleaned receptor.
pub trait StructurePreparer {
    /// Writes the prepared structure to `output` and returns its path.
    fn prepare_structure(&self, input: &Path, output: &Path) -> Result<PathBuf, ServiceError>;
}

/// Splits and converts a multi-molecule file into per-ligand PDBQT files.
pub trait FormatConverter {
    /// Returns the produced files, sorted by path.
    fn convert_format(&self, input: &Path, output_dir: &Path)
    -> Result<Vec<PathBuf>, ServiceError>;
}

/// One receptor/ligand pair to dock under a given box configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoseSearchRequest<'a> {
    pub receptor: &'a Path,
    pub ligand: &'a Path,
    pub config: &'a Path,
    pub output: &'a Path,
}

/// Searches and scores binding poses.
pub trait PoseSearcher {
    /// Docks one ligand and returns the path of the scored pose file.
    fn search_poses(&self, request: &PoseSearchRequest<'_>) -> Result<PathBuf, ServiceError>;
}
