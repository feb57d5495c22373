use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;
use vinabox::engine::error::EngineError;

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileSearchConfig {
    pub exhaustiveness: Option<u32>,
    pub num_modes: Option<u32>,
    pub energy_range: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileToolsConfig {
    pub obabel: Option<PathBuf>,
    pub vina: Option<PathBuf>,
}

/// Pipeline settings as written in the TOML file; every key is optional.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileConfig {
    /// Already prepared receptor in PDBQT format.
    pub receptor: Option<PathBuf>,
    /// Raw structure that is cleaned and prepared before boxing.
    pub structure: Option<PathBuf>,
    pub chains: Option<String>,
    pub keep_cofactors: Option<bool>,
    pub residues: Option<String>,
    pub padding: Option<f64>,
    pub config_out: Option<PathBuf>,
    pub ligand_sdf: Option<PathBuf>,
    pub pdbqt_dir: Option<PathBuf>,
    pub results_dir: Option<PathBuf>,
    pub cpu: Option<usize>,
    pub top_ligands: Option<usize>,
    pub search: Option<FileSearchConfig>,
    pub tools: Option<FileToolsConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        if !path.is_file() {
            return Err(EngineError::InputNotFound {
                path: path.to_path_buf(),
            }
            .into());
        }
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }
}
