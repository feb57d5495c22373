use std::collections::HashSet;
use std::path::PathBuf;
use vinabox::core::models::ids::ResidueKey;
use vinabox::engine::config::SearchParams;

/// Where the docking receptor comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum ReceptorSource {
    /// A PDBQT receptor ready for docking.
    Prepared(PathBuf),
    /// A raw structure to clean and prepare first.
    FromStructure {
        structure: PathBuf,
        /// `None` keeps every chain.
        chains: Option<HashSet<char>>,
        keep_cofactors: bool,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub receptor: ReceptorSource,
    pub residues: Vec<ResidueKey>,
    pub padding: f64,
    pub search: SearchParams,
    pub config_out: PathBuf,
    /// Multi-ligand SDF to split into `pdbqt_dir`; without it the directory must already
    /// hold the ligands.
    pub ligand_sdf: Option<PathBuf>,
    pub pdbqt_dir: PathBuf,
    pub results_dir: PathBuf,
    pub cpu: usize,
    pub top_ligands: usize,
    pub obabel: PathBuf,
    pub vina: PathBuf,
}
