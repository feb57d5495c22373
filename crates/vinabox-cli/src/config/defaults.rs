use std::path::PathBuf;

pub struct DefaultsConfig {
    pub padding: f64,
    pub config_out: PathBuf,
    pub cpu: usize,
    pub top_ligands: usize,
    pub pdbqt_dir: PathBuf,
    pub results_dir: PathBuf,
    pub obabel: PathBuf,
    pub vina: PathBuf,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            padding: vinabox::engine::config::DEFAULT_PADDING,
            config_out: PathBuf::from("vina_config.txt"),
            cpu: 8,
            top_ligands: 5,
            pdbqt_dir: PathBuf::from("pdbqt_files"),
            results_dir: PathBuf::from("results"),
            obabel: PathBuf::from("obabel"),
            vina: PathBuf::from("vina"),
        }
    }
}
