use crate::core::models::ids::ResidueKey;
use nalgebra::Point3;
use std::path::PathBuf;
use thiserror::Error;

pub use crate::core::io::vina_config::SearchParams;

/// Padding added on every side of the selected residues, in Angstroms.
pub const DEFAULT_PADDING: f64 = 5.0;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DockingBoxConfig {
    pub receptor_path: PathBuf,
    pub residues: Vec<ResidueKey>,
    pub padding: f64,
    pub output_path: PathBuf,
    pub search: SearchParams,
}

#[derive(Default)]
pub struct DockingBoxConfigBuilder {
    receptor_path: Option<PathBuf>,
    residues: Option<Vec<ResidueKey>>,
    padding: Option<f64>,
    output_path: Option<PathBuf>,
    search: Option<SearchParams>,
}

impl DockingBoxConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn receptor_path(mut self, path: PathBuf) -> Self {
        self.receptor_path = Some(path);
        self
    }
    pub fn residues(mut self, residues: Vec<ResidueKey>) -> Self {
        self.residues = Some(residues);
        self
    }
    pub fn padding(mut self, padding: f64) -> Self {
        self.padding = Some(padding);
        self
    }
    pub fn output_path(mut self, path: PathBuf) -> Self {
        self.output_path = Some(path);
        self
    }
    pub fn search(mut self, search: SearchParams) -> Self {
        self.search = Some(search);
        self
    }

    pub fn build(self) -> Result<DockingBoxConfig, ConfigError> {
        let padding = self.padding.unwrap_or(DEFAULT_PADDING);
        if !padding.is_finite() || padding < 0.0 {
            return Err(ConfigError::InvalidParameter {
                name: "padding",
                reason: format!("expected a non-negative distance, got {padding}"),
            });
        }

        Ok(DockingBoxConfig {
            receptor_path: self
                .receptor_path
                .ok_or(ConfigError::MissingParameter("receptor_path"))?,
            residues: self
                .residues
                .ok_or(ConfigError::MissingParameter("residues"))?,
            padding,
            output_path: self
                .output_path
                .ok_or(ConfigError::MissingParameter("output_path"))?,
            search: self.search.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecenterConfig {
    pub target: Point3<f64>,
    pub ligand_paths: Vec<PathBuf>,
    /// Directory for the moved ligands; `None` rewrites each ligand in place.
    pub output_dir: Option<PathBuf>,
}

#[derive(Default)]
pub struct RecenterConfigBuilder {
    target: Option<Point3<f64>>,
    ligand_paths: Vec<PathBuf>,
    output_dir: Option<PathBuf>,
}

impl RecenterConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target(mut self, target: Point3<f64>) -> Self {
        self.target = Some(target);
        self
    }
    pub fn ligand_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.ligand_paths = paths;
        self
    }
    pub fn add_ligand(mut self, path: PathBuf) -> Self {
        self.ligand_paths.push(path);
        self
    }
    pub fn output_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.output_dir = dir;
        self
    }

    pub fn build(self) -> Result<RecenterConfig, ConfigError> {
        let target = self.target.ok_or(ConfigError::MissingParameter("target"))?;
        if !target.iter().all(|c| c.is_finite()) {
            return Err(ConfigError::InvalidParameter {
                name: "target",
                reason: "coordinates must be finite".to_string(),
            });
        }
        Ok(RecenterConfig {
            target,
            ligand_paths: self.ligand_paths,
            output_dir: self.output_dir,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DockConfig {
    pub receptor_path: PathBuf,
    pub config_path: PathBuf,
    pub ligand_dir: PathBuf,
    pub results_dir: PathBuf,
}

#[derive(Default)]
pub struct DockConfigBuilder {
    receptor_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
    ligand_dir: Option<PathBuf>,
    results_dir: Option<PathBuf>,
}

impl DockConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn receptor_path(mut self, path: PathBuf) -> Self {
        self.receptor_path = Some(path);
        self
    }
    pub fn config_path(mut self, path: PathBuf) -> Self {
        self.config_path = Some(path);
        self
    }
    pub fn ligand_dir(mut self, dir: PathBuf) -> Self {
        self.ligand_dir = Some(dir);
        self
    }
    pub fn results_dir(mut self, dir: PathBuf) -> Self {
        self.results_dir = Some(dir);
        self
    }

    pub fn build(self) -> Result<DockConfig, ConfigError> {
        Ok(DockConfig {
            receptor_path: self
                .receptor_path
                .ok_or(ConfigError::MissingParameter("receptor_path"))?,
            config_path: self
                .config_path
                .ok_or(ConfigError::MissingParameter("config_path"))?,
            ligand_dir: self
                .ligand_dir
                .ok_or(ConfigError::MissingParameter("ligand_dir"))?,
            results_dir: self
                .results_dir
                .ok_or(ConfigError::MissingParameter("results_dir"))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn docking_box_builder_fills_defaults() {
        let config = DockingBoxConfigBuilder::new()
            .receptor_path("rec.pdbqt".into())
            .residues(vec![ResidueKey::new('A', 1)])
            .output_path("vina_config.txt".into())
            .build()
            .unwrap();
        assert_eq!(config.padding, DEFAULT_PADDING);
        assert_eq!(config.search, SearchParams::default());
    }

    #[test]
    fn docking_box_builder_names_the_missing_parameter() {
        let err = DockingBoxConfigBuilder::new()
            .receptor_path("rec.pdbqt".into())
            .output_path("out.txt".into())
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::MissingParameter("residues"));
    }

    #[test]
    fn negative_padding_is_rejected() {
        let err = DockingBoxConfigBuilder::new()
            .receptor_path("rec.pdbqt".into())
            .residues(vec![])
            .padding(-1.0)
            .output_path("out.txt".into())
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidParameter { name: "padding", .. }
        ));
    }

    #[test]
    fn recenter_builder_requires_a_finite_target() {
        assert_eq!(
            RecenterConfigBuilder::new().build().unwrap_err(),
            ConfigError::MissingParameter("target")
        );
        assert!(
            RecenterConfigBuilder::new()
                .target(Point3::new(f64::NAN, 0.0, 0.0))
                .build()
                .is_err()
        );
    }

    #[test]
    fn recenter_builder_collects_ligands_in_order() {
        let config = RecenterConfigBuilder::new()
            .target(Point3::origin())
            .add_ligand("a.pdbqt".into())
            .add_ligand("b.pdbqt".into())
            .build()
            .unwrap();
        assert_eq!(
            config.ligand_paths,
            vec![PathBuf::from("a.pdbqt"), PathBuf::from("b.pdbqt")]
        );
        assert_eq!(config.output_dir, None);
    }

    #[test]
    fn dock_builder_requires_every_path() {
        let err = DockConfigBuilder::new()
            .receptor_path("r".into())
            .config_path("c".into())
            .ligand_dir("l".into())
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::MissingParameter("results_dir"));
    }
}
