use crate::core::io::pdbqt::PdbqtFile;
use crate::core::io::traits::TextFile;
use crate::core::io::vina_config::{VinaConfig, VinaConfigFile};
use crate::core::selection::ResidueSelector;
use crate::core::utils::geometry::BoundingBox;
use crate::engine::config::DockingBoxConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use std::path::PathBuf;
use tracing::{debug, info, instrument};

#[derive(Debug, Clone, PartialEq)]
pub struct DockingBoxResult {
    pub bounding_box: BoundingBox,
    pub config: VinaConfig,
    pub selected_atoms: usize,
    pub output_path: PathBuf,
}

/// Builds a docking box around the configured residues and writes the engine configuration.
///
/// The receptor is read once, the atoms of the target residues are selected, and the padded
/// bounding box of their coordinates becomes the search box. The configuration file is
/// only created after every step before it succeeded, so a failed run leaves no output.
///
/// # Errors
///
/// - [`EngineError::InputNotFound`] if the receptor does not exist.
/// - [`EngineError::NoMatchingAtoms`] if none of the residues occur in the receptor.
/// - [`EngineError::Io`] / [`EngineError::VinaConfig`] if the output cannot be written.
#[instrument(skip_all, name = "docking_box_workflow")]
pub fn run(
    config: &DockingBoxConfig,
    reporter: &ProgressReporter,
) -> Result<DockingBoxResult, EngineError> {
    reporter.report(Progress::PhaseStart {
        name: "Computing Docking Box",
    });

    let receptor_path = &config.receptor_path;
    if !receptor_path.is_file() {
        return Err(EngineError::InputNotFound {
            path: receptor_path.clone(),
        });
    }
    let receptor = PdbqtFile::read_from_path(receptor_path)
        .map_err(|e| EngineError::structure(receptor_path, e))?;

    let selector = ResidueSelector::new(config.residues.iter().copied());
    let selected = selector
        .select_required(receptor.atoms())
        .map_err(|_| EngineError::NoMatchingAtoms {
            path: receptor_path.clone(),
        })?;
    info!(
        atoms = selected.len(),
        residues = selector.targets().len(),
        "Selected binding-site atoms."
    );

    let bounding_box =
        BoundingBox::from_points(selected.iter().map(|atom| atom.position), config.padding)?;
    debug!(min = ?bounding_box.min(), max = ?bounding_box.max(), "Raw residue extent.");

    let vina_config = VinaConfig::new(receptor_path.as_path(), &bounding_box, config.search);
    info!(
        "Box center ({:.3}, {:.3}, {:.3}), size ({:.3}, {:.3}, {:.3}).",
        vina_config.center.x,
        vina_config.center.y,
        vina_config.center.z,
        vina_config.size.x,
        vina_config.size.y,
        vina_config.size.z
    );

    let output_path = &config.output_path;
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| EngineError::io(parent, e))?;
    }
    VinaConfigFile::write_to_path(&vina_config, output_path).map_err(|source| {
        EngineError::VinaConfig {
            path: output_path.clone(),
            source,
        }
    })?;
    info!(path = %output_path.display(), "Docking configuration written.");

    reporter.report(Progress::PhaseFinish);
    Ok(DockingBoxResult {
        bounding_box,
        config: vina_config,
        selected_atoms: selected.len(),
        output_path: output_path.clone(),
    })
}
