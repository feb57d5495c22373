use crate::core::utils::fs::list_files_with_suffix;
use crate::engine::config::DockConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::services::{PoseSearchRequest, PoseSearcher, ServiceError};
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

/// Suffix appended to a ligand's file stem to name its pose file.
pub const POSE_FILE_SUFFIX: &str = "_out.pdbqt";

#[derive(Debug, Default)]
pub struct DockReport {
    /// Pose files produced, in ligand order.
    pub docked: Vec<PathBuf>,
    /// Ligands the pose searcher failed on, with the reason.
    pub failed: Vec<(PathBuf, ServiceError)>,
}

pub fn pose_path_for(ligand: &Path, results_dir: &Path) -> PathBuf {
    let stem = ligand
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    results_dir.join(format!("{stem}{POSE_FILE_SUFFIX}"))
}

fn require(path: &Path) -> Result<(), EngineError> {
    if path.exists() {
        Ok(())
    } else {
        Err(EngineError::InputNotFound {
            path: path.to_path_buf(),
        })
    }
}

/// Docks every `*.pdbqt` ligand of a directory against one receptor.
///
/// Ligands run one after another in file-name order; the search engine parallelizes each
/// search internally. A failed search is logged and recorded, and the batch moves on.
///
/// # Errors
///
/// Returns [`EngineError::InputNotFound`] if the receptor, configuration or ligand directory
/// is missing, and [`EngineError::Io`] if the ligands cannot be listed or the results
/// directory cannot be created.
#[instrument(skip_all, name = "dock_workflow")]
pub fn run(
    config: &DockConfig,
    searcher: &impl PoseSearcher,
    reporter: &ProgressReporter,
) -> Result<DockReport, EngineError> {
    reporter.report(Progress::PhaseStart {
        name: "Docking Ligands",
    });
    require(&config.receptor_path)?;
    require(&config.config_path)?;
    require(&config.ligand_dir)?;

    let ligands = list_files_with_suffix(&config.ligand_dir, ".pdbqt")
        .map_err(|e| EngineError::io(&config.ligand_dir, e))?;
    std::fs::create_dir_all(&config.results_dir)
        .map_err(|e| EngineError::io(&config.results_dir, e))?;

    if ligands.is_empty() {
        warn!(dir = %config.ligand_dir.display(), "No .pdbqt ligands to dock.");
    }
    info!(ligands = ligands.len(), "Starting batch docking.");
    reporter.report(Progress::TaskStart {
        total_steps: ligands.len() as u64,
    });

    let mut report = DockReport::default();
    for ligand in ligands {
        let output = pose_path_for(&ligand, &config.results_dir);
        let request = PoseSearchRequest {
            receptor: &config.receptor_path,
            ligand: &ligand,
            config: &config.config_path,
            output: &output,
        };
        match searcher.search_poses(&request) {
            Ok(pose) => {
                info!(ligand = %ligand.display(), "Docked.");
                report.docked.push(pose);
            }
            Err(e) => {
                warn!(ligand = %ligand.display(), "Docking failed: {}", e);
                reporter.message(format!("Failed {}: {}", ligand.display(), e));
                report.failed.push((ligand, e));
            }
        }
        reporter.report(Progress::TaskIncrement);
    }
    reporter.report(Progress::TaskFinish);

    info!(
        docked = report.docked.len(),
        failed = report.failed.len(),
        "Batch docking finished."
    );
    reporter.report(Progress::PhaseFinish);
    Ok(report)
}
