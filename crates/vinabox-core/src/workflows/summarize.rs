use super::dock::POSE_FILE_SUFFIX;
use crate::core::io::scores::{
    LigandScore, SCORES_FILE_NAME, read_best_affinity, read_scores, sort_by_affinity,
    write_scores,
};
use crate::core::utils::fs::list_files_with_suffix;
use crate::engine::error::EngineError;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Directory, inside the results directory, receiving copies of the best poses.
pub const TOP_LIGANDS_DIR: &str = "top_ligands";
/// Viewer command script opening the receptor together with the best poses.
pub const VIEWER_SCRIPT_NAME: &str = "view_top_ligands.cxc";

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreSummary {
    pub csv_path: PathBuf,
    /// All scored ligands, best first.
    pub scores: Vec<LigandScore>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TopLigands {
    pub script_path: PathBuf,
    /// Absolute paths of the copied pose files, best first.
    pub copied: Vec<PathBuf>,
    /// Ligands listed in the score table whose pose file was not found.
    pub missing: Vec<String>,
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

fn absolute(path: &Path) -> Result<PathBuf, EngineError> {
    std::path::absolute(path).map_err(|e| EngineError::io(path, e))
}

/// Collects the best affinity of every pose file and writes the score table.
///
/// Pose files are the `*_out.pdbqt` files of `results_dir`; the ligand name is the file
/// name without that suffix. Files without a readable `REMARK VINA RESULT` line are left
/// out. The table is sorted from the most negative (best) affinity to the least.
///
/// # Errors
///
/// Returns [`EngineError::NoScores`] when no pose file yields a score, in which case no
/// table is written.
#[instrument(skip_all, name = "summarize_workflow")]
pub fn run(results_dir: &Path) -> Result<ScoreSummary, EngineError> {
    require(results_dir)?;
    let poses = list_files_with_suffix(results_dir, POSE_FILE_SUFFIX)
        .map_err(|e| EngineError::io(results_dir, e))?;

    #[cfg(not(feature = "parallel"))]
    let iterator = poses.iter();

    #[cfg(feature = "parallel")]
    let iterator = poses.par_iter();

    let mut scores: Vec<LigandScore> = iterator
        .filter_map(|path| {
            let name = path.file_name()?.to_str()?.strip_suffix(POSE_FILE_SUFFIX)?;
            let affinity = read_best_affinity(path);
            if affinity.is_none() {
                debug!(path = %path.display(), "No docking score found.");
            }
            Some(LigandScore {
                ligand: name.to_string(),
                affinity: affinity?,
            })
        })
        .collect();

    if scores.is_empty() {
        return Err(EngineError::NoScores {
            path: results_dir.to_path_buf(),
        });
    }
    sort_by_affinity(&mut scores);

    let csv_path = results_dir.join(SCORES_FILE_NAME);
    write_scores(&csv_path, &scores).map_err(|source| EngineError::Scores {
        path: csv_path.clone(),
        source,
    })?;
    info!(
        ligands = scores.len(),
        path = %csv_path.display(),
        "Score table written."
    );
    for score in scores.iter().take(5) {
        info!("  {:30} {:8.2}", score.ligand, score.affinity);
    }

    Ok(ScoreSummary { csv_path, scores })
}

/// Gathers the `top_n` best poses and writes a viewer script that opens them.
///
/// The poses named in the score table are copied into [`TOP_LIGANDS_DIR`]. The script
/// opens the receptor, then each copied pose, and finishes with a publication preset and a
/// view reset. All paths in the script are absolute.
///
/// # Errors
///
/// Returns [`EngineError::InputNotFound`] if the receptor or the score table is missing.
/// A pose file that cannot be found is skipped with a warning.
#[instrument(skip_all, name = "top_ligands_workflow")]
pub fn prepare_top_ligands(
    receptor: &Path,
    results_dir: &Path,
    top_n: usize,
) -> Result<TopLigands, EngineError> {
    require(receptor)?;
    let csv_path = results_dir.join(SCORES_FILE_NAME);
    require(&csv_path)?;

    let receptor = absolute(receptor)?;
    let top_dir = absolute(&results_dir.join(TOP_LIGANDS_DIR))?;
    std::fs::create_dir_all(&top_dir).map_err(|e| EngineError::io(&top_dir, e))?;

    let scores = read_scores(&csv_path).map_err(|source| EngineError::Scores {
        path: csv_path.clone(),
        source,
    })?;

    let mut script = String::new();
    let _ = writeln!(script, "open {}", receptor.display());

    let mut copied = Vec::new();
    let mut missing = Vec::new();
    for score in scores.into_iter().take(top_n) {
        let file_name = format!("{}{}", score.ligand, POSE_FILE_SUFFIX);
        let pose = results_dir.join(&file_name);
        if !pose.is_file() {
            warn!(ligand = %score.ligand, "Missing docked file.");
            missing.push(score.ligand);
            continue;
        }
        let dest = top_dir.join(&file_name);
        std::fs::copy(&pose, &dest).map_err(|e| EngineError::io(&pose, e))?;
        let _ = writeln!(script, "open {}", dest.display());
        info!(ligand = %score.ligand, affinity = score.affinity, "Prepared top ligand.");
        copied.push(dest);
    }
    script.push_str("preset apply pub 3\nview\n");

    let script_path = absolute(&results_dir.join(VIEWER_SCRIPT_NAME))?;
    std::fs::write(&script_path, script).map_err(|e| EngineError::io(&script_path, e))?;
    info!(path = %script_path.display(), "Viewer script written.");

    Ok(TopLigands {
        script_path,
        copied,
        missing,
    })
}
