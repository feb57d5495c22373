use crate::core::io::pdbqt::PdbqtFile;
use crate::core::io::traits::TextFile;
use crate::core::transform::{TransformError, recenter};
use crate::engine::config::RecenterConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use nalgebra::Vector3;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub struct RecenteredLigand {
    pub source: PathBuf,
    pub output: PathBuf,
    pub translation: Vector3<f64>,
    pub atom_count: usize,
}

#[derive(Debug)]
pub struct SkippedLigand {
    pub path: PathBuf,
    pub reason: EngineError,
}

/// Per-ligand outcomes of a recentering batch, both lists in input order.
#[derive(Debug, Default)]
pub struct RecenterReport {
    pub recentered: Vec<RecenteredLigand>,
    pub skipped: Vec<SkippedLigand>,
}

/// Moves every ligand so its centroid sits on the configured target.
///
/// Ligands are independent: each is read, translated and written on its own, in parallel
/// when the `parallel` feature is enabled. A ligand that cannot be processed (missing file,
/// no atom coordinates, a coordinate that overflows its column, an output path already
/// taken by an earlier ligand) is skipped with a warning
/// and listed in the report; the rest of the batch still runs.
///
/// # Errors
///
/// Only a failure to create the output directory aborts the batch.
#[instrument(skip_all, name = "recenter_workflow")]
pub fn run(
    config: &RecenterConfig,
    reporter: &ProgressReporter,
) -> Result<RecenterReport, EngineError> {
    reporter.report(Progress::PhaseStart {
        name: "Recentering Ligands",
    });
    info!(
        ligands = config.ligand_paths.len(),
        "Recentering onto ({:.3}, {:.3}, {:.3}).",
        config.target.x,
        config.target.y,
        config.target.z
    );

    if let Some(dir) = &config.output_dir {
        std::fs::create_dir_all(dir).map_err(|e| EngineError::io(dir, e))?;
    }

    reporter.report(Progress::TaskStart {
        total_steps: config.ligand_paths.len() as u64,
    });

    let planned = plan_outputs(config);

    #[cfg(not(feature = "parallel"))]
    let iterator = planned.into_iter();

    #[cfg(feature = "parallel")]
    let iterator = planned.into_par_iter();

    let outcomes: Vec<_> = iterator
        .map(|(path, output)| {
            let outcome = output.and_then(|output| recenter_ligand(path, output, config));
            reporter.report(Progress::TaskIncrement);
            (path, outcome)
        })
        .collect();

    reporter.report(Progress::TaskFinish);

    let mut report = RecenterReport::default();
    for (path, outcome) in outcomes {
        match outcome {
            Ok(ligand) => report.recentered.push(ligand),
            Err(reason) => {
                warn!(path = %path.display(), "Skipping ligand: {}", reason);
                reporter.message(format!("Skipped {}: {}", path.display(), reason));
                report.skipped.push(SkippedLigand {
                    path: path.clone(),
                    reason,
                });
            }
        }
    }

    info!(
        recentered = report.recentered.len(),
        skipped = report.skipped.len(),
        "Recentering finished."
    );
    reporter.report(Progress::PhaseFinish);
    Ok(report)
}

fn output_path_for(source: &Path, output_dir: Option<&Path>) -> PathBuf {
    match (output_dir, source.file_name()) {
        (Some(dir), Some(name)) => dir.join(name),
        _ => source.to_path_buf(),
    }
}

/// Pairs every ligand with its output path, in input order.
///
/// Two ligands resolving to the same output (equal file names from different directories,
/// or a path listed twice) would overwrite each other; only the first keeps the path and
/// the later ones are rejected before any file is touched.
fn plan_outputs(config: &RecenterConfig) -> Vec<(&PathBuf, Result<PathBuf, EngineError>)> {
    let mut claimed: HashMap<PathBuf, &PathBuf> = HashMap::new();
    config
        .ligand_paths
        .iter()
        .map(|path| {
            let output = output_path_for(path, config.output_dir.as_deref());
            let planned = match claimed.get(&output) {
                Some(first) => Err(EngineError::DuplicateOutput {
                    path: path.clone(),
                    output,
                    first: (*first).clone(),
                }),
                None => {
                    claimed.insert(output.clone(), path);
                    Ok(output)
                }
            };
            (path, planned)
        })
        .collect()
}

fn recenter_ligand(
    path: &Path,
    output: PathBuf,
    config: &RecenterConfig,
) -> Result<RecenteredLigand, EngineError> {
    if !path.is_file() {
        return Err(EngineError::InputNotFound {
            path: path.to_path_buf(),
        });
    }
    let structure =
        PdbqtFile::read_from_path(path).map_err(|e| EngineError::structure(path, e))?;

    let moved = recenter(&structure, &config.target).map_err(|e| match e {
        TransformError::NoCentroid => EngineError::TranslationNoCentroid {
            path: path.to_path_buf(),
        },
        TransformError::Rewrite(source) => EngineError::structure(path, source),
    })?;

    PdbqtFile::write_to_path(&moved.structure, &output)
        .map_err(|e| EngineError::structure(&output, e))?;
    debug!(
        path = %output.display(),
        atoms = moved.atom_count,
        "Ligand moved by ({:.3}, {:.3}, {:.3}).",
        moved.translation.x,
        moved.translation.y,
        moved.translation.z
    );

    Ok(RecenteredLigand {
        source: path.to_path_buf(),
        output,
        translation: moved.translation,
        atom_count: moved.atom_count,
    })
}
