use crate::cli::RecenterArgs;
use crate::error::{CliError, Result};
use crate::utils::parser;
use crate::utils::progress::CliProgressHandler;
use nalgebra::Point3;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use vinabox::core::io::vina_config::read_center;
use vinabox::core::utils::fs::list_files_with_suffix;
use vinabox::engine::config::RecenterConfigBuilder;
use vinabox::engine::error::EngineError;
use vinabox::engine::progress::ProgressReporter;
use vinabox::workflows::{self, recenter::RecenterReport};

/// Expands directories into their `*.pdbqt` files; plain paths are kept as given.
pub(crate) fn collect_ligands(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut ligands = Vec::new();
    for input in inputs {
        if input.is_dir() {
            let found = list_files_with_suffix(input, ".pdbqt")?;
            if found.is_empty() {
                warn!(dir = %input.display(), "No .pdbqt files found in directory.");
            }
            ligands.extend(found);
        } else {
            ligands.push(input.clone());
        }
    }
    Ok(ligands)
}

fn resolve_target(config: Option<&Path>, center: Option<&str>) -> Result<Point3<f64>> {
    match (config, center) {
        (Some(path), _) if !path.is_file() => Err(CliError::Engine(EngineError::InputNotFound {
            path: path.to_path_buf(),
        })),
        (Some(path), _) => read_center(path).map_err(|source| {
            CliError::Engine(EngineError::VinaConfig {
                path: path.to_path_buf(),
                source,
            })
        }),
        (None, Some(center)) => {
            parser::parse_center(center).map_err(|e| CliError::Argument(e.to_string()))
        }
        (None, None) => Err(CliError::Argument(
            "A target center is required (--config or --center).".to_string(),
        )),
    }
}

/// Recenters `ligands` onto `target`; skipped ligands are printed through the progress bar.
pub(crate) fn recenter_ligands(
    ligands: Vec<PathBuf>,
    target: Point3<f64>,
    output_dir: Option<PathBuf>,
) -> Result<RecenterReport> {
    let config = RecenterConfigBuilder::new()
        .target(target)
        .ligand_paths(ligands)
        .output_dir(output_dir)
        .build()
        .map_err(EngineError::from)?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!("Invoking the recenter workflow...");
    let report = tokio::task::block_in_place(|| workflows::recenter::run(&config, &reporter))?;
    Ok(report)
}

pub async fn run(args: RecenterArgs) -> Result<()> {
    let target = resolve_target(args.config.as_deref(), args.center.as_deref())?;
    let ligands = collect_ligands(&args.ligands)?;
    if ligands.is_empty() {
        return Err(CliError::Argument("No ligand files to recenter.".to_string()));
    }

    println!(
        "Recentering {} ligand(s) onto ({:.3}, {:.3}, {:.3})...",
        ligands.len(),
        target.x,
        target.y,
        target.z
    );
    let report = recenter_ligands(ligands, target, args.output_dir)?;

    println!(
        "✓ Recentered {} ligand(s), skipped {}.",
        report.recentered.len(),
        report.skipped.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn directories_expand_to_sorted_pdbqt_files() {
        let dir = tempdir().unwrap();
        for name in ["b.pdbqt", "a.pdbqt", "notes.txt"] {
            std::fs::write(dir.path().join(name), "END\n").unwrap();
        }
        let single = PathBuf::from("elsewhere/lig.pdbqt");

        let ligands = collect_ligands(&[single.clone(), dir.path().to_path_buf()]).unwrap();
        assert_eq!(
            ligands,
            vec![single, dir.path().join("a.pdbqt"), dir.path().join("b.pdbqt")]
        );
    }

    #[test]
    fn target_comes_from_config_file_or_literal() {
        let dir = tempdir().unwrap();
        let config = dir.path().join("vina_config.txt");
        std::fs::write(
            &config,
            "center_x = 1.000\ncenter_y = -2.500\ncenter_z = 3.250\n",
        )
        .unwrap();

        assert_eq!(
            resolve_target(Some(&config), None).unwrap(),
            Point3::new(1.0, -2.5, 3.25)
        );
        assert_eq!(
            resolve_target(None, Some("0,0,1")).unwrap(),
            Point3::new(0.0, 0.0, 1.0)
        );
        assert!(matches!(
            resolve_target(None, Some("0,0")),
            Err(CliError::Argument(_))
        ));
        let absent = dir.path().join("absent.txt");
        assert!(matches!(
            resolve_target(Some(&absent), None),
            Err(CliError::Engine(EngineError::InputNotFound { ref path })) if *path == absent
        ));
        assert!(matches!(
            resolve_target(Some(dir.path()), None),
            Err(CliError::Engine(EngineError::InputNotFound { .. }))
        ));

        let no_center = dir.path().join("no_center.txt");
        std::fs::write(&no_center, "size_x = 20.000\n").unwrap();
        assert!(matches!(
            resolve_target(Some(&no_center), None),
            Err(CliError::Engine(EngineError::VinaConfig { .. }))
        ));
    }
}
