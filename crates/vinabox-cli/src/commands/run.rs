use super::{clean::clean_file, dock::dock_ligands, recenter, summarize::summarize_results};
use crate::cli::RunArgs;
use crate::config::{PipelineConfig, ReceptorSource, build_pipeline_config};
use crate::error::{CliError, Result};
use crate::tools::{OpenBabel, Vina};
use crate::utils::progress::CliProgressHandler;
use std::path::{Path, PathBuf};
use tracing::info;
use vinabox::core::io::cleaning::CleanOptions;
use vinabox::core::utils::fs::list_files_with_suffix;
use vinabox::engine::config::DockingBoxConfigBuilder;
use vinabox::engine::error::EngineError;
use vinabox::engine::progress::ProgressReporter;
use vinabox::engine::services::{FormatConverter, StructurePreparer};
use vinabox::workflows;

fn sibling_with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    path.with_file_name(format!("{stem}{suffix}"))
}

/// Returns the docking receptor, cleaning and preparing the raw structure when needed.
///
/// A `<stem>_prepped.pdbqt` next to the structure is reused as is.
fn resolve_receptor(source: &ReceptorSource, obabel: &OpenBabel) -> Result<PathBuf> {
    let (structure, chains, keep_cofactors) = match source {
        ReceptorSource::Prepared(path) => return Ok(path.clone()),
        ReceptorSource::FromStructure {
            structure,
            chains,
            keep_cofactors,
        } => (structure, chains, *keep_cofactors),
    };

    let prepared = sibling_with_suffix(structure, "_prepped.pdbqt");
    if prepared.is_file() {
        info!(path = %prepared.display(), "Reusing prepared receptor.");
        println!("Using existing prepared receptor: {}", prepared.display());
        return Ok(prepared);
    }

    let cleaned = sibling_with_suffix(structure, "_clean.pdb");
    let options = CleanOptions {
        chains: chains.clone(),
        keep_cofactors,
    };
    let summary = clean_file(structure, &cleaned, &options)?;
    println!(
        "✓ Cleaned receptor: kept {} atom(s), removed {}.",
        summary.kept, summary.dropped
    );

    tokio::task::block_in_place(|| obabel.prepare_structure(&cleaned, &prepared))?;
    println!("✓ Prepared receptor written to: {}", prepared.display());
    Ok(prepared)
}

fn run_pipeline(config: PipelineConfig) -> Result<()> {
    let obabel = OpenBabel::new(&config.obabel);
    let vina = Vina::new(&config.vina).with_cpu(Some(config.cpu));

    println!("[1/6] Receptor");
    let receptor = resolve_receptor(&config.receptor, &obabel)?;

    println!("[2/6] Docking box");
    let box_config = DockingBoxConfigBuilder::new()
        .receptor_path(receptor.clone())
        .residues(config.residues.clone())
        .padding(config.padding)
        .output_path(config.config_out.clone())
        .search(config.search)
        .build()
        .map_err(EngineError::from)?;
    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());
    let docking_box =
        tokio::task::block_in_place(|| workflows::docking_box::run(&box_config, &reporter))?;
    let center = docking_box.config.center;
    println!(
        "✓ Box centered at ({:.3}, {:.3}, {:.3}) written to: {}",
        center.x,
        center.y,
        center.z,
        docking_box.output_path.display()
    );

    println!("[3/6] Ligands");
    if let Some(sdf) = &config.ligand_sdf {
        if !sdf.is_file() {
            return Err(EngineError::InputNotFound { path: sdf.clone() }.into());
        }
        let converted =
            tokio::task::block_in_place(|| obabel.convert_format(sdf, &config.pdbqt_dir))?;
        println!("✓ Converted {} ligand(s).", converted.len());
    }
    let ligands = if config.pdbqt_dir.is_dir() {
        list_files_with_suffix(&config.pdbqt_dir, ".pdbqt")?
    } else {
        Vec::new()
    };
    if ligands.is_empty() {
        return Err(CliError::Config(format!(
            "No ligand PDBQT files in {}. Set `ligand-sdf` or fill `pdbqt-dir`.",
            config.pdbqt_dir.display()
        )));
    }

    println!("[4/6] Recentering {} ligand(s)", ligands.len());
    let recentered = recenter::recenter_ligands(ligands, center, None)?;
    println!(
        "✓ Recentered {} ligand(s), skipped {}.",
        recentered.recentered.len(),
        recentered.skipped.len()
    );

    println!("[5/6] Docking");
    let docked = dock_ligands(
        receptor.clone(),
        docking_box.output_path.clone(),
        config.pdbqt_dir.clone(),
        config.results_dir.clone(),
        &vina,
    )?;
    println!(
        "✓ Docked {} ligand(s) ({} failed).",
        docked.docked.len(),
        docked.failed.len()
    );

    println!("[6/6] Scores");
    summarize_results(&config.results_dir, Some(&receptor), config.top_ligands)
}

pub async fn run(args: RunArgs) -> Result<()> {
    info!("Building pipeline configuration from {:?}", &args.config);
    let config = build_pipeline_config(&args)?;
    run_pipeline(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sibling_paths_replace_the_extension() {
        assert_eq!(
            sibling_with_suffix(Path::new("data/1abc.pdb"), "_prepped.pdbqt"),
            PathBuf::from("data/1abc_prepped.pdbqt")
        );
        assert_eq!(
            sibling_with_suffix(Path::new("rec"), "_clean.pdb"),
            PathBuf::from("rec_clean.pdb")
        );
    }

    #[test]
    fn prepared_source_is_used_directly() {
        let obabel = OpenBabel::new("vinabox-test-no-such-tool");
        let source = ReceptorSource::Prepared(PathBuf::from("rec.pdbqt"));
        assert_eq!(
            resolve_receptor(&source, &obabel).unwrap(),
            PathBuf::from("rec.pdbqt")
        );
    }

    #[test]
    fn existing_prepared_receptor_is_reused() {
        let dir = tempfile::tempdir().unwrap();
        let structure = dir.path().join("1abc.pdb");
        std::fs::write(dir.path().join("1abc_prepped.pdbqt"), "END\n").unwrap();

        let obabel = OpenBabel::new("vinabox-test-no-such-tool");
        let source = ReceptorSource::FromStructure {
            structure,
            chains: None,
            keep_cofactors: false,
        };
        assert_eq!(
            resolve_receptor(&source, &obabel).unwrap(),
            dir.path().join("1abc_prepped.pdbqt")
        );
    }
}
