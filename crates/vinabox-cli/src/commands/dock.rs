use crate::cli::DockArgs;
use crate::config::DefaultsConfig;
use crate::error::Result;
use crate::tools::Vina;
use crate::utils::progress::CliProgressHandler;
use std::path::PathBuf;
use tracing::info;
use vinabox::engine::config::DockConfigBuilder;
use vinabox::engine::error::EngineError;
use vinabox::engine::progress::ProgressReporter;
use vinabox::workflows::{self, dock::DockReport};

/// Docks every ligand of `ligand_dir`; failures are printed through the progress bar.
pub(crate) fn dock_ligands(
    receptor: PathBuf,
    config: PathBuf,
    ligand_dir: PathBuf,
    results_dir: PathBuf,
    vina: &Vina,
) -> Result<DockReport> {
    let dock_config = DockConfigBuilder::new()
        .receptor_path(receptor)
        .config_path(config)
        .ligand_dir(ligand_dir)
        .results_dir(results_dir)
        .build()
        .map_err(EngineError::from)?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!("Invoking the dock workflow...");
    let report =
        tokio::task::block_in_place(|| workflows::dock::run(&dock_config, vina, &reporter))?;
    Ok(report)
}

pub async fn run(args: DockArgs) -> Result<()> {
    let defaults = DefaultsConfig::default();
    let vina = Vina::new(args.vina.unwrap_or(defaults.vina))
        .with_cpu(Some(args.cpu.unwrap_or(defaults.cpu)));

    let report = dock_ligands(
        args.receptor,
        args.config.unwrap_or(defaults.config_out),
        args.ligand_dir,
        args.results_dir.clone(),
        &vina,
    )?;

    println!(
        "✓ Docked {} ligand(s) ({} failed). Poses written to: {}",
        report.docked.len(),
        report.failed.len(),
        args.results_dir.display()
    );
    Ok(())
}
