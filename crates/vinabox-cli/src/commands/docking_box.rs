use crate::cli::{BoxArgs, SearchArgs};
use crate::config::DefaultsConfig;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use tracing::info;
use vinabox::core::selection::parse_residue_list;
use vinabox::engine::config::{DockingBoxConfigBuilder, SearchParams};
use vinabox::engine::error::EngineError;
use vinabox::engine::progress::ProgressReporter;
use vinabox::workflows;

pub(crate) fn search_params(args: SearchArgs) -> SearchParams {
    let defaults = SearchParams::default();
    SearchParams {
        exhaustiveness: args.exhaustiveness.unwrap_or(defaults.exhaustiveness),
        num_modes: args.num_modes.unwrap_or(defaults.num_modes),
        energy_range: args.energy_range.unwrap_or(defaults.energy_range),
    }
}

pub async fn run(args: BoxArgs) -> Result<()> {
    let defaults = DefaultsConfig::default();
    let residues = parse_residue_list(&args.residues).map_err(EngineError::from)?;

    let config = DockingBoxConfigBuilder::new()
        .receptor_path(args.receptor)
        .residues(residues)
        .padding(args.padding.unwrap_or(defaults.padding))
        .output_path(args.out.unwrap_or(defaults.config_out))
        .search(search_params(args.search))
        .build()
        .map_err(EngineError::from)?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!("Invoking the docking box workflow...");
    let result =
        tokio::task::block_in_place(|| workflows::docking_box::run(&config, &reporter))?;

    let center = result.config.center;
    let size = result.config.size;
    println!(
        "Selected {} atom(s) from {} residue(s).",
        result.selected_atoms,
        config.residues.len()
    );
    println!(
        "  Center: ({:.3}, {:.3}, {:.3})",
        center.x, center.y, center.z
    );
    println!("  Size:   ({:.3}, {:.3}, {:.3})", size.x, size.y, size.z);
    println!("  Padding: {:.3}", result.bounding_box.padding());
    println!(
        "✓ Vina configuration written to: {}",
        result.output_path.display()
    );
    Ok(())
}
