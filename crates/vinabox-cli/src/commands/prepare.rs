use crate::cli::PrepareArgs;
use crate::config::DefaultsConfig;
use crate::error::Result;
use crate::tools::OpenBabel;
use tracing::info;
use vinabox::engine::error::EngineError;
use vinabox::engine::services::StructurePreparer;

pub async fn run(args: PrepareArgs) -> Result<()> {
    if !args.input.is_file() {
        return Err(EngineError::InputNotFound { path: args.input }.into());
    }
    let obabel = OpenBabel::new(args.obabel.unwrap_or(DefaultsConfig::default().obabel));

    println!("Preparing receptor {}...", args.input.display());
    info!("Running Open Babel on {:?}", &args.input);
    let prepared =
        tokio::task::block_in_place(|| obabel.prepare_structure(&args.input, &args.output))?;

    println!("✓ Prepared receptor written to: {}", prepared.display());
    Ok(())
}
