use crate::cli::ConvertArgs;
use crate::config::DefaultsConfig;
use crate::error::Result;
use crate::tools::OpenBabel;
use tracing::info;
use vinabox::engine::error::EngineError;
use vinabox::engine::services::FormatConverter;

pub async fn run(args: ConvertArgs) -> Result<()> {
    if !args.input.is_file() {
        return Err(EngineError::InputNotFound { path: args.input }.into());
    }
    let obabel = OpenBabel::new(args.obabel.unwrap_or(DefaultsConfig::default().obabel));

    info!("Splitting {:?} into {:?}", &args.input, &args.output_dir);
    let ligands =
        tokio::task::block_in_place(|| obabel.convert_format(&args.input, &args.output_dir))?;

    println!(
        "✓ Converted {} ligand(s) into: {}",
        ligands.len(),
        args.output_dir.display()
    );
    Ok(())
}
