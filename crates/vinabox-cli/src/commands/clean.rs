use crate::cli::CleanArgs;
use crate::error::{CliError, Result};
use crate::utils::parser;
use std::path::Path;
use tracing::info;
use vinabox::core::io::cleaning::{CleanOptions, Cleaned, clean_receptor};
use vinabox::engine::error::EngineError;

/// Cleans the structure at `input` and writes the result to `output`.
pub(crate) fn clean_file(input: &Path, output: &Path, options: &CleanOptions) -> Result<Cleaned> {
    if !input.is_file() {
        return Err(EngineError::InputNotFound {
            path: input.to_path_buf(),
        }
        .into());
    }
    let text = std::fs::read_to_string(input)?;
    let cleaned = clean_receptor(&text, options);
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(output, &cleaned.text)?;
    info!(
        kept = cleaned.kept,
        dropped = cleaned.dropped,
        path = %output.display(),
        "Cleaned structure written."
    );
    Ok(cleaned)
}

pub async fn run(args: CleanArgs) -> Result<()> {
    let chains = match args.chains.as_deref() {
        Some(list) => {
            parser::parse_chain_list(list).map_err(|e| CliError::Argument(e.to_string()))?
        }
        None => None,
    };
    let options = CleanOptions {
        chains,
        keep_cofactors: args.keep_cofactors,
    };

    let cleaned = clean_file(&args.input, &args.output, &options)?;
    println!(
        "✓ Kept {} atom(s), removed {}. Cleaned structure written to: {}",
        cleaned.kept,
        cleaned.dropped,
        args.output.display()
    );
    Ok(())
}
