use crate::cli::SummarizeArgs;
use crate::config::DefaultsConfig;
use crate::error::Result;
use std::path::Path;
use tracing::info;
use vinabox::workflows;

const SHOWN_SCORES: usize = 5;

/// Writes the score table and, when a receptor is given, the top-ligand viewer script.
pub(crate) fn summarize_results(
    results_dir: &Path,
    receptor: Option<&Path>,
    top_n: usize,
) -> Result<()> {
    info!("Invoking the summarize workflow...");
    let summary = tokio::task::block_in_place(|| workflows::summarize::run(results_dir))?;

    println!(
        "✓ Scores of {} ligand(s) written to: {}",
        summary.scores.len(),
        summary.csv_path.display()
    );
    for (rank, score) in summary.scores.iter().take(SHOWN_SCORES).enumerate() {
        println!(
            "  {:>2}. {:30} {:8.2} kcal/mol",
            rank + 1,
            score.ligand,
            score.affinity
        );
    }

    if let Some(receptor) = receptor {
        let top = tokio::task::block_in_place(|| {
            workflows::summarize::prepare_top_ligands(receptor, results_dir, top_n)
        })?;
        println!(
            "✓ {} top pose(s) gathered. Open them with: {}",
            top.copied.len(),
            top.script_path.display()
        );
        for ligand in &top.missing {
            println!("  Missing pose for {}", ligand);
        }
    }
    Ok(())
}

pub async fn run(args: SummarizeArgs) -> Result<()> {
    let top_n = args
        .top
        .unwrap_or(DefaultsConfig::default().top_ligands);
    summarize_results(&args.results_dir, args.receptor.as_deref(), top_n)
}
