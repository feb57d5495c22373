use clap::{ArgGroup, Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "The vinabox developers",
    version,
    about = "vinabox - Docking-box preparation, ligand recentering and batch docking around AutoDock Vina.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads used to recenter ligands and read scores.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute a padded docking box around residues and write a Vina config file.
    #[command(name = "box")]
    DockingBox(BoxArgs),
    /// Move ligands so their centroid sits on a docking box center.
    Recenter(RecenterArgs),
    /// Strip solvent, alternate conformers and (optionally) hetero atoms from a structure.
    Clean(CleanArgs),
    /// Add hydrogens and charges to a cleaned receptor with Open Babel.
    Prepare(PrepareArgs),
    /// Split a multi-ligand SDF file into per-ligand PDBQT files with Open Babel.
    Convert(ConvertArgs),
    /// Dock every ligand of a directory with AutoDock Vina.
    Dock(DockArgs),
    /// Collect the best score of each docked ligand into a CSV table.
    Summarize(SummarizeArgs),
    /// Run the whole pipeline described by a TOML file.
    Run(RunArgs),
}

/// Arguments for the `box` subcommand.
#[derive(Args, Debug)]
pub struct BoxArgs {
    /// Path to the receptor structure (PDB or PDBQT).
    #[arg(required = true, value_name = "RECEPTOR")]
    pub receptor: PathBuf,

    /// Comma-separated binding-site residues, e.g. "A:45,A:87,B:12".
    #[arg(required = true, value_name = "RESIDUES", allow_hyphen_values = true)]
    pub residues: String,

    /// Padding in Angstroms added on each side of the residue extent.
    #[arg(short, long, value_name = "FLOAT")]
    pub padding: Option<f64>,

    /// Output path for the Vina configuration file.
    #[arg(short, long, value_name = "PATH")]
    pub out: Option<PathBuf>,

    #[command(flatten)]
    pub search: SearchArgs,
}

/// Search-effort overrides written after the box geometry.
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct SearchArgs {
    /// Vina search exhaustiveness.
    #[arg(long, value_name = "INT")]
    pub exhaustiveness: Option<u32>,
    /// Maximum number of binding modes to output.
    #[arg(long, value_name = "INT")]
    pub num_modes: Option<u32>,
    /// Maximum energy difference (kcal/mol) between the best and worst mode.
    #[arg(long, value_name = "FLOAT")]
    pub energy_range: Option<f64>,
}

/// Arguments for the `recenter` subcommand.
#[derive(Args, Debug)]
#[command(group(ArgGroup::new("target").required(true).args(["config", "center"])))]
pub struct RecenterArgs {
    /// Ligand PDBQT files, or directories whose *.pdbqt files are all recentered.
    #[arg(required = true, value_name = "LIGANDS")]
    pub ligands: Vec<PathBuf>,

    /// Read the target center from a Vina configuration file.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Target center given directly as "x,y,z".
    #[arg(long, value_name = "X,Y,Z", allow_hyphen_values = true)]
    pub center: Option<String>,

    /// Write moved ligands into this directory instead of rewriting them in place.
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

/// Arguments for the `clean` subcommand.
#[derive(Args, Debug)]
pub struct CleanArgs {
    /// Raw input structure (PDB).
    #[arg(required = true, value_name = "INPUT")]
    pub input: PathBuf,

    /// Path for the cleaned structure.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Comma-separated chain identifiers to keep, e.g. "A,B". Keeps all chains if omitted.
    #[arg(long, value_name = "CHAINS")]
    pub chains: Option<String>,

    /// Keep hetero atoms other than water (cofactors, ions, bound ligands).
    #[arg(long)]
    pub keep_cofactors: bool,
}

/// Arguments for the `prepare` subcommand.
#[derive(Args, Debug)]
pub struct PrepareArgs {
    /// Cleaned receptor structure.
    #[arg(required = true, value_name = "INPUT")]
    pub input: PathBuf,

    /// Path for the prepared PDBQT receptor.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Open Babel executable.
    #[arg(long, value_name = "PATH")]
    pub obabel: Option<PathBuf>,
}

/// Arguments for the `convert` subcommand.
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Multi-ligand SDF file.
    #[arg(required = true, value_name = "SDF")]
    pub input: PathBuf,

    /// Directory receiving one PDBQT file per ligand.
    #[arg(required = true, value_name = "DIR")]
    pub output_dir: PathBuf,

    /// Open Babel executable.
    #[arg(long, value_name = "PATH")]
    pub obabel: Option<PathBuf>,
}

/// Arguments for the `dock` subcommand.
#[derive(Args, Debug)]
pub struct DockArgs {
    /// Prepared receptor (PDBQT).
    #[arg(required = true, value_name = "RECEPTOR")]
    pub receptor: PathBuf,

    /// Directory of ligand PDBQT files.
    #[arg(required = true, value_name = "LIGAND_DIR")]
    pub ligand_dir: PathBuf,

    /// Directory receiving the docked poses.
    #[arg(required = true, value_name = "RESULTS_DIR")]
    pub results_dir: PathBuf,

    /// Vina configuration file with the docking box.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Number of CPUs Vina may use per ligand.
    #[arg(long, value_name = "INT")]
    pub cpu: Option<usize>,

    /// AutoDock Vina executable.
    #[arg(long, value_name = "PATH")]
    pub vina: Option<PathBuf>,
}

/// Arguments for the `summarize` subcommand.
#[derive(Args, Debug)]
pub struct SummarizeArgs {
    /// Directory holding the *_out.pdbqt docking results.
    #[arg(required = true, value_name = "RESULTS_DIR")]
    pub results_dir: PathBuf,

    /// Receptor to open alongside the best poses; enables the top-ligand viewer script.
    #[arg(short, long, value_name = "PATH")]
    pub receptor: Option<PathBuf>,

    /// Number of best ligands to gather for viewing.
    #[arg(short, long, value_name = "INT", requires = "receptor")]
    pub top: Option<usize>,
}

/// Arguments for the `run` subcommand.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to the pipeline configuration file in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub config: PathBuf,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S search.exhaustiveness=16
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn box_accepts_positional_residue_list() {
        let cli = Cli::parse_from(["vinabox", "box", "rec.pdbqt", "A:45,A:87", "-p", "4.5"]);
        let Commands::DockingBox(args) = cli.command else {
            panic!("Expected 'box' subcommand");
        };
        assert_eq!(args.residues, "A:45,A:87");
        assert_eq!(args.padding, Some(4.5));
        assert_eq!(args.out, None);
    }

    #[test]
    fn recenter_requires_exactly_one_target_source() {
        assert!(Cli::try_parse_from(["vinabox", "recenter", "lig.pdbqt"]).is_err());
        assert!(
            Cli::try_parse_from([
                "vinabox", "recenter", "lig.pdbqt", "-c", "vina_config.txt", "--center", "1,2,3"
            ])
            .is_err()
        );
        let cli =
            Cli::parse_from(["vinabox", "recenter", "a.pdbqt", "b.pdbqt", "--center", "-1,2,3"]);
        let Commands::Recenter(args) = cli.command else {
            panic!("Expected 'recenter' subcommand");
        };
        assert_eq!(args.ligands.len(), 2);
        assert_eq!(args.center.as_deref(), Some("-1,2,3"));
    }

    #[test]
    fn global_flags_apply_after_the_subcommand() {
        let cli = Cli::parse_from(["vinabox", "summarize", "results", "-vv", "-j", "4"]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.threads, Some(4));
    }
}
