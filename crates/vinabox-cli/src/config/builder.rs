use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::{PipelineConfig, ReceptorSource};
use crate::cli::RunArgs;
use crate::error::{CliError, Result};
use crate::utils::parser;
use std::path::PathBuf;
use std::str::FromStr;
use vinabox::core::selection::parse_residue_list;
use vinabox::engine::config::SearchParams;
use vinabox::engine::error::EngineError;

pub fn build_pipeline_config(args: &RunArgs) -> Result<PipelineConfig> {
    let defaults = DefaultsConfig::default();
    let file_config = FileConfig::from_file(&args.config)?;
    let mut file_config = apply_set_values(file_config, &args.set_values)?;

    let receptor = match (file_config.receptor.take(), file_config.structure.take()) {
        (Some(receptor), None) => ReceptorSource::Prepared(receptor),
        (None, Some(structure)) => {
            let chains = match file_config.chains.as_deref() {
                Some(list) => {
                    parser::parse_chain_list(list).map_err(|e| CliError::Argument(e.to_string()))?
                }
                None => None,
            };
            ReceptorSource::FromStructure {
                structure,
                chains,
                keep_cofactors: file_config.keep_cofactors.unwrap_or(false),
            }
        }
        (Some(_), Some(_)) => {
            return Err(CliError::Config(
                "Set either `receptor` or `structure`, not both.".to_string(),
            ));
        }
        (None, None) => {
            return Err(CliError::Config(
                "A `receptor` (prepared PDBQT) or `structure` (raw PDB) is required.".to_string(),
            ));
        }
    };

    let residues = file_config
        .residues
        .as_deref()
        .ok_or_else(|| CliError::Config("`residues` is required.".to_string()))?;
    let residues = parse_residue_list(residues).map_err(EngineError::from)?;

    let search_file = file_config.search.take().unwrap_or_default();
    let search_defaults = SearchParams::default();
    let search = SearchParams {
        exhaustiveness: search_file
            .exhaustiveness
            .unwrap_or(search_defaults.exhaustiveness),
        num_modes: search_file.num_modes.unwrap_or(search_defaults.num_modes),
        energy_range: search_file
            .energy_range
            .unwrap_or(search_defaults.energy_range),
    };

    let tools_file = file_config.tools.take().unwrap_or_default();

    Ok(PipelineConfig {
        receptor,
        residues,
        padding: file_config.padding.unwrap_or(defaults.padding),
        search,
        config_out: file_config.config_out.unwrap_or(defaults.config_out),
        ligand_sdf: file_config.ligand_sdf,
        pdbqt_dir: file_config.pdbqt_dir.unwrap_or(defaults.pdbqt_dir),
        results_dir: file_config.results_dir.unwrap_or(defaults.results_dir),
        cpu: file_config.cpu.unwrap_or(defaults.cpu),
        top_ligands: file_config.top_ligands.unwrap_or(defaults.top_ligands),
        obabel: tools_file.obabel.unwrap_or(defaults.obabel),
        vina: tools_file.vina.unwrap_or(defaults.vina),
    })
}

fn parse_value<T: FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value)))
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let (key, value) =
            parser::parse_key_value(kv_pair).map_err(|e| CliError::Config(e.to_string()))?;

        match key {
            "receptor" => config.receptor = Some(PathBuf::from(value)),
            "structure" => config.structure = Some(PathBuf::from(value)),
            "chains" => config.chains = Some(value.to_string()),
            "keep-cofactors" => config.keep_cofactors = Some(parse_value(key, value, "boolean")?),
            "residues" => config.residues = Some(value.to_string()),
            "padding" => config.padding = Some(parse_value(key, value, "float")?),
            "config-out" => config.config_out = Some(PathBuf::from(value)),
            "ligand-sdf" => config.ligand_sdf = Some(PathBuf::from(value)),
            "pdbqt-dir" => config.pdbqt_dir = Some(PathBuf::from(value)),
            "results-dir" => config.results_dir = Some(PathBuf::from(value)),
            "cpu" => config.cpu = Some(parse_value(key, value, "integer")?),
            "top-ligands" => config.top_ligands = Some(parse_value(key, value, "integer")?),
            "search.exhaustiveness" => {
                config
                    .search
                    .get_or_insert_with(Default::default)
                    .exhaustiveness = Some(parse_value(key, value, "integer")?);
            }
            "search.num-modes" => {
                config.search.get_or_insert_with(Default::default).num_modes =
                    Some(parse_value(key, value, "integer")?);
            }
            "search.energy-range" => {
                config
                    .search
                    .get_or_insert_with(Default::default)
                    .energy_range = Some(parse_value(key, value, "float")?);
            }
            "tools.obabel" => {
                config.tools.get_or_insert_with(Default::default).obabel =
                    Some(PathBuf::from(value));
            }
            "tools.vina" => {
                config.tools.get_or_insert_with(Default::default).vina = Some(PathBuf::from(value));
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}
