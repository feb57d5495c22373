//! Configuration of the `run` pipeline: TOML file, `--set` overrides and built-in defaults.

mod builder;
mod defaults;
mod file;
mod models;

pub use builder::build_pipeline_config;
pub use defaults::DefaultsConfig;
pub use models::{PipelineConfig, ReceptorSource};
