use std::path::Path;

use beampack_core::{BeampackConfig, PackingConfig, Strategy};
use beampack_placement::OutputFormat;

/// Packing settings given on the command line; these win over the config file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub bunch: Option<usize>,
    pub multicast_base: Option<u32>,
    pub strategy: Option<Strategy>,
    pub strip_width: Option<f64>,
    pub max_beams: Option<usize>,
}

/// Merge defaults, the optional config file and CLI overrides, then validate.
pub fn resolve_config(path: Option<&Path>, overrides: &Overrides) -> anyhow::Result<PackingConfig> {
    let mut config = match path {
        Some(path) => BeampackConfig::from_file(path)?.packing,
        None => PackingConfig::default(),
    };

    if let Some(bunch) = overrides.bunch {
        config.bunch = bunch;
    }
    if let Some(base) = overrides.multicast_base {
        config.multicast_base = base;
    }
    if let Some(strategy) = overrides.strategy {
        config.strategy = strategy;
    }
    if let Some(width) = overrides.strip_width {
        config.strip_width = Some(width);
    }
    if let Some(max) = overrides.max_beams {
        config.max_beams = Some(max);
    }

    config.validate()?;
    Ok(config)
}

/// Render the effective configuration as a beampack.toml document.
pub fn config_to_toml(config: &PackingConfig) -> anyhow::Result<String> {
    let file = BeampackConfig {
        packing: config.clone(),
    };
    Ok(file.to_toml_string()?)
}

pub fn print_config(config: &PackingConfig) -> anyhow::Result<()> {
    print!("{}", config_to_toml(config)?);
    Ok(())
}

/// Load the catalog, pack it and render the assignment.
pub fn pack_to_string(
    input: &Path,
    config: &PackingConfig,
    format: OutputFormat,
) -> anyhow::Result<String> {
    let catalog = beampack_core::load_catalog(input)?;
    let assignment = beampack_placement::pack(&catalog, config)?;
    Ok(beampack_placement::render(&assignment, &catalog, format)?)
}

pub fn run(
    input: &Path,
    config: &PackingConfig,
    format: OutputFormat,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let rendered = pack_to_string(input, config, format)?;

    match output {
        Some(path) => {
            std::fs::write(path, &rendered)?;
            tracing::info!(path = %path.display(), format = %format, "Wrote assignment");
        }
        None => print!("{rendered}"),
    }

    Ok(())
}
