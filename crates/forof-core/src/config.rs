use crate::discovery::DiscoveredSettings;
use anyhow::Result;
use std::path::PathBuf;

#[derive(Clone, Debug)]
/// Arguments provided in the CLI.
pub struct ArgsConfig {
    /// Paths to files or directories to lint.
    pub files: Vec<PathBuf>,
    /// Did the user pass the --no-default-exclude flag?
    pub no_default_exclude: bool,
}

#[derive(Clone, Debug, Default)]
pub struct Config {
    /// Paths to files to lint.
    pub paths: Vec<PathBuf>,
}

/// Pick the settings that apply to this run.
///
/// Only one configuration file is used per run: the first one discovered.
/// Others are reported and ignored.
pub fn resolve_settings(discovered: &[DiscoveredSettings]) -> Option<&DiscoveredSettings> {
    let (first, rest) = discovered.split_first()?;

    for ignored in rest {
        if let Some(config_path) = &ignored.config_path {
            tracing::warn!(
                "Ignoring configuration file {} because {} is already used",
                config_path.display(),
                first
                    .config_path
                    .as_ref()
                    .map_or_else(|| first.directory.display(), |p| p.display())
            );
        }
    }

    Some(first)
}

pub fn build_config(args: &ArgsConfig, mut paths: Vec<PathBuf>) -> Result<Config> {
    if args.files.is_empty() {
        return Err(anyhow::anyhow!("No paths to check were provided."));
    }

    // Overlapping inputs, e.g. `forof check src src/index.js`, must not
    // report the same file twice.
    paths.sort();
    paths.dedup();

    tracing::debug!("Checking {} file(s)", paths.len());

    Ok(Config { paths })
}
