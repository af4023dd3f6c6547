pub mod commands;
pub mod utils;

use anyhow::Result;
use clap::ArgMatches;
use rebrand::RebrandConfig;
use std::path::PathBuf;

/// Root directory and configuration shared by every subcommand
pub struct CommandContext {
    pub root: PathBuf,
    pub config: RebrandConfig,
}

impl CommandContext {
    /// Resolve `--root` (default: current directory) and load configuration
    /// from `--config` or `<root>/rebrand.toml`
    pub fn from_matches(matches: &ArgMatches) -> Result<Self> {
        let root = match matches.get_one::<PathBuf>("root") {
            Some(root) => root.clone(),
            None => std::env::current_dir()?,
        };

        let config = match matches.get_one::<PathBuf>("config") {
            Some(path) => {
                if !path.exists() {
                    anyhow::bail!("Config file {} does not exist", path.display());
                }
                RebrandConfig::load(Some(path))?
            }
            None => RebrandConfig::load_from_dir(&root)?,
        };

        Ok(Self { root, config })
    }
}
