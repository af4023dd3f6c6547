use crate::discovery::{FileEnumerator, DEFAULT_EXCLUDED_DIRS, DEFAULT_EXTENSIONS};
use crate::legacy::{default_required_files, RequiredFile};
use crate::phone::Region;
use crate::rewrite::PreviewLimits;
use anyhow::{Context, Result};
use config::{Config as ConfigBuilder, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = "rebrand.toml";

/// Main configuration structure for rebrand
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RebrandConfig {
    pub scan: ScanConfig,
    pub preview: PreviewConfig,
    pub check: CheckConfig,
    pub phone: PhoneConfig,
    pub logging: LoggingConfig,
}

/// Which files the rewrite and check passes look at
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    pub extensions: Vec<String>,
    pub exclude_dirs: Vec<String>,
}

/// Bounds on diff output in preview mode
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    pub max_files: usize,
    pub max_diff_lines: usize,
    pub context_lines: usize,
}

/// Post-generation check settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckConfig {
    pub required_files: Vec<RequiredFile>,
    /// Findings listed per detector in text reports
    pub max_listed: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PhoneConfig {
    pub region: Region,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| format!(".{}", e)).collect(),
            exclude_dirs: DEFAULT_EXCLUDED_DIRS.iter().map(|d| d.to_string()).collect(),
        }
    }
}

impl Default for PreviewConfig {
    fn default() -> Self {
        let limits = PreviewLimits::default();
        Self {
            max_files: limits.max_files,
            max_diff_lines: limits.max_lines,
            context_lines: limits.context_lines,
        }
    }
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            required_files: default_required_files(),
            max_listed: 5,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(), // pretty, json, compact
        }
    }
}

impl ScanConfig {
    pub fn enumerator(&self) -> FileEnumerator {
        FileEnumerator::with_filters(&self.extensions, &self.exclude_dirs)
    }
}

impl PreviewConfig {
    pub fn limits(&self) -> PreviewLimits {
        PreviewLimits {
            max_files: self.max_files,
            max_lines: self.max_diff_lines,
            context_lines: self.context_lines,
        }
    }
}

impl RebrandConfig {
    /// Load configuration with precedence:
    /// 1. Environment variables (REBRAND_*)
    /// 2. rebrand.toml in `dir` (if exists)
    /// 3. Default values
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        Self::load(Some(&dir.join(CONFIG_FILE_NAME)))
    }

    /// Load configuration from an explicit file, which need not exist
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let mut builder = ConfigBuilder::builder();

        if let Some(path) = config_file {
            if path.exists() {
                builder = builder.add_source(File::from(path));
            }
        }

        // REBRAND_PREVIEW__MAX_FILES=5 -> preview.max_files
        builder = builder.add_source(
            Environment::with_prefix("REBRAND")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder.build().context("Failed to build configuration")?;
        let mut result: RebrandConfig = settings
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        result.merge_env_vars()?;
        Ok(result)
    }

    /// Create a new config for testing
    #[cfg(test)]
    pub fn for_testing() -> Self {
        Self {
            logging: LoggingConfig {
                level: "debug".to_string(),
                format: "compact".to_string(),
            },
            ..Self::default()
        }
    }

    /// Short environment variables kept alongside the structured ones
    fn merge_env_vars(&mut self) -> Result<()> {
        if std::env::var("REBRAND_VERBOSE").is_ok() {
            self.logging.level = "debug".to_string();
        }
        if let Ok(region) = std::env::var("REBRAND_REGION") {
            self.phone.region = region.parse().context("Invalid REBRAND_REGION")?;
        }
        Ok(())
    }
}
