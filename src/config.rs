use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{DalgenError, Result};
use crate::types::Target;

/// Default name of the generator configuration file.
pub const CONFIG_FILENAME: &str = "dalgen.json";

/// Configuration for one generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Schema version of the configuration.
    pub version: u32,
    /// Backend whose annotations are resolved.
    pub target: Target,
    /// Glob patterns narrowing which generated files are resolved.
    /// Empty means every generated file. Never narrows the symbol index.
    #[serde(default)]
    pub generate_only: Vec<String>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            version: 1,
            target: Target::Postgres,
            generate_only: Vec::new(),
        }
    }
}

/// Loads the configuration from disk.
///
/// If the file does not exist, returns the default configuration.
pub fn load_config(path: &Path) -> Result<ResolverConfig> {
    if !path.exists() {
        return Ok(ResolverConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(|e| DalgenError::Config {
        message: format!("failed to read config file '{}': {}", path.display(), e),
    })?;

    serde_json::from_str(&contents).map_err(|e| DalgenError::Config {
        message: format!("failed to parse config file '{}': {}", path.display(), e),
    })
}

/// Saves the configuration using a temporary file and a rename.
pub fn save_config(path: &Path, config: &ResolverConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| DalgenError::Config {
                message: format!(
                    "failed to create config directory '{}': {}",
                    parent.display(),
                    e
                ),
            })?;
        }
    }

    let tmp_path = path.with_extension("tmp");
    let json = serde_json::to_string_pretty(config).map_err(|e| DalgenError::Config {
        message: format!("failed to serialize config: {}", e),
    })?;

    fs::write(&tmp_path, &json).map_err(|e| DalgenError::Config {
        message: format!(
            "failed to write temporary config file '{}': {}",
            tmp_path.display(),
            e
        ),
    })?;

    fs::rename(&tmp_path, path).map_err(|e| DalgenError::Config {
        message: format!(
            "failed to rename temporary config file '{}' to '{}': {}",
            tmp_path.display(),
            path.display(),
            e
        ),
    })?;

    Ok(())
}

/// Writes a default configuration for `target` into `dir`.
///
/// Refuses to replace an existing file unless `force` is set. Returns the
/// path written.
pub fn init_config(dir: &Path, target: Target, force: bool) -> Result<PathBuf> {
    let path = dir.join(CONFIG_FILENAME);
    if path.exists() && !force {
        return Err(DalgenError::Config {
            message: format!(
                "config file '{}' already exists; pass --force to overwrite",
                path.display()
            ),
        });
    }

    let config = ResolverConfig {
        target,
        ..ResolverConfig::default()
    };
    save_config(&path, &config)?;
    Ok(path)
}

/// Applies a protoc-style plugin parameter string on top of `base`.
///
/// The string is a comma-separated list of `key=value` pairs. Recognized keys
/// are `target` and `generate_only` (repeatable). Unknown keys and unknown
/// targets are rejected.
pub fn parse_parameter(parameter: &str, base: ResolverConfig) -> Result<ResolverConfig> {
    let mut config = base;

    for pair in parameter.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').ok_or_else(|| DalgenError::Config {
            message: format!("malformed parameter '{}'; expected key=value", pair),
        })?;

        match key.trim() {
            "target" => config.target = value.trim().parse()?,
            "generate_only" => config.generate_only.push(value.trim().to_string()),
            other => {
                return Err(DalgenError::Config {
                    message: format!("unknown parameter '{}'", other),
                })
            }
        }
    }

    Ok(config)
}
