use crate::RuntimeError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Host-side settings that shape how containers are created.
///
/// Read from `$XDG_CONFIG_HOME/boxkit/config.toml` (or
/// `~/.config/boxkit/config.toml`), then overridden by `DBX_*` environment
/// variables.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct HostConfig {
    /// `autodetect` or one of the supported manager names.
    pub container_manager: String,
    /// Program used to gain root for rootful containers.
    pub sudo_program: String,
    pub verbose: bool,
    /// Where exported binaries go when a spec has no `exported_bins_path`.
    pub export_path: Option<PathBuf>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            container_manager: "autodetect".to_owned(),
            sudo_program: "sudo".to_owned(),
            verbose: false,
            export_path: None,
        }
    }
}

impl HostConfig {
    pub fn load(path: &Path) -> Result<Self, RuntimeError> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| RuntimeError::Config(format!("{}: {e}", path.display())))
    }

    /// Load the default config file if it exists, then apply environment
    /// overrides.
    pub fn load_default() -> Result<Self, RuntimeError> {
        let mut config = match default_config_path() {
            Some(path) if path.exists() => {
                debug!("loading host config from {}", path.display());
                Self::load(&path)?
            }
            _ => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply `DBX_CONTAINER_MANAGER`, `DBX_SUDO_PROGRAM`, and `DBX_VERBOSE`
    /// from `lookup`.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(manager) = lookup("DBX_CONTAINER_MANAGER") {
            self.container_manager = manager;
        }
        if let Some(program) = lookup("DBX_SUDO_PROGRAM") {
            self.sudo_program = program;
        }
        if let Some(verbose) = lookup("DBX_VERBOSE") {
            self.verbose = matches!(verbose.to_lowercase().as_str(), "1" | "true" | "yes");
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg.is_empty() {
            return Some(PathBuf::from(xdg).join("boxkit/config.toml"));
        }
    }
    let home = std::env::var("HOME").ok()?;
    Some(PathBuf::from(home).join(".config/boxkit/config.toml"))
}
