use crate::RuntimeError;
use boxkit_schema::ContainerSpec;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    App,
    Bin,
}

/// One `distrobox-export` invocation to run inside a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportStep {
    pub kind: ExportKind,
    pub target: String,
    /// Host directory for exported binaries; unused for apps.
    pub export_path: Option<PathBuf>,
}

impl ExportStep {
    /// The command to run inside the container.
    pub fn command(&self) -> Vec<String> {
        let mut cmd = vec!["distrobox-export".to_owned()];
        match self.kind {
            ExportKind::App => {
                cmd.push("--app".to_owned());
                cmd.push(self.target.clone());
            }
            ExportKind::Bin => {
                cmd.push("--bin".to_owned());
                cmd.push(self.target.clone());
                if let Some(ref path) = self.export_path {
                    cmd.push("--export-path".to_owned());
                    cmd.push(path.to_string_lossy().into_owned());
                }
            }
        }
        cmd
    }
}

/// `~/.local/bin`, where binaries go unless a spec says otherwise.
pub fn default_export_path() -> Result<PathBuf, RuntimeError> {
    let home = std::env::var("HOME")
        .map_err(|_| RuntimeError::Config("HOME environment variable not set".to_owned()))?;
    Ok(PathBuf::from(home).join(".local/bin"))
}

/// Expand a spec's exported apps and bins into individual steps.
///
/// Each list entry may name several targets separated by whitespace.
pub fn export_plan(spec: &ContainerSpec, default_path: &Path) -> Vec<ExportStep> {
    let bin_path = if spec.exported_bins_path.is_empty() {
        default_path.to_path_buf()
    } else {
        PathBuf::from(&spec.exported_bins_path)
    };

    let apps = spec
        .exported_apps
        .iter()
        .flat_map(|entry| entry.split_whitespace())
        .map(|app| ExportStep {
            kind: ExportKind::App,
            target: app.to_owned(),
            export_path: None,
        });
    let bins = spec
        .exported_bins
        .iter()
        .flat_map(|entry| entry.split_whitespace())
        .map(|bin| ExportStep {
            kind: ExportKind::Bin,
            target: bin.to_owned(),
            export_path: Some(bin_path.clone()),
        });

    apps.chain(bins).collect()
}
