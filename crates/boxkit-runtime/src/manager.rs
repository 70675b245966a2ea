use crate::RuntimeError;
use std::path::PathBuf;
use std::process::Command;
use tracing::debug;

/// Container managers distrobox can drive, in autodetect order.
pub const SUPPORTED_MANAGERS: &[&str] = &["podman", "podman-launcher", "docker", "lilipod"];

/// A container manager found on this host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerManager {
    pub name: String,
    pub path: PathBuf,
}

impl ContainerManager {
    /// The argv prefix for invoking this manager, with the sudo program in
    /// front for rootful containers.
    pub fn command_prefix(&self, rootful: bool, sudo_program: &str, verbose: bool) -> Vec<String> {
        let mut prefix = Vec::with_capacity(4);
        if rootful {
            prefix.push(sudo_program.to_owned());
        }
        prefix.push(self.path.to_string_lossy().into_owned());
        if verbose {
            prefix.push("--log-level".to_owned());
            prefix.push("debug".to_owned());
        }
        prefix
    }
}

fn which(name: &str) -> Option<PathBuf> {
    let output = Command::new("which").arg(name).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let path = String::from_utf8_lossy(&output.stdout).trim().to_owned();
    (!path.is_empty()).then(|| PathBuf::from(path))
}

/// Find the container manager to use. `preferred` is `autodetect` (or empty)
/// or one of [`SUPPORTED_MANAGERS`].
pub fn detect_container_manager(preferred: &str) -> Result<ContainerManager, RuntimeError> {
    detect_with(preferred, which)
}

pub(crate) fn detect_with(
    preferred: &str,
    lookup: impl Fn(&str) -> Option<PathBuf>,
) -> Result<ContainerManager, RuntimeError> {
    let candidates: Vec<&str> = match preferred {
        "" | "autodetect" => SUPPORTED_MANAGERS.to_vec(),
        name if SUPPORTED_MANAGERS.contains(&name) => vec![name],
        other => return Err(RuntimeError::InvalidManager(other.to_owned())),
    };

    for name in candidates {
        if let Some(path) = lookup(name) {
            debug!("using container manager {name} at {}", path.display());
            return Ok(ContainerManager {
                name: name.to_owned(),
                path,
            });
        }
    }
    Err(RuntimeError::ManagerNotFound)
}
