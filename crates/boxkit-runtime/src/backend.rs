use crate::config::HostConfig;
use crate::RuntimeError;

/// Executes container operations on behalf of the assembler.
///
/// `root` selects a rootful container for every call that names one.
pub trait BoxBackend: Send + Sync {
    fn name(&self) -> &str;

    fn available(&self) -> bool;

    fn exists(&self, name: &str, root: bool) -> Result<bool, RuntimeError>;

    /// Run `distrobox-create` with a prepared argument vector.
    fn create(&self, args: &[String]) -> Result<(), RuntimeError>;

    fn remove(&self, name: &str, root: bool) -> Result<(), RuntimeError>;

    /// Run `command` inside the container, starting it if needed.
    fn enter(&self, name: &str, root: bool, command: &[String]) -> Result<(), RuntimeError>;
}

pub fn select_backend(name: &str, config: &HostConfig) -> Result<Box<dyn BoxBackend>, RuntimeError> {
    match name {
        "distrobox" => Ok(Box::new(crate::distrobox::DistroboxBackend::new(
            config.clone(),
        ))),
        "mock" => Ok(Box::new(crate::mock::MockBackend::new())),
        other => Err(RuntimeError::BackendUnavailable(other.to_owned())),
    }
}
