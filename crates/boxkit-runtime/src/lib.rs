//! The boundary between boxkit and the distrobox tool suite.
//!
//! This crate turns materialized [`boxkit_schema::ContainerSpec`] records into
//! `distrobox-create` argument vectors (`args`) and `distrobox-export` steps
//! (`export`), loads host configuration (`config`), detects the container
//! manager (`manager`), and runs commands through the pluggable `BoxBackend`
//! trait: a process-spawning distrobox backend and an in-memory mock.

pub mod args;
pub mod backend;
pub mod config;
pub mod distrobox;
pub mod export;
pub mod manager;
pub mod mock;
pub mod prereq;

pub use args::{create_args, enter_args, remove_args, render_command};
pub use backend::{select_backend, BoxBackend};
pub use config::HostConfig;
pub use export::{default_export_path, export_plan, ExportKind, ExportStep};
pub use manager::{detect_container_manager, ContainerManager, SUPPORTED_MANAGERS};
pub use prereq::{check_prereqs, format_missing, invoked_through_sudo, MissingPrereq};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("runtime I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Config(String),
    #[error("invalid container manager: '{0}' (choices: autodetect, podman, podman-launcher, docker, lilipod)")]
    InvalidManager(String),
    #[error("missing dependency: no container manager found, install one of podman, docker or lilipod")]
    ManagerNotFound,
    #[error("backend '{0}' is not available")]
    BackendUnavailable(String),
    #[error("{program} exited with {status}")]
    CommandFailed { program: String, status: String },
}
