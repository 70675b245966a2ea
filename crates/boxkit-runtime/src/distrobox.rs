use crate::args::{enter_args, remove_args};
use crate::backend::BoxBackend;
use crate::config::HostConfig;
use crate::manager::detect_container_manager;
use crate::RuntimeError;
use std::process::{Command, Stdio};
use tracing::debug;

/// Backend that shells out to the distrobox tool suite.
pub struct DistroboxBackend {
    config: HostConfig,
}

impl DistroboxBackend {
    pub fn new(config: HostConfig) -> Self {
        Self { config }
    }
}

fn check_status(program: &str, status: std::process::ExitStatus) -> Result<(), RuntimeError> {
    if status.success() {
        Ok(())
    } else {
        Err(RuntimeError::CommandFailed {
            program: program.to_owned(),
            status: status.to_string(),
        })
    }
}

fn run_inherited(program: &str, args: &[String]) -> Result<(), RuntimeError> {
    debug!("running {program} {}", args.join(" "));
    let status = Command::new(program)
        .args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()?;
    check_status(program, status)
}

impl BoxBackend for DistroboxBackend {
    fn name(&self) -> &'static str {
        "distrobox"
    }

    fn available(&self) -> bool {
        crate::prereq::check_prereqs().is_empty()
    }

    fn exists(&self, name: &str, root: bool) -> Result<bool, RuntimeError> {
        let manager = detect_container_manager(&self.config.container_manager)?;
        let prefix = manager.command_prefix(root, &self.config.sudo_program, self.config.verbose);
        let Some((program, base)) = prefix.split_first() else {
            return Err(RuntimeError::ManagerNotFound);
        };
        let status = Command::new(program)
            .args(base)
            .args(["inspect", "--type", "container", name])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()?;
        Ok(status.success())
    }

    fn create(&self, args: &[String]) -> Result<(), RuntimeError> {
        run_inherited("distrobox-create", args)
    }

    fn remove(&self, name: &str, root: bool) -> Result<(), RuntimeError> {
        let args = remove_args(name, root);
        debug!("running distrobox-rm {}", args.join(" "));
        let status = Command::new("distrobox-rm")
            .args(&args)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()?;
        check_status("distrobox-rm", status)
    }

    fn enter(&self, name: &str, root: bool, command: &[String]) -> Result<(), RuntimeError> {
        run_inherited("distrobox-enter", &enter_args(name, root, command))
    }
}
