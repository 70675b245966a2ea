use std::fmt;
use std::process::Command;

/// A missing prerequisite with actionable install instructions.
#[derive(Debug)]
pub struct MissingPrereq {
    pub name: &'static str,
    pub purpose: &'static str,
    pub install_hint: &'static str,
}

impl fmt::Display for MissingPrereq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "  - {}: {} (install: {})",
            self.name, self.purpose, self.install_hint
        )
    }
}

const DISTROBOX_HINT: &str =
    "zypper install distrobox | apt install distrobox | dnf install distrobox | pacman -S distrobox";

const TOOLS: &[(&str, &str)] = &[
    ("distrobox-create", "creating containers"),
    ("distrobox-enter", "starting containers and running exports"),
    ("distrobox-rm", "removing and replacing containers"),
    ("distrobox-export", "exporting apps and binaries to the host"),
];

fn command_exists(name: &str) -> bool {
    Command::new("which")
        .arg(name)
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Check that the distrobox tools are installed.
/// Returns a list of missing items. Empty list means all prerequisites are met.
pub fn check_prereqs() -> Vec<MissingPrereq> {
    missing_from(command_exists)
}

fn missing_from(exists: impl Fn(&str) -> bool) -> Vec<MissingPrereq> {
    TOOLS
        .iter()
        .filter(|(name, _)| !exists(name))
        .map(|&(name, purpose)| MissingPrereq {
            name,
            purpose,
            install_hint: DISTROBOX_HINT,
        })
        .collect()
}

/// Format a list of missing prerequisites into a user-friendly error message.
pub fn format_missing(missing: &[MissingPrereq]) -> String {
    use std::fmt::Write as _;
    let mut msg = String::from("missing prerequisites:\n");
    for m in missing {
        let _ = writeln!(msg, "{m}");
    }
    msg.push_str("\nboxkit drives distrobox to create containers; install it first.");
    msg
}

#[allow(unsafe_code)]
fn effective_uid() -> u32 {
    // SAFETY: geteuid() is always safe: no arguments, no side effects, cannot fail.
    unsafe { libc::geteuid() }
}

/// Whether boxkit runs as root through sudo or doas. Rootful containers are
/// requested with `root=true` in the manifest instead.
pub fn invoked_through_sudo() -> bool {
    sudo_invocation(effective_uid(), |k| std::env::var(k).ok())
}

fn sudo_invocation(euid: u32, lookup: impl Fn(&str) -> Option<String>) -> bool {
    euid == 0
        && ["SUDO_USER", "DOAS_USER"]
            .iter()
            .any(|k| lookup(k).is_some_and(|v| !v.is_empty()))
}
