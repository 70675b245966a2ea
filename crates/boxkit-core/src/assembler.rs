use crate::report::{AssembleReport, Outcome};
use crate::CoreError;
use boxkit_remote::load_manifest_text;
use boxkit_runtime::{create_args, export_plan, remove_args, render_command, BoxBackend};
use boxkit_schema::{parse_manifest_str, ContainerSpec, Manifest};
use std::path::PathBuf;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Remove,
}

#[derive(Debug, Clone)]
pub struct AssembleOptions {
    pub action: Action,
    /// Remove each container before creating it again.
    pub replace: bool,
    pub dry_run: bool,
    pub verbose: bool,
    /// Host directory for exported binaries when a spec sets none.
    pub export_path: PathBuf,
}

impl AssembleOptions {
    pub fn new(action: Action, export_path: impl Into<PathBuf>) -> Self {
        Self {
            action,
            replace: false,
            dry_run: false,
            verbose: false,
            export_path: export_path.into(),
        }
    }
}

/// Load and parse a manifest from a local path or URL.
pub fn load_manifest(input: &str) -> Result<Manifest, CoreError> {
    let text = load_manifest_text(input)?;
    Ok(parse_manifest_str(&text)?)
}

/// Applies every spec of a manifest through a backend.
pub struct Assembler<'a> {
    backend: &'a dyn BoxBackend,
    options: AssembleOptions,
}

impl<'a> Assembler<'a> {
    pub fn new(backend: &'a dyn BoxBackend, options: AssembleOptions) -> Self {
        Self { backend, options }
    }

    pub fn options(&self) -> &AssembleOptions {
        &self.options
    }

    /// Process specs in manifest order.
    ///
    /// A failed create is recorded and the run goes on; errors that make the
    /// backend unusable (no container manager, for instance) abort the run.
    pub fn run(&self, manifest: &Manifest) -> Result<AssembleReport, CoreError> {
        let mut report = AssembleReport::default();
        for spec in manifest.iter() {
            let outcome = self.assemble_one(spec)?;
            debug!("{}: {}", spec.name, outcome.label());
            report.push(&spec.name, outcome);
        }
        Ok(report)
    }

    fn assemble_one(&self, spec: &ContainerSpec) -> Result<Outcome, CoreError> {
        let opts = &self.options;
        let mut planned = Vec::new();

        if opts.action == Action::Remove || opts.replace {
            info!("deleting {}", spec.name);
            if opts.dry_run {
                planned.push(render_command(
                    "distrobox-rm",
                    &remove_args(&spec.name, spec.root),
                ));
            } else if let Err(e) = self.backend.remove(&spec.name, spec.root) {
                debug!("ignoring removal failure for {}: {e}", spec.name);
            }
            if opts.action == Action::Remove {
                return Ok(if opts.dry_run {
                    Outcome::Planned { commands: planned }
                } else {
                    Outcome::Removed
                });
            }
        }

        info!("creating {}", spec.name);
        if !opts.dry_run && self.backend.exists(&spec.name, spec.root)? {
            warn!("{} already exists", spec.name);
            return Ok(Outcome::AlreadyExists);
        }

        let args = create_args(spec, opts.verbose);
        if opts.dry_run {
            planned.push(render_command("distrobox-create", &args));
            return Ok(Outcome::Planned { commands: planned });
        }

        if let Err(e) = self.backend.create(&args) {
            warn!("failed to create {}: {e}", spec.name);
            return Ok(Outcome::Failed {
                reason: e.to_string(),
            });
        }

        let steps = export_plan(spec, &opts.export_path);
        if spec.start_now || !steps.is_empty() {
            let touch = ["touch".to_owned(), "/dev/null".to_owned()];
            if let Err(e) = self.backend.enter(&spec.name, spec.root, &touch) {
                warn!("failed to start {}: {e}", spec.name);
                return Ok(Outcome::Failed {
                    reason: e.to_string(),
                });
            }
        }

        let mut exported = 0;
        for step in &steps {
            match self.backend.enter(&spec.name, spec.root, &step.command()) {
                Ok(()) => exported += 1,
                Err(e) => warn!("failed to export {} from {}: {e}", step.target, spec.name),
            }
        }

        info!("created {}", spec.name);
        Ok(Outcome::Created { exported })
    }
}
