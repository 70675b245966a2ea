//! Assembly engine for boxkit manifests.
//!
//! This crate ties together manifest loading (`boxkit-remote`), parsing and
//! include resolution (`boxkit-schema`), and container backends
//! (`boxkit-runtime`) into the [`Assembler`], which creates, replaces, or
//! removes every container a manifest describes and reports what happened to
//! each one.

pub mod assembler;
pub mod report;

pub use assembler::{load_manifest, Action, AssembleOptions, Assembler};
pub use report::{AssembleReport, Outcome, ReportEntry};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("manifest error: {0}")]
    Manifest(#[from] boxkit_schema::ManifestError),
    #[error("manifest error: {0}")]
    Load(#[from] boxkit_remote::RemoteError),
    #[error("runtime error: {0}")]
    Runtime(#[from] boxkit_runtime::RuntimeError),
}

impl CoreError {
    /// Whether the error comes from reading or parsing the manifest rather
    /// than from acting on it.
    pub fn is_manifest_error(&self) -> bool {
        matches!(self, Self::Manifest(_) | Self::Load(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_errors_are_classified() {
        let missing = CoreError::from(boxkit_schema::ManifestError::MissingInclude(
            "base".to_owned(),
        ));
        assert!(missing.is_manifest_error());
        assert_eq!(
            missing.to_string(),
            "manifest error: cannot include 'base': definition not found"
        );

        let load = CoreError::from(boxkit_remote::RemoteError::NotFound("x.ini".to_owned()));
        assert!(load.is_manifest_error());

        let runtime = CoreError::from(boxkit_runtime::RuntimeError::ManagerNotFound);
        assert!(!runtime.is_manifest_error());
    }
}
