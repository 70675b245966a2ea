//! Manifest parsing, include resolution, and container specs for boxkit.
//!
//! This crate is the schema layer: it tokenizes the INI-like manifest format
//! into raw sections (`tokenize`), encodes values as they are read (`encode`),
//! resolves `include` inheritance with cycle detection (`resolve`),
//! materializes typed [`ContainerSpec`] records, and decodes stored shell hooks
//! into a single command chain (`decode_hooks`).

pub mod encode;
pub mod hooks;
pub mod keys;
pub mod manifest;
pub mod resolve;
pub mod spec;
pub mod tokenize;
pub mod types;

pub use encode::{sanitize, strip_quotes};
pub use hooks::{decode_hooks, EMPTY_CHAIN};
pub use keys::KeyClass;
pub use manifest::{parse_manifest_file, parse_manifest_str, Manifest, ManifestError};
pub use resolve::{resolve_all, IncludeStack};
pub use spec::ContainerSpec;
pub use tokenize::{tokenize, RawSections, ValueBag};
pub use types::HookFragment;
