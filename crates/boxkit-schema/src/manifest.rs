use crate::resolve::resolve_all;
use crate::spec::ContainerSpec;
use crate::tokenize::tokenize;
use indexmap::IndexMap;
use serde::Serialize;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read manifest file: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot include '{0}': definition not found")]
    MissingInclude(String),
    #[error("circular reference detected: including [{name}] again after {chain}")]
    CircularInclude { name: String, chain: String },
}

/// Every container spec of a manifest, in section order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Manifest {
    specs: IndexMap<String, ContainerSpec>,
}

impl Manifest {
    pub fn get(&self, name: &str) -> Option<&ContainerSpec> {
        self.specs.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ContainerSpec> {
        self.specs.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.specs.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Keep only the spec named `name`. Returns `false` (and empties the
    /// manifest) when no such section exists.
    pub fn retain_only(&mut self, name: &str) -> bool {
        self.specs.retain(|k, _| k == name);
        !self.specs.is_empty()
    }

    pub fn into_specs(self) -> IndexMap<String, ContainerSpec> {
        self.specs
    }
}

impl FromIterator<ContainerSpec> for Manifest {
    fn from_iter<I: IntoIterator<Item = ContainerSpec>>(iter: I) -> Self {
        Self {
            specs: iter.into_iter().map(|s| (s.name.clone(), s)).collect(),
        }
    }
}

/// Parse manifest text into container specs.
///
/// Any missing or circular include fails the whole manifest.
pub fn parse_manifest_str(input: &str) -> Result<Manifest, ManifestError> {
    let sections = tokenize(input);
    let resolved = resolve_all(&sections)?;
    let specs: IndexMap<String, ContainerSpec> = resolved
        .iter()
        .map(|(name, bag)| (name.clone(), ContainerSpec::from_bag(name, bag)))
        .collect();
    info!("parsed manifest with {} container(s)", specs.len());
    Ok(Manifest { specs })
}

pub fn parse_manifest_file(path: impl AsRef<Path>) -> Result<Manifest, ManifestError> {
    let content = fs::read_to_string(path)?;
    parse_manifest_str(&content)
}
