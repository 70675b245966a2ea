//! Include resolution.
//!
//! Each section is resolved on its own, starting from an empty
//! [`IncludeStack`]. The stack is threaded through sibling `include`
//! directives rather than forked per branch, so a section reached twice
//! anywhere in one resolution (a cycle, a repeated include, or a diamond)
//! is rejected.

use crate::keys::INCLUDE_KEY;
use crate::manifest::ManifestError;
use crate::tokenize::{RawSections, ValueBag};
use indexmap::IndexMap;
use tracing::{debug, trace};

/// Sections entered so far while resolving one top-level section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncludeStack {
    // Oldest first; rendered newest first.
    entries: Vec<String>,
}

impl IncludeStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e == name)
    }

    #[must_use]
    pub fn pushed(mut self, name: &str) -> Self {
        self.entries.push(name.to_owned());
        self
    }

    /// Newest-first chain, e.g. `[c]¤[b]¤[a]`.
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .rev()
            .map(|e| format!("[{e}]"))
            .collect::<Vec<_>>()
            .join("¤")
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resolve every section's include chain into a merged bag.
///
/// Fails on the first missing or repeated include; no partial result is
/// returned.
pub fn resolve_all(sections: &RawSections) -> Result<IndexMap<String, ValueBag>, ManifestError> {
    let mut resolved = IndexMap::with_capacity(sections.len());
    for name in sections.keys() {
        let (bag, stack) = resolve_section(sections, name, IncludeStack::new())?;
        debug!("resolved [{name}] through {} section(s)", stack.len());
        resolved.insert(name.clone(), bag);
    }
    Ok(resolved)
}

/// Resolve one section with the given stack, returning the merged bag and
/// the stack as it stands after every nested include.
pub fn resolve_section(
    sections: &RawSections,
    name: &str,
    stack: IncludeStack,
) -> Result<(ValueBag, IncludeStack), ManifestError> {
    if stack.contains(name) {
        return Err(ManifestError::CircularInclude {
            name: name.to_owned(),
            chain: stack.render(),
        });
    }
    let raw = sections
        .get(name)
        .ok_or_else(|| ManifestError::MissingInclude(name.to_owned()))?;

    let mut stack = stack.pushed(name);
    let mut merged = ValueBag::new();

    for target in raw.get(INCLUDE_KEY).unwrap_or_default() {
        let target = target.replace('"', "");
        trace!("[{name}] includes [{target}]");
        let (base, next) = resolve_section(sections, &target, stack)?;
        stack = next;
        merged.merge(&base);
    }

    for (key, values) in raw.iter().filter(|(key, _)| *key != INCLUDE_KEY) {
        merged.merge_values(key, values);
    }

    Ok((merged, stack))
}
