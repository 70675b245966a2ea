//! Opaque wrapper for shell hook text carried through a manifest.
//!
//! Hooks stay base64-encoded from tokenizing until the command layer decodes
//! them into a chain, so a [`HookFragment`] deliberately has no `Display` or
//! `Deref<Target = str>`: the encoded form is never meant to be shown.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

/// A single encoded hook, as stored in a materialized spec.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HookFragment(String);

impl HookFragment {
    /// Encode raw shell text.
    pub fn encode(text: &str) -> Self {
        Self(STANDARD.encode(text.as_bytes()))
    }

    /// Wrap text that is already encoded. No validation happens here;
    /// malformed input is dropped later by [`HookFragment::decode`].
    pub fn from_encoded(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// The encoded form.
    pub fn as_encoded(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Recover the shell text. Returns `None` for invalid base64 or
    /// bytes that are not UTF-8.
    pub fn decode(&self) -> Option<String> {
        let bytes = STANDARD.decode(self.0.as_bytes()).ok()?;
        String::from_utf8(bytes).ok()
    }
}
