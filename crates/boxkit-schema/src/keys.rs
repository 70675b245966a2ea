//! Fixed classification of manifest keys.
//!
//! Every key the manifest format recognizes is listed once in [`KEY_TABLE`].
//! Tokenizing, merging, and materializing all consult this table instead of
//! carrying their own membership checks.

/// How a manifest key's values are stored and merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyClass {
    /// Single value; the last writer wins.
    Scalar,
    /// Single value coerced to a flag at materialization.
    Boolean,
    /// Every occurrence accumulates, values are quote-sanitized.
    List,
    /// Every occurrence accumulates, values are opaque-encoded shell text.
    Hook,
    /// Inheritance directive; accumulates and is consumed by the resolver.
    Include,
}

pub const INCLUDE_KEY: &str = "include";

pub const KEY_TABLE: &[(&str, KeyClass)] = &[
    ("image", KeyClass::Scalar),
    ("clone", KeyClass::Scalar),
    ("home", KeyClass::Scalar),
    ("hostname", KeyClass::Scalar),
    ("exported_bins_path", KeyClass::Scalar),
    ("init", KeyClass::Boolean),
    ("entry", KeyClass::Boolean),
    ("nvidia", KeyClass::Boolean),
    ("root", KeyClass::Boolean),
    ("pull", KeyClass::Boolean),
    ("start_now", KeyClass::Boolean),
    ("unshare_groups", KeyClass::Boolean),
    ("unshare_ipc", KeyClass::Boolean),
    ("unshare_netns", KeyClass::Boolean),
    ("unshare_process", KeyClass::Boolean),
    ("unshare_devsys", KeyClass::Boolean),
    ("unshare_all", KeyClass::Boolean),
    ("volume", KeyClass::List),
    ("additional_packages", KeyClass::List),
    ("additional_flags", KeyClass::List),
    ("exported_apps", KeyClass::List),
    ("exported_bins", KeyClass::List),
    ("init_hooks", KeyClass::Hook),
    ("pre_init_hooks", KeyClass::Hook),
    (INCLUDE_KEY, KeyClass::Include),
];

impl KeyClass {
    /// Classify a key. Keys outside the recognized vocabulary are scalars.
    pub fn of(key: &str) -> Self {
        KEY_TABLE
            .iter()
            .find(|(name, _)| *name == key)
            .map_or(Self::Scalar, |(_, class)| *class)
    }

    /// Whether repeated occurrences append instead of replacing.
    pub fn accumulates(self) -> bool {
        matches!(self, Self::List | Self::Hook | Self::Include)
    }

    pub fn is_hook(self) -> bool {
        self == Self::Hook
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_known_keys() {
        assert_eq!(KeyClass::of("image"), KeyClass::Scalar);
        assert_eq!(KeyClass::of("start_now"), KeyClass::Boolean);
        assert_eq!(KeyClass::of("volume"), KeyClass::List);
        assert_eq!(KeyClass::of("pre_init_hooks"), KeyClass::Hook);
        assert_eq!(KeyClass::of("include"), KeyClass::Include);
    }

    #[test]
    fn unknown_keys_are_scalar() {
        assert_eq!(KeyClass::of("frobnicate"), KeyClass::Scalar);
        assert!(!KeyClass::of("frobnicate").accumulates());
    }

    #[test]
    fn hooks_and_includes_accumulate() {
        assert!(KeyClass::Hook.accumulates());
        assert!(KeyClass::Include.accumulates());
        assert!(KeyClass::List.accumulates());
        assert!(!KeyClass::Boolean.accumulates());
        assert!(KeyClass::Hook.is_hook());
        assert!(!KeyClass::List.is_hook());
    }

    #[test]
    fn table_has_no_duplicate_keys() {
        for (i, (a, _)) in KEY_TABLE.iter().enumerate() {
            assert!(
                KEY_TABLE[i + 1..].iter().all(|(b, _)| a != b),
                "duplicate key in table: {a}"
            );
        }
    }
}
