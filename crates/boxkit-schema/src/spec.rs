use crate::encode::strip_quotes;
use crate::tokenize::ValueBag;
use crate::types::HookFragment;
use serde::{Deserialize, Serialize};

/// Fully resolved, typed configuration of one manifest section.
///
/// Built once per parse and never mutated by the schema layer afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerSpec {
    pub name: String,
    pub image: String,
    pub clone: String,
    pub home: String,
    pub hostname: String,
    pub exported_bins_path: String,

    pub init: bool,
    /// Generate a desktop entry. The only flag that defaults to on.
    pub entry: bool,
    pub nvidia: bool,
    pub root: bool,
    pub pull: bool,
    pub start_now: bool,
    pub unshare_groups: bool,
    pub unshare_ipc: bool,
    pub unshare_netns: bool,
    pub unshare_process: bool,
    pub unshare_devsys: bool,
    pub unshare_all: bool,

    pub volumes: Vec<String>,
    pub additional_packages: Vec<String>,
    pub additional_flags: Vec<String>,
    pub init_hooks: Vec<HookFragment>,
    pub pre_init_hooks: Vec<HookFragment>,
    pub exported_apps: Vec<String>,
    pub exported_bins: Vec<String>,
}

impl ContainerSpec {
    /// An empty spec for `name` with every field at its default.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image: String::new(),
            clone: String::new(),
            home: String::new(),
            hostname: String::new(),
            exported_bins_path: String::new(),
            init: false,
            entry: true,
            nvidia: false,
            root: false,
            pull: false,
            start_now: false,
            unshare_groups: false,
            unshare_ipc: false,
            unshare_netns: false,
            unshare_process: false,
            unshare_devsys: false,
            unshare_all: false,
            volumes: Vec::new(),
            additional_packages: Vec::new(),
            additional_flags: Vec::new(),
            init_hooks: Vec::new(),
            pre_init_hooks: Vec::new(),
            exported_apps: Vec::new(),
            exported_bins: Vec::new(),
        }
    }

    /// Materialize a resolved bag.
    ///
    /// Scalars take the last value, flags are on only for `1`, lists keep every
    /// value in order. Hook lists stay encoded.
    pub fn from_bag(name: &str, bag: &ValueBag) -> Self {
        let mut spec = Self::named(name);

        for (key, field) in [
            ("image", &mut spec.image),
            ("clone", &mut spec.clone),
            ("home", &mut spec.home),
            ("hostname", &mut spec.hostname),
            ("exported_bins_path", &mut spec.exported_bins_path),
        ] {
            if let Some(value) = bag.last(key) {
                *field = strip_quotes(value).to_owned();
            }
        }

        for (key, flag) in [
            ("init", &mut spec.init),
            ("entry", &mut spec.entry),
            ("nvidia", &mut spec.nvidia),
            ("root", &mut spec.root),
            ("pull", &mut spec.pull),
            ("start_now", &mut spec.start_now),
            ("unshare_groups", &mut spec.unshare_groups),
            ("unshare_ipc", &mut spec.unshare_ipc),
            ("unshare_netns", &mut spec.unshare_netns),
            ("unshare_process", &mut spec.unshare_process),
            ("unshare_devsys", &mut spec.unshare_devsys),
            ("unshare_all", &mut spec.unshare_all),
        ] {
            if let Some(value) = bag.last(key) {
                *flag = value == "1";
            }
        }

        for (key, list) in [
            ("volume", &mut spec.volumes),
            ("additional_packages", &mut spec.additional_packages),
            ("additional_flags", &mut spec.additional_flags),
            ("exported_apps", &mut spec.exported_apps),
            ("exported_bins", &mut spec.exported_bins),
        ] {
            *list = unquoted(bag.get(key));
        }

        spec.init_hooks = fragments(bag.get("init_hooks"));
        spec.pre_init_hooks = fragments(bag.get("pre_init_hooks"));

        spec
    }
}

fn unquoted(values: Option<&[String]>) -> Vec<String> {
    values
        .unwrap_or_default()
        .iter()
        .map(|v| strip_quotes(v).to_owned())
        .collect()
}

fn fragments(values: Option<&[String]>) -> Vec<HookFragment> {
    values
        .unwrap_or_default()
        .iter()
        .map(HookFragment::from_encoded)
        .collect()
}
