use super::{json_pretty, load_selected, EXIT_SUCCESS};
use boxkit_runtime::{create_args, render_command};
use boxkit_schema::{decode_hooks, ContainerSpec};
use serde::Serialize;

/// A resolved spec as shown to the user, hooks decoded.
#[derive(Debug, Serialize)]
struct SpecView<'a> {
    name: &'a str,
    image: &'a str,
    clone: &'a str,
    home: &'a str,
    hostname: &'a str,
    flags: Vec<&'static str>,
    volumes: &'a [String],
    additional_packages: &'a [String],
    additional_flags: &'a [String],
    init_hooks: Option<String>,
    pre_init_hooks: Option<String>,
    exported_apps: &'a [String],
    exported_bins: &'a [String],
    exported_bins_path: &'a str,
    command: String,
}

fn enabled_flags(spec: &ContainerSpec) -> Vec<&'static str> {
    [
        (spec.init, "init"),
        (spec.entry, "entry"),
        (spec.nvidia, "nvidia"),
        (spec.root, "root"),
        (spec.pull, "pull"),
        (spec.start_now, "start_now"),
        (spec.unshare_groups, "unshare_groups"),
        (spec.unshare_ipc, "unshare_ipc"),
        (spec.unshare_netns, "unshare_netns"),
        (spec.unshare_process, "unshare_process"),
        (spec.unshare_devsys, "unshare_devsys"),
        (spec.unshare_all, "unshare_all"),
    ]
    .into_iter()
    .filter_map(|(on, flag)| on.then_some(flag))
    .collect()
}

impl<'a> SpecView<'a> {
    fn new(spec: &'a ContainerSpec) -> Self {
        let chain = |hooks: &[boxkit_schema::HookFragment]| {
            (!hooks.is_empty()).then(|| decode_hooks(hooks))
        };
        Self {
            name: &spec.name,
            image: &spec.image,
            clone: &spec.clone,
            home: &spec.home,
            hostname: &spec.hostname,
            flags: enabled_flags(spec),
            volumes: &spec.volumes,
            additional_packages: &spec.additional_packages,
            additional_flags: &spec.additional_flags,
            init_hooks: chain(&spec.init_hooks),
            pre_init_hooks: chain(&spec.pre_init_hooks),
            exported_apps: &spec.exported_apps,
            exported_bins: &spec.exported_bins,
            exported_bins_path: &spec.exported_bins_path,
            command: render_command("distrobox-create", &create_args(spec, false)),
        }
    }

    fn print(&self) {
        println!("[{}]", self.name);
        for (label, value) in [
            ("image", self.image),
            ("clone", self.clone),
            ("home", self.home),
            ("hostname", self.hostname),
            ("exported_bins_path", self.exported_bins_path),
        ] {
            if !value.is_empty() {
                println!("  {label:<20}{value}");
            }
        }
        if !self.flags.is_empty() {
            println!("  {:<20}{}", "flags", self.flags.join(" "));
        }
        for (label, values) in [
            ("volumes", self.volumes),
            ("additional_packages", self.additional_packages),
            ("additional_flags", self.additional_flags),
            ("exported_apps", self.exported_apps),
            ("exported_bins", self.exported_bins),
        ] {
            if !values.is_empty() {
                println!("  {label:<20}{}", values.join(", "));
            }
        }
        if let Some(ref hooks) = self.init_hooks {
            println!("  {:<20}{hooks}", "init_hooks");
        }
        if let Some(ref hooks) = self.pre_init_hooks {
            println!("  {:<20}{hooks}", "pre_init_hooks");
        }
        println!("  {:<20}{}", "command", self.command);
    }
}

pub fn run(file: &str, name: Option<&str>, json: bool) -> Result<u8, String> {
    let Some(manifest) = load_selected(file, name)? else {
        return Ok(EXIT_SUCCESS);
    };
    let views: Vec<SpecView<'_>> = manifest.iter().map(SpecView::new).collect();
    if json {
        println!("{}", json_pretty(&views)?);
    } else {
        for (i, view) in views.iter().enumerate() {
            if i > 0 {
                println!();
            }
            view.print();
        }
    }
    Ok(EXIT_SUCCESS)
}
