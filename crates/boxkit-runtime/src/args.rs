use boxkit_schema::{decode_hooks, sanitize, ContainerSpec};

fn push_pair(args: &mut Vec<String>, flag: &str, value: &str) {
    args.push(flag.to_owned());
    args.push(value.to_owned());
}

/// Build the `distrobox-create` argument vector for a spec.
pub fn create_args(spec: &ContainerSpec, verbose: bool) -> Vec<String> {
    let mut args = vec!["--yes".to_owned()];

    if verbose {
        args.push("-v".to_owned());
    }
    if !spec.name.is_empty() {
        push_pair(&mut args, "--name", &spec.name);
    }
    if !spec.image.is_empty() {
        push_pair(&mut args, "--image", &spec.image);
    }
    if !spec.clone.is_empty() {
        push_pair(&mut args, "--clone", &spec.clone);
    }

    for (on, flag) in [
        (spec.init, "--init"),
        (spec.root, "--root"),
        (spec.pull, "--pull"),
        (!spec.entry, "--no-entry"),
        (spec.nvidia, "--nvidia"),
        (spec.unshare_netns, "--unshare-netns"),
        (spec.unshare_groups, "--unshare-groups"),
        (spec.unshare_ipc, "--unshare-ipc"),
        (spec.unshare_process, "--unshare-process"),
        (spec.unshare_devsys, "--unshare-devsys"),
        (spec.unshare_all, "--unshare-all"),
    ] {
        if on {
            args.push(flag.to_owned());
        }
    }

    if !spec.home.is_empty() {
        push_pair(&mut args, "--home", &spec.home);
    }
    if !spec.hostname.is_empty() {
        push_pair(&mut args, "--hostname", &spec.hostname);
    }

    if !spec.init_hooks.is_empty() {
        push_pair(&mut args, "--init-hooks", &decode_hooks(&spec.init_hooks));
    }
    if !spec.pre_init_hooks.is_empty() {
        push_pair(
            &mut args,
            "--pre-init-hooks",
            &decode_hooks(&spec.pre_init_hooks),
        );
    }

    if !spec.additional_packages.is_empty() {
        push_pair(
            &mut args,
            "--additional-packages",
            &spec.additional_packages.join(" "),
        );
    }
    for volume in &spec.volumes {
        push_pair(&mut args, "--volume", volume);
    }
    for flag in &spec.additional_flags {
        push_pair(&mut args, "--additional-flags", flag);
    }

    args
}

fn root_prefix(root: bool) -> Vec<String> {
    if root {
        vec!["--root".to_owned()]
    } else {
        Vec::new()
    }
}

/// Arguments for `distrobox-rm`, forcing removal.
pub fn remove_args(name: &str, root: bool) -> Vec<String> {
    let mut args = root_prefix(root);
    args.extend(["-f".to_owned(), name.to_owned()]);
    args
}

/// Arguments for `distrobox-enter` running `command` inside `name`.
pub fn enter_args(name: &str, root: bool, command: &[String]) -> Vec<String> {
    let mut args = root_prefix(root);
    args.extend(["-n".to_owned(), name.to_owned(), "--".to_owned()]);
    args.extend(command.iter().cloned());
    args
}

/// Render a command line for display, quoting arguments that contain spaces.
pub fn render_command(program: &str, args: &[String]) -> String {
    let mut line = program.to_owned();
    for arg in args {
        line.push(' ');
        line.push_str(&sanitize(arg));
    }
    line
}
