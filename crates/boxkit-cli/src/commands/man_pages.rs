use super::EXIT_SUCCESS;
use clap::CommandFactory;
use std::path::Path;

fn write_page(cmd: clap::Command, path: &Path) -> Result<(), String> {
    let mut buf = Vec::new();
    clap_mangen::Man::new(cmd)
        .render(&mut buf)
        .map_err(|e| format!("man page render failed: {e}"))?;
    std::fs::write(path, &buf).map_err(|e| format!("failed to write {}: {e}", path.display()))
}

/// Write `boxkit.1` plus one `boxkit-<subcommand>.1` page per subcommand.
pub fn run<C: CommandFactory>(dir: &Path) -> Result<u8, String> {
    std::fs::create_dir_all(dir).map_err(|e| format!("failed to create dir: {e}"))?;
    let cmd = C::command();
    let root = cmd.get_name().to_owned();
    for sub in cmd.get_subcommands() {
        let page = dir.join(format!("{root}-{}.1", sub.get_name()));
        write_page(sub.clone(), &page)?;
    }
    write_page(cmd, &dir.join(format!("{root}.1")))?;
    println!("man pages written to {}", dir.display());
    Ok(EXIT_SUCCESS)
}
