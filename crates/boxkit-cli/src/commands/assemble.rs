use super::{load_selected, print_report, EXIT_SUCCESS};
use boxkit_core::{AssembleOptions, Assembler};
use boxkit_runtime::BoxBackend;

pub fn run(
    backend: &dyn BoxBackend,
    file: &str,
    name: Option<&str>,
    options: AssembleOptions,
    json: bool,
) -> Result<u8, String> {
    let Some(manifest) = load_selected(file, name)? else {
        return Ok(EXIT_SUCCESS);
    };
    let report = Assembler::new(backend, options)
        .run(&manifest)
        .map_err(|e| e.to_string())?;
    print_report(&report, json)
}
