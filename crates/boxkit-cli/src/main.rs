mod commands;

use boxkit_core::{Action, AssembleOptions};
use boxkit_remote::DEFAULT_MANIFEST;
use boxkit_runtime::{default_export_path, select_backend, HostConfig};
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use commands::{EXIT_FAILURE, EXIT_MANIFEST_ERROR};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "boxkit",
    version,
    about = "Create and remove distrobox containers from a manifest file"
)]
struct Cli {
    /// Output results as structured JSON.
    #[arg(long, default_value_t = false, global = true)]
    json: bool,

    /// Enable verbose (debug) logging and pass -v to distrobox.
    #[arg(short, long, default_value_t = false, global = true)]
    verbose: bool,

    /// Enable trace-level logging (more detailed than --verbose).
    #[arg(long, default_value_t = false, global = true)]
    trace: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create every container described by a manifest.
    Create {
        /// Manifest path or http(s) URL.
        #[arg(long, default_value = DEFAULT_MANIFEST)]
        file: String,
        /// Only act on this container.
        #[arg(short = 'n', long)]
        name: Option<String>,
        /// Delete each container before creating it again.
        #[arg(short = 'R', long, default_value_t = false)]
        replace: bool,
        /// Print the commands instead of running them.
        #[arg(short, long, default_value_t = false)]
        dry_run: bool,
    },
    /// Remove every container described by a manifest.
    Rm {
        /// Manifest path or http(s) URL.
        #[arg(long, default_value = DEFAULT_MANIFEST)]
        file: String,
        /// Only act on this container.
        #[arg(short = 'n', long)]
        name: Option<String>,
        /// Print the commands instead of running them.
        #[arg(short, long, default_value_t = false)]
        dry_run: bool,
    },
    /// Show resolved container specs with hooks decoded.
    Inspect {
        /// Manifest path or http(s) URL.
        #[arg(long, default_value = DEFAULT_MANIFEST)]
        file: String,
        /// Only show this container.
        #[arg(short = 'n', long)]
        name: Option<String>,
    },
    /// Generate shell completions for bash, zsh, fish, elvish, or powershell.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
    /// Generate man pages in the specified directory.
    ManPages {
        /// Output directory for man pages.
        #[arg(default_value = "man")]
        dir: PathBuf,
    },
}

fn main() -> ExitCode {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let msg = info.to_string();
        if msg.contains("Broken pipe")
            || msg.contains("broken pipe")
            || msg.contains("os error 32")
            || msg.contains("failed printing to stdout")
        {
            std::process::exit(0);
        }
        default_hook(info);
    }));

    let cli = Cli::parse();

    let default_level = if cli.trace {
        "trace"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("BOXKIT_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Create {
            file,
            name,
            replace,
            dry_run,
        } => assemble(
            &file,
            name.as_deref(),
            AssembleOptions {
                action: Action::Create,
                replace,
                dry_run,
                verbose: cli.verbose,
                export_path: PathBuf::new(),
            },
            cli.json,
        ),
        Commands::Rm {
            file,
            name,
            dry_run,
        } => assemble(
            &file,
            name.as_deref(),
            AssembleOptions {
                action: Action::Remove,
                replace: false,
                dry_run,
                verbose: cli.verbose,
                export_path: PathBuf::new(),
            },
            cli.json,
        ),
        Commands::Inspect { file, name } => commands::inspect::run(&file, name.as_deref(), cli.json),
        Commands::Completions { shell } => commands::completions::run::<Cli>(shell),
        Commands::ManPages { dir } => commands::man_pages::run::<Cli>(&dir),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(msg) => {
            eprintln!("error: {msg}");
            let code = if msg.starts_with("manifest error:") {
                EXIT_MANIFEST_ERROR
            } else {
                EXIT_FAILURE
            };
            ExitCode::from(code)
        }
    }
}

fn assemble(
    file: &str,
    name: Option<&str>,
    mut options: AssembleOptions,
    json: bool,
) -> Result<u8, String> {
    if boxkit_runtime::invoked_through_sudo() {
        return Err(
            "running boxkit via sudo or doas is not supported; set root=true in the manifest instead"
                .to_owned(),
        );
    }

    let config = HostConfig::load_default().map_err(|e| e.to_string())?;
    let backend_name = std::env::var("BOXKIT_BACKEND").unwrap_or_else(|_| "distrobox".to_owned());
    let backend = select_backend(&backend_name, &config).map_err(|e| e.to_string())?;

    if !options.dry_run
        && std::env::var("BOXKIT_SKIP_PREREQS").as_deref() != Ok("1")
        && !backend.available()
    {
        let missing = boxkit_runtime::check_prereqs();
        return Err(boxkit_runtime::format_missing(&missing));
    }

    options.export_path = match config.export_path.clone() {
        Some(path) => path,
        None => default_export_path().map_err(|e| e.to_string())?,
    };
    options.verbose |= config.verbose;

    commands::assemble::run(backend.as_ref(), file, name, options, json)
}
