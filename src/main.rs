//! CLI entry point for dirprint

use std::path::{Path, PathBuf};
use std::process;

use clap::{CommandFactory, FromArgMatches, Parser};
use dirprint::CommandRegistry;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "dirprint")]
#[command(about = "Walk a directory tree and print it as an aligned listing or a styled spreadsheet")]
#[command(version, arg_required_else_help = true)]
struct Cli {
    /// Directory to process
    directory: PathBuf,

    /// Command to run on the directory, followed by its options
    /// (see `dirprint <DIRECTORY> <COMMAND> --help`)
    #[arg(
        value_name = "COMMAND",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    command: Vec<String>,
}

/// Install the stderr log subscriber. `RUST_LOG` wins over the verbosity flag.
fn init_logging(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

/// Resolve `directory` against the current directory, dropping `.` and `..`.
fn resolve_directory(directory: &Path) -> PathBuf {
    if let Ok(canonical) = directory.canonicalize() {
        return canonical;
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(directory),
        Err(_) => directory.to_path_buf(),
    }
}

fn main() {
    let mut registry = CommandRegistry::with_builtins();
    let mut cli_command = Cli::command().after_help(registry.help());
    let matches = cli_command.clone().get_matches();
    let cli = match Cli::from_arg_matches(&matches) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("dirprint: argument parsing error: {}", e);
            process::exit(1);
        }
    };

    let directory = resolve_directory(&cli.directory);
    if !directory.is_dir() {
        eprintln!("dirprint: {} is not a directory", cli.directory.display());
        process::exit(1);
    }

    // Everything after the command name belongs to the command, `--help` included.
    let mut words = cli.command.into_iter();
    let Some(name) = words.next() else {
        eprintln!("dirprint: no command given");
        eprintln!("{}", cli_command.render_help());
        process::exit(1);
    };

    let supported = registry.names().join(", ");
    let Some(command) = registry.get_mut(&name) else {
        eprintln!("dirprint: Unknown command {}", name);
        eprintln!("Supported commands are: {}", supported);
        process::exit(1);
    };

    let args: Vec<String> = words.collect();
    if let Err(e) = command.parse_args(&args) {
        e.exit();
    }

    init_logging(command.verbose());

    if let Err(e) = command.start(&directory) {
        eprintln!("dirprint: {}", e);
        process::exit(1);
    }
}
