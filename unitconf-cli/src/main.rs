//! Command-line interface for unitconf
//! This binary loads a directory of TOML documents and shows the result, optionally
//! splitting value+unit strings into numbers or quantities.
//!
//! Usage:
//!   unitconf `<dir>` [--mode `<mode>`] [--recursive | --no-recursive] [--extension `<ext>`]
//!   unitconf `<dir>` --get `<document.path>`                  - Print a single value
//!   unitconf `<dir>` --settings `<file>`                      - Layer a settings file

use clap::{Arg, ArgAction, ArgMatches, Command};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use unitconf_config::{Loader, UnitconfConfig};
use unitconf_parser::formats::{to_treeviz_str, value_to_treeviz_str};
use unitconf_parser::{lookup, Documents, Mode};

fn main() {
    let matches = Command::new("unitconf")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Load a directory of TOML documents and parse value+unit strings")
        .arg_required_else_help(true)
        .arg(
            Arg::new("dir")
                .help("Directory containing the documents")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("mode")
                .long("mode")
                .short('m')
                .help("Transform mode: raw, unitless or parsed (case-insensitive)"),
        )
        .arg(
            Arg::new("recursive")
                .long("recursive")
                .short('r')
                .help("Search subdirectories as well")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-recursive")
                .long("no-recursive")
                .help("Only search the top-level directory, even if settings say otherwise")
                .action(ArgAction::SetTrue)
                .conflicts_with("recursive"),
        )
        .arg(
            Arg::new("extension")
                .long("extension")
                .short('e')
                .help("Document extension to search for (default: toml)"),
        )
        .arg(
            Arg::new("settings")
                .long("settings")
                .short('s')
                .help("Settings file layered over the built-in defaults"),
        )
        .arg(
            Arg::new("get")
                .long("get")
                .short('g')
                .help("Print one value, addressed as <document>.<key>.<key>..."),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log discovery and transform steps to stderr")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    init_tracing(matches.get_flag("verbose"));

    let settings = resolve_settings(&matches).unwrap_or_else(|e| {
        eprintln!("Settings error: {}", e);
        eprintln!("Available modes: {}", mode_names());
        std::process::exit(1);
    });

    let dir = matches
        .get_one::<String>("dir")
        .expect("dir is a required argument");
    debug!(?settings, "resolved settings");

    let documents = settings.loader.into_loader(dir).load().unwrap_or_else(|e| {
        eprintln!("Load error: {}", e);
        std::process::exit(1);
    });

    match matches.get_one::<String>("get") {
        Some(path) => handle_get_command(&documents, path),
        None => print!("{}", to_treeviz_str(&documents)),
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Defaults, then the settings file, then command-line flags
fn resolve_settings(matches: &ArgMatches) -> Result<UnitconfConfig, String> {
    let mut loader = Loader::new();
    if let Some(path) = matches.get_one::<String>("settings") {
        loader = loader.with_file(path);
    }
    if let Some(mode) = matches.get_one::<String>("mode") {
        loader = loader
            .set_override("loader.mode", mode.as_str())
            .map_err(|e| e.to_string())?;
    }
    if matches.get_flag("recursive") || matches.get_flag("no-recursive") {
        loader = loader
            .set_override("loader.recursive", matches.get_flag("recursive"))
            .map_err(|e| e.to_string())?;
    }
    if let Some(extension) = matches.get_one::<String>("extension") {
        loader = loader
            .set_override("loader.extension", extension.as_str())
            .map_err(|e| e.to_string())?;
    }
    loader.build().map_err(|e| e.to_string())
}

/// Handle `--get document.key.key`, printing the tree view of that value
fn handle_get_command(documents: &Documents, path: &str) {
    let value = lookup(documents, path).unwrap_or_else(|| {
        eprintln!("No value at '{}'", path);
        eprintln!(
            "Loaded documents: {}",
            documents.keys().cloned().collect::<Vec<_>>().join(", ")
        );
        std::process::exit(1);
    });

    let label = path.rsplit('.').next().unwrap_or(path);
    print!("{}", value_to_treeviz_str(label, value));
}

fn mode_names() -> String {
    Mode::ALL
        .iter()
        .map(Mode::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
