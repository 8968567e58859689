//! Command-line interface for brigates
//! This binary scans a brigates-annotated Verilog file and prints the semantic highlighting
//! spans the language server would send to an editor.
//!
//! Usage:
//!   brigates `<path>` [--format `<format>`] [--config `<file>`] [--verbose]   - Scan a file
//!   brigates --list-legend                                                  - Print the legends

use brigates_config::{BrigatesConfig, Loader, OutputFormat};
use brigates_scanner::legend::{TOKEN_MODIFIERS_LEGEND, TOKEN_TYPES_LEGEND};
use brigates_scanner::{encode_relative, DocumentLoader, SemanticSpan};
use clap::{Arg, ArgAction, Command};
use std::fmt::Display;
use tracing_subscriber::EnvFilter;

fn main() {
    let matches = Command::new("brigates")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Print the semantic highlighting of brigates-annotated Verilog files")
        .arg_required_else_help(true)
        .arg(
            Arg::new("path")
                .help("Path to the Verilog file")
                .required_unless_present("list-legend")
                .index(1),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format: json, simple or encoded (default: output.format from config)"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file layered over the built-in defaults"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Enable debug logging on stderr")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list-legend")
                .long("list-legend")
                .help("List token types and modifiers with their indices")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    if matches.get_flag("list-legend") {
        handle_list_legend_command();
        return;
    }

    let config = load_config(matches.get_one::<String>("config"));
    init_logging(matches.get_flag("verbose"), &config.logging.level);

    let format = match matches.get_one::<String>("format") {
        Some(name) => OutputFormat::from_name(name).unwrap_or_else(|| {
            fail(format!(
                "unknown format '{}' (expected one of: {})",
                name,
                OutputFormat::ALL.map(OutputFormat::as_str).join(", ")
            ))
        }),
        None => config.output.format,
    };
    let Some(path) = matches.get_one::<String>("path") else {
        fail("a path is required unless --list-legend is given");
    };
    handle_scan_command(path, format);
}

fn fail(message: impl Display) -> ! {
    eprintln!("Error: {}", message);
    std::process::exit(1);
}

fn load_config(path: Option<&String>) -> BrigatesConfig {
    let loader = match path {
        Some(path) => Loader::new().with_file(path),
        None => Loader::new(),
    };
    loader
        .build()
        .unwrap_or_else(|e| fail(format!("failed to load configuration: {}", e)))
}

/// `BRIGATES_LOG` wins, then `--verbose`, then the configured level.
fn init_logging(verbose: bool, level: &str) {
    let filter = match EnvFilter::try_from_env("BRIGATES_LOG") {
        Ok(filter) => filter,
        Err(_) if verbose => EnvFilter::new("debug"),
        Err(_) => EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info")),
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Handle the scan command
fn handle_scan_command(path: &str, format: OutputFormat) {
    let loader = DocumentLoader::from_path(path).unwrap_or_else(|e| fail(e));
    let spans = loader.scan();
    tracing::debug!(path, spans = spans.len(), %format, "scan finished");

    let formatted = match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(&spans).unwrap_or_else(|e| fail(e)) + "\n"
        }
        OutputFormat::Simple => render_simple(&spans),
        OutputFormat::Encoded => render_encoded(&spans),
    };
    print!("{}", formatted);
}

fn render_simple(spans: &[SemanticSpan]) -> String {
    spans
        .iter()
        .map(|span| {
            format!(
                "{}:{}+{} {}\n",
                span.line,
                span.start_character,
                span.length,
                span.label()
            )
        })
        .collect()
}

fn render_encoded(spans: &[SemanticSpan]) -> String {
    encode_relative(spans)
        .into_iter()
        .map(|token| {
            let [line, start, length, token_type, modifiers] = token.to_array();
            format!("{} {} {} {} {}\n", line, start, length, token_type, modifiers)
        })
        .collect()
}

/// Handle the list-legend command
fn handle_list_legend_command() {
    println!("Token types:");
    for (index, name) in TOKEN_TYPES_LEGEND.iter().enumerate() {
        println!("  {:>2}  {}", index, name);
    }
    println!();
    println!("Token modifiers:");
    for (index, name) in TOKEN_MODIFIERS_LEGEND.iter().enumerate() {
        println!("  {:>2}  {} (bit {})", index, name, 1u32 << index);
    }
}
