//! Command-line interface for texttag
//! Strips and parses curve tags in dialogue text, and aligns them to a recognized word list.
//!
//! Usage:
//!   texttag strip `<path>`                                         - Print the stripped text
//!   texttag parse `<path>` [--words `<json>`] [--format `<format>`]  - Parse and align tags
//!   texttag chunks `<path>` [--duration `<seconds>`]                 - Print the timing chunks
//!   texttag list-formats                                         - List the output formats
//!
//! `--config <toml>` layers a configuration file over the built-in defaults. Log output goes to
//! stderr and is filtered by `RUST_LOG`, falling back to `logging.level` from the configuration.

use clap::{Arg, ArgAction, ArgMatches, Command};
use texttag::texttag::chunking::validate_chunks;
use texttag::texttag::config::{Loader, TexttagConfig};
use texttag::texttag::formats::FormatRegistry;
use texttag::texttag::words::{load_word_list, WordRecord};
use texttag::texttag::TextTagParser;
use tracing_subscriber::EnvFilter;

fn main() {
    let matches = Command::new("texttag")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for parsing curve tags in dialogue text")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file layered over the defaults")
                .global(true),
        )
        .subcommand(
            Command::new("strip")
                .about("Print the text with tags, chunk markers and punctuation removed")
                .arg(
                    Arg::new("path")
                        .help("Path to the text file")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(
            Command::new("parse")
                .about("Parse tags and align them to a word list")
                .arg(
                    Arg::new("path")
                        .help("Path to the text file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("words")
                        .long("words")
                        .short('w')
                        .help("JSON word list (strings or {text, start, end} records)"),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format (e.g., 'json', 'yaml', 'tag')"),
                )
                .arg(
                    Arg::new("compact")
                        .long("compact")
                        .help("Single-line JSON output")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("chunks")
                .about("Print the timing chunks of a text")
                .arg(
                    Arg::new("path")
                        .help("Path to the text file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("duration")
                        .long("duration")
                        .short('d')
                        .help("Audio length in seconds; checks the chunk times against it")
                        .value_parser(clap::value_parser!(f32)),
                ),
        )
        .subcommand(Command::new("list-formats").about("List available output formats"))
        .get_matches();

    let config = load_config(&matches);
    init_logging(&config);

    match matches.subcommand() {
        Some(("strip", strip_matches)) => {
            let path = strip_matches.get_one::<String>("path").unwrap();
            handle_strip_command(path, &config);
        }
        Some(("parse", parse_matches)) => {
            let path = parse_matches.get_one::<String>("path").unwrap();
            let words = parse_matches.get_one::<String>("words").map(String::as_str);
            handle_parse_command(path, words, &config);
        }
        Some(("chunks", chunk_matches)) => {
            let path = chunk_matches.get_one::<String>("path").unwrap();
            let duration = chunk_matches.get_one::<f32>("duration").copied();
            handle_chunks_command(path, duration);
        }
        Some(("list-formats", _)) => {
            handle_list_formats_command();
        }
        _ => unreachable!(),
    }
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", message);
    std::process::exit(1);
}

/// Defaults, then `--config`, then the `parse` flags that mirror `[output]` keys.
fn load_config(matches: &ArgMatches) -> TexttagConfig {
    let mut loader = Loader::new();
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if let Some(("parse", parse_matches)) = matches.subcommand() {
        if let Some(format) = parse_matches.get_one::<String>("format") {
            loader = loader
                .set_override("output.format", format.as_str())
                .unwrap_or_else(|e| fail(e));
        }
        if parse_matches.get_flag("compact") {
            loader = loader
                .set_override("output.pretty", false)
                .unwrap_or_else(|e| fail(e));
        }
    }
    loader.build().unwrap_or_else(|e| fail(e))
}

fn init_logging(config: &TexttagConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_source(path: &str) -> String {
    std::fs::read_to_string(path).unwrap_or_else(|e| fail(format!("reading {path}: {e}")))
}

/// Handle the strip command
fn handle_strip_command(path: &str, config: &TexttagConfig) {
    let source = read_source(path);
    let parser = TextTagParser::with_defaults(config.tags.clone());
    println!("{}", parser.parse_text(&source).stripped_text());
}

/// Handle the parse command
fn handle_parse_command(path: &str, words: Option<&str>, config: &TexttagConfig) {
    let source = read_source(path);
    let words: Vec<WordRecord> = match words {
        Some(words_path) => load_word_list(words_path).unwrap_or_else(|e| fail(e)),
        None => Vec::new(),
    };

    let parser = TextTagParser::with_defaults(config.tags.clone());
    let output = parser.parse(&source, &words);

    let serialized = FormatRegistry::for_output(&config.output)
        .serialize(&output, &config.output.format)
        .unwrap_or_else(|e| fail(e));

    println!("{}", serialized);
}

/// Handle the chunks command
fn handle_chunks_command(path: &str, duration: Option<f32>) {
    let source = read_source(path);
    let chunks = TextTagParser::new().parse_text(&source).chunks().to_vec();

    let serialized = match duration {
        Some(duration) => {
            let resolved = validate_chunks(&chunks, duration).unwrap_or_else(|e| fail(e));
            serde_json::to_string_pretty(&resolved)
        }
        None => serde_json::to_string_pretty(&chunks),
    };

    println!("{}", serialized.unwrap_or_else(|e| fail(e)));
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    let registry = FormatRegistry::with_defaults();
    println!("Available output formats:\n");
    for name in registry.list_formats() {
        let description = registry.get(&name).map(|f| f.description()).unwrap_or("");
        println!("  {name}");
        println!("    {description}");
    }
}
