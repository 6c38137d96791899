//! Command-line interface for shorthand
//! This binary compiles shorthand files into HTML and inspects them.
//!
//! Usage:
//!   shorthand compile `<path>` [--format `<format>`] [--config `<file>`] [--define `<name=value>`]...
//!   shorthand check `<path>` [--config `<file>`]                - Report diagnostics only
//!   shorthand ast `<path>` [--format `<format>`]                - Print the parsed syntax tree
//!
//! A path of `-` reads standard input. Exit status is 0 when the source compiled cleanly, 1
//! when diagnostics were reported and 2 when the input or the configuration could not be read.

use clap::{Arg, ArgAction, ArgMatches, Command};
use shorthand::shorthand::config::Loader;
use shorthand::shorthand::parsing::parse;
use shorthand::{compile_with_options, Bindings, Compilation, Diagnostics, ShorthandConfig};
use std::io::{Read, Write};
use std::process;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const EXIT_DIAGNOSTICS: i32 = 1;
const EXIT_FAILURE: i32 = 2;

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let matches = build_cli().get_matches();

    let code = match matches.subcommand() {
        Some(("compile", compile_matches)) => handle_compile_command(compile_matches),
        Some(("check", check_matches)) => handle_check_command(check_matches),
        Some(("ast", ast_matches)) => handle_ast_command(ast_matches),
        _ => unreachable!(),
    };
    let _ = std::io::stdout().flush();
    process::exit(code);
}

fn build_cli() -> Command {
    let path = Arg::new("path")
        .help("Path to the shorthand file, or - for standard input")
        .required(true)
        .index(1);
    let config = Arg::new("config")
        .long("config")
        .short('c')
        .help("TOML file layered over the built-in defaults");

    Command::new("shorthand")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Compile shorthand markup into HTML")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("compile")
                .about("Compile a file and print the result")
                .arg(path.clone())
                .arg(config.clone())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format")
                        .value_parser(["html", "json", "yaml"])
                        .default_value("html"),
                )
                .arg(
                    Arg::new("define")
                        .long("define")
                        .short('D')
                        .help("Value for an embedded expression, as name=value")
                        .value_parser(parse_define)
                        .action(ArgAction::Append),
                ),
        )
        .subcommand(
            Command::new("check")
                .about("Compile a file and print only its diagnostics")
                .arg(path.clone())
                .arg(config.clone()),
        )
        .subcommand(
            Command::new("ast")
                .about("Print the parsed syntax tree")
                .arg(path)
                .arg(config)
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format")
                        .value_parser(["json", "yaml"])
                        .default_value("json"),
                ),
        )
}

fn parse_define(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected name=value, got '{}'", raw)),
    }
}

/// Handle the compile command
fn handle_compile_command(matches: &ArgMatches) -> i32 {
    let config = load_config(matches);
    let source = read_source(matches);

    let mut bindings = Bindings::from(config.bindings.clone());
    if let Some(defines) = matches.get_many::<(String, String)>("define") {
        for (name, value) in defines {
            bindings.insert(name.clone(), value.clone());
        }
    }

    let compilation = compile_with_options(&source, &bindings, &config.compile);
    let format = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("html");

    match format {
        "json" => print_serialized(serde_json::to_string_pretty(&compilation).map(|s| s + "\n")),
        "yaml" => print_serialized(serde_yaml::to_string(&compilation)),
        _ => {
            print!("{}", compilation.html);
            report(&compilation.diagnostics);
        }
    }

    exit_code(&compilation)
}

/// Handle the check command
fn handle_check_command(matches: &ArgMatches) -> i32 {
    let config = load_config(matches);
    let source = read_source(matches);

    let bindings = Bindings::from(config.bindings);
    let compilation = compile_with_options(&source, &bindings, &config.compile);
    for diagnostic in &compilation.diagnostics {
        println!("{}", diagnostic);
    }

    exit_code(&compilation)
}

/// Handle the ast command
fn handle_ast_command(matches: &ArgMatches) -> i32 {
    let config = load_config(matches);
    let source = read_source(matches);

    let parsed = parse(&source, &config.compile);
    match matches.get_one::<String>("format").map(String::as_str) {
        Some("yaml") => print_serialized(serde_yaml::to_string(&parsed.document)),
        _ => print_serialized(serde_json::to_string_pretty(&parsed.document).map(|s| s + "\n")),
    }
    report(&parsed.diagnostics);

    if parsed.diagnostics.is_empty() {
        0
    } else {
        EXIT_DIAGNOSTICS
    }
}

fn load_config(matches: &ArgMatches) -> ShorthandConfig {
    let mut loader = Loader::new();
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    loader.build().unwrap_or_else(|e| {
        eprintln!("Error loading configuration: {}", e);
        process::exit(EXIT_FAILURE);
    })
}

fn read_source(matches: &ArgMatches) -> String {
    let path = matches
        .get_one::<String>("path")
        .map(String::as_str)
        .unwrap_or("-");

    let result = if path == "-" {
        let mut source = String::new();
        std::io::stdin().read_to_string(&mut source).map(|_| source)
    } else {
        std::fs::read_to_string(path)
    };

    result.unwrap_or_else(|e| {
        eprintln!("Error reading {}: {}", path, e);
        process::exit(EXIT_FAILURE);
    })
}

fn print_serialized<E: std::fmt::Display>(serialized: Result<String, E>) {
    match serialized {
        Ok(output) => print!("{}", output),
        Err(e) => {
            eprintln!("Error formatting output: {}", e);
            process::exit(EXIT_FAILURE);
        }
    }
}

fn report(diagnostics: &Diagnostics) {
    for diagnostic in diagnostics {
        eprintln!("{}", diagnostic);
    }
}

fn exit_code(compilation: &Compilation) -> i32 {
    if compilation.is_clean() {
        0
    } else {
        EXIT_DIAGNOSTICS
    }
}
