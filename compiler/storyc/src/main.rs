//! Story compiler CLI.

use std::path::Path;

use storyc::{compile_files, init_tracing, CompilerConfig, DriverError};

fn print_usage() {
    eprintln!("Usage: storyc <tree.json> <story> [options]");
    eprintln!();
    eprintln!("Compiles the JSON parse tree of a story and prints its line table.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --allow-single-quotes   Accept single quoted strings");
    eprintln!("  --pretty                Indent the JSON output");
    eprintln!();
    eprintln!("Set RUST_LOG (e.g. RUST_LOG=debug) to enable logging.");
}

fn main() {
    init_tracing();
    let args: Vec<String> = std::env::args().skip(1).collect();

    let mut config = CompilerConfig::new();
    let mut pretty = false;
    let mut paths = Vec::new();
    for arg in &args {
        match arg.as_str() {
            "--allow-single-quotes" => config = config.allow_single_quotes(true),
            "--pretty" => pretty = true,
            "-h" | "--help" => {
                print_usage();
                return;
            }
            flag if flag.starts_with('-') => {
                eprintln!("error: unknown option `{flag}`");
                print_usage();
                std::process::exit(2);
            }
            path => paths.push(path),
        }
    }
    let [tree, story] = paths.as_slice() else {
        print_usage();
        std::process::exit(2);
    };

    let compiled = match compile_files(Path::new(tree), Path::new(story), &config) {
        Ok(compiled) => compiled,
        Err(DriverError::Compile(error)) if !error.is_internal() => {
            for story_error in error.story_errors() {
                eprintln!("{story_error}");
            }
            std::process::exit(1);
        }
        Err(error) => {
            eprintln!("error: {error}");
            std::process::exit(1);
        }
    };
    match compiled.to_json(pretty) {
        Ok(json) => println!("{json}"),
        Err(error) => {
            eprintln!("error: {error}");
            std::process::exit(1);
        }
    }
}
