//! Quill CLI
//!
//! Renders, canonicalizes and checks quill templates.

use quillc::commands::{canon_source, check_source, read_file, render_source, RenderOptions};
use quillc::init_tracing;

fn main() {
    init_tracing();
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 3 {
        print_usage();
        std::process::exit(if args.len() < 2 { 0 } else { 1 });
    }

    let path = &args[2];
    let result = match args[1].as_str() {
        "render" => match RenderOptions::parse(&args[3..]) {
            Ok(options) => render_source(path, &read_file(path), &options),
            Err(msg) => {
                eprintln!("error: {msg}");
                eprintln!("Usage: quill render <file> [--set name=value]... [--max-depth N]");
                std::process::exit(1);
            }
        },
        "canon" => canon_source(path, &read_file(path)).map(|mut text| {
            text.push('\n');
            text
        }),
        "check" => check_source(path, &read_file(path)).map(|mut text| {
            text.push('\n');
            text
        }),
        other => {
            eprintln!("error: unknown command '{other}'");
            print_usage();
            std::process::exit(1);
        }
    };

    match result {
        Ok(output) => print!("{output}"),
        Err(report) => {
            eprintln!("{report}");
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!("Usage: quill <command> <file> [options]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  render <file>   Run a template and print its output");
    eprintln!("      --set name=value   Add a data-model variable (repeatable)");
    eprintln!("      --max-depth N      Limit macro/function call depth");
    eprintln!("  canon <file>    Print the canonical form");
    eprintln!("  check <file>    Parse only and report errors");
}
