//! Slang CLI

use slangc::{
    init_tracing, lex_source, parse_source, prepare, render, run_source, SlangError,
    SourceOptions,
};

fn main() {
    init_tracing();
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = args[1].as_str();
    if matches!(command, "help" | "--help" | "-h") {
        print_usage();
        return;
    }
    if !matches!(command, "run" | "lex" | "parse" | "transcribe") {
        eprintln!("error: unknown command '{command}'");
        eprintln!();
        print_usage();
        std::process::exit(1);
    }

    let mut options = SourceOptions::default();
    let mut file_path = None;
    for arg in args.iter().skip(2) {
        if arg == "--plain" {
            options.plain = true;
        } else if !arg.starts_with('-') && file_path.is_none() {
            file_path = Some(arg.as_str());
        } else {
            eprintln!("warning: ignoring argument '{arg}'");
        }
    }

    let Some(path) = file_path else {
        eprintln!("error: missing file path");
        eprintln!("Usage: slang {command} <file> [--plain]");
        std::process::exit(1);
    };

    let content = read_file(path);
    let source = prepare(&content, options);

    let result = match command {
        "run" => run_file(&source),
        "lex" => lex_file(&source),
        "parse" => parse_file(&source),
        _ => {
            print!("{source}");
            Ok(())
        }
    };

    if let Err(err) = result {
        eprint!("{}", render(&err, &source, path));
        std::process::exit(1);
    }
}

fn run_file(source: &str) -> Result<(), SlangError> {
    let mut interpreter = slang_eval::Interpreter::new();
    run_source(source, &mut interpreter)?;
    Ok(())
}

fn lex_file(source: &str) -> Result<(), SlangError> {
    for token in lex_source(source)? {
        println!("{token:?}");
    }
    Ok(())
}

fn parse_file(source: &str) -> Result<(), SlangError> {
    println!("{}", parse_source(source)?);
    Ok(())
}

fn read_file(path: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            let msg = match e.kind() {
                std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
                std::io::ErrorKind::PermissionDenied => {
                    format!("permission denied reading '{path}'")
                }
                std::io::ErrorKind::InvalidData => {
                    format!("'{path}' contains invalid UTF-8 data")
                }
                _ => format!("error reading '{path}': {e}"),
            };
            eprintln!("error: {msg}");
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("Slang interpreter");
    println!();
    println!("Usage: slang <command> <file> [--plain]");
    println!();
    println!("Commands:");
    println!("  run <file>          Evaluate a program");
    println!("  lex <file>          Print the token stream");
    println!("  parse <file>        Print the parsed program as canonical source");
    println!("  transcribe <file>   Print the source with slang spellings rewritten");
    println!();
    println!("Options:");
    println!("  --plain             Read canonical syntax only; skip the transcriber");
    println!();
    println!("Environment:");
    println!("  RUST_LOG            Enable tracing output, e.g. RUST_LOG=slang_eval=debug");
    println!("  SLANG_LOG_TREE      Render tracing spans as a tree");
}
