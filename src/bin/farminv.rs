//! Farm inventory CLI (farminv) - Main binary entry point

use clap::Parser;
use farminv::cli::args::CliArgs;
use farminv::cli::output::{console_notifier, format_json, format_text};
use farminv::services::source::MemoryHierarchy;
use farminv::{ProgressOptions, run_inventory};
use std::process;

fn main() {
    // Initialize logger (controlled by RUST_LOG environment variable)
    // Example: RUST_LOG=debug farminv --source farm.json ...
    env_logger::init();

    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let code = if err.use_stderr() { 2 } else { 0 };
            let _ = err.print();
            process::exit(code);
        }
    };

    process::exit(handle_run(&args));
}

fn handle_run(args: &CliArgs) -> i32 {
    let config = match args.to_run_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {err}");
            return exit_code(&err);
        }
    };

    let source = match MemoryHierarchy::from_json_file(&args.source) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("Error: failed to load {}: {err}", args.source.display());
            return 4;
        }
    };

    let progress = (!args.quiet).then(|| ProgressOptions {
        notifier: console_notifier(),
        interval: args.progress_interval(),
    });

    if !args.quiet {
        eprintln!("Inventory of {}", args.source.display());
    }

    let summary = match run_inventory(&source, &config, progress) {
        Ok(summary) => summary,
        Err(err) => {
            eprintln!("Error: {err}");
            return exit_code(&err);
        }
    };

    if args.json {
        println!("{}", format_json(&summary));
    } else if !args.quiet {
        eprint!("{}", format_text(&summary));
    }

    if summary.has_failures() { 3 } else { 0 }
}

fn exit_code(err: &farminv::Error) -> i32 {
    match err {
        farminv::Error::InvalidInput(_) => 2,
        _ => 4,
    }
}
