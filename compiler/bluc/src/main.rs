//! The `blu` command.

use blu_eval::stdout_handler;
use bluc::{init_tracing, RunStatus, Session, SessionConfig, UnitRole, MODULE_EXTENSION};
use std::path::Path;

fn main() {
    init_tracing();
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];
    let status = match command.as_str() {
        "run" => {
            let Some(path) = args.get(2) else {
                eprintln!("Usage: blu run <file.blu>");
                std::process::exit(1);
            };
            run_file(path)
        }
        "check" => {
            // Files are checked as modules unless `--entry` is given.
            let (role, path) = match args.get(2).map(String::as_str) {
                Some("--entry") => (UnitRole::Entry, args.get(3)),
                _ => (UnitRole::Module, args.get(2)),
            };
            let Some(path) = path else {
                eprintln!("Usage: blu check [--entry] <file.blu>");
                std::process::exit(1);
            };
            check_file(path, role)
        }
        "help" | "--help" | "-h" => {
            print_usage();
            0
        }
        "version" | "--version" | "-V" => {
            println!("Blu {}", env!("CARGO_PKG_VERSION"));
            0
        }
        _ => {
            // A bare file path runs it.
            if Path::new(command)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(MODULE_EXTENSION))
            {
                run_file(command)
            } else {
                eprintln!("Unknown command: {command}");
                eprintln!();
                print_usage();
                1
            }
        }
    };
    std::process::exit(status);
}

fn session() -> Session {
    Session::new(SessionConfig::from_env(), stdout_handler())
}

fn run_file(path: &str) -> i32 {
    let session = session();
    match session.run_entry(Path::new(path)) {
        Ok(RunStatus::Completed) => 0,
        Ok(RunStatus::Exited(code)) => code,
        Err(err) => {
            session.report(&err);
            1
        }
    }
}

fn check_file(path: &str, role: UnitRole) -> i32 {
    let session = session();
    match session.check(Path::new(path), role) {
        Ok(()) => 0,
        Err(err) => {
            session.report(&err);
            1
        }
    }
}

fn print_usage() {
    println!("Blu interpreter");
    println!();
    println!("Usage: blu <command> [options]");
    println!();
    println!("Commands:");
    println!("  run <file.blu>     Run a Blu program");
    println!("  check <file.blu>   Analyse a module without running it");
    println!("    --entry          Analyse it as a program entry point instead");
    println!("  help               Show this help message");
    println!("  version            Show version information");
    println!();
    println!("Environment:");
    println!("  BLU_STDLIB           Standard library directory (default: <entry dir>/library)");
    println!("  BLU_MAX_CALL_DEPTH   Maximum call depth (default: 10000)");
    println!("  RUST_LOG             Enable tracing, e.g. RUST_LOG=blu_eval=debug");
    println!("  BLU_LOG_TREE         Print tracing spans as a tree");
    println!();
    println!("Examples:");
    println!("  blu main.blu");
    println!("  blu run main.blu");
    println!("  blu check lib/math.blu");
    println!("  blu check --entry main.blu");
}
