//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `rollbook_core` linkage.
//! - Optionally open a data directory, log under `<dir>/logs`, and report
//!   roster sizes.

use rollbook_core::{default_log_level, init_logging, AppContext};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("rollbook_core ping={}", rollbook_core::ping());
    println!("rollbook_core version={}", rollbook_core::core_version());

    let Some(data_root) = std::env::args().nth(1) else {
        return ExitCode::SUCCESS;
    };

    match std::env::current_dir() {
        Ok(cwd) => {
            let log_dir = cwd.join(&data_root).join("logs");
            if let Err(err) = init_logging(default_log_level(), &log_dir) {
                eprintln!("logging disabled: {err}");
            }
        }
        Err(err) => eprintln!("logging disabled: {err}"),
    }

    match AppContext::open(&data_root) {
        Ok(context) => {
            println!("students={}", context.students.len());
            println!("teachers={}", context.teachers.len());
            println!("sections={}", context.sections.len());
            match context.shutdown() {
                Ok(()) => ExitCode::SUCCESS,
                Err(err) => {
                    eprintln!("failed to persist state under `{data_root}`: {err}");
                    ExitCode::FAILURE
                }
            }
        }
        Err(err) => {
            eprintln!("failed to open `{data_root}`: {err}");
            ExitCode::FAILURE
        }
    }
}
