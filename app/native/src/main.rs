#![allow(clippy::multiple_crate_versions)]

//! Jester command-line entry point.

fn main() {
    jester_lib::logging::init();

    if let Err(err) = jester_lib::cli::run() {
        eprintln!("jester: {err}");
        std::process::exit(1);
    }
}
