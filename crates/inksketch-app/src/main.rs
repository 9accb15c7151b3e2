//! Command-line converter (native).
//!
//! Usage: `inksketch [--json] [--strict] <sketch.json>`
//!
//! Prints the saved sketch as vector markup, or with `--json` re-encoded in
//! the latest sketch format.

#[cfg(feature = "native")]
fn main() {
    use inksketch_app::{OutputFormat, convert_file};
    use std::path::PathBuf;

    env_logger::init();

    let mut output = OutputFormat::Markup;
    let mut strict = false;
    let mut input: Option<PathBuf> = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--json" => output = OutputFormat::Json,
            "--strict" => strict = true,
            "-h" | "--help" => {
                println!("Usage: inksketch [--json] [--strict] <sketch.json>");
                return;
            }
            _ if arg.starts_with("--") => {
                log::error!("Unknown option: {}", arg);
                std::process::exit(2);
            }
            _ => input = Some(PathBuf::from(arg)),
        }
    }

    let Some(path) = input else {
        log::error!("No input file given");
        std::process::exit(2);
    };

    log::info!("Converting {}", path.display());
    match convert_file(&path, output, strict) {
        Ok(text) => println!("{}", text),
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(not(feature = "native"))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}
