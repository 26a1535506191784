//! CLI tool for cellgrid - derives a grid layout and outputs JSON
//!
//! Usage:
//!   grid_cli <grid.json>              # Output layout JSON to stdout
//!   grid_cli <grid.json> -o out.json  # Output layout JSON to file
//!   grid_cli - < grid.json            # Read the declaration from stdin
//!
//! Set `RUST_LOG=cellgrid=debug` to trace matrix building.

use std::env;
use std::fs;
use std::io::{self, Read, Write};
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some(input_path) = args.first() else {
        eprintln!("Usage: grid_cli <grid.json | -> [-o output.json]");
        return ExitCode::FAILURE;
    };
    let output_path = match args.get(1..3) {
        Some([flag, path]) if flag == "-o" => Some(path),
        _ => None,
    };

    match run(input_path, output_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(input_path: &str, output_path: Option<&String>) -> Result<(), Box<dyn std::error::Error>> {
    let input = if input_path == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(input_path).map_err(|e| format!("reading {input_path}: {e}"))?
    };

    let summary = cellgrid::summary::layout_json(&input)?;
    let json = serde_json::to_string_pretty(&summary)?;

    match output_path {
        Some(path) => {
            fs::write(path, &json).map_err(|e| format!("writing {path}: {e}"))?;
            eprintln!("Written: {path}");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(json.as_bytes())?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}
