// p8cart - A codec for PICO-8 cartridge containers
// Copyright (C) 2026  Marcel Joachim Kloubert <marcel@kloubert.dev>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! p8cart CLI
//!
//! Inspects and converts PICO-8 cartridges between containers.

use clap::Parser;
use env_logger::Env;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use p8cart::watcher::CartWatcher;
use p8cart::{format_error, CartError, Cartridge, CodecConfig, Format};

/// p8cart - Convert PICO-8 cartridges between containers
#[derive(Parser, Debug)]
#[command(name = "p8cart")]
#[command(version)]
#[command(about = "Inspect and convert PICO-8 cartridges (.p8, .png, .js, .lua)")]
#[command(long_about = r#"
p8cart reads a PICO-8 cartridge in any supported container and either
prints a summary of it or writes it to another container. The container
is chosen by file extension:
  - .p8   text cartridge
  - .png  image cartridge
  - .js   web export
  - .lua  bare source code

Example usage:
  p8cart game.p8.png
  p8cart game.p8.png -o game.p8
  p8cart game.p8 -o game.p8.png -c codec.toml

Watch mode:
  p8cart game.p8 -o game.js --watch
"#)]
struct Cli {
    /// Cartridge to read
    input: PathBuf,

    /// Cartridge to write. Without it a summary is printed.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Codec settings (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Convert again whenever the input changes (requires --output)
    #[arg(short, long)]
    watch: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    let config = match &cli.config {
        Some(path) => match CodecConfig::from_toml_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprint!("{}", format_error(&e, "", None));
                return ExitCode::from(3);
            }
        },
        None => CodecConfig::default(),
    };

    if let Some(output) = &cli.output {
        if let Err(e) = Format::from_path(output) {
            eprint!("{}", format_error(&e, "", None));
            return ExitCode::from(2);
        }
    } else if cli.watch {
        eprintln!("Error: --watch needs an output file. Use -o <file>");
        return ExitCode::from(2);
    }

    if let Err(e) = run_once(&cli, &config) {
        report(&e, &cli.input);
        return ExitCode::from(1);
    }

    if cli.watch {
        return run_watch_loop(&cli, &config);
    }

    ExitCode::SUCCESS
}

/// Load the input and either save it or print its summary.
fn run_once(cli: &Cli, config: &CodecConfig) -> p8cart::Result<()> {
    let cart = Cartridge::from_file(&cli.input)?;

    match &cli.output {
        Some(output) => {
            cart.save(output, config)?;
            println!("Converted {} -> {}", cli.input.display(), output.display());
        }
        None => print!("{}", summary(&cart)),
    }
    Ok(())
}

/// Print an error, with source context when it points into a text file.
fn report(error: &CartError, path: &Path) {
    let source = match error.span {
        Some(_) => std::fs::read(path)
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
            .unwrap_or_default(),
        None => String::new(),
    };
    let filename = path.file_name().and_then(|s| s.to_str());
    eprint!("{}", format_error(error, &source, filename));
}

/// Describe a cartridge in a few lines.
fn summary(cart: &Cartridge) -> String {
    let memory = cart.memory();
    let non_empty = |bytes: &[u8]| bytes.iter().any(|&b| b != 0);

    let sections: Vec<&str> = [
        ("gfx", non_empty(memory.gfx())),
        ("gff", non_empty(memory.gfx_props())),
        ("map", non_empty(memory.map())),
        ("sfx", non_empty(memory.sfx_bytes())),
        ("music", non_empty(memory.songs())),
    ]
    .iter()
    .filter(|(_, used)| *used)
    .map(|(name, _)| *name)
    .collect();

    let mut text = String::new();
    text.push_str(&format!("version: {}\n", cart.version()));
    text.push_str(&format!("code: {} bytes\n", cart.code().len()));
    text.push_str(&format!(
        "sections: {}\n",
        if sections.is_empty() {
            "none".to_string()
        } else {
            sections.join(", ")
        }
    ));
    text.push_str(&format!(
        "label: {}\n",
        if cart.label().is_some() { "yes" } else { "no" }
    ));
    text
}

/// Re-run the conversion each time the input changes.
fn run_watch_loop(cli: &Cli, config: &CodecConfig) -> ExitCode {
    let watcher = match CartWatcher::new(&cli.input) {
        Ok(w) => w,
        Err(e) => {
            eprintln!("Error: Failed to create file watcher: {}", e);
            return ExitCode::from(6);
        }
    };

    println!("Watching for changes... (Press Ctrl+C to stop)");

    loop {
        if let Err(e) = watcher.wait_for_change() {
            eprintln!("Watch error: {}", e);
            return ExitCode::from(6);
        }

        if cli.verbose {
            println!("Change detected, converting...");
        }

        if let Err(e) = run_once(cli, config) {
            report(&e, &cli.input);
            println!("Fix errors and save to retry.");
        }
    }
}
