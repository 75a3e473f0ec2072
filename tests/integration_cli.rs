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

//! End-to-end CLI integration tests.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

const HELLO: &str = include_str!("fixtures/hello.p8");

fn cargo_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_p8cart"))
}

fn run(args: &[&Path]) -> Output {
    cargo_bin()
        .args(args)
        .output()
        .expect("Failed to execute command")
}

fn fixture(dir: &Path) -> PathBuf {
    let path = dir.join("hello.p8");
    std::fs::write(&path, HELLO).unwrap();
    path
}

/// Test --help flag.
#[test]
fn test_help_flag() {
    let output = cargo_bin()
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("p8cart"));
    assert!(stdout.contains("--output"));
    assert!(stdout.contains("--watch"));
}

/// Test --version flag.
#[test]
fn test_version_flag() {
    let output = cargo_bin()
        .arg("--version")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("p8cart"));
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

/// Without an output file a summary is printed.
#[test]
fn test_summary() {
    let dir = tempfile::tempdir().unwrap();
    let input = fixture(dir.path());

    let output = run(&[&input]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout,
        "version: 8\ncode: 24 bytes\nsections: gfx, gff, map, sfx, music\nlabel: no\n"
    );
}

/// Convert text to an image and back.
#[test]
fn test_convert_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let input = fixture(dir.path());
    let image = dir.path().join("hello.p8.png");
    let text = dir.path().join("again.p8");

    let output = run(&[&input, Path::new("-o"), &image]);
    assert!(
        output.status.success(),
        "Conversion failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(String::from_utf8_lossy(&output.stdout).starts_with("Converted "));
    assert!(image.exists(), "Output file not created");
    assert_eq!(&std::fs::read(&image).unwrap()[..4], b"\x89PNG");

    let output = run(&[&image, Path::new("--output"), &text]);
    assert!(output.status.success());

    let again = std::fs::read_to_string(&text).unwrap();
    assert!(again.starts_with("pico-8 cartridge // http://www.pico-8.com\nversion 8\n__lua__\n-- hello\n"));
    assert!(again.contains("__label__\n"));
}

/// Convert to the script container.
#[test]
fn test_convert_to_js() {
    let dir = tempfile::tempdir().unwrap();
    let input = fixture(dir.path());
    let js = dir.path().join("hello.js");

    let output = run(&[&input, Path::new("-o"), &js]);
    assert!(output.status.success());
    assert!(std::fs::read_to_string(&js).unwrap().starts_with("var _cartdat=["));
}

/// A config file sets the written version.
#[test]
fn test_config_version() {
    let dir = tempfile::tempdir().unwrap();
    let input = fixture(dir.path());
    let config = dir.path().join("codec.toml");
    std::fs::write(&config, "version = 42\n").unwrap();
    let out = dir.path().join("out.p8");

    let output = run(&[&input, Path::new("-c"), &config, Path::new("-o"), &out]);
    assert!(output.status.success());
    assert!(std::fs::read_to_string(&out).unwrap().contains("\nversion 42\n"));
}

/// A malformed input exits with code 1 and a report.
#[test]
fn test_bad_input_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("bad.p8");
    std::fs::write(&input, "not a cartridge\n").unwrap();

    let output = run(&[&input]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("E100"));
}

/// A missing input exits with code 1.
#[test]
fn test_missing_input_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(&[&dir.path().join("missing.p8")]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("E300"));
}

/// An unknown output extension exits with code 2 before anything is read.
#[test]
fn test_bad_output_extension_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    let input = fixture(dir.path());
    let out = dir.path().join("out.bin");

    let output = run(&[&input, Path::new("-o"), &out]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("E001"));
    assert!(!out.exists());
}

/// Watch mode needs an output file.
#[test]
fn test_watch_without_output_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    let input = fixture(dir.path());

    let output = run(&[&input, Path::new("--watch")]);
    assert_eq!(output.status.code(), Some(2));
}

/// A malformed config file exits with code 3.
#[test]
fn test_bad_config_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    let input = fixture(dir.path());
    let config = dir.path().join("codec.toml");
    std::fs::write(&config, "colour = true\n").unwrap();

    let output = run(&[&input, Path::new("-c"), &config]);
    assert_eq!(output.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&output.stderr).contains("E303"));
}
