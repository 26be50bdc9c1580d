//! Build script for deepcfg-cli.
//!
//! This script generates man pages at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// IMPORTANT: Keep this structure synchronized with src/cli.rs
/// When adding/removing/modifying commands, update both files.
fn build_cli() -> Command {
    Command::new("deepcfg")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Check and repair project configuration directories")
        .long_about(
            "Command-line tool for validating, repairing and scaffolding deep learning project configurations",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config-dir")
                .long("config-dir")
                .help("Configuration directory holding one YAML file per section")
                .value_name("PATH")
                .global(true)
                .env("DEEPCFG_CONFIG_DIR")
                .default_value("config"),
        )
        .arg(
            Arg::new("extension")
                .long("extension")
                .help("File extension of section files")
                .value_name("EXT")
                .global(true)
                .default_value("yaml"),
        )
        .arg(
            Arg::new("placeholders")
                .long("placeholders")
                .help("Give empty wildcard sections (losses, metrics) one example entry")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .subcommands(vec![
            Command::new("check")
                .about("Load and validate a configuration directory")
                .long_about(
                    "Load every section file, fill in defaults, coerce values and report each correction",
                ),
            Command::new("init")
                .about("Write a sample configuration directory")
                .long_about("Scaffold a configuration directory from the schema's example values"),
            Command::new("show")
                .about("Print the validated configuration or one node of it")
                .long_about("Print the validated configuration as YAML, JSON or flat path listing"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() {
    // Generate man pages at build time
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    let app = build_cli();
    let man = Man::new(app);
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();

    fs::write(man_dir.join("deepcfg.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
