//! Build script for rentbnb-cli.
//!
//! Generates the `rentbnb.1` man page into OUT_DIR with clap_mangen.
//!
//! Build scripts cannot depend on the crate being built, so the command
//! structure is restated here. Keep it synchronized with src/cli.rs.

use clap::{Arg, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

fn build_cli() -> Command {
    Command::new("rentbnb")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Book cabins and manage their reservations")
        .long_about(
            "Command-line tool for booking cabins, pricing stays and moving reservations \
             through check-in, check-out, cancellation and review",
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
            Arg::new("data-dir")
                .long("data-dir")
                .help("Override the data directory location")
                .value_name("PATH")
                .global(true)
                .env("RENTBNB_DATA_DIR"),
        )
        .arg(
            Arg::new("busy-timeout")
                .long("busy-timeout")
                .help("Override the default busy timeout (in seconds)")
                .value_name("SECONDS")
                .global(true)
                .env("RENTBNB_BUSY_TIMEOUT"),
        )
        .arg(
            Arg::new("disable-autoinit")
                .long("disable-autoinit")
                .help("Disable automatic database initialization")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .subcommands(vec![
            Command::new("init").about("Initialize the data directory and database"),
            Command::new("cabin")
                .about("Manage cabins")
                .long_about("Add, edit, remove, list and show cabins"),
            Command::new("book")
                .about("Book a cabin")
                .long_about("Book a cabin for a guest; prints the reservation id and total"),
            Command::new("quote").about("Price a stay without booking it"),
            Command::new("available")
                .about("Check whether a cabin is free")
                .long_about("Exit 0 when the cabin is free for the dates, 1 when it is taken"),
            Command::new("check-in").about("Check a guest in"),
            Command::new("check-out").about("Check a guest out"),
            Command::new("cancel").about("Cancel a reservation"),
            Command::new("review").about("Review a completed stay"),
            Command::new("list")
                .about("List reservations")
                .long_about("List reservations as a table, JSON, CSV or TSV"),
            Command::new("show").about("Show one reservation"),
            Command::new("reviews").about("List the reviews of a cabin"),
            Command::new("delete").about("Delete a reservation and its review"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() {
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).expect("failed to create man page directory");

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();
    man.render(&mut buffer).expect("failed to render man page");

    fs::write(man_dir.join("rentbnb.1"), buffer).expect("failed to write man page");

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
