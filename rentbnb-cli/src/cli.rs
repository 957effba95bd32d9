//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    AvailableCommand, BookCommand, CabinCommand, CancelCommand, CheckInCommand,
    CheckOutCommand, CompletionsCommand, DeleteCommand, InitCommand, ListCommand, QuoteCommand,
    ReviewCommand, ReviewsCommand, ShowCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for cabin reservations.
#[derive(Parser)]
#[command(name = "rentbnb")]
#[command(version, about = "Book cabins and manage their reservations", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "RENTBNB_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the default busy timeout (in seconds)
    #[arg(long, value_name = "SECONDS", global = true, env = "RENTBNB_BUSY_TIMEOUT")]
    pub busy_timeout: Option<u32>,

    /// Disable automatic database initialization
    #[arg(long, global = true)]
    pub disable_autoinit: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Initialize the data directory and database
    Init(InitCommand),

    /// Manage cabins
    #[command(subcommand)]
    Cabin(CabinCommand),

    /// Book a cabin
    Book(BookCommand),

    /// Price a stay without booking it
    Quote(QuoteCommand),

    /// Check whether a cabin is free (exit 0) or taken (exit 1)
    Available(AvailableCommand),

    /// Check a guest in
    CheckIn(CheckInCommand),

    /// Check a guest out
    CheckOut(CheckOutCommand),

    /// Cancel a reservation
    Cancel(CancelCommand),

    /// Review a completed stay
    Review(ReviewCommand),

    /// List reservations
    List(ListCommand),

    /// Show one reservation
    Show(ShowCommand),

    /// List the reviews of a cabin
    Reviews(ReviewsCommand),

    /// Delete a reservation and its review
    Delete(DeleteCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
