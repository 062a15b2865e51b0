//! CLI module for the User Management API
//!
//! Subcommands:
//! - `serve`: run the HTTP server (default)
//! - `migrate`: apply pending PostgreSQL migrations and exit

pub mod migrate;
pub mod serve;

use clap::{Parser, Subcommand};

/// User Management API - create, update, delete and list user accounts
#[derive(Parser)]
#[command(name = "user-management-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Run the HTTP server (default)
    Serve,

    /// Apply pending database migrations and exit
    Migrate,
}
