//! CLI argument parsing with clap

use clap::{Args, Parser, Subcommand};

/// Brokkr - Django project bootstrapper
#[derive(Parser, Debug)]
#[command(name = "brokkr")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new Django project with apps, venv, and migrations
    New(NewArgs),

    /// Check that the required Python tooling is available
    Doctor(DoctorArgs),
}

// New command
#[derive(Args, Debug)]
pub struct NewArgs {
    /// Project name (prompted for when omitted)
    pub name: Option<String>,

    /// App to create inside the project (repeatable)
    #[arg(short, long = "app", value_name = "NAME")]
    pub apps: Vec<String>,

    /// Virtual environment directory name
    #[arg(long, default_value = "venv")]
    pub venv: String,

    /// Wire up template/static directories and static file serving
    #[arg(long)]
    pub assets: bool,

    /// Never prompt; missing values are errors, flags are taken as-is
    #[arg(long)]
    pub non_interactive: bool,
}

// Doctor command
#[derive(Args, Debug)]
pub struct DoctorArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
