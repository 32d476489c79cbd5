//! Ferrule unified CLI tool
//!
//! Single command-line interface for compiling class declaration sets
//! into host binding glue: full builds, validation-only checks, and
//! debugging dumps of the resolved model.

mod commands;
mod manifest;
mod output;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ferrule")]
#[command(about = "Class model compiler for host binding glue", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate binding glue from declaration sets
    Build {
        /// Declaration-set JSON files or glob patterns
        decls: Vec<String>,
        /// Build manifest path
        #[arg(long, default_value = "ferrule.toml")]
        manifest: String,
        /// Host profile to target
        #[arg(long)]
        host: Option<String>,
        /// Output directory for generated files
        #[arg(short, long)]
        out_dir: Option<String>,
        /// Color output: auto, always, never
        #[arg(long, default_value = "auto")]
        color: String,
    },

    /// Validate declaration sets without writing output
    Check {
        /// Declaration-set JSON files or glob patterns
        decls: Vec<String>,
        /// Build manifest path
        #[arg(long, default_value = "ferrule.toml")]
        manifest: String,
        /// Host profile to target
        #[arg(long)]
        host: Option<String>,
        /// Color output: auto, always, never
        #[arg(long, default_value = "auto")]
        color: String,
    },

    /// Dump the resolved class model for debugging
    Inspect {
        /// Declaration-set JSON files or glob patterns
        decls: Vec<String>,
        /// Build manifest path
        #[arg(long, default_value = "ferrule.toml")]
        manifest: String,
        /// Host profile to target
        #[arg(long)]
        host: Option<String>,
        /// Restrict output to one class
        #[arg(long)]
        class: Option<String>,
        /// Emit machine-readable JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            decls,
            manifest,
            host,
            out_dir,
            color,
        } => commands::build::execute(decls, manifest, host, out_dir, color),

        Commands::Check {
            decls,
            manifest,
            host,
            color,
        } => commands::check::execute(decls, manifest, host, color),

        Commands::Inspect {
            decls,
            manifest,
            host,
            class,
            json,
        } => commands::inspect::execute(decls, manifest, host, class, json),
    }
}
