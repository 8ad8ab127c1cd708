//! schemabind CLI - Binding generator
//!
//! Commands:
//! - `schemabind data-class` - Python data classes, JSON templates and actions
//! - `schemabind stub` - Groovy stubs and required-field constants
//! - `schemabind interface` - TypeScript interface definitions
//! - `schemabind sql-view` / `sql-foreign-key` / `sql-index` - MySQL DDL
//! - `schemabind document` - Requirement specification XML
//! - `schemabind all` - Every generator, one default output per kind
//! - `schemabind check` - Validate a type catalog

use clap::{Args, Parser, Subcommand};
use schemabind_core::{LogLevel, RequestKind};
use std::path::PathBuf;

mod catalog;
mod generate;

#[derive(Parser)]
#[command(name = "schemabind")]
#[command(author, version, about = "Generate client bindings and DDL from a type catalog", long_about = None)]
struct Cli {
    /// Type catalog: TOML/JSON manifest, Rust source file, or directory of sources
    #[arg(long, global = true, default_value = "schemabind.toml")]
    catalog: PathBuf,

    /// Generator configuration file (TOML or JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level: trace, debug, info, warn, error or off (overrides the config file)
    #[arg(long, global = true)]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct TargetArgs {
    /// Output location (default: the kind's directory under the configured output root)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Namespace to include; repeat for several
    #[arg(short, long = "namespace")]
    namespaces: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate Python data classes, JSON templates, name manifest and actions
    DataClass(TargetArgs),

    /// Generate Groovy stub classes and the required-field directory
    Stub(TargetArgs),

    /// Generate TypeScript interface definitions
    Interface(TargetArgs),

    /// Generate views over soft-deletion companion tables
    SqlView(TargetArgs),

    /// Generate foreign-key constraints
    SqlForeignKey(TargetArgs),

    /// Generate indexes
    SqlIndex(TargetArgs),

    /// Generate the requirement specification document
    Document(TargetArgs),

    /// Run every generator into its default output location
    All {
        /// Namespace to include; repeat for several
        #[arg(short, long = "namespace")]
        namespaces: Vec<String>,
    },

    /// Validate a type catalog
    Check,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let options = generate::Options {
        catalog: cli.catalog,
        config: cli.config,
        log_level: cli.log_level,
    };

    let (kind, target) = match cli.command {
        Commands::DataClass(target) => (RequestKind::DataClassBinding, target),
        Commands::Stub(target) => (RequestKind::StubBinding, target),
        Commands::Interface(target) => (RequestKind::InterfaceBinding, target),
        Commands::SqlView(target) => (RequestKind::SqlView, target),
        Commands::SqlForeignKey(target) => (RequestKind::SqlForeignKey, target),
        Commands::SqlIndex(target) => (RequestKind::SqlIndex, target),
        Commands::Document(target) => (RequestKind::DocumentArtifact, target),
        Commands::All { namespaces } => return generate::run_all(&options, namespaces),
        Commands::Check => return catalog::check(&options.catalog),
    };

    generate::run(&options, kind, target.output, target.namespaces)
}
