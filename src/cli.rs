//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Seokit SEO settings engine CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root directory (default: current directory)
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Config file name (default: seokit.toml)
    #[arg(short = 'C', long, default_value = "seokit.toml")]
    pub config: PathBuf,

    /// Settings file path (relative to project root)
    #[arg(short, long)]
    pub settings: Option<PathBuf>,

    /// Page list path (relative to project root)
    #[arg(short, long)]
    pub pages: Option<PathBuf>,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Compose the head, body and footer blocks of a scope
    Render {
        /// Scope to render: `global` or a page id
        #[arg(short, long, default_value = "global", conflicts_with = "all")]
        scope: String,

        /// Render every known scope and write the blocks to the output directory
        #[arg(short, long)]
        all: bool,

        /// Output directory for `--all` (relative to project root)
        #[arg(short, long, requires = "all")]
        output: Option<PathBuf>,
    },

    /// Show every field of a scope with its effective value and origin
    Status {
        /// Scope to inspect: `global` or a page id
        #[arg(short, long, default_value = "global")]
        scope: String,
    },

    /// Report schema entry types that exceed their per-scope limit
    Check,

    /// Print the breadcrumb trail of a page
    Breadcrumbs {
        /// Page id
        id: String,
    },

    /// Set one field of a scope and write the scope back
    Set {
        /// Scope to edit: `global` or a page id
        #[arg(short, long, default_value = "global")]
        scope: String,

        /// Field key, e.g. `meta_title`
        key: String,

        /// New value, parsed as JSON when possible, otherwise taken as text
        value: String,
    },
}
