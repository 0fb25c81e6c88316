//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum, ValueHint};

use crate::domain::{Circle, Shape, Square};

/// Composite pattern playground: draw shape trees and benchmark them against flat lists
#[derive(Parser, Debug)]
#[command(name = "shapetree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Directory holding the local .shapetree.toml (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub project_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Draw shapes through one root composite
    Draw {
        /// Shapes as circle:<radius> or square:<side> (default: circle:5 square:4)
        #[arg(value_parser = parse_shape)]
        shapes: Vec<Shape>,
        /// Draw the nested demo (inner composite with square:2, then circle:1)
        #[arg(long, conflicts_with = "shapes")]
        nested: bool,
        /// Print a line when entering each composite
        #[arg(long)]
        announce: bool,
    },

    /// Show the scene as a tree
    Tree {
        /// Shapes as circle:<radius> or square:<side> (default: circle:5 square:4)
        #[arg(value_parser = parse_shape)]
        shapes: Vec<Shape>,
        /// Show the nested demo
        #[arg(long, conflicts_with = "shapes")]
        nested: bool,
    },

    /// Compare drawing one composite against drawing flat lists
    Bench {
        /// Number of circles (default from config)
        #[arg(long)]
        circles: Option<usize>,
        /// Number of squares (default from config)
        #[arg(long)]
        squares: Option<usize>,
        /// Strategy to run
        #[arg(long, value_enum, default_value_t = StrategyArg::Both)]
        strategy: StrategyArg,
        /// Write every draw line instead of only counting
        #[arg(long)]
        print: bool,
    },

    /// Price the demo car and its assemblies
    Parts {
        /// Show the assembly tree with prices
        #[arg(long)]
        tree: bool,
    },

    /// Show the demo customer's balance and consolidated statement
    Accounts {
        /// Show the account tree with balances
        #[arg(long)]
        tree: bool,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Show config paths
    Path,

    /// Create config template
    Init {
        /// Create global config
        #[arg(short, long)]
        global: bool,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyArg {
    Composite,
    Flat,
    Both,
}

/// Parse `circle:<radius>` or `square:<side>`.
pub fn parse_shape(s: &str) -> Result<Shape, String> {
    let (kind, value) = s
        .split_once(':')
        .ok_or_else(|| format!("expected <kind>:<size>, got '{}'", s))?;
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|e| format!("invalid size '{}': {}", value, e))?;

    match kind.trim().to_ascii_lowercase().as_str() {
        "circle" => Circle::new(value).map(Shape::from).map_err(|e| e.to_string()),
        "square" => Square::new(value).map(Shape::from).map_err(|e| e.to_string()),
        other => Err(format!("unknown shape '{}', expected circle or square", other)),
    }
}
