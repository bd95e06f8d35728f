//! Command-line argument definitions for the Astrolabe CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. A subcommand selects the pipeline; global options control
//! configuration file selection and logging verbosity.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Default input of the `tree` pipeline.
pub const DEFAULT_TREE_INPUT: &str = "syntax_tree.json";
/// Default output of the `tree` pipeline.
pub const DEFAULT_TREE_OUTPUT: &str = "syntax_tree.png";
/// Default input of the `dfa` pipeline.
pub const DEFAULT_DFA_INPUT: &str = "dfa.json";
/// Default output of the `dfa` pipeline.
pub const DEFAULT_DFA_OUTPUT: &str = "dfa.png";

/// Command-line arguments for the Astrolabe visualizer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Report and draw a regular-expression syntax tree
    Tree {
        /// Path to the syntax-tree document
        #[arg(short, long, default_value = DEFAULT_TREE_INPUT)]
        input: PathBuf,

        /// Path to the output image; `.svg` writes SVG, anything else PNG
        #[arg(short, long, default_value = DEFAULT_TREE_OUTPUT)]
        output: PathBuf,
    },

    /// Report and draw a finite automaton (DFA, minimized DFA or NFA)
    Dfa {
        /// Path to the automaton document
        #[arg(short, long, default_value = DEFAULT_DFA_INPUT)]
        input: PathBuf,

        /// Path to the output image; `.svg` writes SVG, anything else PNG
        #[arg(short, long, default_value = DEFAULT_DFA_OUTPUT)]
        output: PathBuf,
    },

    /// Run both pipelines on the default file names
    All,
}
