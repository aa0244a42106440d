//! The place where the command line is defined.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::EngineConfig;
use crate::persistence::IndexKind;

#[derive(Parser)]
#[command(name = "relalg")]
#[command(about = "A Rust-powered relational algebra engine", long_about = None)]
pub struct CliParser {
    // What to do.
    #[arg(required = true)]
    pub mode: Option<CliMode>,

    // Table to show, index or spill.
    pub table: Option<String>,

    // Directory holding the table snapshots; overrides RELALG_STORE_DIR.
    #[arg(long)]
    pub store: Option<PathBuf>,

    // Index backend for the tables; overrides RELALG_INDEX.
    #[arg(long, value_enum)]
    pub index: Option<IndexChoice>,

    // Print index maintenance and record offsets too.
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum CliMode {
    // Build the movie database, run every operator and save the tables.
    Demo,

    // Load a saved table and print it.
    Show,

    // Load a saved table and print its index.
    Index,

    // Write a saved table into a fixed-record tuple store.
    Spill,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum IndexChoice {
    #[value(name = "none")]
    Disabled,
    Tree,
    Hash,
}

impl From<IndexChoice> for IndexKind {
    fn from(choice: IndexChoice) -> Self {
        match choice {
            IndexChoice::Disabled => IndexKind::NoIndex,
            IndexChoice::Tree => IndexKind::TreeMap,
            IndexChoice::Hash => IndexKind::HashMap,
        }
    }
}

impl CliParser {
    pub fn apply(&self, config: &mut EngineConfig) {
        //! Let the command line flags win over the environment.

        if let Some(store) = &self.store {
            config.store_dir = store.clone();
        }
        if let Some(index) = self.index {
            config.index_kind = index.into();
        }
    }
}
