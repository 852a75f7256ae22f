pub mod commands;

use clap::{Parser, Subcommand};

use crate::domain::{Category, ItemId};
use crate::source::batch::DEFAULT_WORKERS;

#[derive(Parser)]
#[command(name = "embers")]
#[command(about = "A terminal Hacker News reader", long_about = None)]
pub struct Cli {
    /// Number of parallel workers for resolving items
    #[arg(short, long, default_value_t = DEFAULT_WORKERS, global = true)]
    pub workers: usize,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List stories from a category
    List {
        /// Category to list: top, new, jobs or polls
        #[arg(default_value = "top")]
        category: Category,

        /// Number of pages to print
        #[arg(short, long, default_value_t = 1)]
        pages: usize,
    },
    /// Show a single item with its comment thread
    Show {
        /// Numeric item id
        id: ItemId,
    },
    /// Launch the TUI (the default when no subcommand is given)
    Tui,
}
