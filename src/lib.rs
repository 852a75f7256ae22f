//! # Embers
//!
//! A terminal-first Hacker News reader.
//!
//! ## Architecture
//!
//! Embers follows a session-per-view pipeline:
//!
//! ```text
//! Source → Feed session → Pages / Threads → UI
//! ```
//!
//! - [`source`]: Firebase/Algolia HTTP client behind the [`ItemSource`](source::ItemSource) trait
//! - [`feed`]: id snapshots, cursor paging and the live-poll session
//! - [`thread`]: pre-order comment tree resolution and poll options
//! - [`tui`]: terminal user interface built with ratatui
//!
//! ## Quick Start
//!
//! ```bash
//! # Print the first page of top stories
//! embers list top
//!
//! # Show an item with its comments
//! embers show 8863
//!
//! # Launch the TUI
//! embers
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together the item
/// source, the batch resolver and the loaded configuration.
pub mod app;

/// Command-line interface using clap.
///
/// Defines the CLI structure and subcommands:
/// - `list [category]` - Print feed pages
/// - `show <id>` - Print one item with its thread
/// - `tui` - Launch the TUI (also the default)
pub mod cli;

/// Configuration management.
///
/// Loads from `~/.config/embers/config.toml`, supporting:
/// - Feed tuning (page size, poll interval, workers)
/// - Custom colors (named or hex)
/// - Custom keybindings
pub mod config;

/// Core domain models.
///
/// - [`Category`](domain::Category): the four feed tabs
/// - [`Item`](domain::Item): one Hacker News item as served by the API
/// - [`CommentNode`](domain::CommentNode): a flattened thread entry
pub mod domain;

/// Feed loading and paging.
///
/// - [`load_ids`](feed::load_ids): one sorted id snapshot per session
/// - [`fetch_page`](feed::fetch_page): concurrent window resolution
/// - [`FeedSession`](feed::FeedSession): snapshot + cursor + live poll
pub mod feed;

/// Background freshness polling.
///
/// - [`LivePoll`](live::LivePoll): timer task raising a sticky flag when
///   newer content appears upstream
pub mod live;

/// Item fetching.
///
/// - [`ItemSource`](source::ItemSource): async trait over the HN API
/// - [`HttpSource`](source::http::HttpSource): reqwest-based implementation
/// - [`BatchResolver`](source::BatchResolver): concurrent resolution with a
///   semaphore cap
pub mod source;

/// Comment thread resolution.
///
/// Iterative pre-order traversal, siblings newest-first, plus poll
/// option lookup for poll roots.
pub mod thread;

/// Terminal user interface.
///
/// Feed and thread views built with ratatui. Keybindings: j/k navigate,
/// Tab/BackTab switch categories, Enter opens a thread, n loads more,
/// r refreshes, o opens in browser, q quits.
pub mod tui;
