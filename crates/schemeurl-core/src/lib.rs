//! schemeurl Core Library
//!
//! This crate provides the core functionality for schemeurl, a handler for
//! a custom URL scheme that keeps a list of named scheme URLs.
//!
//! # Architecture
//!
//! - **Ingestion**: launch and live deep links become `IncomingLink` events
//! - **Stores**: saved URLs, preferences and the application log, all on
//!   one durable key/value primitive
//!
//! # Quick Start
//!
//! ```text
//! let config = Config::load()?;
//! let store = SavedUrlStore::new(FileStore::from_config(&config));
//!
//! // Save a link
//! let item = store.insert("Profile", "schemeurl://user/42").await?;
//!
//! // Handle an incoming link
//! let ingestion = LinkIngestion::new(&LaunchArgs::new(None));
//! let _sub = ingestion.subscribe(|link| println!("{}", link.raw_url));
//! ingestion.deliver("schemeurl://home?tab=2");
//! ```
//!
//! # Modules
//!
//! - `ingest`: launch link, subscription and delivery of incoming links
//! - `query`: query-string parsing
//! - `saved`: the saved scheme URL list (main entry point for data)
//! - `settings`: theme and agreement preferences
//! - `applog`: user-visible application log
//! - `storage`: key/value backends and storage errors
//! - `models`: data structures
//! - `config`: application configuration

pub mod applog;
pub mod config;
pub mod ingest;
pub mod models;
pub mod query;
pub mod saved;
pub mod settings;
pub mod storage;

pub use applog::AppLog;
pub use config::Config;
pub use ingest::{LaunchArgs, LinkIngestion, LinkSource, Subscription};
pub use models::{
    validate_new_entry, IncomingLink, LogEntry, LogLevel, QueryParams, SavedUrl, ValidationError,
};
pub use query::parse_query;
pub use saved::SavedUrlStore;
pub use settings::{Preferences, SettingsStore, Theme};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError, StorageResult};
