pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliArgs;

pub use adapters::{
    notifier::{ConsoleNotifier, DeliveryNotifier, SmtpNotifier},
    seen_store::FileSeenStore,
    wiki_api::WikiSummaryResolver,
    wiki_listing::WikiListingSource,
};
pub use config::{EmailConfig, WatcherConfig};
pub use crate::core::watcher::{CycleReport, NameOutcome, Watcher};
pub use utils::error::{Result, WatcherError};
