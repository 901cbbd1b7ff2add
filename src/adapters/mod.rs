// Adapters layer: concrete implementations of the domain ports for external systems.

pub mod http;
pub mod notifier;
pub mod seen_store;
pub mod wiki_api;
pub mod wiki_listing;
