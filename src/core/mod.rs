pub mod message;
pub mod watcher;

pub use crate::domain::model::{Name, NotificationMessage, SeenSet, SummaryResult};
pub use crate::domain::ports::{NameSource, Notifier, SeenStore, SummaryResolver};
pub use crate::utils::error::Result;
