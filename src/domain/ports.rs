use crate::domain::model::{Name, NotificationMessage, SeenSet, SummaryResult};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Produces the names currently listed on the deaths page, in document order.
#[async_trait]
pub trait NameSource: Send + Sync {
    async fn extract_all_names(&self, page_url: &str) -> Result<Vec<Name>>;
}

#[async_trait]
pub trait SummaryResolver: Send + Sync {
    async fn resolve(&self, name: &str) -> Result<SummaryResult>;
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, message: &NotificationMessage) -> Result<()>;
}

#[async_trait]
pub trait SeenStore: Send + Sync {
    async fn load(&self) -> Result<SeenSet>;
    async fn save(&self, seen: &SeenSet) -> Result<()>;
}
