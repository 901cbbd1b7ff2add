use std::collections::BTreeSet;

/// Page title identifying one deceased person entry.
pub type Name = String;

/// Names already notified. Sorted only so the backing file diffs cleanly.
pub type SeenSet = BTreeSet<Name>;

/// A name is usable when non-empty and outside any non-article namespace.
pub fn is_article_name(title: &str) -> bool {
    !title.trim().is_empty() && !title.contains(':')
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryResult {
    pub url: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationMessage {
    pub subject: String,
    pub body: String,
}
