use crate::domain::model::{NotificationMessage, SummaryResult};
use regex::Regex;
use std::sync::LazyLock;

// `.` does not match '\n', so a sentence never spans the first line break.
static FIRST_SENTENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*?[.!?])").expect("valid sentence pattern"));

/// Cuts `text` down to its first sentence, or its first line when no
/// sentence terminator appears before the first line break.
pub fn first_sentence(text: &str) -> &str {
    match FIRST_SENTENCE.captures(text).and_then(|caps| caps.get(1)) {
        Some(m) => m.as_str(),
        None => text.split('\n').next().unwrap_or_default(),
    }
}

impl NotificationMessage {
    pub fn from_summary(name: &str, summary: &SummaryResult) -> Self {
        Self {
            subject: format!("New name in the deaths list: {}", name),
            body: format!("{}\n\nLink: {}", first_sentence(&summary.text), summary.url),
        }
    }
}
