//! Scrapes candidate names from a Wikipedia "Deaths in <month>" page.
//!
//! Only `ul` lists sitting directly in the article body count. Footnote lists
//! (under an `ol`) and navigation boxes (`.navbox`) are skipped, as are nested
//! sub-items and links into non-article namespaces.

use crate::adapters::http::fetch_text;
use crate::domain::model::{is_article_name, Name};
use crate::domain::ports::NameSource;
use crate::utils::error::{Result, WatcherError};
use async_trait::async_trait;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};

const CONTENT_CONTAINER: &str = "#mw-content-text .mw-parser-output";
const ARTICLE_LINK: &str = "a[href][title]";
const ARTICLE_PATH_PREFIX: &str = "/wiki/";

pub struct WikiListingSource {
    client: Client,
}

impl WikiListingSource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl NameSource for WikiListingSource {
    async fn extract_all_names(&self, page_url: &str) -> Result<Vec<Name>> {
        let html = fetch_text(&self.client, page_url).await?;
        let names = parse_names(&html).ok_or_else(|| WatcherError::ContainerNotFound {
            url: page_url.to_string(),
        })?;

        tracing::debug!("Extracted {} candidate names from {}", names.len(), page_url);
        Ok(names)
    }
}

/// Returns the names in document order, or `None` when the article body is missing.
/// Duplicates are kept.
pub fn parse_names(html: &str) -> Option<Vec<Name>> {
    let document = Html::parse_document(html);
    let container_selector = Selector::parse(CONTENT_CONTAINER).ok()?;
    let link_selector = Selector::parse(ARTICLE_LINK).ok()?;

    let container = document.select(&container_selector).next()?;

    let names = child_elements(container, "ul")
        .filter(|ul| !is_footnote_or_navbox(*ul))
        .flat_map(|ul| child_elements(ul, "li"))
        .filter_map(|li| article_title(li, &link_selector))
        .collect();

    Some(names)
}

fn child_elements<'a>(
    parent: ElementRef<'a>,
    tag: &'static str,
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    parent
        .children()
        .filter_map(ElementRef::wrap)
        .filter(move |el| el.value().name() == tag)
}

fn is_footnote_or_navbox(list: ElementRef<'_>) -> bool {
    list.ancestors().filter_map(ElementRef::wrap).any(|ancestor| {
        ancestor.value().name() == "ol" || ancestor.value().classes().any(|c| c == "navbox")
    })
}

/// Only the first titled link of an item is considered.
fn article_title(item: ElementRef<'_>, link_selector: &Selector) -> Option<Name> {
    let link = item.select(link_selector).next()?;
    let href = link.value().attr("href")?;
    let title = link.value().attr("title")?;

    if href.starts_with(ARTICLE_PATH_PREFIX) && is_article_name(title) {
        Some(title.to_string())
    } else {
        None
    }
}
