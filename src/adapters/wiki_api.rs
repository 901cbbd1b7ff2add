use crate::config::WatcherConfig;
use crate::domain::model::SummaryResult;
use crate::domain::ports::SummaryResolver;
use crate::utils::error::{Result, WatcherError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct QueryResponse {
    query: Option<QueryBody>,
}

#[derive(Debug, Deserialize)]
struct QueryBody {
    #[serde(default)]
    pages: Vec<ApiPage>,
}

#[derive(Debug, Deserialize)]
struct ApiPage {
    #[serde(default)]
    missing: bool,
    #[serde(default)]
    invalid: bool,
    fullurl: Option<String>,
    extract: Option<String>,
    #[serde(default)]
    langlinks: Vec<LangLink>,
}

#[derive(Debug, Deserialize)]
struct LangLink {
    lang: String,
    title: String,
}

impl ApiPage {
    fn exists(&self) -> bool {
        !self.missing && !self.invalid
    }

    fn into_summary(self, fallback_url: String) -> SummaryResult {
        SummaryResult {
            url: self.fullurl.unwrap_or(fallback_url),
            text: self.extract.unwrap_or_default(),
        }
    }
}

/// Resolves a name to the preferred article: the target-language edition when
/// the source article links to one, the source article otherwise.
pub struct WikiSummaryResolver {
    client: Client,
    config: WatcherConfig,
}

impl WikiSummaryResolver {
    pub fn new(client: Client, config: &WatcherConfig) -> Self {
        Self {
            client,
            config: config.clone(),
        }
    }

    fn article_url(&self, lang: &str, title: &str) -> String {
        format!("{}{}", self.config.article_base_url(lang), title.replace(' ', "_"))
    }

    async fn query_page(&self, lang: &str, title: &str) -> Result<Option<ApiPage>> {
        let api_url = self.config.api_url(lang);
        let mut params = vec![
            ("action", "query"),
            ("format", "json"),
            ("formatversion", "2"),
            ("redirects", "1"),
            ("prop", "extracts|info|langlinks"),
            ("exintro", "1"),
            ("explaintext", "1"),
            ("inprop", "url"),
            ("titles", title),
        ];
        if lang != self.config.target_language {
            params.push(("lllang", self.config.target_language.as_str()));
        }

        tracing::debug!("Querying {} wiki API for '{}'", lang, title);
        let response = self.client.get(&api_url).query(&params).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WatcherError::HttpStatusError {
                status: status.as_u16(),
                url: api_url,
            });
        }

        let body = response.text().await?;
        let parsed: QueryResponse = serde_json::from_str(&body)?;

        Ok(parsed
            .query
            .and_then(|q| q.pages.into_iter().next())
            .filter(ApiPage::exists))
    }
}

#[async_trait]
impl SummaryResolver for WikiSummaryResolver {
    async fn resolve(&self, name: &str) -> Result<SummaryResult> {
        let source_page = match self.query_page(&self.config.source_language, name).await? {
            Some(page) => page,
            None => {
                tracing::warn!("No {} article for '{}'", self.config.source_language, name);
                return Ok(SummaryResult {
                    url: self.article_url(&self.config.source_language, name),
                    text: format!("Article not found: {}", name),
                });
            }
        };

        let localized_title = source_page
            .langlinks
            .iter()
            .find(|link| link.lang == self.config.target_language)
            .map(|link| link.title.clone());

        if let Some(title) = localized_title {
            if let Some(page) = self.query_page(&self.config.target_language, &title).await? {
                let fallback = self.article_url(&self.config.target_language, &title);
                return Ok(page.into_summary(fallback));
            }
            tracing::warn!(
                "Language link '{}' for '{}' points to a missing page",
                title,
                name
            );
        }

        let fallback = self.article_url(&self.config.source_language, name);
        Ok(source_page.into_summary(fallback))
    }
}
