use crate::config::WatcherConfig;
use crate::utils::error::{Result, WatcherError};
use reqwest::Client;

/// Builds the single HTTP client shared by the listing scraper and the wiki API.
pub fn build_client(config: &WatcherConfig) -> Result<Client> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(config.http_timeout())
        .redirect(reqwest::redirect::Policy::limited(5))
        .build()
        .map_err(WatcherError::HttpError)
}

/// GETs `url` and returns the body, treating any non-2xx status as an error.
pub async fn fetch_text(client: &Client, url: &str) -> Result<String> {
    tracing::debug!("GET {}", url);
    let response = client.get(url).send().await?;

    let status = response.status();
    tracing::debug!("Response status: {}", status);
    if !status.is_success() {
        return Err(WatcherError::HttpStatusError {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    Ok(response.text().await?)
}
