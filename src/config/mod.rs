#[cfg(feature = "cli")]
pub mod cli;

use crate::utils::error::{Result, WatcherError};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_positive_number, validate_range,
    validate_url, validate_url_template, Validate,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 3600;
pub const DEFAULT_SEEN_FILE: &str = "seen_deaths.txt";
pub const DEFAULT_USER_AGENT: &str = "WikiDeathNotifier/1.0";
pub const DEFAULT_API_URL_TEMPLATE: &str = "https://{lang}.wikipedia.org/w/api.php";
pub const DEFAULT_ARTICLE_URL_TEMPLATE: &str = "https://{lang}.wikipedia.org/wiki/";

/// Every setting the watcher needs. Defaults are the built-in constants;
/// a TOML file may override any subset of them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WatcherConfig {
    /// Fixed deaths-listing page. When unset the current month's page is used.
    pub listing_url: Option<String>,
    pub poll_interval_secs: u64,
    pub seen_file: PathBuf,
    pub user_agent: String,
    pub http_timeout_secs: u64,
    pub source_language: String,
    pub target_language: String,
    pub api_url_template: String,
    pub article_url_template: String,
    /// Print notifications to the console even when email is configured.
    pub dry_run: bool,
    pub email: EmailConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub from: String,
    pub to: String,
    pub password: String,
    pub timeout_secs: u64,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            listing_url: None,
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            seen_file: PathBuf::from(DEFAULT_SEEN_FILE),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            http_timeout_secs: 30,
            source_language: "en".to_string(),
            target_language: "ru".to_string(),
            api_url_template: DEFAULT_API_URL_TEMPLATE.to_string(),
            article_url_template: DEFAULT_ARTICLE_URL_TEMPLATE.to_string(),
            dry_run: false,
            email: EmailConfig::default(),
        }
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_host: "smtp.gmail.com".to_string(),
            smtp_port: 587,
            from: String::new(),
            to: String::new(),
            password: String::new(),
            timeout_secs: 30,
        }
    }
}

impl EmailConfig {
    /// SMTP delivery needs a recipient, a sender and a credential.
    pub fn is_complete(&self) -> bool {
        !self.to.is_empty() && !self.from.is_empty() && !self.password.is_empty()
    }
}

impl WatcherConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| WatcherError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SMTP_PASSWORD})
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        use std::sync::LazyLock;

        static ENV_VAR: LazyLock<Regex> =
            LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env var pattern"));

        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn api_url(&self, lang: &str) -> String {
        self.api_url_template.replace("{lang}", lang)
    }

    pub fn article_base_url(&self, lang: &str) -> String {
        self.article_url_template.replace("{lang}", lang)
    }

    /// The deaths page to scrape on `today`.
    pub fn listing_url_for(&self, today: NaiveDate) -> String {
        match &self.listing_url {
            Some(url) => url.clone(),
            None => format!(
                "{}Deaths_in_{}",
                self.article_base_url(&self.source_language),
                today.format("%B_%Y")
            ),
        }
    }

    pub fn current_listing_url(&self) -> String {
        self.listing_url_for(chrono::Utc::now().date_naive())
    }
}

impl Validate for WatcherConfig {
    fn validate(&self) -> Result<()> {
        if let Some(url) = &self.listing_url {
            validate_url("listing_url", url)?;
        }
        validate_positive_number("poll_interval_secs", self.poll_interval_secs, 1)?;
        validate_positive_number("http_timeout_secs", self.http_timeout_secs, 1)?;
        validate_path("seen_file", &self.seen_file.to_string_lossy())?;
        validate_non_empty_string("user_agent", &self.user_agent)?;
        validate_non_empty_string("source_language", &self.source_language)?;
        validate_non_empty_string("target_language", &self.target_language)?;
        validate_url_template("api_url_template", &self.api_url_template)?;
        validate_url_template("article_url_template", &self.article_url_template)?;
        validate_non_empty_string("email.smtp_host", &self.email.smtp_host)?;
        validate_range("email.smtp_port", self.email.smtp_port, 1, u16::MAX)?;
        validate_positive_number("email.timeout_secs", self.email.timeout_secs, 1)?;
        Ok(())
    }
}
