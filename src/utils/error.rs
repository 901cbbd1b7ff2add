use thiserror::Error;

#[derive(Error, Debug)]
pub enum WatcherError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("HTTP {status} for {url}")]
    HttpStatusError { status: u16, url: String },

    #[error("Content container not found in {url}")]
    ContainerNotFound { url: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid mail address: {0}")]
    MailAddressError(#[from] lettre::address::AddressError),

    #[error("Failed to build mail message: {0}")]
    MailBuildError(#[from] lettre::error::Error),

    #[error("SMTP delivery failed: {0}")]
    SmtpError(#[from] lettre::transport::smtp::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl WatcherError {
    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            WatcherError::HttpError(_) | WatcherError::HttpStatusError { .. } => {
                "Check network connectivity and that the page URL is reachable"
            }
            WatcherError::ContainerNotFound { .. } => {
                "The page layout may have changed; verify the listing URL points to an article"
            }
            WatcherError::IoError(_) => "Check that the seen-names file path is writable",
            WatcherError::SerializationError(_) => "The wiki API returned an unexpected payload",
            WatcherError::MailAddressError(_) | WatcherError::MailBuildError(_) => {
                "Check the email.from and email.to addresses"
            }
            WatcherError::SmtpError(_) => "Check SMTP host, port and credentials",
            WatcherError::ConfigError { .. } | WatcherError::InvalidConfigValueError { .. } => {
                "Fix the configuration file and start again"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, WatcherError>;
