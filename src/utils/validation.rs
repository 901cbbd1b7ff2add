use crate::utils::error::{Result, WatcherError};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(WatcherError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(WatcherError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(WatcherError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

/// Validates a URL template by substituting a sample language code for `{lang}`.
pub fn validate_url_template(field_name: &str, template: &str) -> Result<()> {
    if !template.contains("{lang}") {
        return Err(WatcherError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: template.to_string(),
            reason: "Template must contain a {lang} placeholder".to_string(),
        });
    }
    validate_url(field_name, &template.replace("{lang}", "en"))
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(WatcherError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(WatcherError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(WatcherError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(WatcherError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(WatcherError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("listing_url", "https://en.wikipedia.org/wiki/Main").is_ok());
        assert!(validate_url("listing_url", "http://example.com").is_ok());
        assert!(validate_url("listing_url", "").is_err());
        assert!(validate_url("listing_url", "invalid-url").is_err());
        assert!(validate_url("listing_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_url_template() {
        let field = "api_url_template";
        assert!(validate_url_template(field, "https://{lang}.wikipedia.org/w/api.php").is_ok());
        assert!(validate_url_template(field, "https://en.wikipedia.org/w/api.php").is_err());
        assert!(validate_url_template(field, "ftp://{lang}.example.org/").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("poll_interval_secs", 5, 1).is_ok());
        assert!(validate_positive_number("poll_interval_secs", 0, 1).is_err());
    }

    #[test]
    fn test_validate_range_and_strings() {
        assert!(validate_range("email.smtp_port", 587u32, 1, 65535).is_ok());
        assert!(validate_range("email.smtp_port", 0u32, 1, 65535).is_err());
        assert!(validate_non_empty_string("source_language", "  ").is_err());
        assert!(validate_path("seen_file", "seen\0.txt").is_err());
    }
}
