use crate::utils::error::{FeedError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(FeedError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(FeedError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(FeedError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_socket_addr(field_name: &str, addr: &str) -> Result<()> {
    addr.parse::<std::net::SocketAddr>()
        .map(|_| ())
        .map_err(|e| FeedError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: addr.to_string(),
            reason: format!("Invalid socket address: {}", e),
        })
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(FeedError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
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
        return Err(FeedError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// Competition codes are 2-5 upper-case letters or digits (`PL`, `FL1`, `BL1`).
pub fn is_competition_code(code: &str) -> bool {
    (2..=5).contains(&code.len())
        && code
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
}

pub fn validate_competition_codes(field_name: &str, codes: &[String]) -> Result<()> {
    if codes.is_empty() {
        return Err(FeedError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: String::new(),
            reason: "At least one competition code is required".to_string(),
        });
    }

    for code in codes {
        if !is_competition_code(code) {
            return Err(FeedError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: code.clone(),
                reason: "Competition codes are 2-5 upper-case letters or digits".to_string(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("api_base_url", "https://api.football-data.org/v4").is_ok());
        assert!(validate_url("api_base_url", "http://127.0.0.1:8080").is_ok());
        assert!(validate_url("api_base_url", "").is_err());
        assert!(validate_url("api_base_url", "invalid-url").is_err());
        assert!(validate_url("api_base_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_socket_addr() {
        assert!(validate_socket_addr("bind", "0.0.0.0:5000").is_ok());
        assert!(validate_socket_addr("bind", "[::1]:8080").is_ok());
        assert!(validate_socket_addr("bind", "localhost").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("request_timeout_seconds", 10, 1, 300).is_ok());
        assert!(validate_range("request_timeout_seconds", 0, 1, 300).is_err());
        assert!(validate_range("request_timeout_seconds", 301, 1, 300).is_err());
    }

    #[test]
    fn test_competition_codes() {
        assert!(is_competition_code("PL"));
        assert!(is_competition_code("FL1"));
        assert!(!is_competition_code("pl"));
        assert!(!is_competition_code("P"));
        assert!(!is_competition_code("../PL"));

        let codes = vec!["PL".to_string(), "BL1".to_string()];
        assert!(validate_competition_codes("competitions", &codes).is_ok());
        assert!(validate_competition_codes("competitions", &[]).is_err());
        assert!(validate_competition_codes("competitions", &["X Y".to_string()]).is_err());
    }
}
