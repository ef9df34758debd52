use crate::config::AppConfig;
use crate::core::aggregator::FilterPolicy;
use crate::utils::error::{FeedError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub server: ServerSection,
    pub upstream: UpstreamSection,
    pub aggregation: AggregationSection,
    pub cache: CacheSection,
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerSection {
    pub bind: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpstreamSection {
    pub base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AggregationSection {
    pub competitions: Option<Vec<String>>,
    pub threshold: Option<usize>,
    pub max_matches: Option<usize>,
    pub filter_policy: Option<FilterPolicy>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheSection {
    pub ttl_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingSection {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content)?;

        toml::from_str(&processed).map_err(|e| FeedError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Expands `${VAR}` from the environment; unknown variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| FeedError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn apply_to(&self, config: &mut AppConfig) {
        if let Some(bind) = &self.server.bind {
            config.bind = bind.clone();
        }
        if let Some(url) = &self.upstream.base_url {
            config.api_base_url = url.clone();
        }
        if let Some(timeout) = self.upstream.timeout_seconds {
            config.request_timeout_seconds = timeout;
        }
        if let Some(codes) = &self.aggregation.competitions {
            config.competitions = codes.iter().map(|c| c.trim().to_ascii_uppercase()).collect();
        }
        if let Some(threshold) = self.aggregation.threshold {
            config.threshold = threshold;
        }
        if let Some(max) = self.aggregation.max_matches {
            config.max_matches = max;
        }
        if let Some(policy) = self.aggregation.filter_policy {
            config.filter_policy = policy;
        }
        if let Some(ttl) = self.cache.ttl_seconds {
            config.cache_ttl_seconds = ttl;
        }
        if let Some(verbose) = self.logging.verbose {
            config.verbose = verbose;
        }
        if let Some(json) = self.logging.json {
            config.json_logs = json;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[server]
bind = "127.0.0.1:8080"

[upstream]
base_url = "http://localhost:9999/v4"
timeout_seconds = 3

[aggregation]
competitions = ["pl", "CL"]
threshold = 12
max_matches = 15
filter_policy = "ignore"

[cache]
ttl_seconds = 60

[logging]
json = true
"#;

        let parsed = TomlConfig::from_toml_str(toml_content).unwrap();
        let mut config = AppConfig::default();
        parsed.apply_to(&mut config);

        assert_eq!(config.bind, "127.0.0.1:8080");
        assert_eq!(config.api_base_url, "http://localhost:9999/v4");
        assert_eq!(config.request_timeout_seconds, 3);
        assert_eq!(config.competitions, vec!["PL", "CL"]);
        assert_eq!(config.threshold, 12);
        assert_eq!(config.max_matches, 15);
        assert_eq!(config.filter_policy, FilterPolicy::Ignore);
        assert_eq!(config.cache_ttl_seconds, 60);
        assert!(config.json_logs);
        assert!(!config.verbose);
    }

    #[test]
    fn test_empty_file_keeps_defaults() {
        let parsed = TomlConfig::from_toml_str("").unwrap();
        let mut config = AppConfig::default();
        parsed.apply_to(&mut config);
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("FIXTURE_FEED_TEST_UPSTREAM", "https://mirror.example.com/v4");

        let toml_content = r#"
[upstream]
base_url = "${FIXTURE_FEED_TEST_UPSTREAM}"
"#;
        let parsed = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            parsed.upstream.base_url.as_deref(),
            Some("https://mirror.example.com/v4")
        );

        std::env::remove_var("FIXTURE_FEED_TEST_UPSTREAM");
    }

    #[test]
    fn test_unknown_policy_is_config_error() {
        let toml_content = r#"
[aggregation]
filter_policy = "sometimes"
"#;
        assert!(matches!(
            TomlConfig::from_toml_str(toml_content),
            Err(FeedError::ConfigError { .. })
        ));
    }
}
