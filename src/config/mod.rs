pub mod toml_config;

use crate::adapters::football_data::DEFAULT_BASE_URL;
use crate::core::aggregator::{
    FilterPolicy, DEFAULT_COMPETITIONS, DEFAULT_MAX_MATCHES, DEFAULT_THRESHOLD,
};
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use toml_config::TomlConfig;

pub const DEFAULT_BIND: &str = "0.0.0.0:5000";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "fixture-feed")]
#[command(about = "Serves upcoming football fixtures from football-data.org")]
pub struct CliConfig {
    #[arg(long, help = "Path to a TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Address to listen on [default: 0.0.0.0:5000]")]
    pub bind: Option<String>,

    #[arg(long)]
    pub api_base_url: Option<String>,

    #[arg(long)]
    pub request_timeout_seconds: Option<u64>,

    #[arg(long, value_delimiter = ',', help = "Competition codes in query order")]
    pub competitions: Vec<String>,

    #[arg(long, help = "Stop querying once this many matches are collected")]
    pub threshold: Option<usize>,

    #[arg(long)]
    pub max_matches: Option<usize>,

    #[arg(long, value_enum)]
    pub filter_policy: Option<FilterPolicy>,

    #[arg(long, help = "Cache upstream responses for this many seconds (0 disables)")]
    pub cache_ttl_seconds: Option<u64>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

/// Fully resolved settings: defaults, then the TOML file, then CLI flags.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bind: String,
    pub api_base_url: String,
    pub request_timeout_seconds: u64,
    pub competitions: Vec<String>,
    pub threshold: usize,
    pub max_matches: usize,
    pub filter_policy: FilterPolicy,
    pub cache_ttl_seconds: u64,
    pub verbose: bool,
    pub json_logs: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            api_base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            competitions: DEFAULT_COMPETITIONS.iter().map(|c| c.to_string()).collect(),
            threshold: DEFAULT_THRESHOLD,
            max_matches: DEFAULT_MAX_MATCHES,
            filter_policy: FilterPolicy::default(),
            cache_ttl_seconds: 0,
            verbose: false,
            json_logs: false,
        }
    }
}

impl AppConfig {
    pub fn load(cli: &CliConfig) -> Result<Self> {
        let mut config = Self::default();
        if let Some(path) = &cli.config {
            TomlConfig::from_file(path)?.apply_to(&mut config);
        }
        cli.apply_to(&mut config);
        Ok(config)
    }
}

impl CliConfig {
    fn apply_to(&self, config: &mut AppConfig) {
        if let Some(bind) = &self.bind {
            config.bind = bind.clone();
        }
        if let Some(url) = &self.api_base_url {
            config.api_base_url = url.clone();
        }
        if let Some(timeout) = self.request_timeout_seconds {
            config.request_timeout_seconds = timeout;
        }
        if !self.competitions.is_empty() {
            config.competitions = self
                .competitions
                .iter()
                .map(|c| c.trim().to_ascii_uppercase())
                .collect();
        }
        if let Some(threshold) = self.threshold {
            config.threshold = threshold;
        }
        if let Some(max) = self.max_matches {
            config.max_matches = max;
        }
        if let Some(policy) = self.filter_policy {
            config.filter_policy = policy;
        }
        if let Some(ttl) = self.cache_ttl_seconds {
            config.cache_ttl_seconds = ttl;
        }
        config.verbose |= self.verbose;
        config.json_logs |= self.json_logs;
    }
}

impl ConfigProvider for AppConfig {
    fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    fn competitions(&self) -> &[String] {
        &self.competitions
    }

    fn aggregation_threshold(&self) -> usize {
        self.threshold
    }

    fn max_matches(&self) -> usize {
        self.max_matches
    }

    fn filter_policy(&self) -> FilterPolicy {
        self.filter_policy
    }

    fn cache_ttl(&self) -> Option<Duration> {
        (self.cache_ttl_seconds > 0).then(|| Duration::from_secs(self.cache_ttl_seconds))
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_socket_addr("bind", &self.bind)?;
        validation::validate_url("api_base_url", &self.api_base_url)?;
        validation::validate_range("request_timeout_seconds", self.request_timeout_seconds, 1, 300)?;
        validation::validate_competition_codes("competitions", &self.competitions)?;
        validation::validate_positive_number("threshold", self.threshold, 1)?;
        validation::validate_positive_number("max_matches", self.max_matches, 1)?;

        tracing::debug!("Configuration validation passed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = AppConfig::load(&CliConfig::default()).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.competitions, vec!["PL", "CL", "FL1", "BL1", "SA", "PD", "EC"]);
        assert_eq!(config.cache_ttl(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cli_flags_override_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(
            br#"
[server]
bind = "127.0.0.1:9000"

[aggregation]
competitions = ["PL", "CL"]
threshold = 10

[cache]
ttl_seconds = 30
"#,
        )
        .unwrap();

        let cli = CliConfig::parse_from([
            "fixture-feed",
            "--config",
            file.path().to_str().unwrap(),
            "--threshold",
            "5",
            "--filter-policy",
            "ignore",
        ]);
        let config = AppConfig::load(&cli).unwrap();

        assert_eq!(config.bind, "127.0.0.1:9000");
        assert_eq!(config.competitions, vec!["PL", "CL"]);
        assert_eq!(config.threshold, 5);
        assert_eq!(config.max_matches, DEFAULT_MAX_MATCHES);
        assert_eq!(config.filter_policy, FilterPolicy::Ignore);
        assert_eq!(config.cache_ttl(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_cli_competitions_are_normalized() {
        let cli = CliConfig::parse_from(["fixture-feed", "--competitions", "pl, bl1"]);
        let config = AppConfig::load(&cli).unwrap();
        assert_eq!(config.competitions, vec!["PL", "BL1"]);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let config = AppConfig {
            api_base_url: "not a url".to_string(),
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());

        let config = AppConfig {
            request_timeout_seconds: 0,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());

        let config = AppConfig {
            competitions: vec![],
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());

        let config = AppConfig {
            max_matches: 0,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_config_file_is_io_error() {
        let cli = CliConfig {
            config: Some(PathBuf::from("/definitely/not/here.toml")),
            ..CliConfig::default()
        };
        assert!(matches!(
            AppConfig::load(&cli),
            Err(crate::utils::error::FeedError::IoError(_))
        ));
    }
}
