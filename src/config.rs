//! Runtime configuration for the vanity address search.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::matcher::{SearchPattern, ADDRESS_HEX_LEN};
use crate::output::DEFAULT_OUTPUT_FILE;
use crate::worker::SearchConfig;

/// Ethereum Vanity Address Search
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Leading hex characters the address must start with
    #[arg(short = 's', long, default_value = "")]
    pub prefix: String,

    /// Trailing hex characters the address must end with
    #[arg(short = 'e', long, default_value = "")]
    pub suffix: String,

    /// Also match the checksum (EIP-55) casing of the address
    #[arg(short = 'c', long, default_value = "false")]
    pub checksum: bool,

    /// Attempts per worker between progress reports
    #[arg(short = 'p', long, default_value = "50000")]
    pub step: u64,

    /// Total attempt budget across all workers
    #[arg(short = 'm', long, default_value = "5000000000000000")]
    pub max_tries: u64,

    /// Progress log interval in milliseconds
    #[arg(short = 'i', long, default_value = "10000")]
    pub log_interval_ms: u64,

    /// Number of worker threads (default: number of CPU cores)
    #[arg(short = 'w', long)]
    pub workers: Option<usize>,

    /// File the found address and private key are written to
    #[arg(short = 'o', long, default_value = DEFAULT_OUTPUT_FILE)]
    pub output: PathBuf,
}

impl Config {
    /// Returns the number of workers, defaulting to CPU count
    pub fn worker_count(&self) -> usize {
        self.workers.unwrap_or_else(num_cpus::get)
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [("Prefix", &self.prefix), ("Suffix", &self.suffix)] {
            if !value.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(ConfigError::InvalidPattern(format!(
                    "{} must contain only hex characters (0-9, a-f, A-F)",
                    name
                )));
            }
        }

        if self.prefix.len() + self.suffix.len() > ADDRESS_HEX_LEN {
            return Err(ConfigError::InvalidPattern(format!(
                "Combined prefix + suffix cannot be longer than {} characters",
                ADDRESS_HEX_LEN
            )));
        }

        if self.step == 0 {
            return Err(ConfigError::InvalidValue("step must be at least 1".into()));
        }

        if self.max_tries == 0 {
            return Err(ConfigError::InvalidValue("max-tries must be at least 1".into()));
        }

        if self.log_interval_ms == 0 {
            return Err(ConfigError::InvalidValue(
                "log-interval-ms must be at least 1".into(),
            ));
        }

        if self.worker_count() == 0 {
            return Err(ConfigError::InvalidValue("workers must be at least 1".into()));
        }

        Ok(())
    }

    /// Returns the pattern exactly as supplied.
    pub fn pattern(&self) -> SearchPattern {
        SearchPattern::new(self.prefix.clone(), self.suffix.clone(), self.checksum)
    }

    /// Builds the search parameters consumed by the coordinator.
    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            pattern: self.pattern(),
            workers: self.worker_count(),
            step: self.step,
            max_tries: self.max_tries,
            progress_interval: Duration::from_millis(self.log_interval_ms),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_config(prefix: &str, suffix: &str) -> Config {
        Config {
            prefix: prefix.into(),
            suffix: suffix.into(),
            checksum: false,
            step: 50_000,
            max_tries: 5_000_000_000_000_000,
            log_interval_ms: 10_000,
            workers: None,
            output: PathBuf::from(DEFAULT_OUTPUT_FILE),
        }
    }

    #[test]
    fn test_defaults() {
        let config = Config::parse_from(["vanity_search"]);
        assert_eq!(config.prefix, "");
        assert_eq!(config.suffix, "");
        assert!(!config.checksum);
        assert_eq!(config.step, 50_000);
        assert_eq!(config.max_tries, 5_000_000_000_000_000);
        assert_eq!(config.log_interval_ms, 10_000);
        assert_eq!(config.output, PathBuf::from("vanity-address.txt"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_short_flags() {
        let config = Config::parse_from([
            "vanity_search", "-s", "Dead", "-e", "beef", "-c", "-p", "1000", "-m", "9", "-i", "500",
            "-w", "3",
        ]);
        let search = config.search_config();

        assert_eq!(search.pattern, SearchPattern::new("Dead", "beef", true));
        assert_eq!(search.step, 1000);
        assert_eq!(search.max_tries, 9);
        assert_eq!(search.workers, 3);
        assert_eq!(search.progress_interval, Duration::from_millis(500));
    }

    #[test]
    fn test_valid_pattern() {
        assert!(make_test_config("dead", "BEEF").validate().is_ok());
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(make_test_config("xyz", "").validate().is_err());
        assert!(make_test_config("", "0x12").validate().is_err());
    }

    #[test]
    fn test_pattern_too_long() {
        let config = make_test_config(&"a".repeat(21), &"b".repeat(20));
        assert!(matches!(config.validate(), Err(ConfigError::InvalidPattern(_))));

        let config = make_test_config(&"a".repeat(20), &"b".repeat(20));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_values_rejected() {
        let mut config = make_test_config("", "");
        config.step = 0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidValue(_))));

        let mut config = make_test_config("", "");
        config.workers = Some(0);
        assert!(config.validate().is_err());
    }
}
