use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub ingest: IngestConfig,
    pub enrichment: EnrichmentConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IngestConfig {
    /// Account owner address; outbound mail is recognized by this sender.
    pub owner_email: String,
    /// Messages processed per wave (backpressure against the mail provider).
    pub wave_size: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EnrichmentConfig {
    /// Domain/name pairs per classification request.
    pub batch_size: usize,
    /// Simultaneous in-flight classification batches.
    pub max_concurrent_batches: usize,
    /// Fixed delay between batch dispatches, in milliseconds.
    pub dispatch_delay_ms: u64,
    /// Retries per batch before degrading to unresolved.
    pub max_retries: u32,
    /// Exponential backoff base, in milliseconds.
    pub retry_base_ms: u64,
    pub classifier_url: String,
    pub classifier_model: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| crate::error::ContactError::Config(e.to_string()))?;

        toml::from_str(&content).map_err(|e| crate::error::ContactError::Config(e.to_string()))
    }

    pub fn default() -> Self {
        Self {
            ingest: IngestConfig {
                owner_email: String::new(),
                wave_size: 50,
            },
            enrichment: EnrichmentConfig {
                batch_size: 20,
                max_concurrent_batches: 3,
                dispatch_delay_ms: 500,
                max_retries: 3,
                retry_base_ms: 1000,
                classifier_url: "http://localhost:11434".to_string(),
                classifier_model: "mistral:latest".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "pretty".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.ingest.wave_size, 50);
        assert_eq!(config.enrichment.batch_size, 20);
        assert_eq!(config.enrichment.max_concurrent_batches, 3);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[ingest]
owner_email = "me@example.com"
wave_size = 25

[enrichment]
batch_size = 10
max_concurrent_batches = 2
dispatch_delay_ms = 100
max_retries = 1
retry_base_ms = 50
classifier_url = "http://localhost:11434"
classifier_model = "mistral:latest"

[logging]
level = "debug"
format = "json"
"#
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.ingest.owner_email, "me@example.com");
        assert_eq!(config.ingest.wave_size, 25);
        assert_eq!(config.enrichment.max_retries, 1);
    }
}
