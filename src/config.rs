use serde::Deserialize;
use std::time::Duration;

/// Immutable configuration for one scan run. Built once by the CLI layer.
#[derive(Debug, Clone, Deserialize)]
pub struct RunConfig {
    pub base_urls: Vec<String>,
    pub wordlist: Vec<String>,
    pub concurrency_limit: usize,
    pub per_host_limit: usize,
    pub per_request_timeout: Duration,
    pub inter_request_delay: Duration,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            base_urls: Vec::new(),
            wordlist: Vec::new(),
            concurrency_limit: 100,
            per_host_limit: 10,
            per_request_timeout: Duration::from_secs(10),
            inter_request_delay: Duration::from_millis(100),
        }
    }
}
