// MIT License - Copyright (c) 2026 Peter Wright
// Client configuration

use std::time::Duration;

use crate::constants::{
    DEFAULT_CONNECT_TIMEOUT_MS, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_RESPONSE_TIMEOUT_MS,
};

/// Configuration for talking to a panel's ETHM-1 integration module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Integration module address
    pub host: String,
    /// Integration protocol TCP port (default: 7094)
    pub port: u16,
    /// Bound on establishing the TCP connection
    pub connect_timeout_ms: u64,
    /// Bound on waiting for the answer frame after sending a request
    pub response_timeout_ms: u64,
    /// Log full hex dumps of every frame at debug level instead of trace
    pub trace_frames: bool,
    /// Extra attempts after a retryable failure (0 = no retries)
    pub max_retries: u32,
    /// Base delay between attempts, doubled on each retry
    pub retry_delay_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            connect_timeout_ms: DEFAULT_CONNECT_TIMEOUT_MS,
            response_timeout_ms: DEFAULT_RESPONSE_TIMEOUT_MS,
            trace_frames: false,
            max_retries: 0,
            retry_delay_ms: 500,
        }
    }
}

impl ClientConfig {
    /// Create a new config builder starting from defaults.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn response_timeout(&self) -> Duration {
        Duration::from_millis(self.response_timeout_ms)
    }

    /// Delay before retry number `attempt` (1-based), capped at 16x the base.
    pub fn retry_delay(&self, attempt: u32) -> Duration {
        let factor = 1u64 << attempt.saturating_sub(1).min(4);
        Duration::from_millis(self.retry_delay_ms.saturating_mul(factor))
    }
}

/// Builder for ClientConfig.
#[derive(Debug, Clone, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    pub fn connect_timeout_ms(mut self, ms: u64) -> Self {
        self.config.connect_timeout_ms = ms;
        self
    }

    pub fn response_timeout_ms(mut self, ms: u64) -> Self {
        self.config.response_timeout_ms = ms;
        self
    }

    pub fn trace_frames(mut self, enabled: bool) -> Self {
        self.config.trace_frames = enabled;
        self
    }

    pub fn max_retries(mut self, retries: u32) -> Self {
        self.config.max_retries = retries;
        self
    }

    pub fn retry_delay_ms(mut self, ms: u64) -> Self {
        self.config.retry_delay_ms = ms;
        self
    }

    pub fn build(self) -> ClientConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_tool() {
        let config = ClientConfig::default();
        assert_eq!(config.host, "192.168.1.10");
        assert_eq!(config.port, 7094);
        assert_eq!(config.connect_timeout(), Duration::from_millis(750));
        assert_eq!(config.response_timeout(), Duration::from_millis(750));
        assert!(!config.trace_frames);
        assert_eq!(config.max_retries, 0);
    }

    #[test]
    fn test_config_builder() {
        let config = ClientConfig::builder()
            .host("10.0.0.5")
            .port(7095)
            .connect_timeout_ms(1000)
            .response_timeout_ms(2000)
            .trace_frames(true)
            .max_retries(2)
            .retry_delay_ms(100)
            .build();

        assert_eq!(config.host, "10.0.0.5");
        assert_eq!(config.port, 7095);
        assert_eq!(config.connect_timeout_ms, 1000);
        assert_eq!(config.response_timeout_ms, 2000);
        assert!(config.trace_frames);
        assert_eq!(config.max_retries, 2);
        assert_eq!(config.retry_delay_ms, 100);
    }

    #[test]
    fn test_retry_delay_backoff() {
        let config = ClientConfig::builder().retry_delay_ms(100).build();
        assert_eq!(config.retry_delay(1), Duration::from_millis(100));
        assert_eq!(config.retry_delay(2), Duration::from_millis(200));
        assert_eq!(config.retry_delay(3), Duration::from_millis(400));
        assert_eq!(config.retry_delay(10), Duration::from_millis(1600));
    }
}
