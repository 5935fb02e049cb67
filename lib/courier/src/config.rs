//! Client configuration types.

use std::time::Duration;

/// How workers are scheduled for `execute` calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkerPolicy {
    /// One task per call, started immediately. No queueing, no backpressure.
    #[default]
    Unbounded,
    /// At most this many transport calls run at once; other workers wait.
    Bounded(usize),
}

/// Configuration for the client and its default transport.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Worker scheduling policy.
    pub workers: WorkerPolicy,
    /// Connection timeout duration, `None` to wait for the OS.
    pub connect_timeout: Option<Duration>,
    /// Maximum idle connections per host.
    pub pool_idle_per_host: usize,
    /// Idle connection timeout.
    pub pool_idle_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            workers: WorkerPolicy::Unbounded,
            connect_timeout: Some(Duration::from_secs(10)),
            pool_idle_per_host: 32,
            pool_idle_timeout: Duration::from_secs(90),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug, Clone, Default)]
pub struct ClientConfigBuilder {
    workers: Option<WorkerPolicy>,
    connect_timeout: Option<Option<Duration>>,
    pool_idle_per_host: Option<usize>,
    pool_idle_timeout: Option<Duration>,
}

impl ClientConfigBuilder {
    /// Set the worker policy.
    #[must_use]
    pub const fn workers(mut self, workers: WorkerPolicy) -> Self {
        self.workers = Some(workers);
        self
    }

    /// Limit the number of concurrent transport calls.
    #[must_use]
    pub const fn max_workers(self, max: usize) -> Self {
        self.workers(WorkerPolicy::Bounded(max))
    }

    /// Set the connection timeout.
    #[must_use]
    pub const fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(Some(timeout));
        self
    }

    /// Remove the connection timeout.
    #[must_use]
    pub const fn no_connect_timeout(mut self) -> Self {
        self.connect_timeout = Some(None);
        self
    }

    /// Set the maximum idle connections per host.
    #[must_use]
    pub const fn pool_idle_per_host(mut self, count: usize) -> Self {
        self.pool_idle_per_host = Some(count);
        self
    }

    /// Set the idle connection timeout.
    #[must_use]
    pub const fn pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.pool_idle_timeout = Some(timeout);
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> ClientConfig {
        let defaults = ClientConfig::default();
        ClientConfig {
            workers: self.workers.unwrap_or(defaults.workers),
            connect_timeout: self.connect_timeout.unwrap_or(defaults.connect_timeout),
            pool_idle_per_host: self
                .pool_idle_per_host
                .unwrap_or(defaults.pool_idle_per_host),
            pool_idle_timeout: self.pool_idle_timeout.unwrap_or(defaults.pool_idle_timeout),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.workers, WorkerPolicy::Unbounded);
        assert_eq!(config.connect_timeout, Some(Duration::from_secs(10)));
        assert_eq!(config.pool_idle_per_host, 32);
        assert_eq!(config.pool_idle_timeout, Duration::from_secs(90));
    }

    #[test]
    fn builder_overrides() {
        let config = ClientConfig::builder()
            .max_workers(4)
            .connect_timeout(Duration::from_secs(5))
            .pool_idle_per_host(16)
            .build();

        assert_eq!(config.workers, WorkerPolicy::Bounded(4));
        assert_eq!(config.connect_timeout, Some(Duration::from_secs(5)));
        assert_eq!(config.pool_idle_per_host, 16);
    }

    #[test]
    fn builder_without_connect_timeout() {
        let config = ClientConfig::builder().no_connect_timeout().build();
        assert_eq!(config.connect_timeout, None);
    }
}
