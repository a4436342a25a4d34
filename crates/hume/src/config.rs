use std::fmt::Debug;
use std::time::Duration;

/// The endpoint of the public Hume API.
pub const DEFAULT_BASE_URL: &str = "https://api.hume.ai/v0";

/// Builder for [`HumeConfig`].
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct HumeConfigBuilder {
    api_key: String,
    base_url: Option<String>,
    initial_delay: Option<Duration>,
    poll_interval: Option<Duration>,
    max_wait: Option<Duration>,
}

impl HumeConfigBuilder {
    /// Creates a builder with the given API key.
    #[inline]
    pub fn with_api_key<S: Into<String>>(api_key: S) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: None,
            initial_delay: None,
            poll_interval: None,
            max_wait: None,
        }
    }

    /// Sets a custom base URL, e.g. for a proxy.
    #[inline]
    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets how long to wait after submitting a job before asking for its
    /// status. Defaults to one second.
    #[inline]
    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = Some(delay);
        self
    }

    /// Sets the first interval between two status checks. Later intervals
    /// grow exponentially. Defaults to 500 milliseconds.
    #[inline]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = Some(interval);
        self
    }

    /// Sets how long to keep polling a job that is not completed. Defaults
    /// to 30 seconds.
    #[inline]
    pub fn with_max_wait(mut self, max_wait: Duration) -> Self {
        self.max_wait = Some(max_wait);
        self
    }

    /// Builds the configuration.
    #[inline]
    pub fn build(self) -> HumeConfig {
        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        HumeConfig {
            api_key: self.api_key,
            base_url: base_url.trim_end_matches('/').to_owned(),
            initial_delay: self.initial_delay.unwrap_or(Duration::from_secs(1)),
            poll_interval: self
                .poll_interval
                .unwrap_or(Duration::from_millis(500)),
            max_wait: self.max_wait.unwrap_or(Duration::from_secs(30)),
        }
    }
}

impl Debug for HumeConfigBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HumeConfigBuilder")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("initial_delay", &self.initial_delay)
            .field("poll_interval", &self.poll_interval)
            .field("max_wait", &self.max_wait)
            .finish()
    }
}

/// Configuration for [`HumeClient`](crate::HumeClient).
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct HumeConfig {
    pub(crate) api_key: String,
    pub(crate) base_url: String,
    pub(crate) initial_delay: Duration,
    pub(crate) poll_interval: Duration,
    pub(crate) max_wait: Duration,
}

impl HumeConfig {
    #[inline]
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Debug for HumeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HumeConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("initial_delay", &self.initial_delay)
            .field("poll_interval", &self.poll_interval)
            .field("max_wait", &self.max_wait)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HumeConfigBuilder::with_api_key("secret").build();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.initial_delay, Duration::from_secs(1));
        assert_eq!(
            config.url("/batch/jobs"),
            "https://api.hume.ai/v0/batch/jobs"
        );
    }

    #[test]
    fn test_trailing_slash() {
        let config = HumeConfigBuilder::with_api_key("secret")
            .with_base_url("http://localhost:8080/v0/")
            .build();
        assert_eq!(
            config.url("/batch/jobs"),
            "http://localhost:8080/v0/batch/jobs"
        );
    }

    #[test]
    fn test_debug_hides_api_key() {
        let builder = HumeConfigBuilder::with_api_key("secret");
        assert!(!format!("{builder:?}").contains("secret"));
        assert!(!format!("{:?}", builder.build()).contains("secret"));
    }
}
