//! Configuration types for vktop

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// VKScript permits at most this many API calls inside one `execute`.
pub const MAX_SCRIPT_ITERATIONS: u64 = 25;

/// `wall.get` refuses `count` values above this.
pub const MAX_POSTS_PER_PAGE: u64 = 100;

/// VK API endpoint configuration
///
/// Groups settings for reaching the remote API. Used as a nested
/// sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VkApiConfig {
    /// Base URL for API methods (default: "https://api.vk.com/method/")
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API version sent with every request (default: "5.131")
    #[serde(default = "default_api_version")]
    pub version: String,

    /// Access token sent with every request
    ///
    /// Obtaining the token (environment, secret store, ...) is the
    /// embedding application's concern.
    #[serde(default)]
    pub access_token: String,

    /// Per-request timeout in seconds (default: 60)
    #[serde(default = "default_request_timeout", with = "duration_secs_serde")]
    pub request_timeout: Duration,
}

impl Default for VkApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            version: default_api_version(),
            access_token: String::new(),
            request_timeout: default_request_timeout(),
        }
    }
}

/// Batch sizing and fan-out configuration
///
/// One batched `execute` call covers `posts_per_page * script_iterations`
/// posts; that product is the capacity of a single batch window.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Posts requested per `wall.get` call inside the script (default: 100, API maximum)
    #[serde(default = "default_posts_per_page")]
    pub posts_per_page: u64,

    /// `wall.get` calls performed inside one `execute` script (default: 5)
    #[serde(default = "default_script_iterations")]
    pub script_iterations: u64,

    /// Maximum simultaneous in-flight remote calls per fetch run (default: 5)
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent_requests: usize,
}

impl FetchConfig {
    /// Number of posts one batch window covers.
    pub fn window_capacity(&self) -> u64 {
        self.posts_per_page * self.script_iterations
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            posts_per_page: default_posts_per_page(),
            script_iterations: default_script_iterations(),
            max_concurrent_requests: default_max_concurrent(),
        }
    }
}

/// Backoff configuration for rate-limit recovery
///
/// There is no attempt cap: a rate-limited call is re-issued until it
/// goes through, with the delay growing up to `max_delay`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Delay before the first re-issue (default: 100 ms)
    #[serde(default = "default_initial_delay", with = "duration_ms_serde")]
    pub initial_delay: Duration,

    /// Maximum delay between re-issues (default: 10 seconds)
    #[serde(default = "default_max_delay", with = "duration_ms_serde")]
    pub max_delay: Duration,

    /// Multiplier for exponential backoff (default: 2.0)
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,

    /// Add random jitter to delays (default: true)
    #[serde(default = "default_true")]
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            initial_delay: default_initial_delay(),
            max_delay: default_max_delay(),
            backoff_multiplier: default_backoff_multiplier(),
            jitter: true,
        }
    }
}

/// Main configuration for [`PostFetcher`](crate::PostFetcher)
///
/// Fields are organized into logical sub-configs:
/// - [`api`](VkApiConfig) — endpoint, version, token, timeout
/// - [`fetch`](FetchConfig) — batch sizing and fan-out limits
/// - [`retry`](RetryConfig) — rate-limit backoff behavior
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// VK API endpoint settings
    #[serde(default)]
    pub api: VkApiConfig,

    /// Batch sizing and concurrency settings
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Rate-limit backoff settings
    #[serde(default)]
    pub retry: RetryConfig,
}

impl Config {
    /// Validate batch sizing against the API's hard limits.
    pub fn validate(&self) -> Result<()> {
        if self.fetch.posts_per_page == 0 || self.fetch.posts_per_page > MAX_POSTS_PER_PAGE {
            return Err(Error::Config {
                message: format!(
                    "posts_per_page must be between 1 and {MAX_POSTS_PER_PAGE}, got {}",
                    self.fetch.posts_per_page
                ),
                key: Some("posts_per_page".into()),
            });
        }
        if self.fetch.script_iterations == 0
            || self.fetch.script_iterations > MAX_SCRIPT_ITERATIONS
        {
            return Err(Error::Config {
                message: format!(
                    "script_iterations must be between 1 and {MAX_SCRIPT_ITERATIONS}, got {}",
                    self.fetch.script_iterations
                ),
                key: Some("script_iterations".into()),
            });
        }
        if self.fetch.max_concurrent_requests == 0 {
            return Err(Error::Config {
                message: "max_concurrent_requests must be at least 1".into(),
                key: Some("max_concurrent_requests".into()),
            });
        }
        Ok(())
    }
}

fn default_base_url() -> String {
    "https://api.vk.com/method/".to_string()
}

fn default_api_version() -> String {
    "5.131".to_string()
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(60)
}

fn default_posts_per_page() -> u64 {
    100
}

fn default_script_iterations() -> u64 {
    5
}

fn default_max_concurrent() -> usize {
    5
}

fn default_initial_delay() -> Duration {
    Duration::from_millis(100)
}

fn default_max_delay() -> Duration {
    Duration::from_secs(10)
}

fn default_backoff_multiplier() -> f64 {
    2.0
}

fn default_true() -> bool {
    true
}

mod duration_secs_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

mod duration_ms_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let ms = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(ms))
    }
}
