//! The fetch engine — count probe, partitioning, fan-out, ranking.
//!
//! [`PostFetcher`] is the crate's public entry point. A fetch run owns
//! all of its state: the batch windows, the futures derived from them,
//! and the concurrency bound all live and die with one call — nothing
//! is shared or memoized across invocations.

mod orchestrator;
mod rank;
mod sequential;
pub mod windows;

use std::sync::Arc;

use crate::config::Config;
use crate::error::Result;
use crate::types::{FetchOptions, Post, normalize_domain};
use crate::vk::{self, HttpGateway, VkGateway};

use windows::partition_by_capacity;

/// Fetches wall posts for one account, ranked by engagement.
///
/// Cheap to clone; clones share the underlying HTTP client and
/// configuration but nothing else.
#[derive(Clone)]
pub struct PostFetcher {
    gateway: Arc<dyn VkGateway>,
    config: Arc<Config>,
}

impl PostFetcher {
    /// Create a fetcher backed by the real VK API.
    ///
    /// Validates batch sizing against the API's hard limits.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let gateway = Arc::new(HttpGateway::new(&config.api)?);
        Ok(Self {
            gateway,
            config: Arc::new(config),
        })
    }

    /// Create a fetcher with a custom gateway (tests, recording proxies).
    pub fn with_gateway(config: Config, gateway: Arc<dyn VkGateway>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            gateway,
            config: Arc::new(config),
        })
    }

    /// Total number of posts on the account's wall.
    ///
    /// One minimal call (`count=1`) reading the total the API reports.
    pub async fn probe_total(&self, domain: &str) -> Result<u64> {
        let domain = normalize_domain(domain);
        tracing::info!(domain = domain, "Probing total posts");

        let params = [
            ("domain", domain.to_string()),
            ("count", "1".to_string()),
            ("offset", "0".to_string()),
        ];
        let payload = vk::request_with_retry(
            self.gateway.as_ref(),
            "wall.get",
            &params,
            Some(domain),
            &self.config.retry,
        )
        .await?;

        tracing::info!(domain = domain, total = payload.count, "Total posts probed");
        Ok(payload.count)
    }

    /// Fetch the account's posts concurrently and rank them.
    ///
    /// Probes the total, partitions the range into batch windows, fans
    /// out one scripted call per window under the concurrency bound,
    /// merges in window order, then sorts and truncates per `options`.
    /// Date bounds, when set, are applied as a post-merge filter; for
    /// walls where the bounds cut deep, [`fetch_sequential`] avoids
    /// fetching past the cutoff instead.
    ///
    /// Fails as a whole on the first fatal error — no partial result.
    ///
    /// [`fetch_sequential`]: PostFetcher::fetch_sequential
    pub async fn fetch_all(&self, domain: &str, options: &FetchOptions) -> Result<Vec<Post>> {
        let domain = normalize_domain(domain);

        let total = self.probe_total(domain).await?;
        if total == 0 {
            return Ok(Vec::new());
        }

        let amount = bounded_amount(total, options.max_items);
        let windows = partition_by_capacity(amount, self.config.fetch.window_capacity());
        let concurrency = options
            .concurrency
            .unwrap_or(self.config.fetch.max_concurrent_requests);

        tracing::info!(
            domain = domain,
            amount = amount,
            windows = windows.len(),
            concurrency = concurrency,
            "Starting concurrent fetch"
        );

        let mut posts = orchestrator::fetch_windows(
            self.gateway.as_ref(),
            &self.config,
            domain,
            windows,
            concurrency,
        )
        .await?;

        if options.date_from.is_some() || options.date_to.is_some() {
            posts.retain(|post| options.date_in_bounds(post.date));
        }

        rank::sort_posts(&mut posts, options.sort_key);
        rank::truncate(&mut posts, options.max_items);
        Ok(posts)
    }

    /// Fetch the account's posts one page at a time and rank them.
    ///
    /// The single-task mode: direct `wall.get` pagination, stopping
    /// early once a post older than `options.date_from` appears. Relies
    /// on the API returning posts in non-increasing date order (a
    /// documented precondition, not re-verified here).
    pub async fn fetch_sequential(
        &self,
        domain: &str,
        options: &FetchOptions,
    ) -> Result<Vec<Post>> {
        let domain = normalize_domain(domain);

        let total = self.probe_total(domain).await?;
        if total == 0 {
            return Ok(Vec::new());
        }

        let amount = bounded_amount(total, options.max_items);
        tracing::info!(domain = domain, amount = amount, "Starting sequential fetch");

        let mut posts = sequential::fetch_paged(
            self.gateway.as_ref(),
            &self.config,
            domain,
            amount,
            options,
        )
        .await?;

        rank::sort_posts(&mut posts, options.sort_key);
        rank::truncate(&mut posts, options.max_items);
        Ok(posts)
    }
}

/// The index range one run fetches: the whole wall, or the first
/// `max_items` posts when a cap is set.
fn bounded_amount(total: u64, max_items: u64) -> u64 {
    if max_items > 0 { total.min(max_items) } else { total }
}
