//! Fetch orchestrator — bounded concurrent fan-out over batch windows.
//!
//! One future per window; each builds its script, calls the gateway
//! under the rate-limit retry loop, and adapts its slice of items. The
//! stream is buffered to the concurrency limit, so excess windows queue
//! rather than being rejected, and results come back in window order.
//! The first fatal error fails the whole run: pending windows are
//! dropped and no partial post list escapes.

use futures::stream::{self, StreamExt, TryStreamExt};

use crate::config::Config;
use crate::error::Result;
use crate::types::Post;
use crate::vk::script::wall_get_script;
use crate::vk::{self, VkGateway};

use super::windows::BatchWindow;

/// Fetch every window and merge the slices in ascending-offset order.
pub(super) async fn fetch_windows(
    gateway: &dyn VkGateway,
    config: &Config,
    domain: &str,
    windows: Vec<BatchWindow>,
    concurrency: usize,
) -> Result<Vec<Post>> {
    let window_count = windows.len();

    let slices: Vec<Vec<Post>> = stream::iter(windows)
        .map(|window| fetch_window(gateway, config, domain, window))
        .buffered(concurrency.max(1))
        .try_collect()
        .await?;

    let posts: Vec<Post> = slices.into_iter().flatten().collect();
    tracing::info!(
        domain = domain,
        windows = window_count,
        posts = posts.len(),
        "All batch windows fetched"
    );
    Ok(posts)
}

/// Fetch one window via a server-side scripted loop.
async fn fetch_window(
    gateway: &dyn VkGateway,
    config: &Config,
    domain: &str,
    window: BatchWindow,
) -> Result<Vec<Post>> {
    tracing::info!(domain = domain, offset = window.offset, size = window.size, "Fetching batch window");

    let posts_per_page = config.fetch.posts_per_page;
    let iterations = window.size.div_ceil(posts_per_page);
    let code = wall_get_script(domain, window.offset, posts_per_page, iterations);

    let payload = vk::request_with_retry(
        gateway,
        "execute",
        &[("code", code)],
        Some(domain),
        &config.retry,
    )
    .await?;

    let posts = vk::parse::posts_from_items(&payload.items);
    tracing::info!(
        domain = domain,
        offset = window.offset,
        posts = posts.len(),
        "Batch window fetched"
    );
    Ok(posts)
}
