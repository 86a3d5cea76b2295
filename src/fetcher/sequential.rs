//! Sequential fetch mode — direct `wall.get` pagination.
//!
//! One page at a time, no server-side script. Exists for date-bounded
//! fetches, where issuing further pages is pointless once a post older
//! than the lower bound appears.
//!
//! Precondition: the API returns wall items in non-increasing date
//! order. The early stop relies on it and does not re-verify; a source
//! violating it would silently truncate the result.

use crate::config::Config;
use crate::error::Result;
use crate::types::{FetchOptions, Post};
use crate::vk::{self, VkGateway};

/// Fetch up to `amount` posts page by page, keeping those inside the
/// options' date bounds.
///
/// Stops issuing pages at the first post older than `date_from`, or on
/// an empty page (the wall ran out before `amount` was reached).
pub(super) async fn fetch_paged(
    gateway: &dyn VkGateway,
    config: &Config,
    domain: &str,
    amount: u64,
    options: &FetchOptions,
) -> Result<Vec<Post>> {
    let page_size = config.fetch.posts_per_page;
    let mut posts = Vec::new();
    let mut offset = 0u64;

    while offset < amount {
        let count = page_size.min(amount - offset);
        let params = [
            ("domain", domain.to_string()),
            ("offset", offset.to_string()),
            ("count", count.to_string()),
        ];
        let payload =
            vk::request_with_retry(gateway, "wall.get", &params, Some(domain), &config.retry)
                .await?;

        if payload.items.is_empty() {
            tracing::debug!(domain = domain, offset = offset, "Wall exhausted before requested amount");
            break;
        }

        let page_len = payload.items.len() as u64;
        for post in vk::parse::posts_from_items(&payload.items) {
            if let Some(from) = options.date_from
                && post.date < from
            {
                // Everything after this post is older still
                tracing::debug!(
                    domain = domain,
                    posts = posts.len(),
                    "Reached posts older than the lower date bound, stopping"
                );
                return Ok(posts);
            }
            if options.date_in_bounds(post.date) {
                posts.push(post);
            }
        }

        offset += page_len;
    }

    Ok(posts)
}
