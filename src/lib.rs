//! # vktop
//!
//! Concurrent fetch engine for VK wall posts, ranked by engagement.
//!
//! ## Design Philosophy
//!
//! vktop is designed to be:
//! - **Library-first** - No CLI or web layer, purely a Rust crate for embedding
//! - **Read-through** - No persistence; every fetch returns an in-memory result
//! - **Batch-minded** - Server-side scripted pagination turns hundreds of
//!   round trips into a handful of batched calls
//! - **Throttle-tolerant** - Rate limiting under concurrent fan-out is
//!   recovered internally and never surfaces to callers
//!
//! ## Quick Start
//!
//! ```no_run
//! use vktop::{Config, FetchOptions, PostFetcher, SortKey};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config {
//!         api: vktop::VkApiConfig {
//!             access_token: "token".to_string(),
//!             ..Default::default()
//!         },
//!         ..Default::default()
//!     };
//!
//!     let fetcher = PostFetcher::new(config)?;
//!     let options = FetchOptions {
//!         max_items: 10,
//!         sort_key: SortKey::Likes,
//!         ..Default::default()
//!     };
//!
//!     for post in fetcher.fetch_all("durov", &options).await? {
//!         println!("{} — {} likes", post.path, post.likes);
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// The fetch engine: count probe, partitioning, fan-out, ranking
pub mod fetcher;
/// Backoff schedule for rate-limit recovery
pub mod retry;
/// Core domain types
pub mod types;
/// VK API boundary: transport, classification, scripts, adaptation
pub mod vk;

// Re-export commonly used types
pub use config::{Config, FetchConfig, RetryConfig, VkApiConfig};
pub use error::{Error, Result};
pub use fetcher::PostFetcher;
pub use fetcher::windows::{BatchWindow, partition_by_capacity, partition_evenly};
pub use types::{FetchOptions, Post, PostPhoto, PostVideo, SortKey, normalize_domain};
pub use vk::{ApiOutcome, HttpGateway, RemoteError, VkGateway, WallPayload};
