//! Core domain types for vktop

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single wall post with the attachments relevant for ranking display.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Publication time
    pub date: DateTime<Utc>,
    /// Like count at fetch time
    pub likes: u64,
    /// Repost count at fetch time (0 when the source omits it)
    #[serde(default)]
    pub reposts: u64,
    /// Post text, possibly empty
    pub text: String,
    /// Stable post identifier of the form `wall<owner_id>_<post_id>`
    pub path: String,
    /// Photo attachments, in source order
    pub photos: Vec<PostPhoto>,
    /// Video attachments, in source order
    pub videos: Vec<PostVideo>,
}

/// A photo attached to a post.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostPhoto {
    /// URL of the highest-resolution size the source listed
    pub url: String,
}

/// A video attached to a post.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostVideo {
    /// Preview image URL for the video's first frame
    pub first_frame_url: String,
}

/// Engagement metric used for ranking.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Likes descending
    #[default]
    Likes,
    /// Reposts descending, likes descending as tie-breaker
    Reposts,
}

/// Options for one fetch invocation.
#[derive(Clone, Debug, Default)]
pub struct FetchOptions {
    /// Cap results to this count; 0 fetches and returns everything
    pub max_items: u64,
    /// Ranking key for the final sort
    pub sort_key: SortKey,
    /// Inclusive lower publication-date bound
    pub date_from: Option<DateTime<Utc>>,
    /// Inclusive upper publication-date bound
    pub date_to: Option<DateTime<Utc>>,
    /// Override for the configured maximum of simultaneous remote calls
    pub concurrency: Option<usize>,
}

impl FetchOptions {
    /// True when `date` falls within the configured inclusive bounds.
    pub(crate) fn date_in_bounds(&self, date: DateTime<Utc>) -> bool {
        if let Some(from) = self.date_from
            && date < from
        {
            return false;
        }
        if let Some(to) = self.date_to
            && date > to
        {
            return false;
        }
        true
    }
}

/// Reduce an account address to its bare identifier.
///
/// Accepts the forms an embedding application is likely to pass through
/// verbatim: `https://vk.com/durov`, `http://vk.com/durov`,
/// `vk.com/durov`, or plain `durov`. Trailing slashes are stripped.
pub fn normalize_domain(input: &str) -> &str {
    let s = input.trim();
    let s = s
        .strip_prefix("https://")
        .or_else(|| s.strip_prefix("http://"))
        .unwrap_or(s);
    let s = s.strip_prefix("vk.com/").unwrap_or(s);
    s.trim_end_matches('/')
}
