//! Wall-item adapter — raw API items into [`Post`] values.
//!
//! Wall items are loosely shaped: attachments come in several variants
//! and video previews live under one of two field names depending on
//! what the API populated. Decoding is per-item, so a malformed post is
//! dropped alone (with a log) and never fails its batch; a malformed
//! attachment is dropped without affecting its post.

use chrono::DateTime;
use serde::Deserialize;

use crate::types::{Post, PostPhoto, PostVideo};

/// A wall item as the API sends it, reduced to the fields this crate
/// consumes. Missing any required field fails the item's decode.
#[derive(Debug, Deserialize)]
struct WallItem {
    id: i64,
    owner_id: i64,
    /// Unix seconds
    date: i64,
    text: String,
    likes: Counter,
    #[serde(default)]
    reposts: Option<Counter>,
    #[serde(default)]
    attachments: Vec<Attachment>,
}

#[derive(Debug, Deserialize)]
struct Counter {
    count: u64,
}

#[derive(Debug, Deserialize)]
struct Attachment {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    photo: Option<Photo>,
    #[serde(default)]
    video: Option<Video>,
}

#[derive(Debug, Deserialize)]
struct Photo {
    #[serde(default)]
    sizes: Vec<SizedImage>,
}

#[derive(Debug, Deserialize)]
struct Video {
    #[serde(default)]
    first_frame: Vec<SizedImage>,
    #[serde(default)]
    image: Vec<SizedImage>,
}

#[derive(Debug, Deserialize)]
struct SizedImage {
    url: String,
}

/// Convert raw wall items to [`Post`] values, skipping malformed items.
pub(crate) fn posts_from_items(items: &[serde_json::Value]) -> Vec<Post> {
    let mut posts = Vec::with_capacity(items.len());

    for raw in items {
        let item: WallItem = match serde_json::from_value(raw.clone()) {
            Ok(item) => item,
            Err(e) => {
                tracing::warn!(error = %e, item = %raw, "Skipping malformed wall item");
                continue;
            }
        };

        let Some(date) = DateTime::from_timestamp(item.date, 0) else {
            tracing::warn!(date = item.date, "Skipping wall item with out-of-range date");
            continue;
        };

        let mut post = Post {
            date,
            likes: item.likes.count,
            reposts: item.reposts.map(|r| r.count).unwrap_or(0),
            text: item.text,
            path: format!("wall{}_{}", item.owner_id, item.id),
            photos: Vec::new(),
            videos: Vec::new(),
        };

        for attachment in item.attachments {
            collect_attachment(&mut post, attachment);
        }

        posts.push(post);
    }

    posts
}

/// Fold one attachment into the post, trying the known preview fields
/// in priority order and skipping the attachment when none match.
fn collect_attachment(post: &mut Post, attachment: Attachment) {
    match attachment.kind.as_str() {
        "photo" => {
            let url = attachment
                .photo
                .and_then(|p| p.sizes.into_iter().next_back())
                .map(|size| size.url);
            match url {
                Some(url) => post.photos.push(PostPhoto { url }),
                None => {
                    tracing::warn!(path = %post.path, "Photo attachment without sizes, skipping");
                }
            }
        }
        "video" => {
            let Some(video) = attachment.video else {
                tracing::warn!(path = %post.path, "Video attachment without video body, skipping");
                return;
            };
            let frame = video
                .first_frame
                .into_iter()
                .next_back()
                .or_else(|| video.image.into_iter().next_back());
            match frame {
                Some(frame) => post.videos.push(PostVideo {
                    first_frame_url: frame.url,
                }),
                None => {
                    tracing::warn!(path = %post.path, "Video attachment without preview image, skipping");
                }
            }
        }
        // Links, polls, audio etc. carry no media this crate surfaces
        _ => {}
    }
}
