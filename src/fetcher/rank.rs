//! Ranking and truncation of the merged post list.

use crate::types::{Post, SortKey};

/// Sort posts by the chosen engagement key, descending.
///
/// The sort is stable: posts ranking equal keep their merge order, so
/// runs are deterministic.
pub(super) fn sort_posts(posts: &mut [Post], key: SortKey) {
    match key {
        SortKey::Likes => posts.sort_by(|a, b| b.likes.cmp(&a.likes)),
        SortKey::Reposts => {
            posts.sort_by(|a, b| (b.reposts, b.likes).cmp(&(a.reposts, a.likes)))
        }
    }
}

/// Keep the first `max_items` posts; 0 keeps everything.
pub(super) fn truncate(posts: &mut Vec<Post>, max_items: u64) {
    if max_items > 0 {
        posts.truncate(max_items as usize);
    }
}
