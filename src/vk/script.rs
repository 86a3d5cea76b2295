//! Batch script builder — VKScript source for the `execute` method.
//!
//! `wall.get` caps one call at 100 posts, far below what fetching an
//! entire wall needs. `execute` runs a server-side VKScript that loops
//! over `wall.get` itself, so one round trip covers
//! `posts_per_page * iterations` posts instead of one page.

/// Build the VKScript source for one batch window.
///
/// The script performs `iterations` sequential `wall.get` calls of
/// `posts_per_page` items each, starting at `offset`, and returns
/// `{"count": <total>, "items": <accumulated>}`. VKScript allows at most
/// 25 API calls per execution; configuration validation enforces the
/// bound before any script is built.
pub fn wall_get_script(domain: &str, offset: u64, posts_per_page: u64, iterations: u64) -> String {
    format!(
        r#"var offset = {offset};
var step = 0;
var items = [];
var count = 0;
var i = 0;
while (i != {iterations}) {{
    var data = API.wall.get({{"count": {posts_per_page}, "offset": offset + step, "domain": "{domain}"}});
    items = items + data["items"];
    count = data["count"];
    step = step + {posts_per_page};
    i = i + 1;
}};
return {{"count": count, "items": items}};"#
    )
}
