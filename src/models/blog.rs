use serde::{Deserialize, Serialize};

/// A published post in the catalogue.
///
/// The post body itself lives behind `content_url`; the catalogue only
/// holds the metadata needed for listings and the syndication feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Blog {
    /// Store-assigned identifier, stable for the lifetime of the post.
    pub id: i64,
    pub title: String,
    pub subtitle: String,
    /// Publish date with calendar-day granularity (`YYYY-MM-DD`).
    pub time: String,
    /// Cover image reference. Empty when the post has no cover.
    pub cover: String,
    /// View counter. Starts at zero and is only ever incremented.
    pub hits: i64,
    /// Where the rendered post content is fetched from.
    pub content_url: String,
}

/// Input for inserting a post into the catalogue.
///
/// There is no HTTP route for this; posts are seeded by ops tooling and
/// tests directly through the store handle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBlogInput {
    pub title: String,
    pub subtitle: String,
    /// Publish date. Defaults to the current day when not given.
    pub time: Option<String>,
    #[serde(default)]
    pub cover: String,
    pub content_url: String,
}
