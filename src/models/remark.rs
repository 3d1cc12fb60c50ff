use serde::{Deserialize, Serialize};

/// A comment or reply attached to a post.
///
/// A remark belongs to exactly one [`Blog`](super::Blog) via `blog_id`.
/// Replies keep threading data as plain references: `target_id` names the
/// post or the parent remark, `target_name` the display name being
/// answered. Resolving the thread is the client's concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Remark {
    pub id: i64,
    pub blog_id: i64,
    /// True when this remark answers another remark rather than the post.
    pub is_reply: bool,
    /// Id of the post or parent remark this targets.
    pub target_id: String,
    pub content: String,
    /// Creation timestamp as supplied by the caller.
    pub create_at: String,
    /// Soft-delete flag. Flagged remarks stay in the store but are never
    /// listed.
    pub if_del: bool,
    pub user_name: String,
    pub target_name: String,
}

/// Input for creating a remark.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRemarkInput {
    pub blog_id: i64,
    #[serde(default)]
    pub is_reply: bool,
    pub target_id: String,
    pub content: String,
    pub create_at: String,
    pub user_name: String,
    pub target_name: String,
}
