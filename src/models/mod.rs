//! Domain models for the content and feed service.
//!
//! # Core Concepts
//!
//! - [`Blog`]: a published post in the catalogue. Posts are created
//!   administratively (out-of-band), read by the public API, and carry a
//!   view counter that only ever increases. Posts are never deleted.
//! - [`Remark`]: a comment or reply attached to exactly one post. Remarks
//!   are soft-deleted: moderation flips `if_del` and the row stays in the
//!   store, but flagged remarks never appear in list responses.

mod blog;
mod remark;

pub use blog::*;
pub use remark::*;
