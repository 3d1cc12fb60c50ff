//! Content and feed service backing a small blog.
//!
//! The service owns three things: the post catalogue (listing, lookup,
//! view-count increments), the remark stream attached to posts (creation
//! with validation, soft deletion), and the RSS document projected from
//! the catalogue. Everything is served over a small JSON API; posts
//! themselves are written to the store out-of-band.

pub mod api;
pub mod db;
pub mod error;
pub mod feed;
pub mod models;
