//! Client-side consumption of paginated list APIs.
//!
//! Backends in the wild return lists in several shapes; everything in here
//! funnels them into one `{items, total}` pair and keeps list state
//! reconciled with the URL query string.

pub mod http;
pub mod normalize;
pub mod poll;
pub mod state;
