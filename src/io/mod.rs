//! IO modules - external system interfaces
//!
//! This module contains all external IO operations:
//! - `feed` - GeoJSON feed fetching over HTTP or from disk
//! - `page` - Standalone Leaflet HTML page
//! - `output` - Page output to file
//! - `server` - HTTP endpoint serving a fresh map per request

pub mod feed;
pub mod output;
pub mod page;
pub mod server;

// Re-export commonly used types
pub use feed::{FeedSource, FetchError, HttpFeedSource};
pub use output::write_page;
pub use page::render_page;
pub use server::start_map_server;
