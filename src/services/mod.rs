//! Services - layer building and map rendering
//!
//! This module contains the render pipeline:
//! - `layers` - Earthquake circle markers and the fault line layer
//! - `map_view` - Base tiles, overlays, layer control and legend
//! - `renderer` - Concurrent feed fetch and view assembly

pub mod layers;
pub mod map_view;
pub mod renderer;

// Re-export commonly used types
pub use layers::{CircleMarker, EarthquakeLayer, FaultLineLayer};
pub use map_view::MapView;
pub use renderer::{render, FeedKind, RenderSummary, RenderedMap};
