//! Domain models - feed data and magnitude encoding
//!
//! This module contains the pure types used throughout the system:
//! - `geojson` - FeatureCollection / Feature / Geometry as served by both feeds
//! - `quake` - `Earthquake`, the observation extracted from one feed feature
//! - `magnitude` - magnitude to radius and color encoding
//! - `legend` - legend rows built from the same magnitude bands
//! - `html` - text escaping for popup and page markup

pub mod geojson;
pub mod html;
pub mod legend;
pub mod magnitude;
pub mod quake;

// Re-export commonly used types at module level
pub use geojson::{Feature, FeatureCollection, Geometry};
pub use legend::Legend;
pub use magnitude::{color, legend_color, radius, Magnitude, MagnitudeBucket, MagnitudeError};
pub use quake::{Earthquake, LatLon, SkipReason};
