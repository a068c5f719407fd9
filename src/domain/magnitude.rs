//! Magnitude encoding - maps a quake magnitude to a circle radius and a color
//!
//! Both the marker color and the legend swatch color are read from the same
//! bucket table (`MagnitudeBucket`). They differ only in which side of an
//! integer threshold is closed:
//! - `color(m)` is left-closed: `1.0` falls in `1–2`
//! - `legend_color(d)` is right-closed: `1.0` falls in `0–1`
//!
//! The legend samples each swatch at its upper threshold, so a marker of
//! magnitude `t` always matches the swatch of the row labelled `t–(t+1)`.

use serde::Serialize;
use thiserror::Error;

/// Meters of circle radius per unit of magnitude
pub const RADIUS_PER_MAGNITUDE_M: f64 = 20_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum MagnitudeError {
    #[error("magnitude must be a finite number, got {0}")]
    NotFinite(f64),
}

/// A finite earthquake magnitude. May be zero or negative.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Magnitude(f64);

impl Magnitude {
    pub fn new(value: f64) -> Result<Self, MagnitudeError> {
        if value.is_finite() {
            Ok(Self(value))
        } else {
            Err(MagnitudeError::NotFinite(value))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn radius(self) -> Radius {
        Radius(radius(self.0))
    }

    pub fn bucket(self) -> MagnitudeBucket {
        MagnitudeBucket::classify(self.0)
    }

    pub fn color(self) -> &'static str {
        self.bucket().color()
    }
}

impl std::fmt::Display for Magnitude {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Circle radius in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Radius(pub f64);

impl Radius {
    /// Negative radii come from negative magnitudes and cannot be drawn
    pub fn is_degenerate(self) -> bool {
        self.0 < 0.0
    }

    pub fn meters(self) -> f64 {
        self.0
    }
}

/// The six magnitude bands shared by markers and the legend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MagnitudeBucket {
    Under1,
    From1To2,
    From2To3,
    From3To4,
    From4To5,
    Over5,
}

impl MagnitudeBucket {
    /// Ascending order, lowest band first
    pub const ALL: [MagnitudeBucket; 6] = [
        MagnitudeBucket::Under1,
        MagnitudeBucket::From1To2,
        MagnitudeBucket::From2To3,
        MagnitudeBucket::From3To4,
        MagnitudeBucket::From4To5,
        MagnitudeBucket::Over5,
    ];

    /// Lower threshold of the band (the legend row's starting value)
    pub fn lower(self) -> f64 {
        match self {
            MagnitudeBucket::Under1 => 0.0,
            MagnitudeBucket::From1To2 => 1.0,
            MagnitudeBucket::From2To3 => 2.0,
            MagnitudeBucket::From3To4 => 3.0,
            MagnitudeBucket::From4To5 => 4.0,
            MagnitudeBucket::Over5 => 5.0,
        }
    }

    /// Upper threshold, `None` for the open-ended top band
    pub fn upper(self) -> Option<f64> {
        match self {
            MagnitudeBucket::Over5 => None,
            other => Some(other.lower() + 1.0),
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            MagnitudeBucket::Under1 => "#ccff33",
            MagnitudeBucket::From1To2 => "#ffff33",
            MagnitudeBucket::From2To3 => "#ffcc33",
            MagnitudeBucket::From3To4 => "#ff9933",
            MagnitudeBucket::From4To5 => "#ff6633",
            MagnitudeBucket::Over5 => "#ff3333",
        }
    }

    /// Left-closed lookup: `upper` is exclusive, so integer `t` lands in `t–(t+1)`
    pub fn classify(m: f64) -> Self {
        for bucket in Self::ALL {
            match bucket.upper() {
                Some(upper) if m < upper => return bucket,
                Some(_) => continue,
                None => return bucket,
            }
        }
        MagnitudeBucket::Over5
    }

    /// Right-closed lookup: `lower` is exclusive, so integer `t` lands in `(t-1)–t`
    pub fn classify_upper_inclusive(d: f64) -> Self {
        for bucket in Self::ALL.iter().rev() {
            if *bucket == MagnitudeBucket::Under1 || d > bucket.lower() {
                return *bucket;
            }
        }
        MagnitudeBucket::Under1
    }
}

/// Circle radius for a magnitude. Negative magnitudes give a degenerate radius.
pub fn radius(m: f64) -> f64 {
    m * RADIUS_PER_MAGNITUDE_M
}

/// Marker color for a magnitude
pub fn color(m: f64) -> &'static str {
    MagnitudeBucket::classify(m).color()
}

/// Legend swatch color keyed by a threshold value
pub fn legend_color(d: f64) -> &'static str {
    MagnitudeBucket::classify_upper_inclusive(d).color()
}
