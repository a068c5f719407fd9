//! Map renderer - fetch both feeds, build each overlay, assemble the view
//!
//! The two fetches run concurrently and neither depends on the other. Each
//! overlay is built as soon as its own feed resolves. A failed feed leaves its
//! overlay out and the rest of the map still renders.

use crate::domain::geojson::FeatureCollection;
use crate::infra::config::Config;
use crate::io::feed::{FeedSource, FetchError};
use crate::services::layers::{EarthquakeLayer, FaultLineLayer};
use crate::services::map_view::MapView;
use serde::Serialize;
use std::time::Instant;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::{info, warn};

/// Which feed a fetch belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedKind {
    Earthquakes,
    FaultLines,
}

impl FeedKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedKind::Earthquakes => "earthquakes",
            FeedKind::FaultLines => "fault_lines",
        }
    }
}

/// Counts from one render pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderSummary {
    pub quakes_drawn: usize,
    pub quakes_skipped: usize,
    pub quakes_degenerate: usize,
    pub fault_features: usize,
    pub failed_feeds: Vec<FeedKind>,
    pub elapsed_ms: u64,
}

impl RenderSummary {
    pub fn log(&self) {
        let rendered_at = OffsetDateTime::now_utc().format(&Rfc3339).unwrap_or_default();
        info!(
            rendered_at = %rendered_at,
            quakes_drawn = self.quakes_drawn,
            quakes_skipped = self.quakes_skipped,
            quakes_degenerate = self.quakes_degenerate,
            fault_features = self.fault_features,
            failed_feeds = ?self.failed_feeds,
            elapsed_ms = self.elapsed_ms,
            "map_rendered"
        );
    }
}

#[derive(Debug, Clone)]
pub struct RenderedMap {
    pub view: MapView,
    pub summary: RenderSummary,
}

/// Log a failed feed (cold path)
#[cold]
fn log_feed_failed(kind: FeedKind, e: &FetchError) {
    warn!(feed = kind.as_str(), error = %e, "feed_fetch_failed");
}

async fn fetch_layer<S, T, F>(source: &S, kind: FeedKind, url: &str, build: F) -> Option<T>
where
    S: FeedSource + ?Sized,
    F: FnOnce(FeatureCollection) -> T,
{
    match source.fetch(url).await {
        Ok(collection) => Some(build(collection)),
        Err(e) => {
            log_feed_failed(kind, &e);
            None
        }
    }
}

/// Render one fresh map view. Nothing is carried over between calls.
pub async fn render<S>(config: &Config, source: &S) -> RenderedMap
where
    S: FeedSource + ?Sized,
{
    let start = Instant::now();

    let (earthquakes, fault_lines) = tokio::join!(
        fetch_layer(source, FeedKind::Earthquakes, config.earthquakes_url(), |fc| {
            EarthquakeLayer::build(&fc)
        }),
        fetch_layer(source, FeedKind::FaultLines, config.fault_lines_url(), FaultLineLayer::build),
    );

    let mut summary = RenderSummary::default();
    match &earthquakes {
        Some(layer) => {
            summary.quakes_drawn = layer.stats.drawn;
            summary.quakes_skipped = layer.stats.skipped;
            summary.quakes_degenerate = layer.stats.degenerate;
        }
        None => summary.failed_feeds.push(FeedKind::Earthquakes),
    }
    match &fault_lines {
        Some(layer) => summary.fault_features = layer.feature_count(),
        None => summary.failed_feeds.push(FeedKind::FaultLines),
    }

    let view = MapView::assemble(config, earthquakes, fault_lines);
    summary.elapsed_ms = start.elapsed().as_millis() as u64;

    RenderedMap { view, summary }
}
