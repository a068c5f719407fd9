//! Map legend - one swatch row per magnitude band

use crate::domain::magnitude::{legend_color, MagnitudeBucket};
use serde::Serialize;
use std::fmt::Write;

/// Corner the legend control is pinned to
pub const LEGEND_POSITION: &str = "bottomright";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendRow {
    pub threshold: f64,
    pub label: String,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub position: &'static str,
    pub rows: Vec<LegendRow>,
}

impl Legend {
    /// Build the legend from the shared band table.
    ///
    /// Each swatch is sampled at its row's upper threshold, matching the band a
    /// marker of the row's starting magnitude receives.
    pub fn magnitude() -> Self {
        let thresholds: Vec<f64> = MagnitudeBucket::ALL.iter().map(|b| b.lower()).collect();

        let rows = thresholds
            .iter()
            .enumerate()
            .map(|(i, &threshold)| {
                let label = match thresholds.get(i + 1) {
                    Some(next) => format!("{threshold}\u{2013}{next}"),
                    None => format!("{threshold}+"),
                };
                LegendRow { threshold, label, color: legend_color(threshold + 1.0) }
            })
            .collect();

        Self { position: LEGEND_POSITION, rows }
    }

    /// Find the row whose label matches, e.g. `"1–2"` or `"5+"`
    pub fn row(&self, label: &str) -> Option<&LegendRow> {
        self.rows.iter().find(|r| r.label == label)
    }

    /// HTML body of the legend control
    pub fn to_html(&self) -> String {
        let mut html = String::with_capacity(256);
        let last = self.rows.len().saturating_sub(1);
        for (i, row) in self.rows.iter().enumerate() {
            let label = row.label.replace('\u{2013}', "&ndash;");
            let _ = write!(html, "<i style=\"background:{}\"></i> {}", row.color, label);
            if i < last {
                html.push_str("<br>");
            }
        }
        html
    }
}
