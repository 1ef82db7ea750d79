//! Page controllers.
//!
//! Each page turns the shared table plus its own selection into a view
//! model. Nothing here touches egui; the `ui` module renders the result.

pub mod character;
pub mod debut;
pub mod insights;
pub mod overview;

use crate::data::aggregate::{HistogramBin, RankPivot};

// ---------------------------------------------------------------------------
// Navigation
// ---------------------------------------------------------------------------

/// The four dashboard views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Overview,
    CharacterPerformance,
    DebutLongevity,
    CustomInsights,
}

impl Page {
    pub const ALL: [Page; 4] = [
        Page::Overview,
        Page::CharacterPerformance,
        Page::DebutLongevity,
        Page::CustomInsights,
    ];

    /// Sidebar label.
    pub fn label(self) -> &'static str {
        match self {
            Page::Overview => "Overview of Rankings",
            Page::CharacterPerformance => "Character Performance",
            Page::DebutLongevity => "Debut and Longevity Analysis",
            Page::CustomInsights => "Custom Insights",
        }
    }

    /// Page heading.
    pub fn title(self) -> &'static str {
        match self {
            Page::Overview => "Sanrio Character Ranking Overview",
            Page::CharacterPerformance => "Character Trends Over Time",
            Page::DebutLongevity => "Debut and Longevity Analysis",
            Page::CustomInsights => "Deep Dive: Insights and Comparisons",
        }
    }
}

// ---------------------------------------------------------------------------
// Outcome of a page build
// ---------------------------------------------------------------------------

/// Either a view to render or a notice explaining why there is nothing to
/// show. An empty selection is not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Ready(T),
    NoData(String),
}

impl<T> Outcome<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, Outcome::Ready(_))
    }

    pub fn ready(self) -> Option<T> {
        match self {
            Outcome::Ready(v) => Some(v),
            Outcome::NoData(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Chart descriptions handed to the renderer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    Bar,
    Line,
    Heatmap,
    Histogram,
    Scatter,
}

/// Chart metadata: which fields go where and the title.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub x_field: &'static str,
    pub y_field: &'static str,
    pub color_field: Option<&'static str>,
}

impl ChartSpec {
    pub fn new(kind: ChartKind, title: impl Into<String>, x: &'static str, y: &'static str) -> Self {
        Self {
            kind,
            title: title.into(),
            x_field: x,
            y_field: y,
            color_field: None,
        }
    }

    pub fn colored_by(mut self, field: &'static str) -> Self {
        self.color_field = Some(field);
        self
    }
}

/// Categorical bars, one per label.
#[derive(Debug, Clone, PartialEq)]
pub struct BarData {
    pub spec: ChartSpec,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    /// Index of a bar to draw in the accent colour.
    pub highlight: Option<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineSeries {
    pub name: String,
    pub points: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineData {
    pub spec: ChartSpec,
    pub series: Vec<LineSeries>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapData {
    pub spec: ChartSpec,
    pub pivot: RankPivot,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistogramData {
    pub spec: ChartSpec,
    pub bins: Vec<HistogramBin>,
}

/// Points sharing one colour-field value.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterGroup {
    pub key: u32,
    pub points: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterData {
    pub spec: ChartSpec,
    pub groups: Vec<ScatterGroup>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_labels_are_distinct() {
        let labels: std::collections::HashSet<_> = Page::ALL.iter().map(|p| p.label()).collect();
        assert_eq!(labels.len(), Page::ALL.len());
        assert_eq!(Page::default(), Page::Overview);
    }

    #[test]
    fn outcome_accessors() {
        let ready: Outcome<u8> = Outcome::Ready(3);
        let empty: Outcome<u8> = Outcome::NoData("nothing".into());
        assert!(ready.is_ready());
        assert!(!empty.is_ready());
        assert_eq!(ready.ready(), Some(3));
        assert_eq!(empty.ready(), None);
    }
}
