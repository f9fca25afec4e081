//! Per-session state for the live plot.

use crate::client::{ClientError, SeriesSource};

/// State for one query's live plot.
///
/// Created when the user submits a query, dropped when the view closes;
/// nothing here outlives the session.
pub struct App {
    /// The query being plotted; doubles as the chart title.
    pub query: String,
    /// Latest sample series, oldest first. Replaced wholesale on refresh.
    pub samples: Vec<f64>,
    /// Whether the view should close.
    pub should_quit: bool,
}

impl App {
    pub fn new(query: &str) -> Self {
        Self {
            query: query.to_string(),
            samples: Vec::new(),
            should_quit: false,
        }
    }

    /// Re-fetch the series for the current query.
    ///
    /// On error the previous samples are kept untouched; the caller decides
    /// whether the session survives.
    pub fn refresh(&mut self, source: &dyn SeriesSource) -> Result<(), ClientError> {
        self.samples = source.fetch(&self.query)?;
        Ok(())
    }

    /// Samples as chart points, sample index on the x axis.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.samples
            .iter()
            .enumerate()
            .map(|(i, v)| (i as f64, *v))
            .collect()
    }

    /// X axis bounds covering every sample index.
    pub fn x_bounds(&self) -> [f64; 2] {
        [0.0, self.samples.len().saturating_sub(1).max(1) as f64]
    }

    /// Y axis bounds with a little headroom, so a flat series is not drawn
    /// directly on the axis line.
    pub fn y_bounds(&self) -> [f64; 2] {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for v in &self.samples {
            if v.is_finite() {
                min = min.min(*v);
                max = max.max(*v);
            }
        }
        if min > max {
            // Empty (or all-NaN) series still needs usable bounds.
            return [0.0, 1.0];
        }
        let pad = ((max - min) * 0.1).max(0.5);
        [min - pad, max + pad]
    }
}
