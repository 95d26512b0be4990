use serde::{Deserialize, Serialize};

use crate::core::{Margins, Viewport};
use crate::error::{ChartError, ChartResult};

/// Public chart bootstrap configuration.
///
/// This type is serializable so host applications can persist/load chart
/// setup without inventing their own ad-hoc format. `current_year` is the
/// reference year for axis and tooltip date formatting; keeping it explicit
/// keeps rendering free of wall-clock reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub viewport: Viewport,
    #[serde(default)]
    pub margins: Margins,
    pub current_year: i32,
    #[serde(default = "default_y_axis_headroom")]
    pub y_axis_headroom: f64,
    #[serde(default = "default_dot_radius_max")]
    pub dot_radius_max: f64,
    #[serde(default = "default_dot_radius_min")]
    pub dot_radius_min: f64,
    #[serde(default = "default_tooltip_hide_delay_ms")]
    pub tooltip_hide_delay_ms: u64,
    #[serde(default = "default_hit_slack_px")]
    pub hit_slack_px: f64,
    #[serde(default = "default_line_stroke_width")]
    pub line_stroke_width: f64,
    #[serde(default = "default_axis_font_size_px")]
    pub axis_font_size_px: f64,
    #[serde(default = "default_y_tick_count")]
    pub y_tick_count: usize,
    #[serde(default = "default_spline_tension")]
    pub spline_tension: f64,
}

impl ChartConfig {
    /// Creates a config with the stock dashboard geometry (700x600 outer,
    /// 630x550 plot area).
    #[must_use]
    pub fn new(current_year: i32) -> Self {
        Self {
            viewport: Viewport::new(700, 600),
            margins: Margins::default(),
            current_year,
            y_axis_headroom: default_y_axis_headroom(),
            dot_radius_max: default_dot_radius_max(),
            dot_radius_min: default_dot_radius_min(),
            tooltip_hide_delay_ms: default_tooltip_hide_delay_ms(),
            hit_slack_px: default_hit_slack_px(),
            line_stroke_width: default_line_stroke_width(),
            axis_font_size_px: default_axis_font_size_px(),
            y_tick_count: default_y_tick_count(),
            spline_tension: default_spline_tension(),
        }
    }

    #[must_use]
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    #[must_use]
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    /// Sets the dot radius bounds used by the inverse city-count scale.
    #[must_use]
    pub fn with_dot_radius_bounds(mut self, max_radius: f64, min_radius: f64) -> Self {
        self.dot_radius_max = max_radius;
        self.dot_radius_min = min_radius;
        self
    }

    #[must_use]
    pub fn with_tooltip_hide_delay_ms(mut self, delay_ms: u64) -> Self {
        self.tooltip_hide_delay_ms = delay_ms;
        self
    }

    #[must_use]
    pub fn with_y_axis_headroom(mut self, headroom: f64) -> Self {
        self.y_axis_headroom = headroom;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        if !self.margins.is_valid() {
            return Err(ChartError::InvalidData(
                "margins must be finite and >= 0".to_owned(),
            ));
        }
        if self.inner_width() <= 0.0 || self.inner_height() <= 0.0 {
            return Err(ChartError::InvalidData(
                "margins leave no plot area inside the viewport".to_owned(),
            ));
        }
        if !self.y_axis_headroom.is_finite() || self.y_axis_headroom < 0.0 {
            return Err(ChartError::InvalidData(
                "y axis headroom must be finite and >= 0".to_owned(),
            ));
        }
        if !self.dot_radius_max.is_finite()
            || !self.dot_radius_min.is_finite()
            || self.dot_radius_min <= 0.0
            || self.dot_radius_max < self.dot_radius_min
        {
            return Err(ChartError::InvalidData(
                "dot radius bounds must be finite, > 0, and ordered".to_owned(),
            ));
        }
        if !self.hit_slack_px.is_finite() || self.hit_slack_px < 0.0 {
            return Err(ChartError::InvalidData(
                "hit-test slack must be finite and >= 0".to_owned(),
            ));
        }
        if !self.line_stroke_width.is_finite() || self.line_stroke_width <= 0.0 {
            return Err(ChartError::InvalidData(
                "line stroke width must be finite and > 0".to_owned(),
            ));
        }
        if !self.axis_font_size_px.is_finite() || self.axis_font_size_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "axis font size must be finite and > 0".to_owned(),
            ));
        }
        if self.y_tick_count == 0 {
            return Err(ChartError::InvalidData(
                "y tick count must be > 0".to_owned(),
            ));
        }
        if !self.spline_tension.is_finite() || !(0.0..=1.0).contains(&self.spline_tension) {
            return Err(ChartError::InvalidData(
                "spline tension must be in [0, 1]".to_owned(),
            ));
        }
        Ok(())
    }

    /// Plot-area width inside the margins.
    #[must_use]
    pub fn inner_width(&self) -> f64 {
        f64::from(self.viewport.width) - self.margins.left - self.margins.right
    }

    /// Plot-area height inside the margins.
    #[must_use]
    pub fn inner_height(&self) -> f64 {
        f64::from(self.viewport.height) - self.margins.top - self.margins.bottom
    }

    /// Serializes config to pretty JSON for debug/config files.
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse config: {e}")))
    }
}

fn default_y_axis_headroom() -> f64 {
    10.0
}

fn default_dot_radius_max() -> f64 {
    5.0
}

fn default_dot_radius_min() -> f64 {
    3.5
}

fn default_tooltip_hide_delay_ms() -> u64 {
    500
}

fn default_hit_slack_px() -> f64 {
    4.0
}

fn default_line_stroke_width() -> f64 {
    1.5
}

fn default_axis_font_size_px() -> f64 {
    10.0
}

fn default_y_tick_count() -> usize {
    10
}

fn default_spline_tension() -> f64 {
    0.0
}

#[cfg(test)]
mod tests {
    use super::ChartConfig;
    use crate::core::{Margins, Viewport};

    #[test]
    fn stock_geometry_matches_dashboard_defaults() {
        let config = ChartConfig::new(2026);
        assert!(config.validate().is_ok());
        assert!((config.inner_width() - 630.0).abs() <= 1e-9);
        assert!((config.inner_height() - 550.0).abs() <= 1e-9);
    }

    #[test]
    fn oversized_margins_are_rejected() {
        let config = ChartConfig::new(2026)
            .with_viewport(Viewport::new(100, 100))
            .with_margins(Margins {
                top: 60.0,
                right: 10.0,
                bottom: 60.0,
                left: 10.0,
            });
        assert!(config.validate().is_err());
    }

    #[test]
    fn json_round_trip_preserves_config() {
        let config = ChartConfig::new(2026).with_tooltip_hide_delay_ms(250);
        let json = config.to_json_pretty().expect("serialize");
        let restored = ChartConfig::from_json_str(&json).expect("parse");
        assert_eq!(restored, config);
    }
}
