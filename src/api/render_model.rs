use indexmap::IndexMap;
use tracing::warn;

use crate::api::ChartConfig;
use crate::core::series::{build_points, dot_radius, group_series};
use crate::core::{ChartPoint, CitySeries, LinearScale, MonthScale};
use crate::error::ChartResult;
use crate::model::{CityDirectory, Event};
use crate::render::Color;

/// Stroke/fill used when a city has no parseable display color.
pub const FALLBACK_SERIES_COLOR: Color = Color::rgb(70.0 / 255.0, 130.0 / 255.0, 180.0 / 255.0);

/// Resolved per-city styling.
#[derive(Debug, Clone, PartialEq)]
pub struct CityStyle {
    /// Fill/stroke color for paths and dots.
    pub fill: Color,
    /// Raw CSS color from the directory, passed through to tooltips.
    pub css: Option<String>,
}

/// Per-render chart model.
///
/// Derived purely from `(events, cities, config)` with no persisted state, so
/// repeated derivation from the same input is bit-identical.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderModel {
    pub points: Vec<ChartPoint>,
    pub series: Vec<CitySeries>,
    pub styles: IndexMap<String, CityStyle>,
    pub x: MonthScale,
    pub y: LinearScale,
    pub dot_radius: f64,
}

/// Builds the render model for one pass.
///
/// Fails with `UnknownCity` when an event references a city missing from the
/// directory, and with `InvalidData` when `events` is empty (callers skip the
/// pass instead).
pub fn build_render_model(
    events: &[Event],
    cities: &CityDirectory,
    config: &ChartConfig,
) -> ChartResult<RenderModel> {
    let points = build_points(events);
    let series = group_series(&points);

    let mut styles = IndexMap::with_capacity(series.len());
    for group in &series {
        let city = cities.lookup(&group.name)?;
        styles.insert(group.name.clone(), resolve_style(&group.name, city.color.as_deref()));
    }

    let x = MonthScale::from_dates(points.iter().map(|p| p.axis_date), config.inner_width())?;
    let max_attendees = points.iter().map(|p| p.attendees).max().unwrap_or(0);
    let y = LinearScale::new(
        0.0,
        max_attendees as f64 + config.y_axis_headroom,
        config.inner_height(),
        0.0,
    )?;
    let dot_radius = dot_radius(
        series.len(),
        cities.len(),
        config.dot_radius_max,
        config.dot_radius_min,
    );

    Ok(RenderModel {
        points,
        series,
        styles,
        x,
        y,
        dot_radius,
    })
}

fn resolve_style(city: &str, css: Option<&str>) -> CityStyle {
    let fill = match css.map(Color::from_css_hex) {
        Some(Ok(color)) => color,
        Some(Err(_)) => {
            warn!(city, "city color is not a hex color, using fallback");
            FALLBACK_SERIES_COLOR
        }
        None => {
            warn!(city, "city has no display color, using fallback");
            FALLBACK_SERIES_COLOR
        }
    };
    CityStyle {
        fill,
        css: css.map(str::to_owned),
    }
}
