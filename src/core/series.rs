use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::month_scale::month_floor;
use crate::core::types::ChartPoint;
use crate::model::Event;

/// One city's chronologically ordered attendance points, drawn as one
/// smoothed polyline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitySeries {
    pub name: String,
    pub values: Vec<ChartPoint>,
}

/// Builds one render point per event: attendance count plus the month-aligned
/// axis date.
#[must_use]
pub fn build_points(events: &[Event]) -> Vec<ChartPoint> {
    events
        .iter()
        .map(|event| ChartPoint {
            date: event.date,
            axis_date: month_floor(event.date),
            attendees: event.attendees(),
            city: event.city.clone(),
        })
        .collect()
}

/// Groups points by city, each group sorted chronologically.
///
/// Series order follows the first appearance of each city in the date-sorted
/// point list, so output is stable for stable input.
#[must_use]
pub fn group_series(points: &[ChartPoint]) -> Vec<CitySeries> {
    let mut sorted: Vec<&ChartPoint> = points.iter().collect();
    sorted.sort_by_key(|p| p.date);

    let mut groups: IndexMap<String, Vec<ChartPoint>> = IndexMap::new();
    for point in sorted {
        groups
            .entry(point.city.clone())
            .or_default()
            .push(point.clone());
    }

    groups
        .into_iter()
        .map(|(name, values)| CitySeries { name, values })
        .collect()
}

/// Dot radius for attendance points, shrinking linearly as more city series
/// are drawn: `max_radius` with one city down to `min_radius` at the full
/// directory size.
#[must_use]
pub fn dot_radius(
    series_count: usize,
    directory_count: usize,
    max_radius: f64,
    min_radius: f64,
) -> f64 {
    if directory_count <= 1 {
        return max_radius;
    }
    let t = (series_count.saturating_sub(1)) as f64 / (directory_count - 1) as f64;
    max_radius + t * (min_radius - max_radius)
}
