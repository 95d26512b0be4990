use serde::{Deserialize, Serialize};

/// One cubic Bézier segment of a smoothed series path, in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubicSegment {
    pub c1x: f64,
    pub c1y: f64,
    pub c2x: f64,
    pub c2y: f64,
    pub x: f64,
    pub y: f64,
}

/// Converts a polyline into cardinal-interpolated cubic Bézier segments.
///
/// Control points are derived from neighbor tangents with endpoint
/// duplication, so the curve passes through every input point. `tension` 0.0
/// reproduces the classic cardinal default; 1.0 degenerates to straight
/// segments. Fewer than two points yield no segments.
#[must_use]
pub fn cardinal_segments(points: &[(f64, f64)], tension: f64) -> Vec<CubicSegment> {
    if points.len() < 2 {
        return Vec::new();
    }

    let k = (1.0 - tension) / 6.0;
    let last = points.len() - 1;
    let mut segments = Vec::with_capacity(last);

    for i in 0..last {
        let p0 = points[i.saturating_sub(1)];
        let p1 = points[i];
        let p2 = points[i + 1];
        let p3 = points[(i + 2).min(last)];

        segments.push(CubicSegment {
            c1x: p1.0 + k * (p2.0 - p0.0),
            c1y: p1.1 + k * (p2.1 - p0.1),
            c2x: p2.0 - k * (p3.0 - p1.0),
            c2y: p2.1 - k * (p3.1 - p1.1),
            x: p2.0,
            y: p2.1,
        });
    }

    segments
}
