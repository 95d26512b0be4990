use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Linear scale mapping a value domain onto a pixel range.
///
/// The range may be inverted (start above end) for bottom-up vertical axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(
        domain_start: f64,
        domain_end: f64,
        range_start: f64,
        range_end: f64,
    ) -> ChartResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }
        if !range_start.is_finite() || !range_end.is_finite() || range_start == range_end {
            return Err(ChartError::InvalidData(
                "scale range must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            range_start,
            range_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    pub fn value_to_pixel(self, value: f64) -> ChartResult<f64> {
        if !value.is_finite() {
            return Err(ChartError::InvalidData("value must be finite".to_owned()));
        }

        let normalized = (value - self.domain_start) / (self.domain_end - self.domain_start);
        Ok(self.range_start + normalized * (self.range_end - self.range_start))
    }

    pub fn pixel_to_value(self, pixel: f64) -> ChartResult<f64> {
        if !pixel.is_finite() {
            return Err(ChartError::InvalidData("pixel must be finite".to_owned()));
        }

        let normalized = (pixel - self.range_start) / (self.range_end - self.range_start);
        Ok(self.domain_start + normalized * (self.domain_end - self.domain_start))
    }

    /// Round tick values covering the domain, at most roughly `count` of them.
    ///
    /// Steps are chosen from the 1/2/5 decades, matching conventional axis
    /// labeling.
    #[must_use]
    pub fn ticks(self, count: usize) -> Vec<f64> {
        if count == 0 {
            return Vec::new();
        }

        let lo = self.domain_start.min(self.domain_end);
        let hi = self.domain_start.max(self.domain_end);
        let step = tick_step(hi - lo, count);
        let first = (lo / step).ceil() as i64;
        let last = (hi / step).floor() as i64;
        (first..=last).map(|i| i as f64 * step).collect()
    }
}

fn tick_step(span: f64, count: usize) -> f64 {
    let step = span / count as f64;
    let magnitude = 10f64.powf(step.log10().floor());
    let error = step / magnitude;
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    magnitude * factor
}

#[cfg(test)]
mod tests {
    use super::LinearScale;

    #[test]
    fn inverted_range_maps_zero_to_bottom() {
        let scale = LinearScale::new(0.0, 100.0, 550.0, 0.0).expect("valid scale");
        assert!((scale.value_to_pixel(0.0).unwrap() - 550.0).abs() <= 1e-9);
        assert!((scale.value_to_pixel(100.0).unwrap() - 0.0).abs() <= 1e-9);
        assert!((scale.value_to_pixel(50.0).unwrap() - 275.0).abs() <= 1e-9);
    }

    #[test]
    fn pixel_round_trip_matches_value() {
        let scale = LinearScale::new(0.0, 42.0, 550.0, 0.0).expect("valid scale");
        let px = scale.value_to_pixel(13.5).unwrap();
        assert!((scale.pixel_to_value(px).unwrap() - 13.5).abs() <= 1e-9);
    }

    #[test]
    fn ticks_use_round_steps_and_cover_domain() {
        let scale = LinearScale::new(0.0, 52.0, 550.0, 0.0).expect("valid scale");
        let ticks = scale.ticks(10);
        assert_eq!(ticks.first().copied(), Some(0.0));
        assert_eq!(ticks.last().copied(), Some(50.0));
        assert!(ticks.windows(2).all(|w| (w[1] - w[0] - 5.0).abs() <= 1e-9));
    }

    #[test]
    fn degenerate_domain_is_rejected() {
        assert!(LinearScale::new(3.0, 3.0, 0.0, 10.0).is_err());
        assert!(LinearScale::new(0.0, 1.0, 5.0, 5.0).is_err());
    }
}
