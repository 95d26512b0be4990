pub mod month_scale;
pub mod scale;
pub mod series;
pub mod spline;
pub mod types;

pub use month_scale::MonthScale;
pub use scale::LinearScale;
pub use series::CitySeries;
pub use spline::CubicSegment;
pub use types::{ChartPoint, Margins, Viewport};
