mod frame;
mod null_renderer;
mod primitives;
mod scene;
mod svg;

pub use frame::RenderFrame;
pub use null_renderer::NullRenderer;
pub use primitives::{
    CirclePrimitive, Color, LinePrimitive, PathPrimitive, TextHAlign, TextPrimitive,
};
pub use scene::{Scene, SceneDelta, SceneKey, SceneNode};
pub use svg::{SvgRenderer, document as svg_document};

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `RenderFrame` so
/// drawing code remains isolated from chart domain and interaction logic.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}
