use chrono::NaiveDate;
use ordered_float::OrderedFloat;
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::api::ChartConfig;
use crate::api::render_model::{RenderModel, build_render_model};
use crate::core::month_scale::tick_label;
use crate::core::spline::cardinal_segments;
use crate::error::ChartResult;
use crate::interaction::{TooltipContent, TooltipController};
use crate::model::{CityDirectory, Event};
use crate::render::{
    CirclePrimitive, Color, LinePrimitive, PathPrimitive, Renderer, Scene, SceneDelta, SceneKey,
    SceneNode, TextHAlign, TextPrimitive,
};

const AXIS_COLOR: Color = Color::rgb(0.0, 0.0, 0.0);
const AXIS_STROKE_WIDTH: f64 = 1.0;
const TICK_LEN: f64 = 6.0;
const TICK_LABEL_GAP: f64 = 3.0;

/// Outcome of one render pass.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderOutcome {
    /// No data supplied; nothing was drawn or diffed.
    Skipped,
    /// A pass ran; the delta lists scene nodes that entered, moved, or
    /// exited relative to the previous pass.
    Rendered(SceneDelta),
}

/// Hit-test result for one attendance dot.
#[derive(Debug, Clone, PartialEq)]
pub struct DotHit {
    pub city: String,
    pub date: NaiveDate,
    pub attendees: usize,
    pub city_color: Option<String>,
    pub distance_px: f64,
}

/// Line chart of per-city event attendance.
///
/// The chart owns its data snapshot, the retained scene from the previous
/// pass, and the tooltip state. Every `render` call rebuilds a pure model
/// from the snapshot, diffs the resulting scene against the retained one,
/// and hands the materialized frame to the backend.
#[derive(Debug)]
pub struct LinesChart<R: Renderer> {
    renderer: R,
    config: ChartConfig,
    events: Vec<Event>,
    cities: CityDirectory,
    scene: Scene,
    tooltip: TooltipController,
}

impl<R: Renderer> LinesChart<R> {
    pub fn new(renderer: R, config: ChartConfig) -> ChartResult<Self> {
        config.validate()?;
        let tooltip = TooltipController::new(config.tooltip_hide_delay_ms);
        Ok(Self {
            renderer,
            config,
            events: Vec::new(),
            cities: CityDirectory::new(),
            scene: Scene::new(),
            tooltip,
        })
    }

    /// Replaces the data snapshot consumed by subsequent render passes.
    pub fn set_data(&mut self, events: Vec<Event>, cities: CityDirectory) {
        debug!(
            events = events.len(),
            cities = cities.len(),
            "chart data replaced"
        );
        self.events = events;
        self.cities = cities;
    }

    pub fn clear_data(&mut self) {
        self.events.clear();
        self.cities = CityDirectory::new();
    }

    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// The retained scene produced by the previous render pass.
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Runs one render pass.
    ///
    /// Without data the pass is skipped entirely. Otherwise the scene is
    /// rebuilt, diffed against the previous pass, and drawn by the backend.
    pub fn render(&mut self) -> ChartResult<RenderOutcome> {
        if self.events.is_empty() {
            trace!("render skipped: no event data supplied");
            return Ok(RenderOutcome::Skipped);
        }

        let model = build_render_model(&self.events, &self.cities, &self.config)?;
        let next = build_scene(&model, &self.config)?;
        let delta = self.scene.apply(next);
        debug!(
            entered = delta.entered.len(),
            updated = delta.updated.len(),
            exited = delta.exited.len(),
            "chart render pass"
        );

        let frame = self.scene.to_frame(self.config.viewport);
        self.renderer.render(&frame)?;
        Ok(RenderOutcome::Rendered(delta))
    }

    /// Resolves a pointer position to the nearest dot within grab range.
    #[must_use]
    pub fn hit_test(&self, x: f64, y: f64) -> Option<DotHit> {
        let mut candidates: SmallVec<[(OrderedFloat<f64>, DotHit); 4]> = SmallVec::new();
        for (_, circle, point, city_color) in self.scene.dots() {
            let distance = ((circle.cx - x).powi(2) + (circle.cy - y).powi(2)).sqrt();
            if distance > circle.radius + self.config.hit_slack_px {
                continue;
            }
            candidates.push((
                OrderedFloat(distance),
                DotHit {
                    city: point.city.clone(),
                    date: point.date,
                    attendees: point.attendees,
                    city_color: city_color.map(str::to_owned),
                    distance_px: distance,
                },
            ));
        }

        candidates
            .into_iter()
            .min_by_key(|(distance, _)| *distance)
            .map(|(_, hit)| hit)
    }

    /// Pointer moved over the plot. A dot under the pointer shows its tooltip
    /// immediately and cancels any pending hide.
    pub fn pointer_over(&mut self, x: f64, y: f64, now_ms: u64) -> Option<TooltipContent> {
        let hit = self.hit_test(x, y)?;
        let content = TooltipContent {
            attendees: hit.attendees,
            date: hit.date,
            city: hit.city,
            color: hit.city_color,
        };
        self.tooltip.on_dot_over(content.clone(), now_ms);
        Some(content)
    }

    /// Pointer left a dot: the tooltip hides after the configured delay
    /// unless another hover happens first.
    pub fn pointer_out(&mut self, now_ms: u64) {
        self.tooltip.on_dot_out(now_ms);
    }

    /// Advances the interaction clock. Returns `true` when the tooltip hid on
    /// this step.
    pub fn advance_clock(&mut self, now_ms: u64) -> bool {
        self.tooltip.advance(now_ms)
    }

    #[must_use]
    pub fn tooltip(&self) -> Option<&TooltipContent> {
        self.tooltip.content()
    }
}

/// Builds the keyed scene for one pass, in draw order: axes, series paths,
/// then dots on top.
fn build_scene(model: &RenderModel, config: &ChartConfig) -> ChartResult<Scene> {
    let mut scene = Scene::new();
    let left = config.margins.left;
    let top = config.margins.top;
    let width = config.inner_width();
    let height = config.inner_height();
    let font = config.axis_font_size_px;

    scene.insert(
        SceneKey::XAxisLine,
        SceneNode::AxisLine(LinePrimitive::new(
            left,
            top + height,
            left + width,
            top + height,
            AXIS_STROKE_WIDTH,
            AXIS_COLOR,
        )),
    );
    scene.insert(
        SceneKey::YAxisLine,
        SceneNode::AxisLine(LinePrimitive::new(
            left,
            top,
            left,
            top + height,
            AXIS_STROKE_WIDTH,
            AXIS_COLOR,
        )),
    );

    for tick in model.x.ticks() {
        let px = left + model.x.date_to_pixel(tick)?;
        let mark = LinePrimitive::new(
            px,
            top + height,
            px,
            top + height + TICK_LEN,
            AXIS_STROKE_WIDTH,
            AXIS_COLOR,
        );
        let label = TextPrimitive::new(
            tick_label(tick, config.current_year),
            px,
            top + height + TICK_LEN + TICK_LABEL_GAP + font * 0.71,
            font,
            AXIS_COLOR,
            TextHAlign::Center,
        );
        scene.insert(SceneKey::XTick(tick), SceneNode::Tick { mark, label });
    }

    for value in model.y.ticks(config.y_tick_count) {
        let py = top + model.y.value_to_pixel(value)?;
        let mark = LinePrimitive::new(
            left - TICK_LEN,
            py,
            left,
            py,
            AXIS_STROKE_WIDTH,
            AXIS_COLOR,
        );
        let text = format_tick_value(value);
        let label = TextPrimitive::new(
            text.clone(),
            left - TICK_LEN - TICK_LABEL_GAP,
            py + font * 0.32,
            font,
            AXIS_COLOR,
            TextHAlign::Right,
        );
        scene.insert(SceneKey::YTick(text), SceneNode::Tick { mark, label });
    }

    scene.insert(
        SceneKey::YAxisTitle,
        SceneNode::Title(
            TextPrimitive::new(
                "Participants",
                left + TICK_LEN + font * 0.71,
                top,
                font,
                AXIS_COLOR,
                TextHAlign::Right,
            )
            .with_rotation(-90.0),
        ),
    );

    for group in &model.series {
        let style = &model.styles[&group.name];
        let mut pixels = Vec::with_capacity(group.values.len());
        for point in &group.values {
            let px = left + model.x.date_to_pixel(point.axis_date)?;
            let py = top + model.y.value_to_pixel(point.attendees as f64)?;
            pixels.push((px, py));
        }
        let segments = cardinal_segments(&pixels, config.spline_tension);
        let (start_x, start_y) = pixels[0];
        scene.insert(
            SceneKey::Series(group.name.clone()),
            SceneNode::SeriesPath(PathPrimitive::new(
                start_x,
                start_y,
                segments,
                config.line_stroke_width,
                style.fill,
            )),
        );
    }

    for point in &model.points {
        let style = &model.styles[&point.city];
        let px = left + model.x.date_to_pixel(point.axis_date)?;
        let py = top + model.y.value_to_pixel(point.attendees as f64)?;
        scene.insert(
            SceneKey::Dot {
                city: point.city.clone(),
                date: point.date,
            },
            SceneNode::Dot {
                circle: CirclePrimitive::new(px, py, model.dot_radius, style.fill),
                point: point.clone(),
                city_color: style.css.clone(),
            },
        );
    }

    Ok(scene)
}

fn format_tick_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
