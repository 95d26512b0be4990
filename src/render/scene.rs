use chrono::NaiveDate;
use indexmap::IndexMap;

use crate::core::{ChartPoint, Viewport};
use crate::render::frame::RenderFrame;
use crate::render::primitives::{CirclePrimitive, LinePrimitive, PathPrimitive, TextPrimitive};

/// Stable identity of one drawable node across renders.
///
/// Series are keyed by city, dots by city and event date, axis ticks by their
/// tick value, so the diff does not depend on element order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SceneKey {
    XAxisLine,
    YAxisLine,
    YAxisTitle,
    XTick(NaiveDate),
    YTick(String),
    Series(String),
    Dot { city: String, date: NaiveDate },
}

/// Drawable payload of one scene node. Equality drives update detection.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneNode {
    AxisLine(LinePrimitive),
    Tick {
        mark: LinePrimitive,
        label: TextPrimitive,
    },
    Title(TextPrimitive),
    SeriesPath(PathPrimitive),
    Dot {
        circle: CirclePrimitive,
        point: ChartPoint,
        city_color: Option<String>,
    },
}

/// Enter/update/exit outcome of one render pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneDelta {
    pub entered: Vec<SceneKey>,
    pub updated: Vec<SceneKey>,
    pub exited: Vec<SceneKey>,
}

impl SceneDelta {
    /// True when the pass reproduced the previous scene exactly.
    #[must_use]
    pub fn is_unchanged(&self) -> bool {
        self.entered.is_empty() && self.updated.is_empty() && self.exited.is_empty()
    }
}

/// Keyed retained scene, diffed and swapped on every render pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    nodes: IndexMap<SceneKey, SceneNode>,
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a node. Insertion order is draw order.
    pub fn insert(&mut self, key: SceneKey, node: SceneNode) {
        self.nodes.insert(key, node);
    }

    #[must_use]
    pub fn get(&self, key: &SceneKey) -> Option<&SceneNode> {
        self.nodes.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SceneKey, &SceneNode)> {
        self.nodes.iter()
    }

    /// Replaces this scene with `next`, returning which nodes entered, moved,
    /// or exited relative to the previous content.
    pub fn apply(&mut self, next: Scene) -> SceneDelta {
        let mut delta = SceneDelta::default();

        for (key, node) in &next.nodes {
            match self.nodes.get(key) {
                None => delta.entered.push(key.clone()),
                Some(previous) if previous != node => delta.updated.push(key.clone()),
                Some(_) => {}
            }
        }
        for key in self.nodes.keys() {
            if !next.nodes.contains_key(key) {
                delta.exited.push(key.clone());
            }
        }

        self.nodes = next.nodes;
        delta
    }

    /// Materializes the scene as a draw frame, preserving insertion order
    /// within each primitive class.
    #[must_use]
    pub fn to_frame(&self, viewport: Viewport) -> RenderFrame {
        let mut frame = RenderFrame::new(viewport);
        for node in self.nodes.values() {
            match node {
                SceneNode::AxisLine(line) => frame.lines.push(*line),
                SceneNode::Tick { mark, label } => {
                    frame.lines.push(*mark);
                    frame.texts.push(label.clone());
                }
                SceneNode::Title(text) => frame.texts.push(text.clone()),
                SceneNode::SeriesPath(path) => frame.paths.push(path.clone()),
                SceneNode::Dot { circle, .. } => frame.circles.push(*circle),
            }
        }
        frame
    }

    /// All attendance dots currently in the scene.
    pub fn dots(
        &self,
    ) -> impl Iterator<Item = (&SceneKey, &CirclePrimitive, &ChartPoint, Option<&str>)> {
        self.nodes.iter().filter_map(|(key, node)| match node {
            SceneNode::Dot {
                circle,
                point,
                city_color,
            } => Some((key, circle, point, city_color.as_deref())),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{Scene, SceneKey, SceneNode};
    use crate::render::primitives::{Color, LinePrimitive};

    fn axis_line(y: f64) -> SceneNode {
        SceneNode::AxisLine(LinePrimitive::new(
            0.0,
            y,
            100.0,
            y,
            1.0,
            Color::rgb(0.0, 0.0, 0.0),
        ))
    }

    #[test]
    fn identical_scenes_diff_to_no_changes() {
        let mut scene = Scene::new();
        let mut next = Scene::new();
        next.insert(SceneKey::XAxisLine, axis_line(550.0));
        scene.apply(next.clone());

        let delta = scene.apply(next);
        assert!(delta.is_unchanged());
    }

    #[test]
    fn changed_geometry_is_reported_as_updated() {
        let mut scene = Scene::new();
        let mut first = Scene::new();
        first.insert(SceneKey::XAxisLine, axis_line(550.0));
        scene.apply(first);

        let mut second = Scene::new();
        second.insert(SceneKey::XAxisLine, axis_line(500.0));
        let delta = scene.apply(second);

        assert_eq!(delta.entered.len(), 0);
        assert_eq!(delta.updated, vec![SceneKey::XAxisLine]);
        assert_eq!(delta.exited.len(), 0);
    }

    #[test]
    fn removed_keys_exit() {
        let mut scene = Scene::new();
        let mut first = Scene::new();
        first.insert(SceneKey::XAxisLine, axis_line(550.0));
        first.insert(SceneKey::YAxisLine, axis_line(0.0));
        scene.apply(first);

        let mut second = Scene::new();
        second.insert(SceneKey::XAxisLine, axis_line(550.0));
        let delta = scene.apply(second);

        assert_eq!(delta.exited, vec![SceneKey::YAxisLine]);
        assert_eq!(scene.len(), 1);
    }
}
