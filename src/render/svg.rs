use std::fmt::Write as _;

use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer, TextHAlign};

/// Renderer materializing frames as standalone SVG documents.
///
/// Output element order follows the frame's draw order, so stable input
/// produces byte-identical markup.
#[derive(Debug, Default)]
pub struct SvgRenderer {
    last_svg: String,
}

impl SvgRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The document produced by the most recent render pass.
    #[must_use]
    pub fn svg(&self) -> &str {
        &self.last_svg
    }
}

impl Renderer for SvgRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.last_svg = document(frame);
        Ok(())
    }
}

/// Serializes a validated frame as an SVG document string.
#[must_use]
pub fn document(frame: &RenderFrame) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}">"#,
        frame.viewport.width, frame.viewport.height
    );

    for line in &frame.lines {
        let _ = writeln!(
            out,
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}"/>"#,
            fmt(line.x1),
            fmt(line.y1),
            fmt(line.x2),
            fmt(line.y2),
            line.color.to_css_hex(),
            fmt(line.stroke_width),
        );
    }

    for path in &frame.paths {
        let mut d = format!("M{} {}", fmt(path.start_x), fmt(path.start_y));
        for s in &path.segments {
            let _ = write!(
                d,
                " C{} {} {} {} {} {}",
                fmt(s.c1x),
                fmt(s.c1y),
                fmt(s.c2x),
                fmt(s.c2y),
                fmt(s.x),
                fmt(s.y),
            );
        }
        let _ = writeln!(
            out,
            r#"<path d="{}" fill="none" stroke="{}" stroke-width="{}"/>"#,
            d,
            path.color.to_css_hex(),
            fmt(path.stroke_width),
        );
    }

    for circle in &frame.circles {
        let _ = writeln!(
            out,
            r#"<circle cx="{}" cy="{}" r="{}" fill="{}"/>"#,
            fmt(circle.cx),
            fmt(circle.cy),
            fmt(circle.radius),
            circle.color.to_css_hex(),
        );
    }

    for text in &frame.texts {
        let anchor = match text.h_align {
            TextHAlign::Left => "start",
            TextHAlign::Center => "middle",
            TextHAlign::Right => "end",
        };
        let transform = if text.rotation_deg != 0.0 {
            format!(
                r#" transform="rotate({} {} {})""#,
                fmt(text.rotation_deg),
                fmt(text.x),
                fmt(text.y),
            )
        } else {
            String::new()
        };
        let _ = writeln!(
            out,
            r#"<text x="{}" y="{}" font-size="{}" fill="{}" text-anchor="{}"{}>{}</text>"#,
            fmt(text.x),
            fmt(text.y),
            fmt(text.font_size_px),
            text.color.to_css_hex(),
            anchor,
            transform,
            escape(&text.text),
        );
    }

    out.push_str("</svg>\n");
    out
}

fn fmt(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value:.2}")
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
