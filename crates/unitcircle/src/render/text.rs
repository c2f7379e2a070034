use super::canvas::{CharCanvas, Projection};
use super::theme::Theme;
use super::{RenderError, Renderer};
use crate::engine::GeometrySnapshot;
use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};
use std::io::Write;
use trigo::curves::Viewport;
use trigo::{Point, Radius, SegmentKind};

/// Back to front, so the radius vector stays visible where legs overlap it.
const DRAW_ORDER: [SegmentKind; 3] = [
    SegmentKind::Adjacent,
    SegmentKind::Opposite,
    SegmentKind::Radial,
];

/// Draws the reference circle and the triangle as text frames into `out`.
pub struct TextRenderer<W> {
    out: W,
    canvas: CharCanvas,
    projection: Projection,
    circle: Vec<Point>,
    theme: Theme,
    color: bool,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(
        out: W,
        width: usize,
        height: usize,
        radius: Radius,
        circle: Vec<Point>,
        theme: Theme,
    ) -> Self {
        Self {
            out,
            canvas: CharCanvas::new(width, height),
            projection: Projection::new(Viewport::around_circle(radius), width, height),
            circle,
            theme,
            color: true,
        }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Caption and plain grid of one snapshot.
    pub fn frame(&mut self, snapshot: &GeometrySnapshot) -> String {
        self.draw(snapshot);
        format!("{}\n{}", caption(snapshot), self.canvas.to_plain())
    }

    fn draw(&mut self, snapshot: &GeometrySnapshot) {
        self.canvas.clear();
        self.draw_axes();

        let circle = self.theme.circle;
        self.canvas.draw_polyline(
            &self.projection,
            &self.circle,
            circle.glyph,
            Some(circle.rgb8()),
        );

        for kind in DRAW_ORDER {
            let style = self.theme.segment(kind);
            self.canvas.draw_segment(
                &self.projection,
                snapshot.geometry.segment(kind),
                style.glyph,
                Some(style.rgb8()),
            );
        }
        self.canvas.mark(&self.projection, Point::ORIGIN, '+', None);
    }

    fn draw_axes(&mut self) {
        let v = self.projection.viewport;
        let x_axis = [Point::new(v.x_min, 0.0), Point::new(v.x_max, 0.0)];
        let y_axis = [Point::new(0.0, v.y_min), Point::new(0.0, v.y_max)];
        self.canvas.draw_polyline(&self.projection, &x_axis, '·', None);
        self.canvas.draw_polyline(&self.projection, &y_axis, '·', None);
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn render(&mut self, snapshot: &GeometrySnapshot) -> Result<(), RenderError> {
        self.draw(snapshot);
        if self.color {
            // frames replace each other in place
            queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        writeln!(self.out, "{}", caption(snapshot))?;
        self.canvas.write_to(&mut self.out, self.color)?;
        self.out.flush()?;
        Ok(())
    }
}

pub fn caption(snapshot: &GeometrySnapshot) -> String {
    let angle = snapshot.inputs.angle;
    let geometry = &snapshot.geometry;
    format!(
        "angle {:+.2} rad  sin {:+.4}  cos {:+.4}  adjacent {:.2}  opposite {:.2}",
        angle,
        angle.sin(),
        angle.cos(),
        geometry.adjacent.length(),
        geometry.opposite.length(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::TrigDataStore;
    use trigo::curves::reference_circle;

    fn renderer<W: Write>(out: W, radius: Radius) -> TextRenderer<W> {
        let circle = reference_circle(radius, 64);
        TextRenderer::new(out, 31, 15, radius, circle, Theme::default()).with_color(false)
    }

    #[test]
    fn test_frame_shows_all_segments() {
        let radius = Radius::new(100.0).unwrap();
        let store = TrigDataStore::new(1.0, radius, 64);
        let frame = renderer(Vec::new(), radius).frame(&store.snapshot());

        assert!(frame.starts_with("angle +1.00 rad"));
        for glyph in ['*', '|', '-', '.', '+'] {
            assert!(frame.contains(glyph), "missing {glyph:?} in\n{frame}");
        }
    }

    #[test]
    fn test_degenerate_opposite_leg() {
        let radius = Radius::new(100.0).unwrap();
        let store = TrigDataStore::new(0.0, radius, 64);
        let frame = renderer(Vec::new(), radius).frame(&store.snapshot());
        // the zero-length leg collapses onto the radius vector's tip
        assert!(frame.contains("opposite 0.00"));
        assert!(frame.contains("adjacent 100.00"));
    }

    #[test]
    fn test_plain_render_has_no_escapes() {
        let radius = Radius::new(2.0).unwrap();
        let store = TrigDataStore::new(-1.0, radius, 16);
        let mut written = Vec::new();
        renderer(&mut written, radius)
            .render(&store.snapshot())
            .unwrap();
        let written = String::from_utf8(written).unwrap();
        assert!(written.starts_with("angle -1.00 rad"));
        assert!(!written.contains('\x1b'));
    }

    #[test]
    fn test_colored_render_clears_and_tints() {
        let radius = Radius::new(100.0).unwrap();
        let store = TrigDataStore::new(1.0, radius, 64);
        let mut written = Vec::new();
        renderer(&mut written, radius)
            .with_color(true)
            .render(&store.snapshot())
            .unwrap();
        let written = String::from_utf8(written).unwrap();

        assert!(written.starts_with('\x1b'));
        // radial segment in the default green
        assert!(written.contains("38;2;0;128;0m*"));
    }
}
