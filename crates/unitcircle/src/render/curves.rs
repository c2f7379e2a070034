use super::canvas::{CharCanvas, Projection};
use super::theme::LineStyle;
use super::{RenderError, Renderer};
use crate::engine::GeometrySnapshot;
use std::io::Write;
use trigo::curves::{TrigFunction, Viewport, curve_domain};
use trigo::{GeometryError, Point};

/// Plot of one trig function over the control range with the current angle
/// marked on it. The curve is sampled once.
pub struct CurvePanel<W> {
    out: W,
    function: TrigFunction,
    samples: Vec<Point>,
    canvas: CharCanvas,
    projection: Projection,
    style: LineStyle,
    marker: char,
    color: bool,
}

impl<W: Write> CurvePanel<W> {
    pub fn new(
        out: W,
        function: TrigFunction,
        resolution: f64,
        width: usize,
        height: usize,
        style: LineStyle,
        marker: char,
    ) -> Result<Self, GeometryError> {
        let (start, end) = curve_domain();
        Ok(Self {
            out,
            function,
            samples: function.sample(start, end, resolution)?,
            canvas: CharCanvas::new(width, height),
            projection: Projection::new(Viewport::for_curves(), width, height),
            style,
            marker,
            color: true,
        })
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn frame(&mut self, snapshot: &GeometrySnapshot) -> String {
        self.draw(snapshot);
        format!("{}\n{}", self.header(snapshot), self.canvas.to_plain())
    }

    fn header(&self, snapshot: &GeometrySnapshot) -> String {
        let angle = snapshot.inputs.angle;
        format!("{}({:+.2}) = {:+.4}", self.function, angle, self.function.eval(angle))
    }

    fn draw(&mut self, snapshot: &GeometrySnapshot) {
        let angle = snapshot.inputs.angle;
        let tint = Some(self.style.rgb8());

        self.canvas.clear();
        let v = self.projection.viewport;
        let axis = [Point::new(v.x_min, 0.0), Point::new(v.x_max, 0.0)];
        self.canvas.draw_polyline(&self.projection, &axis, '·', None);
        self.canvas.draw_polyline(&self.projection, &self.samples, self.style.glyph, tint);

        let current = Point::new(angle, self.function.eval(angle));
        self.canvas.mark(&self.projection, current, self.marker, tint);
    }
}

impl<W: Write> Renderer for CurvePanel<W> {
    fn render(&mut self, snapshot: &GeometrySnapshot) -> Result<(), RenderError> {
        self.draw(snapshot);
        writeln!(self.out, "{}", self.header(snapshot))?;
        self.canvas.write_to(&mut self.out, self.color)?;
        self.out.flush()?;
        Ok(())
    }
}
