use super::theme::{LineStyle, Theme};
use super::{RenderError, Renderer};
use crate::engine::GeometrySnapshot;
use cairo::{Context, Format, ImageSurface};
use std::path::PathBuf;
use trigo::curves::CIRCLE_MARGIN;
use trigo::{LineSegment, Point, Radius, SegmentKind};

/// Rewrites one PNG file per snapshot. The plot spans `±1.5·radius` like the
/// text view, at four pixels per radius unit.
pub struct PngRenderer {
    path: PathBuf,
    size: i32,
    radius: Radius,
    circle: Vec<Point>,
    theme: Theme,
}

impl PngRenderer {
    pub fn new(
        path: impl Into<PathBuf>,
        radius: Radius,
        circle: Vec<Point>,
        theme: Theme,
    ) -> Self {
        Self {
            path: path.into(),
            size: (radius.get() * 4.0).round().max(64.0) as i32,
            radius,
            circle,
            theme,
        }
    }

    fn draw(&self, cr: &Context, snapshot: &GeometrySnapshot) -> Result<(), cairo::Error> {
        cr.set_source_rgb(1.0, 1.0, 1.0);
        cr.paint()?;

        let half = f64::from(self.size) / 2.0;
        let scale = half / (self.radius.get() * CIRCLE_MARGIN);
        cr.translate(half, half);
        cr.scale(scale, -scale);

        stroke_path(cr, &self.circle, &self.theme.circle, scale)?;
        for kind in [SegmentKind::Adjacent, SegmentKind::Opposite, SegmentKind::Radial] {
            let LineSegment { start, end } = *snapshot.geometry.segment(kind);
            stroke_path(cr, &[start, end], self.theme.segment(kind), scale)?;
        }
        Ok(())
    }
}

fn stroke_path(
    cr: &Context,
    points: &[Point],
    style: &LineStyle,
    scale: f64,
) -> Result<(), cairo::Error> {
    let Some((first, rest)) = points.split_first() else {
        return Ok(());
    };
    let (r, g, b, a) = style.color.into_components();
    cr.set_source_rgba(r, g, b, a);
    cr.set_line_width(style.width / scale);
    cr.move_to(first.x, first.y);
    for p in rest {
        cr.line_to(p.x, p.y);
    }
    cr.stroke()
}

impl Renderer for PngRenderer {
    fn render(&mut self, snapshot: &GeometrySnapshot) -> Result<(), RenderError> {
        let surface = ImageSurface::create(Format::ARgb32, self.size, self.size)?;
        {
            let cr = Context::new(&surface)?;
            self.draw(&cr, snapshot)?;
        }
        let mut file = fs_err::File::create(&self.path)?;
        surface.write_to_png(&mut file)?;
        log::debug!("wrote {}", self.path.display());
        Ok(())
    }
}
