use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use palette::Srgb;
use std::io::{self, Write};
use trigo::curves::Viewport;
use trigo::{LineSegment, Point};

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    glyph: char,
    color: Option<Srgb<u8>>,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            glyph: ' ',
            color: None,
        }
    }
}

/// Maps world coordinates onto a grid of `cols x rows` cells, y pointing up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub viewport: Viewport,
    pub cols: usize,
    pub rows: usize,
}

impl Projection {
    pub fn new(viewport: Viewport, cols: usize, rows: usize) -> Self {
        Self {
            viewport,
            cols,
            rows,
        }
    }

    /// Fractional cell position; may fall outside the grid.
    pub fn to_cell(&self, p: Point) -> (f64, f64) {
        let v = &self.viewport;
        let col = (p.x - v.x_min) / v.width() * (self.cols - 1) as f64;
        let row = (v.y_max - p.y) / v.height() * (self.rows - 1) as f64;
        (col, row)
    }
}

/// Character grid the text renderers draw into.
#[derive(Debug, Clone)]
pub struct CharCanvas {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl CharCanvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width * height],
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    pub fn plot(&mut self, col: isize, row: isize, glyph: char, color: Option<Srgb<u8>>) {
        let inside = col >= 0 && (col as usize) < self.width;
        if inside && row >= 0 && (row as usize) < self.height {
            self.cells[row as usize * self.width + col as usize] = Cell { glyph, color };
        }
    }

    /// Rasterizes a line between two cell positions using Bresenham's
    /// algorithm. Cells outside the grid are skipped.
    pub fn draw_line(
        &mut self,
        from: (f64, f64),
        to: (f64, f64),
        glyph: char,
        color: Option<Srgb<u8>>,
    ) {
        let (mut x0, mut y0, x1, y1) = (
            from.0.round() as isize,
            from.1.round() as isize,
            to.0.round() as isize,
            to.1.round() as isize,
        );
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.plot(x0, y0, glyph, color);

            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    pub fn draw_segment(
        &mut self,
        projection: &Projection,
        segment: &LineSegment,
        glyph: char,
        color: Option<Srgb<u8>>,
    ) {
        self.draw_line(
            projection.to_cell(segment.start),
            projection.to_cell(segment.end),
            glyph,
            color,
        );
    }

    /// Connects consecutive points. Pairs where either end leaves the viewport
    /// are not joined, which keeps asymptotes from being bridged.
    pub fn draw_polyline(
        &mut self,
        projection: &Projection,
        points: &[Point],
        glyph: char,
        color: Option<Srgb<u8>>,
    ) {
        let view = &projection.viewport;
        for pair in points.windows(2) {
            if view.contains(pair[0]) && view.contains(pair[1]) {
                let segment = LineSegment::new(pair[0], pair[1]);
                self.draw_segment(projection, &segment, glyph, color);
            }
        }
    }

    pub fn mark(
        &mut self,
        projection: &Projection,
        p: Point,
        glyph: char,
        color: Option<Srgb<u8>>,
    ) {
        if projection.viewport.contains(p) {
            let (col, row) = projection.to_cell(p);
            self.plot(col.round() as isize, row.round() as isize, glyph, color);
        }
    }

    /// Rows joined by newlines, trailing blanks trimmed.
    pub fn to_plain(&self) -> String {
        self.cells
            .chunks(self.width)
            .map(|row| {
                let line: String = row.iter().map(|c| c.glyph).collect();
                line.trim_end().to_string()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Writes the grid to `out`, with the cell colors when `color` is set.
    pub fn write_to<W: Write>(&self, out: &mut W, color: bool) -> io::Result<()> {
        if color {
            self.write_colored(out)
        } else {
            writeln!(out, "{}", self.to_plain())
        }
    }

    fn write_colored<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for row in self.cells.chunks(self.width) {
            for cell in row {
                match cell.color {
                    Some(c) => queue!(
                        out,
                        SetForegroundColor(Color::Rgb {
                            r: c.red,
                            g: c.green,
                            b: c.blue,
                        }),
                        Print(cell.glyph),
                        ResetColor
                    )?,
                    None => queue!(out, Print(cell.glyph))?,
                }
            }
            queue!(out, Print('\n'))?;
        }
        Ok(())
    }
}
