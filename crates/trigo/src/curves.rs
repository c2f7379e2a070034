use crate::GeometryError;
use crate::geometry::{Point, Radius};
use serde::Serialize;
use serde_with::DeserializeFromStr;
use std::f64::consts::{PI, TAU};
use strum::{Display as StrumDisplay, EnumIter, EnumString};

/// Default segment count for the reference circle polyline.
pub const CIRCLE_SEGMENTS: usize = 64;
/// Plot margin around the circle, relative to the radius.
pub const CIRCLE_MARGIN: f64 = 1.5;
pub const CURVE_Y_LIMIT: f64 = 1.2;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TrigFunction {
    Sin,
    Cos,
    Tan,
}

impl TrigFunction {
    pub fn eval(&self, x: f64) -> f64 {
        match self {
            Self::Sin => x.sin(),
            Self::Cos => x.cos(),
            Self::Tan => x.tan(),
        }
    }

    /// Samples on `[start, end)` every `resolution` radians.
    pub fn sample(
        &self,
        start: f64,
        end: f64,
        resolution: f64,
    ) -> Result<Vec<Point>, GeometryError> {
        if !(resolution.is_finite() && resolution > 0.0) {
            return Err(GeometryError::InvalidResolution(resolution));
        }
        // index-based to avoid accumulating step error
        let count = ((end - start) / resolution).ceil().max(0.0) as usize;
        Ok((0..count)
            .map(|i| start + i as f64 * resolution)
            .take_while(|&x| x < end)
            .map(|x| Point::new(x, self.eval(x)))
            .collect())
    }
}

/// Default x extent for curve plots: one full control range plus a margin.
pub fn curve_domain() -> (f64, f64) {
    (-TAU - 1.0, TAU + 1.0)
}

/// Closed polyline approximating the circle of `radius` centered at the
/// origin. First and last points coincide.
pub fn reference_circle(radius: Radius, segments: usize) -> Vec<Point> {
    let segments = segments.max(3);
    let step = 2.0 * PI / segments as f64;
    let mut points: Vec<Point> = (0..segments)
        .map(|i| {
            let (sin, cos) = (i as f64 * step).sin_cos();
            Point::new(radius.get() * cos, radius.get() * sin)
        })
        .collect();
    points.push(points[0]);
    points
}

/// Axis-aligned world rectangle shown by a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Viewport {
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    pub fn around_circle(radius: Radius) -> Self {
        let extent = radius.get() * CIRCLE_MARGIN;
        Self::new(-extent, extent, -extent, extent)
    }

    pub fn for_curves() -> Self {
        let (start, end) = curve_domain();
        Self::new(start, end, -CURVE_Y_LIMIT, CURVE_Y_LIMIT)
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    pub fn contains(&self, p: Point) -> bool {
        (self.x_min..=self.x_max).contains(&p.x) && (self.y_min..=self.y_max).contains(&p.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_is_half_open() {
        let points = TrigFunction::Sin.sample(0.0, 1.0, 0.25).unwrap();
        let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![0.0, 0.25, 0.5, 0.75]);
        assert_eq!(points[0].y, 0.0);
    }

    #[test]
    fn test_sample_covers_curve_domain() {
        let (start, end) = curve_domain();
        let points = TrigFunction::Cos.sample(start, end, 0.1).unwrap();
        assert_eq!(points.len(), ((end - start) / 0.1).ceil() as usize);
        assert!(points.iter().all(|p| p.x < end && p.y.abs() <= 1.0));
    }

    #[test]
    fn test_sample_rejects_bad_resolution() {
        assert!(TrigFunction::Tan.sample(0.0, 1.0, 0.0).is_err());
        assert!(TrigFunction::Tan.sample(0.0, 1.0, -0.1).is_err());
        assert!(TrigFunction::Tan.sample(1.0, 0.0, 0.1).unwrap().is_empty());
    }

    #[test]
    fn test_reference_circle_is_closed_and_on_radius() {
        let radius = Radius::new(100.0).unwrap();
        let circle = reference_circle(radius, CIRCLE_SEGMENTS);
        assert_eq!(circle.len(), CIRCLE_SEGMENTS + 1);
        assert_eq!(circle.first(), circle.last());
        for p in &circle {
            assert!((p.distance(Point::ORIGIN) - 100.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_function_names() {
        assert_eq!(TrigFunction::Tan.to_string(), "tan");
        assert_eq!("COS".parse::<TrigFunction>().unwrap(), TrigFunction::Cos);
    }

    #[test]
    fn test_viewport_around_circle() {
        let view = Viewport::around_circle(Radius::new(100.0).unwrap());
        assert_eq!(view.width(), 300.0);
        assert!(view.contains(Point::new(100.0, -100.0)));
        assert!(!view.contains(Point::new(151.0, 0.0)));
    }
}
