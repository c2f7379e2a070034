use crate::GeometryError;
use derive_more::{Deref, Display, Into};
use serde::Serialize;
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// One edge of the triangle. `start -> end` is the drawing direction.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct LineSegment {
    pub start: Point,
    pub end: Point,
}

impl LineSegment {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    DeserializeFromStr,
    EnumString,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    #[strum(to_string = "radial", serialize = "radial_line", serialize = "hypotenuse")]
    Radial,
    #[strum(to_string = "opposite", serialize = "opposite_line", serialize = "sin")]
    Opposite,
    #[strum(to_string = "adjacent", serialize = "adjacent_line", serialize = "cos")]
    Adjacent,
}

/// Session radius. Constructing one is the only place a radius is validated.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, Deref, Into)]
pub struct Radius(f64);

impl Radius {
    pub fn new(value: f64) -> Result<Self, GeometryError> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(GeometryError::NonPositiveRadius(value))
        }
    }

    pub fn get(&self) -> f64 {
        self.0
    }
}

impl Default for Radius {
    fn default() -> Self {
        Self(100.0)
    }
}

/// The right triangle spanned by the radius vector at `angle` and its two
/// axis-aligned legs. One vertex is always the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TriangleGeometry {
    pub radial: LineSegment,
    pub opposite: LineSegment,
    pub adjacent: LineSegment,
}

impl TriangleGeometry {
    /// Computes the triangle for `angle` (radians, any value) on a circle of
    /// `radius`.
    ///
    /// # Panics
    ///
    /// Panics if `radius` is not a positive finite number. Validate user input
    /// with [`Radius::new`] and call [`TriangleGeometry::for_radius`] instead.
    pub fn compute(angle: f64, radius: f64) -> Self {
        assert!(
            radius.is_finite() && radius > 0.0,
            "radius must be positive, got {radius}"
        );

        let (sin, cos) = angle.sin_cos();
        let (adjacent_len, opposite_len) = (radius * cos, radius * sin);

        let foot = Point::new(adjacent_len, 0.0);
        let vertex = Point::new(adjacent_len, opposite_len);

        Self {
            radial: LineSegment::new(Point::ORIGIN, vertex),
            opposite: LineSegment::new(foot, vertex),
            adjacent: LineSegment::new(Point::ORIGIN, foot),
        }
    }

    pub fn for_radius(angle: f64, radius: Radius) -> Self {
        Self::compute(angle, radius.get())
    }

    pub fn segment(&self, kind: SegmentKind) -> &LineSegment {
        match kind {
            SegmentKind::Radial => &self.radial,
            SegmentKind::Opposite => &self.opposite,
            SegmentKind::Adjacent => &self.adjacent,
        }
    }

    /// The non-origin vertex on the circle.
    pub fn vertex(&self) -> Point {
        self.radial.end
    }

    pub fn is_closed(&self) -> bool {
        self.radial.start == Point::ORIGIN
            && self.adjacent.start == Point::ORIGIN
            && self.radial.end == self.opposite.end
            && self.opposite.start == self.adjacent.end
    }
}
