pub mod angle;
pub mod curves;
pub mod geometry;

pub use angle::AngleRange;
pub use geometry::{LineSegment, Point, Radius, SegmentKind, TriangleGeometry};

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometryError {
    #[error("radius must be a positive finite number, got {0}")]
    NonPositiveRadius(f64),
    #[error("invalid angle range [{min}, {max}] with step {step}")]
    InvalidRange { min: f64, max: f64, step: f64 },
    #[error("invalid sampling resolution {0}")]
    InvalidResolution(f64),
}
