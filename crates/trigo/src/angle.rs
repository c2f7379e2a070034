use crate::GeometryError;
use serde::Serialize;
use std::f64::consts::TAU;

pub const DEFAULT_STEP: f64 = 0.05;

/// Bounds and step grid of the angle control, in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AngleRange {
    min: f64,
    max: f64,
    step: f64,
}

impl Default for AngleRange {
    fn default() -> Self {
        Self {
            min: -TAU,
            max: TAU,
            step: DEFAULT_STEP,
        }
    }
}

impl AngleRange {
    pub fn new(min: f64, max: f64, step: f64) -> Result<Self, GeometryError> {
        let bounds = min.is_finite() && max.is_finite() && min < max;
        if !bounds || !(step.is_finite() && step > 0.0) {
            return Err(GeometryError::InvalidRange { min, max, step });
        }
        Ok(Self { min, max, step })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Clamps into `[min, max]`. Non-finite input has no meaningful clamp and
    /// yields `None`.
    pub fn clamp(&self, angle: f64) -> Option<f64> {
        if angle.is_nan() {
            return None;
        }
        Some(angle.clamp(self.min, self.max))
    }

    /// Snaps to the nearest point of the step grid anchored at `min`, then
    /// clamps. `max` itself stays reachable even when the span is not a whole
    /// number of steps.
    pub fn quantize(&self, angle: f64) -> Option<f64> {
        let clamped = self.clamp(angle)?;
        if clamped == self.max {
            return Some(self.max);
        }
        let steps = ((clamped - self.min) / self.step).round();
        self.clamp(self.min + steps * self.step)
    }

    /// Moves `count` steps away from `angle` and lands on the grid.
    pub fn offset(&self, angle: f64, count: i32) -> Option<f64> {
        self.quantize(angle + f64::from(count) * self.step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_to_bounds() {
        let range = AngleRange::default();
        assert_eq!(range.clamp(10.0), Some(TAU));
        assert_eq!(range.clamp(-10.0), Some(-TAU));
        assert_eq!(range.clamp(1.0), Some(1.0));
        assert_eq!(range.clamp(f64::INFINITY), Some(TAU));
        assert_eq!(range.clamp(f64::NAN), None);
    }

    #[test]
    fn test_quantize_snaps_to_grid() {
        let range = AngleRange::new(0.0, 1.0, 0.25).unwrap();
        assert_eq!(range.quantize(0.3), Some(0.25));
        assert_eq!(range.quantize(0.4), Some(0.5));
        assert_eq!(range.quantize(7.0), Some(1.0));
        assert_eq!(range.quantize(-7.0), Some(0.0));
    }

    #[test]
    fn test_quantize_keeps_max_reachable() {
        let range = AngleRange::default();
        assert_eq!(range.quantize(TAU), Some(TAU));
        assert_eq!(range.quantize(100.0), Some(TAU));
        let near = range.quantize(TAU - 0.01).unwrap();
        assert!(near <= TAU);
    }

    #[test]
    fn test_offset_moves_by_steps() {
        let range = AngleRange::new(-1.0, 1.0, 0.5).unwrap();
        assert_eq!(range.offset(0.0, 1), Some(0.5));
        assert_eq!(range.offset(0.0, -2), Some(-1.0));
        assert_eq!(range.offset(0.0, 9), Some(1.0));
    }

    #[test]
    fn test_invalid_ranges_are_rejected() {
        assert!(AngleRange::new(1.0, 1.0, 0.1).is_err());
        assert!(AngleRange::new(2.0, 1.0, 0.1).is_err());
        assert!(AngleRange::new(-1.0, 1.0, 0.0).is_err());
        assert!(AngleRange::new(f64::NEG_INFINITY, 1.0, 0.1).is_err());
    }
}
