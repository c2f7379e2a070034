use super::store::TrigDataStore;
use parking_lot::Mutex;
use std::sync::Arc;
use strum::Display as StrumDisplay;
use trigo::AngleRange;

/// Whoever owns the recompute call.
pub trait AngleListener {
    fn angle_changed(&mut self, angle: f64);
}

impl AngleListener for TrigDataStore {
    fn angle_changed(&mut self, angle: f64) {
        let radius = self.inputs().radius;
        self.recompute(angle, radius);
    }
}

impl<L: AngleListener + ?Sized> AngleListener for Arc<Mutex<L>> {
    fn angle_changed(&mut self, angle: f64) {
        self.lock().angle_changed(angle);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, StrumDisplay)]
pub enum ControllerState {
    #[default]
    Idle,
    /// A notification is being delivered. Synchronous listeners return before
    /// the controller can observe this state from outside.
    Updating,
}

/// Owns the bounded angle and turns raw requests into at most one
/// notification each.
pub struct InputController<L> {
    range: AngleRange,
    angle: f64,
    state: ControllerState,
    listener: L,
}

impl<L: AngleListener> InputController<L> {
    /// `initial` is clamped but not announced; the listener is expected to be
    /// seeded with the same value.
    pub fn new(range: AngleRange, initial: f64, listener: L) -> Self {
        let angle = range.clamp(initial).unwrap_or(0.0_f64.clamp(range.min(), range.max()));
        Self {
            range,
            angle,
            state: ControllerState::Idle,
            listener,
        }
    }

    /// Clamps `requested` into range and notifies the listener if the stored
    /// angle changed. Returns the new angle when a notification was sent.
    pub fn set_angle(&mut self, requested: f64) -> Option<f64> {
        let Some(angle) = self.range.clamp(requested) else {
            log::warn!("Ignoring non-numeric angle request");
            return None;
        };
        if angle != requested {
            log::warn!("Angle {requested} out of range, clamped to {angle}");
        }
        self.commit(angle)
    }

    /// Moves `count` steps from the current angle, snapping to the step grid.
    pub fn step_by(&mut self, count: i32) -> Option<f64> {
        let angle = self.range.offset(self.angle, count)?;
        self.commit(angle)
    }

    fn commit(&mut self, angle: f64) -> Option<f64> {
        if angle == self.angle {
            return None;
        }
        self.angle = angle;
        self.state = ControllerState::Updating;
        self.listener.angle_changed(angle);
        self.state = ControllerState::Idle;
        Some(angle)
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn range(&self) -> &AngleRange {
        &self.range
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    #[cfg(test)]
    fn listener(&self) -> &L {
        &self.listener
    }
}
