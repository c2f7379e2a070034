#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppEvent {
    /// Absolute angle request in radians, not yet clamped.
    SetAngle(f64),
    /// Relative move by a number of control steps.
    Step(i32),
    Redraw,
    Quit,
}
