pub mod canvas;
pub mod curves;
#[cfg(feature = "cairo")]
pub mod png;
pub mod text;
pub mod theme;

pub use curves::CurvePanel;
pub use text::TextRenderer;
pub use theme::{ColorError, LineStyle, Theme};

use crate::engine::{GeometryObserver, GeometrySnapshot};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[cfg(feature = "cairo")]
    #[error("Cairo error: {0}")]
    Cairo(#[from] cairo::Error),
    #[cfg(feature = "cairo")]
    #[error("PNG error: {0}")]
    Png(#[from] cairo::IoError),
}

/// Draws one snapshot. Implementations only read the snapshot.
pub trait Renderer {
    fn render(&mut self, snapshot: &GeometrySnapshot) -> Result<(), RenderError>;
}

/// Subscribes a [`Renderer`] to the store. Failures are logged so one broken
/// output cannot stall the others.
pub struct RenderSink<R> {
    name: &'static str,
    renderer: R,
}

impl<R: Renderer> RenderSink<R> {
    pub fn new(name: &'static str, renderer: R) -> Self {
        Self { name, renderer }
    }
}

impl<R: Renderer> GeometryObserver for RenderSink<R> {
    fn on_snapshot(&mut self, snapshot: &GeometrySnapshot) {
        if let Err(e) = self.renderer.render(snapshot) {
            log::error!("{} rendering error: {}", self.name, e);
        }
    }
}
