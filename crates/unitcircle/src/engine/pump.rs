use super::controller::{AngleListener, InputController};
use crate::events::AppEvent;
use async_channel::Receiver;
use trigo::AngleRange;

/// What a run of queued events amounts to once newer requests have
/// superseded older ones.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Batch {
    /// Final angle, already clamped into the control range.
    pub target: Option<f64>,
    pub redraw: bool,
    pub quit: bool,
    /// Angle requests folded away by a later one.
    pub superseded: usize,
}

impl Batch {
    /// Folds `events` in emission order and lands where applying them one by
    /// one through the controller would. Absolute requests are clamped and
    /// replace the pending target, non-numeric ones are dropped. Steps move
    /// relative to the pending target (or to `current` if nothing is pending).
    /// Anything after `Quit` is dropped.
    pub fn fold(
        events: impl IntoIterator<Item = AppEvent>,
        current: f64,
        range: &AngleRange,
    ) -> Self {
        let mut batch = Self::default();
        for event in events {
            match event {
                AppEvent::SetAngle(angle) => batch.replace(range.clamp(angle)),
                AppEvent::Step(count) => {
                    let base = batch.target.unwrap_or(current);
                    batch.replace(range.offset(base, count));
                }
                AppEvent::Redraw => batch.redraw = true,
                AppEvent::Quit => {
                    batch.quit = true;
                    break;
                }
            }
        }
        batch
    }

    fn replace(&mut self, target: Option<f64>) {
        let Some(target) = target else {
            return;
        };
        if self.target.is_some() {
            self.superseded += 1;
        }
        self.target = Some(target);
    }
}

/// Takes `first` plus everything already queued behind it.
pub fn drain(first: AppEvent, rx: &Receiver<AppEvent>) -> Vec<AppEvent> {
    let mut events = vec![first];
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

/// Applies events until `Quit` or until every sender is gone. Each wakeup
/// results in at most one `set_angle`, so a listener never sees an older
/// request after a newer one.
pub fn run<L: AngleListener>(
    rx: &Receiver<AppEvent>,
    controller: &mut InputController<L>,
    mut redraw: impl FnMut(),
) {
    while let Ok(first) = rx.recv_blocking() {
        let events = drain(first, rx);
        let batch = Batch::fold(events, controller.angle(), controller.range());

        if batch.superseded > 0 {
            log::debug!("coalesced {} stale angle requests", batch.superseded);
        }

        let changed = batch
            .target
            .and_then(|target| controller.set_angle(target))
            .is_some();

        if batch.redraw && !changed {
            redraw();
        }
        if batch.quit {
            log::info!("Quit requested");
            break;
        }
    }
}
