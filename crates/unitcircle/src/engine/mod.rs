pub mod controller;
pub mod pump;
pub mod store;

pub use controller::{AngleListener, ControllerState, InputController};
pub use pump::Batch;
pub use store::{GeometryObserver, GeometrySnapshot, InputState, SubscriptionId, TrigDataStore};

use parking_lot::Mutex;
use std::sync::Arc;

/// Store handle shared between the controller and the event loop.
pub type SharedStore = Arc<Mutex<TrigDataStore>>;
