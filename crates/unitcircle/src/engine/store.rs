use derive_more::Display;
use trigo::curves::reference_circle;
use trigo::{Point, Radius, TriangleGeometry};

/// The inputs geometry is derived from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputState {
    pub angle: f64,
    pub radius: Radius,
}

/// Immutable, internally consistent view handed to observers. All three
/// segments always come from the same `inputs`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometrySnapshot {
    /// Increments once per recompute; `0` is the seed computed at construction.
    pub revision: u64,
    pub inputs: InputState,
    pub geometry: TriangleGeometry,
}

pub trait GeometryObserver {
    fn on_snapshot(&mut self, snapshot: &GeometrySnapshot);
}

impl<F> GeometryObserver for F
where
    F: FnMut(&GeometrySnapshot),
{
    fn on_snapshot(&mut self, snapshot: &GeometrySnapshot) {
        self(snapshot)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub struct SubscriptionId(u64);

type BoxedObserver = Box<dyn GeometryObserver + Send>;

/// Holds the current inputs, the geometry derived from them and the fixed
/// reference circle, and publishes every change to its observers.
pub struct TrigDataStore {
    snapshot: GeometrySnapshot,
    reference_circle: Vec<Point>,
    observers: Vec<(SubscriptionId, BoxedObserver)>,
    next_id: u64,
}

impl TrigDataStore {
    pub fn new(angle: f64, radius: Radius, circle_segments: usize) -> Self {
        Self {
            snapshot: GeometrySnapshot {
                revision: 0,
                inputs: InputState { angle, radius },
                geometry: TriangleGeometry::for_radius(angle, radius),
            },
            reference_circle: reference_circle(radius, circle_segments),
            observers: Vec::new(),
            next_id: 0,
        }
    }

    /// Derives the triangle for `(angle, radius)`, swaps it in as one value
    /// and notifies every observer exactly once with the full snapshot.
    pub fn recompute(&mut self, angle: f64, radius: Radius) -> GeometrySnapshot {
        let snapshot = GeometrySnapshot {
            revision: self.snapshot.revision + 1,
            inputs: InputState { angle, radius },
            geometry: TriangleGeometry::for_radius(angle, radius),
        };
        self.snapshot = snapshot;

        let vertex = snapshot.geometry.vertex();
        log::debug!(
            "recompute #{}: angle={:.4} radius={} vertex=({:.2}, {:.2})",
            snapshot.revision,
            angle,
            radius,
            vertex.x,
            vertex.y
        );
        self.notify();
        snapshot
    }

    /// Re-sends the current snapshot without recomputing.
    pub fn publish(&mut self) {
        self.notify();
    }

    fn notify(&mut self) {
        let snapshot = self.snapshot;
        for (_, observer) in &mut self.observers {
            observer.on_snapshot(&snapshot);
        }
    }

    pub fn geometry(&self) -> TriangleGeometry {
        self.snapshot.geometry
    }

    pub fn snapshot(&self) -> GeometrySnapshot {
        self.snapshot
    }

    pub fn inputs(&self) -> InputState {
        self.snapshot.inputs
    }

    /// Circle of the session radius, computed once at construction.
    pub fn reference_circle(&self) -> &[Point] {
        &self.reference_circle
    }

    pub fn subscribe(
        &mut self,
        observer: impl GeometryObserver + Send + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn radius() -> Radius {
        Radius::new(100.0).unwrap()
    }

    fn recording(store: &mut TrigDataStore) -> Arc<Mutex<Vec<GeometrySnapshot>>> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        store.subscribe(move |s: &GeometrySnapshot| sink.lock().push(*s));
        seen
    }

    #[test]
    fn test_seeded_at_construction() {
        let store = TrigDataStore::new(1.0, radius(), 64);
        assert_eq!(store.snapshot().revision, 0);
        assert_eq!(store.geometry(), TriangleGeometry::compute(1.0, 100.0));
        assert_eq!(store.reference_circle().len(), 65);
    }

    #[test]
    fn test_one_notification_per_recompute() {
        let mut store = TrigDataStore::new(1.0, radius(), 64);
        let seen = recording(&mut store);

        store.recompute(0.5, radius());
        store.recompute(-0.5, radius());

        let seen = seen.lock();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].revision, 1);
        assert_eq!(seen[1].revision, 2);
        assert_eq!(seen[1].inputs.angle, -0.5);
    }

    #[test]
    fn test_snapshot_segments_share_one_angle() {
        let mut store = TrigDataStore::new(1.0, radius(), 64);
        let seen = recording(&mut store);

        for step in 0..20 {
            store.recompute(step as f64 * 0.3, radius());
        }

        for snapshot in seen.lock().iter() {
            let expected = TriangleGeometry::compute(snapshot.inputs.angle, 100.0);
            assert_eq!(snapshot.geometry, expected);
            assert!(snapshot.geometry.is_closed());
        }
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let mut store = TrigDataStore::new(0.0, radius(), 64);
        let first = store.recompute(2.2, radius());
        let second = store.recompute(2.2, radius());
        assert_eq!(first.geometry, second.geometry);
        assert_eq!(first.inputs, second.inputs);
    }

    #[test]
    fn test_reference_circle_is_fixed() {
        let mut store = TrigDataStore::new(0.0, radius(), 16);
        let before = store.reference_circle().to_vec();
        store.recompute(3.0, radius());
        assert_eq!(store.reference_circle(), before.as_slice());
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let mut store = TrigDataStore::new(0.0, radius(), 64);
        let count = Arc::new(Mutex::new(0));
        let sink = count.clone();
        let id = store.subscribe(move |_: &GeometrySnapshot| *sink.lock() += 1);

        store.recompute(1.0, radius());
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.recompute(2.0, radius());

        assert_eq!(*count.lock(), 1);
        assert_eq!(store.observer_count(), 0);
    }

    #[test]
    fn test_publish_resends_without_recompute() {
        let mut store = TrigDataStore::new(1.0, radius(), 64);
        let seen = recording(&mut store);
        store.publish();

        let seen = seen.lock();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].revision, 0);
    }
}
