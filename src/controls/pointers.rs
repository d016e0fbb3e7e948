use std::fmt;

use glam::Vec2;

use crate::input::PointerId;

/// Precondition violations when querying the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerError {
    /// A two-pointer query was made with fewer than two active pointers.
    NotEnoughPointers {
        /// Pointers active at the time of the query.
        active: usize,
    },
}

impl fmt::Display for PointerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotEnoughPointers { active } => write!(
                f,
                "two active pointers required, {active} tracked"
            ),
        }
    }
}

impl std::error::Error for PointerError {}

/// One tracked pointer and its last known screen position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackedPointer {
    /// Pointer identifier.
    pub id: PointerId,
    /// Last screen position in physical pixels.
    pub position: Vec2,
}

/// Active pointers in insertion order.
///
/// A pointer id appears at most once; removing a pointer also discards its
/// recorded position.
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    pointers: Vec<TrackedPointer>,
}

impl PointerTracker {
    /// Empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking `id`. Re-adding a tracked id updates it in place.
    pub fn add(&mut self, id: PointerId, position: Vec2) {
        if !self.update(id, position) {
            self.pointers.push(TrackedPointer { id, position });
        }
    }

    /// Record a new position. Returns `false` if `id` is not tracked.
    pub fn update(&mut self, id: PointerId, position: Vec2) -> bool {
        match self.pointers.iter_mut().find(|p| p.id == id) {
            Some(pointer) => {
                pointer.position = position;
                true
            }
            None => false,
        }
    }

    /// Stop tracking `id`, returning its last position.
    pub fn remove(&mut self, id: PointerId) -> Option<Vec2> {
        let index = self.pointers.iter().position(|p| p.id == id)?;
        Some(self.pointers.remove(index).position)
    }

    /// Forget every pointer.
    pub fn clear(&mut self) {
        self.pointers.clear();
    }

    /// Number of active pointers.
    #[must_use]
    pub fn count(&self) -> usize {
        self.pointers.len()
    }

    /// Whether no pointer is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pointers.is_empty()
    }

    /// Last position of `id`.
    #[must_use]
    pub fn position(&self, id: PointerId) -> Option<Vec2> {
        self.pointers.iter().find(|p| p.id == id).map(|p| p.position)
    }

    /// The first and second active pointers, in insertion order.
    pub fn first_two(&self) -> Result<(TrackedPointer, TrackedPointer), PointerError> {
        match self.pointers.as_slice() {
            [a, b, ..] => Ok((*a, *b)),
            _ => Err(PointerError::NotEnoughPointers {
                active: self.count(),
            }),
        }
    }

    /// The pointer paired with `id` in a two-finger gesture: the second
    /// pointer if `id` is the first one, otherwise the first.
    pub fn other(&self, id: PointerId) -> Result<TrackedPointer, PointerError> {
        let (first, second) = self.first_two()?;
        Ok(if first.id == id { second } else { first })
    }

    /// Iterate tracked pointers in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &TrackedPointer> {
        self.pointers.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_insertion_ordered() {
        let mut tracker = PointerTracker::new();
        tracker.add(PointerId(5), Vec2::new(1.0, 1.0));
        tracker.add(PointerId(2), Vec2::new(2.0, 2.0));
        tracker.add(PointerId(5), Vec2::new(3.0, 3.0));

        assert_eq!(tracker.count(), 2);
        let ids: Vec<_> = tracker.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![PointerId(5), PointerId(2)]);
        assert_eq!(tracker.position(PointerId(5)), Some(Vec2::new(3.0, 3.0)));
    }

    #[test]
    fn remove_discards_position() {
        let mut tracker = PointerTracker::new();
        tracker.add(PointerId(1), Vec2::ONE);
        assert_eq!(tracker.remove(PointerId(1)), Some(Vec2::ONE));
        assert_eq!(tracker.position(PointerId(1)), None);
        assert_eq!(tracker.remove(PointerId(1)), None);
        assert!(!tracker.update(PointerId(1), Vec2::ZERO));
    }

    #[test]
    fn other_returns_the_paired_pointer() {
        let mut tracker = PointerTracker::new();
        tracker.add(PointerId(1), Vec2::new(0.0, 0.0));
        tracker.add(PointerId(2), Vec2::new(10.0, 0.0));

        assert_eq!(tracker.other(PointerId(1)).map(|p| p.id), Ok(PointerId(2)));
        assert_eq!(tracker.other(PointerId(2)).map(|p| p.id), Ok(PointerId(1)));
    }

    #[test]
    fn other_fails_with_a_single_pointer() {
        let mut tracker = PointerTracker::new();
        tracker.add(PointerId(1), Vec2::ZERO);
        assert_eq!(
            tracker.other(PointerId(1)),
            Err(PointerError::NotEnoughPointers { active: 1 })
        );
    }
}
