//! Listener registry and pointer capture for the viewport.
//!
//! The surface is the host-side half of the input contract: consumers
//! register listeners per [`Channel`], the host only routes an event when
//! somebody listens on its channel, and a consumer may capture a pointer so
//! its move/up events keep flowing while the button is held.

use super::event::{Channel, PointerId};

/// Opaque handle returned by [`InputSurface::add_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

#[derive(Debug, Clone, Copy)]
struct Listener {
    id: ListenerId,
    channel: Channel,
}

/// The input surface events arrive on (the viewport).
#[derive(Debug, Default)]
pub struct InputSurface {
    listeners: Vec<Listener>,
    next_id: u64,
    captured: Option<PointerId>,
}

impl InputSurface {
    /// Create a surface with no listeners and no capture.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener on `channel`.
    pub fn add_listener(&mut self, channel: Channel) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push(Listener { id, channel });
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| l.id != id);
        self.listeners.len() != before
    }

    /// Whether `id` is still registered.
    #[must_use]
    pub fn has_listener(&self, id: ListenerId) -> bool {
        self.listeners.iter().any(|l| l.id == id)
    }

    /// Whether any listener is registered on `channel`.
    #[must_use]
    pub fn is_listening(&self, channel: Channel) -> bool {
        self.listeners.iter().any(|l| l.channel == channel)
    }

    /// Total registered listeners across all channels.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Route subsequent move/up events of `pointer` to this surface.
    pub fn set_pointer_capture(&mut self, pointer: PointerId) {
        self.captured = Some(pointer);
    }

    /// Release the capture held by `pointer` (no-op for other pointers).
    pub fn release_pointer_capture(&mut self, pointer: PointerId) {
        if self.captured == Some(pointer) {
            self.captured = None;
        }
    }

    /// The pointer currently captured, if any.
    #[must_use]
    pub fn captured_pointer(&self) -> Option<PointerId> {
        self.captured
    }
}

/// Listeners owned by one consumer. [`release`](Self::release) removes
/// exactly what was acquired.
#[derive(Debug, Default)]
pub struct Subscriptions {
    entries: Vec<(Channel, ListenerId)>,
}

impl Subscriptions {
    /// Register one listener per channel.
    #[must_use]
    pub fn acquire(surface: &mut InputSurface, channels: &[Channel]) -> Self {
        let mut subs = Self::default();
        subs.extend(surface, channels);
        subs
    }

    /// Register additional channels (already covered channels are skipped).
    pub fn extend(&mut self, surface: &mut InputSurface, channels: &[Channel]) {
        for &channel in channels {
            if !self.covers(channel) {
                let id = surface.add_listener(channel);
                self.entries.push((channel, id));
            }
        }
    }

    /// Remove every listener in this list from the surface.
    pub fn release(&mut self, surface: &mut InputSurface) {
        for (_, id) in self.entries.drain(..) {
            let _ = surface.remove_listener(id);
        }
    }

    /// Whether this list holds a listener on `channel`.
    #[must_use]
    pub fn covers(&self, channel: Channel) -> bool {
        self.entries.iter().any(|(c, _)| *c == channel)
    }

    /// Whether the list holds no listeners.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_removes_exactly_what_was_acquired() {
        let mut surface = InputSurface::new();
        let foreign = surface.add_listener(Channel::Wheel);

        let mut subs = Subscriptions::acquire(
            &mut surface,
            &[Channel::PointerDown, Channel::Wheel, Channel::KeyDown],
        );
        assert_eq!(surface.listener_count(), 4);
        assert!(subs.covers(Channel::KeyDown));

        subs.release(&mut surface);
        assert!(subs.is_empty());
        assert_eq!(surface.listener_count(), 1);
        assert!(surface.has_listener(foreign));
        assert!(!surface.is_listening(Channel::PointerDown));
    }

    #[test]
    fn extend_skips_covered_channels() {
        let mut surface = InputSurface::new();
        let mut subs = Subscriptions::acquire(&mut surface, &[Channel::PointerMove]);
        subs.extend(&mut surface, &[Channel::PointerMove, Channel::PointerUp]);
        assert_eq!(surface.listener_count(), 2);
    }

    #[test]
    fn capture_is_released_only_by_its_owner() {
        let mut surface = InputSurface::new();
        surface.set_pointer_capture(PointerId(3));
        surface.release_pointer_capture(PointerId(4));
        assert_eq!(surface.captured_pointer(), Some(PointerId(3)));
        surface.release_pointer_capture(PointerId(3));
        assert_eq!(surface.captured_pointer(), None);
    }
}
