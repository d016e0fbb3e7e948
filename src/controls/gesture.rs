//! Maps a raw gesture start to a [`ManipulationState`].

use super::state::{GestureFlags, Intent, ManipulationState};
use crate::input::MouseButton;
use crate::options::ButtonMap;

/// What started a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureSource {
    /// A mouse button went down.
    Mouse(MouseButton),
    /// A finger went down; `active` counts all touching fingers.
    Touch {
        /// Active touch pointers including the new one.
        active: usize,
    },
}

/// Classify a gesture start.
///
/// For mouse input an enabled held modifier intent wins over the button
/// mapping; an intent disabled by `flags` falls back to
/// [`ManipulationState::None`]. Touch follows the pointer count alone:
/// one finger rotates, two or more zoom and pan together.
#[must_use]
pub fn classify(
    source: GestureSource,
    held: Option<Intent>,
    buttons: &ButtonMap,
    flags: GestureFlags,
) -> ManipulationState {
    match source {
        GestureSource::Touch { active } => match active {
            0 => ManipulationState::None,
            1 => ManipulationState::TouchRotate,
            _ => ManipulationState::TouchZoomPan,
        },
        GestureSource::Mouse(button) => held
            .filter(|intent| flags.allows(*intent))
            .or_else(|| {
                buttons
                    .intent_for(button)
                    .filter(|intent| flags.allows(*intent))
            })
            .map_or(ManipulationState::None, ManipulationState::from),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mouse(button: MouseButton) -> GestureSource {
        GestureSource::Mouse(button)
    }

    #[test]
    fn default_buttons_map_to_rotate_zoom_pan() {
        let buttons = ButtonMap::default();
        let flags = GestureFlags::ALL;
        assert_eq!(
            classify(mouse(MouseButton::Left), None, &buttons, flags),
            ManipulationState::Rotate
        );
        assert_eq!(
            classify(mouse(MouseButton::Middle), None, &buttons, flags),
            ManipulationState::Zoom
        );
        assert_eq!(
            classify(mouse(MouseButton::Right), None, &buttons, flags),
            ManipulationState::Pan
        );
        assert_eq!(
            classify(mouse(MouseButton::Other), None, &buttons, flags),
            ManipulationState::None
        );
    }

    #[test]
    fn held_modifier_overrides_button() {
        let state = classify(
            mouse(MouseButton::Left),
            Some(Intent::Pan),
            &ButtonMap::default(),
            GestureFlags::ALL,
        );
        assert_eq!(state, ManipulationState::Pan);
    }

    #[test]
    fn disabled_modifier_falls_back_to_button() {
        let flags = GestureFlags {
            pan: false,
            ..GestureFlags::ALL
        };
        let state = classify(
            mouse(MouseButton::Left),
            Some(Intent::Pan),
            &ButtonMap::default(),
            flags,
        );
        assert_eq!(state, ManipulationState::Rotate);
    }

    #[test]
    fn disabled_button_intent_is_none() {
        let flags = GestureFlags {
            rotate: false,
            ..GestureFlags::ALL
        };
        let state =
            classify(mouse(MouseButton::Left), None, &ButtonMap::default(), flags);
        assert_eq!(state, ManipulationState::None);
    }

    #[test]
    fn touch_follows_pointer_count() {
        let buttons = ButtonMap::default();
        let flags = GestureFlags::ALL;
        let touch = |active| GestureSource::Touch { active };
        assert_eq!(
            classify(touch(1), Some(Intent::Pan), &buttons, flags),
            ManipulationState::TouchRotate
        );
        assert_eq!(
            classify(touch(2), None, &buttons, flags),
            ManipulationState::TouchZoomPan
        );
        assert_eq!(
            classify(touch(3), None, &buttons, flags),
            ManipulationState::TouchZoomPan
        );
        assert_eq!(
            classify(touch(0), None, &buttons, flags),
            ManipulationState::None
        );
    }
}
