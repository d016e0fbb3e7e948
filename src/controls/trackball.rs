//! Trackball camera controller.
//!
//! Input handlers only move anchors (previous/current screen positions);
//! [`TrackballControls::update`] turns the anchor deltas into camera motion
//! once per frame, so several input events between frames fold into one
//! step and damping keeps the camera coasting after release.

use glam::{Quat, Vec2, Vec3};

use super::align::RollAlignment;
use super::gesture::{classify, GestureSource};
use super::pointers::PointerTracker;
use super::screen::ScreenRect;
use super::state::{ControlEvent, Intent, ManipulationState};
use crate::camera::{Camera, Lens};
use crate::input::{
    Channel, InputEvent, InputSurface, MouseButton, PointerId, PointerKind,
    Subscriptions, WheelDeltaMode,
};
use crate::options::ControlsOptions;

/// Squared movement below which the camera is considered unchanged.
const CHANGE_EPS: f32 = 1e-6;

/// Channels listened on for the whole controller lifetime.
const BASE_CHANNELS: [Channel; 5] = [
    Channel::PointerDown,
    Channel::PointerCancel,
    Channel::Wheel,
    Channel::KeyDown,
    Channel::KeyUp,
];

/// Channels listened on only while at least one pointer is down.
const DRAG_CHANNELS: [Channel; 2] = [Channel::PointerMove, Channel::PointerUp];

/// Wheel delta to zoom anchor units.
fn wheel_multiplier(mode: WheelDeltaMode) -> f32 {
    match mode {
        WheelDeltaMode::Page => 0.025,
        WheelDeltaMode::Line => 0.01,
        WheelDeltaMode::Pixel => 0.000_25,
    }
}

/// Camera state captured at construction, restored by
/// [`TrackballControls::reset`].
#[derive(Debug, Clone, Copy)]
struct InitialState {
    target: Vec3,
    position: Vec3,
    up: Vec3,
    zoom: Option<f32>,
}

/// Trackball controller that owns the camera it drives.
///
/// Mouse buttons (or held modifier keys) select rotate, zoom or pan; one
/// finger rotates; two fingers pinch-zoom and pan around their midpoint.
/// Rotation and pan coast with damping after release unless
/// [`ControlsOptions::static_moving`] is set, and the camera up vector is
/// gradually rolled toward [`ControlsOptions::align_axis`] when it is
/// already close to it.
///
/// Hosts feed events through [`handle_event`](Self::handle_event), call
/// [`update`](Self::update) once per frame and drain notifications with
/// [`drain_events`](Self::drain_events).
#[derive(Debug)]
pub struct TrackballControls {
    camera: Camera,
    target: Vec3,
    options: ControlsOptions,
    enabled: bool,
    screen: ScreenRect,

    state: ManipulationState,
    key_state: Option<Intent>,

    eye: Vec3,
    move_prev: Vec2,
    move_curr: Vec2,
    last_axis: Vec3,
    last_angle: f32,
    zoom_start: Vec2,
    zoom_end: Vec2,
    touch_zoom_distance_start: f32,
    touch_zoom_distance_end: f32,
    pan_start: Vec2,
    pan_end: Vec2,

    initial: InitialState,
    last_position: Vec3,
    last_zoom: Option<f32>,

    pointers: PointerTracker,
    captured: Option<PointerId>,
    listeners: Subscriptions,
    drag_listeners: Subscriptions,
    events: Vec<ControlEvent>,
    warned_unsupported: bool,
}

impl TrackballControls {
    /// Take control of `camera`, orbiting around `target`, and register
    /// the base listeners on `surface`.
    ///
    /// The camera is pointed at `target` immediately. No
    /// [`ControlEvent::Change`] is emitted for this initial orientation.
    pub fn new(
        mut camera: Camera,
        target: Vec3,
        options: ControlsOptions,
        surface: &mut InputSurface,
    ) -> Self {
        camera.look_at(target);
        let initial = InitialState {
            target,
            position: camera.eye,
            up: camera.up,
            zoom: camera.zoom(),
        };
        Self {
            eye: camera.eye - target,
            last_position: camera.eye,
            last_zoom: camera.zoom(),
            camera,
            target,
            options,
            enabled: true,
            screen: ScreenRect::default(),
            state: ManipulationState::None,
            key_state: None,
            move_prev: Vec2::ZERO,
            move_curr: Vec2::ZERO,
            last_axis: Vec3::ZERO,
            last_angle: 0.0,
            zoom_start: Vec2::ZERO,
            zoom_end: Vec2::ZERO,
            touch_zoom_distance_start: 0.0,
            touch_zoom_distance_end: 0.0,
            pan_start: Vec2::ZERO,
            pan_end: Vec2::ZERO,
            initial,
            pointers: PointerTracker::new(),
            captured: None,
            listeners: Subscriptions::acquire(surface, &BASE_CHANNELS),
            drag_listeners: Subscriptions::default(),
            events: Vec::new(),
            warned_unsupported: false,
        }
    }

    // -- Accessors --

    /// The controlled camera.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Mutable access to the controlled camera (aspect changes, projection
    /// swaps).
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Current orbit target.
    #[must_use]
    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Current gesture.
    #[must_use]
    pub fn state(&self) -> ManipulationState {
        self.state
    }

    /// Modifier intent currently held, if any.
    #[must_use]
    pub fn key_state(&self) -> Option<Intent> {
        self.key_state
    }

    /// Number of pointers currently down.
    #[must_use]
    pub fn active_pointers(&self) -> usize {
        self.pointers.count()
    }

    /// Controller parameters.
    #[must_use]
    pub fn options(&self) -> &ControlsOptions {
        &self.options
    }

    /// Mutable controller parameters; changes apply from the next event or
    /// frame.
    pub fn options_mut(&mut self) -> &mut ControlsOptions {
        &mut self.options
    }

    /// Whether input events are processed.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable input handling. [`update`](Self::update) keeps
    /// running either way so inertia settles.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Current viewport rectangle.
    #[must_use]
    pub fn screen(&self) -> ScreenRect {
        self.screen
    }

    /// Take all notifications emitted since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<ControlEvent> {
        std::mem::take(&mut self.events)
    }

    // -- Lifecycle --

    /// Record the viewport rectangle used to normalize pointer positions.
    pub fn handle_resize(&mut self, screen: ScreenRect) {
        self.screen = screen;
    }

    /// Restore target, position, up and zoom captured at construction.
    ///
    /// Pending anchor deltas and inertia are discarded so the restored
    /// pose does not drift on the next [`update`](Self::update).
    pub fn reset(&mut self) {
        self.state = ManipulationState::None;
        self.key_state = None;

        self.target = self.initial.target;
        self.camera.eye = self.initial.position;
        self.camera.up = self.initial.up;
        if let Some(zoom) = self.initial.zoom {
            let _ = self.camera.set_zoom(zoom);
        }
        self.camera.update_projection_matrix();

        self.eye = self.camera.eye - self.target;
        self.camera.look_at(self.target);

        self.last_angle = 0.0;
        self.move_prev = self.move_curr;
        self.zoom_start = self.zoom_end;
        self.pan_start = self.pan_end;
        self.touch_zoom_distance_start = self.touch_zoom_distance_end;

        self.events.push(ControlEvent::Change);
        self.last_position = self.camera.eye;
        self.last_zoom = self.camera.zoom();
    }

    /// Remove every listener and capture this controller registered.
    /// Safe to call more than once.
    pub fn dispose(&mut self, surface: &mut InputSurface) {
        self.listeners.release(surface);
        self.drag_listeners.release(surface);
        if let Some(id) = self.captured.take() {
            surface.release_pointer_capture(id);
        }
        self.pointers.clear();
        self.state = ManipulationState::None;
        self.key_state = None;
    }

    // -- Input --

    /// Process one input event. Returns `true` when the event was consumed.
    ///
    /// Events on channels this controller does not currently listen on, or
    /// any event while disabled, are ignored.
    pub fn handle_event(&mut self, surface: &mut InputSurface, event: &InputEvent) -> bool {
        let channel = event.channel();
        if !self.enabled
            || !(self.listeners.covers(channel) || self.drag_listeners.covers(channel))
        {
            return false;
        }

        match event {
            InputEvent::PointerDown {
                id,
                kind,
                button,
                position,
            } => self.on_pointer_down(surface, *id, *kind, *button, *position),
            InputEvent::PointerMove { id, kind, position } => {
                self.on_pointer_move(*id, *kind, *position);
            }
            InputEvent::PointerUp { id, kind, .. } => self.on_pointer_up(surface, *id, *kind),
            InputEvent::PointerCancel { id } => self.on_pointer_cancel(surface, *id),
            InputEvent::Wheel { delta_y, mode } => {
                if !self.options.enable_zoom {
                    return false;
                }
                self.zoom_start.y -= delta_y * wheel_multiplier(*mode);
                self.events.push(ControlEvent::Start);
                self.events.push(ControlEvent::End);
            }
            InputEvent::KeyDown { code } => {
                if self.key_state.is_some() || self.state.is_active() {
                    return false;
                }
                let flags = self.options.gesture_flags();
                self.key_state = self
                    .options
                    .modifier_keys
                    .intent_for(code)
                    .filter(|intent| flags.allows(*intent));
            }
            InputEvent::KeyUp { .. } => self.key_state = None,
        }
        true
    }

    fn on_pointer_down(
        &mut self,
        surface: &mut InputSurface,
        id: PointerId,
        kind: PointerKind,
        button: MouseButton,
        position: Vec2,
    ) {
        if self.pointers.is_empty() {
            surface.set_pointer_capture(id);
            self.captured = Some(id);
            self.drag_listeners.extend(surface, &DRAG_CHANNELS);
        }
        self.pointers.add(id, position);

        match kind {
            PointerKind::Touch => {
                self.state = classify(
                    GestureSource::Touch {
                        active: self.pointers.count(),
                    },
                    None,
                    &self.options.mouse_buttons,
                    self.options.gesture_flags(),
                );
                self.anchor_touch();
            }
            PointerKind::Mouse => {
                self.state = classify(
                    GestureSource::Mouse(button),
                    self.key_state,
                    &self.options.mouse_buttons,
                    self.options.gesture_flags(),
                );
                match self.state {
                    ManipulationState::Rotate => {
                        self.move_curr = self.screen.on_circle(position);
                        self.move_prev = self.move_curr;
                    }
                    ManipulationState::Zoom => {
                        self.zoom_start = self.screen.normalized(position);
                        self.zoom_end = self.zoom_start;
                    }
                    ManipulationState::Pan => {
                        self.pan_start = self.screen.normalized(position);
                        self.pan_end = self.pan_start;
                    }
                    _ => {}
                }
            }
        }
        self.events.push(ControlEvent::Start);
    }

    fn on_pointer_move(&mut self, id: PointerId, kind: PointerKind, position: Vec2) {
        if !self.pointers.update(id, position) {
            return;
        }
        match kind {
            PointerKind::Mouse => match self.state {
                ManipulationState::Rotate => {
                    self.move_prev = self.move_curr;
                    self.move_curr = self.screen.on_circle(position);
                }
                ManipulationState::Zoom => self.zoom_end = self.screen.normalized(position),
                ManipulationState::Pan => self.pan_end = self.screen.normalized(position),
                _ => {}
            },
            PointerKind::Touch => {
                if self.pointers.count() == 1 {
                    self.move_prev = self.move_curr;
                    self.move_curr = self.screen.on_circle(position);
                    return;
                }
                match self.pointers.other(id) {
                    Ok(other) => {
                        self.touch_zoom_distance_end = position.distance(other.position);
                        self.pan_end = self.screen.normalized((position + other.position) * 0.5);
                    }
                    Err(e) => log::warn!("Ignoring touch move: {e}"),
                }
            }
        }
    }

    fn on_pointer_up(&mut self, surface: &mut InputSurface, id: PointerId, kind: PointerKind) {
        if self.pointers.remove(id).is_none() {
            return;
        }
        match kind {
            PointerKind::Touch => {
                self.state = classify(
                    GestureSource::Touch {
                        active: self.pointers.count(),
                    },
                    None,
                    &self.options.mouse_buttons,
                    self.options.gesture_flags(),
                );
                self.anchor_touch();
            }
            PointerKind::Mouse => self.state = ManipulationState::None,
        }
        self.events.push(ControlEvent::End);
        self.release_if_idle(surface);
    }

    fn on_pointer_cancel(&mut self, surface: &mut InputSurface, id: PointerId) {
        if self.pointers.remove(id).is_none() {
            return;
        }
        if self.pointers.is_empty() {
            self.state = ManipulationState::None;
        } else if self.state.is_touch() {
            self.state = classify(
                GestureSource::Touch {
                    active: self.pointers.count(),
                },
                None,
                &self.options.mouse_buttons,
                self.options.gesture_flags(),
            );
            self.anchor_touch();
        }
        self.release_if_idle(surface);
    }

    /// Reset anchors for the touch gesture implied by the tracked pointers.
    fn anchor_touch(&mut self) {
        match self.state {
            ManipulationState::TouchRotate => {
                if let Some(pointer) = self.pointers.iter().next() {
                    self.move_curr = self.screen.on_circle(pointer.position);
                    self.move_prev = self.move_curr;
                }
            }
            ManipulationState::TouchZoomPan => match self.pointers.first_two() {
                Ok((a, b)) => {
                    let distance = a.position.distance(b.position);
                    self.touch_zoom_distance_start = distance;
                    self.touch_zoom_distance_end = distance;
                    self.pan_start = self.screen.normalized((a.position + b.position) * 0.5);
                    self.pan_end = self.pan_start;
                }
                Err(e) => log::warn!("Cannot anchor pinch gesture: {e}"),
            },
            _ => {}
        }
    }

    fn release_if_idle(&mut self, surface: &mut InputSurface) {
        if !self.pointers.is_empty() {
            return;
        }
        if let Some(id) = self.captured.take() {
            surface.release_pointer_capture(id);
        }
        self.drag_listeners.release(surface);
    }

    // -- Per-frame update --

    /// Apply pending rotation, zoom and pan to the camera.
    ///
    /// Emits [`ControlEvent::Change`] when the camera moved (or its zoom
    /// changed) by more than a small epsilon since the last emission.
    pub fn update(&mut self) {
        let lens = self.camera.lens();
        self.eye = self.camera.eye - self.target;

        if self.options.enable_rotate {
            self.rotate_camera();
        }
        if self.options.enable_zoom {
            self.zoom_camera(lens);
        }
        if self.options.enable_pan {
            self.pan_camera();
        }

        self.camera.eye = self.target + self.eye;

        match lens {
            Lens::Dolly => {
                self.check_distances();
                self.camera.look_at(self.target);
                if self.last_position.distance_squared(self.camera.eye) > CHANGE_EPS {
                    self.events.push(ControlEvent::Change);
                    self.last_position = self.camera.eye;
                }
            }
            Lens::Scale => {
                self.camera.look_at(self.target);
                let zoom = self.camera.zoom();
                if self.last_position.distance_squared(self.camera.eye) > CHANGE_EPS
                    || self.last_zoom != zoom
                {
                    self.events.push(ControlEvent::Change);
                    self.last_position = self.camera.eye;
                    self.last_zoom = zoom;
                }
            }
            Lens::Unsupported => {
                if !self.warned_unsupported {
                    log::warn!(
                        "Camera projection supports neither dolly nor scale zoom; \
                         only orientation is updated"
                    );
                    self.warned_unsupported = true;
                }
                self.camera.look_at(self.target);
                if self.last_position.distance_squared(self.camera.eye) > CHANGE_EPS {
                    self.events.push(ControlEvent::Change);
                    self.last_position = self.camera.eye;
                }
            }
        }
    }

    fn rotate_camera(&mut self) {
        let delta = self.move_curr - self.move_prev;
        let mut rotated = false;

        if delta.length() > 0.0 {
            let eye_direction = self.eye.normalize_or_zero();
            let up_direction = self.camera.up.normalize_or_zero();
            let sideways = up_direction.cross(eye_direction).normalize_or_zero();
            let move_direction = up_direction * delta.y + sideways * delta.x;
            let axis = move_direction.cross(self.eye).normalize_or_zero();
            if axis != Vec3::ZERO {
                let angle = delta.length() * self.options.rotate_speed;
                let rotation = Quat::from_axis_angle(axis, angle);
                self.eye = rotation * self.eye;
                self.camera.up = rotation * self.camera.up;
                self.last_axis = axis;
                self.last_angle = angle;
                rotated = true;
            }
        } else if !self.options.static_moving && self.last_angle != 0.0 {
            self.last_angle *= (1.0 - self.options.damping_factor).sqrt();
            let rotation = Quat::from_axis_angle(self.last_axis, self.last_angle);
            self.eye = rotation * self.eye;
            self.camera.up = rotation * self.camera.up;
            rotated = true;
        }

        if rotated {
            if let Some(roll) = self.roll_alignment().correction(self.camera.up, self.eye) {
                self.camera.up = roll * self.camera.up;
            }
        }
        self.move_prev = self.move_curr;
    }

    fn roll_alignment(&self) -> RollAlignment {
        RollAlignment {
            axis: Vec3::from_array(self.options.align_axis),
            start_angle: self.options.align_start_angle,
            max_step: self.options.align_max_step,
            speed: self.options.align_speed,
        }
    }

    fn zoom_camera(&mut self, lens: Lens) {
        let factor = if self.state == ManipulationState::TouchZoomPan {
            if self.touch_zoom_distance_end < f32::EPSILON {
                return;
            }
            let factor = self.touch_zoom_distance_start / self.touch_zoom_distance_end;
            self.touch_zoom_distance_start = self.touch_zoom_distance_end;
            factor
        } else {
            let factor = 1.0 + (self.zoom_end.y - self.zoom_start.y) * self.options.zoom_speed;
            if self.options.static_moving {
                self.zoom_start = self.zoom_end;
            } else {
                self.zoom_start.y +=
                    (self.zoom_end.y - self.zoom_start.y) * self.options.damping_factor;
            }
            factor
        };

        if factor == 1.0 || factor <= 0.0 || !factor.is_finite() {
            return;
        }
        match lens {
            Lens::Dolly => self.eye *= factor,
            Lens::Scale => {
                if let Some(zoom) = self.camera.zoom() {
                    let zoom = (zoom / factor).clamp(self.options.min_zoom, self.options.max_zoom);
                    let _ = self.camera.set_zoom(zoom);
                    self.camera.update_projection_matrix();
                }
            }
            Lens::Unsupported => {}
        }
    }

    fn pan_camera(&mut self) {
        let change = self.pan_end - self.pan_start;
        if change.length_squared() == 0.0 {
            return;
        }
        let change = change * self.eye.length() * self.options.pan_speed;
        let up = self.camera.up.normalize_or_zero();
        let pan = self.eye.cross(up).normalize_or_zero() * change.x + up * change.y;
        self.camera.eye += pan;
        self.target += pan;

        if self.options.static_moving {
            self.pan_start = self.pan_end;
        } else {
            self.pan_start += (self.pan_end - self.pan_start) * self.options.damping_factor;
        }
    }

    fn check_distances(&mut self) {
        if !(self.options.enable_zoom || self.options.enable_pan) {
            return;
        }
        let distance_sq = self.eye.length_squared();
        let max = self.options.max_distance;
        let min = self.options.min_distance;
        if distance_sq > max * max {
            self.eye = self.eye.normalize_or_zero() * max;
            self.camera.eye = self.target + self.eye;
            self.zoom_start = self.zoom_end;
        }
        if distance_sq < min * min {
            self.eye = self.eye.normalize_or_zero() * min;
            self.camera.eye = self.target + self.eye;
            self.zoom_start = self.zoom_end;
        }
    }
}
