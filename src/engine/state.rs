//! Window-independent viewer state: options, input surface, controller and
//! scene, plus the key-binding dispatch between them.

use glam::Vec3;

use crate::camera::Camera;
use crate::controls::{ControlEvent, ScreenRect, TrackballControls};
use crate::input::{InputEvent, InputSurface, KeyAction};
use crate::model::Construction;
use crate::options::Options;
use crate::scene::Scene;

use super::home::{home_camera, switch_projection};

/// Something the host has to do on the engine's behalf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineRequest {
    /// Ask the user for a model file and pass it to
    /// [`ViewerState::load_construction`].
    OpenModel,
}

/// Everything the viewer tracks apart from GPU resources.
#[derive(Debug)]
pub struct ViewerState {
    options: Options,
    surface: InputSurface,
    controls: TrackballControls,
    scene: Scene,
    size: (u32, u32),
    needs_redraw: bool,
}

impl ViewerState {
    /// Empty scene and a home camera for a `width` x `height` viewport.
    #[must_use]
    pub fn new(options: Options, width: u32, height: u32) -> Self {
        let mut surface = InputSurface::new();
        let scene = Scene::new();
        let (camera, target) = home_camera(
            &scene.construction().geometry,
            &options.camera,
            aspect(width, height),
        );
        let mut controls =
            TrackballControls::new(camera, target, options.controls.clone(), &mut surface);
        controls.handle_resize(screen(width, height));
        Self {
            options,
            surface,
            controls,
            scene,
            size: (width, height),
            needs_redraw: true,
        }
    }

    /// Options in effect.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The trackball controller (and through it the camera).
    #[must_use]
    pub fn controls(&self) -> &TrackballControls {
        &self.controls
    }

    /// The listener registry the controller subscribes on.
    #[must_use]
    pub fn surface(&self) -> &InputSurface {
        &self.surface
    }

    /// The scene.
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Mutable scene access for uploads.
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// Replace the model, frame it, and rebuild the controller around the
    /// new home camera.
    pub fn load_construction(&mut self, construction: Construction) {
        let (camera, target) = home_camera(
            &construction.geometry,
            &self.options.camera,
            aspect(self.size.0, self.size.1),
        );
        self.scene.set_construction(construction, &self.options.display);
        self.replace_controls(camera, target);
    }

    fn replace_controls(&mut self, camera: Camera, target: Vec3) {
        self.controls.dispose(&mut self.surface);
        let mut controls = TrackballControls::new(
            camera,
            target,
            self.options.controls.clone(),
            &mut self.surface,
        );
        controls.handle_resize(screen(self.size.0, self.size.1));
        self.controls = controls;
        self.needs_redraw = true;
    }

    /// Track a new viewport size. Zero-sized dimensions are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.size = (width, height);
        self.controls.camera_mut().set_aspect(aspect(width, height));
        self.controls.handle_resize(screen(width, height));
        self.needs_redraw = true;
    }

    /// Route an input event to the controller, then to the key bindings.
    ///
    /// Returns a request when a binding needs host cooperation.
    pub fn handle_input(&mut self, event: &InputEvent) -> Option<EngineRequest> {
        if self.surface.is_listening(event.channel()) {
            let _ = self.controls.handle_event(&mut self.surface, event);
        }
        match event {
            InputEvent::KeyDown { code } => {
                let action = self.options.keybindings.lookup(code)?;
                self.apply_action(action)
            }
            _ => None,
        }
    }

    /// Perform a bound action.
    pub fn apply_action(&mut self, action: KeyAction) -> Option<EngineRequest> {
        log::debug!("Key action {action:?}");
        match action {
            KeyAction::ResetCamera => self.controls.reset(),
            KeyAction::OpenModel => return Some(EngineRequest::OpenModel),
            KeyAction::ToggleAxes => {
                self.options.display.show_axes = !self.options.display.show_axes;
                self.scene.rebuild(&self.options.display);
            }
            KeyAction::ToggleNodes => {
                self.options.display.show_nodes = !self.options.display.show_nodes;
                self.scene.rebuild(&self.options.display);
            }
            KeyAction::ToggleProjection => {
                let kind = self.options.camera.projection.toggled();
                self.options.camera.projection = kind;
                let camera = switch_projection(self.controls.camera(), kind, &self.options.camera);
                let target = self.controls.target();
                self.replace_controls(camera, target);
            }
        }
        self.needs_redraw = true;
        None
    }

    /// Run the controller once and collect its notifications.
    ///
    /// Returns `true` when the frame needs to be redrawn.
    pub fn update(&mut self) -> bool {
        self.controls.update();
        for event in self.controls.drain_events() {
            match event {
                ControlEvent::Change => self.needs_redraw = true,
                ControlEvent::Start => log::trace!("Gesture start: {:?}", self.controls.state()),
                ControlEvent::End => log::trace!("Gesture end"),
            }
        }
        self.needs_redraw || self.scene.is_dirty()
    }

    /// Clear the redraw flag after presenting a frame.
    pub fn mark_drawn(&mut self) {
        self.needs_redraw = false;
    }
}

fn aspect(width: u32, height: u32) -> f32 {
    width.max(1) as f32 / height.max(1) as f32
}

fn screen(width: u32, height: u32) -> ScreenRect {
    ScreenRect::from_size(width as f32, height as f32)
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::controls::ManipulationState;
    use crate::input::{Channel, MouseButton, PointerId, PointerKind};
    use crate::options::ProjectionKind;

    fn model() -> Construction {
        Construction::from_json_str(
            r#"{ "Geometry": {
                "Nodes": [
                    { "Id": 1, "X": 0, "Y": 0, "Z": 0 },
                    { "Id": 2, "X": 10, "Y": 0, "Z": 0 },
                    { "Id": 3, "X": 10, "Y": 0, "Z": 5 }
                ],
                "Members": [
                    { "Id": 1, "Node1Id": 1, "Node2Id": 2 },
                    { "Id": 2, "Node1Id": 2, "Node2Id": 3 }
                ] } }"#,
        )
        .unwrap()
    }

    fn key(code: &str) -> InputEvent {
        InputEvent::KeyDown { code: code.into() }
    }

    #[test]
    fn loading_a_model_rebuilds_controls_on_its_center() {
        let mut state = ViewerState::new(Options::default(), 800, 600);
        let listeners = state.surface().listener_count();
        state.load_construction(model());

        assert_eq!(state.controls().target(), Vec3::new(5.0, 0.0, 2.5));
        assert_eq!(state.scene().stats().members_drawn, 2);
        // The old controller's listeners were released.
        assert_eq!(state.surface().listener_count(), listeners);
    }

    #[test]
    fn model_load_during_drag_releases_drag_listeners() {
        let mut state = ViewerState::new(Options::default(), 800, 600);
        let _ = state.handle_input(&InputEvent::PointerDown {
            id: PointerId::MOUSE,
            kind: PointerKind::Mouse,
            button: MouseButton::Left,
            position: Vec2::new(10.0, 10.0),
        });
        assert!(state.surface().is_listening(Channel::PointerMove));

        state.load_construction(model());
        assert!(!state.surface().is_listening(Channel::PointerMove));
        assert_eq!(state.surface().captured_pointer(), None);
        assert_eq!(state.controls().state(), ManipulationState::None);
    }

    #[test]
    fn bindings_toggle_display_and_request_open() {
        let mut state = ViewerState::new(Options::default(), 800, 600);
        state.load_construction(model());
        let with_axes = state.scene().vertices().len();

        assert_eq!(state.handle_input(&key("KeyX")), None);
        assert!(!state.options().display.show_axes);
        assert_eq!(state.scene().vertices().len(), with_axes - 6);

        assert_eq!(state.handle_input(&key("KeyO")), Some(EngineRequest::OpenModel));
    }

    #[test]
    fn projection_toggle_keeps_the_pose() {
        let mut state = ViewerState::new(Options::default(), 800, 600);
        state.load_construction(model());
        let eye = state.controls().camera().eye;

        let _ = state.handle_input(&key("KeyP"));
        assert_eq!(state.options().camera.projection, ProjectionKind::Orthographic);
        assert_eq!(state.controls().camera().eye, eye);
        assert!(state.controls().camera().zoom().is_some());
    }

    #[test]
    fn update_reports_redraw_until_marked() {
        let mut state = ViewerState::new(Options::default(), 800, 600);
        assert!(state.update());
        state.mark_drawn();
        assert!(!state.update());

        let _ = state.handle_input(&InputEvent::Wheel {
            delta_y: 120.0,
            mode: crate::input::WheelDeltaMode::Pixel,
        });
        assert!(state.update());
    }
}
