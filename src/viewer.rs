//! Standalone viewer window backed by winit.
//!
//! Translates winit mouse, touch, wheel and keyboard events into
//! [`InputEvent`]s for the [`ViewerEngine`] and drives one controller
//! update per redraw.
//!
//! ```no_run
//! # use trussview::Viewer;
//! Viewer::builder()
//!     .with_path("models/frame.json")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use glam::Vec2;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseScrollDelta, Touch, TouchPhase, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::{Window, WindowId},
};

use crate::engine::{EngineRequest, ViewerEngine};
use crate::error::ViewerError;
use crate::input::{InputEvent, MouseButton, PointerId, PointerKind, WheelDeltaMode};
use crate::options::Options;

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    path: Option<PathBuf>,
    options: Option<Options>,
    title: String,
}

impl ViewerBuilder {
    /// Create a builder with sensible defaults (title "Trussview", no
    /// model, default options).
    fn new() -> Self {
        Self {
            path: None,
            options: None,
            title: "Trussview".into(),
        }
    }

    /// Set the model file to open on startup.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            path: self.path,
            options: self.options.unwrap_or_default(),
            title: self.title,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window that displays a structural model.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    path: Option<PathBuf>,
    options: Options,
    title: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Viewer`] if the event loop cannot be created
    /// or exits with an error.
    pub fn run(self) -> Result<(), ViewerError> {
        let event_loop =
            EventLoop::new().map_err(|e| ViewerError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            window: None,
            engine: None,
            path: self.path,
            options: Some(self.options),
            title: self.title,
            cursor: Vec2::ZERO,
            held_button: None,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| ViewerError::Viewer(e.to_string()))
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Internal winit application handler.
struct ViewerApp {
    window: Option<Arc<Window>>,
    engine: Option<ViewerEngine>,
    path: Option<PathBuf>,
    options: Option<Options>,
    title: String,
    /// Last cursor position; winit button events carry none.
    cursor: Vec2,
    /// Button that opened the current mouse gesture.
    held_button: Option<winit::event::MouseButton>,
}

impl ViewerApp {
    fn dispatch(&mut self, event: &InputEvent) {
        let Some(engine) = &mut self.engine else {
            return;
        };
        if let Some(EngineRequest::OpenModel) = engine.handle_input(event) {
            open_model_dialog(engine);
        }
    }
}

fn open_model_dialog(engine: &mut ViewerEngine) {
    let Some(path) = rfd::FileDialog::new()
        .add_filter("Structural model", &["json"])
        .pick_file()
    else {
        return;
    };
    if let Err(e) = engine.load_path(&path) {
        log::error!("Failed to load {}: {e}", path.display());
    }
}

/// Wheel delta in the controller's convention (positive scrolls down,
/// zooming out).
fn wheel_event(delta: MouseScrollDelta) -> InputEvent {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => InputEvent::Wheel {
            delta_y: -y,
            mode: WheelDeltaMode::Line,
        },
        MouseScrollDelta::PixelDelta(pos) => InputEvent::Wheel {
            delta_y: -pos.y as f32,
            mode: WheelDeltaMode::Pixel,
        },
    }
}

/// The mouse is a single pointer: only the first pressed button starts a
/// gesture and only its release ends it. Chorded buttons are dropped.
fn mouse_button_event(
    held: &mut Option<winit::event::MouseButton>,
    button: winit::event::MouseButton,
    state: ElementState,
    position: Vec2,
) -> Option<InputEvent> {
    match state {
        ElementState::Pressed => {
            if held.is_some() {
                return None;
            }
            *held = Some(button);
            Some(InputEvent::PointerDown {
                id: PointerId::MOUSE,
                kind: PointerKind::Mouse,
                button: MouseButton::from(button),
                position,
            })
        }
        ElementState::Released => {
            if *held != Some(button) {
                return None;
            }
            *held = None;
            Some(InputEvent::PointerUp {
                id: PointerId::MOUSE,
                kind: PointerKind::Mouse,
                position,
            })
        }
    }
}

fn touch_event(phase: TouchPhase, id: u64, position: Vec2) -> InputEvent {
    let id = PointerId::touch(id);
    let kind = PointerKind::Touch;
    match phase {
        TouchPhase::Started => InputEvent::PointerDown {
            id,
            kind,
            button: MouseButton::Left,
            position,
        },
        TouchPhase::Moved => InputEvent::PointerMove { id, kind, position },
        TouchPhase::Ended => InputEvent::PointerUp { id, kind, position },
        TouchPhase::Cancelled => InputEvent::PointerCancel { id },
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title(&self.title)
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 800));
        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let inner = window.inner_size();
        let size = (inner.width.max(1), inner.height.max(1));
        let options = self.options.take().unwrap_or_default();
        let mut engine = match pollster::block_on(ViewerEngine::new(
            window.clone(),
            size,
            options,
        )) {
            Ok(e) => e,
            Err(e) => {
                log::error!("Failed to initialize engine: {e}");
                event_loop.exit();
                return;
            }
        };

        if let Some(path) = self.path.take() {
            if let Err(e) = engine.load_path(&path) {
                log::error!("Failed to load {}: {e}", path.display());
            }
        }

        window.request_redraw();
        self.window = Some(window);
        self.engine = Some(engine);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            event_loop.exit();
            return;
        }

        // Guard: both window and engine must be initialised.
        if self.window.is_none() || self.engine.is_none() {
            return;
        }

        match event {
            WindowEvent::Resized(size) => {
                if let Some(engine) = &mut self.engine {
                    engine.resize(size.width, size.height);
                }
            }

            WindowEvent::RedrawRequested => {
                if let Some(engine) = &mut self.engine {
                    if engine.update() {
                        match engine.render() {
                            Ok(()) => {}
                            Err(
                                wgpu::SurfaceError::Outdated
                                | wgpu::SurfaceError::Lost,
                            ) => engine.recover_surface(),
                            Err(e) => log::error!("render error: {e:?}"),
                        }
                    }
                }
                if let Some(w) = &self.window {
                    w.request_redraw();
                }
            }

            WindowEvent::MouseInput { button, state, .. } => {
                if let Some(event) =
                    mouse_button_event(&mut self.held_button, button, state, self.cursor)
                {
                    self.dispatch(&event);
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Vec2::new(position.x as f32, position.y as f32);
                self.dispatch(&InputEvent::PointerMove {
                    id: PointerId::MOUSE,
                    kind: PointerKind::Mouse,
                    position: self.cursor,
                });
            }

            WindowEvent::MouseWheel { delta, .. } => {
                self.dispatch(&wheel_event(delta));
            }

            WindowEvent::Touch(Touch {
                phase, location, id, ..
            }) => {
                let position = Vec2::new(location.x as f32, location.y as f32);
                self.dispatch(&touch_event(phase, id, position));
            }

            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                let code = format!("{code:?}");
                let event = match event.state {
                    ElementState::Pressed if event.repeat => return,
                    ElementState::Pressed => InputEvent::KeyDown { code },
                    ElementState::Released => InputEvent::KeyUp { code },
                };
                self.dispatch(&event);
            }

            _ => (),
        }
    }
}

#[cfg(test)]
mod tests {
    use winit::dpi::PhysicalPosition;

    use super::*;

    #[test]
    fn wheel_down_is_positive() {
        assert_eq!(
            wheel_event(MouseScrollDelta::LineDelta(0.0, -2.0)),
            InputEvent::Wheel {
                delta_y: 2.0,
                mode: WheelDeltaMode::Line
            }
        );
        assert_eq!(
            wheel_event(MouseScrollDelta::PixelDelta(PhysicalPosition::new(
                0.0, 30.0
            ))),
            InputEvent::Wheel {
                delta_y: -30.0,
                mode: WheelDeltaMode::Pixel
            }
        );
    }

    #[test]
    fn chorded_buttons_do_not_split_the_gesture() {
        use winit::event::MouseButton as WinitButton;

        let mut held = None;
        let at = Vec2::new(5.0, 6.0);
        let down = mouse_button_event(&mut held, WinitButton::Left, ElementState::Pressed, at);
        assert!(matches!(
            down,
            Some(InputEvent::PointerDown {
                button: MouseButton::Left,
                ..
            })
        ));

        // Second button pressed and released mid-drag: ignored.
        assert_eq!(
            mouse_button_event(&mut held, WinitButton::Right, ElementState::Pressed, at),
            None
        );
        assert_eq!(
            mouse_button_event(&mut held, WinitButton::Right, ElementState::Released, at),
            None
        );

        assert_eq!(
            mouse_button_event(&mut held, WinitButton::Left, ElementState::Released, at),
            Some(InputEvent::PointerUp {
                id: PointerId::MOUSE,
                kind: PointerKind::Mouse,
                position: at
            })
        );
        assert_eq!(held, None);
    }

    #[test]
    fn touch_ids_never_collide_with_the_mouse() {
        let event = touch_event(TouchPhase::Started, 0, Vec2::ZERO);
        let InputEvent::PointerDown { id, kind, .. } = event else {
            panic!("expected pointer down, got {event:?}");
        };
        assert_ne!(id, PointerId::MOUSE);
        assert_eq!(kind, PointerKind::Touch);
        assert_eq!(
            touch_event(TouchPhase::Cancelled, 0, Vec2::ZERO),
            InputEvent::PointerCancel { id }
        );
    }
}
