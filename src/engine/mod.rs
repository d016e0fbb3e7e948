//! Viewer engine: owns the GPU context, the line renderer and the
//! window-independent [`ViewerState`].
//!
//! Per frame the host calls [`ViewerEngine::update`] once (runs the
//! controller, collects its change notifications) and then
//! [`ViewerEngine::render`] when something changed.

mod home;
mod state;

use std::path::Path;

pub use self::home::{home_camera, switch_projection};
pub use self::state::{EngineRequest, ViewerState};
use crate::error::ViewerError;
use crate::gpu::render_context::RenderContext;
use crate::input::InputEvent;
use crate::model::Construction;
use crate::options::Options;
use crate::renderer::LineRenderer;

/// GPU-backed viewer: render context, line renderer and viewer state.
pub struct ViewerEngine {
    context: RenderContext,
    renderer: LineRenderer,
    state: ViewerState,
}

impl ViewerEngine {
    /// Initialize the GPU for `window` and create an empty viewer.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Gpu`] if the render context cannot be
    /// created.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
        options: Options,
    ) -> Result<Self, ViewerError> {
        let context = RenderContext::new(window, size).await?;
        let renderer = LineRenderer::new(&context);
        let state = ViewerState::new(options, size.0, size.1);
        Ok(Self {
            context,
            renderer,
            state,
        })
    }

    /// Viewer state (options, controls, scene).
    #[must_use]
    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    /// Replace the displayed model.
    pub fn load_construction(&mut self, construction: Construction) {
        self.state.load_construction(construction);
    }

    /// Load a model file and display it.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::ModelLoad`] or [`ViewerError::ModelParse`]; the
    /// current model stays on screen.
    pub fn load_path(&mut self, path: &Path) -> Result<(), ViewerError> {
        let construction = Construction::load(path)?;
        self.load_construction(construction);
        Ok(())
    }

    /// Forward an input event. See [`ViewerState::handle_input`].
    pub fn handle_input(&mut self, event: &InputEvent) -> Option<EngineRequest> {
        self.state.handle_input(event)
    }

    /// Reconfigure the surface and depth target for a new size.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.context.resize(width, height);
        self.renderer.resize(&self.context);
        self.state.resize(width, height);
    }

    /// Advance the controller one frame. Returns `true` if a redraw is
    /// needed.
    pub fn update(&mut self) -> bool {
        self.state.update()
    }

    /// Draw the current frame.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] if the swapchain texture cannot be
    /// acquired.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        self.renderer
            .sync_scene(&self.context, self.state.scene_mut());
        self.renderer
            .update_camera(&self.context.queue, self.state.controls().camera());

        let frame = self.context.get_next_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        self.renderer.render(
            &self.context,
            &view,
            self.state.options().display.background,
        );
        frame.present();
        self.state.mark_drawn();
        Ok(())
    }

    /// Reconfigure after a lost or outdated surface.
    pub fn recover_surface(&mut self) {
        let (width, height) = self.context.size();
        self.context.resize(width, height);
    }
}
