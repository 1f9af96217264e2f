use std::ffi::CString;
use std::num::NonZeroU32;
use std::time::Instant;

use glutin::config::{Config as GlutinConfig, ConfigTemplateBuilder};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile, PossiblyCurrentContext, Version,
};
use glutin::display::GetGlDisplay;
use glutin::prelude::*;
use glutin::surface::{Surface, SurfaceAttributesBuilder, SwapInterval, WindowSurface};

use glutin_winit::DisplayBuilder;

use raw_window_handle::HasRawWindowHandle;

use thiserror::Error;

use winit::dpi::LogicalSize;
use winit::event::{Event, StartCause, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::{Window, WindowBuilder};

use gl_wrapper::geometry::{GBError, Geometry, GeometryBuilder, Primitive, VertexAttribute};
use gl_wrapper::renderer::GlInfo;
use gl_wrapper::QUAD;

use crate::config::Config;
use crate::frame::FrameState;
use crate::input::{self, ExitStatus, InputAction};
use crate::loader::{self, LoadError, ShaderProgram};
use crate::renderer::FrameRenderer;

pub struct App {
    event_loop: EventLoop<()>,
    gl_context: PossiblyCurrentContext,
    gl_window: GlWindow,
    config: Config,
    shader: ShaderProgram,
    quad: Geometry,
    renderer: FrameRenderer,
    frame: FrameState,
}

impl App {
    pub fn new(config: Config) -> Result<Self, AppError> {
        let event_loop = EventLoop::new();
        let window_builder = WindowBuilder::new()
            .with_inner_size(LogicalSize::new(config.width, config.height))
            .with_resizable(false)
            .with_title(&config.title);
        let display_builder = DisplayBuilder::new().with_window_builder(Some(window_builder));
        let template = ConfigTemplateBuilder::new();

        let (window, gl_config) = display_builder
            .build(&event_loop, template, |configs| {
                match pick_config(configs, |c| c.num_samples()) {
                    Some(config) => config,
                    None => {
                        // the picker must return a config, so there is no error to hand back
                        tracing::error!("Display offered no GL configs");
                        std::process::exit(ExitStatus::Failure.code());
                    }
                }
            })
            .map_err(|e| AppError::Display(e.to_string()))?;

        let window = window.ok_or(AppError::NoWindow)?;
        let handle = window.raw_window_handle();
        let gl_display = gl_config.display();

        let (major, minor) = config.gl_version;
        let context_attr = ContextAttributesBuilder::new()
            .with_profile(GlProfile::Core)
            .with_context_api(ContextApi::OpenGl(Some(Version::new(major, minor))))
            .build(Some(handle));

        let gl_window = GlWindow::new(window, &gl_config)?;

        let gl_context = unsafe { gl_display.create_context(&gl_config, &context_attr)? }
            .make_current(&gl_window.surface)?;

        gl::load_with(|s| match CString::new(s) {
            Ok(name) => gl_display.get_proc_address(name.as_c_str()).cast(),
            Err(_) => std::ptr::null(),
        });

        if config.vsync {
            if let Err(e) = gl_window
                .surface
                .set_swap_interval(&gl_context, SwapInterval::Wait(NonZeroU32::MIN))
            {
                tracing::warn!("Unable to use VSync: {e}");
            }
        }

        let info = GlInfo::query();
        tracing::info!(
            renderer = %info.renderer,
            version = %info.version,
            glsl = %info.shading_language_version,
            "created GL context"
        );

        let (width, height): (u32, u32) = gl_window.window.inner_size().into();
        let renderer = FrameRenderer::new(width, height);

        let shader = loader::load_and_link(&config.vertex_path, &config.fragment_path)?;

        let quad = GeometryBuilder::new(&QUAD)
            .with_attribute_at(shader.bindings.position, VertexAttribute::Vec2)
            .with_primitive(Primitive::TriangleStrip)
            .build()?;

        let frame = FrameState::new(config.resolution(), Instant::now());

        Ok(Self {
            event_loop,
            gl_context,
            gl_window,
            config,
            shader,
            quad,
            renderer,
            frame,
        })
    }

    pub fn run(mut self) -> ! {
        let logical_size = self.config.logical_size();

        self.event_loop
            .run(move |event, _window_target, control_flow| match event {
                Event::NewEvents(StartCause::Init) => control_flow.set_poll(),
                Event::WindowEvent { event, .. } => {
                    let action = match event {
                        WindowEvent::CloseRequested => input::close_action(),
                        WindowEvent::KeyboardInput { input: key, .. } => {
                            input::key_action(key.virtual_keycode)
                        }
                        WindowEvent::CursorMoved { position, .. } => {
                            let scale = self.gl_window.window.scale_factor();
                            let position = position.to_logical::<f64>(scale);
                            self.frame.move_mouse(position.x, position.y, logical_size);
                            InputAction::Continue
                        }
                        _ => InputAction::Continue,
                    };

                    if let InputAction::Exit(status) = action {
                        tracing::debug!(?status, "exit requested");
                        control_flow.set_exit_with_code(status.code());
                    }
                }
                Event::MainEventsCleared => {
                    if let ControlFlow::ExitWithCode(_) = control_flow {
                        return;
                    }

                    self.frame.update_time(Instant::now());
                    self.renderer
                        .render_frame(&mut self.shader, &self.quad, &mut self.frame);

                    if let Err(e) = self.gl_window.surface.swap_buffers(&self.gl_context) {
                        tracing::error!("Could not present frame: {e}");
                        control_flow.set_exit_with_code(ExitStatus::Failure.code());
                    }
                }
                _ => (),
            })
    }
}

/// Prefers the config with the most samples; the first one wins ties.
fn pick_config<T>(configs: impl Iterator<Item = T>, samples: impl Fn(&T) -> u8) -> Option<T> {
    configs.reduce(|best, next| {
        if samples(&next) > samples(&best) {
            next
        } else {
            best
        }
    })
}

pub struct GlWindow {
    // XXX the surface must be dropped before the window.
    pub surface: Surface<WindowSurface>,
    pub window: Window,
}

impl GlWindow {
    pub fn new(window: Window, config: &GlutinConfig) -> Result<Self, AppError> {
        let (width, height): (u32, u32) = window.inner_size().into();
        let raw_window_handle = window.raw_window_handle();
        let attrs = SurfaceAttributesBuilder::<WindowSurface>::new().build(
            raw_window_handle,
            NonZeroU32::new(width).ok_or(AppError::ZeroSizedWindow)?,
            NonZeroU32::new(height).ok_or(AppError::ZeroSizedWindow)?,
        );

        let surface = unsafe { config.display().create_window_surface(config, &attrs)? };

        Ok(Self { surface, window })
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Could not create window: {0}")]
    Display(String),
    #[error("Display did not create a window")]
    NoWindow,
    #[error("Window has a zero-sized surface")]
    ZeroSizedWindow,
    #[error("GL context error: {0}")]
    Context(#[from] glutin::error::Error),
    #[error(transparent)]
    Shader(#[from] LoadError),
    #[error("Could not build quad: {0}")]
    Geometry(#[from] GBError),
}
