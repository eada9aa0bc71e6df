use std::num::NonZeroU32;

use anyhow::Context as _;
use glutin::config::{ Config, ConfigTemplateBuilder };
use glutin::context::{ ContextApi, ContextAttributesBuilder, PossiblyCurrentContext, Version };
use glutin::display::{ Display, DisplayApiPreference, GetGlDisplay };
use glutin::prelude::*;
use glutin::surface::{ Surface, SurfaceAttributesBuilder, SwapInterval, WindowSurface };
use raw_window_handle::{ HasDisplayHandle, HasWindowHandle, RawWindowHandle };
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ ActiveEventLoop, EventLoop };
use winit::window::{ Window, WindowId };

use torus_gl::engine::config::{ ViewerConfig, WindowConfig };
use torus_gl::engine::error::RenderError;
use torus_gl::engine::logging::{ init_logging, LoggingConfig };
use torus_gl::engine::rendering::GlowBackend;
use torus_gl::Program;

struct GlWindow {
    window: Window,
    context: PossiblyCurrentContext,
    surface: Surface<WindowSurface>,
}

fn unavailable(e: impl std::fmt::Display) -> RenderError {
    RenderError::ContextUnavailable(e.to_string())
}

#[cfg(target_os = "macos")]
fn display_api_preference(_window: Option<RawWindowHandle>) -> DisplayApiPreference {
    DisplayApiPreference::Cgl
}

#[cfg(target_os = "windows")]
fn display_api_preference(window: Option<RawWindowHandle>) -> DisplayApiPreference {
    DisplayApiPreference::WglThenEgl(window)
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn display_api_preference(_window: Option<RawWindowHandle>) -> DisplayApiPreference {
    DisplayApiPreference::EglThenGlx(Box::new(winit::platform::x11::register_xlib_error_hook))
}

/// Deepest depth buffer wins; ties keep the earlier candidate.
fn deepest<T>(candidates: impl Iterator<Item = T>, depth: impl Fn(&T) -> u8) -> Option<T> {
    candidates.reduce(|best, c| if depth(&c) > depth(&best) { c } else { best })
}

fn create_gl_window(
    event_loop: &ActiveEventLoop,
    config: &WindowConfig
) -> Result<(GlWindow, glow::Context), RenderError> {
    let window_attributes = Window::default_attributes()
        .with_title(config.title.clone())
        .with_inner_size(PhysicalSize::new(config.width, config.height));

    // WGL needs the window before the display; elsewhere the chosen config
    // decides the window's visual, so the window comes last.
    #[cfg(target_os = "windows")]
    let early_window = Some(event_loop.create_window(window_attributes.clone()).map_err(unavailable)?);
    #[cfg(not(target_os = "windows"))]
    let early_window: Option<Window> = None;
    let early_handle = match &early_window {
        Some(window) => Some(window.window_handle().map_err(unavailable)?.as_raw()),
        None => None,
    };

    let display_handle = event_loop.display_handle().map_err(unavailable)?.as_raw();
    let preference = display_api_preference(early_handle);
    let display = unsafe { Display::new(display_handle, preference) }.map_err(unavailable)?;

    let mut template = ConfigTemplateBuilder::new().with_depth_size(24);
    if let Some(handle) = early_handle {
        template = template.compatible_with_native_window(handle);
    }
    let configs = unsafe { display.find_configs(template.build()) }.map_err(unavailable)?;
    let gl_config = deepest(configs, |c: &Config| c.depth_size())
        .ok_or_else(|| unavailable("no OpenGL config with a depth buffer"))?;

    let window = match early_window {
        Some(window) => window,
        None =>
            glutin_winit
                ::finalize_window(event_loop, window_attributes, &gl_config)
                .map_err(unavailable)?,
    };
    let raw_handle = window.window_handle().map_err(unavailable)?.as_raw();

    let display = gl_config.display();
    let ctx_attrs = ContextAttributesBuilder::new()
        .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
        .build(Some(raw_handle));
    let not_current = unsafe { display.create_context(&gl_config, &ctx_attrs) }.map_err(unavailable)?;

    let size = window.inner_size();
    let attrs = SurfaceAttributesBuilder::<WindowSurface>
        ::new()
        .build(
            raw_handle,
            NonZeroU32::new(size.width).unwrap_or(NonZeroU32::MIN),
            NonZeroU32::new(size.height).unwrap_or(NonZeroU32::MIN)
        );
    let surface = unsafe { display.create_window_surface(&gl_config, &attrs) }.map_err(unavailable)?;
    let context = not_current.make_current(&surface).map_err(unavailable)?;

    if let Err(e) = surface.set_swap_interval(&context, SwapInterval::Wait(NonZeroU32::MIN)) {
        log::warn!("could not enable vsync: {}", e);
    }

    let gl = unsafe {
        glow::Context::from_loader_function_cstr(|s| display.get_proc_address(s) as *const _)
    };
    log::info!("created {}x{} OpenGL window", size.width, size.height);

    Ok((GlWindow { window, context, surface }, gl))
}

struct App {
    config: ViewerConfig,
    runtime: tokio::runtime::Runtime,
    gl_window: Option<GlWindow>,
    program: Option<Program<GlowBackend>>,
    error: Option<RenderError>,
}

impl App {
    fn new(config: ViewerConfig, runtime: tokio::runtime::Runtime) -> Self {
        Self {
            config,
            runtime,
            gl_window: None,
            program: None,
            error: None,
        }
    }

    fn initialize(&mut self, event_loop: &ActiveEventLoop) -> Result<(), RenderError> {
        let (gl_window, gl) = create_gl_window(event_loop, &self.config.window)?;
        // Keep the window so the context outlives a half-built program.
        let gl_window = self.gl_window.insert(gl_window);

        let program = Program::new(GlowBackend::new(gl), &self.config, self.runtime.handle())?;
        self.program = Some(program);

        gl_window.window.request_redraw();
        Ok(())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gl_window.is_some() {
            return;
        }

        if let Err(e) = self.initialize(event_loop) {
            log::error!("{}", e);
            self.error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::RedrawRequested => {
                if let (Some(gl_window), Some(program)) = (&self.gl_window, &mut self.program) {
                    let size = gl_window.window.inner_size();
                    program.render(size.width, size.height);

                    if let Err(e) = gl_window.surface.swap_buffers(&gl_window.context) {
                        log::error!("swap_buffers failed: {}", e);
                    }
                    gl_window.window.request_redraw();
                }
            }

            WindowEvent::Resized(size) => {
                if let Some(gl_window) = &self.gl_window {
                    if let (Some(w), Some(h)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) {
                        gl_window.surface.resize(&gl_window.context, w, h);
                    }
                    gl_window.window.request_redraw();
                }
            }

            _ => {}
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        if let Some(p) = &self.program {
            p.cleanup();
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    let config = ViewerConfig::from_env().context("loading viewer config")?;
    let runtime = tokio::runtime::Runtime::new().context("starting texture loader runtime")?;

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            let error = unavailable(e);
            log::error!("{}", error);
            eprintln!("{}", error.user_message());
            std::process::exit(1);
        }
    };

    let mut app = App::new(config, runtime);
    event_loop.run_app(&mut app)?;

    if let Some(error) = app.error.take() {
        eprintln!("{}", error.user_message());
        drop(app);
        std::process::exit(1);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_candidates_means_no_config() {
        assert_eq!(deepest(std::iter::empty::<u8>(), |d| *d), None);
    }

    #[test]
    fn deepest_candidate_wins() {
        let picked = deepest([(1, 16), (2, 24), (3, 0)].into_iter(), |c| c.1);
        assert_eq!(picked, Some((2, 24)));
    }

    #[test]
    fn ties_keep_the_first_candidate() {
        let picked = deepest([(1, 24), (2, 24)].into_iter(), |c| c.1);
        assert_eq!(picked, Some((1, 24)));
    }

    #[test]
    fn context_failure_report_is_the_apology() {
        let report = unavailable("EGL_NOT_INITIALIZED").user_message();
        assert_eq!(report, "Sorry, could not get a graphics context.");
    }
}
