//! EGL display/context/surface acquisition and GL function loading.
//!
//! Both diagnostic programs need the same preamble before they can issue a
//! single GL call: connect to the default EGL display, pick an RGB888 +
//! depth-8 GLES2 config, create a context, create a surface, make it all
//! current, and load the GL entry points through `eglGetProcAddress`. This
//! module owns that sequence and hands back a ready [`glow::Context`].
//!
//! libEGL is loaded dynamically at startup, so a machine without a GLES
//! driver reports a clean acquisition error instead of a link failure.

use khronos_egl as egl;
use thiserror::Error;

/// The dynamically loaded EGL 1.4 entry points.
pub type EglInstance = egl::DynamicInstance<egl::EGL1_4>;

/// Default pbuffer surface width, in pixels.
pub const PBUFFER_WIDTH: i32 = 400;
/// Default pbuffer surface height, in pixels.
pub const PBUFFER_HEIGHT: i32 = 240;

/// A failed step of the acquisition sequence.
///
/// One variant per driver call, in call order. None of these are
/// recoverable for a one-shot diagnostic tool; callers print and exit.
#[derive(Debug, Error)]
pub enum ContextError {
    /// libEGL could not be loaded at all.
    #[error("cannot load libEGL: {0}")]
    Load(String),
    /// `eglGetDisplay` returned no display.
    #[error("no EGL display found")]
    NoDisplay,
    /// `eglInitialize` failed.
    #[error("eglInitialize failed: {0}")]
    Initialize(#[source] egl::Error),
    /// `eglChooseConfig` failed outright.
    #[error("eglChooseConfig failed: {0}")]
    ChooseConfig(#[source] egl::Error),
    /// `eglChooseConfig` succeeded but matched nothing.
    #[error("no EGL config matches RGB888/depth-8/GLES2")]
    NoConfig,
    /// `eglCreateContext` failed.
    #[error("eglCreateContext failed: {0}")]
    CreateContext(#[source] egl::Error),
    /// Pbuffer or window surface creation failed.
    #[error("EGL surface creation failed: {0}")]
    CreateSurface(#[source] egl::Error),
    /// `eglQuerySurface` failed.
    #[error("eglQuerySurface failed: {0}")]
    QuerySurface(#[source] egl::Error),
    /// `eglMakeCurrent` failed.
    #[error("eglMakeCurrent failed: {0}")]
    MakeCurrent(#[source] egl::Error),
    /// `eglSwapBuffers` failed.
    #[error("eglSwapBuffers failed: {0}")]
    SwapBuffers(#[source] egl::Error),
}

/// Config attributes shared by both programs: RGB888, depth 8, GLES2.
/// The surface-type bit differs per constructor.
fn config_attributes(surface_bit: egl::Int) -> [egl::Int; 13] {
    [
        egl::RED_SIZE,
        8,
        egl::GREEN_SIZE,
        8,
        egl::BLUE_SIZE,
        8,
        egl::SURFACE_TYPE,
        surface_bit,
        egl::RENDERABLE_TYPE,
        egl::OPENGL_ES2_BIT,
        egl::DEPTH_SIZE,
        8,
        egl::NONE,
    ]
}

/// An initialized GLES2 rendering context, current on the calling thread.
///
/// Owns the EGL display connection, context, and surface for the life of
/// the process; [`destroy`](Self::destroy) releases them in reverse
/// acquisition order.
pub struct GlesContext {
    egl: EglInstance,
    display: egl::Display,
    context: egl::Context,
    surface: egl::Surface,
    gl: glow::Context,
    egl_version: (i32, i32),
    width: i32,
    height: i32,
}

impl GlesContext {
    /// Acquire a context backed by an off-screen pbuffer surface
    /// (requested at 400×240, `EGL_LARGEST_PBUFFER`, so the driver may
    /// clamp it — check [`width`](Self::width)/[`height`](Self::height)).
    ///
    /// # Errors
    ///
    /// Returns the first acquisition step that failed.
    pub fn pbuffer() -> Result<Self, ContextError> {
        Self::acquire(SurfaceKind::Pbuffer)
    }

    /// Acquire a context backed by a back-buffered window surface on the
    /// platform's default native window.
    ///
    /// # Errors
    ///
    /// Returns the first acquisition step that failed.
    pub fn window() -> Result<Self, ContextError> {
        Self::acquire(SurfaceKind::Window)
    }

    fn acquire(kind: SurfaceKind) -> Result<Self, ContextError> {
        // SAFETY: loading libEGL has no preconditions beyond being on the
        // main program's thread of control; failure is reported, not UB.
        let egl = unsafe { EglInstance::load_required() }
            .map_err(|e| ContextError::Load(e.to_string()))?;

        // SAFETY: EGL_DEFAULT_DISPLAY is always a valid display id.
        let display = unsafe { egl.get_display(egl::DEFAULT_DISPLAY) }
            .ok_or(ContextError::NoDisplay)?;

        let egl_version = egl.initialize(display).map_err(ContextError::Initialize)?;

        let surface_bit = match kind {
            SurfaceKind::Pbuffer => egl::PBUFFER_BIT,
            SurfaceKind::Window => egl::WINDOW_BIT,
        };
        let config = egl
            .choose_first_config(display, &config_attributes(surface_bit))
            .map_err(ContextError::ChooseConfig)?
            .ok_or(ContextError::NoConfig)?;

        let context_attributes = [egl::CONTEXT_CLIENT_VERSION, 2, egl::NONE];
        let context = egl
            .create_context(display, config, None, &context_attributes)
            .map_err(ContextError::CreateContext)?;

        let surface = match kind {
            SurfaceKind::Pbuffer => {
                let attributes = [
                    egl::WIDTH,
                    PBUFFER_WIDTH,
                    egl::HEIGHT,
                    PBUFFER_HEIGHT,
                    egl::LARGEST_PBUFFER,
                    1,
                    egl::NONE,
                ];
                egl.create_pbuffer_surface(display, config, &attributes)
                    .map_err(ContextError::CreateSurface)?
            }
            SurfaceKind::Window => {
                let attributes = [egl::RENDER_BUFFER, egl::BACK_BUFFER, egl::NONE];
                // SAFETY: a null native window selects the platform's
                // default framebuffer window on the targeted embedded
                // platforms; if the platform rejects it we get an EGL
                // error, not UB.
                unsafe {
                    egl.create_window_surface(
                        display,
                        config,
                        std::ptr::null_mut(),
                        Some(&attributes),
                    )
                }
                .map_err(ContextError::CreateSurface)?
            }
        };

        let width = egl
            .query_surface(display, surface, egl::WIDTH)
            .map_err(ContextError::QuerySurface)?;
        let height = egl
            .query_surface(display, surface, egl::HEIGHT)
            .map_err(ContextError::QuerySurface)?;

        egl.make_current(display, Some(surface), Some(surface), Some(context))
            .map_err(ContextError::MakeCurrent)?;

        // SAFETY: the context is current on this thread, so the loader
        // resolves entry points for it.
        let gl = unsafe {
            glow::Context::from_loader_function(|name| {
                egl.get_proc_address(name)
                    .map_or(std::ptr::null(), |p| p as *const std::ffi::c_void)
            })
        };

        Ok(Self {
            egl,
            display,
            context,
            surface,
            gl,
            egl_version,
            width,
            height,
        })
    }

    /// The loaded GL entry points for this context.
    #[must_use]
    pub fn gl(&self) -> &glow::Context {
        &self.gl
    }

    /// EGL `(major, minor)` version reported by `eglInitialize`.
    #[must_use]
    pub fn egl_version(&self) -> (i32, i32) {
        self.egl_version
    }

    /// Surface width in pixels, as queried from the driver.
    #[must_use]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Surface height in pixels, as queried from the driver.
    #[must_use]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Query an EGL display string (`egl::VENDOR`, `egl::VERSION`,
    /// `egl::EXTENSIONS`). Returns an empty string if the driver has
    /// nothing to say.
    #[must_use]
    pub fn query_string(&self, name: egl::Int) -> String {
        self.egl
            .query_string(Some(self.display), name)
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Present the back buffer.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::SwapBuffers`] if the driver rejects the
    /// swap (lost surface).
    pub fn swap_buffers(&self) -> Result<(), ContextError> {
        self.egl
            .swap_buffers(self.display, self.surface)
            .map_err(ContextError::SwapBuffers)
    }

    /// Release the surface, context, and display connection in reverse
    /// acquisition order.
    ///
    /// Best effort: a failing release step is ignored, since the process
    /// is exiting anyway and the driver reclaims everything at
    /// disconnect.
    pub fn destroy(self) {
        let _ = self.egl.make_current(self.display, None, None, None);
        let _ = self.egl.destroy_surface(self.display, self.surface);
        let _ = self.egl.destroy_context(self.display, self.context);
        let _ = self.egl.terminate(self.display);
    }
}

/// Which kind of EGL surface to back the context with.
#[derive(Clone, Copy)]
enum SurfaceKind {
    Pbuffer,
    Window,
}
