//! Smoke tests for EGL/OpenGL ES 2.0 driver bring-up.
//!
//! This crate backs two small diagnostic binaries that exercise a GLES2
//! pipeline end to end through [glow], loading libEGL dynamically via
//! [khronos-egl]:
//!
//! - **`shader-check`** compiles and links a pair of externally supplied
//!   vertex/fragment shader files against the real driver and prints the
//!   driver's diagnostic log on failure.
//! - **`spin-cube`** renders five frames of a rotating six-face cube to a
//!   window surface, exercising buffer upload, attribute binding, matrix
//!   uniforms, draw calls, and buffer swaps.
//!
//! The library side carries the pieces worth reusing and testing: the 4×4
//! transform math in [`transform`], the interleaved vertex packing in
//! [`types`], the cube data and per-frame animation in [`cube`], and the
//! EGL acquisition sequence in [`context`]. Everything is single-threaded
//! and one-shot: each driver call is checked once and failures are fatal,
//! which is the right shape for a diagnostic tool (no retries that would
//! mask a flaky driver).
//!
//! # Safety
//!
//! Functions that issue raw GL calls are `unsafe` and require a valid,
//! current GL context, which [`context::GlesContext`] provides.
//!
//! [glow]: https://docs.rs/glow
//! [khronos-egl]: https://docs.rs/khronos-egl

pub mod context;
pub mod cube;
pub mod shaders;
pub mod transform;
pub mod types;

pub use context::{ContextError, GlesContext};
pub use cube::{frame_matrices, FrameMatrices};
pub use transform::{FrustumError, Matrix4};
pub use types::{interleave, CubeVertex};
