//! Render five frames of a rotating six-face cube to a window surface.
//!
//! Takes no arguments. Prints the EGL/GL identification banner and a frame
//! counter to stdout, presents each frame with a buffer swap, and exits 0.
//! Any driver failure is fatal and exits with the `-1` family code (255).

use std::process::ExitCode;

use glow::HasContext;
use khronos_egl as egl;
use thiserror::Error;

use gles_smoke::cube::{self, FACE_COUNT, FRAME_COUNT, VERTICES_PER_FACE};
use gles_smoke::shaders::{self, ProgramError};
use gles_smoke::types::{COLOR_OFFSET, VERTEX_STRIDE};
use gles_smoke::{ContextError, GlesContext};

/// Exit code for driver-level failures, mirroring a C `return -1`.
const DRIVER_FAILURE: u8 = 255;

#[derive(Debug, Error)]
enum DemoError {
    #[error(transparent)]
    Context(#[from] ContextError),
    #[error(transparent)]
    Program(#[from] ProgramError),
    #[error("failed to create vertex buffer: {0}")]
    CreateBuffer(String),
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(DemoError::Program(ProgramError::Stage(e))) => {
            println!("Error: {} failed!:", e.stage);
            if !e.log.is_empty() {
                print!("{}", e.log);
            }
            ExitCode::from(DRIVER_FAILURE)
        }
        Err(e) => {
            println!("Error: {e}");
            ExitCode::from(DRIVER_FAILURE)
        }
    }
}

/// Convert a queried surface dimension to the `u32` the animation update
/// takes.
///
/// # Panics
///
/// Panics if the driver reports a negative dimension, which would be a
/// driver bug.
fn surface_dim(value: i32) -> u32 {
    u32::try_from(value).expect("surface dimension is negative")
}

fn run() -> Result<(), DemoError> {
    let context = GlesContext::window()?;
    let (egl_major, egl_minor) = context.egl_version();

    println!("Using display with EGL version {egl_major}.{egl_minor}");
    println!("EGL Version \"{}\"", context.query_string(egl::VERSION));
    println!("EGL Vendor \"{}\"", context.query_string(egl::VENDOR));
    println!("EGL Extensions \"{}\"", context.query_string(egl::EXTENSIONS));

    let (width, height) = (context.width(), context.height());
    println!("Surface: {width}x{height}");

    let gl = context.gl();

    // SAFETY: the context was just made current on this thread and stays
    // current for the whole run.
    unsafe {
        println!(
            "GL Extensions \"{}\"",
            gl.get_parameter_string(glow::EXTENSIONS)
        );

        let program =
            shaders::compile_program(gl, shaders::CUBE_VERTEX_SRC, shaders::CUBE_FRAGMENT_SRC)?;
        gl.use_program(Some(program));

        gl.viewport(0, 0, width, height);

        // One interleaved buffer, uploaded once. STREAM_DRAW is only a
        // usage hint; static data is fine.
        let vertices = cube::cube_vertices();
        let vbo = gl.create_buffer().map_err(DemoError::CreateBuffer)?;
        gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
        gl.buffer_data_u8_slice(
            glow::ARRAY_BUFFER,
            bytemuck::cast_slice(&vertices),
            glow::STREAM_DRAW,
        );

        gl.vertex_attrib_pointer_f32(0, 3, glow::FLOAT, false, VERTEX_STRIDE, 0);
        gl.enable_vertex_attrib_array(0);
        gl.vertex_attrib_pointer_f32(1, 3, glow::FLOAT, false, VERTEX_STRIDE, COLOR_OFFSET);
        gl.enable_vertex_attrib_array(1);

        // A location of None means the driver optimized the uniform out;
        // glow then ignores the upload, same as glUniform* with -1.
        let modelview_loc = gl.get_uniform_location(program, "modelviewMatrix");
        let mvp_loc = gl.get_uniform_location(program, "modelviewprojectionMatrix");
        let normal_loc = gl.get_uniform_location(program, "normalMatrix");

        gl.enable(glow::CULL_FACE);

        for frame in 0..FRAME_COUNT {
            println!("Frame {frame}");

            gl.clear_color(0.5, 0.5, 0.5, 1.0);
            gl.clear(glow::COLOR_BUFFER_BIT);

            let matrices = cube::frame_matrices(frame, surface_dim(width), surface_dim(height));
            gl.uniform_matrix_4_f32_slice(
                modelview_loc.as_ref(),
                false,
                matrices.modelview.as_flat(),
            );
            gl.uniform_matrix_4_f32_slice(
                mvp_loc.as_ref(),
                false,
                matrices.modelview_projection.as_flat(),
            );
            gl.uniform_matrix_3_f32_slice(normal_loc.as_ref(), false, &matrices.normal);

            for face in 0..FACE_COUNT {
                gl.draw_arrays(glow::TRIANGLE_STRIP, face * VERTICES_PER_FACE, VERTICES_PER_FACE);
            }

            context.swap_buffers()?;
        }

        gl.delete_buffer(vbo);
        gl.delete_program(program);
    }

    context.destroy();
    Ok(())
}
