//! Compile-check a vertex/fragment shader pair against the real driver.
//!
//! Usage: `shader-check <shader.vert> <shader.frag>`
//!
//! Acquires an off-screen GLES2 context, submits both sources to the
//! driver, links them, and prints pass/fail per stage with the driver's
//! diagnostic log on stdout. Exit code 1 for argument/file errors, the
//! `-1` family (255) for driver failures, 0 on success.

use std::env;
use std::fs;
use std::process::ExitCode;

use glow::HasContext;
use thiserror::Error;

use gles_smoke::shaders::{self, ProgramError};
use gles_smoke::{ContextError, GlesContext};

/// Exit code for driver-level failures, mirroring a C `return -1`.
const DRIVER_FAILURE: u8 = 255;

#[derive(Debug, Error)]
enum CheckError {
    #[error(transparent)]
    Context(#[from] ContextError),
    #[error(transparent)]
    Program(#[from] ProgramError),
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!("usage: shader-check <shader.vert> <shader.frag>");
        return ExitCode::from(1);
    }

    let Ok(vertex_src) = fs::read_to_string(&args[1]) else {
        eprintln!("cannot open vertex shader: {}", args[1]);
        return ExitCode::from(1);
    };
    let Ok(fragment_src) = fs::read_to_string(&args[2]) else {
        eprintln!("cannot open fragment shader: {}", args[2]);
        return ExitCode::from(1);
    };

    match check(&vertex_src, &fragment_src) {
        Ok(()) => ExitCode::SUCCESS,
        Err(CheckError::Program(ProgramError::Stage(e))) => {
            // The log is the tool's whole output; print it verbatim.
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

/// Run the compile/link sequence, printing per-stage successes as they
/// happen so a partial pass is still informative.
fn check(vertex_src: &str, fragment_src: &str) -> Result<(), CheckError> {
    let context = GlesContext::pbuffer()?;
    let gl = context.gl();

    // SAFETY: the context was just made current on this thread.
    unsafe {
        let vs = shaders::compile_shader(gl, glow::VERTEX_SHADER, vertex_src)?;
        println!("Vertex shader compilation succeeded!");

        let fs = shaders::compile_shader(gl, glow::FRAGMENT_SHADER, fragment_src)?;
        println!("Fragment shader compilation succeeded!");

        let program = shaders::link_program(gl, vs, fs, &[])?;
        println!("program linking succeeded!");

        // Drivers defer real codegen until first use; a use + clear + flush
        // forces it so deferred errors surface before we report success.
        gl.use_program(Some(program));
        gl.viewport(0, 0, context.width(), context.height());
        gl.clear(glow::COLOR_BUFFER_BIT);
        gl.flush();

        gl.delete_program(program);
    }

    context.destroy();
    Ok(())
}
