//! GLSL shader sources and compilation helpers.
//!
//! All shaders target GLSL ES 1.00 (OpenGL ES 2.0), the baseline every GLES2
//! driver must accept.

use glow::HasContext;
use thiserror::Error;

/// Which stage of program construction failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    /// Vertex shader compilation.
    Vertex,
    /// Fragment shader compilation.
    Fragment,
    /// Program linking.
    Link,
}

impl std::fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Vertex => f.write_str("vertex shader compilation"),
            Self::Fragment => f.write_str("fragment shader compilation"),
            Self::Link => f.write_str("program linking"),
        }
    }
}

/// A compile or link failure, carrying the driver's info log.
///
/// The log is kept separate from the message so callers can print it
/// verbatim (surfacing it is the compile checker's whole purpose).
#[derive(Debug, Clone, Error)]
#[error("{stage} failed")]
pub struct ShaderError {
    /// The stage that failed.
    pub stage: ShaderStage,
    /// The driver's diagnostic log, possibly empty.
    pub log: String,
}

/// Error from the compile/link helpers.
#[derive(Debug, Error)]
pub enum ProgramError {
    /// Creating the shader or program object itself failed (out of handles,
    /// lost context).
    #[error("failed to create shader/program object: {0}")]
    Create(String),
    /// A stage compiled or linked with errors; see the attached log.
    #[error(transparent)]
    Stage(#[from] ShaderError),
}

/// Attribute locations the cube demo's vertex buffer layout assumes:
/// position at 0, color at 1.
pub const CUBE_ATTRIB_BINDINGS: [(u32, &str); 2] = [(0, "in_position"), (1, "in_color")];

/// Vertex shader for the rotating cube.
///
/// Applies the model-view-projection to the position and computes a simple
/// diffuse term from a fixed light direction and the per-vertex color.
///
/// # Uniforms
///
/// | Name                        | Type   | Description                 |
/// |-----------------------------|--------|-----------------------------|
/// | `modelviewMatrix`           | `mat4` | Object space to eye space   |
/// | `modelviewprojectionMatrix` | `mat4` | Object space to clip space  |
/// | `normalMatrix`              | `mat3` | Upper 3×3 of the model-view |
pub const CUBE_VERTEX_SRC: &str = r"
uniform mat4 modelviewMatrix;
uniform mat4 modelviewprojectionMatrix;
uniform mat3 normalMatrix;

attribute vec4 in_position;
attribute vec3 in_color;

varying vec4 vVaryingColor;

void main()
{
    gl_Position = modelviewprojectionMatrix * in_position;

    // For a unit cube centered on the origin the position doubles as the
    // face normal direction.
    vec3 vEyeNormal = normalMatrix * normalize(in_position.xyz);
    vec3 lightDirection = normalize(vec3(0.5, 0.5, 1.0));
    float diff = max(0.0, dot(vEyeNormal, lightDirection));

    vVaryingColor = vec4(diff * in_color, 1.0);
}
";

/// Fragment shader for the rotating cube: passes the interpolated vertex
/// color through.
pub const CUBE_FRAGMENT_SRC: &str = r"
precision mediump float;

varying vec4 vVaryingColor;

void main()
{
    gl_FragColor = vVaryingColor;
}
";

/// Compile a single shader stage from source.
///
/// `shader_type` is `glow::VERTEX_SHADER` or `glow::FRAGMENT_SHADER`; it
/// determines the [`ShaderStage`] reported on failure.
///
/// # Safety
///
/// Requires a valid, current OpenGL ES context.
///
/// # Errors
///
/// Returns the driver's info log on compile failure.
pub unsafe fn compile_shader(
    gl: &glow::Context,
    shader_type: u32,
    source: &str,
) -> Result<glow::Shader, ProgramError> {
    let stage = if shader_type == glow::VERTEX_SHADER {
        ShaderStage::Vertex
    } else {
        ShaderStage::Fragment
    };

    unsafe {
        let shader = gl.create_shader(shader_type).map_err(ProgramError::Create)?;
        gl.shader_source(shader, source);
        gl.compile_shader(shader);

        if !gl.get_shader_compile_status(shader) {
            let log = gl.get_shader_info_log(shader);
            gl.delete_shader(shader);
            return Err(ProgramError::Stage(ShaderError { stage, log }));
        }

        Ok(shader)
    }
}

/// Link two compiled shaders into a program, binding the given attribute
/// locations before the link.
///
/// The shader objects are detached and deleted afterwards (on failure too),
/// so only the program handle needs cleanup by the caller.
///
/// # Safety
///
/// Requires a valid, current OpenGL ES context; `vs` and `fs` must be
/// successfully compiled shaders from that context.
///
/// # Errors
///
/// Returns the driver's info log on link failure.
pub unsafe fn link_program(
    gl: &glow::Context,
    vs: glow::Shader,
    fs: glow::Shader,
    attrib_bindings: &[(u32, &str)],
) -> Result<glow::Program, ProgramError> {
    let program = unsafe { gl.create_program() }.map_err(ProgramError::Create)?;

    unsafe {
        gl.attach_shader(program, vs);
        gl.attach_shader(program, fs);

        for &(location, name) in attrib_bindings {
            gl.bind_attrib_location(program, location, name);
        }

        gl.link_program(program);

        if !gl.get_program_link_status(program) {
            let log = gl.get_program_info_log(program);
            gl.delete_program(program);
            gl.delete_shader(vs);
            gl.delete_shader(fs);
            return Err(ProgramError::Stage(ShaderError {
                stage: ShaderStage::Link,
                log,
            }));
        }

        // Shaders can be detached and deleted after successful linking.
        gl.detach_shader(program, vs);
        gl.detach_shader(program, fs);
        gl.delete_shader(vs);
        gl.delete_shader(fs);
    }

    Ok(program)
}

/// Compile and link the cube demo's program from vertex and fragment source
/// strings, with the demo's attribute bindings applied.
///
/// # Safety
///
/// Requires a valid, current OpenGL ES context.
///
/// # Errors
///
/// Returns a [`ProgramError`] carrying the driver's info log if any stage
/// fails.
pub unsafe fn compile_program(
    gl: &glow::Context,
    vertex_src: &str,
    fragment_src: &str,
) -> Result<glow::Program, ProgramError> {
    let vs = unsafe { compile_shader(gl, glow::VERTEX_SHADER, vertex_src) }?;
    let fs = unsafe { compile_shader(gl, glow::FRAGMENT_SHADER, fragment_src) }?;
    unsafe { link_program(gl, vs, fs, &CUBE_ATTRIB_BINDINGS) }
}
