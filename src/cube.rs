//! Hard-coded cube geometry and the per-frame animation update.
//!
//! The cube is 6 faces × 4 vertices, drawn as six separate 4-vertex
//! triangle strips, one solid color per face. The per-frame matrices are a
//! pure function of `(frame, surface width, surface height)`; nothing is
//! cached between frames.

use crate::transform::Matrix4;
use crate::types::{interleave, CubeVertex};

/// Vertices per cube face (each face is one triangle strip).
pub const VERTICES_PER_FACE: i32 = 4;

/// Number of cube faces, and therefore per-frame draw calls.
pub const FACE_COUNT: i32 = 6;

/// Number of frames the demo renders before exiting.
pub const FRAME_COUNT: u32 = 5;

/// Cube positions, 4 per face, strip order (front, back, right, left, top,
/// bottom). Unit half-extent, centered on the origin.
pub const CUBE_POSITIONS: [[f32; 3]; 24] = [
    // front
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [-1.0, 1.0, 1.0],
    [1.0, 1.0, 1.0],
    // back
    [1.0, -1.0, -1.0],
    [-1.0, -1.0, -1.0],
    [1.0, 1.0, -1.0],
    [-1.0, 1.0, -1.0],
    // right
    [1.0, -1.0, 1.0],
    [1.0, -1.0, -1.0],
    [1.0, 1.0, 1.0],
    [1.0, 1.0, -1.0],
    // left
    [-1.0, -1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, 1.0, 1.0],
    // top
    [-1.0, 1.0, 1.0],
    [1.0, 1.0, 1.0],
    [-1.0, 1.0, -1.0],
    [1.0, 1.0, -1.0],
    // bottom
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
];

/// Cube colors, one solid color per face, matching [`CUBE_POSITIONS`].
pub const CUBE_COLORS: [[f32; 3]; 24] = [
    // front - blue
    [0.0, 0.0, 1.0],
    [0.0, 0.0, 1.0],
    [0.0, 0.0, 1.0],
    [0.0, 0.0, 1.0],
    // back - cyan
    [0.0, 1.0, 1.0],
    [0.0, 1.0, 1.0],
    [0.0, 1.0, 1.0],
    [0.0, 1.0, 1.0],
    // right - magenta
    [1.0, 0.0, 1.0],
    [1.0, 0.0, 1.0],
    [1.0, 0.0, 1.0],
    [1.0, 0.0, 1.0],
    // left - red
    [1.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
    // top - white
    [1.0, 1.0, 1.0],
    [1.0, 1.0, 1.0],
    [1.0, 1.0, 1.0],
    [1.0, 1.0, 1.0],
    // bottom - green
    [0.0, 1.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 1.0, 0.0],
];

/// The cube as a single interleaved vertex buffer.
#[must_use]
pub fn cube_vertices() -> Vec<CubeVertex> {
    interleave(&CUBE_POSITIONS, &CUBE_COLORS)
}

/// The three matrices uploaded as uniforms each frame.
pub struct FrameMatrices {
    /// Object space to eye space.
    pub modelview: Matrix4,
    /// Object space straight to clip space
    /// (`modelview × projection` under the row-vector convention).
    pub modelview_projection: Matrix4,
    /// Upper 3×3 of the model-view matrix, row-major, for lighting.
    pub normal: [f32; 9],
}

/// Compute the matrices for a given frame and surface size.
///
/// The camera setup is fixed: the cube spins 1° per frame about its Z
/// axis, is tilted 45° about X and 45° about Y, and sits 8 units back from
/// the eye — the spin angle grows without wrapping, which is fine for the
/// demo's 5 frames. The frustum spans
/// ±2.8 horizontally and is scaled vertically by the surface aspect ratio
/// (`height / width`), with a 6..10 depth range.
///
/// # Panics
///
/// Panics if `width` is zero, which would make the aspect ratio undefined.
#[must_use]
pub fn frame_matrices(frame: u32, width: u32, height: u32) -> FrameMatrices {
    assert!(width > 0, "surface width must be non-zero");

    let mut modelview = Matrix4::identity();
    modelview.translate(0.0, 0.0, -8.0);
    modelview.rotate(45.0, 1.0, 0.0, 0.0);
    modelview.rotate(45.0, 0.0, 1.0, 0.0);
    #[allow(clippy::cast_precision_loss)]
    modelview.rotate(1.0 * frame as f32, 0.0, 0.0, 1.0);

    #[allow(clippy::cast_precision_loss)]
    let aspect = height as f32 / width as f32;

    let mut projection = Matrix4::identity();
    projection
        .frustum(-2.8, 2.8, -2.8 * aspect, 2.8 * aspect, 6.0, 10.0)
        .expect("fixed frustum parameters are valid");

    let modelview_projection = Matrix4::multiply(&modelview, &projection);
    let normal = modelview.upper3x3();

    FrameMatrices {
        modelview,
        modelview_projection,
        normal,
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)] // the cube constants are exact literals
mod tests {
    use super::*;

    const TOLERANCE: f32 = 1e-5;

    fn assert_matrix_eq(actual: &Matrix4, expected: &Matrix4) {
        for row in 0..4 {
            for col in 0..4 {
                assert!(
                    (actual.m[row][col] - expected.m[row][col]).abs() < TOLERANCE,
                    "element [{row}][{col}]: expected {}, got {}",
                    expected.m[row][col],
                    actual.m[row][col],
                );
            }
        }
    }

    #[test]
    fn cube_has_24_vertices() {
        assert_eq!(cube_vertices().len(), 24);
        assert_eq!(FACE_COUNT * VERTICES_PER_FACE, 24);
    }

    #[test]
    fn faces_are_planar_and_solid_colored() {
        for face in 0..6 {
            let base = face * 4;
            let color = CUBE_COLORS[base];
            for i in base..base + 4 {
                assert_eq!(CUBE_COLORS[i], color, "face {face} is not solid-colored");
            }
            // Every face of an axis-aligned cube has one constant coordinate.
            let planar = (0..3).any(|axis| {
                (base..base + 4)
                    .all(|i| (CUBE_POSITIONS[i][axis] - CUBE_POSITIONS[base][axis]).abs() == 0.0)
            });
            assert!(planar, "face {face} is not axis-aligned planar");
        }
    }

    #[test]
    fn frame_zero_has_no_spin() {
        // Frame 0 is exactly the fixed translate + 45°/45° tilt: composing a
        // 0° Z rotation must change nothing.
        let frame0 = frame_matrices(0, 400, 240);

        let mut expected = Matrix4::identity();
        expected.translate(0.0, 0.0, -8.0);
        expected.rotate(45.0, 1.0, 0.0, 0.0);
        expected.rotate(45.0, 0.0, 1.0, 0.0);

        assert_matrix_eq(&frame0.modelview, &expected);
    }

    #[test]
    fn frame_index_is_spin_in_degrees() {
        // Frame 45's model-view is frame 0's with an extra 45° about Z
        // composed on top (the Z spin is the last operation in the chain).
        let frame0 = frame_matrices(0, 400, 240);
        let frame45 = frame_matrices(45, 400, 240);

        let mut spin = Matrix4::identity();
        spin.rotate(45.0, 0.0, 0.0, 1.0);
        let expected = Matrix4::multiply(&spin, &frame0.modelview);

        assert_matrix_eq(&frame45.modelview, &expected);
    }

    #[test]
    fn modelview_projection_composes_in_order() {
        let frame = frame_matrices(3, 400, 240);

        // Reconstruct the projection for this surface and check the product.
        let mut projection = Matrix4::identity();
        let aspect = 240.0 / 400.0;
        projection
            .frustum(-2.8, 2.8, -2.8 * aspect, 2.8 * aspect, 6.0, 10.0)
            .expect("valid frustum");

        let expected = Matrix4::multiply(&frame.modelview, &projection);
        assert_matrix_eq(&frame.modelview_projection, &expected);
    }

    #[test]
    fn normal_matrix_is_upper_block_of_modelview() {
        let frame = frame_matrices(2, 400, 240);
        let block = frame.modelview.upper3x3();
        assert_eq!(frame.normal, block);
    }

    #[test]
    fn cube_center_lands_eight_units_back() {
        // The cube is centered on the origin; the model-view must place its
        // center at z = -8 regardless of frame.
        for frame in [0, 1, 4] {
            let m = frame_matrices(frame, 400, 240).modelview;
            let center = m.transform([0.0, 0.0, 0.0, 1.0]);
            assert!((center[0]).abs() < TOLERANCE);
            assert!((center[1]).abs() < TOLERANCE);
            assert!((center[2] + 8.0).abs() < TOLERANCE);
        }
    }
}
