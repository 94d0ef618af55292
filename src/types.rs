//! Interleaved vertex layout for the cube demo.
//!
//! The demo's shader binds two attribute arrays out of a single buffer at a
//! fixed stride of 9 floats per vertex: position at float offsets 0–2 and
//! color at 6–8, with a reserved slot at 3–5 (the layout keeps room for a
//! per-vertex normal, which the demo instead derives from the normal-matrix
//! uniform).

use bytemuck::{Pod, Zeroable};

/// One packed cube vertex, ready for GPU upload.
///
/// `#[repr(C)]` pins the field order, so a `&[CubeVertex]` can be handed to
/// a buffer upload as raw bytes via [`bytemuck::cast_slice`].
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct CubeVertex {
    /// Object-space position, float offsets 0–2.
    pub position: [f32; 3],
    /// Reserved slot, float offsets 3–5. Zeroed on interleave.
    pub normal: [f32; 3],
    /// RGB color, float offsets 6–8.
    pub color: [f32; 3],
}

/// Byte stride of one packed vertex (9 floats).
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub const VERTEX_STRIDE: i32 = std::mem::size_of::<CubeVertex>() as i32;

/// Byte offset of the color attribute within a vertex (after position and
/// the reserved slot).
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub const COLOR_OFFSET: i32 = (6 * std::mem::size_of::<f32>()) as i32;

/// Pack separate position and color arrays into a single interleaved buffer.
///
/// Pure memory-layout transform: element `i` of the result holds
/// `positions[i]` and `colors[i]`, with the reserved slot zeroed.
///
/// # Panics
///
/// Panics if the two arrays have different lengths. A mismatch means the
/// caller's vertex data is inconsistent; truncating to the shorter array
/// would hide that.
#[must_use]
pub fn interleave(positions: &[[f32; 3]], colors: &[[f32; 3]]) -> Vec<CubeVertex> {
    assert_eq!(
        positions.len(),
        colors.len(),
        "position and color arrays must have the same vertex count",
    );
    positions
        .iter()
        .zip(colors)
        .map(|(&position, &color)| CubeVertex {
            position,
            normal: [0.0; 3],
            color,
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::float_cmp)] // interleaving copies bits; exact equality is the point
mod tests {
    use super::*;

    #[test]
    fn single_vertex_offsets() {
        let packed = interleave(&[[1.0, 2.0, 3.0]], &[[0.1, 0.2, 0.3]]);
        let floats: &[f32] = bytemuck::cast_slice(&packed);

        assert_eq!(floats.len(), 9);
        assert_eq!(&floats[0..3], &[1.0, 2.0, 3.0]);
        assert_eq!(&floats[6..9], &[0.1, 0.2, 0.3]);
    }

    #[test]
    fn stride_is_nine_floats() {
        assert_eq!(VERTEX_STRIDE, 36);
        assert_eq!(COLOR_OFFSET, 24);
    }

    #[test]
    fn interleave_preserves_order() {
        let positions = [[0.0, 0.0, 0.0], [1.0, 1.0, 1.0], [2.0, 2.0, 2.0]];
        let colors = [[0.9, 0.0, 0.0], [0.0, 0.9, 0.0], [0.0, 0.0, 0.9]];
        let packed = interleave(&positions, &colors);

        assert_eq!(packed.len(), 3);
        for (i, vertex) in packed.iter().enumerate() {
            assert_eq!(vertex.position, positions[i]);
            assert_eq!(vertex.color, colors[i]);
        }
    }

    #[test]
    #[should_panic(expected = "same vertex count")]
    fn interleave_rejects_mismatched_counts() {
        let _ = interleave(&[[0.0; 3], [1.0; 3]], &[[0.0; 3]]);
    }
}
