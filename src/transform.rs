//! 4×4 affine/projective transforms for the cube demo.
//!
//! Matrices are stored row-major as `m[row][col]` with a *row-vector*
//! convention: points transform as `v' = v × M`, and composing an operation
//! onto an existing matrix computes `M ← New × M`. Since the left factor of
//! a product hits the point first, the most recently composed operation
//! applies first: a `translate` then `rotate` call sequence yields a matrix
//! that rotates a point in object space and then translates it. A
//! model-view-projection matrix is built as `modelview × projection`
//! (model-view applies first). Matrix multiplication is not commutative, so
//! call order matters.
//!
//! All operations are pure functions over caller-owned matrices; nothing
//! here touches GL state.

use bytemuck::{Pod, Zeroable};
use thiserror::Error;

/// Error building a frustum projection from degenerate clip planes.
///
/// Every variant corresponds to a zero (or sign-flipped) denominator in the
/// projection element formulas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FrustumError {
    /// `near <= 0` or `far <= near`.
    #[error("invalid depth range: near must be > 0 and far > near")]
    DepthRange,
    /// `left == right`.
    #[error("left and right clip planes coincide")]
    HorizontalExtent,
    /// `bottom == top`.
    #[error("bottom and top clip planes coincide")]
    VerticalExtent,
}

/// A 4×4 transform matrix, row-major, `f32` elements.
///
/// `Pod` so it can be handed to `glUniformMatrix4fv`-style calls as a flat
/// `&[f32]` via [`bytemuck::cast_slice`] without copying. The row-major
/// layout matches what the demo's shaders expect with `transpose = false`.
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Matrix4 {
    /// Matrix elements, indexed `m[row][col]`.
    pub m: [[f32; 4]; 4],
}

impl Matrix4 {
    /// The multiplicative identity.
    #[must_use]
    pub const fn identity() -> Self {
        let mut m = [[0.0; 4]; 4];
        m[0][0] = 1.0;
        m[1][1] = 1.0;
        m[2][2] = 1.0;
        m[3][3] = 1.0;
        Self { m }
    }

    /// Compute `a × b`.
    ///
    /// Always produces a fresh matrix, so there is no aliasing concern
    /// between inputs and output.
    #[must_use]
    pub fn multiply(a: &Self, b: &Self) -> Self {
        let mut out = Self::zeroed();
        for row in 0..4 {
            for col in 0..4 {
                let mut sum = 0.0;
                for k in 0..4 {
                    sum += a.m[row][k] * b.m[k][col];
                }
                out.m[row][col] = sum;
            }
        }
        out
    }

    /// Transform a homogeneous point: `v' = v × M` (row-vector convention).
    #[must_use]
    pub fn transform(&self, v: [f32; 4]) -> [f32; 4] {
        let mut out = [0.0; 4];
        for (col, slot) in out.iter_mut().enumerate() {
            *slot = v[0] * self.m[0][col]
                + v[1] * self.m[1][col]
                + v[2] * self.m[2][col]
                + v[3] * self.m[3][col];
        }
        out
    }

    /// Compose a translation by `(tx, ty, tz)` into this matrix in place.
    ///
    /// Equivalent to `M ← T × M`, written out directly: only the bottom row
    /// changes under the row-vector convention.
    pub fn translate(&mut self, tx: f32, ty: f32, tz: f32) {
        for col in 0..4 {
            self.m[3][col] +=
                self.m[0][col] * tx + self.m[1][col] * ty + self.m[2][col] * tz;
        }
    }

    /// Compose a rotation of `angle_deg` degrees about the axis `(x, y, z)`
    /// into this matrix in place (`M ← R × M`).
    ///
    /// The axis does not need to be pre-normalized; it is normalized here.
    /// Uses the standard axis-angle (Rodrigues) rotation matrix.
    ///
    /// # Panics
    ///
    /// Panics if the axis has (near-)zero length. A zero axis does not
    /// describe a rotation, and silently substituting the identity would
    /// mask the caller's bug.
    pub fn rotate(&mut self, angle_deg: f32, x: f32, y: f32, z: f32) {
        let mag = (x * x + y * y + z * z).sqrt();
        assert!(mag > 0.0, "rotation axis must have non-zero length");

        let (sin_a, cos_a) = angle_deg.to_radians().sin_cos();
        let one_minus_cos = 1.0 - cos_a;

        let x = x / mag;
        let y = y / mag;
        let z = z / mag;

        let (xx, yy, zz) = (x * x, y * y, z * z);
        let (xy, yz, zx) = (x * y, y * z, z * x);
        let (xs, ys, zs) = (x * sin_a, y * sin_a, z * sin_a);

        let rot = Self {
            m: [
                [
                    one_minus_cos * xx + cos_a,
                    one_minus_cos * xy - zs,
                    one_minus_cos * zx + ys,
                    0.0,
                ],
                [
                    one_minus_cos * xy + zs,
                    one_minus_cos * yy + cos_a,
                    one_minus_cos * yz - xs,
                    0.0,
                ],
                [
                    one_minus_cos * zx - ys,
                    one_minus_cos * yz + xs,
                    one_minus_cos * zz + cos_a,
                    0.0,
                ],
                [0.0, 0.0, 0.0, 1.0],
            ],
        };

        *self = Self::multiply(&rot, self);
    }

    /// Compose a perspective projection defined by six clip planes into this
    /// matrix in place (`M ← F × M`).
    ///
    /// # Errors
    ///
    /// Returns an error instead of dividing by zero (or flipping the depth
    /// range) when `near <= 0`, `far <= near`, `left == right`, or
    /// `bottom == top`.
    #[allow(clippy::float_cmp)] // exact comparisons: these guard the divisions below
    pub fn frustum(
        &mut self,
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    ) -> Result<(), FrustumError> {
        if near <= 0.0 || far <= near {
            return Err(FrustumError::DepthRange);
        }
        let dx = right - left;
        let dy = top - bottom;
        let dz = far - near;
        if dx == 0.0 {
            return Err(FrustumError::HorizontalExtent);
        }
        if dy == 0.0 {
            return Err(FrustumError::VerticalExtent);
        }

        let mut frust = Self::zeroed();
        frust.m[0][0] = 2.0 * near / dx;
        frust.m[1][1] = 2.0 * near / dy;
        frust.m[2][0] = (right + left) / dx;
        frust.m[2][1] = (top + bottom) / dy;
        frust.m[2][2] = -(near + far) / dz;
        frust.m[2][3] = -1.0;
        frust.m[3][2] = -2.0 * near * far / dz;

        *self = Self::multiply(&frust, self);
        Ok(())
    }

    /// Extract the upper-left 3×3 block, row-major.
    ///
    /// The demo uses this as its normal matrix for lighting. Note this is
    /// *not* the inverse-transpose; it is only correct for rigid transforms
    /// (rotations and translations), which is all the demo composes.
    #[must_use]
    pub fn upper3x3(&self) -> [f32; 9] {
        [
            self.m[0][0], self.m[0][1], self.m[0][2],
            self.m[1][0], self.m[1][1], self.m[1][2],
            self.m[2][0], self.m[2][1], self.m[2][2],
        ]
    }

    /// View the matrix as a flat 16-element slice, row-major, for uniform
    /// upload.
    #[must_use]
    pub fn as_flat(&self) -> &[f32; 16] {
        bytemuck::cast_ref(&self.m)
    }
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const TOLERANCE: f32 = 1e-5;

    /// Helper to compare matrices element-wise with tolerance.
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

    /// An arbitrary well-conditioned matrix for multiply tests.
    fn sample_matrix(seed: f32) -> Matrix4 {
        let mut m = Matrix4::identity();
        m.translate(seed, -seed, 2.0 * seed);
        m.rotate(10.0 * seed, 1.0, 2.0, 3.0);
        m
    }

    #[test]
    fn identity_is_multiplicative_neutral() {
        let x = sample_matrix(1.5);
        let left = Matrix4::multiply(&Matrix4::identity(), &x);
        let right = Matrix4::multiply(&x, &Matrix4::identity());
        assert_matrix_eq(&left, &x);
        assert_matrix_eq(&right, &x);
    }

    #[test]
    fn full_turn_is_identity() {
        for axis in [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.3, -0.7, 2.0]] {
            let mut m = Matrix4::identity();
            m.rotate(360.0, axis[0], axis[1], axis[2]);
            assert_matrix_eq(&m, &Matrix4::identity());
        }
    }

    #[test]
    fn axis_aligned_rotations_add() {
        for axis in [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]] {
            let mut split = Matrix4::identity();
            split.rotate(25.0, axis[0], axis[1], axis[2]);
            split.rotate(17.0, axis[0], axis[1], axis[2]);

            let mut single = Matrix4::identity();
            single.rotate(42.0, axis[0], axis[1], axis[2]);

            assert_matrix_eq(&split, &single);
        }
    }

    #[test]
    fn rotate_normalizes_axis() {
        let mut scaled = Matrix4::identity();
        scaled.rotate(30.0, 0.0, 0.0, 100.0);

        let mut unit = Matrix4::identity();
        unit.rotate(30.0, 0.0, 0.0, 1.0);

        assert_matrix_eq(&scaled, &unit);
    }

    #[test]
    #[should_panic(expected = "non-zero length")]
    fn rotate_zero_axis_panics() {
        let mut m = Matrix4::identity();
        m.rotate(45.0, 0.0, 0.0, 0.0);
    }

    #[test]
    fn symmetric_frustum_has_no_skew() {
        let mut m = Matrix4::identity();
        m.frustum(-2.8, 2.8, -1.68, 1.68, 6.0, 10.0).unwrap();
        assert!(m.m[2][0].abs() < TOLERANCE, "horizontal skew: {}", m.m[2][0]);
        assert!(m.m[2][1].abs() < TOLERANCE, "vertical skew: {}", m.m[2][1]);
    }

    #[test]
    fn frustum_rejects_degenerate_planes() {
        let mut m = Matrix4::identity();
        assert_eq!(
            m.frustum(-1.0, 1.0, -1.0, 1.0, 0.0, 10.0),
            Err(FrustumError::DepthRange)
        );
        assert_eq!(
            m.frustum(-1.0, 1.0, -1.0, 1.0, 10.0, 6.0),
            Err(FrustumError::DepthRange)
        );
        assert_eq!(
            m.frustum(2.0, 2.0, -1.0, 1.0, 1.0, 10.0),
            Err(FrustumError::HorizontalExtent)
        );
        assert_eq!(
            m.frustum(-1.0, 1.0, 0.5, 0.5, 1.0, 10.0),
            Err(FrustumError::VerticalExtent)
        );
        // A failed frustum must leave the matrix untouched.
        assert_matrix_eq(&m, &Matrix4::identity());
    }

    #[test]
    fn multiply_is_associative() {
        let a = sample_matrix(1.0);
        let b = sample_matrix(-2.0);
        let c = sample_matrix(0.7);
        let left = Matrix4::multiply(&Matrix4::multiply(&a, &b), &c);
        let right = Matrix4::multiply(&a, &Matrix4::multiply(&b, &c));
        assert_matrix_eq(&left, &right);
    }

    #[test]
    fn translate_moves_origin() {
        let mut m = Matrix4::identity();
        m.translate(0.0, 0.0, -8.0);
        let p = m.transform([0.0, 0.0, 0.0, 1.0]);
        let expected = [0.0, 0.0, -8.0, 1.0];
        for (got, want) in p.iter().zip(expected) {
            assert!((got - want).abs() < TOLERANCE, "expected {expected:?}, got {p:?}");
        }
    }

    #[test]
    fn upper3x3_of_translation_is_identity() {
        let mut m = Matrix4::identity();
        m.translate(3.0, -1.0, 8.0);
        let n = m.upper3x3();
        let expected = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0];
        for (got, want) in n.iter().zip(expected) {
            assert!((got - want).abs() < TOLERANCE);
        }
    }

    #[test]
    fn as_flat_is_row_major() {
        let mut m = Matrix4::identity();
        m.translate(5.0, 6.0, 7.0);
        let flat = m.as_flat();
        assert!((flat[12] - 5.0).abs() < TOLERANCE);
        assert!((flat[13] - 6.0).abs() < TOLERANCE);
        assert!((flat[14] - 7.0).abs() < TOLERANCE);
    }
}
