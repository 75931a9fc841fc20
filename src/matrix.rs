use std::cmp::PartialEq;
use std::ops::{Index, IndexMut, Mul};

use crate::vector::Vec3;

/// 4x4 affine transform in row-vector convention: rows 0..2 hold the basis
/// vectors (right, up, forward) and row 3 the translation, so points
/// multiply on the left and a product `a * b` applies `a` first.
#[derive(Debug, Clone, Copy)]
pub struct Matrix(pub [[f64; 4]; 4]);

impl Matrix {
    pub fn zero() -> Matrix {
        Matrix([[0.0; 4]; 4])
    }

    pub fn identity() -> Matrix {
        Matrix([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Builds the matrix from basis vectors and an origin, e.g. the
    /// camera-to-world transform [right | up | forward | origin].
    pub fn from_axes(right: Vec3, up: Vec3, forward: Vec3, origin: Vec3) -> Matrix {
        Matrix([
            [right.x, right.y, right.z, 0.0],
            [up.x, up.y, up.z, 0.0],
            [forward.x, forward.y, forward.z, 0.0],
            [origin.x, origin.y, origin.z, 1.0],
        ])
    }

    pub fn translation(t: Vec3) -> Matrix {
        Matrix([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [t.x, t.y, t.z, 1.0],
        ])
    }

    pub fn scaling(s: Vec3) -> Matrix {
        Matrix([
            [s.x, 0.0, 0.0, 0.0],
            [0.0, s.y, 0.0, 0.0],
            [0.0, 0.0, s.z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn rotation_x(angle: f64) -> Matrix {
        let (sin, cos) = angle.sin_cos();
        Matrix([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, cos, sin, 0.0],
            [0.0, -sin, cos, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn rotation_y(angle: f64) -> Matrix {
        let (sin, cos) = angle.sin_cos();
        Matrix([
            [cos, 0.0, -sin, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [sin, 0.0, cos, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn rotation_z(angle: f64) -> Matrix {
        let (sin, cos) = angle.sin_cos();
        Matrix([
            [cos, sin, 0.0, 0.0],
            [-sin, cos, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Combined Euler rotation: pitch about X, then yaw about Y, then roll
    /// about Z. The camera derives its forward vector by applying this to
    /// +Z, and mesh animation reuses the same Y-rotation convention.
    pub fn rotation(pitch: f64, yaw: f64, roll: f64) -> Matrix {
        Matrix::rotation_x(pitch) * Matrix::rotation_y(yaw) * Matrix::rotation_z(roll)
    }

    /// Applies the full affine transform, translation included.
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        Vec3::new(
            p.x * self[0][0] + p.y * self[1][0] + p.z * self[2][0] + self[3][0],
            p.x * self[0][1] + p.y * self[1][1] + p.z * self[2][1] + self[3][1],
            p.x * self[0][2] + p.y * self[1][2] + p.z * self[2][2] + self[3][2],
        )
    }

    /// Applies the rotation/scale part only; directions are unaffected by
    /// translation.
    pub fn transform_vector(&self, v: Vec3) -> Vec3 {
        Vec3::new(
            v.x * self[0][0] + v.y * self[1][0] + v.z * self[2][0],
            v.x * self[0][1] + v.y * self[1][1] + v.z * self[2][1],
            v.x * self[0][2] + v.y * self[1][2] + v.z * self[2][2],
        )
    }
}

impl Index<usize> for Matrix {
    type Output = [f64; 4];

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IndexMut<usize> for Matrix {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.0[index]
    }
}

impl Mul for Matrix {
    type Output = Matrix;

    fn mul(self, rhs: Matrix) -> Self::Output {
        let mut result = Matrix::zero();
        for i in 0..4 {
            for j in 0..4 {
                result[i][j] = self[i][0] * rhs[0][j]
                    + self[i][1] * rhs[1][j]
                    + self[i][2] * rhs[2][j]
                    + self[i][3] * rhs[3][j];
            }
        }
        result
    }
}

const EPSILON: f64 = f64::EPSILON * 100.0;

impl PartialEq for Matrix {
    fn eq(&self, other: &Self) -> bool {
        for i in 0..4 {
            for j in 0..4 {
                if (self[i][j] - other[i][j]).abs() > EPSILON {
                    return false;
                }
            }
        }

        true
    }
}
