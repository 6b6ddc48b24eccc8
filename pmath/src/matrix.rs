use crate::numbers::{deg_to_rad, Float};
use crate::vector::{Vec3, Vec4};

use approx::AbsDiffEq;

use std::ops::{Add, Index, IndexMut, Mul, Neg, Sub};

/// A row-major 4x4 matrix. Vectors are treated as columns, so `a * b` applies `b` first.
#[derive(Clone, Copy, Debug)]
pub struct Mat4<T: Float> {
    m: [Vec4<T>; 4],
}

impl<T: Float> Mat4<T> {
    pub fn new(rows: [Vec4<T>; 4]) -> Self {
        Mat4 { m: rows }
    }

    pub fn from_arr(m: [[T; 4]; 4]) -> Self {
        let row = |r: [T; 4]| Vec4 {
            x: r[0],
            y: r[1],
            z: r[2],
            w: r[3],
        };
        Mat4 {
            m: [row(m[0]), row(m[1]), row(m[2]), row(m[3])],
        }
    }

    pub fn new_identity() -> Self {
        let o = T::one();
        let z = T::zero();
        Mat4::from_arr([[o, z, z, z], [z, o, z, z], [z, z, o, z], [z, z, z, o]])
    }

    pub fn new_translate(trans: Vec3<T>) -> Self {
        let o = T::one();
        let z = T::zero();
        Mat4::from_arr([
            [o, z, z, trans.x],
            [z, o, z, trans.y],
            [z, z, o, trans.z],
            [z, z, z, o],
        ])
    }

    pub fn new_scale(scale: Vec3<T>) -> Self {
        let o = T::one();
        let z = T::zero();
        Mat4::from_arr([
            [scale.x, z, z, z],
            [z, scale.y, z, z],
            [z, z, scale.z, z],
            [z, z, z, o],
        ])
    }

    pub fn new_rotate_x(deg: T) -> Self {
        let (s, c) = deg_to_rad(deg).sin_cos();
        let o = T::one();
        let z = T::zero();
        Mat4::from_arr([[o, z, z, z], [z, c, -s, z], [z, s, c, z], [z, z, z, o]])
    }

    pub fn new_rotate_y(deg: T) -> Self {
        let (s, c) = deg_to_rad(deg).sin_cos();
        let o = T::one();
        let z = T::zero();
        Mat4::from_arr([[c, z, s, z], [z, o, z, z], [-s, z, c, z], [z, z, z, o]])
    }

    pub fn new_rotate_z(deg: T) -> Self {
        let (s, c) = deg_to_rad(deg).sin_cos();
        let o = T::one();
        let z = T::zero();
        Mat4::from_arr([[c, -s, z, z], [s, c, z, z], [z, z, o, z], [z, z, z, o]])
    }

    /// Rotation of `deg` degrees around an arbitrary axis (Rodrigues' formula).
    /// The axis doesn't have to be normalized.
    pub fn new_rotate(deg: T, axis: Vec3<T>) -> Self {
        let a = axis.normalize();
        let (s, c) = deg_to_rad(deg).sin_cos();
        let o = T::one();
        let z = T::zero();
        let oc = o - c;

        Mat4::from_arr([
            [
                a.x * a.x + (o - a.x * a.x) * c,
                a.x * a.y * oc - a.z * s,
                a.x * a.z * oc + a.y * s,
                z,
            ],
            [
                a.x * a.y * oc + a.z * s,
                a.y * a.y + (o - a.y * a.y) * c,
                a.y * a.z * oc - a.x * s,
                z,
            ],
            [
                a.x * a.z * oc - a.y * s,
                a.y * a.z * oc + a.x * s,
                a.z * a.z + (o - a.z * a.z) * c,
                z,
            ],
            [z, z, z, o],
        ])
    }

    pub fn get_column(self, c: usize) -> Vec4<T> {
        Vec4 {
            x: self.m[0][c],
            y: self.m[1][c],
            z: self.m[2][c],
            w: self.m[3][c],
        }
    }

    pub fn transpose(self) -> Self {
        Mat4 {
            m: [
                self.get_column(0),
                self.get_column(1),
                self.get_column(2),
                self.get_column(3),
            ],
        }
    }

    /// Determinant of the upper-left 3x3 block (the linear part of an affine transform).
    pub fn det3(self) -> T {
        let m = &self.m;
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    pub fn determinant(self) -> T {
        let m = &self.m;
        let a2323 = m[2][2] * m[3][3] - m[2][3] * m[3][2];
        let a1323 = m[2][1] * m[3][3] - m[2][3] * m[3][1];
        let a1223 = m[2][1] * m[3][2] - m[2][2] * m[3][1];
        let a0323 = m[2][0] * m[3][3] - m[2][3] * m[3][0];
        let a0223 = m[2][0] * m[3][2] - m[2][2] * m[3][0];
        let a0123 = m[2][0] * m[3][1] - m[2][1] * m[3][0];

        m[0][0] * (m[1][1] * a2323 - m[1][2] * a1323 + m[1][3] * a1223)
            - m[0][1] * (m[1][0] * a2323 - m[1][2] * a0323 + m[1][3] * a0223)
            + m[0][2] * (m[1][0] * a1323 - m[1][1] * a0323 + m[1][3] * a0123)
            - m[0][3] * (m[1][0] * a1223 - m[1][1] * a0223 + m[1][2] * a0123)
    }

    /// Calculates the inverse of a matrix. Note that, because
    /// the inverse can be undefined, it retuns an option.
    pub fn inverse(self) -> Option<Self> {
        let m = &self.m;
        let a2323 = m[2][2] * m[3][3] - m[2][3] * m[3][2];
        let a1323 = m[2][1] * m[3][3] - m[2][3] * m[3][1];
        let a1223 = m[2][1] * m[3][2] - m[2][2] * m[3][1];
        let a0323 = m[2][0] * m[3][3] - m[2][3] * m[3][0];
        let a0223 = m[2][0] * m[3][2] - m[2][2] * m[3][0];
        let a0123 = m[2][0] * m[3][1] - m[2][1] * m[3][0];
        let a2313 = m[1][2] * m[3][3] - m[1][3] * m[3][2];
        let a1313 = m[1][1] * m[3][3] - m[1][3] * m[3][1];
        let a1213 = m[1][1] * m[3][2] - m[1][2] * m[3][1];
        let a2312 = m[1][2] * m[2][3] - m[1][3] * m[2][2];
        let a1312 = m[1][1] * m[2][3] - m[1][3] * m[2][1];
        let a1212 = m[1][1] * m[2][2] - m[1][2] * m[2][1];
        let a0313 = m[1][0] * m[3][3] - m[1][3] * m[3][0];
        let a0213 = m[1][0] * m[3][2] - m[1][2] * m[3][0];
        let a0312 = m[1][0] * m[2][3] - m[1][3] * m[2][0];
        let a0212 = m[1][0] * m[2][2] - m[1][2] * m[2][0];
        let a0113 = m[1][0] * m[3][1] - m[1][1] * m[3][0];
        let a0112 = m[1][0] * m[2][1] - m[1][1] * m[2][0];

        let det = m[0][0] * (m[1][1] * a2323 - m[1][2] * a1323 + m[1][3] * a1223)
            - m[0][1] * (m[1][0] * a2323 - m[1][2] * a0323 + m[1][3] * a0223)
            + m[0][2] * (m[1][0] * a1323 - m[1][1] * a0323 + m[1][3] * a0123)
            - m[0][3] * (m[1][0] * a1223 - m[1][1] * a0223 + m[1][2] * a0123);

        if det == T::zero() || !det.is_finite() {
            return None;
        }
        let inv_det = T::one() / det;

        let r0 = Vec4 {
            x: inv_det * (m[1][1] * a2323 - m[1][2] * a1323 + m[1][3] * a1223),
            y: inv_det * -(m[0][1] * a2323 - m[0][2] * a1323 + m[0][3] * a1223),
            z: inv_det * (m[0][1] * a2313 - m[0][2] * a1313 + m[0][3] * a1213),
            w: inv_det * -(m[0][1] * a2312 - m[0][2] * a1312 + m[0][3] * a1212),
        };

        let r1 = Vec4 {
            x: inv_det * -(m[1][0] * a2323 - m[1][2] * a0323 + m[1][3] * a0223),
            y: inv_det * (m[0][0] * a2323 - m[0][2] * a0323 + m[0][3] * a0223),
            z: inv_det * -(m[0][0] * a2313 - m[0][2] * a0313 + m[0][3] * a0213),
            w: inv_det * (m[0][0] * a2312 - m[0][2] * a0312 + m[0][3] * a0212),
        };

        let r2 = Vec4 {
            x: inv_det * (m[1][0] * a1323 - m[1][1] * a0323 + m[1][3] * a0123),
            y: inv_det * -(m[0][0] * a1323 - m[0][1] * a0323 + m[0][3] * a0123),
            z: inv_det * (m[0][0] * a1313 - m[0][1] * a0313 + m[0][3] * a0113),
            w: inv_det * -(m[0][0] * a1312 - m[0][1] * a0312 + m[0][3] * a0112),
        };

        let r3 = Vec4 {
            x: inv_det * -(m[1][0] * a1223 - m[1][1] * a0223 + m[1][2] * a0123),
            y: inv_det * (m[0][0] * a1223 - m[0][1] * a0223 + m[0][2] * a0123),
            z: inv_det * -(m[0][0] * a1213 - m[0][1] * a0213 + m[0][2] * a0113),
            w: inv_det * (m[0][0] * a1212 - m[0][1] * a0212 + m[0][2] * a0112),
        };

        let inv = Mat4 {
            m: [r0, r1, r2, r3],
        };
        if inv.is_finite() {
            Some(inv)
        } else {
            None
        }
    }

    /// Multiplies with the vector `[v, 1]`. The homogeneous `w` is kept so
    /// the caller can decide on the perspective divide.
    pub fn mul_vec_one(self, v: Vec3<T>) -> Vec4<T> {
        Vec4 {
            x: self.m[0].dot_one(v),
            y: self.m[1].dot_one(v),
            z: self.m[2].dot_one(v),
            w: self.m[3].dot_one(v),
        }
    }

    /// Multiplies with the vector `[v, 0]`, ignoring the bottom row.
    pub fn mul_vec_zero(self, v: Vec3<T>) -> Vec3<T> {
        Vec3 {
            x: self.m[0].dot_zero(v),
            y: self.m[1].dot_zero(v),
            z: self.m[2].dot_zero(v),
        }
    }

    pub fn scale(self, s: T) -> Self {
        Mat4 {
            m: [
                self.m[0].scale(s),
                self.m[1].scale(s),
                self.m[2].scale(s),
                self.m[3].scale(s),
            ],
        }
    }

    pub fn lerp(self, o: Self, t: T) -> Self {
        Mat4 {
            m: [
                self.m[0].lerp(o.m[0], t),
                self.m[1].lerp(o.m[1], t),
                self.m[2].lerp(o.m[2], t),
                self.m[3].lerp(o.m[3], t),
            ],
        }
    }

    pub fn is_finite(self) -> bool {
        self.m
            .iter()
            .all(|r| r.x.is_finite() && r.y.is_finite() && r.z.is_finite() && r.w.is_finite())
    }
}

impl<T: Float> PartialEq for Mat4<T> {
    fn eq(&self, o: &Self) -> bool {
        self.m == o.m
    }
}

impl<T: Float> Index<usize> for Mat4<T> {
    type Output = Vec4<T>;

    // One would have to use [r][c]
    fn index(&self, i: usize) -> &Vec4<T> {
        &self.m[i]
    }
}

impl<T: Float> IndexMut<usize> for Mat4<T> {
    fn index_mut(&mut self, i: usize) -> &mut Vec4<T> {
        &mut self.m[i]
    }
}

impl<T: Float> Neg for Mat4<T> {
    type Output = Mat4<T>;

    fn neg(self) -> Mat4<T> {
        Mat4 {
            m: [-self.m[0], -self.m[1], -self.m[2], -self.m[3]],
        }
    }
}

impl<T: Float> Add for Mat4<T> {
    type Output = Mat4<T>;

    fn add(self, o: Mat4<T>) -> Mat4<T> {
        Mat4 {
            m: [
                self.m[0] + o.m[0],
                self.m[1] + o.m[1],
                self.m[2] + o.m[2],
                self.m[3] + o.m[3],
            ],
        }
    }
}

impl<T: Float> Sub for Mat4<T> {
    type Output = Mat4<T>;

    fn sub(self, o: Mat4<T>) -> Mat4<T> {
        Mat4 {
            m: [
                self.m[0] - o.m[0],
                self.m[1] - o.m[1],
                self.m[2] - o.m[2],
                self.m[3] - o.m[3],
            ],
        }
    }
}

impl<T: Float> Mul for Mat4<T> {
    type Output = Mat4<T>;

    fn mul(self, o: Mat4<T>) -> Mat4<T> {
        let c = [
            o.get_column(0),
            o.get_column(1),
            o.get_column(2),
            o.get_column(3),
        ];
        let row = |r: Vec4<T>| Vec4 {
            x: r.dot(c[0]),
            y: r.dot(c[1]),
            z: r.dot(c[2]),
            w: r.dot(c[3]),
        };
        Mat4 {
            m: [row(self.m[0]), row(self.m[1]), row(self.m[2]), row(self.m[3])],
        }
    }
}

impl<T: Float + AbsDiffEq<Epsilon = T>> AbsDiffEq for Mat4<T> {
    type Epsilon = T;

    fn default_epsilon() -> T {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, o: &Self, epsilon: T) -> bool {
        self.m
            .iter()
            .zip(o.m.iter())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}
