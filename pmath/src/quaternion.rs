use crate::matrix::Mat4;
use crate::numbers::Float;
use crate::vector::{Vec3, Vec4};

use approx::AbsDiffEq;
use num_traits::clamp;

use std::ops::{Add, Mul, Neg, Sub};

/// When the cosine of the angle between two quaternions is above `1 - SLERP_EPS`
/// slerp falls back to a normalized lerp. This constant is used in pbrt.
pub const SLERP_EPS: f64 = 0.0005;

/// A quaternion `w + xi + yj + zk`. Only unit quaternions represent rotations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quat<T: Float> {
    pub xyz: Vec3<T>,
    pub w: T,
}

impl<T: Float> Quat<T> {
    pub fn new(x: T, y: T, z: T, w: T) -> Self {
        Quat {
            xyz: Vec3 { x, y, z },
            w,
        }
    }

    pub fn new_identity() -> Self {
        Quat {
            xyz: Vec3::zero(),
            w: T::one(),
        }
    }

    /// Extracts the rotation from the upper 3x3 part of `mat`, which must be
    /// orthonormal. Uses Shepperd's method: when the trace isn't positive we pivot
    /// on the largest diagonal element so we never divide by a tiny number.
    pub fn from_mat4(mat: Mat4<T>) -> Self {
        let tr = mat[0][0] + mat[1][1] + mat[2][2];

        if tr > T::zero() {
            let s = (tr + T::one()).sqrt();
            let w = s * T::half();
            let s = T::half() / s;
            let xyz = Vec3 {
                x: (mat[2][1] - mat[1][2]) * s,
                y: (mat[0][2] - mat[2][0]) * s,
                z: (mat[1][0] - mat[0][1]) * s,
            };

            Quat { xyz, w }
        } else {
            // Cycle through 0 -> 1 -> 2 -> 0 starting at the largest diagonal:
            let (i, j, k) = if mat[0][0] >= mat[1][1] && mat[0][0] >= mat[2][2] {
                (0, 1, 2)
            } else if mat[1][1] >= mat[2][2] {
                (1, 2, 0)
            } else {
                (2, 0, 1)
            };

            let mut xyz = Vec3::zero();

            let s = (mat[i][i] - (mat[j][j] + mat[k][k]) + T::one()).sqrt();
            xyz[i] = s * T::half();
            let s = if s != T::zero() { T::half() / s } else { s };
            xyz[j] = s * (mat[j][i] + mat[i][j]);
            xyz[k] = s * (mat[k][i] + mat[i][k]);

            let w = s * (mat[k][j] - mat[j][k]);

            Quat { xyz, w }
        }
    }

    /// The pure rotation matrix of a unit quaternion (the translation is zero).
    pub fn to_mat4(self) -> Mat4<T> {
        let x2 = self.xyz.x * self.xyz.x;
        let y2 = self.xyz.y * self.xyz.y;
        let z2 = self.xyz.z * self.xyz.z;

        let xy = self.xyz.x * self.xyz.y;
        let xz = self.xyz.x * self.xyz.z;
        let yz = self.xyz.y * self.xyz.z;

        let wx = self.xyz.x * self.w;
        let wy = self.xyz.y * self.w;
        let wz = self.xyz.z * self.w;

        let two = T::two();

        let r0 = Vec4 {
            x: T::one() - two * (y2 + z2),
            y: two * (xy - wz),
            z: two * (xz + wy),
            w: T::zero(),
        };

        let r1 = Vec4 {
            x: two * (xy + wz),
            y: T::one() - two * (x2 + z2),
            z: two * (yz - wx),
            w: T::zero(),
        };

        let r2 = Vec4 {
            x: two * (xz - wy),
            y: two * (yz + wx),
            z: T::one() - two * (x2 + y2),
            w: T::zero(),
        };

        let r3 = Vec4 {
            x: T::zero(),
            y: T::zero(),
            z: T::zero(),
            w: T::one(),
        };

        Mat4::new([r0, r1, r2, r3])
    }

    /// Spherical linear interpolation from `self` (t = 0) to `q2` (t = 1).
    pub fn slerp(self, q2: Self, t: T) -> Self {
        let cos_theta = self.dot(q2);
        if cos_theta > T::one() - T::from_f64(SLERP_EPS) {
            (self.scale(T::one() - t) + q2.scale(t)).normalize()
        } else {
            // Opposite quaternions don't define a plane to rotate in, so any
            // direction orthogonal to self will do:
            let perp = q2 - self.scale(cos_theta);
            let (theta, q_perp) = if perp.length2() > T::epsilon() {
                (clamp(cos_theta, -T::one(), T::one()).acos(), perp.normalize())
            } else {
                let ortho = Quat::new(-self.xyz.y, self.xyz.x, -self.w, self.xyz.z);
                (T::PI, ortho.normalize())
            };
            let theta_p = theta * t;

            self.scale(theta_p.cos()) + q_perp.scale(theta_p.sin())
        }
    }

    pub fn dot(self, o: Self) -> T {
        self.xyz.dot(o.xyz) + self.w * o.w
    }

    pub fn length2(self) -> T {
        self.dot(self)
    }

    pub fn length(self) -> T {
        self.length2().sqrt()
    }

    pub fn normalize(self) -> Self {
        let inv_len = T::one() / self.length();
        self.scale(inv_len)
    }

    pub fn scale(self, s: T) -> Self {
        Quat {
            xyz: self.xyz.scale(s),
            w: self.w * s,
        }
    }
}

impl<T: Float> Neg for Quat<T> {
    type Output = Self;

    fn neg(self) -> Self {
        Quat {
            xyz: -self.xyz,
            w: -self.w,
        }
    }
}

impl<T: Float> Mul for Quat<T> {
    type Output = Self;

    fn mul(self, o: Quat<T>) -> Self {
        Quat {
            xyz: self.xyz.cross(o.xyz) + o.xyz.scale(self.w) + self.xyz.scale(o.w),
            w: self.w * o.w - self.xyz.dot(o.xyz),
        }
    }
}

impl<T: Float> Add for Quat<T> {
    type Output = Self;

    fn add(self, o: Quat<T>) -> Self {
        Quat {
            xyz: self.xyz + o.xyz,
            w: self.w + o.w,
        }
    }
}

impl<T: Float> Sub for Quat<T> {
    type Output = Self;

    fn sub(self, o: Quat<T>) -> Self {
        Quat {
            xyz: self.xyz - o.xyz,
            w: self.w - o.w,
        }
    }
}

impl<T: Float + AbsDiffEq<Epsilon = T>> AbsDiffEq for Quat<T> {
    type Epsilon = T;

    fn default_epsilon() -> T {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, o: &Self, epsilon: T) -> bool {
        self.xyz.abs_diff_eq(&o.xyz, epsilon) && self.w.abs_diff_eq(&o.w, epsilon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn axis_angle(deg: f64, axis: Vec3<f64>) -> Quat<f64> {
        let half = deg.to_radians() * 0.5;
        let a = axis.normalize().scale(half.sin());
        Quat::new(a.x, a.y, a.z, half.cos())
    }

    // q and -q are the same rotation:
    fn assert_same_rotation(a: Quat<f64>, b: Quat<f64>) {
        let b = if a.dot(b) < 0. { -b } else { b };
        assert_abs_diff_eq!(a, b, epsilon = 1e-9);
    }

    #[test]
    fn to_mat4_matches_axis_rotation() {
        let q = axis_angle(90., Vec3::new(0., 0., 1.));
        assert_abs_diff_eq!(q.to_mat4(), Mat4::new_rotate_z(90.), epsilon = 1e-12);

        let axis = Vec3::new(1., 2., -0.5);
        let q = axis_angle(-140., axis);
        assert_abs_diff_eq!(q.to_mat4(), Mat4::new_rotate(-140., axis), epsilon = 1e-12);
    }

    #[test]
    fn from_mat4_round_trip() {
        let axes = [
            Vec3::new(1., 0., 0.),
            Vec3::new(0., 1., 0.),
            Vec3::new(0., 0., 1.),
            Vec3::new(1., 1., 1.),
            Vec3::new(-3., 0.2, 1.5),
        ];
        for &axis in axes.iter() {
            for &deg in [0., 10., 90., 179., 180., 230., 359.].iter() {
                let q = axis_angle(deg, axis);
                assert_same_rotation(q, Quat::from_mat4(q.to_mat4()));
            }
        }
    }

    #[test]
    fn from_mat4_half_turns() {
        // Trace is -1 for every half turn, the pivoting branch has to pick the axis:
        for &(m, axis) in [
            (Mat4::new_rotate_x(180.), Vec3::new(1., 0., 0.)),
            (Mat4::new_rotate_y(180.), Vec3::new(0., 1., 0.)),
            (Mat4::new_rotate_z(180.), Vec3::new(0., 0., 1.)),
        ]
        .iter()
        {
            let q = Quat::from_mat4(m);
            assert_abs_diff_eq!(q.length(), 1., epsilon = 1e-12);
            assert_same_rotation(q, Quat::new(axis.x, axis.y, axis.z, 0.));
        }
    }

    #[test]
    fn slerp_endpoints() {
        let q1 = axis_angle(20., Vec3::new(0., 1., 0.));
        let q2 = axis_angle(150., Vec3::new(1., 0., 1.));
        assert_abs_diff_eq!(q1.slerp(q2, 0.), q1, epsilon = 1e-12);
        assert_abs_diff_eq!(q1.slerp(q2, 1.), q2, epsilon = 1e-12);
    }

    #[test]
    fn slerp_same_quaternion() {
        let q = axis_angle(75., Vec3::new(1., -1., 2.));
        for &t in [0., 0.25, 0.5, 0.9, 1.].iter() {
            assert_abs_diff_eq!(q.slerp(q, t), q, epsilon = 1e-12);
        }
    }

    #[test]
    fn slerp_has_constant_angular_velocity() {
        let q1 = Quat::new_identity();
        let q2 = axis_angle(120., Vec3::new(0., 0., 1.));
        let half = q1.slerp(q2, 0.5);
        assert_abs_diff_eq!(half, axis_angle(60., Vec3::new(0., 0., 1.)), epsilon = 1e-12);
        assert_abs_diff_eq!(half.length(), 1., epsilon = 1e-12);
    }

    #[test]
    fn slerp_nearly_parallel_stays_unit() {
        let q1 = axis_angle(10., Vec3::new(0., 0., 1.));
        let q2 = axis_angle(10.01, Vec3::new(0., 0., 1.));
        let q = q1.slerp(q2, 0.3);
        assert_abs_diff_eq!(q.length(), 1., epsilon = 1e-12);
        assert!(q.xyz.z > q1.xyz.z && q.xyz.z < q2.xyz.z);
    }

    #[test]
    fn slerp_opposite_quaternions() {
        let q = Quat::new(0., 0., 0.5f64.sin(), 0.5f64.cos());
        assert_abs_diff_eq!(q.slerp(-q, 0.), q, epsilon = 1e-12);
        assert_abs_diff_eq!(q.slerp(-q, 1.), -q, epsilon = 1e-12);

        for &t in [0.25, 0.5, 0.75].iter() {
            let r = q.slerp(-q, t);
            assert!(r.xyz.is_finite() && r.w.is_finite());
            assert_abs_diff_eq!(r.length(), 1., epsilon = 1e-12);
        }
        // Halfway is a quarter turn away from both ends:
        assert_abs_diff_eq!(q.slerp(-q, 0.5).dot(q), 0., epsilon = 1e-12);
    }

    #[test]
    fn hamilton_product_composes_rotations() {
        let a = axis_angle(30., Vec3::new(0., 0., 1.));
        let b = axis_angle(45., Vec3::new(0., 0., 1.));
        assert_abs_diff_eq!(a * b, axis_angle(75., Vec3::new(0., 0., 1.)), epsilon = 1e-12);
        let c = axis_angle(90., Vec3::new(1., 0., 0.));
        assert_abs_diff_eq!((a * c).to_mat4(), a.to_mat4() * c.to_mat4(), epsilon = 1e-12);
    }
}
