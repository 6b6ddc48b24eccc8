// A static transformation is one that is independent of time.
// So, regardless of the time that is passed to it, it doesn't
// change it's transformation.

use crate::error::{Result, TransformError};
use crate::transform::{Geom, Transform};

use approx::AbsDiffEq;
use pmath::bbox::BBox3;
use pmath::matrix::Mat4;
use pmath::ray::Ray;
use pmath::vector::Vec3;

use std::ops::Mul;

/// How far the homogeneous coordinate may stray from 1 before a transformed point
/// gets the perspective divide.
pub const W_EPS: f64 = 1e-9;

// Squared axis lengths within this distance of 1 don't count as scale:
const SCALE_EPS: f64 = 1e-3;

/// An invertible transformation. The forward matrix and its inverse are both kept
/// around, and can't be modified once constructed, so they never go out of sync.
#[derive(Clone, Copy, Debug)]
pub struct Transf {
    frd: Mat4<f64>,
    inv: Mat4<f64>,
}

impl Transf {
    /// Inverts `mat` to build the transformation. Fails if `mat` is singular.
    pub fn from_mat4(mat: Mat4<f64>) -> Result<Self> {
        if !mat.is_finite() {
            return Err(TransformError::InvalidTransform(
                "matrix has non-finite entries".to_string(),
            ));
        }
        match mat.inverse() {
            Some(inv) => Ok(Transf { frd: mat, inv }),
            None => Err(TransformError::InvalidTransform(
                "matrix is singular and no inverse was supplied".to_string(),
            )),
        }
    }

    /// Builds the transformation from a matrix and its already known inverse.
    /// Nothing is checked: `inv` has to be the inverse of `mat`.
    pub fn from_mat4_inv(mat: Mat4<f64>, inv: Mat4<f64>) -> Self {
        Transf { frd: mat, inv }
    }

    /// Builds the transformation from rows of arbitrary length, which have to
    /// describe an invertible 4x4 matrix.
    pub fn from_rows(rows: &[&[f64]]) -> Result<Self> {
        if rows.len() != 4 || rows.iter().any(|r| r.len() != 4) {
            let shape: Vec<usize> = rows.iter().map(|r| r.len()).collect();
            return Err(TransformError::InvalidTransform(format!(
                "matrix must be 4x4, got {} rows with lengths {:?}",
                rows.len(),
                shape
            )));
        }

        let mut arr = [[0.; 4]; 4];
        for (dst, src) in arr.iter_mut().zip(rows.iter()) {
            dst.copy_from_slice(src);
        }
        Self::from_mat4(Mat4::from_arr(arr))
    }

    // Create a Transf from a bunch of common ones:

    pub fn new_identity() -> Self {
        Transf {
            frd: Mat4::new_identity(),
            inv: Mat4::new_identity(),
        }
    }

    pub fn new_translate(trans: Vec3<f64>) -> Self {
        Transf {
            frd: Mat4::new_translate(trans),
            inv: Mat4::new_translate(-trans),
        }
    }

    /// Scales each axis by the matching component of `scale`.
    pub fn new_scale(scale: Vec3<f64>) -> Self {
        Transf {
            frd: Mat4::new_scale(scale),
            inv: Mat4::new_scale(scale.inv_scale(1.)),
        }
    }

    // The inverse of a rotation matrix is its transpose for all of these:

    pub fn new_rotate_x(deg: f64) -> Self {
        let frd = Mat4::new_rotate_x(deg);
        Transf {
            frd,
            inv: frd.transpose(),
        }
    }

    pub fn new_rotate_y(deg: f64) -> Self {
        let frd = Mat4::new_rotate_y(deg);
        Transf {
            frd,
            inv: frd.transpose(),
        }
    }

    pub fn new_rotate_z(deg: f64) -> Self {
        let frd = Mat4::new_rotate_z(deg);
        Transf {
            frd,
            inv: frd.transpose(),
        }
    }

    pub fn new_rotate(deg: f64, axis: Vec3<f64>) -> Self {
        let frd = Mat4::new_rotate(deg, axis);
        Transf {
            frd,
            inv: frd.transpose(),
        }
    }

    /// Creates a lookat transformation. This is a transformation that goes from
    /// camera to world space: the camera sits at `pos` and looks down its positive
    /// z-axis towards `look`, with its y-axis as close to `up` as possible.
    pub fn new_lookat(pos: Vec3<f64>, look: Vec3<f64>, up: Vec3<f64>) -> Self {
        let zc = (look - pos).normalize();
        let xc = up.normalize().cross(zc).normalize();
        let yc = zc.cross(xc);

        // Camera axes are the columns of camera-to-world:
        let frd = Mat4::from_arr([
            [xc.x, yc.x, zc.x, pos.x],
            [xc.y, yc.y, zc.y, pos.y],
            [xc.z, yc.z, zc.z, pos.z],
            [0., 0., 0., 1.],
        ]);

        // And the rows of world-to-camera:
        let inv = Mat4::from_arr([
            [xc.x, xc.y, xc.z, -xc.dot(pos)],
            [yc.x, yc.y, yc.z, -yc.dot(pos)],
            [zc.x, zc.y, zc.z, -zc.dot(pos)],
            [0., 0., 0., 1.],
        ]);

        Transf { frd, inv }
    }

    /// Inverses the transformation
    pub fn inverse(&self) -> Self {
        Transf {
            frd: self.inv,
            inv: self.frd,
        }
    }

    // Returns the forward matrix:
    pub fn get_frd(self) -> Mat4<f64> {
        self.frd
    }

    pub fn get_inv(self) -> Mat4<f64> {
        self.inv
    }

    pub fn is_identity(self) -> bool {
        self.frd == Mat4::new_identity()
    }

    /// Whether any of the axes gets stretched or shrunk by the transformation.
    pub fn has_scale(self) -> bool {
        let la2 = self.vector(Vec3::new(1., 0., 0.)).length2();
        let lb2 = self.vector(Vec3::new(0., 1., 0.)).length2();
        let lc2 = self.vector(Vec3::new(0., 0., 1.)).length2();
        let not_one = |x: f64| (x - 1.).abs() > SCALE_EPS;
        not_one(la2) || not_one(lb2) || not_one(lc2)
    }

    /// Whether the transformation turns a right-handed coordinate system into a
    /// left-handed one. Shading code flips normals based on this.
    pub fn swaps_handedness(self) -> bool {
        self.frd.det3() < 0.
    }

    pub fn point(self, p: Vec3<f64>) -> Vec3<f64> {
        let r = self.frd.mul_vec_one(p);
        let pr = Vec3::from_vec4(r);
        if (r.w - 1.).abs() > W_EPS {
            pr.scale(1. / r.w)
        } else {
            pr
        }
    }

    pub fn points(self, ps: &mut [Vec3<f64>]) {
        for p in ps.iter_mut() {
            *p = self.point(*p);
        }
    }

    pub fn vector(self, v: Vec3<f64>) -> Vec3<f64> {
        self.frd.mul_vec_zero(v)
    }

    pub fn vectors(self, vs: &mut [Vec3<f64>]) {
        for v in vs.iter_mut() {
            *v = self.frd.mul_vec_zero(*v);
        }
    }

    /// Normals go through the inverse transpose so they stay perpendicular to the
    /// surface under non-uniform scale. The result isn't renormalized.
    pub fn normal(self, n: Vec3<f64>) -> Vec3<f64> {
        self.inv.transpose().mul_vec_zero(n)
    }

    pub fn normals(self, ns: &mut [Vec3<f64>]) {
        let mat = self.inv.transpose();
        for n in ns.iter_mut() {
            *n = mat.mul_vec_zero(*n);
        }
    }

    pub fn ray(self, r: Ray<f64>) -> Ray<f64> {
        Ray {
            org: self.point(r.org),
            dir: self.vector(r.dir),
            time: r.time,
            t_near: r.t_near,
            t_far: r.t_far,
        }
    }

    /// Bounds the transformed box. The min corner goes through as a point and the
    /// three edges as vectors, the result bounds the parallelepiped they span.
    pub fn bbox(self, b: BBox3<f64>) -> BBox3<f64> {
        if b.is_empty() {
            return b;
        }

        let d = b.diagonal();
        let p0 = self.point(b.pmin);
        let edges = [
            self.vector(Vec3::new(d.x, 0., 0.)),
            self.vector(Vec3::new(0., d.y, 0.)),
            self.vector(Vec3::new(0., 0., d.z)),
        ];

        let zero = Vec3::zero();
        let (pmin, pmax) = edges.iter().fold((p0, p0), |(pmin, pmax), e| {
            (pmin + e.min(zero), pmax + e.max(zero))
        });

        BBox3 { pmin, pmax }
    }

    /// Transforms whatever `g` holds according to its kind.
    pub fn apply(self, g: Geom) -> Geom {
        match g {
            Geom::Point(p) => Geom::Point(self.point(p)),
            Geom::Vector(v) => Geom::Vector(self.vector(v)),
            Geom::Normal(n) => Geom::Normal(self.normal(n)),
            Geom::Ray(r) => Geom::Ray(self.ray(r)),
            Geom::BBox(b) => Geom::BBox(self.bbox(b)),
        }
    }
}

impl Default for Transf {
    fn default() -> Self {
        Transf::new_identity()
    }
}

impl PartialEq for Transf {
    fn eq(&self, o: &Self) -> bool {
        self.frd == o.frd
    }
}

// Compares both matrices, unlike PartialEq:
impl AbsDiffEq for Transf {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, o: &Self, epsilon: f64) -> bool {
        self.frd.abs_diff_eq(&o.frd, epsilon) && self.inv.abs_diff_eq(&o.inv, epsilon)
    }
}

// Applies rhs first, then self:
impl Mul for Transf {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Transf {
            frd: self.frd * rhs.frd,
            inv: rhs.inv * self.inv,
        }
    }
}

impl Transform for Transf {
    fn point(&self, p: Vec3<f64>, _time: f64) -> Vec3<f64> {
        Transf::point(*self, p)
    }

    fn vector(&self, v: Vec3<f64>, _time: f64) -> Vec3<f64> {
        Transf::vector(*self, v)
    }

    fn normal(&self, n: Vec3<f64>, _time: f64) -> Vec3<f64> {
        Transf::normal(*self, n)
    }

    fn ray(&self, r: Ray<f64>) -> Ray<f64> {
        Transf::ray(*self, r)
    }
}
