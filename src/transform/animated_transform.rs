// An animated transform is one that animates between
// two static transformations.

use crate::error::{Result, TransformError};
use crate::transform::static_transform::Transf;
use crate::transform::{Geom, Transform};

use log::{debug, trace, warn};
use pmath::bbox::BBox3;
use pmath::matrix::Mat4;
use pmath::numbers::lerp;
use pmath::quaternion::Quat;
use pmath::ray::Ray;
use pmath::vector::{Vec3, Vec4};

/// Iteration cap for the polar decomposition.
pub const MAX_POLAR_ITERS: u32 = 100;
/// The polar decomposition stops once no row of the rotation changes by more than this.
pub const POLAR_EPS: f64 = 1e-4;
/// Number of time samples used to bound the motion of a bounding box.
pub const MOTION_BOUND_SAMPLES: usize = 128;

/// Knobs for decomposing keyframes and bounding motion.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimParam {
    /// The max number of iterations the polar decomposition may take
    pub max_polar_iters: u32,
    /// Convergence threshold of the polar decomposition
    pub polar_eps: f64,
    /// The number of times sampled by `motion_bounds` (at least 2 are always taken)
    pub motion_bound_samples: usize,
}

impl Default for AnimParam {
    fn default() -> Self {
        AnimParam {
            max_polar_iters: MAX_POLAR_ITERS,
            polar_eps: POLAR_EPS,
            motion_bound_samples: MOTION_BOUND_SAMPLES,
        }
    }
}

/// An affine matrix split into `translate(trans) * rot * scale`. `scale` may
/// also hold shear.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Decomposition {
    pub trans: Vec3<f64>,
    pub rot: Quat<f64>,
    pub scale: Mat4<f64>,
}

impl Decomposition {
    /// Decomposes `mat`, which must be affine. The rotation comes from a polar
    /// decomposition: R_{i+1} = (R_i + R_i^-T) / 2 converges to the orthogonal
    /// factor of the linear part. If it doesn't converge in time, or hits a singular
    /// iterate, the last estimate is used.
    pub fn new(mat: Mat4<f64>, param: &AnimParam) -> Self {
        let trans = Vec3::from_vec4(mat.get_column(3));

        // keep the rotational information that we are interested
        // in this case:
        let mut upper_mat = mat;
        for r in 0..3 {
            upper_mat[r][3] = 0.;
        }
        upper_mat[3] = Vec4::new(0., 0., 0., 1.);

        // Polar decomposition:
        let mut r_mat = upper_mat;
        let mut converged = false;
        for count in 0..param.max_polar_iters {
            let r_it = match r_mat.transpose().inverse() {
                Some(m) => m,
                None => {
                    warn!("singular matrix during polar decomposition, using the estimate after {} iterations", count);
                    break;
                }
            };
            let r_next = (r_mat + r_it).scale(0.5);

            let n0 = (r_mat[0] - r_next[0]).abs().horizontal_add();
            let n1 = (r_mat[1] - r_next[1]).abs().horizontal_add();
            let n2 = (r_mat[2] - r_next[2]).abs().horizontal_add();
            let norm = n0.max(n1.max(n2));

            r_mat = r_next;
            if norm <= param.polar_eps {
                trace!("polar decomposition converged after {} iterations", count + 1);
                converged = true;
                break;
            }
        }
        if !converged && param.max_polar_iters > 0 {
            warn!(
                "polar decomposition did not converge within {} iterations",
                param.max_polar_iters
            );
        }

        // A mirror gives an orthogonal factor with determinant -1. Flip it so it's a
        // proper rotation, the reflection ends up in the scale:
        if r_mat.det3() < 0. {
            for r in 0..3 {
                r_mat[r] = -r_mat[r];
                r_mat[r][3] = 0.;
            }
        }

        // The scale is taken relative to the rotation we actually store, so that
        // translate * rot * scale gives back the matrix even if R isn't quite orthogonal:
        let rot = Quat::from_mat4(r_mat).normalize();
        let scale = rot.to_mat4().transpose() * upper_mat;

        Decomposition { trans, rot, scale }
    }

    /// Puts the pieces back together as `translate * rotate * scale`.
    pub fn to_mat4(self) -> Mat4<f64> {
        Mat4::new_translate(self.trans) * self.rot.to_mat4() * self.scale
    }
}

#[derive(Clone, Copy, Debug)]
pub struct AnimatedTransf {
    start_transf: Transf,
    end_transf: Transf,

    start_time: f64,
    end_time: f64,

    // Decomposed information:
    start_dec: Decomposition,
    end_dec: Decomposition,

    animated: bool,
    param: AnimParam,
}

impl AnimatedTransf {
    /// Animates from `start_transf` at `start_time` to `end_transf` at `end_time`.
    pub fn new(
        start_transf: Transf,
        start_time: f64,
        end_transf: Transf,
        end_time: f64,
    ) -> Result<Self> {
        Self::with_param(
            start_transf,
            start_time,
            end_transf,
            end_time,
            AnimParam::default(),
        )
    }

    pub fn with_param(
        start_transf: Transf,
        start_time: f64,
        end_transf: Transf,
        end_time: f64,
        param: AnimParam,
    ) -> Result<Self> {
        // Written this way so NaN fails as well:
        if !(start_time < end_time) || !start_time.is_finite() || !end_time.is_finite() {
            return Err(TransformError::InvalidTimeRange {
                start: start_time,
                end: end_time,
            });
        }

        let start_dec = Decomposition::new(start_transf.get_frd(), &param);
        let mut end_dec = Decomposition::new(end_transf.get_frd(), &param);

        // q and -q are the same rotation, pick the one that takes the short way around:
        if start_dec.rot.dot(end_dec.rot) < 0. {
            end_dec.rot = -end_dec.rot;
        }

        let animated = start_transf != end_transf;
        debug!(
            "animated transform over [{}, {}], animated: {}",
            start_time, end_time, animated
        );

        Ok(AnimatedTransf {
            start_transf,
            end_transf,
            start_time,
            end_time,
            start_dec,
            end_dec,
            animated,
            param,
        })
    }

    pub fn is_animated(&self) -> bool {
        self.animated
    }

    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    pub fn end_time(&self) -> f64 {
        self.end_time
    }

    pub fn start_transf(&self) -> Transf {
        self.start_transf
    }

    pub fn end_transf(&self) -> Transf {
        self.end_transf
    }

    pub fn param(&self) -> AnimParam {
        self.param
    }

    /// The cached decompositions of the start and end keyframes.
    pub fn decomposition(&self) -> (Decomposition, Decomposition) {
        (self.start_dec, self.end_dec)
    }

    /// The transformation at `time`. Times outside of the range clamp to the
    /// keyframes, and a transform that isn't animated is always the start one.
    pub fn interpolate(&self, time: f64) -> Transf {
        // Check if the time is out of bounds, in which case we just return
        // the transform we care about:
        if !self.animated || time <= self.start_time {
            return self.start_transf;
        }
        if time >= self.end_time {
            return self.end_transf;
        }

        let dt = (time - self.start_time) / (self.end_time - self.start_time);
        let trans = self.start_dec.trans.lerp(self.end_dec.trans, dt);
        let rot = self.start_dec.rot.slerp(self.end_dec.rot, dt);
        let scale = self.start_dec.scale.lerp(self.end_dec.scale, dt);

        let rot_mat = rot.to_mat4();
        let frd = Mat4::new_translate(trans) * rot_mat * scale;
        match scale.inverse() {
            Some(scale_inv) => {
                let inv = scale_inv * rot_mat.transpose() * Mat4::new_translate(-trans);
                Transf::from_mat4_inv(frd, inv)
            }
            None => {
                // The scale passes through zero here, fall back to the closest keyframe:
                warn!("interpolated transform at time {} is singular", time);
                if dt < 0.5 {
                    self.start_transf
                } else {
                    self.end_transf
                }
            }
        }
    }

    pub fn point(&self, time: f64, p: Vec3<f64>) -> Vec3<f64> {
        self.interpolate(time).point(p)
    }

    pub fn vector(&self, time: f64, v: Vec3<f64>) -> Vec3<f64> {
        self.interpolate(time).vector(v)
    }

    pub fn normal(&self, time: f64, n: Vec3<f64>) -> Vec3<f64> {
        self.interpolate(time).normal(n)
    }

    /// Transforms the ray at its own time. The time of the result is always the
    /// time of `r`.
    pub fn ray(&self, r: Ray<f64>) -> Ray<f64> {
        let mut tr = self.interpolate(r.time).ray(r);
        tr.time = r.time;
        tr
    }

    /// Transforms `g` at `time`. Rays use their own time instead. Bounding boxes
    /// aren't supported: use `motion_bounds` to bound them over the whole range.
    pub fn apply_at(&self, time: f64, g: Geom) -> Result<Geom> {
        match g {
            Geom::Point(p) => Ok(Geom::Point(self.point(time, p))),
            Geom::Vector(v) => Ok(Geom::Vector(self.vector(time, v))),
            Geom::Normal(n) => Ok(Geom::Normal(self.normal(time, n))),
            Geom::Ray(r) => Ok(Geom::Ray(self.ray(r))),
            Geom::BBox(_) => Err(TransformError::UnsupportedOperand(
                "an animated transform bounds boxes over time with motion_bounds",
            )),
        }
    }

    /// The times `motion_bounds` samples: evenly spaced, both ends included.
    pub fn motion_sample_times(&self) -> impl Iterator<Item = f64> {
        let n = self.param.motion_bound_samples.max(2);
        let (start, end) = (self.start_time, self.end_time);
        (0..n).map(move |i| lerp(i as f64 / (n - 1) as f64, start, end))
    }

    /// Bounds `b` over the whole motion (or bounds the motion of the inverse
    /// transform when `use_inverse` is set). The bound is built from samples in
    /// time, so it contains every sampled pose but isn't exact.
    pub fn motion_bounds(&self, b: BBox3<f64>, use_inverse: bool) -> BBox3<f64> {
        let pick = |t: Transf| if use_inverse { t.inverse() } else { t };

        if !self.animated {
            return pick(self.start_transf).bbox(b);
        }

        self.motion_sample_times()
            .fold(BBox3::new(), |bnd, time| {
                bnd.combine_bnd(pick(self.interpolate(time)).bbox(b))
            })
    }
}

impl Transform for AnimatedTransf {
    fn point(&self, p: Vec3<f64>, time: f64) -> Vec3<f64> {
        AnimatedTransf::point(self, time, p)
    }

    fn vector(&self, v: Vec3<f64>, time: f64) -> Vec3<f64> {
        AnimatedTransf::vector(self, time, v)
    }

    fn normal(&self, n: Vec3<f64>, time: f64) -> Vec3<f64> {
        AnimatedTransf::normal(self, time, n)
    }

    fn ray(&self, r: Ray<f64>) -> Ray<f64> {
        AnimatedTransf::ray(self, r)
    }
}
