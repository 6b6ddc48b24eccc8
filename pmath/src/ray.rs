use crate::numbers::Float;
use crate::vector::Vec3;

/// A ray used to intersect a scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray<T: Float> {
    /// The origin point of the ray.
    pub org: Vec3<T>,
    /// The direction vector of the ray.
    pub dir: Vec3<T>,
    /// The current time in the scene of the ray.
    pub time: T,
    /// Where along the ray to start checking for intersections.
    pub t_near: T,
    /// The max extent of the ray to consider when tracing against geometry.
    pub t_far: T,
}

impl<T: Float> Ray<T> {
    /// Constructs a new Ray for intersecting a scene, that is, without
    /// a parametric restriction.
    pub fn new(org: Vec3<T>, dir: Vec3<T>, time: T) -> Self {
        Ray {
            org,
            dir,
            time,
            t_near: T::zero(),
            t_far: T::infinity(),
        }
    }
}
