// This holds traits that are used throughout the program
// to make things easy for us:

use num_traits;

use std::fmt::Debug;

// This is my own float trait versus the num_traits' one:

pub trait Float: num_traits::Float + Debug {
    const PI: Self;

    // These could be constants, but to mimick the design of num_traits' float
    // we'll make them functions:
    fn two() -> Self;
    fn half() -> Self;

    /// Lossy conversion from an f64 literal. Used so that generic code never has
    /// to go through `NumCast` (which returns an `Option`).
    fn from_f64(v: f64) -> Self;
}

impl Float for f32 {
    const PI: Self = 3.14159265358979323846;

    fn two() -> Self {
        2f32
    }

    fn half() -> Self {
        0.5f32
    }

    fn from_f64(v: f64) -> Self {
        v as f32
    }
}

impl Float for f64 {
    const PI: Self = 3.14159265358979323846;

    fn two() -> Self {
        2.
    }

    fn half() -> Self {
        0.5
    }

    fn from_f64(v: f64) -> Self {
        v
    }
}

/// Linearly interpolates between `v0` and `v1`.
pub fn lerp<T: Float>(t: T, v0: T, v1: T) -> T {
    (T::one() - t) * v0 + t * v1
}

pub fn deg_to_rad<T: Float>(deg: T) -> T {
    deg * (T::PI / T::from_f64(180.))
}

// This is used so that we can have efficient comparisons
// with PartialOrd types:

pub fn min<T: PartialOrd>(v0: T, v1: T) -> T {
    if v0 < v1 {
        v0
    } else {
        v1
    }
}

pub fn max<T: PartialOrd>(v0: T, v1: T) -> T {
    if v0 > v1 {
        v0
    } else {
        v1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_hits_endpoints() {
        assert_eq!(lerp(0., 2., 6.), 2.);
        assert_eq!(lerp(1., 2., 6.), 6.);
        assert_eq!(lerp(0.5, 2., 6.), 4.);
    }

    #[test]
    fn deg_to_rad_right_angle() {
        assert!((deg_to_rad(90f64) - f64::PI / 2.).abs() < 1e-15);
        assert!((deg_to_rad(180f32) - f32::PI).abs() < 1e-6);
    }
}
