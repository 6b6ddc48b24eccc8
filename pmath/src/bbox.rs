use crate::numbers::Float;
use crate::vector::Vec3;

use std::ops::Index;

/// A 3d bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BBox3<T: Float> {
    pub pmin: Vec3<T>,
    pub pmax: Vec3<T>,
}

impl<T: Float> BBox3<T> {
    /// Constructs a new, empty, `BBox3`. Combining anything with it gives back
    /// that thing.
    pub fn new() -> Self {
        BBox3 {
            pmin: Vec3 {
                x: T::infinity(),
                y: T::infinity(),
                z: T::infinity(),
            },
            pmax: Vec3 {
                x: T::neg_infinity(),
                y: T::neg_infinity(),
                z: T::neg_infinity(),
            },
        }
    }

    /// Creates a new `BBox3` from two points.
    pub fn from_pnts(pnt0: Vec3<T>, pnt1: Vec3<T>) -> Self {
        BBox3 {
            pmin: pnt0.min(pnt1),
            pmax: pnt0.max(pnt1),
        }
    }

    /// Creates a new `BBox3` from a single point (box has no volume).
    pub fn from_pnt(pnt: Vec3<T>) -> Self {
        BBox3 {
            pmin: pnt,
            pmax: pnt,
        }
    }

    /// True if the box contains no points at all (any `pmin` above `pmax`).
    pub fn is_empty(self) -> bool {
        self.pmin.x > self.pmax.x || self.pmin.y > self.pmax.y || self.pmin.z > self.pmax.z
    }

    /// Used to get a specific corner given the index. Panics if the index is out of range.
    pub fn corner(self, i: usize) -> Vec3<T> {
        let x = self[i & 1].x;
        let y = self[if i & 2 != 0 { 1 } else { 0 }].y;
        let z = self[if i & 4 != 0 { 1 } else { 0 }].z;
        Vec3 { x, y, z }
    }

    /// Creates a new `BBox3` that encompases the box and another point.
    pub fn combine_pnt(self, pnt: Vec3<T>) -> Self {
        let pmin = self.pmin.min(pnt);
        let pmax = self.pmax.max(pnt);
        BBox3 { pmin, pmax }
    }

    /// Creates a new `BBox3` that encompases the box and another box.
    pub fn combine_bnd(self, bnd: BBox3<T>) -> Self {
        let pmin = self.pmin.min(bnd.pmin);
        let pmax = self.pmax.max(bnd.pmax);
        BBox3 { pmin, pmax }
    }

    /// Whether `bnd` lies completely inside this box, with `eps` of slack on every side.
    pub fn contains_bnd(self, bnd: BBox3<T>, eps: T) -> bool {
        bnd.is_empty()
            || (0..3).all(|i| {
                bnd.pmin[i] >= self.pmin[i] - eps && bnd.pmax[i] <= self.pmax[i] + eps
            })
    }

    /// Returns a vector spanning the diagonal of the bounding box.
    pub fn diagonal(self) -> Vec3<T> {
        self.pmax - self.pmin
    }
}

impl<T: Float> Default for BBox3<T> {
    fn default() -> Self {
        BBox3::new()
    }
}

impl<T: Float> Index<usize> for BBox3<T> {
    type Output = Vec3<T>;

    fn index(&self, i: usize) -> &Vec3<T> {
        match i {
            0 => &self.pmin,
            1 => &self.pmax,
            _ => panic!("Index out of range for BBox3"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_box_is_identity_for_combine() {
        let b = BBox3::from_pnts(Vec3::new(1., 2., 3.), Vec3::new(-1., 5., 0.));
        assert!(BBox3::<f64>::new().is_empty());
        assert!(!b.is_empty());
        assert_eq!(BBox3::new().combine_bnd(b), b);
    }

    #[test]
    fn from_pnts_orders_corners() {
        let b = BBox3::from_pnts(Vec3::new(1., 2., 3.), Vec3::new(-1., 5., 0.));
        assert_eq!(b.pmin, Vec3::new(-1., 2., 0.));
        assert_eq!(b.pmax, Vec3::new(1., 5., 3.));
        assert_eq!(b.corner(0), b.pmin);
        assert_eq!(b.corner(7), b.pmax);
        assert_eq!(b.corner(1), Vec3::new(1., 2., 0.));
    }

    #[test]
    fn contains_with_slack() {
        let outer = BBox3::from_pnts(Vec3::new(0., 0., 0.), Vec3::new(1., 1., 1.));
        let inner = BBox3::from_pnts(Vec3::new(0.2, 0.2, 0.2), Vec3::new(1.0005, 0.5, 0.5));
        assert!(!outer.contains_bnd(inner, 0.));
        assert!(outer.contains_bnd(inner, 1e-3));
        assert!(outer.contains_bnd(BBox3::new(), 0.));
    }
}
