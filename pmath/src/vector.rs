/// Defines the vector types used by the transform code.
// Needs to be signed to support negation.
// Float is used to handle sqrt case and whatnot that may arise.
use crate::numbers::{max, min, Float};

use approx::AbsDiffEq;
use num_traits::{Signed, Zero};

use std::cmp::PartialOrd;
use std::ops::{Add, Div, Index, IndexMut, Mul, Neg, Sub};

#[derive(Copy, Clone, Debug)]
pub struct Vec3<T: Copy> {
    pub x: T,
    pub y: T,
    pub z: T,
}

impl<T: Copy> Vec3<T> {
    pub fn new(x: T, y: T, z: T) -> Self {
        Vec3 { x, y, z }
    }

    pub fn from_vec4(v: Vec4<T>) -> Self {
        Vec3 {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

impl<T: PartialEq + Copy> PartialEq for Vec3<T> {
    fn eq(&self, rhs: &Self) -> bool {
        self.x == rhs.x && self.y == rhs.y && self.z == rhs.z
    }
}

impl<T: Signed + Copy> Vec3<T> {
    pub fn abs(self) -> Self {
        Vec3 {
            x: self.x.abs(),
            y: self.y.abs(),
            z: self.z.abs(),
        }
    }
}

impl<T: Zero + Copy> Vec3<T> {
    pub fn zero() -> Self {
        Vec3 {
            x: T::zero(),
            y: T::zero(),
            z: T::zero(),
        }
    }
}

impl<T: Add<Output = T> + Copy> Vec3<T> {
    pub fn horizontal_add(self) -> T {
        self.x + self.y + self.z
    }
}

impl<T: Mul<Output = T> + Add<Output = T> + Copy> Vec3<T> {
    pub fn dot(self, o: Vec3<T>) -> T {
        self.x * o.x + self.y * o.y + self.z * o.z
    }

    pub fn length2(self) -> T {
        self.dot(self)
    }
}

impl<T: Mul<Output = T> + Copy> Vec3<T> {
    // Scales each component by s:
    pub fn scale(self, s: T) -> Self {
        Vec3 {
            x: self.x * s,
            y: self.y * s,
            z: self.z * s,
        }
    }
}

impl<T: Div<Output = T> + Copy> Vec3<T> {
    // Returns s / component for every component:
    pub fn inv_scale(self, s: T) -> Self {
        Vec3 {
            x: s / self.x,
            y: s / self.y,
            z: s / self.z,
        }
    }
}

impl<T: Mul<Output = T> + Sub<Output = T> + Copy> Vec3<T> {
    pub fn cross(self, o: Vec3<T>) -> Self {
        Vec3 {
            x: self.y * o.z - self.z * o.y,
            y: self.z * o.x - self.x * o.z,
            z: self.x * o.y - self.y * o.x,
        }
    }
}

impl<T: Float> Vec3<T> {
    pub fn length(self) -> T {
        self.length2().sqrt()
    }

    pub fn normalize(self) -> Self {
        let scale = T::one() / self.length();
        self.scale(scale)
    }

    pub fn lerp(self, v1: Self, time: T) -> Self {
        self.scale(T::one() - time) + v1.scale(time)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl<T: PartialOrd + Copy> Vec3<T> {
    pub fn min(self, o: Self) -> Self {
        Vec3 {
            x: min(self.x, o.x),
            y: min(self.y, o.y),
            z: min(self.z, o.z),
        }
    }

    pub fn max(self, o: Self) -> Self {
        Vec3 {
            x: max(self.x, o.x),
            y: max(self.y, o.y),
            z: max(self.z, o.z),
        }
    }
}

impl<T: Add<Output = T> + Copy> Add for Vec3<T> {
    type Output = Vec3<T>;

    fn add(self, o: Vec3<T>) -> Self {
        Vec3 {
            x: self.x + o.x,
            y: self.y + o.y,
            z: self.z + o.z,
        }
    }
}

impl<T: Sub<Output = T> + Copy> Sub for Vec3<T> {
    type Output = Vec3<T>;

    fn sub(self, o: Vec3<T>) -> Self {
        Vec3 {
            x: self.x - o.x,
            y: self.y - o.y,
            z: self.z - o.z,
        }
    }
}

impl<T: Copy> Index<usize> for Vec3<T> {
    type Output = T;

    fn index(&self, i: usize) -> &T {
        match i {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Index out of range for Vec"),
        }
    }
}

impl<T: Copy> IndexMut<usize> for Vec3<T> {
    fn index_mut(&mut self, i: usize) -> &mut T {
        match i {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            _ => panic!("Index out of range for Vec"),
        }
    }
}

impl<T: Neg<Output = T> + Copy> Neg for Vec3<T> {
    type Output = Vec3<T>;

    fn neg(self) -> Self {
        Vec3 {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

impl<T: AbsDiffEq<Epsilon = T> + Copy> AbsDiffEq for Vec3<T> {
    type Epsilon = T;

    fn default_epsilon() -> T {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, o: &Self, epsilon: T) -> bool {
        self.x.abs_diff_eq(&o.x, epsilon)
            && self.y.abs_diff_eq(&o.y, epsilon)
            && self.z.abs_diff_eq(&o.z, epsilon)
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug)]
pub struct Vec4<T: Copy> {
    pub x: T,
    pub y: T,
    pub z: T,
    pub w: T,
}

impl<T: Copy> Vec4<T> {
    pub fn new(x: T, y: T, z: T, w: T) -> Self {
        Vec4 { x, y, z, w }
    }

}

impl<T: PartialEq + Copy> PartialEq for Vec4<T> {
    fn eq(&self, rhs: &Self) -> bool {
        self.x == rhs.x && self.y == rhs.y && self.z == rhs.z && self.w == rhs.w
    }
}

impl<T: Signed + Copy> Vec4<T> {
    pub fn abs(self) -> Self {
        Vec4 {
            x: self.x.abs(),
            y: self.y.abs(),
            z: self.z.abs(),
            w: self.w.abs(),
        }
    }
}

impl<T: Add<Output = T> + Copy> Vec4<T> {
    pub fn horizontal_add(self) -> T {
        self.x + self.y + self.z + self.w
    }
}

impl<T: Mul<Output = T> + Add<Output = T> + Copy> Vec4<T> {
    pub fn dot(self, o: Vec4<T>) -> T {
        self.x * o.x + self.y * o.y + self.z * o.z + self.w * o.w
    }

    /// Performs a dot product assuming o's w component is 1
    pub fn dot_one(self, o: Vec3<T>) -> T {
        self.x * o.x + self.y * o.y + self.z * o.z + self.w
    }

    /// Performs a dot product assuming o's w component is 0
    pub fn dot_zero(self, o: Vec3<T>) -> T {
        self.x * o.x + self.y * o.y + self.z * o.z
    }

    pub fn scale(self, s: T) -> Self {
        Vec4 {
            x: self.x * s,
            y: self.y * s,
            z: self.z * s,
            w: self.w * s,
        }
    }
}

impl<T: Float> Vec4<T> {
    pub fn lerp(self, v1: Self, time: T) -> Self {
        self.scale(T::one() - time) + v1.scale(time)
    }
}

impl<T: Add<Output = T> + Copy> Add for Vec4<T> {
    type Output = Vec4<T>;

    fn add(self, o: Vec4<T>) -> Self {
        Vec4 {
            x: self.x + o.x,
            y: self.y + o.y,
            z: self.z + o.z,
            w: self.w + o.w,
        }
    }
}

impl<T: Sub<Output = T> + Copy> Sub for Vec4<T> {
    type Output = Vec4<T>;

    fn sub(self, o: Vec4<T>) -> Self {
        Vec4 {
            x: self.x - o.x,
            y: self.y - o.y,
            z: self.z - o.z,
            w: self.w - o.w,
        }
    }
}

impl<T: Copy> Index<usize> for Vec4<T> {
    type Output = T;

    fn index(&self, i: usize) -> &T {
        match i {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            3 => &self.w,
            _ => panic!("Index out of range for Vec"),
        }
    }
}

impl<T: Copy> IndexMut<usize> for Vec4<T> {
    fn index_mut(&mut self, i: usize) -> &mut T {
        match i {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            3 => &mut self.w,
            _ => panic!("Index out of range for Vec"),
        }
    }
}

impl<T: Neg<Output = T> + Copy> Neg for Vec4<T> {
    type Output = Vec4<T>;

    fn neg(self) -> Self {
        Vec4 {
            x: -self.x,
            y: -self.y,
            z: -self.z,
            w: -self.w,
        }
    }
}

impl<T: AbsDiffEq<Epsilon = T> + Copy> AbsDiffEq for Vec4<T> {
    type Epsilon = T;

    fn default_epsilon() -> T {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, o: &Self, epsilon: T) -> bool {
        self.x.abs_diff_eq(&o.x, epsilon)
            && self.y.abs_diff_eq(&o.y, epsilon)
            && self.z.abs_diff_eq(&o.z, epsilon)
            && self.w.abs_diff_eq(&o.w, epsilon)
    }
}
