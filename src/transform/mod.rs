// A Transform is something that can take a mathematical primitive and a time,
// and transform it. Both the static and the animated transforms support the
// following trait, so shapes and cameras don't have to care which one they hold.

pub mod animated_transform;
pub mod static_transform;

use pmath::bbox::BBox3;
use pmath::ray::Ray;
use pmath::vector::Vec3;

pub trait Transform {
    fn point(&self, p: Vec3<f64>, time: f64) -> Vec3<f64>;
    fn vector(&self, v: Vec3<f64>, time: f64) -> Vec3<f64>;
    fn normal(&self, n: Vec3<f64>, time: f64) -> Vec3<f64>;
    // Rays carry their own time:
    fn ray(&self, r: Ray<f64>) -> Ray<f64>;
}

/// Everything a transform knows how to act on. Points, vectors and normals share
/// a representation but transform differently, so the tag is what matters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Geom {
    Point(Vec3<f64>),
    Vector(Vec3<f64>),
    Normal(Vec3<f64>),
    Ray(Ray<f64>),
    BBox(BBox3<f64>),
}

impl Geom {
    pub fn name(&self) -> &'static str {
        match self {
            Geom::Point(_) => "point",
            Geom::Vector(_) => "vector",
            Geom::Normal(_) => "normal",
            Geom::Ray(_) => "ray",
            Geom::BBox(_) => "bounding box",
        }
    }
}
