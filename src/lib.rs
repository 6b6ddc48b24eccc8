//! Static and animated transforms for prism.
//!
//! A [`Transf`] maps points, vectors, normals, rays and bounding boxes between
//! coordinate spaces. An [`AnimatedTransf`] blends between two keyframe transforms
//! over a time range so moving geometry and cameras can be motion blurred.

pub mod error;
pub mod transform;

pub use error::{Result, TransformError};
pub use transform::animated_transform::{AnimParam, AnimatedTransf, Decomposition};
pub use transform::static_transform::Transf;
pub use transform::{Geom, Transform};

pub use pmath;
