pub mod bbox;
pub mod matrix;
pub mod numbers;
pub mod quaternion;
pub mod ray;
pub mod vector;
