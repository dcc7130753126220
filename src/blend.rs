pub mod coeffs;
pub mod compose;
pub mod hsl;
pub mod kernels;
pub mod ops;
pub mod weights;
