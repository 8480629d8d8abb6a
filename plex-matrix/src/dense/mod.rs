mod mat;

pub use mat::*;

pub mod snf;
