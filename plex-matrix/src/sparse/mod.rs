mod sp_mat;
mod sp_vec;
mod trans;

pub use sp_mat::*;
pub use sp_vec::*;
pub use trans::*;
