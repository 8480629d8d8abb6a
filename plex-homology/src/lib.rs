mod grid;
mod summand;
mod chain_summand;
mod complex;
mod homology;

pub use grid::*;
pub use summand::*;
pub use chain_summand::*;
pub use complex::*;
pub use homology::*;

pub mod calc;
