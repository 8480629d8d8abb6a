mod error;
mod simplex;
mod complex;
mod rips;
mod witness;
mod filtration;
mod homology;

pub use error::*;
pub use simplex::*;
pub use complex::*;
pub use rips::*;
pub use witness::*;
pub use filtration::*;
pub use homology::*;

pub mod landmarks;
pub mod metric;
