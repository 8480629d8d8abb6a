mod gen;
mod chain;

pub use gen::*;
pub use chain::*;
