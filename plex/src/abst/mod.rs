mod elem;
mod mon;
mod ring;

pub use elem::*;
pub use mon::*;
pub use ring::*;
