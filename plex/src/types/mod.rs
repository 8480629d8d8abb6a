mod int;

pub use int::*;
