mod err;
mod average;

pub use err::*;
pub use average::*;
