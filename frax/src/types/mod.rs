mod fraction;
mod complex;
mod polar;
mod color;

pub use fraction::*;
pub use complex::*;
pub use polar::*;
pub use color::*;
