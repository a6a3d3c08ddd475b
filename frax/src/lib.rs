mod types;
mod misc;

pub use types::*;
pub use misc::*;

pub mod config;
pub mod util;
