mod base;
mod det;
mod vector;
mod matrix;
mod matrix_ex;
pub mod gauss;

pub use base::*;
pub use vector::*;
pub use matrix::*;
pub use matrix_ex::*;
pub use gauss::{solve_equation, invert_matrix, solve_exact, invert_exact};

pub use frax::{Error, Fraction, Result};
