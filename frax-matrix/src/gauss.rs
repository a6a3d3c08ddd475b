//! Gaussian elimination over exact fractions.
//!
//! The coefficient matrix is augmented with the right-hand side (a vector,
//! or the identity for inversion), brought to upper triangular form and then
//! reduced so that the coefficient block becomes the identity. The solution
//! is read from the augmented columns. Every step is exact, so a zero pivot
//! is a true zero and never a rounding artifact.
//!
//! A system without a unique solution yields `Ok(None)`.

use std::cmp::min;
use log::{debug, trace};
use num_traits::{Zero, One};
use frax::{ensure, err, Error, Fraction, Result};
use crate::{MatType, Matrix, MatrixEx, Vector};

/// Solves `a·x = b`.
pub fn solve_equation(a: &Matrix, b: &Vector) -> Result<Option<Vector>> {
    ensure!(!a.is_empty(), Error::InvalidArgument(format!("empty coefficient matrix: {:?}", a.shape())));
    ensure!(a.rows() == b.dim(), Error::DimensionMismatch(a.shape(), (b.dim(), 1)));

    let a = MatrixEx::from_matrix(a)?;
    let b = b.iter().map(|&x| Fraction::from_f64(x)).collect::<Result<Vec<_>>>()?;

    let x = solve_exact(&a, &b)?;
    Ok(x.map(|x| x.iter().map(Fraction::to_f64).collect()))
}

/// `None` if `a` is singular.
pub fn invert_matrix(a: &Matrix) -> Result<Option<Matrix>> {
    check_invertible_shape(a)?;

    let a = MatrixEx::from_matrix(a)?;
    let inv = invert_exact(&a)?;
    Ok(inv.map(|b| b.to_matrix()))
}

pub fn solve_exact(a: &MatrixEx, b: &[Fraction]) -> Result<Option<Vec<Fraction>>> {
    ensure!(!a.is_empty(), Error::InvalidArgument(format!("empty coefficient matrix: {:?}", a.shape())));
    ensure!(a.rows() == b.len(), Error::DimensionMismatch(a.shape(), (b.len(), 1)));

    let rhs = MatrixEx::from_data((b.len(), 1), b.iter().copied());
    let res = GaussCalc::new(a, &rhs)?.process()?;

    Ok(res.map(|x| x.iter().map(|(_, _, r)| *r).collect()))
}

pub fn invert_exact(a: &MatrixEx) -> Result<Option<MatrixEx>> {
    check_invertible_shape(a)?;

    let id = MatrixEx::identity(a.rows());
    GaussCalc::new(a, &id)?.process()
}

fn check_invertible_shape<M: MatType>(a: &M) -> Result<()> {
    ensure!(!a.is_empty(), Error::InvalidArgument(format!("empty matrix: {:?}", a.shape())));
    if !a.is_square() {
        return err!(NotSupported, "inverse of a non-square {:?} matrix", a.shape());
    }
    Ok(())
}

struct GaussCalc {
    target: MatrixEx,
    nvars: usize,
}

impl GaussCalc {
    fn new(a: &MatrixEx, rhs: &MatrixEx) -> Result<Self> {
        let target = a.concat_cols(rhs)?;
        Ok(GaussCalc { target, nvars: a.cols() })
    }

    fn process(mut self) -> Result<Option<MatrixEx>> {
        debug!("start gauss: {:?}, vars: {}.", self.target.shape(), self.nvars);
        trace!("{}", self.target);

        if !self.forward()? {
            return Ok(None)
        }

        let m = self.target.rows();
        let r = self.rank();
        if r < m || r < self.nvars {
            debug!("no unique solution: rank = {r}, rows = {m}, vars = {}.", self.nvars);
            return Ok(None)
        }

        self.backward()?;

        debug!("gauss done.");
        trace!("{}", self.target);

        let n = self.target.cols();
        Ok(Some(self.target.submat_cols(self.nvars .. n)))
    }

    // upper triangular form. false if some column has no pivot.
    fn forward(&mut self) -> Result<bool> {
        let m = self.target.rows();

        for k in 0..min(m, self.nvars) {
            if self.target[(k, k)].is_zero() {
                let Some(p) = self.select_pivot(k) else {
                    debug!("singular: no pivot in column {k}.");
                    return Ok(false)
                };
                self.swap_rows(k, p);
            }

            let pivot = self.target[(k, k)];
            trace!("pivot: ({k}, {k}) = {pivot}");

            for i in k + 1 .. m {
                let a = self.target[(i, k)];
                if a.is_zero() {
                    continue
                }
                let r = a.checked_div(&pivot)?.checked_neg()?;
                self.add_row_to(k, i, &r)?;
            }
        }

        Ok(true)
    }

    // the pivot of row `k` becomes 1, and column `k` is cleared above it.
    fn backward(&mut self) -> Result<()> {
        for k in (0..self.nvars).rev() {
            let pivot = self.target[(k, k)];
            if !pivot.is_one() {
                self.mul_row(k, &pivot.recip()?)?;
            }

            for i in 0..k {
                let a = self.target[(i, k)];
                if a.is_zero() {
                    continue
                }
                self.add_row_to(k, i, &a.checked_neg()?)?;
            }
        }
        Ok(())
    }

    // rows of the coefficient block with a nonzero entry.
    fn rank(&self) -> usize {
        let n = self.nvars;
        (0..self.target.rows()).filter(|&i|
            (0..n).any(|j| !self.target[(i, j)].is_zero())
        ).count()
    }

    fn select_pivot(&self, k: usize) -> Option<usize> {
        (k + 1 .. self.target.rows()).find(|&i| !self.target[(i, k)].is_zero())
    }

    fn swap_rows(&mut self, i: usize, j: usize) {
        self.target.swap_rows(i, j);
        trace!("swap-rows: ({i}, {j})\n{}", self.target);
    }

    fn mul_row(&mut self, i: usize, r: &Fraction) -> Result<()> {
        self.target.mul_row(i, r)?;
        trace!("mul-row: {i} by {r}\n{}", self.target);
        Ok(())
    }

    fn add_row_to(&mut self, i: usize, j: usize, r: &Fraction) -> Result<()> {
        self.target.add_row_to(i, j, r)?;
        trace!("add-row: {i} to {j} by {r}\n{}", self.target);
        Ok(())
    }
}
