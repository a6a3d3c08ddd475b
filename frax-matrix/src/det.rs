use nalgebra::{DMatrix, Scalar};
use num_traits::{Zero, One};
use frax::{Fraction, Result};

/// Matrix entries with fallible ring operations.
pub(crate) trait Entry: Scalar + Zero + One {
    fn try_add(&self, rhs: &Self) -> Result<Self>;
    fn try_sub(&self, rhs: &Self) -> Result<Self>;
    fn try_mul(&self, rhs: &Self) -> Result<Self>;
}

impl Entry for f64 {
    fn try_add(&self, rhs: &Self) -> Result<Self> { Ok(self + rhs) }
    fn try_sub(&self, rhs: &Self) -> Result<Self> { Ok(self - rhs) }
    fn try_mul(&self, rhs: &Self) -> Result<Self> { Ok(self * rhs) }
}

impl Entry for Fraction {
    fn try_add(&self, rhs: &Self) -> Result<Self> { self.checked_add(rhs) }
    fn try_sub(&self, rhs: &Self) -> Result<Self> { self.checked_sub(rhs) }
    fn try_mul(&self, rhs: &Self) -> Result<Self> { self.checked_mul(rhs) }
}

/// Cofactor expansion along the first row. `a` must be square.
pub(crate) fn laplace_det<R: Entry>(a: &DMatrix<R>) -> Result<R> {
    debug_assert!(a.is_square());
    let cols = (0..a.ncols()).collect::<Vec<_>>();
    det_rec(a, 0, &cols)
}

// determinant of the minor made of rows `i..` and columns `cols`.
fn det_rec<R: Entry>(a: &DMatrix<R>, i: usize, cols: &[usize]) -> Result<R> {
    match cols {
        [] => Ok(R::one()),
        [j] => Ok(a[(i, *j)].clone()),
        [j0, j1] => {
            let ad = a[(i, *j0)].try_mul(&a[(i + 1, *j1)])?;
            let bc = a[(i, *j1)].try_mul(&a[(i + 1, *j0)])?;
            ad.try_sub(&bc)
        },
        _ => {
            let mut res = R::zero();

            for (k, j) in cols.iter().enumerate() {
                let e = &a[(i, *j)];
                if e.is_zero() {
                    continue
                }

                let rest = cols.iter().enumerate()
                    .filter_map(|(l, c)| (l != k).then_some(*c))
                    .collect::<Vec<_>>();
                let d = e.try_mul(&det_rec(a, i + 1, &rest)?)?;

                res = if k % 2 == 0 {
                    res.try_add(&d)?
                } else {
                    res.try_sub(&d)?
                };
            }

            Ok(res)
        }
    }
}
