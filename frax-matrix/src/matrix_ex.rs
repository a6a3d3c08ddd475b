use std::fmt::Display;
use std::ops::{Add, Sub, Mul, Div, Neg, Index, IndexMut, AddAssign, SubAssign, MulAssign, DivAssign};
use nalgebra::DMatrix;
use delegate::delegate;
use auto_impl_ops::auto_ops;
use num_traits::{Zero, One};
use frax::{ensure, Error, Fraction, Result};
use frax::util::format;
use crate::{gauss, MatType, Matrix};
use crate::det::laplace_det;

/// A dense matrix of exact fractions.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatrixEx {
    inner: DMatrix<Fraction>
}

impl MatType for MatrixEx {
    fn shape(&self) -> (usize, usize) {
        self.inner.shape()
    }
}

impl MatrixEx {
    pub fn new(rows: usize, cols: usize) -> Self {
        DMatrix::zeros(rows, cols).into()
    }

    pub fn identity(n: usize) -> Self {
        DMatrix::identity(n, n).into()
    }

    /// Row-major `data`.
    pub fn from_data<I, T>(shape: (usize, usize), data: I) -> Self
    where I: IntoIterator<Item = T>, T: Into<Fraction> {
        DMatrix::from_row_iterator(shape.0, shape.1, data.into_iter().map(T::into)).into()
    }

    /// Converts every entry with `Fraction::from_f64`.
    pub fn from_matrix(a: &Matrix) -> Result<Self> {
        let (m, n) = a.shape();
        let mut res = Self::new(m, n);
        for i in 0..m {
            for j in 0..n {
                res.inner[(i, j)] = Fraction::from_f64(a[(i, j)])?;
            }
        }
        Ok(res)
    }

    pub fn to_matrix(&self) -> Matrix {
        self.inner.map(|a| a.to_f64()).into()
    }

    pub fn inner(&self) -> &DMatrix<Fraction> {
        &self.inner
    }

    pub fn into_inner(self) -> DMatrix<Fraction> {
        self.inner
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &Fraction)> {
        let m = self.rows();
        self.inner.iter().enumerate().map(move |(k, a)|
            (k % m, k / m, a)
        )
    }

    pub fn get(&self, i: usize, j: usize) -> Result<&Fraction> {
        self.check_index(i, j)?;
        Ok(&self.inner[(i, j)])
    }

    pub fn set(&mut self, i: usize, j: usize, value: Fraction) -> Result<()> {
        self.check_index(i, j)?;
        self.inner[(i, j)] = value;
        Ok(())
    }

    pub fn is_zero(&self) -> bool {
        self.iter().all(|(_, _, a)| a.is_zero())
    }

    pub fn is_identity(&self) -> bool {
        self.is_square() && self.iter().all(|(i, j, a)|
            i == j && a.is_one() ||
            i != j && a.is_zero()
        )
    }

    pub fn try_add(&self, rhs: &MatrixEx) -> Result<MatrixEx> {
        self.check_same_shape(rhs)?;
        self.try_zip(rhs, Fraction::checked_add)
    }

    pub fn try_sub(&self, rhs: &MatrixEx) -> Result<MatrixEx> {
        self.check_same_shape(rhs)?;
        self.try_zip(rhs, Fraction::checked_sub)
    }

    pub fn try_mul(&self, rhs: &MatrixEx) -> Result<MatrixEx> {
        ensure!(self.cols() == rhs.rows(), Error::DimensionMismatch(self.shape(), rhs.shape()));

        let (m, l, n) = (self.rows(), self.cols(), rhs.cols());
        let mut res = Self::new(m, n);

        for i in 0..m {
            for j in 0..n {
                let mut s = Fraction::zero();
                for k in 0..l {
                    let a = &self.inner[(i, k)];
                    let b = &rhs.inner[(k, j)];
                    if !a.is_zero() && !b.is_zero() {
                        s = s.checked_add(&a.checked_mul(b)?)?;
                    }
                }
                res.inner[(i, j)] = s;
            }
        }

        Ok(res)
    }

    pub fn mul_scalar(&self, r: &Fraction) -> Result<MatrixEx> {
        self.try_map(|a| a.checked_mul(r))
    }

    pub fn div_scalar(&self, r: &Fraction) -> Result<MatrixEx> {
        ensure!(!r.is_zero(), Error::DivisionByZero);
        self.try_map(|a| a.checked_div(r))
    }

    pub fn transpose(&self) -> MatrixEx {
        self.inner.transpose().into()
    }

    pub fn det(&self) -> Result<Fraction> {
        ensure!(self.is_square(), Error::NotSupported(format!("determinant of a {:?} matrix", self.shape())));
        laplace_det(&self.inner)
    }

    /// `None` if the matrix is singular.
    pub fn inv(&self) -> Result<Option<MatrixEx>> {
        gauss::invert_exact(self)
    }

    pub fn swap_rows(&mut self, i: usize, j: usize) {
        self.inner.swap_rows(i, j);
    }

    /// `row[i] *= r`
    pub fn mul_row(&mut self, i: usize, r: &Fraction) -> Result<()> {
        let row = self.inner.row(i).iter()
            .map(|a| a.checked_mul(r))
            .collect::<Result<Vec<_>>>()?;

        for (j, a) in row.into_iter().enumerate() {
            self.inner[(i, j)] = a;
        }
        Ok(())
    }

    /// `row[j] += r * row[i]`
    pub fn add_row_to(&mut self, i: usize, j: usize, r: &Fraction) -> Result<()> {
        let row = (0..self.cols()).map(|k| {
            let a = &self.inner[(i, k)];
            let b = &self.inner[(j, k)];
            if a.is_zero() {
                Ok(*b)
            } else {
                b.checked_add(&a.checked_mul(r)?)
            }
        }).collect::<Result<Vec<_>>>()?;

        for (k, a) in row.into_iter().enumerate() {
            self.inner[(j, k)] = a;
        }
        Ok(())
    }

    /// `[self | rhs]`
    pub fn concat_cols(&self, rhs: &MatrixEx) -> Result<MatrixEx> {
        ensure!(self.rows() == rhs.rows(), Error::DimensionMismatch(self.shape(), rhs.shape()));

        let n = self.cols();
        let res = DMatrix::from_fn(self.rows(), n + rhs.cols(), |i, j|
            if j < n { self.inner[(i, j)] } else { rhs.inner[(i, j - n)] }
        );
        Ok(res.into())
    }

    pub fn submat_cols(&self, cols: std::ops::Range<usize>) -> MatrixEx {
        assert!(cols.start <= cols.end && cols.end <= self.cols());
        let view = self.inner.view((0, cols.start), (self.rows(), cols.end - cols.start));
        view.clone_owned().into()
    }

    fn try_map<F>(&self, f: F) -> Result<MatrixEx>
    where F: Fn(&Fraction) -> Result<Fraction> {
        let (m, n) = self.shape();
        let data = self.inner.iter().map(f).collect::<Result<Vec<_>>>()?;
        Ok(DMatrix::from_vec(m, n, data).into())
    }

    fn try_zip<F>(&self, rhs: &MatrixEx, f: F) -> Result<MatrixEx>
    where F: Fn(&Fraction, &Fraction) -> Result<Fraction> {
        let (m, n) = self.shape();
        let data = self.inner.iter().zip(rhs.inner.iter())
            .map(|(a, b)| f(a, b))
            .collect::<Result<Vec<_>>>()?;
        Ok(DMatrix::from_vec(m, n, data).into())
    }
}

impl From<DMatrix<Fraction>> for MatrixEx {
    fn from(inner: DMatrix<Fraction>) -> Self {
        Self { inner }
    }
}

impl TryFrom<&Matrix> for MatrixEx {
    type Error = Error;

    fn try_from(a: &Matrix) -> Result<Self> {
        Self::from_matrix(a)
    }
}

impl Default for MatrixEx {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl Display for MatrixEx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rows = self.inner.row_iter().map(|r| r.iter().copied().collect::<Vec<_>>());
        write!(f, "{}", format::grid(rows))
    }
}

impl Index<(usize, usize)> for MatrixEx {
    type Output = Fraction;
    delegate! {
        to self.inner {
            fn index(&self, index: (usize, usize)) -> &Fraction;
        }
    }
}

impl IndexMut<(usize, usize)> for MatrixEx {
    delegate! {
        to self.inner {
            fn index_mut(&mut self, index: (usize, usize)) -> &mut Fraction;
        }
    }
}

fn unwrap_op(res: Result<MatrixEx>) -> MatrixEx {
    match res {
        Ok(a) => a,
        Err(e) => panic!("{e}"),
    }
}

#[auto_ops]
impl AddAssign<&MatrixEx> for MatrixEx {
    fn add_assign(&mut self, rhs: &MatrixEx) {
        *self = unwrap_op(self.try_add(rhs));
    }
}

#[auto_ops]
impl SubAssign<&MatrixEx> for MatrixEx {
    fn sub_assign(&mut self, rhs: &MatrixEx) {
        *self = unwrap_op(self.try_sub(rhs));
    }
}

#[auto_ops]
impl<'a, 'b> Mul<&'b MatrixEx> for &'a MatrixEx {
    type Output = MatrixEx;
    fn mul(self, rhs: &'b MatrixEx) -> Self::Output {
        unwrap_op(self.try_mul(rhs))
    }
}

#[auto_ops]
impl MulAssign<&Fraction> for MatrixEx {
    fn mul_assign(&mut self, rhs: &Fraction) {
        *self = unwrap_op(self.mul_scalar(rhs));
    }
}

#[auto_ops]
impl DivAssign<&Fraction> for MatrixEx {
    fn div_assign(&mut self, rhs: &Fraction) {
        *self = unwrap_op(self.div_scalar(rhs));
    }
}

impl Neg for MatrixEx {
    type Output = Self;
    fn neg(self) -> Self::Output {
        -&self
    }
}

impl Neg for &MatrixEx {
    type Output = MatrixEx;
    fn neg(self) -> Self::Output {
        self.inner.map(|a| -a).into()
    }
}
