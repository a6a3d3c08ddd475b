use std::fmt::Display;
use std::ops::{Add, Sub, Mul, Div, Neg, Index, IndexMut, AddAssign, SubAssign, MulAssign, DivAssign};
use nalgebra::DMatrix;
use delegate::delegate;
use auto_impl_ops::auto_ops;
use frax::{ensure, Error, Result};
use frax::util::format;
use crate::{MatType, Vector};
use crate::det::laplace_det;

/// A dense `f64` matrix of fixed shape.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Matrix {
    inner: DMatrix<f64>
}

impl MatType for Matrix {
    fn shape(&self) -> (usize, usize) {
        self.inner.shape()
    }
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        DMatrix::zeros(rows, cols).into()
    }

    pub fn identity(n: usize) -> Self {
        DMatrix::identity(n, n).into()
    }

    /// Row-major `data`.
    pub fn from_data<I>(shape: (usize, usize), data: I) -> Self
    where I: IntoIterator<Item = f64> {
        DMatrix::from_row_iterator(shape.0, shape.1, data).into()
    }

    /// Rows shorter than the longest one are padded with zeros.
    pub fn from_rows(rows: &[Vec<f64>]) -> Self {
        let m = rows.len();
        let n = rows.iter().map(|r| r.len()).max().unwrap_or(0);
        DMatrix::from_fn(m, n, |i, j|
            rows[i].get(j).copied().unwrap_or(0.0)
        ).into()
    }

    pub fn inner(&self) -> &DMatrix<f64> {
        &self.inner
    }

    pub fn into_inner(self) -> DMatrix<f64> {
        self.inner
    }

    pub fn get(&self, i: usize, j: usize) -> Result<f64> {
        self.check_index(i, j)?;
        Ok(self.inner[(i, j)])
    }

    pub fn set(&mut self, i: usize, j: usize, value: f64) -> Result<()> {
        self.check_index(i, j)?;
        self.inner[(i, j)] = value;
        Ok(())
    }

    pub fn row(&self, i: usize) -> Vector {
        self.inner.row(i).iter().copied().collect()
    }

    pub fn col(&self, j: usize) -> Vector {
        Vector::from(self.inner.column(j).clone_owned())
    }

    pub fn try_add(&self, rhs: &Matrix) -> Result<Matrix> {
        self.check_same_shape(rhs)?;
        Ok(Matrix::from(&self.inner + &rhs.inner))
    }

    pub fn try_sub(&self, rhs: &Matrix) -> Result<Matrix> {
        self.check_same_shape(rhs)?;
        Ok(Matrix::from(&self.inner - &rhs.inner))
    }

    pub fn try_mul(&self, rhs: &Matrix) -> Result<Matrix> {
        ensure!(self.cols() == rhs.rows(), Error::DimensionMismatch(self.shape(), rhs.shape()));
        Ok(Matrix::from(&self.inner * &rhs.inner))
    }

    /// `A·x`
    pub fn mul_vec(&self, x: &Vector) -> Result<Vector> {
        ensure!(self.cols() == x.dim(), Error::DimensionMismatch(self.shape(), x.shape()));
        Ok(Vector::from(&self.inner * x.inner()))
    }

    pub fn transpose(&self) -> Matrix {
        self.inner.transpose().into()
    }

    pub fn det(&self) -> Result<f64> {
        ensure!(self.is_square(), Error::NotSupported(format!("determinant of a {:?} matrix", self.shape())));
        laplace_det(&self.inner)
    }
}

impl From<DMatrix<f64>> for Matrix {
    fn from(inner: DMatrix<f64>) -> Self {
        Self { inner }
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Self::zeros(0, 0)
    }
}

impl Display for Matrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rows = self.inner.row_iter().map(|r| r.iter().copied().collect::<Vec<_>>());
        write!(f, "{}", format::grid(rows))
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;
    delegate! {
        to self.inner {
            fn index(&self, index: (usize, usize)) -> &f64;
        }
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    delegate! {
        to self.inner {
            fn index_mut(&mut self, index: (usize, usize)) -> &mut f64;
        }
    }
}

fn unwrap_op<T>(res: Result<T>) -> T {
    match res {
        Ok(a) => a,
        Err(e) => panic!("{e}"),
    }
}

#[auto_ops]
impl AddAssign<&Matrix> for Matrix {
    fn add_assign(&mut self, rhs: &Matrix) {
        *self = unwrap_op(self.try_add(rhs));
    }
}

#[auto_ops]
impl SubAssign<&Matrix> for Matrix {
    fn sub_assign(&mut self, rhs: &Matrix) {
        *self = unwrap_op(self.try_sub(rhs));
    }
}

#[auto_ops]
impl<'a, 'b> Mul<&'b Matrix> for &'a Matrix {
    type Output = Matrix;
    fn mul(self, rhs: &'b Matrix) -> Self::Output {
        unwrap_op(self.try_mul(rhs))
    }
}

impl Mul<&Vector> for &Matrix {
    type Output = Vector;
    fn mul(self, rhs: &Vector) -> Vector {
        unwrap_op(self.mul_vec(rhs))
    }
}

impl Mul<Vector> for &Matrix {
    type Output = Vector;
    fn mul(self, rhs: Vector) -> Vector {
        self * &rhs
    }
}

impl Mul<&Vector> for Matrix {
    type Output = Vector;
    fn mul(self, rhs: &Vector) -> Vector {
        &self * rhs
    }
}

impl Mul<Vector> for Matrix {
    type Output = Vector;
    fn mul(self, rhs: Vector) -> Vector {
        &self * &rhs
    }
}

impl Neg for Matrix {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Matrix::from(-self.inner)
    }
}

impl Neg for &Matrix {
    type Output = Matrix;
    fn neg(self) -> Self::Output {
        Matrix::from(-&self.inner)
    }
}

impl MulAssign<f64> for Matrix {
    fn mul_assign(&mut self, rhs: f64) {
        self.inner *= rhs;
    }
}

impl DivAssign<f64> for Matrix {
    fn div_assign(&mut self, rhs: f64) {
        self.inner /= rhs;
    }
}

macro_rules! impl_scalar_op {
    ($trait:ident, $method:ident) => {
        impl $trait<f64> for Matrix {
            type Output = Matrix;
            fn $method(self, rhs: f64) -> Matrix {
                Matrix::from(self.inner.$method(rhs))
            }
        }

        impl $trait<f64> for &Matrix {
            type Output = Matrix;
            fn $method(self, rhs: f64) -> Matrix {
                Matrix::from((&self.inner).$method(rhs))
            }
        }
    };
}

impl_scalar_op!(Mul, mul);
impl_scalar_op!(Div, div);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init() {
        let a = Matrix::from_data((2, 3), [1., 2., 3., 4., 5., 6.]);
        assert_eq!(a.rows(), 2);
        assert_eq!(a.cols(), 3);
        assert_eq!(a[(1, 0)], 4.0);
        assert_eq!(a.into_inner(), DMatrix::from_row_slice(2, 3, &[1., 2., 3., 4., 5., 6.]));
    }

    #[test]
    fn from_rows() {
        let a = Matrix::from_rows(&[vec![1., 2., 3.], vec![4.], vec![5., 6.]]);
        assert_eq!(a, Matrix::from_data((3, 3), [
            1., 2., 3.,
            4., 0., 0.,
            5., 6., 0.,
        ]));
        assert_eq!(Matrix::from_rows(&[]).shape(), (0, 0));
    }

    #[test]
    fn square() {
        assert!(Matrix::zeros(3, 3).is_square());
        assert!(!Matrix::zeros(3, 2).is_square());
    }

    #[test]
    fn get_set() {
        let mut a = Matrix::zeros(2, 2);
        assert_eq!(a.set(0, 1, 3.0), Ok(()));
        assert_eq!(a.get(0, 1), Ok(3.0));
        assert_eq!(a.get(2, 0), Err(Error::IndexOutOfRange((2, 0), (2, 2))));
        assert!(a.set(0, 2, 1.0).is_err());
    }

    #[test]
    fn row_col() {
        let a = Matrix::from_data((2, 3), [1., 2., 3., 4., 5., 6.]);
        assert_eq!(a.row(1), Vector::from([4., 5., 6.]));
        assert_eq!(a.col(2), Vector::from([3., 6.]));
    }

    #[test]
    fn add() {
        let a = Matrix::from_data((3, 2), [1., 2., 3., 4., 5., 6.]);
        let b = Matrix::from_data((3, 2), [8., 2., 4., 0., 2., 1.]);
        assert_eq!(a + b, Matrix::from_data((3, 2), [9., 4., 7., 4., 7., 7.]));
    }

    #[test]
    fn sub() {
        let a = Matrix::from_data((3, 2), [1., 2., 3., 4., 5., 6.]);
        let b = Matrix::from_data((3, 2), [8., 2., 4., 0., 2., 1.]);
        assert_eq!(a - b, Matrix::from_data((3, 2), [-7., 0., -1., 4., 3., 5.]));
    }

    #[test]
    fn neg() {
        let a = Matrix::from_data((3, 2), [1., 2., 3., 4., 5., 6.]);
        assert_eq!(-a, Matrix::from_data((3, 2), [-1., -2., -3., -4., -5., -6.]));
    }

    #[test]
    fn mul() {
        let a = Matrix::from_data((2, 3), [1., 2., 3., 4., 5., 6.]);
        let b = Matrix::from_data((3, 2), [1., 2., 1., -1., 0., 2.]);
        assert_eq!(&a * &b, Matrix::from_data((2, 2), [3., 6., 9., 15.]));
        assert_eq!(b.try_mul(&b), Err(Error::DimensionMismatch((3, 2), (3, 2))));
    }

    #[test]
    #[should_panic]
    fn add_mismatch_panics() {
        let _ = Matrix::zeros(2, 2) + Matrix::zeros(2, 3);
    }

    #[test]
    fn mul_vec() {
        let a = Matrix::from_data((2, 3), [1., 2., 3., 4., 5., 6.]);
        let x = Vector::from([1., 0., -1.]);
        assert_eq!(a.mul_vec(&x), Ok(Vector::from([-2., -2.])));
        assert_eq!(&a * &x, Vector::from([-2., -2.]));
        assert_eq!(&a * x.clone(), Vector::from([-2., -2.]));
        assert_eq!(a.clone() * &x, Vector::from([-2., -2.]));
        assert_eq!(a.clone() * x, Vector::from([-2., -2.]));
        assert_eq!(a.mul_vec(&Vector::zeros(2)), Err(Error::DimensionMismatch((2, 3), (2, 1))));
    }

    #[test]
    fn scalar() {
        let a = Matrix::from_data((1, 2), [2., -4.]);
        assert_eq!(&a * 0.5, Matrix::from_data((1, 2), [1., -2.]));
        assert_eq!(a / 2.0, Matrix::from_data((1, 2), [1., -2.]));
    }

    #[test]
    fn transpose() {
        let a = Matrix::from_data((2, 3), [1., 2., 3., 4., 5., 6.]);
        assert_eq!(a.transpose(), Matrix::from_data((3, 2), [1., 4., 2., 5., 3., 6.]));
    }

    #[test]
    fn det() {
        assert_eq!(Matrix::identity(3).det(), Ok(1.0));

        let a = Matrix::from_data((3, 3), [
            6., 1., 1.,
            4., -2., 5.,
            2., 8., 7.,
        ]);
        assert_eq!(a.det(), Ok(-306.0));

        let a = Matrix::from_data((3, 3), [
            1., 2., 3.,
            0., 0., 0.,
            7., 8., 9.,
        ]);
        assert_eq!(a.det(), Ok(0.0));

        assert!(matches!(Matrix::zeros(2, 3).det(), Err(Error::NotSupported(_))));
    }

    #[test]
    fn display() {
        let a = Matrix::from_data((2, 2), [1., 2., 3., 4.]);
        assert_eq!(a.to_string(), "(1,2;3,4)");
    }
}
