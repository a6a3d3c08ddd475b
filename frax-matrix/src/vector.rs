use std::fmt::Display;
use std::ops::{Add, Sub, Mul, Div, Neg, Index, IndexMut, AddAssign, SubAssign, MulAssign, DivAssign};
use nalgebra::DVector;
use delegate::delegate;
use auto_impl_ops::auto_ops;
use frax::{ensure, Error, Result};
use frax::util::format;

/// A dense `f64` vector of fixed dimension.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vector {
    inner: DVector<f64>
}

impl Vector {
    pub fn zeros(dim: usize) -> Self {
        DVector::zeros(dim).into()
    }

    pub fn from_vec(data: Vec<f64>) -> Self {
        DVector::from_vec(data).into()
    }

    pub fn from_slice(data: &[f64]) -> Self {
        DVector::from_column_slice(data).into()
    }

    pub fn dim(&self) -> usize {
        self.inner.len()
    }

    pub fn inner(&self) -> &DVector<f64> {
        &self.inner
    }

    pub fn into_inner(self) -> DVector<f64> {
        self.inner
    }

    delegate! {
        to self.inner {
            pub fn iter(&self) -> impl Iterator<Item = &f64>;
            pub fn as_slice(&self) -> &[f64];
        }
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.as_slice().to_vec()
    }

    pub fn get(&self, i: usize) -> Result<f64> {
        self.inner.get(i).copied().ok_or(Error::IndexOutOfRange((i, 0), self.shape()))
    }

    pub fn set(&mut self, i: usize, value: f64) -> Result<()> {
        let shape = self.shape();
        let e = self.inner.get_mut(i).ok_or(Error::IndexOutOfRange((i, 0), shape))?;
        *e = value;
        Ok(())
    }

    /// Euclidean length.
    pub fn norm(&self) -> f64 {
        self.inner.norm()
    }

    pub fn dot(&self, rhs: &Vector) -> Result<f64> {
        self.check_dim(rhs)?;
        Ok(self.inner.dot(&rhs.inner))
    }

    pub fn distance(&self, rhs: &Vector) -> Result<f64> {
        Ok(self.try_sub(rhs)?.norm())
    }

    pub fn try_add(&self, rhs: &Vector) -> Result<Vector> {
        self.check_dim(rhs)?;
        Ok(Vector::from(&self.inner + &rhs.inner))
    }

    pub fn try_sub(&self, rhs: &Vector) -> Result<Vector> {
        self.check_dim(rhs)?;
        Ok(Vector::from(&self.inner - &rhs.inner))
    }

    /// The point of the segment `p + λ·r` (`0 ≤ λ ≤ 1`) closest to `q`.
    pub fn nearest_point_on_line(p: &Vector, r: &Vector, q: &Vector) -> Result<Vector> {
        p.check_dim(r)?;
        p.check_dim(q)?;

        let rr = r.dot(r)?;
        if rr == 0.0 {
            return Ok(p.clone())
        }

        let lambda = (q.try_sub(p)?.dot(r)? / rr).clamp(0.0, 1.0);
        p.try_add(&(r * lambda))
    }

    pub fn distance_line_point(p: &Vector, r: &Vector, q: &Vector) -> Result<f64> {
        let x = Self::nearest_point_on_line(p, r, q)?;
        q.distance(&x)
    }

    pub(crate) fn shape(&self) -> (usize, usize) {
        (self.dim(), 1)
    }

    fn check_dim(&self, rhs: &Vector) -> Result<()> {
        ensure!(self.dim() == rhs.dim(), Error::DimensionMismatch(self.shape(), rhs.shape()));
        Ok(())
    }
}

impl From<DVector<f64>> for Vector {
    fn from(inner: DVector<f64>) -> Self {
        Self { inner }
    }
}

impl From<Vec<f64>> for Vector {
    fn from(data: Vec<f64>) -> Self {
        Self::from_vec(data)
    }
}

impl<const N: usize> From<[f64; N]> for Vector {
    fn from(data: [f64; N]) -> Self {
        Self::from_slice(&data)
    }
}

impl FromIterator<f64> for Vector {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl Default for Vector {
    fn default() -> Self {
        Self::zeros(0)
    }
}

impl Display for Vector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", format::tuple(self.iter()))
    }
}

impl Index<usize> for Vector {
    type Output = f64;
    delegate! {
        to self.inner {
            fn index(&self, index: usize) -> &f64;
        }
    }
}

impl IndexMut<usize> for Vector {
    delegate! {
        to self.inner {
            fn index_mut(&mut self, index: usize) -> &mut f64;
        }
    }
}

fn unwrap_op(res: Result<Vector>) -> Vector {
    match res {
        Ok(v) => v,
        Err(e) => panic!("{e}"),
    }
}

#[auto_ops]
impl AddAssign<&Vector> for Vector {
    fn add_assign(&mut self, rhs: &Vector) {
        *self = unwrap_op(self.try_add(rhs));
    }
}

#[auto_ops]
impl SubAssign<&Vector> for Vector {
    fn sub_assign(&mut self, rhs: &Vector) {
        *self = unwrap_op(self.try_sub(rhs));
    }
}

impl Neg for Vector {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Vector::from(-self.inner)
    }
}

impl Neg for &Vector {
    type Output = Vector;
    fn neg(self) -> Self::Output {
        Vector::from(-&self.inner)
    }
}

impl MulAssign<f64> for Vector {
    fn mul_assign(&mut self, rhs: f64) {
        self.inner *= rhs;
    }
}

impl DivAssign<f64> for Vector {
    fn div_assign(&mut self, rhs: f64) {
        self.inner /= rhs;
    }
}

macro_rules! impl_scalar_op {
    ($trait:ident, $method:ident) => {
        impl $trait<f64> for Vector {
            type Output = Vector;
            fn $method(self, rhs: f64) -> Vector {
                Vector::from(self.inner.$method(rhs))
            }
        }

        impl $trait<f64> for &Vector {
            type Output = Vector;
            fn $method(self, rhs: f64) -> Vector {
                Vector::from((&self.inner).$method(rhs))
            }
        }
    };
}

impl_scalar_op!(Mul, mul);
impl_scalar_op!(Div, div);

impl Mul<Vector> for f64 {
    type Output = Vector;
    fn mul(self, rhs: Vector) -> Vector {
        rhs * self
    }
}

impl Mul<&Vector> for f64 {
    type Output = Vector;
    fn mul(self, rhs: &Vector) -> Vector {
        rhs * self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn init() {
        let v = Vector::from([1.0, 2.0, 3.0]);
        assert_eq!(v.dim(), 3);
        assert_eq!(v.to_vec(), vec![1.0, 2.0, 3.0]);
        assert_eq!(Vector::zeros(2), Vector::from([0.0, 0.0]));
        assert_eq!(Vector::default().dim(), 0);
    }

    #[test]
    fn get_set() {
        let mut v = Vector::zeros(2);
        assert_eq!(v.set(1, 4.0), Ok(()));
        assert_eq!(v.get(1), Ok(4.0));
        assert_eq!(v[1], 4.0);
        assert_eq!(v.get(2), Err(Error::IndexOutOfRange((2, 0), (2, 1))));
        assert!(v.set(5, 1.0).is_err());

        v[0] = -1.0;
        assert_eq!(v.get(0), Ok(-1.0));
    }

    #[test]
    fn add() {
        let v1 = Vector::from([1.0, 2.0]);
        let v2 = Vector::from([3.0, 4.0]);
        assert_eq!(v1 + v2, Vector::from([4.0, 6.0]));
    }

    #[test]
    fn sub() {
        let v1 = Vector::from([5.0, 8.0]);
        let v2 = Vector::from([3.0, 4.0]);
        assert_eq!(&v1 - &v2, Vector::from([2.0, 4.0]));
    }

    #[test]
    fn mismatch() {
        let v1 = Vector::from([1.0, 2.0]);
        let v2 = Vector::from([1.0, 2.0, 3.0]);
        assert_eq!(v1.try_add(&v2), Err(Error::DimensionMismatch((2, 1), (3, 1))));
        assert!(v1.dot(&v2).is_err());
        assert!(v1.distance(&v2).is_err());
    }

    #[test]
    #[should_panic]
    fn mismatch_panics() {
        let v1 = Vector::from([1.0, 2.0]);
        let v2 = Vector::from([1.0, 2.0, 3.0]);
        let _ = v1 + v2;
    }

    #[test]
    fn dot() {
        let v1 = Vector::from([1.0, 3.0]);
        let v2 = Vector::from([4.0, 6.0]);
        assert_eq!(v1.dot(&v2), Ok(22.0));
    }

    #[test]
    fn norm() {
        assert_eq!(Vector::from([3.0, 4.0]).norm(), 5.0);
    }

    #[test]
    fn scalar() {
        let v = Vector::from([2.0, 3.0]);
        assert_eq!(&v * 2.0, Vector::from([4.0, 6.0]));
        assert_eq!(2.0 * &v, Vector::from([4.0, 6.0]));
        assert_eq!(Vector::from([4.0, 8.0]) / 2.0, Vector::from([2.0, 4.0]));
        assert_eq!(-v, Vector::from([-2.0, -3.0]));

        let mut w = Vector::from([1.0, -1.0]);
        w *= 3.0;
        w /= 2.0;
        assert_eq!(w, Vector::from([1.5, -1.5]));
    }

    #[test]
    fn distance() {
        let v1 = Vector::from([1.0, 1.0]);
        let v2 = Vector::from([4.0, 5.0]);
        assert_eq!(v1.distance(&v2), Ok(5.0));
    }

    #[test]
    fn nearest_point() {
        let p = Vector::from([0.0, 0.0]);
        let r = Vector::from([4.0, 0.0]);

        let x = Vector::nearest_point_on_line(&p, &r, &Vector::from([1.0, 3.0])).unwrap();
        assert_eq!(x, Vector::from([1.0, 0.0]));

        // clamped to the end points
        let x = Vector::nearest_point_on_line(&p, &r, &Vector::from([7.0, 1.0])).unwrap();
        assert_eq!(x, Vector::from([4.0, 0.0]));

        let x = Vector::nearest_point_on_line(&p, &r, &Vector::from([-2.0, 1.0])).unwrap();
        assert_eq!(x, p);

        // degenerate direction
        let x = Vector::nearest_point_on_line(&p, &Vector::zeros(2), &Vector::from([1.0, 1.0])).unwrap();
        assert_eq!(x, p);
    }

    #[test]
    fn distance_line_point() {
        let p = Vector::from([1.0, 1.0]);
        let r = Vector::from([2.0, 2.0]);

        let d = Vector::distance_line_point(&p, &r, &Vector::from([1.0, 3.0])).unwrap();
        assert_abs_diff_eq!(d, 2f64.sqrt(), epsilon = 1e-12);

        let d = Vector::distance_line_point(&p, &r, &Vector::from([6.0, 7.0])).unwrap();
        assert_abs_diff_eq!(d, 5.0, epsilon = 1e-12);

        assert!(Vector::distance_line_point(&p, &r, &Vector::zeros(3)).is_err());
    }

    #[test]
    fn display() {
        assert_eq!(Vector::from([1.0, 2.5, 3.0]).to_string(), "(1, 2.5, 3)");
    }
}
