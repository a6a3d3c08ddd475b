use std::fmt::{Display, Debug};
use std::ops::{Add, Sub, Mul, Div, Neg, AddAssign, SubAssign, MulAssign, DivAssign};
use num_traits::{Zero, One};
use auto_impl_ops::auto_ops;
use crate::{ensure, Error, Fraction, Result};

/// A complex number `re + im·i` with exact rational parts.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Complex {
    re: Fraction,
    im: Fraction,
}

impl Complex {
    pub fn new<R, I>(re: R, im: I) -> Complex
    where R: Into<Fraction>, I: Into<Fraction> {
        Complex { re: re.into(), im: im.into() }
    }

    pub fn from_f64(re: f64, im: f64) -> Result<Complex> {
        let re = Fraction::from_f64(re)?;
        let im = Fraction::from_f64(im)?;
        Ok(Complex { re, im })
    }

    pub fn i() -> Complex {
        Complex::new(0, 1)
    }

    pub fn re(&self) -> &Fraction {
        &self.re
    }

    pub fn im(&self) -> &Fraction {
        &self.im
    }

    pub fn is_real(&self) -> bool {
        self.im.is_zero()
    }

    pub fn conj(&self) -> Complex {
        Complex { re: self.re, im: -self.im }
    }

    /// `re² + im²`, exact.
    pub fn norm_sqr(&self) -> Fraction {
        self.re * self.re + self.im * self.im
    }

    pub fn abs(&self) -> Result<Fraction> {
        self.norm_sqr().sqrt()
    }

    pub fn checked_add(&self, rhs: &Complex) -> Result<Complex> {
        let re = self.re.checked_add(&rhs.re)?;
        let im = self.im.checked_add(&rhs.im)?;
        Ok(Complex { re, im })
    }

    pub fn checked_sub(&self, rhs: &Complex) -> Result<Complex> {
        let re = self.re.checked_sub(&rhs.re)?;
        let im = self.im.checked_sub(&rhs.im)?;
        Ok(Complex { re, im })
    }

    pub fn checked_mul(&self, rhs: &Complex) -> Result<Complex> {
        let (a, b) = (&self.re, &self.im);
        let (c, d) = (&rhs.re, &rhs.im);

        let re = a.checked_mul(c)?.checked_sub(&b.checked_mul(d)?)?;
        let im = a.checked_mul(d)?.checked_add(&b.checked_mul(c)?)?;

        Ok(Complex { re, im })
    }

    pub fn checked_div(&self, rhs: &Complex) -> Result<Complex> {
        ensure!(!rhs.is_zero(), Error::DivisionByZero);

        let (a, b) = (&self.re, &self.im);
        let (c, d) = (&rhs.re, &rhs.im);
        let n = c.checked_mul(c)?.checked_add(&d.checked_mul(d)?)?;

        let re = a.checked_mul(c)?.checked_add(&b.checked_mul(d)?)?.checked_div(&n)?;
        let im = b.checked_mul(c)?.checked_sub(&a.checked_mul(d)?)?.checked_div(&n)?;

        Ok(Complex { re, im })
    }
}

impl From<Fraction> for Complex {
    fn from(re: Fraction) -> Self {
        Complex { re, im: Fraction::zero() }
    }
}

impl From<i64> for Complex {
    fn from(re: i64) -> Self {
        Complex::from(Fraction::from(re))
    }
}

impl Display for Complex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (re, im) = (&self.re, &self.im);

        if !re.is_zero() {
            write!(f, "{re}")?;
        }

        if im.is_zero() {
            return if re.is_zero() { write!(f, "0") } else { Ok(()) }
        }

        if !re.is_zero() && im.signum() > 0 {
            write!(f, "+")?;
        }

        if im.is_one() {
            write!(f, "i")
        } else if (-im).is_one() {
            write!(f, "-i")
        } else {
            write!(f, "{im}i")
        }
    }
}

impl Debug for Complex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl Zero for Complex {
    fn zero() -> Self {
        Complex::from(Fraction::zero())
    }

    fn is_zero(&self) -> bool {
        self.re.is_zero() && self.im.is_zero()
    }
}

impl One for Complex {
    fn one() -> Self {
        Complex::from(Fraction::one())
    }
}

fn unwrap_op(res: Result<Complex>, op: &str) -> Complex {
    match res {
        Ok(z) => z,
        Err(e) => panic!("attempt to {op} complex numbers failed: {e}"),
    }
}

#[auto_ops]
impl AddAssign<&Complex> for Complex {
    fn add_assign(&mut self, rhs: &Complex) {
        *self = unwrap_op(self.checked_add(rhs), "add");
    }
}

#[auto_ops]
impl SubAssign<&Complex> for Complex {
    fn sub_assign(&mut self, rhs: &Complex) {
        *self = unwrap_op(self.checked_sub(rhs), "subtract");
    }
}

#[auto_ops]
impl MulAssign<&Complex> for Complex {
    fn mul_assign(&mut self, rhs: &Complex) {
        *self = unwrap_op(self.checked_mul(rhs), "multiply");
    }
}

#[auto_ops]
impl DivAssign<&Complex> for Complex {
    fn div_assign(&mut self, rhs: &Complex) {
        *self = unwrap_op(self.checked_div(rhs), "divide");
    }
}

macro_rules! impl_scalar_op {
    ($s:ty, $trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident) => {
        impl $assign_trait<$s> for Complex {
            fn $assign_method(&mut self, rhs: $s) {
                $assign_trait::<&Complex>::$assign_method(self, &Complex::from(rhs))
            }
        }

        impl $trait<$s> for Complex {
            type Output = Complex;
            fn $method(self, rhs: $s) -> Complex {
                $trait::<Complex>::$method(self, Complex::from(rhs))
            }
        }

        impl $trait<$s> for &Complex {
            type Output = Complex;
            fn $method(self, rhs: $s) -> Complex {
                $trait::<Complex>::$method(*self, Complex::from(rhs))
            }
        }
    };
}

macro_rules! impl_scalar_ops {
    ($s:ty) => {
        impl_scalar_op!($s, Add, add, AddAssign, add_assign);
        impl_scalar_op!($s, Sub, sub, SubAssign, sub_assign);
        impl_scalar_op!($s, Mul, mul, MulAssign, mul_assign);
        impl_scalar_op!($s, Div, div, DivAssign, div_assign);
    };
}

impl_scalar_ops!(Fraction);
impl_scalar_ops!(i64);

impl Neg for Complex {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Complex { re: -self.re, im: -self.im }
    }
}

impl Neg for &Complex {
    type Output = Complex;
    fn neg(self) -> Self::Output {
        -*self
    }
}
