use std::fmt::{Display, Debug};
use std::str::FromStr;
use std::cmp::Ordering;
use std::iter::{Sum, Product};
use std::ops::{Add, Sub, Mul, Div, Neg, AddAssign, SubAssign, MulAssign, DivAssign};
use num_integer::Integer;
use num_traits::{Zero, One};
use auto_impl_ops::auto_ops;
use crate::{config, ensure, Error, Result};

/// An exact rational number with 64-bit components.
///
/// Always kept in lowest terms with a positive denominator,
/// zero being `0/1`.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "(i64, i64)", into = "(i64, i64)"))]
pub struct Fraction {
    numer: i64,
    denom: i64,
}

impl Fraction {
    #[inline]
    const fn new_raw(numer: i64, denom: i64) -> Fraction {
        Fraction { numer, denom }
    }

    #[inline]
    pub const fn numer(&self) -> i64 {
        self.numer
    }

    #[inline]
    pub const fn denom(&self) -> i64 {
        self.denom
    }

    /// Panics if `denom` is zero or the reduced value does not fit in `i64`.
    pub fn new(numer: i64, denom: i64) -> Fraction {
        assert!(denom != 0, "denominator must not be zero");
        Self::try_new(numer, denom).unwrap_or_else(|e|
            panic!("cannot build {numer}/{denom}: {e}")
        )
    }

    pub fn try_new(numer: i64, denom: i64) -> Result<Fraction> {
        ensure!(denom != 0, Error::DivisionByZero);
        Self::reduce(numer as i128, denom as i128)
    }

    #[inline]
    pub const fn from_integer(a: i64) -> Fraction {
        Self::new_raw(a, 1)
    }

    pub fn from_f64(x: f64) -> Result<Fraction> {
        Self::from_f64_with_eps(x, config::default_eps())
    }

    /// Continued-fraction approximation of `x` within about `eps`.
    ///
    /// Each term widens the tolerance handed to the next one, so values with
    /// long runs of small partial quotients (the golden ratio being the
    /// extreme) may land up to a few hundred `eps` away.
    pub fn from_f64_with_eps(x: f64, eps: f64) -> Result<Fraction> {
        ensure!(x.is_finite(), Error::InvalidArgument(format!("cannot convert {x} to a fraction")));
        ensure!(eps.is_finite() && eps > 0.0, Error::InvalidArgument(format!("invalid tolerance: {eps}")));
        make_rational(x, eps)
    }

    pub fn to_f64(&self) -> f64 {
        self.numer as f64 / self.denom as f64
    }

    pub fn is_integer(&self) -> bool {
        self.denom == 1
    }

    pub fn signum(&self) -> i64 {
        self.numer.signum()
    }

    pub fn abs(&self) -> Fraction {
        if self.numer < 0 {
            -self
        } else {
            *self
        }
    }

    pub fn recip(&self) -> Result<Fraction> {
        ensure!(!self.is_zero(), Error::DivisionByZero);
        Self::reduce(self.denom as i128, self.numer as i128)
    }

    /// The square root, approximated through `f64`.
    pub fn sqrt(&self) -> Result<Fraction> {
        ensure!(self.numer >= 0, Error::InvalidArgument(format!("square root of negative value {self}")));
        Self::from_f64(self.to_f64().sqrt())
    }

    pub fn checked_add(&self, rhs: &Fraction) -> Result<Fraction> {
        let (a, b) = self.wide();
        let (c, d) = rhs.wide();

        if b == d {
            Self::reduce(a + c, b)
        } else {
            let n = (a * d).checked_add(c * b).ok_or(Error::Overflow)?;
            Self::reduce(n, b * d)
        }
    }

    pub fn checked_sub(&self, rhs: &Fraction) -> Result<Fraction> {
        let (a, b) = self.wide();
        let (c, d) = rhs.wide();

        if b == d {
            Self::reduce(a - c, b)
        } else {
            let n = (a * d).checked_sub(c * b).ok_or(Error::Overflow)?;
            Self::reduce(n, b * d)
        }
    }

    pub fn checked_mul(&self, rhs: &Fraction) -> Result<Fraction> {
        let (a, b) = self.wide();
        let (c, d) = rhs.wide();
        Self::reduce(a * c, b * d)
    }

    /// Fails only for a numerator of `i64::MIN`.
    pub fn checked_neg(&self) -> Result<Fraction> {
        let (a, b) = self.wide();
        Self::reduce(-a, b)
    }

    pub fn checked_div(&self, rhs: &Fraction) -> Result<Fraction> {
        ensure!(!rhs.is_zero(), Error::DivisionByZero);
        let (a, b) = self.wide();
        let (c, d) = rhs.wide();
        Self::reduce(a * d, b * c)
    }

    #[inline]
    fn wide(&self) -> (i128, i128) {
        (self.numer as i128, self.denom as i128)
    }

    // `denom` must be non-zero.
    fn reduce(numer: i128, denom: i128) -> Result<Fraction> {
        if numer.is_zero() {
            return Ok(Self::zero())
        }

        let g = numer.gcd(&denom);
        let (mut p, mut q) = (numer / g, denom / g);

        if q < 0 {
            p = -p;
            q = -q;
        }

        let p = i64::try_from(p).map_err(|_| Error::Overflow)?;
        let q = i64::try_from(q).map_err(|_| Error::Overflow)?;

        Ok(Self::new_raw(p, q))
    }
}

fn make_rational(x: f64, eps: f64) -> Result<Fraction> {
    if x < 0.0 {
        return make_rational(-x, eps)?.checked_neg()
    }

    if x < eps {
        return Ok(Fraction::zero())
    }

    if x > 1.0 {
        let fl = x.floor();
        let int = Fraction::from_integer(float_to_i64(fl)?);
        return make_rational(x - fl, eps)?.checked_add(&int)
    }

    let inv_r = 1.0 / x;
    let inv = inv_r.floor();
    let rest = inv_r - inv;
    let n_eps = inv * eps;

    if n_eps > 1.0
        || rest <= (n_eps * inv) / (1.0 - n_eps)
        || rest >= (1.0 - n_eps * (inv + 1.0)) / (1.0 + eps * (inv + 1.0))
    {
        let q = if 2.0 * rest > 1.0 { inv + 1.0 } else { inv };
        return Fraction::try_new(1, float_to_i64(q)?)
    }

    let inv = Fraction::from_integer(float_to_i64(inv)?);
    make_rational(rest, 2.0 * eps * inv_r)?
        .checked_add(&inv)?
        .recip()
}

fn float_to_i64(x: f64) -> Result<i64> {
    const BOUND: f64 = 9_223_372_036_854_775_808.0; // 2^63

    if (-BOUND..BOUND).contains(&x) {
        Ok(x as i64)
    } else {
        Err(Error::Overflow)
    }
}

impl From<i64> for Fraction {
    fn from(a: i64) -> Self {
        Self::from_integer(a)
    }
}

impl From<i32> for Fraction {
    fn from(a: i32) -> Self {
        Self::from_integer(a as i64)
    }
}

impl TryFrom<(i64, i64)> for Fraction {
    type Error = Error;

    fn try_from(pair: (i64, i64)) -> Result<Self> {
        let (p, q) = pair;
        Self::try_new(p, q)
    }
}

impl From<Fraction> for (i64, i64) {
    fn from(r: Fraction) -> Self {
        (r.numer, r.denom)
    }
}

impl FromStr for Fraction {
    type Err = Error;

    /// Accepts `"n"`, `"n/d"` or a decimal such as `"1.25"`.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();

        if let Ok(a) = s.parse::<i64>() {
            return Ok(Self::from_integer(a))
        }

        if let Some((s1, s2)) = s.split_once('/') {
            if let (Ok(a), Ok(b)) = (s1.trim().parse::<i64>(), s2.trim().parse::<i64>()) {
                return Self::try_new(a, b)
            }
        } else if let Ok(x) = s.parse::<f64>() {
            return Self::from_f64(x)
        }

        Err(Error::InvalidArgument(format!("cannot parse fraction: '{s}'")))
    }
}

impl Default for Fraction {
    fn default() -> Self {
        Self::zero()
    }
}

impl Display for Fraction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.denom == 1 {
            write!(f, "{}", self.numer)
        } else {
            write!(f, "{}/{}", self.numer, self.denom)
        }
    }
}

impl Debug for Fraction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl Zero for Fraction {
    fn zero() -> Self {
        Self::new_raw(0, 1)
    }

    fn is_zero(&self) -> bool {
        self.numer == 0
    }
}

impl One for Fraction {
    fn one() -> Self {
        Self::new_raw(1, 1)
    }

    fn is_one(&self) -> bool {
        self.numer == 1 && self.denom == 1
    }
}

fn unwrap_op(res: Result<Fraction>, op: &str) -> Fraction {
    match res {
        Ok(r) => r,
        Err(e) => panic!("attempt to {op} fractions failed: {e}"),
    }
}

macro_rules! impl_assign_op {
    ($trait:ident, $method:ident, $checked:ident, $name:literal) => {
        #[auto_ops]
        impl $trait<&Fraction> for Fraction {
            fn $method(&mut self, rhs: &Fraction) {
                *self = unwrap_op(self.$checked(rhs), $name);
            }
        }
    };
}

impl_assign_op!(AddAssign, add_assign, checked_add, "add");
impl_assign_op!(SubAssign, sub_assign, checked_sub, "subtract");
impl_assign_op!(MulAssign, mul_assign, checked_mul, "multiply");
impl_assign_op!(DivAssign, div_assign, checked_div, "divide");

macro_rules! impl_int_op {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident) => {
        impl $assign_trait<i64> for Fraction {
            fn $assign_method(&mut self, rhs: i64) {
                $assign_trait::<&Fraction>::$assign_method(self, &Fraction::from_integer(rhs))
            }
        }

        impl $trait<i64> for Fraction {
            type Output = Fraction;
            fn $method(self, rhs: i64) -> Fraction {
                $trait::<Fraction>::$method(self, Fraction::from_integer(rhs))
            }
        }

        impl $trait<i64> for &Fraction {
            type Output = Fraction;
            fn $method(self, rhs: i64) -> Fraction {
                $trait::<Fraction>::$method(*self, Fraction::from_integer(rhs))
            }
        }

        impl $trait<Fraction> for i64 {
            type Output = Fraction;
            fn $method(self, rhs: Fraction) -> Fraction {
                $trait::<Fraction>::$method(Fraction::from_integer(self), rhs)
            }
        }

        impl $trait<&Fraction> for i64 {
            type Output = Fraction;
            fn $method(self, rhs: &Fraction) -> Fraction {
                $trait::<Fraction>::$method(Fraction::from_integer(self), *rhs)
            }
        }
    };
}

impl_int_op!(Add, add, AddAssign, add_assign);
impl_int_op!(Sub, sub, SubAssign, sub_assign);
impl_int_op!(Mul, mul, MulAssign, mul_assign);
impl_int_op!(Div, div, DivAssign, div_assign);

impl Neg for Fraction {
    type Output = Self;
    fn neg(self) -> Self::Output {
        unwrap_op(self.checked_neg(), "negate")
    }
}

impl Neg for &Fraction {
    type Output = Fraction;
    fn neg(self) -> Self::Output {
        -*self
    }
}

macro_rules! impl_accum {
    ($trait:ident, $method:ident, $accum_method:ident, $accum_init:ident) => {
        impl $trait for Fraction {
            fn $method<Iter: Iterator<Item = Self>>(iter: Iter) -> Self {
                iter.fold(Self::$accum_init(), |mut res, r| {
                    res.$accum_method(&r);
                    res
                })
            }
        }

        impl<'a> $trait<&'a Fraction> for Fraction {
            fn $method<Iter: Iterator<Item = &'a Fraction>>(iter: Iter) -> Self {
                iter.fold(Self::$accum_init(), |mut res, r| {
                    res.$accum_method(r);
                    res
                })
            }
        }
    }
}

impl_accum!(Sum, sum, add_assign, zero);
impl_accum!(Product, product, mul_assign, one);

impl Ord for Fraction {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a, b) = self.wide();
        let (c, d) = other.wide();
        (a * d).cmp(&(c * b))
    }
}

impl PartialOrd for Fraction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
