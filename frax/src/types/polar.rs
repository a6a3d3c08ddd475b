use std::f64::consts::{PI, TAU};
use derive_more::Display;
use crate::{ensure, Error, Result};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Display)]
#[display("({}, {})", x, y)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Point { x, y }
    }
}

/// Polar coordinates `(θ, r)` with `θ ∈ [0, 2π)` and `r ≥ 0`.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Polar {
    angle: f64,
    radius: f64,
}

impl Polar {
    pub fn new(angle: f64, radius: f64) -> Result<Self> {
        ensure!(angle.is_finite(), Error::InvalidArgument(format!("angle must be finite, got {angle}")));
        ensure!(radius.is_finite() && radius >= 0.0, Error::InvalidArgument(format!("radius must be non-negative, got {radius}")));

        Ok(Polar { angle: Self::normalize(angle), radius })
    }

    pub fn from_point(p: Point) -> Self {
        if p.x == 0 && p.y == 0 {
            return Polar::default()
        }

        let (x, y) = (p.x as f64, p.y as f64);
        Polar {
            angle: Self::normalize(y.atan2(x)),
            radius: x.hypot(y),
        }
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn to_point(&self) -> Point {
        let x = (self.radius * self.angle.cos()).round();
        let y = (self.radius * self.angle.sin()).round();
        Point::new(x as i32, y as i32)
    }

    fn normalize(angle: f64) -> f64 {
        let a = angle.rem_euclid(TAU);
        // rounding can land exactly on 2π
        if a >= TAU { 0.0 } else { a }
    }
}

impl From<Point> for Polar {
    fn from(p: Point) -> Self {
        Self::from_point(p)
    }
}

impl std::fmt::Display for Polar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}∠{}", self.radius, self.angle * 180.0 / PI)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-12, "{a} != {b}");
    }

    #[test]
    fn from_point() {
        let p = Polar::from_point(Point::new(5, 5));
        assert_close(p.angle(), PI / 4.0);
        assert_close(p.radius(), 50f64.sqrt());

        let p = Polar::from_point(Point::new(-1, 0));
        assert_close(p.angle(), PI);
        assert_close(p.radius(), 1.0);

        let p = Polar::from_point(Point::new(0, -3));
        assert_close(p.angle(), 3.0 * PI / 2.0);

        let p = Polar::from_point(Point::new(0, 2));
        assert_close(p.angle(), PI / 2.0);

        let p = Polar::from_point(Point::new(-3, -4));
        assert_close(p.radius(), 5.0);
        assert!(p.angle() > PI && p.angle() < 3.0 * PI / 2.0);
    }

    #[test]
    fn origin() {
        assert_eq!(Polar::from_point(Point::new(0, 0)), Polar::new(0.0, 0.0).unwrap());
    }

    #[test]
    fn normalize() {
        assert_close(Polar::new(-PI / 2.0, 1.0).unwrap().angle(), 3.0 * PI / 2.0);
        assert_close(Polar::new(5.0 * PI, 1.0).unwrap().angle(), PI);
        assert_close(Polar::new(TAU, 1.0).unwrap().angle(), 0.0);

        // -1e-20 + 2π rounds to 2π
        assert_eq!(Polar::new(-1e-20, 1.0).unwrap().angle(), 0.0);
        for k in -8..=8 {
            let a = Polar::new(k as f64 * PI / 3.0, 1.0).unwrap().angle();
            assert!((0.0..TAU).contains(&a), "{k}: {a}");
        }
    }

    #[test]
    fn invalid() {
        assert!(Polar::new(0.0, -1.0).is_err());
        assert!(Polar::new(f64::NAN, 1.0).is_err());
        assert!(Polar::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn to_point() {
        assert_eq!(Polar::new(PI, 10.0).unwrap().to_point(), Point::new(-10, 0));
        assert_eq!(Polar::new(PI / 2.0, 3.0).unwrap().to_point(), Point::new(0, 3));

        for (x, y) in [(5, 5), (-7, 2), (0, -9), (12, -13)] {
            let p = Point::new(x, y);
            assert_eq!(Polar::from(p).to_point(), p);
        }
    }
}
