use std::str::FromStr;
use derive_more::Display;
use lazy_static::lazy_static;
use regex::Regex;
use crate::{ensure, err, Error, Result};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Display)]
#[display("RGB({}, {}, {})", r, g, b)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

const NAMED: [(&str, Rgb); 10] = [
    ("Black",   Rgb::new(0, 0, 0)),
    ("White",   Rgb::new(255, 255, 255)),
    ("Red",     Rgb::new(255, 0, 0)),
    ("Lime",    Rgb::new(0, 255, 0)),
    ("Blue",    Rgb::new(0, 0, 255)),
    ("Yellow",  Rgb::new(255, 255, 0)),
    ("Cyan",    Rgb::new(0, 255, 255)),
    ("Magenta", Rgb::new(255, 0, 255)),
    ("Gray",    Rgb::new(128, 128, 128)),
    ("Green",   Rgb::new(0, 128, 0)),
];

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    fn channels(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    fn channel_diffs(&self, other: &Rgb) -> impl Iterator<Item = u32> {
        let (a, b) = (self.channels(), other.channels());
        (0..3).map(move |i| a[i].abs_diff(b[i]) as u32)
    }

    /// Every channel differs by at most `delta`.
    pub fn alike(&self, other: &Rgb, delta: u8) -> bool {
        self.channel_diffs(other).all(|d| d <= delta as u32)
    }

    /// Sum of the absolute channel differences.
    pub fn difference(&self, other: &Rgb) -> u32 {
        self.channel_diffs(other).sum()
    }

    pub fn to_gray(&self) -> Rgb {
        let l = 0.299 * self.r as f64 + 0.587 * self.g as f64 + 0.114 * self.b as f64;
        let v = l.round().clamp(0.0, 255.0) as u8;
        Rgb::new(v, v, v)
    }

    /// Moves `percentage` percent of the way from `self` towards `other`.
    pub fn mix(&self, other: &Rgb, percentage: u8) -> Result<Rgb> {
        ensure!(percentage <= 100, Error::InvalidArgument(format!("percentage must be at most 100, got {percentage}")));

        let p = percentage as i32;
        let f = |c1: u8, c2: u8| {
            let (c1, c2) = (c1 as i32, c2 as i32);
            (c1 - (c1 - c2) * p / 100) as u8
        };

        Ok(Rgb::new(
            f(self.r, other.r),
            f(self.g, other.g),
            f(self.b, other.b),
        ))
    }

    pub fn name(&self) -> Option<&'static str> {
        NAMED.iter().find(|(_, c)| c == self).map(|(n, _)| *n)
    }

    pub fn from_name(name: &str) -> Option<Rgb> {
        let name = name.trim();
        NAMED.iter().find(|(n, _)| n.eq_ignore_ascii_case(name)).map(|(_, c)| *c)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Rgb { r, g, b }
    }
}

lazy_static! {
    static ref RGB_PATTERN: Regex = Regex::new(r"(?i)^\s*rgb\s*\(\s*(\d+)\s*,\s*(\d+)\s*,\s*(\d+)\s*\)\s*$").unwrap();
}

impl FromStr for Rgb {
    type Err = Error;

    /// Accepts `"RGB(r, g, b)"` or a basic color name.
    fn from_str(s: &str) -> Result<Self> {
        if let Some(c) = RGB_PATTERN.captures(s) {
            let mut vals = [0u8; 3];
            for (i, v) in vals.iter_mut().enumerate() {
                let m = &c[i + 1];
                *v = match m.parse::<u8>() {
                    Ok(v) => v,
                    Err(_) => return err!(InvalidArgument, "channel out of range: {m}"),
                };
            }
            let [r, g, b] = vals;
            return Ok(Rgb::new(r, g, b))
        }

        match Rgb::from_name(s) {
            Some(c) => Ok(c),
            None => err!(InvalidArgument, "unknown color: '{s}'"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alike() {
        let a = Rgb::new(100, 150, 200);
        let b = Rgb::new(105, 145, 200);
        assert!(a.alike(&b, 5));
        assert!(!a.alike(&b, 4));
        assert!(a.alike(&a, 0));
    }

    #[test]
    fn difference() {
        let a = Rgb::new(100, 150, 200);
        let b = Rgb::new(105, 145, 200);
        assert_eq!(a.difference(&b), 10);
        assert_eq!(Rgb::new(0, 0, 0).difference(&Rgb::new(255, 255, 255)), 765);
    }

    #[test]
    fn to_gray() {
        assert_eq!(Rgb::new(255, 255, 255).to_gray(), Rgb::new(255, 255, 255));
        assert_eq!(Rgb::new(255, 0, 0).to_gray(), Rgb::new(76, 76, 76));
        assert_eq!(Rgb::new(0, 255, 0).to_gray(), Rgb::new(150, 150, 150));
        assert_eq!(Rgb::new(0, 0, 255).to_gray(), Rgb::new(29, 29, 29));
    }

    #[test]
    fn mix() {
        let a = Rgb::new(200, 100, 0);
        let b = Rgb::new(100, 200, 50);
        assert_eq!(a.mix(&b, 0), Ok(a));
        assert_eq!(a.mix(&b, 100), Ok(b));
        assert_eq!(a.mix(&b, 50), Ok(Rgb::new(150, 150, 25)));
        assert_eq!(a.mix(&b, 33), Ok(Rgb::new(167, 133, 16)));
        assert!(a.mix(&b, 101).is_err());
    }

    #[test]
    fn display() {
        assert_eq!(Rgb::new(1, 22, 255).to_string(), "RGB(1, 22, 255)");
    }

    #[test]
    fn parse() {
        assert_eq!("RGB(1, 22, 255)".parse::<Rgb>(), Ok(Rgb::new(1, 22, 255)));
        assert_eq!(" rgb(0,0,0) ".parse::<Rgb>(), Ok(Rgb::new(0, 0, 0)));
        assert_eq!("red".parse::<Rgb>(), Ok(Rgb::new(255, 0, 0)));
        assert_eq!("Gray".parse::<Rgb>(), Ok(Rgb::new(128, 128, 128)));
        assert!("RGB(256, 0, 0)".parse::<Rgb>().is_err());
        assert!("RGB(1, 2)".parse::<Rgb>().is_err());
        assert!("chartreuse-ish".parse::<Rgb>().is_err());
    }

    #[test]
    fn parse_many() {
        assert!(RGB_PATTERN.is_match("RGB(0, 0, 0)"));
        assert!(!RGB_PATTERN.is_match("RGB(0, 0)"));

        for v in 0..=255u8 {
            let s = format!("rgb({v}, {}, 0)", 255 - v);
            assert_eq!(s.parse::<Rgb>(), Ok(Rgb::new(v, 255 - v, 0)));
        }
    }

    #[test]
    fn name() {
        assert_eq!(Rgb::new(0, 0, 255).name(), Some("Blue"));
        assert_eq!(Rgb::new(1, 2, 3).name(), None);

        let c = Rgb::new(12, 34, 56);
        assert_eq!(c.to_string().parse::<Rgb>(), Ok(c));
    }
}
