pub type Result<T> = std::result::Result<T, Error>;

#[derive(Clone, Debug, PartialEq, Eq, derive_more::Display)]
pub enum Error {
    #[display("invalid argument: {}", _0)]
    InvalidArgument(String),

    #[display("dimension mismatch: {:?} vs {:?}", _0, _1)]
    DimensionMismatch((usize, usize), (usize, usize)),

    #[display("index {:?} out of range for shape {:?}", _0, _1)]
    IndexOutOfRange((usize, usize), (usize, usize)),

    #[display("division by zero")]
    DivisionByZero,

    #[display("not supported: {}", _0)]
    NotSupported(String),

    #[display("fraction overflow")]
    Overflow,
}

impl std::error::Error for Error {}

/// `err!(Kind, "fmt", args..)` evaluates to `Err(Error::Kind(msg))`
/// for the message-carrying variants.
#[macro_export]
macro_rules! err {
    ($kind:ident, $($arg:tt)*) => {{
        let msg = format!($($arg)*);
        Err($crate::Error::$kind(msg))
    }}
}

#[macro_export]
macro_rules! ensure {
    ($cond:expr, $e:expr) => {{
        if !$cond {
            return Err($e.into());
        }
    }}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(n: i32) -> Result<i32> {
        ensure!(n >= 0, Error::InvalidArgument(format!("negative: {n}")));
        if n > 10 {
            return err!(NotSupported, "too large: {n}");
        }
        Ok(n)
    }

    #[test]
    fn display() {
        assert_eq!(Error::DivisionByZero.to_string(), "division by zero");
        assert_eq!(
            Error::DimensionMismatch((2, 3), (4, 1)).to_string(),
            "dimension mismatch: (2, 3) vs (4, 1)"
        );
        assert_eq!(
            Error::IndexOutOfRange((3, 0), (2, 2)).to_string(),
            "index (3, 0) out of range for shape (2, 2)"
        );
    }

    #[test]
    fn macros() {
        assert_eq!(check(3), Ok(3));
        assert_eq!(check(-1), Err(Error::InvalidArgument("negative: -1".into())));
        assert_eq!(check(11), Err(Error::NotSupported("too large: 11".into())));
    }
}
