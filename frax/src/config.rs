use core::sync::atomic::{AtomicU64, Ordering};
use crate::{ensure, Error, Result};

/// Tolerance used by `Fraction::from_f64` unless one is given explicitly.
pub const DEFAULT_EPS: f64 = 1e-13;

// `f64` bits of the current default, initially `DEFAULT_EPS`.
static EPS_BITS: AtomicU64 = AtomicU64::new(0x3D3C_25C2_6849_7682);

pub fn default_eps() -> f64 {
    f64::from_bits(EPS_BITS.load(Ordering::Relaxed))
}

pub fn set_default_eps(eps: f64) -> Result<()> {
    ensure!(
        eps.is_finite() && eps > 0.0 && eps < 1.0,
        Error::InvalidArgument(format!("eps must lie in (0, 1), got {eps}"))
    );
    EPS_BITS.store(eps.to_bits(), Ordering::Relaxed);
    Ok(())
}

pub fn reset_default_eps() {
    EPS_BITS.store(DEFAULT_EPS.to_bits(), Ordering::Relaxed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_bits() {
        assert_eq!(f64::from_bits(0x3D3C_25C2_6849_7682), DEFAULT_EPS);
    }

    #[test]
    fn reject_invalid() {
        assert!(set_default_eps(0.0).is_err());
        assert!(set_default_eps(-1e-3).is_err());
        assert!(set_default_eps(f64::NAN).is_err());
        assert!(set_default_eps(1.5).is_err());
    }
}
