use std::f64::consts::PI;

use rand::RngCore;

use crate::core::nucleon::Nucleon;
use crate::error::{Error, Result};

/// Nucleon-nucleon interaction model shared by both nuclei for the whole run.
pub trait NucleonCommon: Send {
    /// Largest transverse distance (fm) at which two nucleons can interact.
    fn max_impact(&self) -> f64;

    /// Decide whether `a` and `b` interact. On interaction both nucleons are
    /// marked as participants. The outcome must not depend on argument order.
    fn participate(&self, a: &mut Nucleon, b: &mut Nucleon, rng: &mut dyn RngCore) -> bool;
}

/// Geometric black-disk criterion: two nucleons interact iff their transverse
/// distance is below `sqrt(sigma / pi)`.
#[derive(Debug, Clone, Copy)]
pub struct BlackDisk {
    cross_section: f64,
    max_impact_sq: f64,
}

impl BlackDisk {
    /// Build from an inelastic cross section in fm².
    ///
    /// Errors: `Error::InvalidParam` unless `cross_section` is finite and > 0.
    pub fn new(cross_section: f64) -> Result<Self> {
        if !cross_section.is_finite() || cross_section <= 0.0 {
            return Err(Error::InvalidParam(
                "cross section must be finite and > 0".into(),
            ));
        }
        Ok(Self {
            cross_section,
            max_impact_sq: cross_section / PI,
        })
    }

    /// Build directly from the interaction distance in fm.
    pub fn with_distance(distance: f64) -> Result<Self> {
        Self::new(PI * distance * distance)
    }

    pub fn cross_section(&self) -> f64 {
        self.cross_section
    }
}

impl NucleonCommon for BlackDisk {
    fn max_impact(&self) -> f64 {
        self.max_impact_sq.sqrt()
    }

    fn participate(&self, a: &mut Nucleon, b: &mut Nucleon, _rng: &mut dyn RngCore) -> bool {
        if a.distance_sq(b) < self.max_impact_sq {
            a.set_participant();
            b.set_participant();
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn max_impact_from_cross_section() -> Result<()> {
        let model = BlackDisk::new(PI * 0.6 * 0.6)?;
        assert!((model.max_impact() - 0.6).abs() < 1e-12);
        assert_eq!(model.cross_section(), PI * 0.6 * 0.6);

        let from_distance = BlackDisk::with_distance(0.6)?;
        assert!((from_distance.cross_section() - model.cross_section()).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn close_pair_participates() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(0);
        let model = BlackDisk::with_distance(1.0)?;
        let mut a = Nucleon::new(0.0, 0.0)?;
        let mut b = Nucleon::new(0.5, 0.5)?;
        assert!(model.participate(&mut a, &mut b, &mut rng));
        assert!(a.is_participant() && b.is_participant());
        Ok(())
    }

    #[test]
    fn distant_pair_untouched() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(0);
        let model = BlackDisk::with_distance(1.0)?;
        let mut a = Nucleon::new(0.0, 0.0)?;
        let mut b = Nucleon::new(1.5, 0.0)?;
        assert!(!model.participate(&mut a, &mut b, &mut rng));
        assert!(!a.is_participant() && !b.is_participant());
        Ok(())
    }

    #[test]
    fn order_independent() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(0);
        let model = BlackDisk::with_distance(1.0)?;
        for (x, y) in [(0.2, 0.1), (0.99, 0.0), (1.01, 0.0), (-0.7, 0.7)] {
            let mut a = Nucleon::new(0.0, 0.0)?;
            let mut b = Nucleon::new(x, y)?;
            let ab = model.participate(&mut a, &mut b, &mut rng);
            let ba = model.participate(&mut b, &mut a, &mut rng);
            assert_eq!(ab, ba, "asymmetric outcome at ({x}, {y})");
        }
        Ok(())
    }

    #[test]
    fn invalid_cross_section_rejected() {
        assert!(BlackDisk::new(0.0).is_err());
        assert!(BlackDisk::new(-1.0).is_err());
        assert!(BlackDisk::new(f64::INFINITY).is_err());
    }
}
