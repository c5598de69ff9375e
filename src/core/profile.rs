use crate::core::interaction::NucleonCommon;
use crate::core::nucleus::Nucleus;
use crate::error::Result;

/// Highest eccentricity harmonic reported per event.
pub const MAX_HARMONIC: usize = 5;

/// Observables computed for one accepted event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventResult {
    /// Participants summed over both nuclei.
    pub npart: usize,
    /// Participant eccentricities ε2..ε5.
    pub eccentricity: [f64; MAX_HARMONIC - 1],
}

impl EventResult {
    /// Eccentricity of harmonic `n` (2..=5).
    pub fn ecc(&self, n: usize) -> Option<f64> {
        n.checked_sub(2)
            .and_then(|i| self.eccentricity.get(i))
            .copied()
    }
}

/// Downstream stage that turns a prepared pair of nuclei into observables.
pub trait EventProfile {
    fn compute(
        &mut self,
        nucleus_a: &dyn Nucleus,
        nucleus_b: &dyn Nucleus,
        nucleon_common: &dyn NucleonCommon,
    ) -> Result<EventResult>;
}

/// Participant-geometry profile: counts participants and measures the
/// shape of their transverse distribution.
///
/// ε_n = |Σ rⁿ e^{inφ}| / Σ rⁿ about the participant centroid; zero when
/// fewer than two nucleons participate.
#[derive(Debug, Clone, Default)]
pub struct ParticipantProfile {
    scratch: Vec<(f64, f64)>,
}

impl ParticipantProfile {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventProfile for ParticipantProfile {
    fn compute(
        &mut self,
        nucleus_a: &dyn Nucleus,
        nucleus_b: &dyn Nucleus,
        _nucleon_common: &dyn NucleonCommon,
    ) -> Result<EventResult> {
        self.scratch.clear();
        self.scratch.extend(
            nucleus_a
                .nucleons()
                .iter()
                .chain(nucleus_b.nucleons())
                .filter(|n| n.is_participant())
                .map(|n| (n.x, n.y)),
        );
        let npart = self.scratch.len();
        Ok(EventResult {
            npart,
            eccentricity: eccentricities(&self.scratch),
        })
    }
}

fn eccentricities(points: &[(f64, f64)]) -> [f64; MAX_HARMONIC - 1] {
    let mut out = [0.0; MAX_HARMONIC - 1];
    if points.len() < 2 {
        return out;
    }
    let n = points.len() as f64;
    let cx = points.iter().map(|p| p.0).sum::<f64>() / n;
    let cy = points.iter().map(|p| p.1).sum::<f64>() / n;

    for (slot, harmonic) in out.iter_mut().zip(2..=MAX_HARMONIC) {
        let k = harmonic as f64;
        let (mut re, mut im, mut norm) = (0.0, 0.0, 0.0);
        for &(x, y) in points {
            let (dx, dy) = (x - cx, y - cy);
            let r = dx.hypot(dy);
            let phi = dy.atan2(dx);
            let w = r.powi(harmonic as i32);
            re += w * (k * phi).cos();
            im += w * (k * phi).sin();
            norm += w;
        }
        // Rounding can push the ratio a few ulps past its bound.
        if norm > 0.0 {
            *slot = (re.hypot(im) / norm).min(1.0);
        }
    }
    out
}
