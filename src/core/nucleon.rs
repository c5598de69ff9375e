use crate::error::{Error, Result};

/// A nucleon projected onto the transverse plane.
///
/// Fields:
/// - `x`, `y`: transverse position in fm; the beam axis is z and the impact
///   parameter lies along x
/// - `participant`: set by the interaction model when the nucleon takes part
///   in at least one nucleon-nucleon interaction of the current configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nucleon {
    /// Transverse position along the impact-parameter axis.
    pub x: f64,
    /// Transverse position perpendicular to the impact-parameter axis.
    pub y: f64,
    participant: bool,
}

impl Nucleon {
    /// Create a non-participating nucleon after validating its position.
    ///
    /// Errors:
    /// - `Error::Sampling` if either coordinate is NaN or infinite.
    pub fn new(x: f64, y: f64) -> Result<Self> {
        if !x.is_finite() || !y.is_finite() {
            return Err(Error::Sampling(format!(
                "nucleon position must be finite, got ({x}, {y})"
            )));
        }
        Ok(Self {
            x,
            y,
            participant: false,
        })
    }

    /// Whether the nucleon has interacted in the current configuration.
    #[inline]
    pub fn is_participant(&self) -> bool {
        self.participant
    }

    /// Mark the nucleon as a participant. Idempotent.
    #[inline]
    pub fn set_participant(&mut self) {
        self.participant = true;
    }

    /// Squared transverse distance to another nucleon.
    #[inline]
    pub fn distance_sq(&self, other: &Nucleon) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}
