//! Nuclei and the species table used to build them.
//!
//! A [`Nucleus`] owns a nucleon buffer that is overwritten on every call to
//! [`Nucleus::sample_nucleons`]. The collider reuses the same two nuclei for
//! the whole run, so implementations keep their allocation between events.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use rand::{Rng, RngCore};
use serde::Deserialize;

use crate::core::nucleon::Nucleon;
use crate::error::{Error, Result};

/// Placement attempts per nucleon before minimum-distance sampling gives up.
const MAX_PLACEMENT_ATTEMPTS: usize = 10_000;

/// Summed radius below which a system counts as point-like.
pub const POINT_LIKE_RADIUS: f64 = 0.1;

/// A nucleus whose nucleon positions are resampled for every collision trial.
pub trait Nucleus: Send {
    /// Geometric scale (fm) used for `b_max` and asymmetry derivation.
    fn radius(&self) -> f64;

    /// Replace the nucleon set with a fresh configuration whose center is
    /// displaced by `offset` along the impact-parameter axis. All participant
    /// flags are cleared.
    fn sample_nucleons(&mut self, offset: f64, rng: &mut dyn RngCore) -> Result<()>;

    /// Nucleons produced by the most recent `sample_nucleons` call.
    fn nucleons(&self) -> &[Nucleon];

    /// Mutable view used by the interaction model to flag participants.
    fn nucleons_mut(&mut self) -> &mut [Nucleon];

    /// Number of participants in the current configuration.
    fn participants(&self) -> usize {
        self.nucleons().iter().filter(|n| n.is_participant()).count()
    }
}

/// A single nucleon sitting exactly at the offset.
#[derive(Debug, Clone, Default)]
pub struct Proton {
    nucleons: Vec<Nucleon>,
}

impl Proton {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Nucleus for Proton {
    fn radius(&self) -> f64 {
        0.0
    }

    fn sample_nucleons(&mut self, offset: f64, _rng: &mut dyn RngCore) -> Result<()> {
        self.nucleons.clear();
        self.nucleons.push(Nucleon::new(offset, 0.0)?);
        Ok(())
    }

    fn nucleons(&self) -> &[Nucleon] {
        &self.nucleons
    }

    fn nucleons_mut(&mut self) -> &mut [Nucleon] {
        &mut self.nucleons
    }
}

/// Nucleons distributed uniformly inside a sphere, optionally keeping a
/// minimum 3D separation between any two of them.
///
/// Positions are recentered so the transverse centroid sits at `(offset, 0)`.
#[derive(Debug, Clone)]
pub struct HardSphere {
    size: usize,
    radius: f64,
    min_distance: f64,
    nucleons: Vec<Nucleon>,
    scratch: Vec<[f64; 3]>,
}

impl HardSphere {
    /// Errors:
    /// - `Error::InvalidParam` if `size` is zero, `radius` is not finite and
    ///   positive, or `min_distance` is negative/non-finite.
    pub fn new(size: usize, radius: f64, min_distance: f64) -> Result<Self> {
        if size == 0 {
            return Err(Error::InvalidParam("nucleus must contain nucleons".into()));
        }
        if !radius.is_finite() || radius <= 0.0 {
            return Err(Error::InvalidParam(
                "nucleus radius must be finite and > 0".into(),
            ));
        }
        if !min_distance.is_finite() || min_distance < 0.0 {
            return Err(Error::InvalidParam(
                "nucleon minimum distance must be finite and >= 0".into(),
            ));
        }
        Ok(Self {
            size,
            radius,
            min_distance,
            nucleons: Vec::with_capacity(size),
            scratch: Vec::with_capacity(size),
        })
    }

    /// Number of nucleons in the nucleus.
    pub fn size(&self) -> usize {
        self.size
    }

    fn sample_point(&self, rng: &mut dyn RngCore) -> [f64; 3] {
        // Uniform in the ball: r ~ R u^(1/3), isotropic direction.
        let r = self.radius * rng.random::<f64>().cbrt();
        let cos_theta = 2.0 * rng.random::<f64>() - 1.0;
        let phi = 2.0 * PI * rng.random::<f64>();
        let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();
        [
            r * sin_theta * phi.cos(),
            r * sin_theta * phi.sin(),
            r * cos_theta,
        ]
    }
}

impl Nucleus for HardSphere {
    fn radius(&self) -> f64 {
        self.radius
    }

    fn sample_nucleons(&mut self, offset: f64, rng: &mut dyn RngCore) -> Result<()> {
        self.scratch.clear();
        let dmin_sq = self.min_distance * self.min_distance;
        for index in 0..self.size {
            let mut attempts = 0usize;
            let point = loop {
                if attempts >= MAX_PLACEMENT_ATTEMPTS {
                    return Err(Error::Sampling(format!(
                        "failed to place nucleon {index} of {} with minimum distance {} fm; \
                         reduce the minimum distance",
                        self.size, self.min_distance
                    )));
                }
                attempts += 1;
                let p = self.sample_point(rng);
                if dmin_sq == 0.0 || !too_close(&self.scratch, &p, dmin_sq) {
                    break p;
                }
            };
            self.scratch.push(point);
        }

        let n = self.scratch.len() as f64;
        let cx = self.scratch.iter().map(|p| p[0]).sum::<f64>() / n;
        let cy = self.scratch.iter().map(|p| p[1]).sum::<f64>() / n;

        self.nucleons.clear();
        for p in &self.scratch {
            self.nucleons.push(Nucleon::new(p[0] - cx + offset, p[1] - cy)?);
        }
        Ok(())
    }

    fn nucleons(&self) -> &[Nucleon] {
        &self.nucleons
    }

    fn nucleons_mut(&mut self) -> &mut [Nucleon] {
        &mut self.nucleons
    }
}

fn too_close(existing: &[[f64; 3]], p: &[f64; 3], dmin_sq: f64) -> bool {
    existing.iter().any(|q| {
        let d: f64 = q.iter().zip(p).map(|(a, b)| (a - b) * (a - b)).sum();
        d < dmin_sq
    })
}

/// Nucleus description as accepted on the command line and in YAML.
///
/// Accepted forms:
/// - `p`: a proton
/// - `Cu`, `Xe`, `Au`, `Pb`, `U`: built-in hard-sphere species
/// - `hs:<A>:<R>`: hard sphere with `A` nucleons and radius `R` fm
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub enum NucleusSpec {
    Proton,
    HardSphere { nucleons: usize, radius: f64 },
}

/// Built-in species: symbol, nucleon number, radius (fm).
const SPECIES: &[(&str, usize, f64)] = &[
    ("Cu", 63, 4.20),
    ("Xe", 129, 5.36),
    ("Au", 197, 6.38),
    ("Pb", 208, 6.62),
    ("U", 238, 6.81),
];

impl NucleusSpec {
    /// Instantiate the nucleus. `min_distance` only applies to multi-nucleon
    /// species.
    pub fn build(&self, min_distance: f64) -> Result<Box<dyn Nucleus>> {
        let nucleus: Box<dyn Nucleus> = match *self {
            NucleusSpec::Proton => Box::new(Proton::new()),
            NucleusSpec::HardSphere { nucleons, radius } => {
                Box::new(HardSphere::new(nucleons, radius, min_distance)?)
            }
        };
        Ok(nucleus)
    }
}

impl FromStr for NucleusSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s == "p" {
            return Ok(NucleusSpec::Proton);
        }
        if let Some(&(_, nucleons, radius)) = SPECIES.iter().find(|(sym, _, _)| *sym == s) {
            return Ok(NucleusSpec::HardSphere { nucleons, radius });
        }
        if let Some(rest) = s.strip_prefix("hs:") {
            let (a, r) = rest.split_once(':').ok_or_else(|| {
                Error::InvalidParam(format!("expected hs:<A>:<R>, got '{s}'"))
            })?;
            let nucleons: usize = a
                .parse()
                .map_err(|_| Error::InvalidParam(format!("invalid nucleon number '{a}'")))?;
            let radius: f64 = r
                .parse()
                .map_err(|_| Error::InvalidParam(format!("invalid radius '{r}'")))?;
            if nucleons == 0 || !radius.is_finite() || radius <= 0.0 {
                return Err(Error::InvalidParam(format!(
                    "hard sphere needs A > 0 and R > 0, got '{s}'"
                )));
            }
            return Ok(NucleusSpec::HardSphere { nucleons, radius });
        }
        Err(Error::InvalidParam(format!("unknown projectile '{s}'")))
    }
}

impl TryFrom<String> for NucleusSpec {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl fmt::Display for NucleusSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NucleusSpec::Proton => write!(f, "p"),
            NucleusSpec::HardSphere { nucleons, radius } => {
                match SPECIES
                    .iter()
                    .find(|(_, a, r)| a == nucleons && r == radius)
                {
                    Some((sym, _, _)) => write!(f, "{sym}"),
                    None => write!(f, "hs:{nucleons}:{radius}"),
                }
            }
        }
    }
}
