//! Run configuration loaded from YAML and/or the command line.
//!
//! Example file:
//!
//! ```yaml
//! projectiles: [Pb, Pb]
//! number_events: 1000
//! b_min: 0.0
//! b_max: -1.0            # negative: derive from radii and interaction range
//! cross_section: 6.4     # nucleon-nucleon inelastic cross section, fm^2
//! nucleon_min_dist: 0.4  # fm
//! ncoll: true
//! trials: true
//! random_seed: 42        # omit or <= 0 for a non-deterministic run
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use crate::core::collider::CollisionSettings;
use crate::core::nucleus::NucleusSpec;
use crate::core::random;
use crate::error::{Error, Result};

/// Complete description of a run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    /// Projectile and target.
    pub projectiles: [NucleusSpec; 2],
    #[serde(default = "default_number_events")]
    pub number_events: i64,
    #[serde(default)]
    pub b_min: f64,
    #[serde(default = "default_b_max")]
    pub b_max: f64,
    /// Nucleon-nucleon inelastic cross section (fm²).
    #[serde(default = "default_cross_section")]
    pub cross_section: f64,
    /// Minimum 3D distance between nucleons of the same nucleus (fm).
    #[serde(default)]
    pub nucleon_min_dist: f64,
    /// Track binary collisions.
    #[serde(default)]
    pub ncoll: bool,
    /// Track trials to first collision.
    #[serde(default)]
    pub trials: bool,
    /// Positive seeds are reproducible; zero or negative values are read as
    /// no seed.
    #[serde(default, deserialize_with = "signed_seed")]
    pub random_seed: Option<u64>,
}

fn signed_seed<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<Option<u64>, D::Error> {
    Ok(Option::<i64>::deserialize(d)?.and_then(random::seed_from_signed))
}

fn default_number_events() -> i64 {
    1
}

fn default_b_max() -> f64 {
    -1.0
}

/// σ_NN at √s = 2.76 TeV.
fn default_cross_section() -> f64 {
    6.4
}

impl RunConfig {
    /// Defaults for everything but the projectiles.
    pub fn new(projectile_a: NucleusSpec, projectile_b: NucleusSpec) -> Self {
        Self {
            projectiles: [projectile_a, projectile_b],
            number_events: default_number_events(),
            b_min: 0.0,
            b_max: default_b_max(),
            cross_section: default_cross_section(),
            nucleon_min_dist: 0.0,
            ncoll: false,
            trials: false,
            random_seed: None,
        }
    }

    pub fn from_yaml_str(s: &str) -> Result<Self> {
        let config: RunConfig = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let config: RunConfig = serde_yaml::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that do not need the nuclei. The radius-dependent `b_max`
    /// check happens when the collider is built.
    pub fn validate(&self) -> Result<()> {
        if self.number_events < 0 {
            return Err(Error::InvalidParam(format!(
                "number of events must be >= 0, got {}",
                self.number_events
            )));
        }
        if !self.b_min.is_finite() || self.b_min < 0.0 {
            return Err(Error::InvalidParam(format!(
                "b_min must be finite and >= 0, got {}",
                self.b_min
            )));
        }
        if self.b_max.is_nan() {
            return Err(Error::InvalidParam("b_max must not be NaN".into()));
        }
        if self.b_max >= 0.0 && self.b_max < self.b_min {
            return Err(Error::InvalidParam(format!(
                "b_max ({}) must be >= b_min ({})",
                self.b_max, self.b_min
            )));
        }
        if !self.cross_section.is_finite() || self.cross_section <= 0.0 {
            return Err(Error::InvalidParam(
                "cross section must be finite and > 0".into(),
            ));
        }
        if !self.nucleon_min_dist.is_finite() || self.nucleon_min_dist < 0.0 {
            return Err(Error::InvalidParam(
                "nucleon minimum distance must be finite and >= 0".into(),
            ));
        }
        Ok(())
    }

    pub fn settings(&self) -> CollisionSettings {
        CollisionSettings {
            b_min: self.b_min,
            b_max: self.b_max,
            number_events: self.number_events,
            track_binary_collisions: self.ncoll,
            track_trials: self.trials,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn minimal_yaml_gets_defaults() -> Result<()> {
        let cfg = RunConfig::from_yaml_str("projectiles: [p, Pb]\n")?;
        assert_eq!(cfg.projectiles[0], NucleusSpec::Proton);
        assert_eq!(cfg, RunConfig::new(NucleusSpec::Proton, "Pb".parse()?));
        assert_eq!(cfg.b_max, -1.0);
        assert_eq!(cfg.random_seed, None);
        Ok(())
    }

    #[test]
    fn full_yaml_round_trips_into_settings() -> Result<()> {
        let cfg = RunConfig::from_yaml_str(
            "projectiles: [Au, 'hs:16:2.5']\n\
             number_events: 25\n\
             b_min: 1.0\n\
             b_max: 8.0\n\
             cross_section: 4.2\n\
             nucleon_min_dist: 0.3\n\
             ncoll: true\n\
             trials: true\n\
             random_seed: 42\n",
        )?;
        let s = cfg.settings();
        assert_eq!(s.number_events, 25);
        assert_eq!(s.b_min, 1.0);
        assert_eq!(s.b_max, 8.0);
        assert!(s.track_binary_collisions && s.track_trials);
        assert_eq!(cfg.random_seed, Some(42));
        assert_eq!(
            cfg.projectiles[1],
            NucleusSpec::HardSphere {
                nucleons: 16,
                radius: 2.5
            }
        );
        Ok(())
    }

    #[test]
    fn non_positive_seed_means_unseeded() -> Result<()> {
        for seed in ["0", "-1", "-9000"] {
            let yaml = format!("projectiles: [p, p]\nrandom_seed: {seed}\n");
            let cfg = RunConfig::from_yaml_str(&yaml)?;
            assert_eq!(cfg.random_seed, None, "random_seed: {seed}");
        }
        Ok(())
    }

    #[test]
    fn unknown_projectile_is_reported() {
        let err = RunConfig::from_yaml_str("projectiles: [p, Zz]\n").unwrap_err();
        assert!(err.to_string().contains("Zz"));
    }

    #[test]
    fn unknown_key_rejected() {
        assert!(RunConfig::from_yaml_str("projectiles: [p, p]\nbmax: 3\n").is_err());
    }

    #[test]
    fn invalid_values_rejected() {
        for body in [
            "number_events: -1",
            "b_min: -0.5",
            "b_min: 4.0\nb_max: 3.0",
            "cross_section: 0.0",
            "nucleon_min_dist: -1.0",
        ] {
            let yaml = format!("projectiles: [p, p]\n{body}\n");
            assert!(
                matches!(RunConfig::from_yaml_str(&yaml), Err(Error::InvalidParam(_))),
                "accepted: {body}"
            );
        }
    }

    #[test]
    fn loads_from_file() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(file, "projectiles: [Cu, Cu]\nnumber_events: 3")?;
        let cfg = RunConfig::from_yaml_file(file.path())?;
        assert_eq!(cfg.number_events, 3);
        Ok(())
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = RunConfig::from_yaml_file(Path::new("/nonexistent/trento.yaml")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
