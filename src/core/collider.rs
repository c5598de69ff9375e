use rand::RngCore;
use tracing::{debug, info, trace};

use crate::config::RunConfig;
use crate::core::interaction::{BlackDisk, NucleonCommon};
use crate::core::nucleus::{Nucleus, POINT_LIKE_RADIUS};
use crate::core::profile::EventProfile;
use crate::core::random::{self, Engine};
use crate::error::{Error, Result};
use crate::output::Output;

/// User-facing knobs of a run, before derivation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionSettings {
    /// Minimum impact parameter (fm, >= 0).
    pub b_min: f64,
    /// Maximum impact parameter (fm). Negative means derive it from the nuclear
    /// radii and the interaction range.
    pub b_max: f64,
    /// Number of events to generate (>= 0).
    pub number_events: i64,
    /// Report the number of interacting nucleon pairs; otherwise reported as 0.
    pub track_binary_collisions: bool,
    /// Report how many impact parameters were drawn before acceptance;
    /// otherwise reported as 0.
    pub track_trials: bool,
}

impl Default for CollisionSettings {
    fn default() -> Self {
        Self {
            b_min: 0.0,
            b_max: -1.0,
            number_events: 1,
            track_binary_collisions: false,
            track_trials: false,
        }
    }
}

/// Run parameters fixed at construction.
///
/// Invariants: `b_max >= b_min >= 0` and `asymmetry` in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunParameters {
    pub b_min: f64,
    pub b_max: f64,
    pub asymmetry: f64,
    pub nevents: usize,
    pub track_binary_collisions: bool,
    pub track_trials: bool,
}

/// An accepted collision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collision {
    /// Impact parameter of the accepted trial (fm).
    pub impact_parameter: f64,
    /// Interacting pairs summed over every trial up to acceptance; 0 when
    /// untracked.
    pub binary_collisions: u64,
    /// Impact parameters drawn up to and including the accepted one; 0 when
    /// untracked.
    pub trials: u64,
}

/// Maximum impact parameter: the configured value, or if it is negative the
/// largest separation at which any nucleon pair could still interact.
pub fn determine_bmax(
    configured: f64,
    nucleus_a: &dyn Nucleus,
    nucleus_b: &dyn Nucleus,
    nucleon_common: &dyn NucleonCommon,
) -> f64 {
    if configured < 0.0 {
        nucleus_a.radius() + nucleus_b.radius() + nucleon_common.max_impact()
    } else {
        configured
    }
}

/// Fraction of the impact parameter carried by nucleus A: `rA / (rA + rB)`,
/// or 1/2 for point-like systems such as p+p.
pub fn determine_asymmetry(nucleus_a: &dyn Nucleus, nucleus_b: &dyn Nucleus) -> f64 {
    let ra = nucleus_a.radius();
    let rb = nucleus_b.radius();
    let sum = ra + rb;
    if sum < POINT_LIKE_RADIUS {
        0.5
    } else {
        ra / sum
    }
}

/// Draw `b` from P(b) db ∝ 2πb db on `[b_min, b_max]` by inverting the CDF.
#[inline]
pub fn sample_impact_parameter(b_min: f64, b_max: f64, rng: &mut dyn RngCore) -> f64 {
    let bmin_sq = b_min * b_min;
    (bmin_sq + (b_max * b_max - bmin_sq) * random::canonical(rng)).sqrt()
}

/// Event generator: owns both nuclei, the interaction model and the random
/// engine for the lifetime of the run.
pub struct Collider {
    nucleus_a: Box<dyn Nucleus>,
    nucleus_b: Box<dyn Nucleus>,
    nucleon_common: Box<dyn NucleonCommon>,
    params: RunParameters,
    rng: Engine,
}

impl Collider {
    /// Assemble a collider and derive its run parameters.
    ///
    /// Errors: `Error::InvalidParam` for a negative or non-finite `b_min`, a
    /// NaN `b_max`, `b_max < b_min` after derivation, or a negative event
    /// count. Nothing is sampled before validation passes.
    pub fn new(
        nucleus_a: Box<dyn Nucleus>,
        nucleus_b: Box<dyn Nucleus>,
        nucleon_common: Box<dyn NucleonCommon>,
        settings: &CollisionSettings,
        seed: Option<u64>,
    ) -> Result<Self> {
        if !settings.b_min.is_finite() || settings.b_min < 0.0 {
            return Err(Error::InvalidParam(format!(
                "b_min must be finite and >= 0, got {}",
                settings.b_min
            )));
        }
        if settings.b_max.is_nan() {
            return Err(Error::InvalidParam("b_max must not be NaN".into()));
        }
        let nevents = usize::try_from(settings.number_events).map_err(|_| {
            Error::InvalidParam(format!(
                "number of events must be >= 0, got {}",
                settings.number_events
            ))
        })?;

        let b_max = determine_bmax(
            settings.b_max,
            nucleus_a.as_ref(),
            nucleus_b.as_ref(),
            nucleon_common.as_ref(),
        );
        if !b_max.is_finite() || b_max < settings.b_min {
            return Err(Error::InvalidParam(format!(
                "b_max ({b_max}) must be finite and >= b_min ({})",
                settings.b_min
            )));
        }
        let asymmetry = determine_asymmetry(nucleus_a.as_ref(), nucleus_b.as_ref());

        let params = RunParameters {
            b_min: settings.b_min,
            b_max,
            asymmetry,
            nevents,
            track_binary_collisions: settings.track_binary_collisions,
            track_trials: settings.track_trials,
        };
        info!(
            b_min = params.b_min,
            b_max = params.b_max,
            asymmetry = params.asymmetry,
            nevents = params.nevents,
            seed = ?seed,
            "collider ready"
        );

        Ok(Self {
            nucleus_a,
            nucleus_b,
            nucleon_common,
            params,
            rng: random::engine(seed),
        })
    }

    /// Build the reference setup described by a configuration: the two
    /// projectiles and a black-disk interaction with the configured cross
    /// section.
    pub fn from_config(config: &RunConfig) -> Result<Self> {
        config.validate()?;
        let [spec_a, spec_b] = &config.projectiles;
        let nucleus_a = spec_a.build(config.nucleon_min_dist)?;
        let nucleus_b = spec_b.build(config.nucleon_min_dist)?;
        let model = BlackDisk::new(config.cross_section)?;
        info!(
            projectile_a = %spec_a,
            projectile_b = %spec_b,
            cross_section = config.cross_section,
            "building collider"
        );
        Self::new(
            nucleus_a,
            nucleus_b,
            Box::new(model),
            &config.settings(),
            config.random_seed,
        )
    }

    pub fn params(&self) -> &RunParameters {
        &self.params
    }

    /// Nucleus A as left by the most recent sample.
    pub fn nucleus_a(&self) -> &dyn Nucleus {
        self.nucleus_a.as_ref()
    }

    /// Nucleus B as left by the most recent sample.
    pub fn nucleus_b(&self) -> &dyn Nucleus {
        self.nucleus_b.as_ref()
    }

    pub fn nucleon_common(&self) -> &dyn NucleonCommon {
        self.nucleon_common.as_ref()
    }

    /// Sample impact parameters until at least one nucleon pair interacts
    /// (minimum-bias trigger). On return both nuclei hold the accepted
    /// configuration with participants flagged.
    ///
    /// Every trial draws `b` first, then resamples A and B, then tests the
    /// full Cartesian product of nucleon pairs without short-circuiting.
    /// There is no trial ceiling: a model that can never interact within
    /// `[b_min, b_max]` keeps this looping.
    pub fn sample_collision(&mut self) -> Result<Collision> {
        let RunParameters {
            b_min,
            b_max,
            asymmetry,
            track_binary_collisions,
            track_trials,
            ..
        } = self.params;

        let mut binary_collisions = 0u64;
        let mut trials = 0u64;
        let mut collided = false;

        loop {
            let b = sample_impact_parameter(b_min, b_max, &mut self.rng);

            // Centers separated by exactly b, split according to nuclear size.
            self.nucleus_a.sample_nucleons(asymmetry * b, &mut self.rng)?;
            self.nucleus_b
                .sample_nucleons((asymmetry - 1.0) * b, &mut self.rng)?;

            for a in self.nucleus_a.nucleons_mut() {
                for nb in self.nucleus_b.nucleons_mut() {
                    let hit = self.nucleon_common.participate(a, nb, &mut self.rng);
                    if hit && track_binary_collisions {
                        binary_collisions += 1;
                    }
                    collided = hit || collided;
                }
            }
            if track_trials {
                trials += 1;
            }

            if collided {
                return Ok(Collision {
                    impact_parameter: b,
                    binary_collisions,
                    trials,
                });
            }
            trace!(b, "no interacting pair");
        }
    }

    /// Generate every event: sample a collision, compute its profile and hand
    /// both to `output`. The first failure aborts the run.
    pub fn run_events(
        &mut self,
        profile: &mut dyn EventProfile,
        output: &mut dyn Output,
    ) -> Result<()> {
        for n in 0..self.params.nevents {
            let collision = self.sample_collision()?;
            let event = profile.compute(
                self.nucleus_a.as_ref(),
                self.nucleus_b.as_ref(),
                self.nucleon_common.as_ref(),
            )?;
            debug!(
                event = n,
                b = collision.impact_parameter,
                ncoll = collision.binary_collisions,
                trials = collision.trials,
                npart = event.npart,
                "event accepted"
            );
            output.emit(n, &collision, &event)?;
        }
        output.finish()?;
        info!(nevents = self.params.nevents, "run complete");
        Ok(())
    }
}
