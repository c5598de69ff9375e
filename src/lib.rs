//! Event-by-event sampling of nuclear collisions.
//!
//! For a pair of nuclei the [`Collider`] draws an area-weighted impact
//! parameter, places both nuclei about the collision axis, and repeats until
//! at least one nucleon pair interacts. The prepared nuclei are then handed
//! to an [`EventProfile`] and the result to an [`Output`] sink.
//!
//! ```no_run
//! use trento::{Collider, ParticipantProfile, RunConfig, TextOutput};
//!
//! # fn main() -> trento::error::Result<()> {
//! let mut config = RunConfig::new("Pb".parse()?, "Pb".parse()?);
//! config.number_events = 10;
//! config.random_seed = Some(42);
//! let mut collider = Collider::from_config(&config)?;
//! let mut out = TextOutput::new(std::io::stdout().lock(), config.ncoll, config.trials);
//! collider.run_events(&mut ParticipantProfile::new(), &mut out)?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod output;

#[cfg(feature = "python")]
mod python;

pub use crate::config::RunConfig;
pub use crate::core::{
    BlackDisk, Collider, Collision, CollisionSettings, EventProfile, EventResult, HardSphere,
    Nucleon, NucleonCommon, Nucleus, NucleusSpec, ParticipantProfile, Proton, RunParameters,
};
pub use crate::output::{EventRecord, NullOutput, Output, TextOutput};
