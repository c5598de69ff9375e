//! Collision sampling core: nucleons, nuclei, the interaction model, the
//! event profile and the collider that ties them together.

pub mod collider;
pub mod interaction;
pub mod nucleon;
pub mod nucleus;
pub mod profile;
pub mod random;

pub use collider::{Collider, Collision, CollisionSettings, RunParameters};
pub use interaction::{BlackDisk, NucleonCommon};
pub use nucleon::Nucleon;
pub use nucleus::{HardSphere, Nucleus, NucleusSpec, Proton};
pub use profile::{EventProfile, EventResult, ParticipantProfile};
