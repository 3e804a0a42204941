//! Boss encounter core: phases, attack patterns, pattern selection and the
//! combat orchestrator that ties them together, with Bevy plugins for
//! loading content and running encounters.

pub mod combat;
pub mod content;
pub mod patterns;
pub mod phase;

#[cfg(feature = "dev-tools")]
pub mod debug;
