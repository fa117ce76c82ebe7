//! Agent-facing environment for the Snake simulation
//!
//! Provides:
//! - 11-feature observations (danger, heading, food direction)
//! - Burn-compatible environment interface with index and one-hot actions
//! - Backend-agnostic tensor construction

pub mod backend;
pub mod environment;
pub mod observation;

pub use backend::{ObservationBackend, default_device};
pub use environment::SnakeEnvironment;
pub use observation::{OBSERVATION_SIZE, create_observation, observation_features};
