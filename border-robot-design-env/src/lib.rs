//! Locomotion environment for robots assembled from a design grammar.
//!
//! [`LocomotionEnv`] builds a robot from a grammar file and a sequence of
//! grammar rules, places it in the simulation of a [`Task`], and exposes the
//! [`Env`](border_core::Env) interface: `reset` returns an observation,
//! `step` applies joint targets over several simulation ticks and returns the
//! observation, the accumulated reward and whether the robot has tipped over.
//!
//! Robot assembly, physics and collision detection are delegated to a
//! [`RobotDesignBackend`]. The [`dummy`] module has a scripted backend for tests.
//!
//! ## Observation
//!
//! The simulator reports a state vector per robot (see [`state`]). The
//! observation is that vector without two of the three base position
//! components, so its length is `state.len() - 2`.
//!
//! ## Action
//!
//! An action has one element per degree of freedom. It is clipped to
//! `[-1, 1]` and scaled by `pi / 2` to joint targets.
//!
//! ```ignore
//! let config = LocomotionEnvConfig::<MyBackendConfig>::default()
//!     .task("FlatTerrainTask")
//!     .rule_sequence_str("0,7,1,13,1,2,16,12,13,6,4,19,4,17,5,3,2,16,4,5,18,9,8,9,9,8")?;
//! let mut env = LocomotionEnv::<MyBackend>::build(&config, Some(42))?;
//! let obs = env.reset()?;
//! ```
pub mod act;
pub mod backend;
pub mod config;
pub mod dummy;
mod env;
mod error;
pub mod obs;
pub mod state;
pub mod task;
pub use act::LocomotionAct;
pub use backend::{Presimulation, Quaternion, RobotDesignBackend, Simulation, Viewer};
pub use config::{parse_rule_sequence, LocomotionEnvConfig};
pub use env::{LocomotionEnv, LocomotionInfo};
pub use error::RobotDesignEnvError;
pub use obs::LocomotionObs;
pub use task::{Task, TaskKind};
