#![warn(missing_docs)]
//! Environment contract for reinforcement learning.
//!
//! This crate defines the interface between an agent and an environment:
//! an [`Env`] is reset to produce an observation, then stepped with actions,
//! emitting a [`Step`] object (observation, reward, termination flag and
//! user-defined [`Info`]) together with a [`Record`] of diagnostics.
//! Action and observation domains are declared as [`BoxSpace`]s.
//!
//! [`Record`]: record::Record
pub mod error;
pub mod record;
pub mod util;

mod base;
pub use base::{Act, Env, Info, Obs, Policy, RandomPolicy, RenderMode, Step};

mod space;
pub use space::BoxSpace;

mod evaluator;
pub use evaluator::{DefaultEvaluator, Evaluator};
