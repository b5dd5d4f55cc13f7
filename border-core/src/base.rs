//! Core functionalities.
mod env;
mod policy;
mod step;
pub use env::{Env, RenderMode};
pub use policy::{Policy, RandomPolicy};
use std::fmt::Debug;
pub use step::{Info, Step};

/// An observation of an environment.
///
/// Vectorized environments are not supported, so an object of this trait
/// holds a single observation.
pub trait Obs: Clone + Debug {
    /// Returns the number of elements of the observation.
    fn len(&self) -> usize;

    /// Returns `true` if the observation has no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An action of an environment.
pub trait Act: Clone + Debug {
    /// Returns the number of elements of the action.
    fn len(&self) -> usize;

    /// Returns `true` if the action has no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
