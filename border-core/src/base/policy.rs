//! Policy.
use super::Env;
use crate::{util::np_random, BoxSpace};
use rand::rngs::StdRng;

/// A policy on an environment.
///
/// Policy is a mapping from an observation to an action.
/// The mapping can be either of deterministic or stochastic.
pub trait Policy<E: Env> {
    /// Sample an action given an observation.
    fn sample(&mut self, obs: &E::Obs) -> E::Act;
}

/// A policy ignoring observations and sampling actions from a [`BoxSpace`].
pub struct RandomPolicy {
    space: BoxSpace,
    rng: StdRng,
}

impl RandomPolicy {
    /// Constructs a random policy on the given action space.
    pub fn new(space: BoxSpace, seed: Option<u64>) -> Self {
        let (rng, _) = np_random(seed);
        Self { space, rng }
    }
}

impl<E> Policy<E> for RandomPolicy
where
    E: Env,
    E::Act: From<Vec<f32>>,
{
    fn sample(&mut self, _: &E::Obs) -> E::Act {
        self.space.sample(&mut self.rng).into()
    }
}
