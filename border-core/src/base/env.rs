//! Environment.
use super::{Act, Info, Obs, Step};
use crate::{error::LrrError, record::Record, BoxSpace};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How an environment presents its state while stepping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// No rendering.
    Off,

    /// Draws the state in an interactive window at every step.
    Human,
}

impl Default for RenderMode {
    fn default() -> Self {
        Self::Off
    }
}

impl FromStr for RenderMode {
    type Err = LrrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "off" => Ok(Self::Off),
            "human" => Ok(Self::Human),
            _ => Err(LrrError::UnknownRenderMode(s.to_string())),
        }
    }
}

/// Represents an environment, typically an MDP.
pub trait Env {
    /// Configurations.
    type Config: Clone;

    /// Observation of the environment.
    type Obs: Obs;

    /// Action of the environment.
    type Act: Act;

    /// Information in the [self::Step] object.
    type Info: Info;

    /// Builds an environment with a given random seed.
    ///
    /// If `seed` is `None`, a seed is drawn from the OS entropy source.
    fn build(config: &Self::Config, seed: Option<u64>) -> Result<Self>
    where
        Self: Sized;

    /// Re-seeds the random number generator of the environment.
    ///
    /// Returns the seed actually used, in a single-element vector.
    fn seed(&mut self, seed: Option<u64>) -> Vec<u64>;

    /// Resets the environment and returns the initial observation.
    fn reset(&mut self) -> Result<Self::Obs>;

    /// Performes an environment step.
    fn step(&mut self, a: &Self::Act) -> (Step<Self>, Record)
    where
        Self: Sized;

    /// Performes an environment step and reset the environment if an episode ends.
    ///
    /// The observation after the reset is stored in [`Step::init_obs`].
    fn step_with_reset(&mut self, a: &Self::Act) -> Result<(Step<Self>, Record)>
    where
        Self: Sized,
    {
        let (mut step, record) = self.step(a);
        if step.is_done {
            step.init_obs = Some(self.reset()?);
        }
        Ok((step, record))
    }

    /// Resets the environment with a given index.
    ///
    /// The index is used as the random seed, which is useful for reproducible
    /// evaluation of a trained agent.
    fn reset_with_index(&mut self, ix: usize) -> Result<Self::Obs> {
        self.seed(Some(ix as u64));
        self.reset()
    }

    /// The domain of valid actions.
    fn action_space(&self) -> &BoxSpace;

    /// The domain of observations.
    fn observation_space(&self) -> &BoxSpace;

    /// Sets the render mode, taking effect from the next step.
    fn render(&mut self, mode: RenderMode);
}

#[cfg(test)]
mod tests {
    use super::RenderMode;

    #[test]
    fn test_render_mode_from_str() {
        assert_eq!("human".parse::<RenderMode>().unwrap(), RenderMode::Human);
        assert_eq!("off".parse::<RenderMode>().unwrap(), RenderMode::Off);
        assert!("rgb_array".parse::<RenderMode>().is_err());
        assert_eq!(RenderMode::default(), RenderMode::Off);
    }
}
