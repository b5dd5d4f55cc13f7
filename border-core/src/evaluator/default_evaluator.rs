//! Default implementation of the [`Evaluator`] trait.
//!
//! This module provides a simple evaluator that runs a fixed number of episodes
//! and calculates the average return across all episodes.
use super::Evaluator;
use crate::{
    record::{Record, RecordValue},
    Env, Policy,
};
use anyhow::Result;
use log::info;

/// A default implementation of the [`Evaluator`] trait.
///
/// Each episode ends when the environment reports termination or, if given,
/// after `max_steps` steps. The cap is needed for environments without a
/// timeout of their own.
///
/// # Examples
///
/// ```ignore
/// let mut evaluator = DefaultEvaluator::<Env>::new(&config, 42, 10)?.max_steps(Some(128));
/// let mut policy = RandomPolicy::new(BoxSpace::bounded(dim, -1.0, 1.0), Some(0));
/// let record = evaluator.evaluate(&mut policy)?;
/// println!("Average return: {}", record.get_scalar("Episode return")?);
/// ```
pub struct DefaultEvaluator<E: Env> {
    /// The number of episodes to run during evaluation.
    n_episodes: usize,

    /// The maximum number of steps in an episode.
    max_steps: Option<usize>,

    /// The environment instance used for evaluation.
    env: E,
}

impl<E: Env> Evaluator<E> for DefaultEvaluator<E> {
    /// Runs the episodes and returns the average return and episode length.
    ///
    /// Episode `ix` is started with [`Env::reset_with_index`], so evaluations
    /// are reproducible.
    fn evaluate<P>(&mut self, policy: &mut P) -> Result<Record>
    where
        P: Policy<E>,
    {
        let mut r_total = 0f64;
        let mut len_total = 0usize;

        for ix in 0..self.n_episodes {
            let mut prev_obs = self.env.reset_with_index(ix)?;
            let mut r_episode = 0f64;
            let mut len_episode = 0usize;

            loop {
                let act = policy.sample(&prev_obs);
                let (step, _) = self.env.step(&act);
                r_episode += step.reward;
                len_episode += 1;
                if step.is_done() || self.max_steps.map_or(false, |n| len_episode >= n) {
                    break;
                }
                prev_obs = step.obs;
            }

            info!(
                "Episode {}: return = {}, length = {}",
                ix, r_episode, len_episode
            );
            r_total += r_episode;
            len_total += len_episode;
        }

        let n = self.n_episodes.max(1) as f64;
        Ok(Record::from_slice(&[
            ("Episode return", RecordValue::Scalar((r_total / n) as f32)),
            ("Episode length", RecordValue::Scalar((len_total as f64 / n) as f32)),
        ]))
    }
}

impl<E: Env> DefaultEvaluator<E> {
    /// Constructs a new [`DefaultEvaluator`].
    ///
    /// * `config` - Configuration for the environment
    /// * `seed` - Random seed for environment initialization
    /// * `n_episodes` - Number of episodes to run during evaluation
    pub fn new(config: &E::Config, seed: u64, n_episodes: usize) -> Result<Self> {
        Ok(Self {
            n_episodes,
            max_steps: None,
            env: E::build(config, Some(seed))?,
        })
    }

    /// Sets the maximum number of steps in an episode.
    pub fn max_steps(mut self, v: Option<usize>) -> Self {
        self.max_steps = v;
        self
    }

    /// The environment used for evaluation.
    pub fn env(&self) -> &E {
        &self.env
    }
}
