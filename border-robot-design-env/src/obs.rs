//! Observation of the locomotion environment.
use border_core::Obs;
use ndarray::Array1;

/// Robot state without two of the base position components.
///
/// See [`crate::state::BaseState::observation`].
#[derive(Clone, Debug, PartialEq)]
pub struct LocomotionObs(pub Array1<f64>);

impl Obs for LocomotionObs {
    fn len(&self) -> usize {
        self.0.len()
    }
}

impl From<Array1<f64>> for LocomotionObs {
    fn from(obs: Array1<f64>) -> Self {
        Self(obs)
    }
}

impl From<LocomotionObs> for Vec<f32> {
    fn from(obs: LocomotionObs) -> Self {
        obs.0.iter().map(|&v| v as f32).collect()
    }
}

impl From<LocomotionObs> for Array1<f64> {
    fn from(obs: LocomotionObs) -> Self {
        obs.0
    }
}
