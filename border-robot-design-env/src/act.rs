//! Action of the locomotion environment.
use border_core::Act;
use ndarray::Array1;
use std::f64::consts::{FRAC_PI_2, PI};

/// Range of joint angles declared by the environment.
///
/// Actions are scaled by [`JOINT_TARGET_SCALE`], so the applied targets only
/// cover half of this range.
pub const ACTION_RANGE: [f64; 2] = [-PI, PI];

/// Factor from a clipped action to joint targets.
pub const JOINT_TARGET_SCALE: f64 = FRAC_PI_2;

/// Per-joint action, nominally in `[-1, 1]`.
#[derive(Clone, Debug, PartialEq)]
pub struct LocomotionAct(pub Array1<f64>);

impl LocomotionAct {
    /// Constructs an action.
    pub fn new(a: Array1<f64>) -> Self {
        Self(a)
    }

    /// The action clipped to `[-1, 1]` element-wise.
    pub fn clipped(&self) -> Array1<f64> {
        self.0.mapv(|v| v.clamp(-1.0, 1.0))
    }

    /// Joint targets applied to the simulator, `clip(u, -1, 1) * pi / 2`.
    pub fn joint_targets(&self) -> Array1<f64> {
        self.clipped() * JOINT_TARGET_SCALE
    }
}

impl Act for LocomotionAct {
    fn len(&self) -> usize {
        self.0.len()
    }
}

impl From<Vec<f32>> for LocomotionAct {
    fn from(v: Vec<f32>) -> Self {
        Self(v.into_iter().map(f64::from).collect())
    }
}

impl From<Vec<f64>> for LocomotionAct {
    fn from(v: Vec<f64>) -> Self {
        Self(Array1::from(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr1;

    #[test]
    fn test_joint_targets() {
        let act = LocomotionAct::new(arr1(&[-3.0, -0.5, 0.0, 0.25, 2.0]));
        assert_eq!(act.clipped(), arr1(&[-1.0, -0.5, 0.0, 0.25, 1.0]));

        let expected = [-FRAC_PI_2, -FRAC_PI_2 / 2.0, 0.0, FRAC_PI_2 / 4.0, FRAC_PI_2];
        for (t, e) in act.joint_targets().iter().zip(expected.iter()) {
            assert!((t - e).abs() < 1e-12);
        }
    }

    #[test]
    fn test_targets_within_half_of_declared_range() {
        let act = LocomotionAct::from(vec![100f32, -100.0]);
        assert!(act
            .joint_targets()
            .iter()
            .all(|t| t.abs() <= ACTION_RANGE[1] / 2.0 + 1e-12));
    }
}
