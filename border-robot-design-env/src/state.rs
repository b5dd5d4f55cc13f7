//! Layout of the robot state vector reported by the simulator.
//!
//! | indices  | content                                      |
//! |----------|----------------------------------------------|
//! | `0..9`   | base orientation, 3x3 matrix in row-major order |
//! | `9..12`  | base position                                |
//! | `12..18` | base velocity, angular then linear           |
//! | `18..`   | joint states                                 |
use ndarray::{arr1, Array1, ArrayView1};
use std::ops::Range;

/// Base orientation matrix, row-major.
pub const ORIENTATION: Range<usize> = 0..9;

/// Base position.
pub const POSITION: Range<usize> = 9..12;

/// Base velocity.
pub const BASE_VELOCITY: Range<usize> = 12..18;

/// Index of the velocity component rewarded as forward motion.
pub const FORWARD_VELOCITY: usize = 15;

/// Minimum length of a state vector.
pub const MIN_STATE_LEN: usize = 18;

/// Target directions of the x, y and z axes of the base.
pub const TARGET_AXES: [[f64; 3]; 3] = [[-1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, -1.0]];

/// Weight of each axis alignment term in the reward.
pub const ALIGNMENT_WEIGHT: f64 = 0.1;

/// Weight of the action magnitude penalty in the reward.
pub const ACTION_PENALTY_WEIGHT: f64 = 0.7;

/// Read-only view of one state vector.
#[derive(Clone, Copy, Debug)]
pub struct BaseState<'a> {
    state: &'a [f64],
}

impl<'a> BaseState<'a> {
    /// Panics if `state` is shorter than [`MIN_STATE_LEN`].
    pub fn new(state: &'a [f64]) -> Self {
        assert!(
            state.len() >= MIN_STATE_LEN,
            "robot state has {} elements, at least {} expected",
            state.len(),
            MIN_STATE_LEN
        );
        Self { state }
    }

    /// Column `j` of the base orientation matrix, i.e. the `j`-th body axis in world frame.
    pub fn axis(&self, j: usize) -> Array1<f64> {
        let r = &self.state[ORIENTATION];
        arr1(&[r[j], r[3 + j], r[6 + j]])
    }

    /// Dot products of the body axes with [`TARGET_AXES`].
    pub fn axis_alignments(&self) -> [f64; 3] {
        let mut alignments = [0.0; 3];
        for (j, target) in TARGET_AXES.iter().enumerate() {
            alignments[j] = self.axis(j).dot(&arr1(target));
        }
        alignments
    }

    /// Linear part of the base velocity.
    pub fn linear_velocity(&self) -> &'a [f64] {
        &self.state[FORWARD_VELOCITY..BASE_VELOCITY.end]
    }

    /// The observation derived from the state.
    ///
    /// Two of the three position components (indices 9 and 11) are dropped,
    /// everything else is kept in order.
    pub fn observation(&self) -> Array1<f64> {
        self.state[ORIENTATION]
            .iter()
            .chain(std::iter::once(&self.state[POSITION.start + 1]))
            .chain(self.state[BASE_VELOCITY.start..].iter())
            .copied()
            .collect()
    }

    /// Dense shaping reward for one simulation tick.
    ///
    /// Forward velocity plus alignment of the x and y axes, minus the mean
    /// squared action `last_u`. An empty `last_u` is not penalized.
    pub fn reward(&self, last_u: ArrayView1<f64>) -> f64 {
        let [align_x, align_y, _] = self.axis_alignments();
        let penalty = last_u.mapv(|u| u * u).mean().unwrap_or(0.0);
        self.state[FORWARD_VELOCITY] + ALIGNMENT_WEIGHT * align_x + ALIGNMENT_WEIGHT * align_y
            - ACTION_PENALTY_WEIGHT * penalty
    }

    /// `true` if any body axis is tilted more than 90 degrees from its target.
    pub fn is_crashed(&self) -> bool {
        self.axis_alignments().iter().any(|&a| a < 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::s;

    const UPRIGHT: [f64; 9] = [-1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, -1.0];

    fn state_with(orientation: [f64; 9], len: usize) -> Vec<f64> {
        let mut state = (0..len).map(|i| i as f64).collect::<Vec<_>>();
        state[ORIENTATION].copy_from_slice(&orientation);
        state
    }

    #[test]
    fn test_observation_drops_two_position_components() {
        let state = (0..24).map(|i| i as f64 * 10.0).collect::<Vec<_>>();
        let obs = BaseState::new(&state).observation();

        assert_eq!(obs.len(), 9 + 1 + (state.len() - 12));
        assert!(!obs.iter().any(|&v| v == 90.0 || v == 110.0));
        assert_eq!(obs[9], 100.0);
        assert_eq!(obs[10], 120.0);
        assert_eq!(obs[obs.len() - 1], 230.0);
    }

    #[test]
    fn test_axes_are_columns() {
        let state = state_with([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0], 18);
        let state = BaseState::new(&state);
        assert_eq!(state.axis(0).to_vec(), vec![1.0, 4.0, 7.0]);
        assert_eq!(state.axis(2).to_vec(), vec![3.0, 6.0, 9.0]);
    }

    #[test]
    fn test_upright_is_not_crashed() {
        let state = state_with(UPRIGHT, 18);
        assert_eq!(BaseState::new(&state).axis_alignments(), [1.0, 1.0, 1.0]);
        assert!(!BaseState::new(&state).is_crashed());
    }

    #[test]
    fn test_crash_on_any_negative_alignment() {
        // Flip one body axis at a time.
        for j in 0..3 {
            let mut orientation = UPRIGHT;
            for i in 0..3 {
                orientation[3 * i + j] = -orientation[3 * i + j];
            }
            let state = state_with(orientation, 18);
            assert!(BaseState::new(&state).is_crashed(), "axis {}", j);
        }
    }

    #[test]
    fn test_perpendicular_axis_is_not_crashed() {
        // Zero alignment is not negative.
        let state = state_with([0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, -1.0], 18);
        assert!(!BaseState::new(&state).is_crashed());
    }

    #[test]
    fn test_reward() {
        let mut state = state_with(UPRIGHT, 18);
        state[FORWARD_VELOCITY] = 0.5;
        let state = BaseState::new(&state);

        assert!((state.reward(arr1(&[0.0, 0.0]).view()) - 0.7).abs() < 1e-12);
        // mean(u^2) = (1 + 0) / 2
        assert!((state.reward(arr1(&[1.0, 0.0]).view()) - (0.7 - 0.35)).abs() < 1e-12);
        assert!((state.reward(Array1::<f64>::zeros(0).view()) - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_reward_penalizes_strided_action() {
        let mut state = state_with(UPRIGHT, 18);
        state[FORWARD_VELOCITY] = 0.5;
        let state = BaseState::new(&state);

        // Every other element, i.e. [1.0, 0.0], which is not contiguous in memory.
        let u = arr1(&[1.0, 9.0, 0.0, 9.0]);
        let u = u.slice(s![..;2]);
        assert!(u.as_slice().is_none());
        assert!((state.reward(u) - (0.7 - 0.35)).abs() < 1e-12);
    }

    #[test]
    #[should_panic]
    fn test_short_state() {
        let _ = BaseState::new(&[0.0; 17]);
    }
}
