//! Registry of locomotion tasks.
//!
//! A task decides the terrain the robot walks on and the timing of the
//! simulation. Tasks are resolved by name, e.g. `"FlatTerrainTask"`.
use crate::{state::BaseState, RobotDesignEnvError};
use ndarray::{arr1, Array1};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Supported tasks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskKind {
    /// Flat ground.
    FlatTerrainTask,

    /// Ground with ridges across the walking direction.
    RidgedTerrainTask,

    /// A wall to climb over.
    WallTerrainTask,

    /// Gaps in the ground to step across.
    GapTerrainTask,

    /// A step up.
    UpstepTerrainTask,

    /// A step down.
    DownstepTerrainTask,

    /// Hilly ground.
    HillTerrainTask,

    /// Flat ground with low friction.
    FrozenLakeTask,
}

impl TaskKind {
    /// All the tasks in the registry.
    pub const ALL: [TaskKind; 8] = [
        TaskKind::FlatTerrainTask,
        TaskKind::RidgedTerrainTask,
        TaskKind::WallTerrainTask,
        TaskKind::GapTerrainTask,
        TaskKind::UpstepTerrainTask,
        TaskKind::DownstepTerrainTask,
        TaskKind::HillTerrainTask,
        TaskKind::FrozenLakeTask,
    ];

    /// Name of the task in the registry.
    pub fn name(&self) -> &'static str {
        match self {
            TaskKind::FlatTerrainTask => "FlatTerrainTask",
            TaskKind::RidgedTerrainTask => "RidgedTerrainTask",
            TaskKind::WallTerrainTask => "WallTerrainTask",
            TaskKind::GapTerrainTask => "GapTerrainTask",
            TaskKind::UpstepTerrainTask => "UpstepTerrainTask",
            TaskKind::DownstepTerrainTask => "DownstepTerrainTask",
            TaskKind::HillTerrainTask => "HillTerrainTask",
            TaskKind::FrozenLakeTask => "FrozenLakeTask",
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TaskKind {
    type Err = RobotDesignEnvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaskKind::ALL
            .iter()
            .find(|kind| kind.name() == s)
            .copied()
            .ok_or_else(|| RobotDesignEnvError::UnknownTask(s.to_string()))
    }
}

/// Weighted sum of base alignment and base velocity.
///
/// The weights are dotted with the x axis of the base, the y axis of the base
/// and the linear base velocity respectively.
#[derive(Clone, Debug, PartialEq)]
pub struct DotProductObjective {
    /// Weight of the x axis of the base.
    pub base_dir_weight: Array1<f64>,

    /// Weight of the y axis of the base.
    pub base_up_weight: Array1<f64>,

    /// Weight of the linear velocity of the base.
    pub base_vel_weight: Array1<f64>,
}

impl Default for DotProductObjective {
    fn default() -> Self {
        Self {
            base_dir_weight: arr1(&[-1.0, 0.0, 0.0]),
            base_up_weight: arr1(&[0.0, 1.0, 0.0]),
            base_vel_weight: arr1(&[2.0, 0.0, 0.0]),
        }
    }
}

impl DotProductObjective {
    /// Evaluates the objective on a robot state vector.
    pub fn evaluate(&self, state: &[f64]) -> f64 {
        let state = BaseState::new(state);
        let lin_vel = arr1(state.linear_velocity());
        state.axis(0).dot(&self.base_dir_weight)
            + state.axis(1).dot(&self.base_up_weight)
            + lin_vel.dot(&self.base_vel_weight)
    }
}

/// A forward-speed locomotion task.
#[derive(Clone, Debug, PartialEq)]
pub struct Task {
    kind: TaskKind,

    /// Duration of a simulation tick in seconds.
    pub time_step: f64,

    /// Discount factor of returns.
    pub discount_factor: f64,

    /// Number of simulation ticks per control step.
    pub interval: usize,

    /// Planning horizon in control steps.
    pub horizon: usize,

    /// Episode length in control steps.
    pub episode_len: usize,

    /// Friction coefficient of the ground.
    pub friction: f64,
}

impl Task {
    /// Creates the task of the given kind with its default parameters.
    pub fn new(kind: TaskKind) -> Self {
        let friction = match kind {
            TaskKind::FrozenLakeTask => 0.05,
            _ => 0.9,
        };
        Self {
            kind,
            time_step: 1.0 / 240.0,
            discount_factor: 0.99,
            interval: 16,
            horizon: 128,
            episode_len: 128,
            friction,
        }
    }

    /// Resolves a task by its registry name.
    pub fn from_name(name: &str) -> Result<Self, RobotDesignEnvError> {
        Ok(Self::new(name.parse()?))
    }

    /// Kind of the task.
    pub fn kind(&self) -> TaskKind {
        self.kind
    }

    /// Registry name of the task.
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Objective function of the task.
    pub fn objective_fn(&self) -> DotProductObjective {
        DotProductObjective::default()
    }
}
