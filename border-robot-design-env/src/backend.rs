//! Interface to the robot design library.
//!
//! Grammar-driven robot assembly, rigid-body simulation and collision
//! detection are provided by an external library. [`RobotDesignBackend`]
//! abstracts its entry points, [`Simulation`] a simulator instance and
//! [`Viewer`] an interactive renderer.
use crate::task::Task;
use anyhow::Result;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::path::Path;

/// A position in world frame.
pub type Vector3 = [f64; 3];

/// Rotation quaternion.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    /// Real part.
    pub w: f64,
    /// First imaginary part.
    pub x: f64,
    /// Second imaginary part.
    pub y: f64,
    /// Third imaginary part.
    pub z: f64,
}

impl Quaternion {
    /// Orientation a robot is given when it is placed back on reset.
    pub const RESET_ORIENTATION: Quaternion = Quaternion::new(0.0, 0.0, 1.0, 0.0);

    /// Creates a quaternion from its components.
    pub const fn new(w: f64, x: f64, y: f64, z: f64) -> Self {
        Self { w, x, y, z }
    }
}

/// Result of presimulating a robot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Presimulation {
    /// Stable initial position of the robot.
    pub init_pos: Vector3,

    /// `true` if the robot intersects itself.
    pub has_self_collision: bool,
}

/// A running simulation holding robots.
pub trait Simulation {
    /// Robot handle.
    type Robot;

    /// Places `robot` in the simulation.
    fn add_robot(&mut self, robot: &Self::Robot, pos: Vector3, rot: Quaternion);

    /// Removes the robot with the given index.
    fn remove_robot(&mut self, index: usize);

    /// Index of `robot` in the simulation, `None` if it is not there.
    fn find_robot_index(&self, robot: &Self::Robot) -> Option<usize>;

    /// Number of degrees of freedom of the robot with the given index.
    fn robot_dof_count(&self, index: usize) -> usize;

    /// Sets the joint targets of the robot with the given index.
    ///
    /// The simulation takes ownership of `targets`, the caller keeps no alias to them.
    fn set_joint_targets(&mut self, index: usize, targets: Vec<f64>);

    /// Advances the simulation by one tick.
    fn step(&mut self);

    /// State vector of the robot with the given index.
    ///
    /// See [`crate::state`] for the layout.
    fn robot_state(&self, index: usize) -> Vec<f64>;
}

/// Renders a simulation on screen.
pub trait Viewer {
    /// Simulation to be rendered.
    type Sim;

    /// Draws the current state of `sim`.
    fn render(&mut self, sim: &Self::Sim);
}

/// Entry points of the robot design library.
pub trait RobotDesignBackend {
    /// Configuration.
    type Config: Clone + Default + Serialize + DeserializeOwned;

    /// Robot handle.
    type Robot;

    /// Simulation.
    type Sim: Simulation<Robot = Self::Robot>;

    /// Viewer.
    type Viewer: Viewer<Sim = Self::Sim>;

    /// Builds the backend.
    fn build(config: &Self::Config) -> Result<Self>
    where
        Self: Sized;

    /// Assembles a robot by applying the rules of `rule_sequence` in the grammar.
    fn build_robot(&mut self, grammar_file: &Path, rule_sequence: &[usize]) -> Result<Self::Robot>;

    /// Finds a stable initial placement of `robot` and checks it for self collision.
    fn presimulate(&mut self, robot: &Self::Robot) -> Result<Presimulation>;

    /// Creates a simulation of `task` holding `robot` at `init_pos`.
    fn make_sim(&mut self, task: &Task, robot: &Self::Robot, init_pos: Vector3) -> Result<Self::Sim>;

    /// Creates a viewer.
    fn make_viewer(&mut self) -> Result<Self::Viewer>;
}
