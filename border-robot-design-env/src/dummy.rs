//! This module is used for tests.
//!
//! [`ScriptedBackend`] stands in for the robot design library. Its
//! simulation replays a scripted sequence of state vectors and records the
//! joint targets it receives.
use crate::{
    backend::{Presimulation, Quaternion, RobotDesignBackend, Simulation, Vector3, Viewer},
    state::MIN_STATE_LEN,
    task::{Task, TaskKind},
};
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Orientation of a robot standing upright and facing forward, row-major.
pub const UPRIGHT: [f64; 9] = [-1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, -1.0];

/// Configuration of [`ScriptedBackend`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScriptedBackendConfig {
    /// Degrees of freedom of built robots; `None` gives one per rule.
    pub dof_count: Option<usize>,

    /// State vectors in tick order.
    ///
    /// The state after `n` ticks is `states[n % states.len()]`. If empty, the
    /// robot stands upright at rest at its initial position.
    pub states: Vec<Vec<f64>>,

    /// Initial position returned by presimulation.
    pub init_pos: Vector3,

    /// Self collision flag returned by presimulation.
    pub self_collision: bool,

    /// Put another body in front of a robot added back to the simulation,
    /// so that the robot does not get index 0.
    pub misplace_on_add: bool,

    /// Fail to create viewers.
    pub fail_viewer: bool,
}

/// A robot built by [`ScriptedBackend`].
#[derive(Clone, Debug, PartialEq)]
pub struct ScriptedRobot {
    /// Grammar file.
    pub grammar_file: PathBuf,

    /// Rule sequence.
    pub rule_sequence: Vec<usize>,

    /// Degrees of freedom.
    pub dof: usize,
}

/// Backend replaying scripted states.
pub struct ScriptedBackend {
    config: ScriptedBackendConfig,
}

impl RobotDesignBackend for ScriptedBackend {
    type Config = ScriptedBackendConfig;
    type Robot = ScriptedRobot;
    type Sim = ScriptedSim;
    type Viewer = ScriptedViewer;

    fn build(config: &Self::Config) -> Result<Self> {
        if config.states.iter().any(|s| s.len() < MIN_STATE_LEN) {
            bail!("scripted states must have at least {} elements", MIN_STATE_LEN);
        }
        Ok(Self {
            config: config.clone(),
        })
    }

    fn build_robot(&mut self, grammar_file: &Path, rule_sequence: &[usize]) -> Result<ScriptedRobot> {
        if rule_sequence.is_empty() {
            bail!("empty rule sequence");
        }
        Ok(ScriptedRobot {
            grammar_file: grammar_file.to_path_buf(),
            rule_sequence: rule_sequence.to_vec(),
            dof: self.config.dof_count.unwrap_or_else(|| rule_sequence.len()),
        })
    }

    fn presimulate(&mut self, _robot: &ScriptedRobot) -> Result<Presimulation> {
        Ok(Presimulation {
            init_pos: self.config.init_pos,
            has_self_collision: self.config.self_collision,
        })
    }

    fn make_sim(&mut self, task: &Task, robot: &ScriptedRobot, init_pos: Vector3) -> Result<ScriptedSim> {
        let mut sim = ScriptedSim {
            task: task.kind(),
            states: self.config.states.clone(),
            init_pos,
            misplace_on_add: false,
            bodies: vec![],
            placements: vec![],
            joint_targets: vec![],
            ticks: 0,
        };
        sim.add_robot(robot, init_pos, Quaternion::new(1.0, 0.0, 0.0, 0.0));
        sim.misplace_on_add = self.config.misplace_on_add;
        Ok(sim)
    }

    fn make_viewer(&mut self) -> Result<ScriptedViewer> {
        if self.config.fail_viewer {
            bail!("no display");
        }
        Ok(ScriptedViewer::default())
    }
}

/// Simulation replaying scripted states.
#[derive(Debug)]
pub struct ScriptedSim {
    task: TaskKind,
    states: Vec<Vec<f64>>,
    init_pos: Vector3,
    misplace_on_add: bool,
    // `None` is a body other than a robot.
    bodies: Vec<Option<ScriptedRobot>>,
    placements: Vec<(Vector3, Quaternion)>,
    joint_targets: Vec<(usize, Vec<f64>)>,
    ticks: usize,
}

impl ScriptedSim {
    /// Task the simulation was created for.
    pub fn task(&self) -> TaskKind {
        self.task
    }

    /// Number of ticks so far.
    pub fn ticks(&self) -> usize {
        self.ticks
    }

    /// Robot index and joint targets of every [`Simulation::set_joint_targets`] call.
    pub fn joint_targets(&self) -> &[(usize, Vec<f64>)] {
        &self.joint_targets
    }

    /// Position and orientation of every [`Simulation::add_robot`] call.
    pub fn placements(&self) -> &[(Vector3, Quaternion)] {
        &self.placements
    }

    fn rest_state(&self, dof: usize) -> Vec<f64> {
        let mut state = vec![0.0; MIN_STATE_LEN + 2 * dof];
        state[..9].copy_from_slice(&UPRIGHT);
        state[9..12].copy_from_slice(&self.init_pos);
        state
    }
}

impl Simulation for ScriptedSim {
    type Robot = ScriptedRobot;

    fn add_robot(&mut self, robot: &ScriptedRobot, pos: Vector3, rot: Quaternion) {
        if self.misplace_on_add {
            self.bodies.push(None);
        }
        self.bodies.push(Some(robot.clone()));
        self.placements.push((pos, rot));
    }

    fn remove_robot(&mut self, index: usize) {
        self.bodies.remove(index);
    }

    fn find_robot_index(&self, robot: &ScriptedRobot) -> Option<usize> {
        self.bodies
            .iter()
            .position(|body| body.as_ref() == Some(robot))
    }

    fn robot_dof_count(&self, index: usize) -> usize {
        self.bodies[index].as_ref().map_or(0, |robot| robot.dof)
    }

    fn set_joint_targets(&mut self, index: usize, targets: Vec<f64>) {
        self.joint_targets.push((index, targets));
    }

    fn step(&mut self) {
        self.ticks += 1;
    }

    fn robot_state(&self, index: usize) -> Vec<f64> {
        if self.states.is_empty() {
            self.rest_state(self.robot_dof_count(index))
        } else {
            self.states[self.ticks % self.states.len()].clone()
        }
    }
}

/// Viewer counting its renders.
#[derive(Clone, Debug, Default)]
pub struct ScriptedViewer {
    renders: Vec<usize>,
}

impl ScriptedViewer {
    /// Simulation tick of every render.
    pub fn renders(&self) -> &[usize] {
        &self.renders
    }
}

impl Viewer for ScriptedViewer {
    type Sim = ScriptedSim;

    fn render(&mut self, sim: &ScriptedSim) {
        self.renders.push(sim.ticks());
    }
}
