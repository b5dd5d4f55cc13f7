//! Locomotion environment of a robot built from a design grammar.
use crate::{
    backend::{Quaternion, RobotDesignBackend, Simulation, Vector3, Viewer},
    config::resolve_grammar_file,
    state::BaseState,
    task::{DotProductObjective, Task},
    LocomotionAct, LocomotionEnvConfig, LocomotionObs, RobotDesignEnvError,
};
use anyhow::Result;
use border_core::{
    record::{Record, RecordValue},
    util::np_random,
    Act, BoxSpace, Env, Info, RenderMode, Step,
};
use log::{debug, error, info, trace, warn};
use ndarray::Array1;
use rand::rngs::StdRng;
use std::path::{Path, PathBuf};

/// Information given at every step of the interaction with the environment.
///
/// Currently, it is empty and used to match the type signature.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LocomotionInfo {}

impl Info for LocomotionInfo {}

/// Everything derived from a robot design and a task.
struct Instance<B: RobotDesignBackend> {
    robot: B::Robot,
    robot_init_pos: Vector3,
    sim: B::Sim,
    robot_index: usize,
    objective_fn: DotProductObjective,
    frame_skip: usize,
    action_dim: usize,
    action_space: BoxSpace,
    observation_space: BoxSpace,
}

impl<B: RobotDesignBackend> Instance<B> {
    fn build(
        backend: &mut B,
        task: &Task,
        grammar_file: &Path,
        rule_sequence: &[usize],
    ) -> Result<Self> {
        let robot = backend.build_robot(grammar_file, rule_sequence)?;

        let presim = backend.presimulate(&robot)?;
        if presim.has_self_collision {
            error!("robot design has self collision");
        }

        let sim = backend.make_sim(task, &robot, presim.init_pos)?;
        let robot_index = sim
            .find_robot_index(&robot)
            .ok_or(RobotDesignEnvError::RobotNotFound)?;

        let action_dim = sim.robot_dof_count(robot_index);
        let action_space = BoxSpace::bounded(action_dim, -1.0, 1.0);
        let obs_dim = BaseState::new(&sim.robot_state(robot_index))
            .observation()
            .len();
        let observation_space = BoxSpace::unbounded(obs_dim);

        Ok(Self {
            robot,
            robot_init_pos: presim.init_pos,
            sim,
            robot_index,
            objective_fn: task.objective_fn(),
            frame_skip: task.interval,
            action_dim,
            action_space,
            observation_space,
        })
    }
}

/// Locomotion environment.
///
/// A robot is assembled from a grammar file and a rule sequence, placed in
/// the simulation of a [`Task`], and driven with joint targets. The episode
/// terminates when the robot tips over; there is no timeout.
///
/// The reward of a step is the sum of the per-tick rewards over
/// `frame_skip` simulation ticks, see [`BaseState::reward`].
pub struct LocomotionEnv<B: RobotDesignBackend> {
    backend: B,
    task: Task,
    grammar_file: PathBuf,
    rule_sequence: Vec<usize>,
    robot: B::Robot,
    robot_init_pos: Vector3,
    sim: B::Sim,
    robot_index: usize,
    objective_fn: DotProductObjective,
    frame_skip: usize,
    action_dim: usize,
    action_space: BoxSpace,
    observation_space: BoxSpace,
    last_u: Array1<f64>,
    render_mode: RenderMode,
    viewer: Option<B::Viewer>,
    np_random: StdRng,
}

impl<B: RobotDesignBackend> LocomotionEnv<B> {
    /// Builds the environment.
    ///
    /// Fails if `task_name` is not a registered task or the backend cannot
    /// build or simulate the robot. A design with self collision is only
    /// reported in the log.
    pub fn new(
        mut backend: B,
        task_name: &str,
        grammar_file: impl AsRef<Path>,
        rule_sequence: &[usize],
        seed: Option<u64>,
    ) -> Result<Self> {
        let task = Task::from_name(task_name)?;
        let grammar_file = grammar_file.as_ref().to_path_buf();
        let instance = Instance::build(&mut backend, &task, &grammar_file, rule_sequence)?;
        let (np_random, _) = np_random(seed);

        info!(
            "Build LocomotionEnv: task = {}, grammar = {:?}, dof = {}, obs dim = {}",
            task.name(),
            grammar_file,
            instance.action_dim,
            instance.observation_space.dim()
        );

        Ok(Self {
            backend,
            task,
            grammar_file,
            rule_sequence: rule_sequence.to_vec(),
            robot: instance.robot,
            robot_init_pos: instance.robot_init_pos,
            sim: instance.sim,
            robot_index: instance.robot_index,
            objective_fn: instance.objective_fn,
            frame_skip: instance.frame_skip,
            action_dim: instance.action_dim,
            action_space: instance.action_space,
            observation_space: instance.observation_space,
            last_u: Array1::zeros(instance.action_dim),
            render_mode: RenderMode::Off,
            viewer: None,
            np_random,
        })
    }

    /// Overrides the number of simulation ticks per step.
    pub fn set_frame_skip(&mut self, frame_skip: usize) {
        self.frame_skip = frame_skip;
    }

    /// Replaces the task.
    ///
    /// The robot, the simulation, the frame skip and the spaces are kept;
    /// call [`LocomotionEnv::set_robot`] afterwards to rebuild them for the new task.
    pub fn set_task(&mut self, task_name: &str) -> Result<()> {
        self.task = Task::from_name(task_name)?;
        debug!("Set task {}", self.task.name());
        Ok(())
    }

    /// Rebuilds the robot and everything derived from it with the current task.
    ///
    /// On failure the environment is left unchanged.
    pub fn set_robot(&mut self, grammar_file: impl AsRef<Path>, rule_sequence: &[usize]) -> Result<()> {
        let grammar_file = grammar_file.as_ref().to_path_buf();
        let instance =
            Instance::build(&mut self.backend, &self.task, &grammar_file, rule_sequence)?;
        debug!(
            "Set robot: grammar = {:?}, rule sequence = {:?}, dof = {}",
            grammar_file, rule_sequence, instance.action_dim
        );

        self.grammar_file = grammar_file;
        self.rule_sequence = rule_sequence.to_vec();
        self.robot = instance.robot;
        self.robot_init_pos = instance.robot_init_pos;
        self.sim = instance.sim;
        self.robot_index = instance.robot_index;
        self.objective_fn = instance.objective_fn;
        self.frame_skip = instance.frame_skip;
        self.action_dim = instance.action_dim;
        self.action_space = instance.action_space;
        self.observation_space = instance.observation_space;
        Ok(())
    }

    /// Current observation of the robot.
    pub fn get_obs(&self) -> LocomotionObs {
        let state = self.sim.robot_state(self.robot_index);
        LocomotionObs(BaseState::new(&state).observation())
    }

    /// Reward for the current state given the last applied action.
    pub fn compute_reward(&self) -> f64 {
        let state = self.sim.robot_state(self.robot_index);
        BaseState::new(&state).reward(self.last_u.view())
    }

    /// `true` if the robot has tipped over.
    pub fn detect_crash(&self) -> bool {
        let state = self.sim.robot_state(self.robot_index);
        BaseState::new(&state).is_crashed()
    }

    fn render_frame(&mut self) {
        if self.render_mode != RenderMode::Human {
            return;
        }
        if self.viewer.is_none() {
            match self.backend.make_viewer() {
                Ok(viewer) => self.viewer = Some(viewer),
                Err(e) => {
                    warn!("Failed to create a viewer, rendering is turned off: {}", e);
                    self.render_mode = RenderMode::Off;
                    return;
                }
            }
        }
        if let Some(viewer) = self.viewer.as_mut() {
            viewer.render(&self.sim);
        }
    }

    /// The current task.
    pub fn task(&self) -> &Task {
        &self.task
    }

    /// Number of simulation ticks per step.
    pub fn frame_skip(&self) -> usize {
        self.frame_skip
    }

    /// Number of degrees of freedom of the robot.
    pub fn action_dim(&self) -> usize {
        self.action_dim
    }

    /// Declared range of joint angles, see [`crate::act::ACTION_RANGE`].
    pub fn action_range(&self) -> [f64; 2] {
        crate::act::ACTION_RANGE
    }

    /// Index of the robot in the simulation.
    pub fn robot_index(&self) -> usize {
        self.robot_index
    }

    /// Initial position of the robot found by presimulation.
    pub fn robot_init_pos(&self) -> Vector3 {
        self.robot_init_pos
    }

    /// Grammar file of the current robot.
    pub fn grammar_file(&self) -> &Path {
        &self.grammar_file
    }

    /// Rule sequence of the current robot.
    pub fn rule_sequence(&self) -> &[usize] {
        &self.rule_sequence
    }

    /// The last applied action, clipped to `[-1, 1]`.
    pub fn last_u(&self) -> &Array1<f64> {
        &self.last_u
    }

    /// Objective function of the task the robot was built with.
    pub fn objective_fn(&self) -> &DotProductObjective {
        &self.objective_fn
    }

    /// Current render mode.
    pub fn render_mode(&self) -> RenderMode {
        self.render_mode
    }

    /// The simulation.
    pub fn sim(&self) -> &B::Sim {
        &self.sim
    }

    /// The viewer, if one has been created.
    pub fn viewer(&self) -> Option<&B::Viewer> {
        self.viewer.as_ref()
    }

    /// Random number generator of the environment.
    pub fn np_random(&mut self) -> &mut StdRng {
        &mut self.np_random
    }
}

impl<B: RobotDesignBackend> Env for LocomotionEnv<B> {
    type Config = LocomotionEnvConfig<B::Config>;
    type Obs = LocomotionObs;
    type Act = LocomotionAct;
    type Info = LocomotionInfo;

    fn build(config: &Self::Config, seed: Option<u64>) -> Result<Self> {
        let backend = B::build(&config.backend)?;
        let grammar_file = resolve_grammar_file(&config.grammar_file, config.data_dir.as_deref());
        let mut env = Self::new(backend, &config.task, grammar_file, &config.rule_sequence, seed)?;
        env.render(config.render_mode);
        Ok(env)
    }

    fn seed(&mut self, seed: Option<u64>) -> Vec<u64> {
        let (np_random, seed) = np_random(seed);
        self.np_random = np_random;
        vec![seed]
    }

    /// Places the robot back at its initial position.
    ///
    /// Panics if the robot does not come back with index 0.
    fn reset(&mut self) -> Result<LocomotionObs> {
        trace!("LocomotionEnv::reset()");

        self.sim.remove_robot(self.robot_index);
        self.sim
            .add_robot(&self.robot, self.robot_init_pos, Quaternion::RESET_ORIENTATION);
        let robot_index = self.sim.find_robot_index(&self.robot);
        assert_eq!(robot_index, Some(0), "robot index must be 0 after reset");
        self.robot_index = 0;

        Ok(self.get_obs())
    }

    /// Runs `frame_skip` simulation ticks with the joint targets of `a`.
    ///
    /// Panics if the length of `a` differs from the number of degrees of freedom.
    fn step(&mut self, a: &LocomotionAct) -> (Step<Self>, Record) {
        trace!("LocomotionEnv::step()");
        assert_eq!(a.len(), self.action_dim, "action length must match the robot dof");

        self.last_u = a.clipped();
        let targets = a.joint_targets();

        let mut reward = 0.0;
        for _ in 0..self.frame_skip {
            self.sim.set_joint_targets(self.robot_index, targets.to_vec());
            self.sim.step();
            reward += self.compute_reward();
        }

        let obs = self.get_obs();
        let is_done = self.detect_crash();
        self.render_frame();

        let record = Record::from_slice(&[
            ("reward", RecordValue::Scalar(reward as f32)),
            (
                "joint_targets",
                RecordValue::Array1(targets.iter().map(|&v| v as f32).collect()),
            ),
        ]);
        (
            Step::new(obs, a.clone(), reward, is_done, LocomotionInfo {}, None),
            record,
        )
    }

    fn action_space(&self) -> &BoxSpace {
        &self.action_space
    }

    fn observation_space(&self) -> &BoxSpace {
        &self.observation_space
    }

    fn render(&mut self, mode: RenderMode) {
        self.render_mode = mode;
    }
}
