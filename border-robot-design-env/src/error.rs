//! Errors of the locomotion environment.
use thiserror::Error;

/// Errors of the locomotion environment.
#[derive(Error, Debug)]
pub enum RobotDesignEnvError {
    /// The task name is not in the task registry.
    #[error("Unknown task: {0}")]
    UnknownTask(String),

    /// A rule sequence could not be parsed.
    #[error("Invalid rule sequence: {0}")]
    InvalidRuleSequence(String),

    /// The simulator does not hold the robot that was added to it.
    #[error("Robot not found in the simulation")]
    RobotNotFound,
}
