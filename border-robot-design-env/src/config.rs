//! Configuration of [`LocomotionEnv`](crate::LocomotionEnv).
use crate::RobotDesignEnvError;
use anyhow::Result;
use border_core::RenderMode;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::{Path, PathBuf},
};

/// Environment variable pointing to the directory of grammar files.
pub const DATA_DIR_ENV: &str = "ROBOT_DESIGN_DATA_DIR";

const DEFAULT_TASK: &str = "FlatTerrainTask";
const DEFAULT_GRAMMAR_FILE: &str = "grammar_apr30.dot";
const DEFAULT_RULE_SEQUENCE: [usize; 26] = [
    0, 7, 1, 13, 1, 2, 16, 12, 13, 6, 4, 19, 4, 17, 5, 3, 2, 16, 4, 5, 18, 9, 8, 9, 9, 8,
];

/// Parses a comma-separated rule sequence such as `"0,7,1,13"`.
///
/// A blank string is the empty sequence.
pub fn parse_rule_sequence(s: &str) -> Result<Vec<usize>, RobotDesignEnvError> {
    if s.trim().is_empty() {
        return Ok(vec![]);
    }
    s.split(',')
        .map(|r| {
            r.trim()
                .parse::<usize>()
                .map_err(|_| RobotDesignEnvError::InvalidRuleSequence(s.to_string()))
        })
        .collect()
}

/// Configuration of [`LocomotionEnv`](crate::LocomotionEnv).
///
/// `C` is the configuration of the [`RobotDesignBackend`](crate::RobotDesignBackend).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LocomotionEnvConfig<C> {
    /// Name of the task, e.g. `FlatTerrainTask`.
    pub task: String,

    /// Grammar file the robot is derived from.
    pub grammar_file: PathBuf,

    /// Indices of the grammar rules applied to build the robot.
    pub rule_sequence: Vec<usize>,

    /// Directory relative grammar paths are resolved against.
    pub data_dir: Option<PathBuf>,

    /// Render mode of the environment right after it is built.
    pub render_mode: RenderMode,

    /// Configuration of the backend.
    pub backend: C,
}

impl<C: Default> Default for LocomotionEnvConfig<C> {
    fn default() -> Self {
        Self {
            task: DEFAULT_TASK.to_string(),
            grammar_file: PathBuf::from(DEFAULT_GRAMMAR_FILE),
            rule_sequence: DEFAULT_RULE_SEQUENCE.to_vec(),
            data_dir: None,
            render_mode: RenderMode::Off,
            backend: C::default(),
        }
    }
}

impl<C> LocomotionEnvConfig<C> {
    /// Sets the name of the task.
    pub fn task(mut self, task: impl Into<String>) -> Self {
        self.task = task.into();
        self
    }

    /// Sets the grammar file.
    pub fn grammar_file(mut self, grammar_file: impl Into<PathBuf>) -> Self {
        self.grammar_file = grammar_file.into();
        self
    }

    /// Sets the rule sequence.
    pub fn rule_sequence(mut self, rule_sequence: Vec<usize>) -> Self {
        self.rule_sequence = rule_sequence;
        self
    }

    /// Sets the rule sequence in comma-separated form.
    pub fn rule_sequence_str(mut self, rule_sequence: &str) -> Result<Self> {
        self.rule_sequence = parse_rule_sequence(rule_sequence)?;
        Ok(self)
    }

    /// Sets the directory of grammar files.
    pub fn data_dir(mut self, data_dir: Option<PathBuf>) -> Self {
        self.data_dir = data_dir;
        self
    }

    /// Sets the render mode.
    pub fn render_mode(mut self, render_mode: RenderMode) -> Self {
        self.render_mode = render_mode;
        self
    }

    /// Sets the configuration of the backend.
    pub fn backend(mut self, backend: C) -> Self {
        self.backend = backend;
        self
    }

    /// Path of the grammar file.
    ///
    /// A relative path is resolved against `data_dir`, or else against the
    /// directory in [`DATA_DIR_ENV`] if the variable is set.
    pub fn resolve_grammar_file(&self) -> PathBuf {
        resolve_grammar_file(&self.grammar_file, self.data_dir.as_deref())
    }
}

impl<C> LocomotionEnvConfig<C>
where
    C: Serialize + for<'de> Deserialize<'de>,
{
    /// Constructs [`LocomotionEnvConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let config = serde_yaml::from_reader(rdr)?;
        Ok(config)
    }

    /// Saves [`LocomotionEnvConfig`] as YAML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}

pub(crate) fn resolve_grammar_file(grammar_file: &Path, data_dir: Option<&Path>) -> PathBuf {
    if grammar_file.is_absolute() {
        return grammar_file.to_path_buf();
    }
    match data_dir {
        Some(dir) => dir.join(grammar_file),
        None => match std::env::var_os(DATA_DIR_ENV) {
            Some(dir) => PathBuf::from(dir).join(grammar_file),
            None => grammar_file.to_path_buf(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempdir::TempDir;

    #[test]
    fn test_parse_rule_sequence() {
        assert_eq!(parse_rule_sequence("0, 7,1,13").unwrap(), vec![0, 7, 1, 13]);
        assert_eq!(parse_rule_sequence("  ").unwrap(), Vec::<usize>::new());
        assert!(matches!(
            parse_rule_sequence("0,x,1"),
            Err(RobotDesignEnvError::InvalidRuleSequence(_))
        ));
        assert!(parse_rule_sequence("0,,1").is_err());
        assert!(parse_rule_sequence("-1").is_err());
    }

    #[test]
    fn test_default_config() {
        let config = LocomotionEnvConfig::<()>::default();
        assert_eq!(config.task, "FlatTerrainTask");
        assert_eq!(config.rule_sequence.len(), 26);
        assert_eq!(&config.rule_sequence[..4], &[0, 7, 1, 13]);
    }

    #[test]
    fn test_resolve_grammar_file_with_data_dir() {
        let config = LocomotionEnvConfig::<()>::default().data_dir(Some(PathBuf::from("/data")));
        assert_eq!(
            config.resolve_grammar_file(),
            PathBuf::from("/data/grammar_apr30.dot")
        );

        let config = config.grammar_file("/abs/grammar.dot");
        assert_eq!(config.resolve_grammar_file(), PathBuf::from("/abs/grammar.dot"));
    }

    #[test]
    fn test_serde_config() -> Result<()> {
        let config = LocomotionEnvConfig::<()>::default()
            .task("GapTerrainTask")
            .rule_sequence_str("0,1,2")?
            .render_mode(RenderMode::Human);

        let dir = TempDir::new("locomotion_env_config")?;
        let path = dir.path().join("env.yaml");
        config.save(&path)?;
        let config_ = LocomotionEnvConfig::<()>::load(&path)?;
        assert_eq!(config, config_);
        Ok(())
    }
}
