use anyhow::Result;
use border_core::{BoxSpace, DefaultEvaluator, Evaluator as _, RandomPolicy};
use border_robot_design_env::{
    dummy::{ScriptedBackend, ScriptedBackendConfig},
    LocomotionEnv, LocomotionEnvConfig,
};

type Env = LocomotionEnv<ScriptedBackend>;
type Evaluator = DefaultEvaluator<Env>;

fn env_config() -> LocomotionEnvConfig<ScriptedBackendConfig> {
    LocomotionEnvConfig::default()
        .task("FlatTerrainTask")
        .backend(ScriptedBackendConfig {
            dof_count: Some(12),
            init_pos: [0.0, 0.5, 0.0],
            ..Default::default()
        })
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let env_config = env_config();
    let mut evaluator = Evaluator::new(&env_config, 42, 5)?.max_steps(Some(128));
    let mut policy = RandomPolicy::new(BoxSpace::bounded(12, -1.0, 1.0), Some(42));
    let record = evaluator.evaluate(&mut policy)?;
    println!("Average return = {}", record.get_scalar("Episode return")?);

    Ok(())
}

#[test]
fn test_random_locomotion() {
    let mut evaluator = Evaluator::new(&env_config(), 42, 2).unwrap().max_steps(Some(8));
    let mut policy = RandomPolicy::new(BoxSpace::bounded(12, -1.0, 1.0), Some(42));
    let _ = evaluator.evaluate(&mut policy).unwrap();
}
