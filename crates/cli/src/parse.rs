//! ArgMatches → CliAction conversion, and loading of plan/seed/config files.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use clap::ArgMatches;
use redtxn_coordinator::CoordinatorConfig;
use redtxn_core::{Instruction, TransactionPlan, Value};

/// What the user asked for.
#[derive(Debug)]
pub enum CliAction {
    /// The canonical a/b/c scenario
    Demo { fail_compensation: bool },
    /// A user-supplied plan
    Run(RunOptions),
}

/// Everything `run` needs, already loaded and validated.
#[derive(Debug)]
pub struct RunOptions {
    pub plan: TransactionPlan,
    pub seed: BTreeMap<String, Value>,
    pub config: CoordinatorConfig,
    pub timeout: Option<Duration>,
    pub latency: Option<Duration>,
    pub fail_compensation: bool,
}

/// Convert clap ArgMatches into a CliAction.
pub fn matches_to_action(matches: &ArgMatches) -> Result<CliAction, String> {
    let (sub_name, m) = matches
        .subcommand()
        .ok_or_else(|| "No command provided".to_string())?;

    match sub_name {
        "demo" => Ok(CliAction::Demo {
            fail_compensation: m.get_flag("fail-compensation"),
        }),
        "run" => parse_run(m).map(CliAction::Run),
        other => Err(format!("Unknown command: {}", other)),
    }
}

fn parse_run(m: &ArgMatches) -> Result<RunOptions, String> {
    let plan_path = m
        .get_one::<String>("plan")
        .ok_or("--plan is required")?;
    let plan = load_plan(plan_path)?;

    let seed = match m.get_one::<String>("seed") {
        Some(path) => load_seed(path)?,
        None => BTreeMap::new(),
    };

    let config = match m.get_one::<String>("config") {
        Some(path) => CoordinatorConfig::from_file(path).map_err(|e| e.to_string())?,
        None => CoordinatorConfig::default(),
    };

    Ok(RunOptions {
        plan,
        seed,
        config,
        timeout: m.get_one::<u64>("timeout-ms").map(|ms| Duration::from_millis(*ms)),
        latency: m.get_one::<u64>("latency-ms").map(|ms| Duration::from_millis(*ms)),
        fail_compensation: m.get_flag("fail-compensation"),
    })
}

fn read(path: impl AsRef<Path>) -> Result<String, String> {
    let path = path.as_ref();
    std::fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", path.display(), e))
}

/// Load a plan from JSON. Instruction and length errors surface here,
/// before any store exists.
pub fn load_plan(path: impl AsRef<Path>) -> Result<TransactionPlan, String> {
    let path = path.as_ref();
    serde_json::from_str(&read(path)?)
        .map_err(|e| format!("Invalid plan {}: {}", path.display(), e))
}

/// Load initial store contents from a JSON object.
pub fn load_seed(path: impl AsRef<Path>) -> Result<BTreeMap<String, Value>, String> {
    let path = path.as_ref();
    let seed: BTreeMap<String, Value> = serde_json::from_str(&read(path)?)
        .map_err(|e| format!("Invalid seed {}: {}", path.display(), e))?;
    if let Some((key, _)) = seed.iter().find(|(_, v)| v.is_null()) {
        return Err(format!("Invalid seed {}: key '{}' is null", path.display(), key));
    }
    Ok(seed)
}

/// The scenario `redtxn demo` runs.
pub fn demo_plan() -> (TransactionPlan, BTreeMap<String, Value>) {
    let plan = TransactionPlan::builder()
        .step(Instruction::incr("a"), Instruction::decr("a"))
        .step(Instruction::incr("b"), Instruction::decr("b"))
        .step(Instruction::incr("c"), Instruction::decr("c"))
        .build();

    let seed = BTreeMap::from([
        ("a".to_string(), Value::Int(1)),
        ("b".to_string(), Value::from("123e")),
        ("c".to_string(), Value::Int(1)),
    ]);

    (plan, seed)
}
