//! Headless host for the shooter simulation.
//!
//! Loads a configuration, checks that every sprite asset exists, then runs
//! the tick loop with either a scripted input file or a simple autopilot and
//! prints a JSON run summary on exit.
//!
//! Environment:
//!
//! - `SHOOTER_CONFIG`: config JSON path (or pass it as the first argument)
//! - `SHOOTER_SEED`: spawner seed (default 1)
//! - `SHOOTER_MAX_TICKS`: tick limit (default 3600)
//! - `SHOOTER_ASSET_DIR`: if set, every profile asset must exist under it
//! - `SHOOTER_SCRIPT`: JSON array of tick inputs to replay instead of the autopilot
//! - `SHOOTER_UNPACED`: run as fast as possible instead of at `tick_rate_hz`
//! - `RUST_LOG`: log filter (default `info`)

mod autopilot;
mod presenter;

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use shooter_core::input::TickInput;
use shooter_core::runner::{run_loop, InputSource, Pacer, ScriptedInput, TickLimiter, Unpaced};
use shooter_core::{RunSummary, SimConfig, Simulation};

use crate::autopilot::Autopilot;
use crate::presenter::LogPresenter;

const DEFAULT_SEED: u64 = 1;
const DEFAULT_MAX_TICKS: u64 = 3600;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::filter::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = load_config(config_path().as_deref())?;
    if let Some(dir) = env::var_os("SHOOTER_ASSET_DIR") {
        check_assets(&config, Path::new(&dir))?;
    }

    let seed = read_env_u64("SHOOTER_SEED", DEFAULT_SEED);
    let max_ticks = read_env_u64("SHOOTER_MAX_TICKS", DEFAULT_MAX_TICKS);
    let unpaced = read_env_bool("SHOOTER_UNPACED", false);

    let mut sim = Simulation::new(config, seed).context("invalid simulation config")?;
    tracing::info!(
        seed,
        max_ticks,
        width = sim.config().width,
        height = sim.config().height,
        tick_ms = sim.config().tick_ms,
        "starting simulation"
    );

    let summary = match env::var_os("SHOOTER_SCRIPT") {
        Some(path) => {
            let mut input = load_script(Path::new(&path))?;
            run_paced(&mut sim, &mut input, unpaced, max_ticks)
        }
        None => {
            let mut input = Autopilot::new(&sim);
            run_paced(&mut sim, &mut input, unpaced, max_ticks)
        }
    };

    println!(
        "{}",
        serde_json::to_string_pretty(&summary).context("failed to encode run summary")?
    );
    Ok(())
}

fn run_paced(
    sim: &mut Simulation,
    input: &mut impl InputSource,
    unpaced: bool,
    max_ticks: u64,
) -> RunSummary {
    let mut presenter = LogPresenter::new();
    if unpaced {
        run(sim, input, &mut presenter, &mut Unpaced, max_ticks)
    } else {
        let mut limiter = TickLimiter::new(sim.config().tick_rate_hz);
        run(sim, input, &mut presenter, &mut limiter, max_ticks)
    }
}

fn run(
    sim: &mut Simulation,
    input: &mut impl InputSource,
    presenter: &mut LogPresenter,
    pacer: &mut impl Pacer,
    max_ticks: u64,
) -> RunSummary {
    let summary = run_loop(sim, input, presenter, pacer, max_ticks);
    tracing::info!(
        ticks = summary.ticks,
        score = summary.final_hud.score,
        resets = summary.resets,
        kills = summary.kills,
        frames = presenter.frames(),
        "simulation finished"
    );
    summary
}

// =============================================================================
// Startup
// =============================================================================

fn config_path() -> Option<PathBuf> {
    env::var_os("SHOOTER_CONFIG")
        .or_else(|| env::args_os().nth(1))
        .map(PathBuf::from)
}

fn load_config(path: Option<&Path>) -> Result<SimConfig> {
    let Some(path) = path else {
        tracing::info!("no config file given, using defaults");
        return Ok(SimConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config: SimConfig = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    tracing::info!(path = %path.display(), "loaded config");
    Ok(config)
}

fn check_assets(config: &SimConfig, dir: &Path) -> Result<()> {
    let missing: Vec<String> = config
        .profiles
        .iter()
        .map(|(_, profile)| dir.join(profile.asset.as_str()))
        .filter(|path| !path.is_file())
        .map(|path| path.display().to_string())
        .collect();
    if !missing.is_empty() {
        bail!("missing sprite assets: {}", missing.join(", "));
    }
    Ok(())
}

fn load_script(path: &Path) -> Result<ScriptedInput> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read input script {}", path.display()))?;
    let script: Vec<TickInput> = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse input script {}", path.display()))?;
    tracing::info!(path = %path.display(), ticks = script.len(), "replaying input script");
    Ok(ScriptedInput::new(script))
}

fn read_env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(default)
}

fn read_env_bool(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .map(|value| {
            matches!(
                value.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            )
        })
        .unwrap_or(default)
}
