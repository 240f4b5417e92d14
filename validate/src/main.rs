//! Scenario validation CLI for the spot tracker
//!
//! Replays scripted host events through a simulated client and validates
//! tracker behavior:
//! - Instant mode (default): Fast CI validation with checkpoints
//! - Paced mode (--speed): Watch a scenario unfold at game speed

mod error;
mod output;
mod replay;
mod scenario;
mod verification;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use spotwatch_core::{SettingsExt, TrackerSettings};
use tracing_subscriber::EnvFilter;

use crate::output::{CliOutput, OutputLevel};
use crate::replay::{ScenarioRunner, TickClock};
use crate::scenario::Scenario;
use crate::verification::CheckpointVerifier;

// ═══════════════════════════════════════════════════════════════════════════════
// CLI Arguments
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Parser, Debug)]
#[command(name = "spotwatch-validate")]
#[command(about = "Validate fishing spot tracking against scripted scenarios")]
#[command(version)]
struct Args {
    /// Scenario files to replay
    #[arg(required = true)]
    scenarios: Vec<PathBuf>,

    /// Replay speed multiplier (0 = instant, 1 = realtime)
    #[arg(long, default_value_t = 0.0)]
    speed: f32,

    /// Settings file to use instead of each scenario's own settings
    #[arg(long)]
    settings: Option<PathBuf>,

    // ─────────────────────────────────────────────────────────────────────────
    // Output Mode
    // ─────────────────────────────────────────────────────────────────────────
    /// Quiet mode: summary and failures only
    #[arg(short, long)]
    quiet: bool,

    /// Verbose mode: show every scripted step and tracker debug logs
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    if args.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new("warn,spotwatch_core=debug"))
            .with_target(false)
            .init();
    }

    let level = if args.quiet {
        OutputLevel::Quiet
    } else if args.verbose {
        OutputLevel::Verbose
    } else {
        OutputLevel::Normal
    };

    let settings_override = match &args.settings {
        Some(path) => match TrackerSettings::load_from(path) {
            Ok(settings) => Some(settings),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
        },
        None => None,
    };

    let mut all_passed = true;
    for path in &args.scenarios {
        match run_scenario(path, level, args.speed, settings_override.as_ref()) {
            Ok(passed) => all_passed &= passed,
            Err(e) => {
                eprintln!("Error: {}: {}", path.display(), error_chain(&e));
                all_passed = false;
            }
        }
    }

    if all_passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Replay one scenario file. Returns whether every checkpoint passed.
fn run_scenario(
    path: &std::path::Path,
    level: OutputLevel,
    speed: f32,
    settings: Option<&TrackerSettings>,
) -> Result<bool, error::ScenarioError> {
    let mut scenario = Scenario::load(path)?;
    if let Some(settings) = settings {
        scenario.settings = settings.clone();
    }

    let mut output = CliOutput::new(level);
    output.scenario_start(&scenario.meta.name, scenario.meta.description.as_deref());

    let mut runner = ScenarioRunner::new(&scenario);
    let mut verifier = CheckpointVerifier::new(scenario.checkpoints.clone());
    let mut clock = if speed > 0.0 {
        TickClock::new(speed)
    } else {
        TickClock::instant()
    };
    runner.run(&scenario, &mut verifier, &mut clock, &mut output)?;

    let result = verifier.finalize();
    output.print_summary(
        scenario.end_tick(),
        (result.checkpoints_passed, result.checkpoints_total),
    );
    output.flush();
    Ok(result.passed())
}

/// Render an error with its sources, e.g. "failed to parse scenario x: expected ..."
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
