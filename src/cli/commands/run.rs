//! Timed session command.
//!
//! Resolves a tempo from notation, a preset, or a plan exercise, then
//! drives an engine on the tick timer until the target repetitions are
//! reached or the session is interrupted.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::cli::args::RunArgs;
use crate::cli::commands::presets;
use crate::config::{PlanLoader, parse_tick_interval};
use crate::driver::{DEFAULT_TICK_INTERVAL, TickDriver};
use crate::error::TempoCueError;
use crate::observability::EventEmitter;
use crate::tempo::{TempoEngine, TempoPhase, TempoSpec};

/// Terminal bell.
const BELL: &[u8] = b"\x07";

/// Plan file used when no tempo, preset or `--plan` is given.
pub const PLAN_ENV: &str = "TEMPOCUE_PLAN";

/// Tempo and defaults resolved from the command-line source.
#[derive(Debug)]
struct SessionSource {
    spec: TempoSpec,
    label: String,
    reps: Option<u32>,
    interval: Option<Duration>,
}

/// Run a timed session.
///
/// # Errors
///
/// Returns a parse error for invalid notation, a usage error for an unknown
/// preset or exercise, a config error for an invalid plan or interval, and
/// an I/O error if the events file or metrics listener cannot be opened.
pub async fn run(
    args: &RunArgs,
    quiet: bool,
    cancel: CancellationToken,
) -> Result<(), TempoCueError> {
    let source = resolve_source(args, std::env::var_os(PLAN_ENV).map(PathBuf::from))?;

    let interval = match &args.interval {
        Some(raw) => parse_tick_interval(raw)?,
        None => source.interval.unwrap_or(DEFAULT_TICK_INTERVAL),
    };
    let target = args.reps.or(source.reps);

    if let Some(port) = args.metrics_port {
        crate::observability::init_metrics(Some(port))?;
        tracing::info!(port, "Prometheus metrics endpoint started");
    }

    let emitter = match &args.events_file {
        Some(path) if path.as_os_str() == "-" => EventEmitter::stderr(),
        Some(path) => EventEmitter::from_file(path)?,
        None => EventEmitter::noop(),
    };

    let mut engine = TempoEngine::new(source.spec);
    if args.bell {
        engine.set_observer(ring_bell);
    }

    let mut driver = TickDriver::new(interval, source.label.clone())
        .with_target_repetitions(target)
        .with_emitter(emitter);
    if !quiet && !args.no_cues {
        driver = driver.with_cue_writer(Box::new(std::io::stdout()));
    }

    tracing::debug!(
        label = %source.label,
        interval = %humantime::format_duration(interval),
        "starting session"
    );
    let summary = driver.run(&mut engine, cancel).await;

    if !quiet {
        eprintln!(
            "{}: {} reps completed in {} ticks ({})",
            source.label, summary.completed_repetitions, summary.ticks, summary.reason
        );
    }

    Ok(())
}

/// Picks the tempo from notation, `--preset`, or a plan.
///
/// `env_plan` is only consulted when none of the three was given.
fn resolve_source(
    args: &RunArgs,
    env_plan: Option<PathBuf>,
) -> Result<SessionSource, TempoCueError> {
    if let Some(notation) = &args.tempo {
        let spec = TempoSpec::parse(notation)?;
        return Ok(SessionSource {
            spec,
            label: spec.to_string(),
            reps: None,
            interval: None,
        });
    }

    if let Some(name) = &args.preset {
        let preset = presets::resolve(name)?;
        return Ok(SessionSource {
            spec: preset.spec()?,
            label: preset.name.to_string(),
            reps: None,
            interval: None,
        });
    }

    match (args.plan.clone().or(env_plan), &args.exercise) {
        (Some(path), Some(exercise)) => resolve_exercise(&path, exercise),
        (Some(_), None) => Err(TempoCueError::Usage(format!(
            "--plan (or {PLAN_ENV}) requires --exercise"
        ))),
        (None, Some(_)) => Err(TempoCueError::Usage(format!(
            "--exercise requires --plan or {PLAN_ENV}"
        ))),
        (None, None) => Err(TempoCueError::Usage(
            "a tempo, --preset, or --plan is required".to_string(),
        )),
    }
}

fn resolve_exercise(path: &Path, name: &str) -> Result<SessionSource, TempoCueError> {
    tracing::info!(plan = %path.display(), "loading plan");
    let loaded = PlanLoader::default().load(path)?;

    for warning in &loaded.warnings {
        tracing::warn!(
            location = warning.location.as_deref().unwrap_or("<unknown>"),
            "{}",
            warning.message
        );
    }

    let plan = loaded.plan;
    let Some(exercise) = plan.find_exercise(name) else {
        let hint = plan
            .suggest_exercise(name)
            .map(|s| format!("; did you mean '{s}'?"))
            .unwrap_or_default();
        return Err(TempoCueError::Usage(format!(
            "no exercise '{name}' in plan '{}'{hint}",
            plan.plan.name
        )));
    };

    Ok(SessionSource {
        spec: TempoSpec::parse(&exercise.tempo)?,
        label: exercise.name.clone(),
        reps: exercise.reps,
        interval: Some(plan.tick_interval()?),
    })
}

fn ring_bell(phase: TempoPhase) {
    tracing::trace!(%phase, "bell");
    let mut stderr = std::io::stderr();
    let _ = stderr.write_all(BELL).and_then(|()| stderr.flush());
}
