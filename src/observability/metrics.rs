//! Metrics collection for `tempocue`.
//!
//! Prometheus-compatible counters and gauges for timed sessions, with
//! typed helpers for each measurement.

use std::sync::atomic::{AtomicBool, Ordering};

use metrics::{counter, describe_counter, describe_gauge, gauge};
use metrics_exporter_prometheus::PrometheusBuilder;

use crate::error::TempoCueError;
use crate::tempo::TempoPhase;

/// Guard to prevent double-initialization of the metrics recorder.
static METRICS_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Maximum length for exercise name labels.
const MAX_LABEL_LEN: usize = 64;

/// Initializes the global metrics recorder.
///
/// When `port` is `Some`, a Prometheus HTTP listener is started on
/// `127.0.0.1:<port>`. When `None`, the recorder is installed without an
/// HTTP endpoint.
///
/// # Errors
///
/// Returns `TempoCueError::Io` if the recorder or HTTP listener cannot be
/// installed (e.g. port already in use).
pub fn init_metrics(port: Option<u16>) -> Result<(), TempoCueError> {
    if METRICS_INITIALIZED.swap(true, Ordering::SeqCst) {
        tracing::debug!("metrics already initialized, skipping");
        return Ok(());
    }
    port.map_or_else(
        || PrometheusBuilder::new().install_recorder().map(|_| ()),
        |p| {
            PrometheusBuilder::new()
                .with_http_listener(([127, 0, 0, 1], p))
                .install()
        },
    )
    .map_err(|e| TempoCueError::Io(std::io::Error::other(e.to_string())))?;

    describe_metrics();
    Ok(())
}

/// Registers metric descriptions with the global recorder.
fn describe_metrics() {
    describe_counter!("tempocue_ticks_total", "Ticks delivered to the tempo engine");
    describe_counter!(
        "tempocue_phase_transitions_total",
        "Total number of tempo phase transitions"
    );
    describe_counter!(
        "tempocue_repetitions_total",
        "Repetitions completed, by exercise"
    );
    describe_gauge!("tempocue_current_phase", "Currently active phase (1 = active)");
}

/// Records one engine tick.
pub fn record_tick() {
    counter!("tempocue_ticks_total").increment(1);
}

/// Records a phase transition.
pub fn record_phase_transition(from: TempoPhase, to: TempoPhase) {
    counter!(
        "tempocue_phase_transitions_total",
        "from" => from.as_str(),
        "to" => to.as_str()
    )
    .increment(1);
}

/// Sets the currently active phase gauge, zeroing the previous phase.
pub fn set_current_phase(phase: TempoPhase, previous: TempoPhase) {
    gauge!("tempocue_current_phase", "phase" => previous.as_str()).set(0.0);
    gauge!("tempocue_current_phase", "phase" => phase.as_str()).set(1.0);
}

/// Records a completed repetition for `exercise`.
///
/// Exercise names come from plan files and are sanitized before use as
/// a label.
pub fn record_repetition(exercise: &str) {
    counter!("tempocue_repetitions_total", "exercise" => sanitize_label(exercise)).increment(1);
}

/// Truncates to [`MAX_LABEL_LEN`] characters and replaces characters that
/// are invalid in Prometheus labels with underscores.
fn sanitize_label(name: &str) -> String {
    name.chars()
        .take(MAX_LABEL_LEN)
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
