//! Tick driver
//!
//! Host-side scheduler that advances one [`TempoEngine`] once per interval
//! on a tokio timer. The engine has no stop condition; the driver stops on
//! cancellation or, when configured, after a number of completed
//! repetitions.

use std::fmt;
use std::io::Write;
use std::time::Duration;

use chrono::Utc;
use serde::Serialize;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::observability::events::{Event, EventEmitter};
use crate::observability::metrics;
use crate::tempo::{PhaseTransition, TempoEngine, TempoPhase, display};

/// Default tick period: one second per tick.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The cancellation token fired (Ctrl+C, SIGTERM, or caller).
    Cancelled,
    /// The configured number of repetitions completed.
    TargetReached,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cancelled => f.write_str("cancelled"),
            Self::TargetReached => f.write_str("target_reached"),
        }
    }
}

/// Outcome of one driven session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    /// Repetitions fully completed
    pub completed_repetitions: u32,
    /// Ticks delivered to the engine
    pub ticks: u64,
    /// Why the session ended
    pub reason: StopReason,
}

/// Drives a tempo engine from a periodic timer.
pub struct TickDriver {
    interval: Duration,
    target_repetitions: Option<u32>,
    label: String,
    emitter: EventEmitter,
    cue_writer: Option<Box<dyn Write + Send>>,
}

impl TickDriver {
    /// Creates a driver ticking every `interval`.
    ///
    /// `label` names the session in logs, events and metrics (an exercise
    /// name, preset name, or the notation itself).
    #[must_use]
    pub fn new(interval: Duration, label: impl Into<String>) -> Self {
        Self {
            interval,
            target_repetitions: None,
            label: label.into(),
            emitter: EventEmitter::noop(),
            cue_writer: None,
        }
    }

    /// Stops the session after `reps` completed repetitions.
    #[must_use]
    pub const fn with_target_repetitions(mut self, reps: Option<u32>) -> Self {
        self.target_repetitions = reps;
        self
    }

    /// Sends session events to `emitter`.
    #[must_use]
    pub fn with_emitter(mut self, emitter: EventEmitter) -> Self {
        self.emitter = emitter;
        self
    }

    /// Writes a rendered cue line to `writer` after every tick.
    #[must_use]
    pub fn with_cue_writer(mut self, writer: Box<dyn Write + Send>) -> Self {
        self.cue_writer = Some(writer);
        self
    }

    /// Event emitter used by this driver.
    #[must_use]
    pub const fn emitter(&self) -> &EventEmitter {
        &self.emitter
    }

    /// Starts `engine` and ticks it until cancelled or the target is met.
    ///
    /// The first tick fires one full interval after start, so every second
    /// of a phase is shown. The engine is reset before returning.
    pub async fn run(
        &mut self,
        engine: &mut TempoEngine,
        cancel: CancellationToken,
    ) -> SessionSummary {
        let mut ticks: u64 = 0;

        engine.reset();
        if let Some(transition) = engine.start() {
            self.emitter.emit(Event::SessionStarted {
                timestamp: Utc::now(),
                tempo: engine.spec().to_string(),
                source: self.label.clone(),
                target_repetitions: self.target_repetitions,
            });
            info!(
                label = %self.label,
                tempo = %engine.spec(),
                target = ?self.target_repetitions,
                "session started"
            );
            self.on_transition(engine, transition);
        }
        self.write_cue(engine);

        let mut interval =
            tokio::time::interval_at(Instant::now() + self.interval, self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let reason = loop {
            if self.target_met(engine) {
                break StopReason::TargetReached;
            }

            tokio::select! {
                () = cancel.cancelled() => {
                    debug!("tick driver cancelled");
                    break StopReason::Cancelled;
                }
                _ = interval.tick() => {
                    ticks += 1;
                    metrics::record_tick();
                    if let Some(transition) = engine.tick() {
                        self.on_transition(engine, transition);
                    }
                    self.write_cue(engine);
                }
            }
        };

        let summary = SessionSummary {
            completed_repetitions: engine.state().completed_repetitions(),
            ticks,
            reason,
        };

        engine.reset();

        self.emitter.emit(Event::SessionStopped {
            timestamp: Utc::now(),
            reason: reason.to_string(),
            completed_repetitions: summary.completed_repetitions,
            ticks,
        });
        info!(
            label = %self.label,
            %reason,
            completed = summary.completed_repetitions,
            ticks,
            "session stopped"
        );

        summary
    }

    fn target_met(&self, engine: &TempoEngine) -> bool {
        self.target_repetitions
            .is_some_and(|target| engine.state().completed_repetitions() >= target)
    }

    fn on_transition(&self, engine: &TempoEngine, transition: PhaseTransition) {
        metrics::record_phase_transition(transition.from, transition.to);
        metrics::set_current_phase(transition.to, transition.from);

        if transition.completed_repetition {
            let completed = transition.repetition_count.saturating_sub(1);
            metrics::record_repetition(&self.label);
            self.emitter.emit(Event::RepetitionCompleted {
                timestamp: Utc::now(),
                completed,
            });
            info!(label = %self.label, completed, "repetition completed");
        }

        if transition.to != TempoPhase::Idle {
            self.emitter.emit(Event::PhaseEntered {
                timestamp: Utc::now(),
                phase: transition.to,
                repetition: transition.repetition_count,
                seconds: engine.remaining_seconds(),
            });
        }
        debug!(from = %transition.from, to = %transition.to, "phase transition");
    }

    fn write_cue(&mut self, engine: &TempoEngine) {
        if let Some(writer) = self.cue_writer.as_mut() {
            let _ = writeln!(writer, "{}", display::render(engine));
            let _ = writer.flush();
        }
    }
}

impl fmt::Debug for TickDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TickDriver")
            .field("interval", &self.interval)
            .field("target_repetitions", &self.target_repetitions)
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone)]
    struct TestWriter(Arc<Mutex<Vec<u8>>>);

    impl TestWriter {
        fn new() -> Self {
            Self(Arc::new(Mutex::new(Vec::new())))
        }

        fn lines(&self) -> Vec<String> {
            String::from_utf8_lossy(&self.0.lock().unwrap())
                .lines()
                .map(str::to_owned)
                .collect()
        }
    }

    impl Write for TestWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn stops_after_target_repetitions() {
        let mut engine = TempoEngine::from_notation("1/1/1/1").unwrap();
        let mut driver = TickDriver::new(DEFAULT_TICK_INTERVAL, "test")
            .with_target_repetitions(Some(2));

        let summary = driver.run(&mut engine, CancellationToken::new()).await;

        assert_eq!(summary.reason, StopReason::TargetReached);
        assert_eq!(summary.completed_repetitions, 2);
        assert_eq!(summary.ticks, 16);
        assert!(!engine.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_stops_session() {
        let mut engine = TempoEngine::from_notation("3/1/1/0").unwrap();
        let mut driver = TickDriver::new(DEFAULT_TICK_INTERVAL, "test");
        let cancel = CancellationToken::new();

        let canceller = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(2500)).await;
            canceller.cancel();
        });

        let summary = driver.run(&mut engine, cancel).await;
        assert_eq!(summary.reason, StopReason::Cancelled);
        assert_eq!(summary.ticks, 2);
        assert_eq!(summary.completed_repetitions, 0);
        assert_eq!(engine.phase(), TempoPhase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn writes_one_cue_per_tick() {
        let mut engine = TempoEngine::from_notation("2/0/1/0").unwrap();
        let cues = TestWriter::new();
        let mut driver = TickDriver::new(DEFAULT_TICK_INTERVAL, "test")
            .with_target_repetitions(Some(1))
            .with_cue_writer(Box::new(cues.clone()));

        let summary = driver.run(&mut engine, CancellationToken::new()).await;

        let lines = cues.lines();
        // initial cue plus one per tick
        assert_eq!(lines.len() as u64, summary.ticks + 1);
        assert_eq!(lines[0], "rep 1 · lower (eccentric) · 2s");
    }

    #[tokio::test(start_paused = true)]
    async fn emits_session_events_in_order() {
        let mut engine = TempoEngine::from_notation("0/0/0/0").unwrap();
        let out = TestWriter::new();
        let mut driver = TickDriver::new(DEFAULT_TICK_INTERVAL, "test")
            .with_target_repetitions(Some(1))
            .with_emitter(EventEmitter::new(Box::new(out.clone())));

        driver.run(&mut engine, CancellationToken::new()).await;

        let events: Vec<serde_json::Value> = out
            .lines()
            .iter()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        let types: Vec<&str> = events.iter().map(|e| e["type"].as_str().unwrap()).collect();

        assert_eq!(types.first(), Some(&"SessionStarted"));
        assert_eq!(types.last(), Some(&"SessionStopped"));
        assert_eq!(
            types.iter().filter(|t| **t == "RepetitionCompleted").count(),
            1
        );
        // start + 4 phase entries (the wrap re-enters eccentric)
        assert_eq!(types.iter().filter(|t| **t == "PhaseEntered").count(), 5);
        assert_eq!(events.last().unwrap()["reason"], "target_reached");
        assert_eq!(driver.emitter().event_count(), events.len() as u64);
    }

    #[test]
    fn stop_reason_display() {
        assert_eq!(StopReason::Cancelled.to_string(), "cancelled");
        assert_eq!(StopReason::TargetReached.to_string(), "target_reached");
    }
}
