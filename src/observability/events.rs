//! Structured session events for `tempocue`.
//!
//! A timed session emits a small, typed event stream: start, every phase
//! entry, every finished repetition, and stop. Each event becomes one JSON
//! line carrying a `sequence` number so readers can detect gaps.

use std::fmt;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::tempo::TempoPhase;

// ============================================================================
// Events
// ============================================================================

/// One thing that happened during a session.
///
/// Serialized with a `"type"` tag holding the variant name.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum Event {
    /// The timer started its first repetition.
    SessionStarted {
        /// Wall-clock start time
        timestamp: DateTime<Utc>,
        /// Tempo notation being run
        tempo: String,
        /// Notation, preset name, or plan exercise the tempo came from
        source: String,
        /// Repetitions after which the session stops, if any
        target_repetitions: Option<u32>,
    },

    /// The timer entered a new phase.
    PhaseEntered {
        /// Wall-clock time of the change
        timestamp: DateTime<Utc>,
        /// Phase now active
        phase: TempoPhase,
        /// Repetition the phase belongs to
        repetition: u32,
        /// Countdown loaded on entry
        seconds: u32,
    },

    /// The cycle wrapped back to eccentric.
    RepetitionCompleted {
        /// Wall-clock time of the wrap
        timestamp: DateTime<Utc>,
        /// Repetitions finished so far
        completed: u32,
    },

    /// The session ended.
    SessionStopped {
        /// Wall-clock stop time
        timestamp: DateTime<Utc>,
        /// `target_reached` or `cancelled`
        reason: String,
        /// Repetitions finished
        completed_repetitions: u32,
        /// Ticks delivered to the engine
        ticks: u64,
    },
}

/// Wire form of an event: the event's own fields plus `sequence`.
#[derive(Serialize)]
struct SequencedEvent<'a> {
    sequence: u64,
    #[serde(flatten)]
    event: &'a Event,
}

// ============================================================================
// Emitter
// ============================================================================

type Sink = BufWriter<Box<dyn Write + Send>>;

/// JSONL writer for session events.
///
/// Sequence numbers start at 0 and are assigned even when the sink
/// discards output. Write and serialization failures are swallowed so a
/// full disk never interrupts a set.
pub struct EventEmitter {
    sink: Option<Mutex<Sink>>,
    next_sequence: AtomicU64,
}

impl EventEmitter {
    /// Emitter writing to `writer`.
    #[must_use]
    pub fn new(writer: Box<dyn Write + Send>) -> Self {
        Self::with_sink(Some(Mutex::new(BufWriter::new(writer))))
    }

    /// Emitter writing to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(Box::new(std::io::stderr()))
    }

    /// Emitter that only counts.
    #[must_use]
    pub const fn noop() -> Self {
        Self::with_sink(None)
    }

    /// Emitter writing to a newly created (or truncated) file.
    ///
    /// # Errors
    ///
    /// Returns the I/O error from creating `path`.
    pub fn from_file(path: &Path) -> std::io::Result<Self> {
        std::fs::File::create(path).map(|file| Self::new(Box::new(file)))
    }

    const fn with_sink(sink: Option<Mutex<Sink>>) -> Self {
        Self {
            sink,
            next_sequence: AtomicU64::new(0),
        }
    }

    /// Assigns the next sequence number to `event` and writes it.
    pub fn emit(&self, event: Event) {
        let sequence = self.next_sequence.fetch_add(1, Ordering::SeqCst);
        let Some(sink) = &self.sink else {
            return;
        };

        let Ok(line) = serde_json::to_string(&SequencedEvent {
            sequence,
            event: &event,
        }) else {
            return;
        };
        if let Ok(mut out) = sink.lock() {
            let _ = writeln!(out, "{line}").and_then(|()| out.flush());
        }
    }

    /// Number of events emitted, including discarded ones.
    #[must_use]
    pub fn event_count(&self) -> u64 {
        self.next_sequence.load(Ordering::Relaxed)
    }
}

impl fmt::Debug for EventEmitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventEmitter")
            .field("discarding", &self.sink.is_none())
            .field("event_count", &self.event_count())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
