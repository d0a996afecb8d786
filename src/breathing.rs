//! Breathing-session timer and phase state machine.
//!
//! One session runs for a configured duration (5 minutes by default)
//! and cycles through Inhale → Hold → Exhale, 4 seconds each. The host
//! re-invokes [`BreathingTimer::tick`] on every UI refresh rather than
//! running a background loop, so a tick is a pure function of the
//! caller-supplied `now` minus the recorded start instant — the phase
//! is never stored independently of elapsed time, which prevents drift
//! and makes redundant ticks with the same `now` harmless.
//!
//! Entering the Exhale sub-phase of a new 12-second cycle is a
//! side-effect trigger point: the tick output carries a one-shot
//! `fire_exhale_cue` flag (deduplicated per cycle index) that the
//! engine forwards to the audio-cue collaborator fire-and-forget.

use crate::error::{CompanionError, Result};
use std::time::{Duration, Instant};

/// Seconds per breathing sub-phase.
pub const PHASE_SECS: u64 = 4;

/// Seconds per full Inhale-Hold-Exhale cycle.
pub const CYCLE_SECS: u64 = 3 * PHASE_SECS;

/// Default session length in seconds (5 minutes).
pub const DEFAULT_DURATION_SECS: u64 = 300;

/// One of the three sub-intervals of a breathing cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreathPhase {
    /// Seconds [0, 4) of the cycle.
    Inhale,
    /// Seconds [4, 8) of the cycle.
    Hold,
    /// Seconds [8, 12) of the cycle.
    Exhale,
}

impl std::fmt::Display for BreathPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Inhale => f.write_str("Inhale"),
            Self::Hold => f.write_str("Hold"),
            Self::Exhale => f.write_str("Exhale"),
        }
    }
}

/// Lifecycle state of a breathing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No session has been started.
    Idle,
    /// A session is in progress.
    Running,
    /// The session ran to its full duration.
    Completed,
    /// The session was stopped by the user.
    Cancelled,
}

/// Snapshot of the session at one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BreathingTick {
    /// Lifecycle state at this tick.
    pub state: SessionState,
    /// Current sub-phase; `None` unless the session is running.
    pub phase: Option<BreathPhase>,
    /// Whole seconds elapsed since the session started.
    pub elapsed_secs: u64,
    /// Completion fraction in `0.0..=1.0`.
    pub percent_complete: f32,
    /// `true` exactly once per cycle, on entry into the Exhale phase.
    pub fire_exhale_cue: bool,
}

/// Breathing-session timer driven by an injected clock.
///
/// Callers pass `Instant::now()` (or a synthetic instant in tests) to
/// [`start`](Self::start) and [`tick`](Self::tick); the timer itself
/// never reads the wall clock.
#[derive(Debug, Clone)]
pub struct BreathingTimer {
    duration: Duration,
    started_at: Option<Instant>,
    cancelled: bool,
    /// Cycle index for which the exhale cue already fired.
    last_cue_cycle: Option<u64>,
}

impl BreathingTimer {
    /// Create a timer with the default 5-minute duration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_duration(Duration::from_secs(DEFAULT_DURATION_SECS))
    }

    /// Create a timer with a custom total duration.
    #[must_use]
    pub fn with_duration(duration: Duration) -> Self {
        Self {
            duration,
            started_at: None,
            cancelled: false,
            last_cue_cycle: None,
        }
    }

    /// Start a session at `now`.
    ///
    /// Starting from Idle, Completed, or Cancelled begins a fresh
    /// session and clears the cancellation flag and cue bookkeeping.
    ///
    /// # Errors
    ///
    /// Returns [`CompanionError::Breathing`] if a session is already
    /// running.
    pub fn start(&mut self, now: Instant) -> Result<()> {
        if self.state_at(now) == SessionState::Running {
            return Err(CompanionError::Breathing(
                "a breathing session is already running".to_owned(),
            ));
        }
        self.started_at = Some(now);
        self.cancelled = false;
        self.last_cue_cycle = None;
        Ok(())
    }

    /// Stop the running session.
    ///
    /// Only flips state: in-flight cue playback is not chased down.
    /// Idempotent once cancelled; a no-op when no session was started.
    pub fn cancel(&mut self) {
        if self.started_at.is_some() {
            self.cancelled = true;
        }
    }

    /// Lifecycle state as of `now`, without any side effects.
    #[must_use]
    pub fn state_at(&self, now: Instant) -> SessionState {
        let Some(started_at) = self.started_at else {
            return SessionState::Idle;
        };
        if self.cancelled {
            return SessionState::Cancelled;
        }
        if elapsed_whole_secs(started_at, now) >= self.duration.as_secs() {
            SessionState::Completed
        } else {
            SessionState::Running
        }
    }

    /// Pure snapshot of the session at `now`.
    ///
    /// Identical inputs produce identical outputs; the cue flag is
    /// always `false` here (only [`tick`](Self::tick) arms it).
    #[must_use]
    pub fn snapshot(&self, now: Instant) -> BreathingTick {
        let state = self.state_at(now);
        let elapsed_secs = self
            .started_at
            .map(|s| elapsed_whole_secs(s, now))
            .unwrap_or(0);
        let total = self.duration.as_secs().max(1);

        let (phase, percent_complete) = match state {
            SessionState::Idle => (None, 0.0),
            SessionState::Completed => (None, 1.0),
            SessionState::Cancelled => {
                (None, (elapsed_secs as f32 / total as f32).min(1.0))
            }
            SessionState::Running => {
                let phase = phase_for(elapsed_secs);
                (Some(phase), elapsed_secs as f32 / total as f32)
            }
        };

        BreathingTick {
            state,
            phase,
            elapsed_secs,
            percent_complete,
            fire_exhale_cue: false,
        }
    }

    /// Advance the session to `now` and return its snapshot.
    ///
    /// Safe to call redundantly with the same or an advancing `now`.
    /// On the first tick inside the Exhale window of each 12-second
    /// cycle the returned snapshot carries `fire_exhale_cue = true`;
    /// every later tick in the same cycle reports `false`.
    pub fn tick(&mut self, now: Instant) -> BreathingTick {
        let mut tick = self.snapshot(now);

        if tick.state == SessionState::Running && tick.phase == Some(BreathPhase::Exhale) {
            let cycle = tick.elapsed_secs / CYCLE_SECS;
            if self.last_cue_cycle != Some(cycle) {
                self.last_cue_cycle = Some(cycle);
                tick.fire_exhale_cue = true;
            }
        }

        tick
    }

    /// Total configured session duration.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl Default for BreathingTimer {
    fn default() -> Self {
        Self::new()
    }
}

fn elapsed_whole_secs(started_at: Instant, now: Instant) -> u64 {
    now.saturating_duration_since(started_at).as_secs()
}

fn phase_for(elapsed_secs: u64) -> BreathPhase {
    match elapsed_secs % CYCLE_SECS {
        t if t < PHASE_SECS => BreathPhase::Inhale,
        t if t < 2 * PHASE_SECS => BreathPhase::Hold,
        _ => BreathPhase::Exhale,
    }
}
