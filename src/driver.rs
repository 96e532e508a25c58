//! Frame driver: turns host timestamps and held controls into simulation
//! steps and scenes.
//!
//! The host calls `Session::frame` once per display refresh.  Calls must be
//! serialised; the session owns the whole entity set for the duration.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::compute::{advance, init_state, start_round, FrameInput, StepResult};
use crate::config::GameConfig;
use crate::entities::{GameState, RoundOutcome};
use crate::scene::{draw, Scene};

// ── Timing ───────────────────────────────────────────────────────────────────

/// Converts absolute timestamps into per-frame deltas.
#[derive(Clone, Debug, Default)]
pub struct FrameClock {
    last: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous call.  The first call yields 0 so there
    /// is no startup spike; a timestamp earlier than the last one also
    /// yields 0 and does not rewind the clock.
    pub fn tick(&mut self, now: f64) -> f32 {
        let dt = match self.last {
            Some(last) if now > last => (now - last) as f32,
            Some(_) => 0.0,
            None => 0.0,
        };
        self.last = Some(self.last.map_or(now, |last| last.max(now)));
        dt
    }
}

// ── Start debounce ───────────────────────────────────────────────────────────

/// Rising-edge detector for the start/restart control.
///
/// Holding the control down triggers once; it has to be released before it
/// can trigger again.
#[derive(Clone, Debug, Default)]
pub struct StartLatch {
    held: bool,
}

impl StartLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rising_edge(&mut self, pressed: bool) -> bool {
        let edge = pressed && !self.held;
        self.held = pressed;
        edge
    }
}

// ── Host-facing controls ─────────────────────────────────────────────────────

/// Logical controls as seen by the host at the moment of a frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Controls {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
    /// Start/restart control currently held (debounced by the session).
    pub start: bool,
    /// Pointer clicked since the previous frame.
    pub clicked: bool,
}

impl Controls {
    fn frame_input(&self) -> FrameInput {
        FrameInput {
            left: self.left,
            right: self.right,
            fire: self.fire,
            fire_clicked: self.clicked,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct PendingOverlay {
    outcome: RoundOutcome,
    remaining: f32,
}

// ── Session ──────────────────────────────────────────────────────────────────

pub struct Session {
    config: GameConfig,
    state: GameState,
    rng: StdRng,
    clock: FrameClock,
    start_latch: StartLatch,
    pending: Option<PendingOverlay>,
    overlay: Option<RoundOutcome>,
}

impl Session {
    pub fn new(config: GameConfig) -> Self {
        let config = config.sanitized();
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            state: init_state(&config),
            config,
            rng,
            clock: FrameClock::new(),
            start_latch: StartLatch::new(),
            pending: None,
            overlay: None,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Outcome banner currently visible, if any.
    pub fn overlay(&self) -> Option<RoundOutcome> {
        self.overlay
    }

    /// Run one frame at host time `now` (seconds) and return what to draw.
    ///
    /// A start action that begins a round consumes the frame: the simulation
    /// first advances on the next call, so the press does not also count as
    /// a shot.
    pub fn frame(&mut self, now: f64, controls: &Controls) -> Scene {
        let dt = self.clock.tick(now);

        if self.start_latch.rising_edge(controls.start) && start_round(&mut self.state, &self.config) {
            self.pending = None;
            self.overlay = None;
            return draw(&self.state, None);
        }

        let step = advance(
            &mut self.state,
            &controls.frame_input(),
            dt,
            &self.config,
            &mut self.rng,
        );
        self.track_overlay(&step, dt);

        draw(&self.state, self.overlay)
    }

    fn track_overlay(&mut self, step: &StepResult, dt: f32) {
        if let Some(outcome) = step.outcome {
            self.pending = Some(PendingOverlay {
                outcome,
                remaining: self.config.overlay_delay,
            });
        } else if let Some(pending) = self.pending.as_mut() {
            pending.remaining -= dt;
        }

        if let Some(pending) = self.pending {
            if pending.remaining <= 0.0 {
                self.overlay = Some(pending.outcome);
                self.pending = None;
            }
        }
    }
}
