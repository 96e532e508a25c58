//! Entity and round-state types.  Plain data; the rules live in `compute`.

use crate::geometry::{Bounded, Rect};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    /// Waiting for the first start action.
    Start,
    Playing,
    /// Round over; a restart action begins a new one.
    Ended,
}

/// Result attached to the transition into `GameStatus::Ended`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundOutcome {
    pub won: bool,
    pub final_score: u32,
}

// ── Player & projectiles ─────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    /// Upward speed in units per second.
    pub speed: f32,
}

// ── Enemies ──────────────────────────────────────────────────────────────────

/// A descending adversary.  Enemies are square, `size` on each side.
#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    /// Downward speed in units per second.
    pub speed: f32,
}

impl Bounded for Player {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }
}

impl Bounded for Bullet {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }
}

impl Bounded for Enemy {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.size, self.size)
    }
}

// ── Master game state ────────────────────────────────────────────────────────

/// Everything that changes during a round.  Owned by the caller and handed
/// to the simulation by reference, so tests can build any situation directly.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub score: u32,
    /// Seconds left on the round clock, never negative.
    pub time_left: f32,
    pub status: GameStatus,
    /// Seconds accumulated toward the next enemy spawn.
    pub spawn_accumulator: f32,
    /// Seconds until the next shot is allowed; `<= 0` means ready.
    pub fire_cooldown: f32,
}

impl GameState {
    /// Seconds left rounded up, as shown on the HUD.
    pub fn display_seconds(&self) -> u32 {
        self.time_left.max(0.0).ceil() as u32
    }
}
