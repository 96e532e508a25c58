//! Tuning constants for a round.
//!
//! Everything the simulation needs to know about speeds, sizes and timers
//! lives in `GameConfig`.  Values are fixed once a session starts; the
//! defaults reproduce the classic 60-second round.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Smallest viewport the simulation accepts, in world units.
const MIN_VIEWPORT: f32 = 64.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    // ── Viewport ─────────────────────────────────────────────────────────────
    pub viewport_width: f32,
    pub viewport_height: f32,

    // ── Round ────────────────────────────────────────────────────────────────
    /// Seconds on the clock when a round starts.
    pub round_duration: f32,
    pub win_score: u32,
    pub score_per_kill: u32,

    // ── Player ───────────────────────────────────────────────────────────────
    pub player_width: f32,
    pub player_height: f32,
    /// Gap between the player's top edge and the viewport bottom.
    pub player_bottom_offset: f32,
    pub player_speed: f32,

    // ── Bullets ──────────────────────────────────────────────────────────────
    pub bullet_width: f32,
    pub bullet_height: f32,
    pub bullet_speed: f32,
    /// How far above the player's top edge a new bullet appears.
    pub muzzle_offset: f32,
    pub fire_cooldown: f32,

    // ── Enemies ──────────────────────────────────────────────────────────────
    pub enemy_base_speed: f32,
    /// Upper bound (exclusive) of the random speed bonus.
    pub enemy_speed_jitter: f32,
    pub enemy_min_size: f32,
    /// Upper bound (exclusive) of the random size.
    pub enemy_max_size: f32,
    pub spawn_interval: f32,

    // ── Collision / presentation ─────────────────────────────────────────────
    pub collision_buffer: f32,
    /// Delay between the end of a round and the outcome overlay.
    pub overlay_delay: f32,
    /// Fixed RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            viewport_width: 800.0,
            viewport_height: 600.0,

            round_duration: 60.0,
            win_score: 700,
            score_per_kill: 10,

            player_width: 50.0,
            player_height: 50.0,
            player_bottom_offset: 60.0,
            player_speed: 400.0,

            bullet_width: 8.0,
            bullet_height: 12.0,
            bullet_speed: 800.0,
            muzzle_offset: 10.0,
            fire_cooldown: 0.12,

            enemy_base_speed: 120.0,
            enemy_speed_jitter: 40.0,
            enemy_min_size: 28.0,
            enemy_max_size: 52.0,
            spawn_interval: 0.8,

            collision_buffer: 5.0,
            overlay_delay: 0.5,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) JSON document over the defaults.  Unknown
    /// keys are an error so a misspelt setting is not silently ignored.
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Read a JSON config file and sanitise it.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = Self::from_json_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        log::info!("Loaded config from {}", path.display());
        Ok(config.sanitized())
    }

    /// Clamp values the simulation cannot work with.
    ///
    /// Negative speeds and sizes become zero, an inverted size range
    /// collapses to its lower bound, and the viewport is grown to fit the
    /// player.  Every correction is logged.
    pub fn sanitized(mut self) -> Self {
        fn non_negative(name: &str, value: &mut f32) {
            if !value.is_finite() || *value < 0.0 {
                log::warn!("config: {name}={value} is invalid, using 0");
                *value = 0.0;
            }
        }

        non_negative("round_duration", &mut self.round_duration);
        non_negative("player_width", &mut self.player_width);
        non_negative("player_height", &mut self.player_height);
        non_negative("player_bottom_offset", &mut self.player_bottom_offset);
        non_negative("player_speed", &mut self.player_speed);
        non_negative("bullet_width", &mut self.bullet_width);
        non_negative("bullet_height", &mut self.bullet_height);
        non_negative("bullet_speed", &mut self.bullet_speed);
        non_negative("muzzle_offset", &mut self.muzzle_offset);
        non_negative("fire_cooldown", &mut self.fire_cooldown);
        non_negative("enemy_base_speed", &mut self.enemy_base_speed);
        non_negative("enemy_speed_jitter", &mut self.enemy_speed_jitter);
        non_negative("enemy_min_size", &mut self.enemy_min_size);
        non_negative("enemy_max_size", &mut self.enemy_max_size);
        non_negative("collision_buffer", &mut self.collision_buffer);
        non_negative("overlay_delay", &mut self.overlay_delay);

        if self.enemy_max_size < self.enemy_min_size {
            log::warn!(
                "config: enemy size range [{}, {}) is empty, collapsing",
                self.enemy_min_size,
                self.enemy_max_size
            );
            self.enemy_max_size = self.enemy_min_size;
        }

        // A zero interval would spawn on every frame forever.
        if !self.spawn_interval.is_finite() || self.spawn_interval <= 0.0 {
            log::warn!("config: spawn_interval={} is invalid, using 0.8", self.spawn_interval);
            self.spawn_interval = 0.8;
        }

        let min_width = self.player_width.max(MIN_VIEWPORT);
        if !self.viewport_width.is_finite() || self.viewport_width < min_width {
            log::warn!("config: viewport_width={} too small, using {min_width}", self.viewport_width);
            self.viewport_width = min_width;
        }
        let min_height = self.player_bottom_offset.max(MIN_VIEWPORT);
        if !self.viewport_height.is_finite() || self.viewport_height < min_height {
            log::warn!("config: viewport_height={} too small, using {min_height}", self.viewport_height);
            self.viewport_height = min_height;
        }

        self
    }

    /// Vertical position of the player's top edge.
    pub fn player_y(&self) -> f32 {
        self.viewport_height - self.player_bottom_offset
    }

    /// Rightmost x the player may occupy.
    pub fn player_max_x(&self) -> f32 {
        (self.viewport_width - self.player_width).max(0.0)
    }
}
