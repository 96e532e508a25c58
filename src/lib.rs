//! Countdown Shooter: a timed arcade shooter.
//!
//! - `compute`: round state machine and the per-frame simulation step
//! - `driver`: frame timing, start debounce and the outcome overlay delay
//! - `scene`: the render snapshot handed to a front end
//! - `entities`, `geometry`, `spawner`: data and helpers the step uses
//! - `config`: tuning constants, optionally loaded from JSON

pub mod compute;
pub mod config;
pub mod driver;
pub mod entities;
pub mod geometry;
pub mod scene;
pub mod spawner;
