//! Game logic: the round state machine and the per-frame simulation step.
//!
//! Functions mutate a `GameState` in place; those that depend on tuning also
//! take the `GameConfig`.  `advance` is the only one that needs randomness,
//! and it draws solely from the RNG passed in, so tests can drive the
//! simulation deterministically with a seeded one.

use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{Bullet, GameState, GameStatus, Player, RoundOutcome};
use crate::geometry::{intersects, Bounded};
use crate::spawner::spawn_enemy;

/// Logical inputs sampled at the top of a step.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameInput {
    pub left: bool,
    pub right: bool,
    /// Fire control currently held.
    pub fire: bool,
    /// Pointer click since the last step; fires once, subject to cooldown.
    pub fire_clicked: bool,
}

/// What the presentation layer needs after each step.
#[derive(Clone, Debug, PartialEq)]
pub struct StepResult {
    pub score: u32,
    pub time_left: f32,
    /// Set only on the step that ended the round.
    pub outcome: Option<RoundOutcome>,
}

impl StepResult {
    fn of(state: &GameState, outcome: Option<RoundOutcome>) -> Self {
        Self {
            score: state.score,
            time_left: state.time_left,
            outcome,
        }
    }
}

// ── Constructors ─────────────────────────────────────────────────────────────

fn centred_player(config: &GameConfig) -> Player {
    Player {
        x: config.viewport_width / 2.0 - config.player_width / 2.0,
        y: config.player_y(),
        w: config.player_width,
        h: config.player_height,
    }
}

/// Build the idle state shown before the first round.
pub fn init_state(config: &GameConfig) -> GameState {
    GameState {
        player: centred_player(config),
        bullets: Vec::new(),
        enemies: Vec::new(),
        score: 0,
        time_left: config.round_duration,
        status: GameStatus::Start,
        spawn_accumulator: 0.0,
        fire_cooldown: 0.0,
    }
}

// ── Round state machine ──────────────────────────────────────────────────────

/// Begin a fresh round.
///
/// Only valid from `Start` or `Ended`; while a round is playing the request
/// is ignored and `false` is returned.
pub fn start_round(state: &mut GameState, config: &GameConfig) -> bool {
    if state.status == GameStatus::Playing {
        return false;
    }
    state.player = centred_player(config);
    state.bullets.clear();
    state.enemies.clear();
    state.score = 0;
    state.time_left = config.round_duration;
    state.spawn_accumulator = 0.0;
    state.fire_cooldown = 0.0;
    state.status = GameStatus::Playing;
    log::info!("round started ({}s on the clock)", config.round_duration);
    true
}

/// Move a playing round into `Ended`.  Ending a round that is not playing
/// is a no-op and yields no outcome.
pub fn end_round(state: &mut GameState, won: bool) -> Option<RoundOutcome> {
    if state.status != GameStatus::Playing {
        return None;
    }
    state.status = GameStatus::Ended;
    log::info!(
        "round ended: {} with score {} ({:.2}s left)",
        if won { "won" } else { "lost" },
        state.score,
        state.time_left
    );
    Some(RoundOutcome {
        won,
        final_score: state.score,
    })
}

// ── Input-driven pieces of a step ────────────────────────────────────────────

/// Integrate held directions and clamp the player inside the viewport.
pub fn move_player(state: &mut GameState, input: &FrameInput, dt: f32, config: &GameConfig) {
    let step = config.player_speed * dt;
    if input.left {
        state.player.x -= step;
    }
    if input.right {
        state.player.x += step;
    }
    state.player.x = state.player.x.clamp(0.0, config.player_max_x());
}

/// Fire from the player's top-centre if the cooldown allows it.
pub fn player_shoot(state: &mut GameState, config: &GameConfig) -> bool {
    if state.fire_cooldown > 0.0 {
        return false;
    }
    let p = &state.player;
    state.bullets.push(Bullet {
        x: p.x + p.w / 2.0 - config.bullet_width / 2.0,
        y: p.y - config.muzzle_offset,
        w: config.bullet_width,
        h: config.bullet_height,
        speed: config.bullet_speed,
    });
    state.fire_cooldown = config.fire_cooldown;
    log::debug!("shot fired ({} bullets live)", state.bullets.len());
    true
}

// ── Per-frame step ───────────────────────────────────────────────────────────

/// Negative or non-finite frame times count as zero.
fn sanitize_dt(dt: f32) -> f32 {
    if dt.is_finite() && dt >= 0.0 {
        dt
    } else {
        log::warn!("ignoring invalid frame time {dt}");
        0.0
    }
}

/// Advance a playing round by `dt` seconds.
///
/// The order matters: the clock runs first (and may end the round), then
/// the player moves and fires, projectiles and enemies move, collisions are
/// resolved and finally the win threshold is checked.  Does nothing unless
/// the round is playing.
pub fn advance(
    state: &mut GameState,
    input: &FrameInput,
    dt: f32,
    config: &GameConfig,
    rng: &mut impl Rng,
) -> StepResult {
    if state.status != GameStatus::Playing {
        return StepResult::of(state, None);
    }
    let dt = sanitize_dt(dt);

    // ── 1. Round clock ───────────────────────────────────────────────────────
    state.time_left -= dt;
    if state.time_left <= 0.0 {
        state.time_left = 0.0;
        let outcome = end_round(state, false);
        return StepResult::of(state, outcome);
    }

    // ── 2. Player movement ───────────────────────────────────────────────────
    move_player(state, input, dt, config);

    // ── 3. Firing ────────────────────────────────────────────────────────────
    if input.fire || input.fire_clicked {
        player_shoot(state, config);
    }
    state.fire_cooldown = (state.fire_cooldown - dt).max(0.0);

    // ── 4. Bullets ───────────────────────────────────────────────────────────
    for bullet in &mut state.bullets {
        bullet.y -= bullet.speed * dt;
    }
    state.bullets.retain(|b| b.y + b.h >= 0.0);

    // ── 5. Spawning ──────────────────────────────────────────────────────────
    // At most one enemy per step; a backlog longer than one interval (a tab
    // resumed after minutes) is folded away instead of spawning a swarm.
    state.spawn_accumulator += dt;
    if state.spawn_accumulator >= config.spawn_interval {
        state.spawn_accumulator -= config.spawn_interval;
        if state.spawn_accumulator >= config.spawn_interval {
            state.spawn_accumulator = state.spawn_accumulator.rem_euclid(config.spawn_interval);
        }
        spawn_enemy(&mut state.enemies, config, rng);
    }

    // ── 6. Enemies ───────────────────────────────────────────────────────────
    for enemy in &mut state.enemies {
        enemy.y += enemy.speed * dt;
    }
    let floor = config.viewport_height;
    state.enemies.retain(|e| e.y <= floor);

    // ── 7. Collisions ────────────────────────────────────────────────────────
    let player_box = state.player.bounds();
    let mut i = state.enemies.len();
    while i > 0 {
        i -= 1;
        let enemy_box = state.enemies[i].bounds();

        let hit = state
            .bullets
            .iter()
            .rposition(|b| intersects(&enemy_box, &b.bounds(), config.collision_buffer));
        if let Some(j) = hit {
            state.enemies.remove(i);
            state.bullets.remove(j);
            state.score += config.score_per_kill;
            log::debug!("enemy destroyed, score {}", state.score);
            continue;
        }

        if intersects(&enemy_box, &player_box, config.collision_buffer) {
            let outcome = end_round(state, false);
            return StepResult::of(state, outcome);
        }
    }

    // ── 8. Win check ─────────────────────────────────────────────────────────
    let outcome = if state.score >= config.win_score {
        end_round(state, true)
    } else {
        None
    };

    StepResult::of(state, outcome)
}
