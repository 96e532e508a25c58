use countdown_shooter::compute::*;
use countdown_shooter::config::GameConfig;
use countdown_shooter::entities::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

const EPS: f32 = 1e-4;

fn config() -> GameConfig {
    GameConfig::default()
}

/// A freshly started round.
fn make_state() -> GameState {
    let c = config();
    let mut s = init_state(&c);
    assert!(start_round(&mut s, &c));
    s
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn idle() -> FrameInput {
    FrameInput::default()
}

fn step(s: &mut GameState, input: &FrameInput, dt: f32) -> StepResult {
    advance(s, input, dt, &config(), &mut seeded_rng())
}

fn enemy_at(x: f32, y: f32, size: f32) -> Enemy {
    Enemy { x, y, size, speed: 0.0 }
}

fn bullet_at(x: f32, y: f32) -> Bullet {
    Bullet { x, y, w: 8.0, h: 12.0, speed: 0.0 }
}

// ── init_state / start_round ──────────────────────────────────────────────────

#[test]
fn init_state_waits_on_start_screen() {
    let s = init_state(&config());
    assert_eq!(s.status, GameStatus::Start);
    assert_eq!(s.score, 0);
    assert_eq!(s.time_left, 60.0);
    assert!(s.enemies.is_empty());
    assert!(s.bullets.is_empty());
}

#[test]
fn init_state_centres_player_near_bottom() {
    let s = init_state(&config());
    assert_eq!(s.player.x, 375.0); // 800/2 - 50/2
    assert_eq!(s.player.y, 540.0); // 600 - 60
    assert_eq!(s.player.w, 50.0);
    assert_eq!(s.player.h, 50.0);
}

#[test]
fn start_round_from_start_resets_everything() {
    let s = make_state();
    assert_eq!(s.status, GameStatus::Playing);
    assert_eq!(s.score, 0);
    assert_eq!(s.time_left, 60.0);
    assert!(s.enemies.is_empty());
    assert!(s.bullets.is_empty());
    assert_eq!(s.spawn_accumulator, 0.0);
    assert_eq!(s.fire_cooldown, 0.0);
}

#[test]
fn start_round_ignored_while_playing() {
    let c = config();
    let mut s = make_state();
    s.score = 40;
    s.enemies.push(enemy_at(100.0, 100.0, 30.0));
    assert!(!start_round(&mut s, &c));
    assert_eq!(s.score, 40);
    assert_eq!(s.enemies.len(), 1);
}

#[test]
fn restart_after_end_resets_score_and_player() {
    let c = config();
    let mut s = make_state();
    s.score = 120;
    s.player.x = 0.0;
    s.bullets.push(bullet_at(10.0, 10.0));
    s.enemies.push(enemy_at(100.0, 100.0, 30.0));
    s.fire_cooldown = 0.1;
    s.spawn_accumulator = 0.5;
    end_round(&mut s, false);

    assert!(start_round(&mut s, &c));
    assert_eq!(s.status, GameStatus::Playing);
    assert_eq!(s.score, 0);
    assert_eq!(s.player.x, 375.0);
    assert!(s.bullets.is_empty());
    assert!(s.enemies.is_empty());
    assert_eq!(s.fire_cooldown, 0.0);
    assert_eq!(s.spawn_accumulator, 0.0);
}

// ── end_round ─────────────────────────────────────────────────────────────────

#[test]
fn end_round_reports_outcome_once() {
    let mut s = make_state();
    s.score = 30;
    let first = end_round(&mut s, true);
    assert_eq!(first, Some(RoundOutcome { won: true, final_score: 30 }));
    assert_eq!(s.status, GameStatus::Ended);
    assert_eq!(end_round(&mut s, false), None);
    assert_eq!(s.status, GameStatus::Ended);
}

#[test]
fn end_round_from_start_is_noop() {
    let mut s = init_state(&config());
    assert_eq!(end_round(&mut s, false), None);
    assert_eq!(s.status, GameStatus::Start);
}

// ── advance: gating ───────────────────────────────────────────────────────────

#[test]
fn advance_does_nothing_before_start() {
    let mut s = init_state(&config());
    let r = step(&mut s, &idle(), 1.0);
    assert_eq!(s.time_left, 60.0);
    assert!(r.outcome.is_none());
    assert!(s.enemies.is_empty());
}

#[test]
fn advance_does_nothing_after_end() {
    let mut s = make_state();
    s.enemies.push(Enemy { x: 10.0, y: 10.0, size: 30.0, speed: 100.0 });
    end_round(&mut s, false);
    let r = step(&mut s, &FrameInput { left: true, ..idle() }, 0.5);
    assert!(r.outcome.is_none());
    assert_eq!(s.enemies[0].y, 10.0);
    assert_eq!(s.player.x, 375.0);
}

#[test]
fn advance_with_zero_dt_changes_nothing() {
    let mut s = make_state();
    s.enemies.push(Enemy { x: 10.0, y: 10.0, size: 30.0, speed: 100.0 });
    let r = step(&mut s, &FrameInput { right: true, ..idle() }, 0.0);
    assert_eq!(r.time_left, 60.0);
    assert_eq!(s.player.x, 375.0);
    assert_eq!(s.enemies[0].y, 10.0);
}

#[test]
fn advance_treats_negative_dt_as_zero() {
    let mut s = make_state();
    step(&mut s, &idle(), -3.0);
    assert_eq!(s.time_left, 60.0);
    step(&mut s, &idle(), f32::NAN);
    assert_eq!(s.time_left, 60.0);
}

// ── advance: timer ────────────────────────────────────────────────────────────

#[test]
fn first_step_spawns_one_enemy_and_ticks_clock() {
    let mut s = make_state();
    let r = step(&mut s, &idle(), 0.85);
    assert_eq!(s.enemies.len(), 1);
    assert!((r.time_left - 59.15).abs() < EPS);
    assert_eq!(r.score, 0);
    assert!(r.outcome.is_none());
}

#[test]
fn timer_floors_at_zero_and_loses() {
    let mut s = make_state();
    s.time_left = 0.3;
    let r = step(&mut s, &idle(), 0.5);
    assert_eq!(s.time_left, 0.0);
    assert_eq!(r.time_left, 0.0);
    assert_eq!(s.status, GameStatus::Ended);
    assert_eq!(r.outcome, Some(RoundOutcome { won: false, final_score: 0 }));
}

#[test]
fn timer_expiry_skips_rest_of_step() {
    let mut s = make_state();
    s.time_left = 0.1;
    s.bullets.push(Bullet { x: 100.0, y: 300.0, w: 8.0, h: 12.0, speed: 800.0 });
    step(&mut s, &FrameInput { fire: true, left: true, ..idle() }, 0.2);
    assert_eq!(s.bullets.len(), 1);
    assert_eq!(s.bullets[0].y, 300.0);
    assert_eq!(s.player.x, 375.0);
}

#[test]
fn timer_expiry_wins_nothing_even_at_threshold() {
    let mut s = make_state();
    s.time_left = 0.1;
    s.score = 700;
    let r = step(&mut s, &idle(), 0.2);
    assert_eq!(r.outcome.map(|o| o.won), Some(false));
}

// ── advance: player movement ──────────────────────────────────────────────────

#[test]
fn player_moves_with_held_direction() {
    let mut s = make_state();
    step(&mut s, &FrameInput { right: true, ..idle() }, 0.1);
    assert!((s.player.x - 415.0).abs() < EPS);
    step(&mut s, &FrameInput { left: true, ..idle() }, 0.2);
    assert!((s.player.x - 335.0).abs() < EPS);
}

#[test]
fn opposite_directions_cancel() {
    let mut s = make_state();
    step(&mut s, &FrameInput { left: true, right: true, ..idle() }, 0.1);
    assert!((s.player.x - 375.0).abs() < EPS);
}

#[test]
fn player_clamped_at_left_edge() {
    let mut s = make_state();
    s.player.x = 0.0;
    step(&mut s, &FrameInput { left: true, ..idle() }, 1.0);
    assert_eq!(s.player.x, 0.0);
}

#[test]
fn player_clamped_at_right_edge() {
    let mut s = make_state();
    step(&mut s, &FrameInput { right: true, ..idle() }, 5.0);
    assert_eq!(s.player.x, 750.0);
}

// ── advance: firing ───────────────────────────────────────────────────────────

#[test]
fn fire_spawns_bullet_at_top_centre() {
    let mut s = make_state();
    step(&mut s, &FrameInput { fire: true, ..idle() }, 0.0);
    assert_eq!(s.bullets.len(), 1);
    let b = &s.bullets[0];
    assert_eq!(b.x, 396.0); // 375 + 25 - 4
    assert_eq!(b.y, 530.0); // 540 - 10
    assert_eq!(b.w, 8.0);
    assert_eq!(b.h, 12.0);
    assert_eq!(b.speed, 800.0);
}

#[test]
fn fire_within_cooldown_yields_one_bullet() {
    let mut s = make_state();
    let fire = FrameInput { fire: true, ..idle() };
    step(&mut s, &fire, 0.05);
    step(&mut s, &fire, 0.05);
    assert_eq!(s.bullets.len(), 1);
}

#[test]
fn fire_after_cooldown_yields_another() {
    let mut s = make_state();
    let fire = FrameInput { fire: true, ..idle() };
    step(&mut s, &fire, 0.05);
    step(&mut s, &idle(), 0.05);
    step(&mut s, &idle(), 0.05);
    step(&mut s, &fire, 0.01);
    assert_eq!(s.bullets.len(), 2);
}

#[test]
fn click_fires_through_same_cooldown() {
    let mut s = make_state();
    step(&mut s, &FrameInput { fire_clicked: true, ..idle() }, 0.01);
    step(&mut s, &FrameInput { fire_clicked: true, ..idle() }, 0.01);
    assert_eq!(s.bullets.len(), 1);
}

#[test]
fn cooldown_never_goes_below_zero() {
    let mut s = make_state();
    step(&mut s, &idle(), 10.0);
    assert_eq!(s.fire_cooldown, 0.0);
}

#[test]
fn player_shoot_reports_cooldown() {
    let c = config();
    let mut s = make_state();
    assert!(player_shoot(&mut s, &c));
    assert!(!player_shoot(&mut s, &c));
    assert_eq!(s.bullets.len(), 1);
}

// ── advance: bullets ──────────────────────────────────────────────────────────

#[test]
fn bullet_moves_up_and_leaves_next_step() {
    let mut s = make_state();
    s.bullets.push(Bullet { x: 100.0, y: 5.0, w: 8.0, h: 12.0, speed: 800.0 });
    step(&mut s, &idle(), 0.02);
    assert_eq!(s.bullets.len(), 1);
    assert!((s.bullets[0].y - -11.0).abs() < EPS);
    step(&mut s, &idle(), 0.02);
    assert!(s.bullets.is_empty());
}

// ── advance: enemies ──────────────────────────────────────────────────────────

#[test]
fn enemies_move_down() {
    let mut s = make_state();
    s.enemies.push(Enemy { x: 10.0, y: 10.0, size: 30.0, speed: 100.0 });
    step(&mut s, &idle(), 0.5);
    assert!((s.enemies[0].y - 60.0).abs() < EPS);
}

#[test]
fn enemy_removed_past_bottom_without_penalty() {
    let mut s = make_state();
    s.enemies.push(Enemy { x: 10.0, y: 595.0, size: 30.0, speed: 100.0 });
    let r = step(&mut s, &idle(), 0.1);
    assert!(s.enemies.is_empty());
    assert_eq!(s.status, GameStatus::Playing);
    assert!(r.outcome.is_none());
}

#[test]
fn spawn_waits_for_interval() {
    let mut s = make_state();
    step(&mut s, &idle(), 0.5);
    assert!(s.enemies.is_empty());
    step(&mut s, &idle(), 0.35);
    assert_eq!(s.enemies.len(), 1);
    assert!((s.spawn_accumulator - 0.05).abs() < EPS);
}

#[test]
fn huge_dt_spawns_at_most_one_enemy() {
    let mut s = make_state();
    s.time_left = 1000.0;
    step(&mut s, &idle(), 30.0);
    assert!(s.enemies.len() <= 1);
    assert!(s.spawn_accumulator < config().spawn_interval);
}

// ── advance: collisions ───────────────────────────────────────────────────────

#[test]
fn bullet_and_enemy_destroy_each_other() {
    let mut s = make_state();
    s.enemies.push(enemy_at(100.0, 100.0, 40.0));
    s.bullets.push(bullet_at(110.0, 110.0));
    let r = step(&mut s, &idle(), 0.0);
    assert!(s.enemies.is_empty());
    assert!(s.bullets.is_empty());
    assert_eq!(r.score, 10);
}

#[test]
fn grazing_bullet_does_not_hit() {
    let mut s = make_state();
    s.enemies.push(enemy_at(100.0, 100.0, 40.0));
    // Overlaps the enemy's right edge by 3 units, inside the buffer.
    s.bullets.push(bullet_at(137.0, 110.0));
    step(&mut s, &idle(), 0.0);
    assert_eq!(s.enemies.len(), 1);
    assert_eq!(s.bullets.len(), 1);
    assert_eq!(s.score, 0);
}

#[test]
fn one_enemy_consumes_only_one_bullet() {
    let mut s = make_state();
    s.enemies.push(enemy_at(100.0, 100.0, 40.0));
    s.bullets.push(bullet_at(110.0, 110.0));
    s.bullets.push(bullet_at(115.0, 112.0));
    step(&mut s, &idle(), 0.0);
    assert!(s.enemies.is_empty());
    assert_eq!(s.bullets.len(), 1);
    // The most recently fired bullet is consumed.
    assert_eq!(s.bullets[0].x, 110.0);
    assert_eq!(s.score, 10);
}

#[test]
fn two_kills_in_one_step_score_twice() {
    let mut s = make_state();
    s.enemies.push(enemy_at(100.0, 100.0, 40.0));
    s.enemies.push(enemy_at(300.0, 100.0, 40.0));
    s.bullets.push(bullet_at(110.0, 110.0));
    s.bullets.push(bullet_at(310.0, 110.0));
    let r = step(&mut s, &idle(), 0.0);
    assert!(s.enemies.is_empty());
    assert!(s.bullets.is_empty());
    assert_eq!(r.score, 20);
}

#[test]
fn enemy_touching_player_ends_round() {
    let mut s = make_state();
    s.score = 50;
    s.enemies.push(enemy_at(380.0, 530.0, 40.0));
    let r = step(&mut s, &idle(), 0.0);
    assert_eq!(s.status, GameStatus::Ended);
    assert_eq!(r.outcome, Some(RoundOutcome { won: false, final_score: 50 }));
}

#[test]
fn shot_enemy_cannot_hit_player() {
    let mut s = make_state();
    s.enemies.push(enemy_at(380.0, 530.0, 40.0));
    s.bullets.push(bullet_at(390.0, 540.0));
    let r = step(&mut s, &idle(), 0.0);
    assert_eq!(s.status, GameStatus::Playing);
    assert_eq!(r.score, 10);
}

#[test]
fn player_hit_stops_collision_pass() {
    let mut s = make_state();
    // Older enemy, lined up with a bullet.
    s.enemies.push(enemy_at(100.0, 100.0, 40.0));
    s.bullets.push(bullet_at(110.0, 110.0));
    // Newer enemy, on top of the player; scanned first.
    s.enemies.push(enemy_at(380.0, 530.0, 40.0));
    let r = step(&mut s, &idle(), 0.0);
    assert_eq!(r.outcome, Some(RoundOutcome { won: false, final_score: 0 }));
    assert_eq!(s.score, 0);
    assert_eq!(s.enemies.len(), 2);
    assert_eq!(s.bullets.len(), 1);
}

// ── advance: win ──────────────────────────────────────────────────────────────

#[test]
fn reaching_win_score_wins() {
    let mut s = make_state();
    s.score = 690;
    s.enemies.push(enemy_at(100.0, 100.0, 40.0));
    s.bullets.push(bullet_at(110.0, 110.0));
    let r = step(&mut s, &idle(), 0.01);
    assert_eq!(s.status, GameStatus::Ended);
    assert_eq!(r.outcome, Some(RoundOutcome { won: true, final_score: 700 }));
}

#[test]
fn player_hit_beats_win_in_same_step() {
    let mut s = make_state();
    s.score = 700;
    s.enemies.push(enemy_at(380.0, 530.0, 40.0));
    let r = step(&mut s, &idle(), 0.0);
    assert_eq!(r.outcome.map(|o| o.won), Some(false));
}

#[test]
fn below_win_score_keeps_playing() {
    let mut s = make_state();
    s.score = 690;
    let r = step(&mut s, &idle(), 0.01);
    assert!(r.outcome.is_none());
    assert_eq!(s.status, GameStatus::Playing);
}
