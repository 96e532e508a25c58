//! Enemy creation.  All randomness comes through the injected RNG.

use rand::Rng;

use crate::config::GameConfig;
use crate::entities::Enemy;

/// Uniform draw from `[lo, hi)`, or `lo` when the range is empty.
fn sample(rng: &mut impl Rng, lo: f32, hi: f32) -> f32 {
    if hi > lo {
        rng.gen_range(lo..hi)
    } else {
        lo
    }
}

/// Build a new enemy just above the top edge and append it to `enemies`.
///
/// The horizontal position keeps the whole enemy inside the viewport; its
/// starting `y` is `-size` so it slides fully into view.
pub fn spawn_enemy(enemies: &mut Vec<Enemy>, config: &GameConfig, rng: &mut impl Rng) {
    let size = sample(rng, config.enemy_min_size, config.enemy_max_size);

    let max_x = (config.viewport_width - size).max(0.0);
    let x = if max_x > 0.0 { rng.gen_range(0.0..=max_x) } else { 0.0 };

    let speed = config.enemy_base_speed + sample(rng, 0.0, config.enemy_speed_jitter);

    log::debug!("spawn enemy size={size:.1} x={x:.1} speed={speed:.1}");
    enemies.push(Enemy { x, y: -size, size, speed });
}
