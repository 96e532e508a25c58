//! Render step: a read-only snapshot of what should be on screen.
//!
//! The scene knows nothing about terminals or pixels; a front end walks it
//! and draws whatever shapes it likes.

use crate::entities::{GameState, GameStatus, RoundOutcome};
use crate::geometry::{Bounded, Rect};

pub const START_PROMPT: &str = "Press SPACE to Start";
pub const RESTART_PROMPT: &str = "Press SPACE or R to play again";

#[derive(Clone, Debug, PartialEq)]
pub struct Hud {
    pub score: u32,
    /// Whole seconds left, rounded up.
    pub seconds_left: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EnemyView {
    pub rect: Rect,
    pub size: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub status: GameStatus,
    pub hud: Hud,
    /// `None` before the first round: nothing but the prompt is drawn.
    pub player: Option<Rect>,
    pub bullets: Vec<Rect>,
    pub enemies: Vec<EnemyView>,
    /// Outcome banner, present once its display delay has elapsed.
    pub overlay: Option<RoundOutcome>,
    pub prompt: Option<&'static str>,
}

impl Scene {
    /// Banner text for the overlay, if one is showing.
    pub fn overlay_message(&self) -> Option<String> {
        self.overlay.map(|o| {
            if o.won {
                format!("You win! Score: {}", o.final_score)
            } else {
                format!("Game over! Score: {}", o.final_score)
            }
        })
    }
}

/// Build the scene for the current state.
///
/// Entities are hidden on the start screen and frozen in place once the
/// round has ended, so the last frame of action stays visible under the
/// outcome banner.
pub fn draw(state: &GameState, overlay: Option<RoundOutcome>) -> Scene {
    let hud = Hud {
        score: state.score,
        seconds_left: state.display_seconds(),
    };

    if state.status == GameStatus::Start {
        return Scene {
            status: state.status,
            hud,
            player: None,
            bullets: Vec::new(),
            enemies: Vec::new(),
            overlay: None,
            prompt: Some(START_PROMPT),
        };
    }

    let prompt = match (state.status, overlay) {
        (GameStatus::Ended, Some(_)) => Some(RESTART_PROMPT),
        _ => None,
    };

    Scene {
        status: state.status,
        hud,
        player: Some(state.player.bounds()),
        bullets: state.bullets.iter().map(|b| b.bounds()).collect(),
        enemies: state
            .enemies
            .iter()
            .map(|e| EnemyView {
                rect: e.bounds(),
                size: e.size,
            })
            .collect(),
        overlay,
        prompt,
    }
}
