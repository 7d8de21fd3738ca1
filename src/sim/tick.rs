//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use super::state::{GamePhase, GameState};

/// Advance the game state by one tick
///
/// Order matters and is observable:
/// 1. plane physics
/// 2. frame counter and pipe spawning
/// 3. per pipe, in order: scroll, collision, scoring, despawn
/// 4. canvas floor/ceiling check
///
/// A collision latches game over but the remaining pipes are still scrolled,
/// scored and despawned in the same tick.
pub fn tick(state: &mut GameState) {
    if state.phase == GamePhase::GameOver {
        return;
    }

    state.plane.integrate();

    state.frame_count += 1;
    if state.frame_count % state.tuning.spawn_interval == 0 {
        state.spawn_pipe();
    }

    let speed = state.tuning.pipe_speed;
    let plane = &state.plane;
    let mut crashed = false;
    let mut scored = 0;
    state.pipes.retain_mut(|pipe| {
        pipe.advance(speed);

        if pipe.collides_with(plane) {
            crashed = true;
        }

        if !pipe.scored && pipe.is_passed_by(plane) {
            pipe.scored = true;
            scored += 1;
        }

        !pipe.is_offscreen()
    });
    state.score += scored;

    let y = state.plane.pos.y;
    if y < 0.0 || y > state.tuning.canvas_height {
        crashed = true;
    }

    if crashed {
        state.phase = GamePhase::GameOver;
        log::info!(
            "Game over at frame {} with score {}",
            state.frame_count,
            state.score
        );
    }
}
