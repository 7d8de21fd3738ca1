//! Demo mode: a simple controller that plays the game

use super::state::{GamePhase, GameState};
use crate::consts::HITBOX_HALF_WIDTH;

/// How far below the target the plane may sink before flapping
const FLAP_SLACK: f32 = 15.0;

/// Height the autopilot steers toward
///
/// The gap center of the first pipe the plane's hit box hasn't cleared yet,
/// or mid-canvas when the sky ahead is empty.
pub fn target_y(state: &GameState) -> f32 {
    let tail = state.plane.pos.x - HITBOX_HALF_WIDTH;
    state
        .pipes
        .iter()
        .find(|p| p.trailing_edge() >= tail)
        .map(|p| p.top + p.gap / 2.0)
        .unwrap_or(state.tuning.canvas_height / 2.0)
}

/// Whether the autopilot would flap this tick
///
/// Flaps only while falling, so one flap plays out before the next.
pub fn wants_flap(state: &GameState) -> bool {
    state.phase == GamePhase::Running
        && state.plane.velocity > 0.0
        && state.plane.pos.y > target_y(state) + FLAP_SLACK
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Pipe;
    use crate::tuning::Tuning;

    fn falling_at(y: f32) -> GameState {
        let mut state = GameState::new(1, Tuning::default());
        state.plane.pos.y = y;
        state.plane.velocity = 1.0;
        state
    }

    #[test]
    fn test_empty_sky_targets_mid_canvas() {
        let state = falling_at(300.0);
        assert_eq!(target_y(&state), 300.0);
        assert!(!wants_flap(&state));
        assert!(wants_flap(&falling_at(320.0)));
    }

    #[test]
    fn test_never_flaps_while_rising() {
        let mut state = falling_at(500.0);
        state.plane.velocity = -1.0;
        assert!(!wants_flap(&state));
    }

    #[test]
    fn test_targets_next_uncleared_pipe() {
        let mut state = falling_at(200.0);
        let mut cleared = Pipe::with_top(&state.tuning, 350.0);
        cleared.x = state.plane.pos.x - HITBOX_HALF_WIDTH - cleared.width - 5.0;
        let ahead = Pipe::with_top(&state.tuning, 100.0);
        state.pipes.push(cleared);
        state.pipes.push(ahead);

        assert_eq!(target_y(&state), 175.0);
        assert!(wants_flap(&state));
    }

    #[test]
    fn test_idle_after_game_over() {
        let mut state = falling_at(550.0);
        state.phase = GamePhase::GameOver;
        assert!(!wants_flap(&state));
    }
}
