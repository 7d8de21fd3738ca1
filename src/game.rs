//! Frame driver
//!
//! Owns the game state and turns wall-clock frame deltas into fixed
//! simulation ticks. Embedders (the browser loop, the native runner, tests)
//! construct one `Game` and feed it frames and activations.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::renderer::{Surface, draw};
use crate::sim::{self, GameState};
use crate::tuning::Tuning;

pub struct Game {
    state: GameState,
    accumulator: f32,
    autopilot: bool,
}

impl Game {
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        log::info!("Game initialized with seed: {}", seed);
        Self {
            state: GameState::new(seed, tuning),
            accumulator: 0.0,
            autopilot: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    /// Click/tap/key press: flap, or restart after a game over
    pub fn activate(&mut self) {
        self.state.activate();
    }

    pub fn autopilot(&self) -> bool {
        self.autopilot
    }

    pub fn set_autopilot(&mut self, enabled: bool) {
        self.autopilot = enabled;
        log::info!("Autopilot: {}", enabled);
    }

    /// Run exactly one simulation step
    pub fn update(&mut self) {
        if self.autopilot && sim::wants_flap(&self.state) {
            self.state.activate();
        }
        sim::tick(&mut self.state);
    }

    /// Draw the current state; never mutates it
    pub fn render<S: Surface>(&self, surface: &mut S) {
        draw(&self.state, surface);
    }

    /// One update followed by one render
    pub fn tick<S: Surface>(&mut self, surface: &mut S) {
        self.update();
        self.render(surface);
    }

    /// Run as many fixed steps as `dt` seconds of wall clock cover
    ///
    /// Returns the number of steps taken. Long stalls are clamped and the
    /// step count per call is capped.
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.update();
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        substeps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::VertexBatch;
    use crate::sim::GamePhase;

    fn new_game() -> Game {
        Game::new(2024, Tuning::default())
    }

    #[test]
    fn test_tick_updates_then_renders() {
        let mut game = new_game();
        let mut batch = VertexBatch::new();
        game.tick(&mut batch);
        assert_eq!(game.state().frame_count, 1);
        assert_eq!(game.state().plane.pos.y, 300.25);
        assert!(!batch.vertices().is_empty());
    }

    #[test]
    fn test_one_step_per_frame_at_60hz() {
        let mut game = new_game();
        for _ in 0..3 {
            assert_eq!(game.advance(SIM_DT), 1);
        }
        assert_eq!(game.state().frame_count, 3);
    }

    #[test]
    fn test_short_frames_accumulate() {
        let mut game = new_game();
        assert_eq!(game.advance(SIM_DT / 2.0), 0);
        assert_eq!(game.advance(SIM_DT / 2.0), 1);
    }

    #[test]
    fn test_stall_is_capped() {
        let mut game = new_game();
        assert_eq!(game.advance(5.0), MAX_SUBSTEPS);
        assert_eq!(game.state().frame_count, MAX_SUBSTEPS as u64);
    }

    #[test]
    fn test_negative_dt_ignored() {
        let mut game = new_game();
        assert_eq!(game.advance(-1.0), 0);
        assert_eq!(game.state().frame_count, 0);
    }

    #[test]
    fn test_activation_round_trip() {
        let mut game = new_game();
        game.activate();
        assert_eq!(game.state().plane.velocity, -6.0);

        // Dive into the floor
        while !game.is_game_over() {
            game.update();
        }
        assert_eq!(game.state().phase, GamePhase::GameOver);

        game.activate();
        assert!(!game.is_game_over());
        assert_eq!(game.score(), 0);
        assert_eq!(game.state().frame_count, 0);
    }

    #[test]
    fn test_autopilot_keeps_plane_up_in_empty_sky() {
        let mut game = new_game();
        game.set_autopilot(true);
        // Before the first pipe spawns the target is mid-canvas
        for _ in 0..110 {
            game.update();
        }
        assert!(!game.is_game_over());
        let y = game.state().plane.pos.y;
        assert!(y > 200.0 && y < 340.0, "plane drifted to {}", y);
    }
}
