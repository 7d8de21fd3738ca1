//! Game state and core simulation types

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::pipe::Pipe;
use super::plane::Plane;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Run ended; only an activation (which resets) does anything
    GameOver,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Constants this run was started with
    pub tuning: Tuning,
    /// Player plane
    pub plane: Plane,
    /// Active pipes, oldest (leftmost) first
    pub pipes: Vec<Pipe>,
    /// Pipes flown past this run
    pub score: u32,
    /// Running ticks since the last reset
    pub frame_count: u64,
    /// Current phase
    pub phase: GamePhase,
    /// Drives pipe gap placement; carried across resets
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            plane: Plane::new(&tuning),
            pipes: Vec::new(),
            score: 0,
            frame_count: 0,
            phase: GamePhase::Running,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
        }
    }

    /// Start over with a fresh plane and an empty sky
    pub fn reset(&mut self) {
        self.plane = Plane::new(&self.tuning);
        self.pipes.clear();
        self.score = 0;
        self.frame_count = 0;
        self.phase = GamePhase::Running;
    }

    /// Handle a click/tap/key press
    ///
    /// Flaps while running; restarts the run after a game over.
    pub fn activate(&mut self) {
        match self.phase {
            GamePhase::Running => self.plane.apply_impulse(),
            GamePhase::GameOver => {
                log::info!("Restarting after game over (score {})", self.score);
                self.reset();
            }
        }
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Spawn a pipe with a random gap at the right edge
    pub(crate) fn spawn_pipe(&mut self) {
        let pipe = Pipe::spawn(&self.tuning, &mut self.rng);
        log::debug!("Pipe spawned at frame {} (gap top {})", self.frame_count, pipe.top);
        self.pipes.push(pipe);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_running_and_empty() {
        let state = GameState::new(7, Tuning::default());
        assert_eq!(state.phase, GamePhase::Running);
        assert!(state.pipes.is_empty());
        assert_eq!(state.score, 0);
        assert_eq!(state.frame_count, 0);
        assert_eq!(state.plane, Plane::new(&Tuning::default()));
    }

    #[test]
    fn test_activate_while_running_flaps() {
        let mut state = GameState::new(7, Tuning::default());
        state.plane.velocity = 3.0;
        state.activate();
        assert_eq!(state.plane.velocity, -6.0);
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_activate_after_game_over_resets() {
        let mut state = GameState::new(7, Tuning::default());
        state.spawn_pipe();
        state.score = 4;
        state.frame_count = 500;
        state.plane.pos.y = 650.0;
        state.plane.velocity = 9.0;
        state.phase = GamePhase::GameOver;

        state.activate();

        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.frame_count, 0);
        assert!(state.pipes.is_empty());
        assert_eq!(state.plane, Plane::new(&state.tuning));
    }

    #[test]
    fn test_same_seed_same_pipes() {
        let mut a = GameState::new(99999, Tuning::default());
        let mut b = GameState::new(99999, Tuning::default());
        for _ in 0..5 {
            a.spawn_pipe();
            b.spawn_pipe();
        }
        assert_eq!(a.pipes, b.pipes);
    }
}
