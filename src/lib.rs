//! Flappy Plane - a side-scrolling arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, pipes, collisions, scoring)
//! - `game`: Fixed timestep driver pairing each update with a render
//! - `renderer`: Drawing surface abstraction and WebGPU pipeline
//! - `tuning`: Data-driven game constants

pub mod game;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use game::Game;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one tick per 60 Hz animation frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Longest frame delta accepted before clamping (tab switches, debugger stalls)
    pub const MAX_FRAME_DT: f32 = 0.1;

    // Logical canvas dimensions
    pub const CANVAS_WIDTH: f32 = 400.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    // Plane physics (per tick)
    pub const GRAVITY: f32 = 0.25;
    pub const LIFT: f32 = -6.0;

    // Plane collision box half extents, shared by every pipe test
    pub const HITBOX_HALF_WIDTH: f32 = 20.0;
    pub const HITBOX_HALF_HEIGHT: f32 = 10.0;

    // Pipe defaults
    pub const PIPE_WIDTH: f32 = 50.0;
    pub const PIPE_GAP: f32 = 150.0;
    /// Minimum distance between the gap and the top/bottom canvas edges
    pub const PIPE_MARGIN: f32 = 50.0;
    /// Leftward scroll per tick
    pub const PIPE_SPEED: f32 = 2.0;
    /// Ticks between pipe spawns
    pub const SPAWN_INTERVAL: u64 = 120;
}
