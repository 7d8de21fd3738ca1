//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick
//! - Seeded RNG only
//! - Stable iteration order (pipes in spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod pipe;
pub mod plane;
pub mod state;
pub mod tick;

pub use autopilot::wants_flap;
pub use pipe::Pipe;
pub use plane::Plane;
pub use state::{GamePhase, GameState};
pub use tick::tick;
