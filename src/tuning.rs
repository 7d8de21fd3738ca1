//! Game tuning values
//!
//! Every physical constant of a run lives here so a page (or the native
//! runner) can override them with a JSON document. Missing fields fall back
//! to the classic values in [`crate::consts`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Why a tuning document was rejected
#[derive(Debug)]
pub enum TuningError {
    /// The document is not valid JSON for [`Tuning`]
    Parse(serde_json::Error),
    /// A value is outside the range the simulation can run with
    Invalid(&'static str),
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Parse(e) => write!(f, "malformed tuning: {}", e),
            TuningError::Invalid(reason) => write!(f, "invalid tuning: {}", reason),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Parse(e) => Some(e),
            TuningError::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Parse(e)
    }
}

/// Physical constants for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Canvas ===
    pub canvas_width: f32,
    pub canvas_height: f32,

    // === Plane ===
    /// Added to the plane's vertical velocity every tick
    pub gravity: f32,
    /// Velocity the plane is set to on each flap (negative is up)
    pub lift: f32,

    // === Pipes ===
    pub pipe_width: f32,
    /// Height of the opening between the top and bottom pipe
    pub pipe_gap: f32,
    /// Minimum distance between the opening and either canvas edge
    pub pipe_margin: f32,
    /// Leftward movement per tick
    pub pipe_speed: f32,
    /// Ticks between spawns
    pub spawn_interval: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,

            gravity: GRAVITY,
            lift: LIFT,

            pipe_width: PIPE_WIDTH,
            pipe_gap: PIPE_GAP,
            pipe_margin: PIPE_MARGIN,
            pipe_speed: PIPE_SPEED,
            spawn_interval: SPAWN_INTERVAL,
        }
    }
}

impl Tuning {
    /// Parse a JSON override and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values that would make the simulation degenerate
    pub fn validate(&self) -> Result<(), TuningError> {
        if !(self.canvas_width > 0.0 && self.canvas_height > 0.0) {
            return Err(TuningError::Invalid("canvas dimensions must be positive"));
        }
        if !(self.gravity > 0.0) {
            return Err(TuningError::Invalid("gravity must be positive"));
        }
        if !(self.lift < 0.0) {
            return Err(TuningError::Invalid("lift must be negative"));
        }
        if !(self.pipe_width > 0.0 && self.pipe_gap > 0.0) {
            return Err(TuningError::Invalid("pipe width and gap must be positive"));
        }
        if !(self.pipe_margin >= 0.0) {
            return Err(TuningError::Invalid("pipe margin must not be negative"));
        }
        if !(self.pipe_speed > 0.0) {
            return Err(TuningError::Invalid("pipe speed must be positive"));
        }
        if self.spawn_interval == 0 {
            return Err(TuningError::Invalid("spawn interval must be at least one tick"));
        }
        if !(self.pipe_gap + 2.0 * self.pipe_margin < self.canvas_height) {
            return Err(TuningError::Invalid(
                "pipe gap plus both margins must fit inside the canvas",
            ));
        }
        Ok(())
    }

    /// Range of valid gap top edges: `[margin, canvas_height - gap - margin)`
    pub fn gap_top_range(&self) -> std::ops::Range<f32> {
        self.pipe_margin..(self.canvas_height - self.pipe_gap - self.pipe_margin)
    }

    /// Canvas attribute holding an optional JSON override
    #[cfg(target_arch = "wasm32")]
    const CANVAS_ATTRIBUTE: &'static str = "data-tuning";

    /// Load tuning from the canvas `data-tuning` attribute (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load(canvas: &web_sys::HtmlCanvasElement) -> Self {
        if let Some(json) = canvas.get_attribute(Self::CANVAS_ATTRIBUTE) {
            match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from canvas attribute");
                    return tuning;
                }
                Err(e) => log::warn!("Ignoring canvas tuning: {}", e),
            }
        }

        log::info!("Using default tuning");
        Self::default()
    }
}
