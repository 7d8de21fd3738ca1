//! Scene drawing
//!
//! `draw` walks the game state and issues primitive draw calls against a
//! [`Surface`] in canvas coordinates (origin top-left, y down). It never
//! mutates the state.

use glam::Vec2;
use std::f32::consts::TAU;

use super::shapes;
use super::vertex::{Color, Vertex, colors};
use crate::sim::{GameState, Pipe, Plane};

/// Segments used to tessellate a full circle
const CIRCLE_SEGMENTS: u32 = 16;

/// A 2D drawing target addressed in canvas coordinates
pub trait Surface {
    /// Erase everything drawn so far
    fn clear(&mut self);
    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Color);
    /// Fill a convex polygon
    fn fill_polygon(&mut self, points: &[Vec2], color: Color);
    fn fill_arc(&mut self, center: Vec2, radius: f32, start_angle: f32, end_angle: f32, color: Color);
}

/// Collects draw calls as a triangle list for the GPU pipeline
#[derive(Debug, Default)]
pub struct VertexBatch {
    vertices: Vec<Vertex>,
}

impl VertexBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }
}

impl Surface for VertexBatch {
    fn clear(&mut self) {
        self.vertices.clear();
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Color) {
        self.vertices.extend(shapes::rect(origin, size, color));
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
        self.vertices.extend(shapes::polygon(points, color));
    }

    fn fill_arc(&mut self, center: Vec2, radius: f32, start_angle: f32, end_angle: f32, color: Color) {
        self.vertices.extend(shapes::sector(
            center,
            radius,
            start_angle,
            end_angle,
            color,
            CIRCLE_SEGMENTS,
        ));
    }
}

/// Render the whole frame: clear, pipes in spawn order, then the plane on top
pub fn draw<S: Surface>(state: &GameState, surface: &mut S) {
    surface.clear();

    for pipe in &state.pipes {
        draw_pipe(pipe, state.tuning.canvas_height, surface);
    }

    draw_plane(&state.plane, surface);
}

/// Top band from the ceiling to the gap, bottom band from the gap to the floor
fn draw_pipe<S: Surface>(pipe: &Pipe, canvas_height: f32, surface: &mut S) {
    surface.fill_rect(
        Vec2::new(pipe.x, 0.0),
        Vec2::new(pipe.width, pipe.top),
        colors::PIPE,
    );
    let bottom = pipe.bottom();
    surface.fill_rect(
        Vec2::new(pipe.x, bottom),
        Vec2::new(pipe.width, canvas_height - bottom),
        colors::PIPE,
    );
}

/// Side view of a small plane facing right
fn draw_plane<S: Surface>(plane: &Plane, surface: &mut S) {
    let at = |dx: f32, dy: f32| plane.pos + Vec2::new(dx, dy);

    // Fuselage
    surface.fill_polygon(
        &[at(-20.0, 0.0), at(20.0, 0.0), at(15.0, 5.0), at(-15.0, 5.0)],
        colors::FUSELAGE,
    );
    // Main wing
    surface.fill_polygon(
        &[at(-15.0, 0.0), at(5.0, 0.0), at(0.0, -15.0), at(-20.0, -10.0)],
        colors::WING,
    );
    // Tail fin
    surface.fill_polygon(
        &[at(-15.0, 0.0), at(-20.0, -8.0), at(-15.0, -8.0)],
        colors::WING,
    );
    // Cockpit
    surface.fill_arc(at(5.0, -2.0), 3.0, 0.0, TAU, colors::COCKPIT);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    /// Records draw calls instead of drawing
    #[derive(Debug, PartialEq)]
    enum Call {
        Clear,
        Rect(Vec2, Vec2, Color),
        Polygon(Vec<Vec2>, Color),
        Arc(Vec2, f32, Color),
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call>,
    }

    impl Surface for Recorder {
        fn clear(&mut self) {
            self.calls.push(Call::Clear);
        }

        fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Color) {
            self.calls.push(Call::Rect(origin, size, color));
        }

        fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
            self.calls.push(Call::Polygon(points.to_vec(), color));
        }

        fn fill_arc(&mut self, center: Vec2, radius: f32, _start: f32, _end: f32, color: Color) {
            self.calls.push(Call::Arc(center, radius, color));
        }
    }

    #[test]
    fn test_empty_sky_draws_only_plane() {
        let state = GameState::new(3, Tuning::default());
        let mut recorder = Recorder::default();
        draw(&state, &mut recorder);

        assert_eq!(recorder.calls.len(), 5);
        assert_eq!(recorder.calls[0], Call::Clear);
        assert!(matches!(&recorder.calls[4], Call::Arc(_, r, c) if *r == 3.0 && *c == colors::COCKPIT));
    }

    #[test]
    fn test_pipes_in_order_then_plane_on_top() {
        let mut state = GameState::new(3, Tuning::default());
        let mut first = Pipe::with_top(&state.tuning, 100.0);
        first.x = 120.0;
        let second = Pipe::with_top(&state.tuning, 300.0);
        state.pipes.push(first);
        state.pipes.push(second);

        let mut recorder = Recorder::default();
        draw(&state, &mut recorder);

        assert_eq!(recorder.calls[0], Call::Clear);
        assert_eq!(
            recorder.calls[1],
            Call::Rect(Vec2::new(120.0, 0.0), Vec2::new(50.0, 100.0), colors::PIPE)
        );
        assert_eq!(
            recorder.calls[2],
            Call::Rect(Vec2::new(120.0, 250.0), Vec2::new(50.0, 350.0), colors::PIPE)
        );
        assert_eq!(
            recorder.calls[3],
            Call::Rect(Vec2::new(400.0, 0.0), Vec2::new(50.0, 300.0), colors::PIPE)
        );
        assert_eq!(
            recorder.calls[4],
            Call::Rect(Vec2::new(400.0, 450.0), Vec2::new(50.0, 150.0), colors::PIPE)
        );
        assert!(recorder.calls[5..]
            .iter()
            .all(|c| matches!(c, Call::Polygon(..) | Call::Arc(..))));
    }

    #[test]
    fn test_plane_art_follows_position() {
        let mut state = GameState::new(3, Tuning::default());
        state.plane.pos = Vec2::new(100.0, 200.0);
        let mut recorder = Recorder::default();
        draw(&state, &mut recorder);

        match &recorder.calls[1] {
            Call::Polygon(points, color) => {
                assert_eq!(*color, colors::FUSELAGE);
                assert_eq!(points[0], Vec2::new(80.0, 200.0));
                assert_eq!(points[1], Vec2::new(120.0, 200.0));
            }
            other => panic!("expected fuselage, got {:?}", other),
        }
        assert_eq!(recorder.calls[4], Call::Arc(Vec2::new(105.0, 198.0), 3.0, colors::COCKPIT));
    }

    #[test]
    fn test_vertex_batch_clears_between_frames() {
        let state = GameState::new(3, Tuning::default());
        let mut batch = VertexBatch::new();
        draw(&state, &mut batch);
        let first = batch.vertices().len();
        draw(&state, &mut batch);
        assert_eq!(batch.vertices().len(), first);
        // 2 + 2 + 1 fan triangles plus the cockpit circle
        assert_eq!(first, (2 + 2 + 1) * 3 + CIRCLE_SEGMENTS as usize * 3);
    }
}
