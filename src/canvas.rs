//! The primitive-call seam between the interpreter and render targets.
//!
//! The interpreter never touches geometry storage directly; it drives a
//! [`DrawingSurface`] one primitive at a time. [`PathCanvas`] is the standard
//! implementation, recording pen-down motion as a [`Drawing`] of colored
//! polylines. Implement the trait yourself to target anything else (a live
//! canvas, a plotter, a test recorder).

use crate::drawing::{Drawing, Polyline};
use crate::turtle::TurtleState;
use glam::Vec2;

/// Drawing primitives a render target must expose.
///
/// The surface owns the cursor pose: it applies motion and answers pose
/// queries, exactly like a turtle-graphics canvas. The caller is responsible
/// for presenting a fresh (or [`clear`](DrawingSurface::clear)ed) surface to
/// each interpretation walk.
pub trait DrawingSurface {
    /// Moves the cursor `distance` along its heading, drawing a segment while
    /// the pen is down.
    fn move_forward(&mut self, distance: f32);

    /// Lifts the pen; subsequent motion leaves no trace.
    fn pen_up(&mut self);

    /// Lowers the pen.
    fn pen_down(&mut self);

    /// Turns the cursor counterclockwise by `degrees`.
    fn turn_left(&mut self, degrees: f32);

    /// Turns the cursor clockwise by `degrees`.
    fn turn_right(&mut self, degrees: f32);

    /// Points the cursor at an absolute heading in degrees.
    fn set_heading(&mut self, degrees: f32);

    /// Current cursor position.
    fn position(&self) -> Vec2;

    /// Current heading in degrees.
    fn heading(&self) -> f32;

    /// Moves the cursor to an absolute position, drawing while the pen is
    /// down; the heading is unchanged.
    fn goto(&mut self, position: Vec2);

    /// Selects the palette index for subsequent strokes.
    fn set_color(&mut self, color: usize);

    /// Discards everything drawn so far and returns the cursor to the origin
    /// (heading 0, pen down, color 0).
    fn clear(&mut self);
}

/// A [`DrawingSurface`] that records pen-down motion as colored polylines.
///
/// Consecutive pen-down moves extend one open stroke; lifting the pen or
/// changing color closes it. [`finish`](PathCanvas::finish) closes the last
/// stroke and hands back the accumulated [`Drawing`].
#[derive(Clone, Debug, Default)]
pub struct PathCanvas {
    state: TurtleState,
    color: usize,
    current: Vec<Vec2>,
    drawing: Drawing,
}

impl PathCanvas {
    /// Creates an empty canvas with the cursor at the origin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the pen currently draws.
    pub fn pen_is_down(&self) -> bool {
        self.state.pen_down
    }

    /// Palette index of the current stroke color.
    pub fn color(&self) -> usize {
        self.color
    }

    /// Closes the open stroke and returns everything recorded.
    pub fn finish(mut self) -> Drawing {
        self.flush();
        self.drawing
    }

    /// Ends the open stroke, keeping it only when it has at least one segment.
    fn flush(&mut self) {
        if self.current.len() >= 2 {
            self.drawing.add_path(Polyline {
                color: self.color,
                points: std::mem::take(&mut self.current),
            });
        } else {
            self.current.clear();
        }
    }

    /// Extends the open stroke to `to`, starting it at the current position
    /// when no stroke is open.
    fn trace_to(&mut self, to: Vec2) {
        if self.current.is_empty() {
            self.current.push(self.state.position);
        }
        self.current.push(to);
    }
}

impl DrawingSurface for PathCanvas {
    fn move_forward(&mut self, distance: f32) {
        let target = self.state.position + self.state.heading_vec() * distance;
        if self.state.pen_down {
            self.trace_to(target);
        }
        self.state.position = target;
    }

    fn pen_up(&mut self) {
        if self.state.pen_down {
            self.flush();
            self.state.pen_down = false;
        }
    }

    fn pen_down(&mut self) {
        self.state.pen_down = true;
    }

    fn turn_left(&mut self, degrees: f32) {
        self.state.turn_left(degrees);
    }

    fn turn_right(&mut self, degrees: f32) {
        self.state.turn_right(degrees);
    }

    fn set_heading(&mut self, degrees: f32) {
        self.state.heading = degrees;
    }

    fn position(&self) -> Vec2 {
        self.state.position
    }

    fn heading(&self) -> f32 {
        self.state.heading
    }

    fn goto(&mut self, position: Vec2) {
        if self.state.pen_down {
            self.trace_to(position);
        }
        self.state.position = position;
    }

    fn set_color(&mut self, color: usize) {
        if color != self.color {
            self.flush();
            self.color = color;
        }
    }

    fn clear(&mut self) {
        self.drawing = Drawing::new();
        self.current.clear();
        self.state = TurtleState::default();
        self.color = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pen_down_moves_accumulate_one_stroke() {
        let mut canvas = PathCanvas::new();
        canvas.move_forward(1.0);
        canvas.turn_left(90.0);
        canvas.move_forward(1.0);
        let drawing = canvas.finish();
        assert_eq!(drawing.len(), 1);
        assert_eq!(
            drawing.paths[0].points,
            vec![Vec2::ZERO, Vec2::X, Vec2::new(1.0, 1.0)]
        );
    }

    #[test]
    fn pen_up_travel_splits_strokes() {
        let mut canvas = PathCanvas::new();
        canvas.move_forward(1.0);
        canvas.pen_up();
        canvas.move_forward(1.0);
        canvas.pen_down();
        canvas.move_forward(1.0);
        let drawing = canvas.finish();
        assert_eq!(drawing.len(), 2);
        assert_eq!(drawing.paths[0].points, vec![Vec2::ZERO, Vec2::X]);
        assert_eq!(
            drawing.paths[1].points,
            vec![Vec2::new(2.0, 0.0), Vec2::new(3.0, 0.0)]
        );
    }

    #[test]
    fn goto_draws_only_while_pen_down() {
        let mut canvas = PathCanvas::new();
        canvas.goto(Vec2::new(0.0, 2.0));
        canvas.pen_up();
        canvas.goto(Vec2::ZERO);
        let drawing = canvas.finish();
        assert_eq!(drawing.len(), 1);
        assert_eq!(drawing.paths[0].points, vec![Vec2::ZERO, Vec2::new(0.0, 2.0)]);
    }

    #[test]
    fn color_change_closes_the_stroke_and_keeps_the_shared_vertex() {
        let mut canvas = PathCanvas::new();
        canvas.move_forward(1.0);
        canvas.set_color(1);
        canvas.move_forward(1.0);
        let drawing = canvas.finish();
        assert_eq!(drawing.len(), 2);
        assert_eq!(drawing.paths[0].color, 0);
        assert_eq!(drawing.paths[1].color, 1);
        // The new stroke starts where the old one ended.
        assert_eq!(drawing.paths[0].points[1], drawing.paths[1].points[0]);
    }

    #[test]
    fn redundant_color_change_does_not_split() {
        let mut canvas = PathCanvas::new();
        canvas.set_color(0);
        canvas.move_forward(1.0);
        canvas.set_color(0);
        canvas.move_forward(1.0);
        assert_eq!(canvas.finish().len(), 1);
    }

    #[test]
    fn strokes_without_motion_are_dropped() {
        let mut canvas = PathCanvas::new();
        canvas.pen_up();
        canvas.move_forward(5.0);
        canvas.pen_down();
        canvas.turn_left(45.0);
        let drawing = canvas.finish();
        assert!(drawing.is_empty());
    }

    #[test]
    fn clear_resets_geometry_and_cursor() {
        let mut canvas = PathCanvas::new();
        canvas.set_color(3);
        canvas.turn_left(30.0);
        canvas.move_forward(4.0);
        canvas.clear();
        assert_eq!(canvas.position(), Vec2::ZERO);
        assert_eq!(canvas.heading(), 0.0);
        assert!(canvas.pen_is_down());
        assert_eq!(canvas.color(), 0);
        assert!(canvas.finish().is_empty());
    }
}
