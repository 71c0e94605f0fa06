//! Turtle state and operations for curve interpretation.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// The state of the drawing turtle.
///
/// Tracks the cursor pose and whether forward motion leaves a trace. One
/// instance lives inside each [`DrawingSurface`](crate::DrawingSurface)
/// implementation; interpretation walks never share one.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurtleState {
    /// Current world-space position of the cursor.
    pub position: Vec2,

    /// Current heading in degrees. 0 points along +x, 90 along +y,
    /// counterclockwise positive. Headings accept any real value and are not
    /// normalized into [0, 360).
    pub heading: f32,

    /// Whether forward motion draws a segment.
    pub pen_down: bool,
}

impl Default for TurtleState {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            heading: 0.0,
            pen_down: true,
        }
    }
}

impl TurtleState {
    /// Unit vector along the current heading.
    pub fn heading_vec(&self) -> Vec2 {
        let radians = self.heading.to_radians();
        Vec2::new(radians.cos(), radians.sin())
    }

    /// Advances the cursor by `distance` along its heading.
    pub fn forward(&mut self, distance: f32) {
        self.position += self.heading_vec() * distance;
    }

    /// Rotates counterclockwise by `degrees`.
    pub fn turn_left(&mut self, degrees: f32) {
        self.heading += degrees;
    }

    /// Rotates clockwise by `degrees`.
    pub fn turn_right(&mut self, degrees: f32) {
        self.heading -= degrees;
    }

    /// Snapshot of the pose for the branch stack.
    pub fn pose(&self) -> PoseSnapshot {
        PoseSnapshot {
            position: self.position,
            heading: self.heading,
        }
    }
}

/// A saved (position, heading) pair.
///
/// Pen state and color are deliberately absent: `]` restores only the pose,
/// the color index keeps counting across branches.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PoseSnapshot {
    pub position: Vec2,
    pub heading: f32,
}

/// LIFO stack of turtle poses, driven by the `[` and `]` symbols.
///
/// Every `]` must be matched by a prior unmatched `[`; the interpreter treats
/// a pop on an empty stack as fatal (see
/// [`MalformedSequence`](crate::MalformedSequence)), so `pop` reports the
/// condition instead of masking it.
#[derive(Clone, Debug, Default)]
pub struct StateStack {
    frames: Vec<PoseSnapshot>,
}

impl StateStack {
    /// Creates an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Saves a pose.
    pub fn push(&mut self, pose: PoseSnapshot) {
        self.frames.push(pose);
    }

    /// Restores the most recently saved pose, or `None` when nothing is saved.
    pub fn pop(&mut self) -> Option<PoseSnapshot> {
        self.frames.pop()
    }

    /// True when nothing is saved.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Number of saved poses.
    pub fn len(&self) -> usize {
        self.frames.len()
    }
}

/// Operations the turtle can perform, one per recognized symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurtleOp {
    /// Move forward one step, drawing while the pen is down (`F`, `G`, `R`, `L`).
    Move,
    /// Move forward one step with the pen lifted (`f`).
    InvisibleMove,
    /// Turn counterclockwise by the angle increment (`+`).
    TurnLeft,
    /// Turn clockwise by the angle increment (`-`).
    TurnRight,
    /// Save (position, heading) onto the branch stack (`[`).
    Push,
    /// Restore the most recently saved (position, heading) (`]`).
    Pop,
    /// Advance to the next palette color, wrapping around (`c`).
    CycleColor,
    /// No drawing meaning; the symbol only matters during derivation.
    Ignore,
}

impl TurtleOp {
    /// Resolves a symbol to its operation.
    ///
    /// Unrecognized symbols map to [`TurtleOp::Ignore`], so rule alphabets may
    /// contain pure rewrite markers (`X`, `Y`, ...) that the turtle skips.
    pub fn from_symbol(symbol: char) -> Self {
        match symbol {
            'F' | 'G' | 'R' | 'L' => Self::Move,
            'f' => Self::InvisibleMove,
            '+' => Self::TurnLeft,
            '-' => Self::TurnRight,
            '[' => Self::Push,
            ']' => Self::Pop,
            'c' => Self::CycleColor,
            _ => Self::Ignore,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: Vec2, expected: Vec2) {
        assert!(
            (actual - expected).length() < 1e-5,
            "expected {expected:?}, got {actual:?}"
        );
    }

    #[test]
    fn default_turtle_faces_east_with_pen_down() {
        let turtle = TurtleState::default();
        assert_eq!(turtle.position, Vec2::ZERO);
        assert_eq!(turtle.heading, 0.0);
        assert!(turtle.pen_down);
        assert_close(turtle.heading_vec(), Vec2::X);
    }

    #[test]
    fn heading_vec_follows_degrees_counterclockwise() {
        let mut turtle = TurtleState::default();
        turtle.heading = 90.0;
        assert_close(turtle.heading_vec(), Vec2::Y);
        turtle.heading = 180.0;
        assert_close(turtle.heading_vec(), -Vec2::X);
        turtle.heading = -90.0;
        assert_close(turtle.heading_vec(), -Vec2::Y);
    }

    #[test]
    fn forward_moves_along_heading() {
        let mut turtle = TurtleState::default();
        turtle.turn_left(60.0);
        turtle.forward(2.0);
        assert_close(
            turtle.position,
            Vec2::new(2.0 * 60f32.to_radians().cos(), 2.0 * 60f32.to_radians().sin()),
        );
    }

    #[test]
    fn turns_accumulate_without_wrapping() {
        let mut turtle = TurtleState::default();
        for _ in 0..5 {
            turtle.turn_left(90.0);
        }
        assert_eq!(turtle.heading, 450.0);
        turtle.turn_right(500.0);
        assert_eq!(turtle.heading, -50.0);
    }

    #[test]
    fn stack_is_lifo() {
        let mut stack = StateStack::new();
        assert!(stack.is_empty());
        let a = PoseSnapshot {
            position: Vec2::new(1.0, 0.0),
            heading: 0.0,
        };
        let b = PoseSnapshot {
            position: Vec2::new(0.0, 1.0),
            heading: 90.0,
        };
        stack.push(a);
        stack.push(b);
        assert_eq!(stack.len(), 2);
        assert_eq!(stack.pop(), Some(b));
        assert_eq!(stack.pop(), Some(a));
        assert_eq!(stack.pop(), None);
    }

    #[test]
    fn symbol_table_covers_the_drawing_alphabet() {
        for drawn in ['F', 'G', 'R', 'L'] {
            assert_eq!(TurtleOp::from_symbol(drawn), TurtleOp::Move);
        }
        assert_eq!(TurtleOp::from_symbol('f'), TurtleOp::InvisibleMove);
        assert_eq!(TurtleOp::from_symbol('+'), TurtleOp::TurnLeft);
        assert_eq!(TurtleOp::from_symbol('-'), TurtleOp::TurnRight);
        assert_eq!(TurtleOp::from_symbol('['), TurtleOp::Push);
        assert_eq!(TurtleOp::from_symbol(']'), TurtleOp::Pop);
        assert_eq!(TurtleOp::from_symbol('c'), TurtleOp::CycleColor);
    }

    #[test]
    fn rewrite_markers_are_ignored() {
        for marker in ['X', 'Y', 'A', '|', ' ', '0'] {
            assert_eq!(TurtleOp::from_symbol(marker), TurtleOp::Ignore);
        }
    }
}
