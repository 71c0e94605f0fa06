//! Interpreter that renders an L-system symbol sequence onto a [`DrawingSurface`].
//!
//! The entry point is [`TurtleInterpreter`]. Configure it with the turn
//! increment and initial heading from an [`IfsConfig`](crate::config::IfsConfig)
//! (or directly), then call [`TurtleInterpreter::interpret`] with a derived
//! symbol string and the surface to draw on.

use crate::canvas::DrawingSurface;
use crate::drawing::PALETTE;
use crate::turtle::{PoseSnapshot, StateStack, TurtleOp};
use thiserror::Error;

/// A `]` symbol was encountered while the branch stack was empty.
///
/// Every pop must match an earlier push; a sequence that violates this is
/// not drawable and interpretation stops at the offending symbol.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("unmatched ']' at symbol {position}: the branch stack is empty")]
pub struct MalformedSequence {
    /// 0-based index of the offending symbol in the interpreted sequence.
    pub position: usize,
}

/// Walks an L-system symbol sequence and drives a [`DrawingSurface`].
///
/// The interpreter is stateless between calls: angle increment and initial
/// heading are fixed at construction, while the step length varies per call
/// (deeper derivations shrink their segments).
#[derive(Clone, Copy, Debug)]
pub struct TurtleInterpreter {
    /// Degrees turned by each `+` / `-` symbol.
    angle_increment: f32,
    /// Heading in degrees the cursor starts each walk with.
    initial_heading: f32,
}

impl TurtleInterpreter {
    /// Creates an interpreter turning by `angle_increment` degrees per turn
    /// symbol and starting each walk headed at `initial_heading` degrees.
    pub fn new(angle_increment: f32, initial_heading: f32) -> Self {
        Self {
            angle_increment,
            initial_heading,
        }
    }

    /// Degrees turned by each `+` / `-` symbol.
    pub fn angle_increment(&self) -> f32 {
        self.angle_increment
    }

    /// Heading in degrees the cursor starts each walk with.
    pub fn initial_heading(&self) -> f32 {
        self.initial_heading
    }

    /// Interprets `symbols` on `surface`, one drawing primitive per symbol.
    ///
    /// The cursor is first lowered, pointed at the initial heading and given
    /// the first palette color; the surface's current position is used as the
    /// starting point. Every `F`, `G`, `R` and `L` then draws a segment of
    /// `step_length`, `f` travels the same distance with the pen up, `+` and
    /// `-` turn by the angle increment, and `c` advances to the next palette
    /// color (wrapping around). Symbols with no assigned operation are
    /// silently skipped.
    ///
    /// # Branching
    ///
    /// `[` saves the cursor pose (position and heading) onto a stack; `]`
    /// restores the most recently saved pose, travelling there with the pen
    /// up. Pen state and color are not part of the saved pose.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedSequence`] when a `]` finds the stack empty. The
    /// surface keeps everything drawn up to the offending symbol.
    pub fn interpret<S: DrawingSurface>(
        &self,
        symbols: &str,
        step_length: f32,
        surface: &mut S,
    ) -> Result<(), MalformedSequence> {
        let mut stack = StateStack::new();
        let mut color = 0;

        surface.pen_down();
        surface.set_heading(self.initial_heading);
        surface.set_color(color);

        for (position, symbol) in symbols.chars().enumerate() {
            match TurtleOp::from_symbol(symbol) {
                TurtleOp::Move => surface.move_forward(step_length),
                TurtleOp::InvisibleMove => {
                    surface.pen_up();
                    surface.move_forward(step_length);
                    surface.pen_down();
                }
                TurtleOp::TurnLeft => surface.turn_left(self.angle_increment),
                TurtleOp::TurnRight => surface.turn_right(self.angle_increment),
                TurtleOp::Push => stack.push(PoseSnapshot {
                    position: surface.position(),
                    heading: surface.heading(),
                }),
                TurtleOp::Pop => {
                    let pose = stack.pop().ok_or(MalformedSequence { position })?;
                    surface.pen_up();
                    surface.goto(pose.position);
                    surface.set_heading(pose.heading);
                    surface.pen_down();
                }
                TurtleOp::CycleColor => {
                    color = (color + 1) % PALETTE.len();
                    surface.set_color(color);
                }
                TurtleOp::Ignore => {}
            }
        }

        Ok(())
    }
}
