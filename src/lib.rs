//! # ifs-turtle
//!
//! Generates fractal curves of iterated function systems (IFS) from
//! [L-system](https://en.wikipedia.org/wiki/L-system) rewriting rules and
//! interprets them as turtle-graphics motion.
//!
//! It decouples the *grammar* (rule substitution across generations, [`derive`])
//! from the *geometry* (the symbol walk, [`TurtleInterpreter`]), producing a
//! [`Drawing`] of colored polylines that can be written as SVG, dumped as JSON,
//! or ingested by any renderer that implements [`DrawingSurface`].

pub mod canvas;
pub mod config;
pub mod drawing;
pub mod interpreter;
pub mod rules;
pub mod svg;
pub mod turtle;

pub use canvas::*;
pub use config::*;
pub use drawing::*;
pub use interpreter::*;
pub use rules::*;
pub use svg::*;
pub use turtle::*;
