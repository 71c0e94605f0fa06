//! Loading rule sets and IFS parameters from text files.
//!
//! The file format is line-oriented, one `label: value` entry per line. The
//! label (everything up to the first `:`) is purely decorative; field order
//! is what matters. Whitespace inside a line is ignored entirely, and lines
//! before the rule block whose text (or value) starts with `#` are comments:
//!
//! ```text
//! # Koch curve
//! rule1: F -> F+F--F+F
//! rule2: 0
//! axiom: F
//! angle: 60
//! alpha: 0
//! scale: 0.333
//! xaxes: -0.1, 1.1
//! yaxes: -0.1, 0.4
//! ```
//!
//! The rule block holds one `symbol->replacement` entry per line and is
//! terminated by a line whose value is `0`. The remaining fields are, in
//! order: axiom, angle increment (degrees), initial heading (degrees), IFS
//! scaling factor (strictly between 0 and 1), and the window bounds along
//! each axis as `min,max` pairs.

use crate::rules::RuleSet;
use std::ffi::OsString;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Ways a config file can fail to load.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Neither the given path nor the path with `.txt` appended exists.
    #[error("config file not found: {} (also tried with .txt appended)", .path.display())]
    MissingFile { path: PathBuf },
    /// A rule line did not contain exactly one `->` separator.
    #[error("line {line}: a rule needs exactly one '->' separator")]
    MissingSeparator { line: usize },
    /// The left side of a rule was not a single symbol.
    #[error("line {line}: the rule symbol must be a single character")]
    BadSymbol { line: usize },
    /// The axiom line had an empty value.
    #[error("the axiom must not be empty")]
    EmptyAxiom,
    /// A numeric field failed to parse as a finite number.
    #[error("line {line}: {field} is not a finite number")]
    InvalidNumber { line: usize, field: &'static str },
    /// The scaling factor was outside the open interval (0, 1).
    #[error("IFS scaling factor should be between 0 and 1, got {value}")]
    ScaleOutOfRange { value: f32 },
    /// An axis line did not hold exactly two comma-separated values.
    #[error("line {line}: expected two comma-separated values")]
    BadBounds { line: usize },
    /// The file ended before all fields were read.
    #[error("file ended while expecting {expecting}")]
    UnexpectedEof { expecting: &'static str },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// World-coordinate window limits along both axes.
///
/// `min < max` is implied by the format but not enforced here; degenerate
/// bounds only surface when fitting a viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub x_min: f32,
    pub x_max: f32,
    pub y_min: f32,
    pub y_max: f32,
}

impl Bounds {
    /// World-space width, `x_max - x_min`.
    pub fn width(&self) -> f32 {
        self.x_max - self.x_min
    }

    /// World-space height, `y_max - y_min`.
    pub fn height(&self) -> f32 {
        self.y_max - self.y_min
    }
}

/// Parameters of one iterated function system, minus its rules.
///
/// Loaded together with a [`RuleSet`] by [`parse_config`] / [`load_config`]
/// and passed by reference into derivation and interpretation.
#[derive(Clone, Debug, PartialEq)]
pub struct IfsConfig {
    /// Generation-0 string.
    pub axiom: String,
    /// Degrees turned by each `+` / `-` symbol.
    pub angle: f32,
    /// Initial heading in degrees.
    pub alpha: f32,
    /// Per-generation step shrink factor, in (0, 1).
    pub scale: f32,
    /// Window limits in world coordinates.
    pub bounds: Bounds,
}

impl IfsConfig {
    /// Segment length for a derivation of the given depth, `scale ^ iterations`.
    ///
    /// Each generation multiplies the symbol count and shrinks the step, so
    /// the drawn curve stays inside the same bounds as it refines.
    pub fn step_length(&self, iterations: u32) -> f32 {
        self.scale.powi(iterations as i32)
    }
}

/// Loads a config file, retrying once with `.txt` appended when `path` does
/// not name an existing file.
pub fn load_config(path: impl AsRef<Path>) -> Result<(RuleSet, IfsConfig), ConfigError> {
    let resolved = resolve_path(path.as_ref())?;
    let file = File::open(&resolved)?;
    parse_config(BufReader::new(file))
}

fn resolve_path(path: &Path) -> Result<PathBuf, ConfigError> {
    if path.is_file() {
        return Ok(path.to_path_buf());
    }
    let mut with_txt = OsString::from(path.as_os_str());
    with_txt.push(".txt");
    let with_txt = PathBuf::from(with_txt);
    if with_txt.is_file() {
        return Ok(with_txt);
    }
    Err(ConfigError::MissingFile {
        path: path.to_path_buf(),
    })
}

/// Parses the config format described in the module docs from any reader.
pub fn parse_config<R: BufRead>(reader: R) -> Result<(RuleSet, IfsConfig), ConfigError> {
    let mut entries = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let raw = line?;
        let stripped: String = raw.split_whitespace().collect();
        if stripped.is_empty() {
            continue;
        }
        entries.push((index + 1, stripped));
    }
    let mut cursor = entries.into_iter().peekable();

    // Comments are only recognized ahead of the rule block.
    while let Some((_, text)) = cursor.peek() {
        if text.starts_with('#') || value_of(text).starts_with('#') {
            cursor.next();
        } else {
            break;
        }
    }

    let mut rules = Vec::new();
    loop {
        let (line, value) = next_value(&mut cursor, "a rule or the '0' terminator")?;
        if value == "0" {
            break;
        }
        let mut parts = value.split("->");
        let (symbol, replacement) = match (parts.next(), parts.next(), parts.next()) {
            (Some(symbol), Some(replacement), None) => (symbol, replacement),
            _ => return Err(ConfigError::MissingSeparator { line }),
        };
        let mut chars = symbol.chars();
        let (Some(symbol), None) = (chars.next(), chars.next()) else {
            return Err(ConfigError::BadSymbol { line });
        };
        rules.push((symbol, replacement.to_string()));
    }

    let (_, axiom) = next_value(&mut cursor, "the axiom")?;
    if axiom.is_empty() {
        return Err(ConfigError::EmptyAxiom);
    }
    let (line, value) = next_value(&mut cursor, "the angle increment")?;
    let angle = parse_float(&value, line, "angle")?;
    let (line, value) = next_value(&mut cursor, "the initial heading")?;
    let alpha = parse_float(&value, line, "alpha")?;
    let (line, value) = next_value(&mut cursor, "the scaling factor")?;
    let scale = parse_float(&value, line, "scale")?;
    if scale <= 0.0 || scale >= 1.0 {
        return Err(ConfigError::ScaleOutOfRange { value: scale });
    }
    let (line, value) = next_value(&mut cursor, "the x axis bounds")?;
    let (x_min, x_max) = parse_pair(&value, line, "xaxes")?;
    let (line, value) = next_value(&mut cursor, "the y axis bounds")?;
    let (y_min, y_max) = parse_pair(&value, line, "yaxes")?;

    Ok((
        RuleSet::from_rules(rules),
        IfsConfig {
            axiom,
            angle,
            alpha,
            scale,
            bounds: Bounds {
                x_min,
                x_max,
                y_min,
                y_max,
            },
        },
    ))
}

/// Everything after the first `:`, or the empty string when there is none.
fn value_of(text: &str) -> &str {
    match text.split_once(':') {
        Some((_, value)) => value,
        None => "",
    }
}

fn next_value(
    cursor: &mut impl Iterator<Item = (usize, String)>,
    expecting: &'static str,
) -> Result<(usize, String), ConfigError> {
    let (line, text) = cursor
        .next()
        .ok_or(ConfigError::UnexpectedEof { expecting })?;
    Ok((line, value_of(&text).to_string()))
}

fn parse_float(value: &str, line: usize, field: &'static str) -> Result<f32, ConfigError> {
    let number: f32 = value
        .parse()
        .map_err(|_| ConfigError::InvalidNumber { line, field })?;
    if !number.is_finite() {
        return Err(ConfigError::InvalidNumber { line, field });
    }
    Ok(number)
}

fn parse_pair(value: &str, line: usize, field: &'static str) -> Result<(f32, f32), ConfigError> {
    let mut parts = value.split(',');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(a), Some(b), None) => Ok((parse_float(a, line, field)?, parse_float(b, line, field)?)),
        _ => Err(ConfigError::BadBounds { line }),
    }
}
