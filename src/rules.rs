//! Rule table and string derivation.
//!
//! An L-system rewrites every symbol of a generation at once: symbols with an
//! entry in the [`RuleSet`] are replaced by their replacement string, all other
//! symbols are terminals and carry over unchanged. [`derive`] applies this for
//! a requested number of generations and returns the whole sequence, axiom
//! included.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An immutable mapping from a symbol to its replacement string.
///
/// At most one replacement exists per symbol. Symbols absent from the map are
/// terminals: they rewrite to themselves. A replacement may be empty, which
/// erases the symbol on the next generation; only an explicit rule can do
/// that, absence is always identity.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    rules: HashMap<char, String>,
}

impl RuleSet {
    /// Creates an empty rule set, under which every string is a fixed point.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a rule set from `(symbol, replacement)` pairs.
    ///
    /// When a symbol appears more than once, the last pair wins.
    pub fn from_rules<I, S>(rules: I) -> Self
    where
        I: IntoIterator<Item = (char, S)>,
        S: Into<String>,
    {
        Self {
            rules: rules
                .into_iter()
                .map(|(symbol, replacement)| (symbol, replacement.into()))
                .collect(),
        }
    }

    /// Returns the replacement for `symbol`, or `None` when it is a terminal.
    pub fn replacement(&self, symbol: char) -> Option<&str> {
        self.rules.get(&symbol).map(String::as_str)
    }

    /// Number of symbols with a replacement.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True when no symbol has a replacement.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterates over `(symbol, replacement)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (char, &str)> {
        self.rules.iter().map(|(&symbol, repl)| (symbol, repl.as_str()))
    }
}

impl<S: Into<String>> FromIterator<(char, S)> for RuleSet {
    fn from_iter<I: IntoIterator<Item = (char, S)>>(iter: I) -> Self {
        Self::from_rules(iter)
    }
}

/// Rewrites `axiom` under `rules` for `generations` steps.
///
/// Returns every generation in order: index 0 is the axiom, index `i` is the
/// result of substituting every symbol of index `i - 1` left to right. The
/// returned sequence always has `generations + 1` entries.
///
/// This is a pure function of its inputs. Time and memory are proportional to
/// the total output length, which grows geometrically whenever a replacement
/// is longer than one symbol; callers bound `generations`, the deriver does
/// not.
pub fn derive(axiom: &str, rules: &RuleSet, generations: usize) -> Vec<String> {
    let mut derived = Vec::with_capacity(generations + 1);
    derived.push(axiom.to_owned());
    for generation in 0..generations {
        let prev = &derived[generation];
        let mut next = String::with_capacity(prev.len());
        for symbol in prev.chars() {
            match rules.replacement(symbol) {
                Some(replacement) => next.push_str(replacement),
                None => next.push(symbol),
            }
        }
        derived.push(next);
    }
    derived
}
