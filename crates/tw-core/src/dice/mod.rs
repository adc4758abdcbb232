//! Dice expressions, exploding rolls, and roll traces.
//!
//! An expression like `3D6+2` is parsed into die terms and a flat modifier,
//! then evaluated with the exploding rule: any die showing its maximum value
//! is drawn again, and the extra draws are tagged in the trace. The optional
//! karma die follows the same rule and is marked separately.

pub mod expr;
pub mod roll;

pub use expr::{DiceExpression, DieTerm};
pub use roll::{RollTrace, Segment};

use rand::Rng;

use crate::error::{RollError, RollResult};

/// Source of individual die draws.
///
/// The engine never reaches for a global generator; callers inject the
/// source, which keeps rolls reproducible under a seeded RNG and lets tests
/// supply a fixed sequence.
pub trait RollSource {
    /// Draw a uniform value in `1..=faces`.
    fn draw(&mut self, faces: u32) -> u32;
}

impl<R: Rng> RollSource for R {
    fn draw(&mut self, faces: u32) -> u32 {
        self.random_range(1..=faces)
    }
}

/// The bonus die appended when a karma-eligible talent is rolled with karma.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KarmaDie {
    /// Number of faces, at least two.
    pub faces: u32,
}

impl KarmaDie {
    /// Parse a die token like `D12` or `d8`.
    ///
    /// Anything that is not `D<n>` with `n >= 2` is rejected; a one-faced
    /// die would never stop exploding.
    pub fn parse(token: &str) -> RollResult<Self> {
        let trimmed = token.trim();
        let faces = trimmed
            .strip_prefix('D')
            .or_else(|| trimmed.strip_prefix('d'))
            .and_then(|digits| digits.parse::<u32>().ok())
            .ok_or_else(|| RollError::InvalidKarmaDie(token.to_string()))?;
        if faces < 2 {
            return Err(RollError::InvalidKarmaDie(token.to_string()));
        }
        Ok(Self { faces })
    }
}

impl std::fmt::Display for KarmaDie {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "D{}", self.faces)
    }
}

/// Parse and roll an expression in one call.
///
/// `karma` is the karma-die token to append when the caller opted in; the
/// decision itself (a yes/no prompt) belongs to the frontend.
pub fn evaluate(
    expression: &str,
    karma: Option<&str>,
    source: &mut impl RollSource,
) -> RollResult<RollTrace> {
    let expr = DiceExpression::parse(expression)?;
    let karma = karma.map(KarmaDie::parse).transpose()?;
    Ok(expr.roll_with_karma(karma, source))
}

/// Roll one exploding die: a base draw, then one more for every max shown.
///
/// Terminates with probability 1 for `faces >= 2`, which the expression
/// parser guarantees.
fn roll_exploding(faces: u32, source: &mut impl RollSource) -> Vec<u32> {
    let mut value = source.draw(faces);
    let mut draws = vec![value];
    while value == faces {
        value = source.draw(faces);
        draws.push(value);
    }
    draws
}

/// Fixed-sequence roll source for deterministic tests.
#[cfg(test)]
pub(crate) struct FixedRolls(std::collections::VecDeque<u32>);

#[cfg(test)]
impl FixedRolls {
    pub(crate) fn new(values: &[u32]) -> Self {
        Self(values.iter().copied().collect())
    }
}

#[cfg(test)]
impl RollSource for FixedRolls {
    fn draw(&mut self, _faces: u32) -> u32 {
        self.0.pop_front().unwrap_or(1)
    }
}
