//! Parsing and evaluation of dice expressions.
//!
//! Grammar, ASCII and case-insensitive on the die marker:
//!
//! ```text
//! expression := term ('+'? term)* (('+' | '-') digits)?
//! term       := [count] 'D' faces
//! ```
//!
//! Whitespace may appear between tokens. At most one flat modifier is
//! accepted and it must be trailing. Counts must be at least one and faces
//! at least two, so evaluation always terminates; a bare constant with no
//! die term is not an expression.

use serde::{Deserialize, Serialize};

use super::roll::RollTrace;
use super::{KarmaDie, RollSource, roll_exploding};
use crate::error::{RollError, RollResult};

/// A single `count`D`faces` term of an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DieTerm {
    /// How many dice to roll, at least one.
    pub count: u32,
    /// Faces per die, at least two.
    pub faces: u32,
}

/// A parsed dice expression: die terms plus an optional flat modifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceExpression {
    /// Die terms in source order.
    pub terms: Vec<DieTerm>,
    /// Trailing flat modifier, if any.
    pub modifier: Option<i32>,
}

/// Lexical token of the dice grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tok {
    Num(u32),
    D,
    Plus,
    Minus,
}

/// Tokenize expression text. `None` on any character outside the grammar.
fn lex(text: &str) -> Option<Vec<Tok>> {
    let mut tokens = Vec::new();
    let mut chars = text.chars().peekable();
    while let Some(&c) = chars.peek() {
        match c {
            c if c.is_ascii_whitespace() => {
                chars.next();
            }
            '+' => {
                chars.next();
                tokens.push(Tok::Plus);
            }
            '-' => {
                chars.next();
                tokens.push(Tok::Minus);
            }
            'D' | 'd' => {
                chars.next();
                tokens.push(Tok::D);
            }
            '0'..='9' => {
                let mut value: u64 = 0;
                while let Some(digit) = chars.peek().and_then(|c| c.to_digit(10)) {
                    value = value * 10 + u64::from(digit);
                    if value > u64::from(u32::MAX) {
                        return None;
                    }
                    chars.next();
                }
                tokens.push(Tok::Num(value as u32));
            }
            _ => return None,
        }
    }
    Some(tokens)
}

/// Try to read a term at `at`; count defaults to one when omitted.
fn parse_term(tokens: &[Tok], at: usize) -> Option<(DieTerm, usize)> {
    let (count, at) = match tokens.get(at) {
        Some(Tok::Num(n)) => (*n, at + 1),
        _ => (1, at),
    };
    match (tokens.get(at), tokens.get(at + 1)) {
        (Some(Tok::D), Some(Tok::Num(faces))) => Some((
            DieTerm {
                count,
                faces: *faces,
            },
            at + 2,
        )),
        _ => None,
    }
}

impl DiceExpression {
    /// Parse expression text against the dice grammar.
    pub fn parse(text: &str) -> RollResult<Self> {
        let invalid = || RollError::InvalidExpression(text.to_string());
        let tokens = lex(text).ok_or_else(invalid)?;

        let (first, mut at) = parse_term(&tokens, 0).ok_or_else(invalid)?;
        let mut terms = vec![first];
        let mut modifier = None;

        while at < tokens.len() {
            match tokens[at] {
                Tok::Plus => {
                    if let Some((term, next)) = parse_term(&tokens, at + 1) {
                        terms.push(term);
                        at = next;
                    } else if let Some(Tok::Num(n)) = tokens.get(at + 1) {
                        modifier = Some(i32::try_from(*n).map_err(|_| invalid())?);
                        at += 2;
                        if at != tokens.len() {
                            return Err(invalid());
                        }
                    } else {
                        return Err(invalid());
                    }
                }
                Tok::Minus => {
                    let Some(Tok::Num(n)) = tokens.get(at + 1) else {
                        return Err(invalid());
                    };
                    modifier = Some(-i32::try_from(*n).map_err(|_| invalid())?);
                    at += 2;
                    if at != tokens.len() {
                        return Err(invalid());
                    }
                }
                _ => {
                    // Juxtaposed term, no separator.
                    let Some((term, next)) = parse_term(&tokens, at) else {
                        return Err(invalid());
                    };
                    terms.push(term);
                    at = next;
                }
            }
        }

        if terms.iter().any(|t| t.count == 0 || t.faces < 2) {
            return Err(invalid());
        }
        Ok(Self { terms, modifier })
    }

    /// Smallest total this expression can produce: one per die plus the
    /// modifier.
    pub fn min_total(&self) -> i64 {
        let dice: i64 = self.terms.iter().map(|t| i64::from(t.count)).sum();
        dice + i64::from(self.modifier.unwrap_or(0))
    }

    /// Total number of dice across all terms.
    pub fn die_count(&self) -> u32 {
        self.terms.iter().map(|t| t.count).sum()
    }

    /// Roll every term with the exploding rule and apply the flat modifier.
    pub fn roll(&self, source: &mut impl RollSource) -> RollTrace {
        self.roll_with_karma(None, source)
    }

    /// Roll the expression, then one exploding karma die if requested.
    ///
    /// Terms roll left to right, each die contributing its base draw and
    /// any explosion continuations before the next die starts. The flat
    /// modifier follows the dice and the karma contributions come last.
    pub fn roll_with_karma(
        &self,
        karma: Option<KarmaDie>,
        source: &mut impl RollSource,
    ) -> RollTrace {
        let mut trace = RollTrace::default();
        for term in &self.terms {
            for _ in 0..term.count {
                trace.push_die(term.faces, &roll_exploding(term.faces, source));
            }
        }
        if let Some(modifier) = self.modifier {
            trace.push_modifier(modifier);
        }
        if let Some(die) = karma {
            trace.push_karma(die.faces, &roll_exploding(die.faces, source));
        }
        trace
    }
}

impl std::fmt::Display for DiceExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                write!(f, "+")?;
            }
            if term.count != 1 {
                write!(f, "{}", term.count)?;
            }
            write!(f, "D{}", term.faces)?;
        }
        if let Some(modifier) = self.modifier {
            write!(f, "{modifier:+}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::FixedRolls;
    use super::*;

    fn term(count: u32, faces: u32) -> DieTerm {
        DieTerm { count, faces }
    }

    #[test]
    fn parses_single_term() {
        let expr = DiceExpression::parse("3D6").unwrap();
        assert_eq!(expr.terms, vec![term(3, 6)]);
        assert_eq!(expr.modifier, None);
    }

    #[test]
    fn count_defaults_to_one() {
        let expr = DiceExpression::parse("D10").unwrap();
        assert_eq!(expr.terms, vec![term(1, 10)]);
    }

    #[test]
    fn parses_trailing_modifier() {
        let expr = DiceExpression::parse("D10+2").unwrap();
        assert_eq!(expr.terms, vec![term(1, 10)]);
        assert_eq!(expr.modifier, Some(2));

        let expr = DiceExpression::parse("2D8-3").unwrap();
        assert_eq!(expr.modifier, Some(-3));
    }

    #[test]
    fn parses_multiple_terms() {
        let expr = DiceExpression::parse("2D6+1D4").unwrap();
        assert_eq!(expr.terms, vec![term(2, 6), term(1, 4)]);
        assert_eq!(expr.modifier, None);

        let expr = DiceExpression::parse("2D6+D4+1").unwrap();
        assert_eq!(expr.terms, vec![term(2, 6), term(1, 4)]);
        assert_eq!(expr.modifier, Some(1));
    }

    #[test]
    fn tolerates_whitespace_and_lowercase() {
        let expr = DiceExpression::parse(" 3 d6 + 2 ").unwrap();
        assert_eq!(expr.terms, vec![term(3, 6)]);
        assert_eq!(expr.modifier, Some(2));
    }

    #[test]
    fn accepts_juxtaposed_terms() {
        // The original sheets occasionally drop the separator.
        let expr = DiceExpression::parse("2D6 1D4").unwrap();
        assert_eq!(expr.terms, vec![term(2, 6), term(1, 4)]);
    }

    #[test]
    fn rejects_malformed_expressions() {
        for text in [
            "", "5", "foo", "3D", "D", "D6+", "D6-", "2D6++2", "2D6+1+2", "D6 5", "2D6-1D4",
            "3x6", "D6+2 extra",
        ] {
            assert!(
                DiceExpression::parse(text).is_err(),
                "{text:?} should be rejected",
            );
        }
    }

    #[test]
    fn rejects_degenerate_dice() {
        for text in ["D1", "3D0", "0D6", "D1+2"] {
            assert!(
                DiceExpression::parse(text).is_err(),
                "{text:?} should be rejected",
            );
        }
    }

    #[test]
    fn two_d6_with_one_explosion() {
        let expr = DiceExpression::parse("2D6").unwrap();
        let mut source = FixedRolls::new(&[6, 3, 4]);
        let trace = expr.roll(&mut source);
        assert_eq!(trace.total, 13);
        assert_eq!(
            trace
                .segments
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>(),
            vec!["6 (D6)", "EXP 3 (D6)", "4 (D6)"],
        );
    }

    #[test]
    fn modifier_is_added_after_dice() {
        let expr = DiceExpression::parse("D10+5").unwrap();
        let mut source = FixedRolls::new(&[7]);
        let trace = expr.roll(&mut source);
        assert_eq!(trace.total, 12);
        assert_eq!(trace.details(), "7 (D10) + 5");
    }

    #[test]
    fn negative_modifier_can_drop_below_zero() {
        let expr = DiceExpression::parse("D6-10").unwrap();
        let mut source = FixedRolls::new(&[2]);
        let trace = expr.roll(&mut source);
        assert_eq!(trace.total, -8);
        assert_eq!(trace.details(), "2 (D6) + -10");
    }

    #[test]
    fn karma_die_contributions_are_marked() {
        let expr = DiceExpression::parse("2D6").unwrap();
        let mut source = FixedRolls::new(&[3, 2, 8, 8, 1]);
        let trace = expr.roll_with_karma(Some(KarmaDie { faces: 8 }), &mut source);
        assert_eq!(trace.total, 22);
        assert_eq!(
            trace.details(),
            "3 (D6) + 2 (D6) + +karma (D8): 8 + +karma EXP 8 (D8) + +karma EXP 1 (D8)",
        );
    }

    #[test]
    fn min_total_counts_dice_and_modifier() {
        assert_eq!(DiceExpression::parse("3D6").unwrap().min_total(), 3);
        assert_eq!(DiceExpression::parse("2D6+1D4-2").unwrap().min_total(), 1);
        assert_eq!(DiceExpression::parse("D10+5").unwrap().min_total(), 6);
    }

    #[test]
    fn display_normalizes() {
        for (input, normalized) in [
            ("3D6", "3D6"),
            (" 1 d 10 + 2 ", "D10+2"),
            ("2d6+1d4", "2D6+1D4"),
            ("2D8-3", "2D8-3"),
        ] {
            assert_eq!(
                DiceExpression::parse(input).unwrap().to_string(),
                normalized,
            );
        }
    }

    #[test]
    fn display_round_trips() {
        let expr = DiceExpression::parse("2D6+D4+3").unwrap();
        let reparsed = DiceExpression::parse(&expr.to_string()).unwrap();
        assert_eq!(expr, reparsed);
    }
}
