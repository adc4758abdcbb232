//! Roll traces: structured per-draw contributions and totals.

use serde::{Deserialize, Serialize};

/// One contribution to a roll, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Segment {
    /// The base draw of a talent die.
    Die {
        /// Value drawn.
        value: u32,
        /// Faces on the die.
        faces: u32,
    },
    /// An explosion continuation after a max roll.
    Explosion {
        /// Value drawn.
        value: u32,
        /// Faces on the die.
        faces: u32,
    },
    /// The trailing flat modifier.
    Modifier(i32),
    /// The base draw of the karma die.
    Karma {
        /// Value drawn.
        value: u32,
        /// Faces on the karma die.
        faces: u32,
    },
    /// An explosion continuation of the karma die.
    KarmaExplosion {
        /// Value drawn.
        value: u32,
        /// Faces on the karma die.
        faces: u32,
    },
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Die { value, faces } => write!(f, "{value} (D{faces})"),
            Self::Explosion { value, faces } => write!(f, "EXP {value} (D{faces})"),
            Self::Modifier(modifier) => write!(f, "{modifier}"),
            Self::Karma { value, faces } => write!(f, "+karma (D{faces}): {value}"),
            Self::KarmaExplosion { value, faces } => write!(f, "+karma EXP {value} (D{faces})"),
        }
    }
}

/// The outcome of evaluating a dice expression: total plus the breakdown.
///
/// Owned by the caller that requested the roll; never cached by the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollTrace {
    /// Sum of all contributions.
    pub total: i64,
    /// Contributions in evaluation order: dice groups left to right, then
    /// the flat modifier, then karma.
    pub segments: Vec<Segment>,
}

impl RollTrace {
    /// The segments joined for display: `"6 (D6) + EXP 3 (D6) + 4 (D6)"`.
    pub fn details(&self) -> String {
        self.segments
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" + ")
    }

    /// Record one talent die: base draw plus explosion continuations.
    pub(crate) fn push_die(&mut self, faces: u32, draws: &[u32]) {
        for (i, &value) in draws.iter().enumerate() {
            self.total += i64::from(value);
            self.segments.push(if i == 0 {
                Segment::Die { value, faces }
            } else {
                Segment::Explosion { value, faces }
            });
        }
    }

    /// Record the flat modifier.
    pub(crate) fn push_modifier(&mut self, modifier: i32) {
        self.total += i64::from(modifier);
        self.segments.push(Segment::Modifier(modifier));
    }

    /// Record the karma die: base draw plus explosion continuations.
    pub(crate) fn push_karma(&mut self, faces: u32, draws: &[u32]) {
        for (i, &value) in draws.iter().enumerate() {
            self.total += i64::from(value);
            self.segments.push(if i == 0 {
                Segment::Karma { value, faces }
            } else {
                Segment::KarmaExplosion { value, faces }
            });
        }
    }
}

impl std::fmt::Display for RollTrace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {}", self.details(), self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_formatting_contract() {
        assert_eq!(Segment::Die { value: 7, faces: 10 }.to_string(), "7 (D10)");
        assert_eq!(
            Segment::Explosion { value: 3, faces: 6 }.to_string(),
            "EXP 3 (D6)",
        );
        assert_eq!(Segment::Modifier(5).to_string(), "5");
        assert_eq!(Segment::Modifier(-2).to_string(), "-2");
        assert_eq!(
            Segment::Karma { value: 9, faces: 12 }.to_string(),
            "+karma (D12): 9",
        );
        assert_eq!(
            Segment::KarmaExplosion { value: 4, faces: 12 }.to_string(),
            "+karma EXP 4 (D12)",
        );
    }

    #[test]
    fn push_die_tags_continuations() {
        let mut trace = RollTrace::default();
        trace.push_die(6, &[6, 6, 1]);
        assert_eq!(trace.total, 13);
        assert_eq!(
            trace.segments,
            vec![
                Segment::Die { value: 6, faces: 6 },
                Segment::Explosion { value: 6, faces: 6 },
                Segment::Explosion { value: 1, faces: 6 },
            ],
        );
    }

    #[test]
    fn empty_trace() {
        let trace = RollTrace::default();
        assert_eq!(trace.total, 0);
        assert_eq!(trace.details(), "");
    }

    #[test]
    fn display_joins_details_and_total() {
        let mut trace = RollTrace::default();
        trace.push_die(6, &[4]);
        trace.push_modifier(2);
        assert_eq!(trace.to_string(), "4 (D6) + 2 = 6");
    }
}
