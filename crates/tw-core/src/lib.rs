//! Core engine for Talentwurf: dice expressions with exploding rolls and a
//! talent catalog built from character-sheet rows.
//!
//! The two halves mirror the application's split. [`dice`] parses and
//! evaluates formulas like `3D6+2`, optionally followed by a bonus karma
//! die, with every die subject to the exploding re-roll rule. [`catalog`]
//! turns loosely structured spreadsheet rows into a validated name lookup
//! table with a deterministic merge policy. All randomness flows through
//! the injectable [`RollSource`] seam; nothing here does I/O.

pub mod catalog;
pub mod dice;
pub mod error;

pub use catalog::{Talent, TalentCatalog};
pub use dice::{DiceExpression, DieTerm, KarmaDie, RollSource, RollTrace, Segment, evaluate};
pub use error::{RollError, RollResult};
