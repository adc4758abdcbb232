//! Terminal UI for the Talentwurf talent roller.
//!
//! A single-screen ratatui interface: quick-access buttons for ranked
//! talents, a talent entry with inline autocomplete, a karma-die selector,
//! the latest roll with its breakdown, and a scrolling history.

pub mod app;
pub mod terminal;
pub mod views;
