//! Error types for the core engine.

/// Errors produced when parsing or evaluating dice text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RollError {
    /// The expression text does not match the dice grammar.
    #[error("invalid dice expression: {0}")]
    InvalidExpression(String),

    /// The karma die token is not `D<n>` with at least two faces.
    #[error("invalid karma die: {0}")]
    InvalidKarmaDie(String),
}

/// Convenience result type for engine operations.
pub type RollResult<T> = Result<T, RollError>;
