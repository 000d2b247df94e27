//! Error types for arithmetic evaluation.

use thiserror::Error;

/// Reasons an arithmetic-looking query failed to parse or evaluate.
///
/// The `Display` text is what ends up in the user-facing computation-error reply.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// A token appeared where the grammar does not allow it.
    #[error("invalid syntax: unexpected '{0}'")]
    UnexpectedToken(String),

    /// Input ended in the middle of an expression.
    #[error("invalid syntax: unexpected end of expression")]
    UnexpectedEnd,

    /// Malformed numeric literal (`1e`, `1.2.3`, `007`).
    #[error("invalid number literal '{0}'")]
    InvalidNumber(String),

    /// Syntax outside the closed arithmetic grammar (bare names, empty groups).
    #[error("unsupported expression")]
    Unsupported,

    /// True division by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// `0 ** -n`.
    #[error("0.0 cannot be raised to a negative power")]
    ZeroToNegativePower,

    /// Negative base with a fractional exponent has no real result.
    #[error("negative number cannot be raised to a fractional power")]
    ComplexResult,

    /// Float result overflowed or is not a number.
    #[error("numerical result out of range")]
    OutOfRange,

    /// Integer operand too large to mix with a float.
    #[error("int too large to convert to float")]
    IntTooLargeForFloat,

    /// Exact integer result beyond the supported width.
    #[error("integer result too large")]
    IntegerTooLarge,

    /// Parenthesis nesting beyond what the parser accepts.
    #[error("expression nested too deeply")]
    TooDeep,

    /// Token count beyond what the parser accepts.
    #[error("expression too long")]
    TooLong,
}
