//! Deterministic arithmetic fast path.
//!
//! A chat message is treated as a math query only when, after the question
//! phrasing is stripped, every remaining character belongs to the arithmetic
//! alphabet. Anything else is [`EvaluationResult::NotApplicable`] and goes to the
//! model; arithmetic-looking text that fails to parse or evaluate is an
//! [`EvaluationResult::Error`].

mod error;
mod lexer;
mod number;
mod parser;

pub use error::EvalError;
pub use number::Number;

/// Question phrasing removed before the character gate, in removal order.
const QUESTION_PHRASES: [&str; 4] = ["等于多少", "等于几", "是多少", "="];

/// Outcome of [`evaluate`].
#[derive(Debug, Clone, PartialEq)]
pub enum EvaluationResult {
    /// Valid expression with its value.
    Success { value: Number },
    /// Looked like arithmetic but could not be parsed or evaluated.
    Error { reason: String },
    /// Not a math query; route to generation.
    NotApplicable,
}

/// Strip question phrasing and surrounding whitespace.
#[must_use]
pub fn normalize_query(query: &str) -> String {
    QUESTION_PHRASES
        .iter()
        .fold(query.to_string(), |acc, phrase| acc.replace(phrase, ""))
        .trim()
        .to_string()
}

fn is_arithmetic_char(c: char) -> bool {
    matches!(
        c,
        '0'..='9' | '+' | '-' | '*' | '/' | '(' | ')' | '.' | 'e' | 'E' | ' '
    )
}

/// Classify and, when applicable, evaluate `query`.
#[must_use]
pub fn evaluate(query: &str) -> EvaluationResult {
    let expr = normalize_query(query);
    if expr.is_empty() || !expr.chars().all(is_arithmetic_char) {
        return EvaluationResult::NotApplicable;
    }
    match evaluate_expression(&expr) {
        Ok(value) => EvaluationResult::Success { value },
        Err(error) => {
            tracing::debug!(
                event = "chat.evaluator.failed",
                expression = %expr,
                error = %error,
                "arithmetic evaluation failed"
            );
            EvaluationResult::Error {
                reason: error.to_string(),
            }
        }
    }
}

fn evaluate_expression(expr: &str) -> Result<Number, EvalError> {
    let tokens = lexer::tokenize(expr)?;
    let value = parser::parse(&tokens)?.eval()?;
    if !value.is_finite() {
        return Err(EvalError::OutOfRange);
    }
    Ok(value)
}
