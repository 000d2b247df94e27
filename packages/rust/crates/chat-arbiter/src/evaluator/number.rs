//! Numeric values produced by the evaluator.
//!
//! Integers are exact at any size; `/` always yields a float, and an integer
//! only becomes a float when it meets one.

use std::fmt;

use num_bigint::BigInt;
use num_traits::{One, Pow, Signed, ToPrimitive, Zero};

use super::error::EvalError;

/// Integer results wider than this are refused (about 4200 decimal digits).
const MAX_INT_BITS: u64 = 14_000;

/// Result value of a successful evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum Number {
    Int(BigInt),
    Float(f64),
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Self::Int(BigInt::from(value))
    }
}

impl Number {
    /// Parse a literal already validated by the lexer.
    pub(crate) fn from_literal(literal: &str) -> Result<Self, EvalError> {
        let invalid = || EvalError::InvalidNumber(literal.to_string());
        if literal.bytes().all(|b| b.is_ascii_digit()) {
            return literal.parse::<BigInt>().map(Self::Int).map_err(|_| invalid());
        }
        literal.parse::<f64>().map(Self::Float).map_err(|_| invalid())
    }

    /// Conversion used whenever an operand mixes with a float.
    pub(crate) fn as_f64(&self) -> Result<f64, EvalError> {
        match self {
            Self::Int(value) => int_to_f64(value),
            Self::Float(value) => Ok(*value),
        }
    }

    pub(crate) fn is_finite(&self) -> bool {
        match self {
            Self::Int(_) => true,
            Self::Float(value) => value.is_finite(),
        }
    }

    pub(crate) fn neg(self) -> Self {
        match self {
            Self::Int(value) => Self::Int(-value),
            Self::Float(value) => Self::Float(-value),
        }
    }

    pub(crate) fn add(self, rhs: Self) -> Result<Self, EvalError> {
        match (self, rhs) {
            (Self::Int(a), Self::Int(b)) => Ok(Self::Int(a + b)),
            (lhs, rhs) => Ok(Self::Float(lhs.as_f64()? + rhs.as_f64()?)),
        }
    }

    pub(crate) fn sub(self, rhs: Self) -> Result<Self, EvalError> {
        match (self, rhs) {
            (Self::Int(a), Self::Int(b)) => Ok(Self::Int(a - b)),
            (lhs, rhs) => Ok(Self::Float(lhs.as_f64()? - rhs.as_f64()?)),
        }
    }

    pub(crate) fn mul(self, rhs: Self) -> Result<Self, EvalError> {
        match (self, rhs) {
            (Self::Int(a), Self::Int(b)) => {
                if a.bits() + b.bits() > MAX_INT_BITS {
                    return Err(EvalError::IntegerTooLarge);
                }
                Ok(Self::Int(a * b))
            }
            (lhs, rhs) => Ok(Self::Float(lhs.as_f64()? * rhs.as_f64()?)),
        }
    }

    /// True division: the quotient is always a float.
    pub(crate) fn div(self, rhs: Self) -> Result<Self, EvalError> {
        match (self, rhs) {
            (Self::Int(a), Self::Int(b)) => int_quotient(&a, &b).map(Self::Float),
            (lhs, rhs) => {
                let divisor = rhs.as_f64()?;
                if divisor == 0.0 {
                    return Err(EvalError::DivisionByZero);
                }
                Ok(Self::Float(lhs.as_f64()? / divisor))
            }
        }
    }

    pub(crate) fn pow(self, rhs: Self) -> Result<Self, EvalError> {
        if let (Self::Int(base), Self::Int(exp)) = (&self, &rhs)
            && !exp.is_negative()
        {
            return int_pow(base, exp).map(Self::Int);
        }
        let base = self.as_f64()?;
        let exp = rhs.as_f64()?;
        if base == 0.0 && exp < 0.0 {
            return Err(EvalError::ZeroToNegativePower);
        }
        if base < 0.0 && exp.fract() != 0.0 && exp.is_finite() {
            return Err(EvalError::ComplexResult);
        }
        let value = base.powf(exp);
        if !value.is_finite() && base.is_finite() && exp.is_finite() {
            return Err(EvalError::OutOfRange);
        }
        Ok(Self::Float(value))
    }
}

fn int_to_f64(value: &BigInt) -> Result<f64, EvalError> {
    value
        .to_f64()
        .filter(|v| v.is_finite())
        .ok_or(EvalError::IntTooLargeForFloat)
}

/// `base ** exp` for a non-negative integer exponent, exactly.
fn int_pow(base: &BigInt, exp: &BigInt) -> Result<BigInt, EvalError> {
    if exp.is_zero() || base.is_one() {
        return Ok(BigInt::one());
    }
    if base.is_zero() {
        return Ok(BigInt::zero());
    }
    if base.abs().is_one() {
        let odd = (exp % 2u32).is_one();
        return Ok(if odd { base.clone() } else { BigInt::one() });
    }
    let exp = exp
        .to_u32()
        .filter(|e| (base.bits() - 1).saturating_mul(u64::from(*e)) < MAX_INT_BITS)
        .ok_or(EvalError::IntegerTooLarge)?;
    Ok(Pow::pow(base, exp))
}

/// Integer true division rounded to a float without converting the operands
/// first, so quotients of integers beyond the float range still work.
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
fn int_quotient(a: &BigInt, b: &BigInt) -> Result<f64, EvalError> {
    const EXACT_BITS: u64 = 53;
    if b.is_zero() {
        return Err(EvalError::DivisionByZero);
    }
    if a.bits() <= EXACT_BITS && b.bits() <= EXACT_BITS {
        return Ok(int_to_f64(a)? / int_to_f64(b)?);
    }
    // Scale so the integer quotient carries about 64 significant bits.
    let shift = 64 - (a.bits() as i64 - b.bits() as i64);
    let quotient = if shift >= 0 {
        (a << shift as usize) / b
    } else {
        a / (b << shift.unsigned_abs() as usize)
    };
    let mantissa = int_to_f64(&quotient)?;
    let value = scale_by_power_of_two(mantissa, -shift);
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EvalError::OutOfRange)
    }
}

fn scale_by_power_of_two(mut value: f64, mut exp: i64) -> f64 {
    // Stepwise so neither factor over- or underflows on its own.
    while exp > 1000 {
        value *= 2f64.powi(1000);
        exp -= 1000;
    }
    while exp < -1000 {
        value *= 2f64.powi(-1000);
        exp += 1000;
    }
    #[allow(clippy::cast_possible_truncation)]
    let exp = exp as i32;
    value * 2f64.powi(exp)
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => f.write_str(&format_float(*value)),
        }
    }
}

/// Render a float the way interactive interpreters show it: `2.5`, `9.0`,
/// `1e+16`, `1e-05`. Positional notation for decimal exponents in `-4..16`.
fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let scientific = format!("{value:e}");
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);
    if value == 0.0 || (-4..16).contains(&exponent) {
        let positional = format!("{value}");
        return if positional.contains('.') {
            positional
        } else {
            format!("{positional}.0")
        };
    }
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{mantissa}e{sign}{:02}", exponent.unsigned_abs())
}
