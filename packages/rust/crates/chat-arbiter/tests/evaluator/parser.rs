use super::super::lexer::{Token, tokenize};
use super::*;

fn eval_str(input: &str) -> Result<Number, EvalError> {
    let tokens = tokenize(input)?;
    parse(&tokens)?.eval()
}

#[test]
fn tokenize_splits_power_from_multiplication() {
    let tokens = tokenize("2**3*4").expect("tokens");
    assert_eq!(
        tokens,
        vec![
            Token::Number("2".to_string()),
            Token::DoubleStar,
            Token::Number("3".to_string()),
            Token::Star,
            Token::Number("4".to_string()),
        ]
    );
}

#[test]
fn tokenize_reads_float_and_exponent_literals() {
    let tokens = tokenize("1.5e3 + .5 + 2.").expect("tokens");
    assert_eq!(tokens[0], Token::Number("1.5e3".to_string()));
    assert_eq!(tokens[2], Token::Number(".5".to_string()));
    assert_eq!(tokens[4], Token::Number("2.".to_string()));
}

#[test]
fn tokenize_rejects_dangling_exponent_and_leading_zeros() {
    assert_eq!(
        tokenize("2e"),
        Err(EvalError::InvalidNumber("2e".to_string()))
    );
    assert_eq!(
        tokenize("1e+"),
        Err(EvalError::InvalidNumber("1e+".to_string()))
    );
    assert_eq!(
        tokenize("007"),
        Err(EvalError::InvalidNumber("007".to_string()))
    );
    assert!(tokenize("00").is_ok());
}

#[test]
fn bare_name_is_not_evaluated() {
    assert_eq!(eval_str("e"), Err(EvalError::Unsupported));
    assert_eq!(eval_str("E + 1"), Err(EvalError::Unsupported));
}

#[test]
fn precedence_and_grouping() {
    assert_eq!(eval_str("2+3*4"), Ok(Number::from(14)));
    assert_eq!(eval_str("(2+3)*4"), Ok(Number::from(20)));
    assert_eq!(eval_str("10-4-3"), Ok(Number::from(3)));
    assert_eq!(eval_str("8/2/2"), Ok(Number::Float(2.0)));
}

#[test]
fn power_is_right_associative_and_binds_tighter_than_unary() {
    assert_eq!(eval_str("2**3**2"), Ok(Number::from(512)));
    assert_eq!(eval_str("-2**2"), Ok(Number::from(-4)));
    assert_eq!(eval_str("(-2)**2"), Ok(Number::from(4)));
    assert_eq!(eval_str("2**-1"), Ok(Number::Float(0.5)));
}

#[test]
fn stacked_unary_signs() {
    assert_eq!(eval_str("--3"), Ok(Number::from(3)));
    assert_eq!(eval_str("+-+3"), Ok(Number::from(-3)));
}

#[test]
fn syntax_errors_are_reported() {
    assert_eq!(eval_str("2*"), Err(EvalError::UnexpectedEnd));
    assert_eq!(eval_str("(1+2"), Err(EvalError::UnexpectedEnd));
    assert_eq!(
        eval_str("1 2"),
        Err(EvalError::UnexpectedToken("2".to_string()))
    );
    assert_eq!(
        eval_str("4//2"),
        Err(EvalError::UnexpectedToken("/".to_string()))
    );
    assert_eq!(eval_str("()"), Err(EvalError::Unsupported));
    assert_eq!(
        eval_str("(1)(2)"),
        Err(EvalError::UnexpectedToken("(".to_string()))
    );
}

#[test]
fn nesting_depth_is_bounded() {
    let deep = format!("{}1{}", "(".repeat(500), ")".repeat(500));
    assert_eq!(eval_str(&deep), Err(EvalError::TooDeep));
    let fine = format!("{}1{}", "(".repeat(50), ")".repeat(50));
    assert_eq!(eval_str(&fine), Ok(Number::from(1)));
}

#[test]
fn token_count_is_bounded() {
    let long = vec!["1"; 5000].join("+");
    assert_eq!(eval_str(&long), Err(EvalError::TooLong));
}

#[test]
fn integers_stay_exact_beyond_machine_width() {
    assert_eq!(
        eval_str("9223372036854775807+1").map(|v| v.to_string()),
        Ok("9223372036854775808".to_string())
    );
    assert_eq!(
        eval_str("-9223372036854775807-2").map(|v| v.to_string()),
        Ok("-9223372036854775809".to_string())
    );
    assert_eq!(
        eval_str("10**30").map(|v| v.to_string()),
        Ok(format!("1{}", "0".repeat(30)))
    );
    assert_eq!(eval_str("(-1)**1000001"), Ok(Number::from(-1)));
    assert_eq!(eval_str("0**0"), Ok(Number::from(1)));
}

#[test]
fn oversized_integer_results_are_refused() {
    assert_eq!(eval_str("9**9**9"), Err(EvalError::IntegerTooLarge));
    assert_eq!(eval_str("2**100000"), Err(EvalError::IntegerTooLarge));
}

#[test]
fn huge_integers_divide_without_float_conversion() {
    assert_eq!(eval_str("10**400/10**399"), Ok(Number::Float(10.0)));
    assert_eq!(eval_str("1/10**400"), Ok(Number::Float(0.0)));
    assert_eq!(eval_str("10**400/3"), Err(EvalError::OutOfRange));
    assert_eq!(eval_str("10**400*1.0"), Err(EvalError::IntTooLargeForFloat));
}

#[test]
fn arithmetic_failures() {
    assert_eq!(eval_str("5/0"), Err(EvalError::DivisionByZero));
    assert_eq!(eval_str("5/0.0"), Err(EvalError::DivisionByZero));
    assert_eq!(eval_str("0**-1"), Err(EvalError::ZeroToNegativePower));
    assert_eq!(eval_str("(-8)**0.5"), Err(EvalError::ComplexResult));
    assert_eq!(eval_str("10.0**400"), Err(EvalError::OutOfRange));
}

#[test]
fn float_display_matches_interpreter_repr() {
    assert_eq!(Number::Float(2.5).to_string(), "2.5");
    assert_eq!(Number::Float(9.0).to_string(), "9.0");
    assert_eq!(Number::Float(1e16).to_string(), "1e+16");
    assert_eq!(Number::Float(1.5e-5).to_string(), "1.5e-05");
    assert_eq!(Number::Float(0.0001).to_string(), "0.0001");
    assert_eq!(Number::Float(-0.0).to_string(), "-0.0");
    assert_eq!(Number::from(-42).to_string(), "-42");
}
