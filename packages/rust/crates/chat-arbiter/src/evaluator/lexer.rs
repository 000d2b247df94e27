//! Tokenizer for the arithmetic grammar.

use super::error::EvalError;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token {
    /// Raw literal text; validated here, converted in the parser.
    Number(String),
    /// Run of letters (only `e`/`E` pass the character gate).
    Name(String),
    Plus,
    Minus,
    Star,
    DoubleStar,
    Slash,
    LParen,
    RParen,
}

impl Token {
    pub(crate) fn describe(&self) -> String {
        match self {
            Self::Number(text) | Self::Name(text) => text.clone(),
            Self::Plus => "+".to_string(),
            Self::Minus => "-".to_string(),
            Self::Star => "*".to_string(),
            Self::DoubleStar => "**".to_string(),
            Self::Slash => "/".to_string(),
            Self::LParen => "(".to_string(),
            Self::RParen => ")".to_string(),
        }
    }
}

pub(crate) fn tokenize(input: &str) -> Result<Vec<Token>, EvalError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut pos = 0;
    while pos < chars.len() {
        let c = chars[pos];
        match c {
            c if c.is_whitespace() => pos += 1,
            '+' => {
                tokens.push(Token::Plus);
                pos += 1;
            }
            '-' => {
                tokens.push(Token::Minus);
                pos += 1;
            }
            '*' => {
                if chars.get(pos + 1) == Some(&'*') {
                    tokens.push(Token::DoubleStar);
                    pos += 2;
                } else {
                    tokens.push(Token::Star);
                    pos += 1;
                }
            }
            '/' => {
                tokens.push(Token::Slash);
                pos += 1;
            }
            '(' => {
                tokens.push(Token::LParen);
                pos += 1;
            }
            ')' => {
                tokens.push(Token::RParen);
                pos += 1;
            }
            '0'..='9' => {
                let (literal, next) = scan_number(&chars, pos)?;
                tokens.push(Token::Number(literal));
                pos = next;
            }
            '.' if chars.get(pos + 1).is_some_and(char::is_ascii_digit) => {
                let (literal, next) = scan_number(&chars, pos)?;
                tokens.push(Token::Number(literal));
                pos = next;
            }
            c if c.is_alphabetic() => {
                let start = pos;
                while pos < chars.len() && chars[pos].is_alphanumeric() {
                    pos += 1;
                }
                tokens.push(Token::Name(chars[start..pos].iter().collect()));
            }
            other => return Err(EvalError::UnexpectedToken(other.to_string())),
        }
    }
    Ok(tokens)
}

/// Scan `digits [. digits] [(e|E) [+|-] digits]` starting at `start`.
fn scan_number(chars: &[char], start: usize) -> Result<(String, usize), EvalError> {
    let mut pos = start;
    let mut is_plain_int = true;
    while pos < chars.len() && chars[pos].is_ascii_digit() {
        pos += 1;
    }
    if chars.get(pos) == Some(&'.') {
        is_plain_int = false;
        pos += 1;
        while pos < chars.len() && chars[pos].is_ascii_digit() {
            pos += 1;
        }
    }
    if matches!(chars.get(pos), Some('e' | 'E')) {
        is_plain_int = false;
        pos += 1;
        if matches!(chars.get(pos), Some('+' | '-')) {
            pos += 1;
        }
        let digits_start = pos;
        while pos < chars.len() && chars[pos].is_ascii_digit() {
            pos += 1;
        }
        if pos == digits_start {
            return Err(EvalError::InvalidNumber(chars[start..pos].iter().collect()));
        }
    }
    // Literal glued to letters (`2e3e`, `3ee`) is not a number.
    if chars.get(pos).is_some_and(|c| c.is_alphanumeric()) {
        return Err(EvalError::InvalidNumber(chars[start..=pos].iter().collect()));
    }
    let literal: String = chars[start..pos].iter().collect();
    if is_plain_int && literal.starts_with('0') && literal.chars().any(|c| c != '0') {
        return Err(EvalError::InvalidNumber(literal));
    }
    Ok((literal, pos))
}
