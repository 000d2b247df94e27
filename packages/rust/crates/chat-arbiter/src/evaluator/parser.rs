//! Recursive-descent parser and evaluator for the closed arithmetic grammar.
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := ('+' | '-') unary | power
//! power   := primary ('**' unary)?
//! primary := NUMBER | '(' expr ')'
//! ```
//!
//! `**` is right-associative and binds tighter than a unary sign on its left,
//! so `-2**2` is `-4` and `2**-1` is `0.5`. Names never evaluate.

use super::error::EvalError;
use super::lexer::Token;
use super::number::Number;

const MAX_NESTING_DEPTH: usize = 200;
const MAX_TOKENS: usize = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum UnaryOp {
    Plus,
    Minus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Expr {
    Literal(Number),
    Unary(UnaryOp, Box<Expr>),
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
}

impl Expr {
    /// Bottom-up evaluation.
    pub(crate) fn eval(&self) -> Result<Number, EvalError> {
        match self {
            Self::Literal(value) => Ok(value.clone()),
            Self::Unary(UnaryOp::Plus, operand) => operand.eval(),
            Self::Unary(UnaryOp::Minus, operand) => Ok(operand.eval()?.neg()),
            Self::Binary(op, lhs, rhs) => {
                let lhs = lhs.eval()?;
                let rhs = rhs.eval()?;
                match op {
                    BinaryOp::Add => lhs.add(rhs),
                    BinaryOp::Sub => lhs.sub(rhs),
                    BinaryOp::Mul => lhs.mul(rhs),
                    BinaryOp::Div => lhs.div(rhs),
                    BinaryOp::Pow => lhs.pow(rhs),
                }
            }
        }
    }
}

/// Parse a full token stream; trailing tokens are a syntax error.
pub(crate) fn parse(tokens: &[Token]) -> Result<Expr, EvalError> {
    if tokens.len() > MAX_TOKENS {
        return Err(EvalError::TooLong);
    }
    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let expr = parser.expr()?;
    match parser.peek() {
        None => Ok(expr),
        Some(token) => Err(EvalError::UnexpectedToken(token.describe())),
    }
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn bump(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expr(&mut self) -> Result<Expr, EvalError> {
        let mut lhs = self.term()?;
        loop {
            let op = match self.peek() {
                Some(Token::Plus) => BinaryOp::Add,
                Some(Token::Minus) => BinaryOp::Sub,
                _ => return Ok(lhs),
            };
            self.pos += 1;
            let rhs = self.term()?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
    }

    fn term(&mut self) -> Result<Expr, EvalError> {
        let mut lhs = self.unary()?;
        loop {
            let op = match self.peek() {
                Some(Token::Star) => BinaryOp::Mul,
                Some(Token::Slash) => BinaryOp::Div,
                _ => return Ok(lhs),
            };
            self.pos += 1;
            let rhs = self.unary()?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
    }

    fn unary(&mut self) -> Result<Expr, EvalError> {
        let op = match self.peek() {
            Some(Token::Plus) => UnaryOp::Plus,
            Some(Token::Minus) => UnaryOp::Minus,
            _ => return self.power(),
        };
        self.pos += 1;
        self.enter()?;
        let operand = self.unary();
        self.depth -= 1;
        Ok(Expr::Unary(op, Box::new(operand?)))
    }

    fn power(&mut self) -> Result<Expr, EvalError> {
        let base = self.primary()?;
        if self.peek() != Some(&Token::DoubleStar) {
            return Ok(base);
        }
        self.pos += 1;
        self.enter()?;
        let exponent = self.unary();
        self.depth -= 1;
        Ok(Expr::Binary(BinaryOp::Pow, Box::new(base), Box::new(exponent?)))
    }

    fn primary(&mut self) -> Result<Expr, EvalError> {
        match self.bump().cloned() {
            Some(Token::Number(literal)) => Ok(Expr::Literal(Number::from_literal(&literal)?)),
            Some(Token::LParen) => {
                if self.peek() == Some(&Token::RParen) {
                    return Err(EvalError::Unsupported);
                }
                self.enter()?;
                let inner = self.expr();
                self.depth -= 1;
                let inner = inner?;
                match self.bump() {
                    Some(Token::RParen) => Ok(inner),
                    Some(token) => Err(EvalError::UnexpectedToken(token.describe())),
                    None => Err(EvalError::UnexpectedEnd),
                }
            }
            Some(Token::Name(_)) => Err(EvalError::Unsupported),
            Some(token) => Err(EvalError::UnexpectedToken(token.describe())),
            None => Err(EvalError::UnexpectedEnd),
        }
    }

    fn enter(&mut self) -> Result<(), EvalError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(EvalError::TooDeep);
        }
        self.depth += 1;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/evaluator/parser.rs"]
mod tests;
