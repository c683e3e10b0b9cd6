use crate::notation::token::{Token, TokenKind};
use std::fmt;
use std::fmt::Formatter;

/// A binary arithmetic operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Exponentiate,
}

impl BinaryOperator {
    pub fn token(&self) -> Token {
        Token::new(self.kind(), self.symbol())
    }

    pub fn kind(&self) -> TokenKind {
        match self {
            BinaryOperator::Add => TokenKind::Plus,
            BinaryOperator::Subtract => TokenKind::Dash,
            BinaryOperator::Multiply => TokenKind::Asterisk,
            BinaryOperator::Divide => TokenKind::ForwardSlash,
            BinaryOperator::Exponentiate => TokenKind::Caret,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Exponentiate => "^",
        }
    }

    /// The operator a token stands for, if it is an operator token.
    pub fn from_kind(kind: TokenKind) -> Option<BinaryOperator> {
        match kind {
            TokenKind::Plus => Some(BinaryOperator::Add),
            TokenKind::Dash => Some(BinaryOperator::Subtract),
            TokenKind::Asterisk => Some(BinaryOperator::Multiply),
            TokenKind::ForwardSlash => Some(BinaryOperator::Divide),
            TokenKind::Caret => Some(BinaryOperator::Exponentiate),
            TokenKind::LeftParenthesis | TokenKind::RightParenthesis | TokenKind::Atom => None,
        }
    }

    pub fn precedence(&self) -> u8 {
        match self {
            BinaryOperator::Add | BinaryOperator::Subtract => 0,
            BinaryOperator::Multiply | BinaryOperator::Divide => 1,
            BinaryOperator::Exponentiate => 2,
        }
    }

    pub(crate) fn precedence_eq(&self, other: &Self) -> bool {
        self.precedence().eq(&other.precedence())
    }

    /// Whether the operator continues a `+`/`-` chain.
    pub(crate) fn is_additive(&self) -> bool {
        self.precedence_eq(&BinaryOperator::Add)
    }

    /// Whether the operator continues a `*`/`/` chain.
    pub(crate) fn is_multiplicative(&self) -> bool {
        self.precedence_eq(&BinaryOperator::Multiply)
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
