use std::fmt;
use std::fmt::Formatter;

/// The category of a discrete part of an expression.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TokenKind {
    LeftParenthesis,
    RightParenthesis,
    Caret,
    Asterisk,
    ForwardSlash,
    Plus,
    Dash,
    /// A variable name or an integer literal. The grammar does not tell them apart.
    Atom,
}

impl TokenKind {
    /// The kind of a single-character symbol, if it is one.
    pub fn from_symbol(symbol: char) -> Option<TokenKind> {
        match symbol {
            '(' => Some(TokenKind::LeftParenthesis),
            ')' => Some(TokenKind::RightParenthesis),
            '^' => Some(TokenKind::Caret),
            '*' => Some(TokenKind::Asterisk),
            '/' => Some(TokenKind::ForwardSlash),
            '+' => Some(TokenKind::Plus),
            '-' => Some(TokenKind::Dash),
            _ => None,
        }
    }
}

/// A discrete part of an expression, together with the text it was read from.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>) -> Token {
        Token {
            kind,
            lexeme: lexeme.into(),
        }
    }

    pub fn atom(lexeme: impl Into<String>) -> Token {
        Token::new(TokenKind::Atom, lexeme)
    }

    pub fn left_parenthesis() -> Token {
        Token::new(TokenKind::LeftParenthesis, "(")
    }

    pub fn right_parenthesis() -> Token {
        Token::new(TokenKind::RightParenthesis, ")")
    }

    pub fn is_atom(&self) -> bool {
        self.kind == TokenKind::Atom
    }

    /// Number of characters the token occupied in the source text.
    pub(crate) fn width(&self) -> usize {
        self.lexeme.chars().count()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lexeme)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self.kind, self.lexeme)
    }
}
