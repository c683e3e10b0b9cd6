use thiserror::Error;

/// The input contained something that is not part of any token.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("invalid character '{character}' at position {position}")]
    InvalidCharacter { character: char, position: usize },
}

/// The token sequence does not form a single complete expression.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unexpected token '{found}' at position {position}, expected {expected}")]
    UnexpectedToken {
        found: String,
        position: usize,
        expected: &'static str,
    },

    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEnd { expected: &'static str },
}

impl LexError {
    /// Character offset into the input where lexing failed.
    pub fn position(&self) -> usize {
        match self {
            LexError::InvalidCharacter { position, .. } => *position,
        }
    }
}

impl ParseError {
    /// Character offset of the offending token, if there was one.
    pub fn position(&self) -> Option<usize> {
        match self {
            ParseError::UnexpectedToken { position, .. } => Some(*position),
            ParseError::UnexpectedEnd { .. } => None,
        }
    }
}
