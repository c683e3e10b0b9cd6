use crate::notation::error::LexError;
use crate::notation::token::{Token, TokenKind};
use log::trace;
use std::iter::Peekable;
use std::str::CharIndices;

/// Splits the given expression into tokens.
///
/// Letters and digits are read with maximal munch: a run of letters is one atom,
/// a run of digits is one atom, and the two never share an atom. Whitespace is
/// not allowed anywhere in the expression.
///
/// # Arguments
///
/// * `expression`: An infix expression, without a trailing newline.
///
/// returns: The tokens of the expression, in order.
///
/// # Examples
///
/// ```
/// use notation_converter::notation::lexer::tokenize;
/// use notation_converter::notation::token::Token;
///
/// let tokens = tokenize("x^2").unwrap();
/// assert_eq!(tokens[0], Token::atom("x"));
/// ```
pub fn tokenize(expression: &str) -> Result<Vec<Token>, LexError> {
    let mut lexer = Lexer::new(expression);
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next_token()? {
        tokens.push(token);
    }
    trace!("tokenized {:?} into {:?}", expression, tokens);
    Ok(tokens)
}

struct Lexer<'a> {
    input: &'a str,
    characters: Peekable<CharIndices<'a>>,
    position: usize,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Lexer {
            input,
            characters: input.char_indices().peekable(),
            position: 0,
        }
    }

    fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        let (start, character) = match self.characters.next() {
            Some(next) => next,
            None => return Ok(None),
        };
        let position = self.position;
        self.position += 1;

        let token = if character.is_ascii_alphabetic() {
            self.read_atom(start, |c| c.is_ascii_alphabetic())
        } else if character.is_ascii_digit() {
            self.read_atom(start, |c| c.is_ascii_digit())
        } else {
            let kind = TokenKind::from_symbol(character)
                .ok_or(LexError::InvalidCharacter { character, position })?;
            Token::new(kind, character)
        };
        Ok(Some(token))
    }

    /// Consumes the rest of a run of characters of the same class as the first one.
    fn read_atom(&mut self, start: usize, same_class: impl Fn(char) -> bool) -> Token {
        let mut end = start + 1;
        while let Some(&(index, character)) = self.characters.peek() {
            if !same_class(character) {
                break;
            }
            self.characters.next();
            self.position += 1;
            end = index + character.len_utf8();
        }
        Token::atom(&self.input[start..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parameterized_macro::parameterized;

    #[test]
    fn empty_expression_returns_no_tokens() {
        assert_eq!(tokenize("").unwrap(), vec![]);
    }

    #[test]
    fn example_expression_returns_tokens() {
        let tokens = tokenize("(a+3)+var^(b+282*c)").unwrap();

        assert_eq!(
            tokens,
            vec![
                Token::left_parenthesis(),
                Token::atom("a"),
                Token::new(TokenKind::Plus, "+"),
                Token::atom("3"),
                Token::right_parenthesis(),
                Token::new(TokenKind::Plus, "+"),
                Token::atom("var"),
                Token::new(TokenKind::Caret, "^"),
                Token::left_parenthesis(),
                Token::atom("b"),
                Token::new(TokenKind::Plus, "+"),
                Token::atom("282"),
                Token::new(TokenKind::Asterisk, "*"),
                Token::atom("c"),
                Token::right_parenthesis(),
            ]
        )
    }

    #[test]
    fn every_symbol_is_recognized() {
        let kinds: Vec<TokenKind> = tokenize("()^*/+-")
            .unwrap()
            .into_iter()
            .map(|token| token.kind)
            .collect();

        assert_eq!(
            kinds,
            vec![
                TokenKind::LeftParenthesis,
                TokenKind::RightParenthesis,
                TokenKind::Caret,
                TokenKind::Asterisk,
                TokenKind::ForwardSlash,
                TokenKind::Plus,
                TokenKind::Dash,
            ]
        )
    }

    #[test]
    fn letters_and_digits_are_separate_atoms() {
        let tokens = tokenize("ab12cd").unwrap();

        assert_eq!(
            tokens,
            vec![Token::atom("ab"), Token::atom("12"), Token::atom("cd")]
        )
    }

    #[test]
    fn mixed_case_letters_form_one_atom() {
        assert_eq!(tokenize("VarName").unwrap(), vec![Token::atom("VarName")]);
    }

    #[parameterized(
    expression = {
    "a$b",
    "a + b",
    "1.5",
    "x=y",
    "é",
    "ab\n",
    },
    expected_character = {
    '$',
    ' ',
    '.',
    '=',
    'é',
    '\n',
    },
    expected_position = {
    1,
    1,
    1,
    1,
    0,
    2,
    }
    )]
    fn invalid_character_is_reported_with_position(
        expression: &str,
        expected_character: char,
        expected_position: usize,
    ) {
        let error = tokenize(expression).unwrap_err();

        assert_eq!(
            error,
            LexError::InvalidCharacter {
                character: expected_character,
                position: expected_position,
            }
        )
    }

    #[test]
    fn position_counts_characters_not_bytes() {
        let error = tokenize("ab+é").unwrap_err();

        assert_eq!(error.position(), 3)
    }
}
