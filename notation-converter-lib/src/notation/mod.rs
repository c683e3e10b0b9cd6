pub mod error;
pub mod lexer;
pub mod operator;
pub mod parser;
mod render;
pub mod syntax;
pub mod token;

use crate::notation::token::Token;
use anyhow::{Context, Result};
use log::debug;
use string_builder::Builder;
use syntax::expression_tree::Node;

/// The three renderings of one expression, in the order they are presented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notations {
    pub parenthesized: String,
    pub postfix: String,
    pub prefix: String,
}

/// How tokens are joined into text.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Spacing {
    /// No separator, as in `a+(b*c)`.
    Compact,
    /// A single space between tokens, as in `a b c * +`.
    Separated,
}

impl Spacing {
    fn separator(&self) -> &'static str {
        match self {
            Spacing::Compact => "",
            Spacing::Separated => " ",
        }
    }
}

/// Renders the given infix expression in fully-parenthesized, postfix and prefix form.
///
/// # Arguments
///
/// * `expression`: A text expression in infix format, without whitespace.
///
/// returns: All three renderings of the expression.
///
/// # Examples
///
/// ```
/// use notation_converter::notation::convert;
/// # use anyhow::Result;
///
/// # fn main() -> Result<()> {
/// let notations = convert("a-b-c")?;
/// assert_eq!(notations.parenthesized, "(a-b)-c");
/// assert_eq!(notations.postfix, "a b - c -");
/// assert_eq!(notations.prefix, "- - a b c");
/// # Ok::<(), anyhow::Error>(()) }
/// ```
pub fn convert(expression: &str) -> Result<Notations> {
    let tree = parse_expression(expression)?;
    let notations = Notations {
        parenthesized: fully_parenthesized(&tree)?,
        postfix: postfix(&tree)?,
        prefix: prefix(&tree)?,
    };
    debug!("{:?}", notations);
    Ok(notations)
}

/// Converts the given input string into its parse tree.
///
/// # Arguments
///
/// * `expression`: The text-representation of the infix expression.
///
/// returns: The parse tree of the expression.
///
/// # Examples
///
/// ```
/// use notation_converter::notation::parse_expression;
/// # use anyhow::Result;
///
/// # fn main() -> Result<()> {
/// let tree = parse_expression("x^2")?;
/// println!("{}", tree);
/// # Ok::<(), anyhow::Error>(()) }
/// ```
pub fn parse_expression(expression: &str) -> Result<Node> {
    let tokens = lexer::tokenize(expression)
        .with_context(|| format!("Could not tokenize expression {:?}", expression))?;
    debug!("{} tokens read", tokens.len());
    let tree = parser::parse(tokens)
        .with_context(|| format!("Could not parse expression {:?}", expression))?;
    debug!("parsed expression {:?}", expression);
    Ok(tree)
}

/// The infix form of the tree with every binary operation parenthesized,
/// without a redundant pair around the whole expression.
pub fn fully_parenthesized(tree: &Node) -> Result<String> {
    tokens_to_string(&tree.to_fully_parenthesized(), Spacing::Compact)
}

/// The tree with postfix binary operators, tokens separated by single spaces.
pub fn postfix(tree: &Node) -> Result<String> {
    tokens_to_string(&tree.to_postfix(), Spacing::Separated)
}

/// The tree with prefix binary operators, tokens separated by single spaces.
pub fn prefix(tree: &Node) -> Result<String> {
    tokens_to_string(&tree.to_prefix(), Spacing::Separated)
}

/// Joins the lexemes of the given tokens into one string.
///
/// # Arguments
///
/// * `tokens`: The tokens to join.
/// * `spacing`: Whether to put a space between the tokens.
///
/// returns: The text of the tokens, with no leading or trailing separator.
///
/// # Examples
///
/// ```
/// use notation_converter::notation::{tokens_to_string, Spacing};
/// use notation_converter::notation::token::{Token, TokenKind};
/// # use anyhow::Result;
///
/// # fn main() -> Result<()> {
/// let tokens = vec![
///     Token::atom("x"),
///     Token::atom("2"),
///     Token::new(TokenKind::Caret, "^"),
/// ];
/// assert_eq!(tokens_to_string(&tokens, Spacing::Separated)?, "x 2 ^");
/// # Ok::<(), anyhow::Error>(()) }
/// ```
pub fn tokens_to_string(tokens: &[Token], spacing: Spacing) -> Result<String> {
    let mut builder = Builder::new(tokens.len() * 2);
    let lexemes = tokens.iter().map(|token| token.lexeme.as_str());

    // Called by path so it cannot resolve to the unstable `Iterator::intersperse`
    itertools::Itertools::intersperse(lexemes, spacing.separator())
        .for_each(|text| builder.append(text));

    builder.string().context("Failed to build token string")
}
