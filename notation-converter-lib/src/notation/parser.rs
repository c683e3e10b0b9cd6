//! Predictive recursive-descent parser over an explicit stack.
//!
//! ```text
//! Expression -> Term ( ('+'|'-') Term )*
//! Term       -> Factor ( ('*'|'/') Factor )*
//! Factor     -> Primary ('^' Factor)?
//! Primary    -> Atom | '(' Expression ')'
//! ```
//!
//! The grammar has no left recursion. `+ - * /` chains are collected left to
//! right into one chain node per precedence level, and a run of `^` is folded
//! to the right once its last operand is known. Every decision is made from the
//! next unconsumed token, so there is no backtracking.
//!
//! Each open parenthesis gets a `Frame` on an explicit stack instead of a
//! nested call, so any nesting depth parses in constant call-stack space.

use crate::notation::error::ParseError;
use crate::notation::operator::BinaryOperator;
use crate::notation::syntax::chain::{ChainData, ChainLink};
use crate::notation::syntax::expression_tree::Node;
use crate::notation::token::{Token, TokenKind};
use log::trace;

const EXPECTED_PRIMARY: &str = "an atom or '('";
const EXPECTED_RIGHT_PARENTHESIS: &str = "')'";
const EXPECTED_CARET: &str = "'^'";
const EXPECTED_OPERATOR: &str = "an operator or end of input";

/// Parses the given tokens into a parse tree rooted at an `Expression` node.
///
/// # Arguments
///
/// * `tokens`: The tokens to parse, in infix order.
///
/// returns: The parse tree of the whole token sequence.
///
/// # Examples
///
/// ```
/// use notation_converter::notation::parser::parse;
/// use notation_converter::notation::token::{Token, TokenKind};
///
/// let tokens = vec![
///     Token::atom("x"),
///     Token::new(TokenKind::Caret, "^"),
///     Token::atom("2"),
/// ];
/// let tree = parse(tokens).unwrap();
/// assert_eq!(tree.node_name(), "Expression");
/// ```
pub fn parse(tokens: Vec<Token>) -> Result<Node, ParseError> {
    Parser::new(&tokens).parse_expression()
}

struct Parser<'a> {
    tokens: &'a [Token],
    cursor: usize,
    /// Character offset of the token under the cursor.
    position: usize,
    /// For each `(`, the index of its matching `)`.
    closing: Vec<Option<usize>>,
}

/// An `Expression` under construction: the outermost one, or one inside an open `(`.
#[derive(Default)]
struct Frame {
    expression: Option<ChainData>,
    additive: Option<BinaryOperator>,
    term: Option<ChainData>,
    multiplicative: Option<BinaryOperator>,
    /// Bases of the current `^` run, outermost first.
    bases: Vec<Node>,
    /// Whether the group this frame parses is itself the base of a `^`.
    group_takes_exponent: bool,
}

impl Frame {
    fn group(takes_exponent: bool) -> Frame {
        Frame {
            group_takes_exponent: takes_exponent,
            ..Frame::default()
        }
    }

    /// Closes the current `^` run with its last operand: `a^b^c` is `a^(b^c)`.
    fn close_factor(&mut self, last: Node) -> Node {
        self.bases
            .drain(..)
            .rev()
            .fold(Node::new_factor(last), |exponent, base| {
                Node::new_power(base, exponent)
            })
    }

    fn continue_term(&mut self, factor: Node, operator: BinaryOperator) {
        let term = extend_chain(self.term.take(), self.multiplicative.take(), factor);
        self.term = Some(term);
        self.multiplicative = Some(operator);
    }

    fn continue_expression(&mut self, factor: Node, operator: BinaryOperator) {
        let term = self.close_term(factor);
        let expression = extend_chain(self.expression.take(), self.additive.take(), term);
        self.expression = Some(expression);
        self.additive = Some(operator);
    }

    fn close_term(&mut self, factor: Node) -> Node {
        Node::Term(extend_chain(self.term.take(), self.multiplicative.take(), factor))
    }

    fn close(mut self, factor: Node) -> Node {
        let term = self.close_term(factor);
        Node::Expression(extend_chain(self.expression.take(), self.additive.take(), term))
    }
}

/// Appends the operand to the chain, or starts a chain with it.
fn extend_chain(
    chain: Option<ChainData>,
    operator: Option<BinaryOperator>,
    operand: Node,
) -> ChainData {
    match (chain, operator) {
        (Some(mut chain), Some(operator)) => {
            chain.links.push(ChainLink::new(operator, operand));
            chain
        }
        _ => ChainData::new_single(operand),
    }
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Parser {
            tokens,
            cursor: 0,
            position: 0,
            closing: matching_parentheses(tokens),
        }
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.cursor)
    }

    fn advance(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.cursor)?;
        self.cursor += 1;
        self.position += token.width();
        Some(token)
    }

    /// Consumes the next token if it has the given kind.
    fn expect(&mut self, kind: TokenKind, expected: &'static str) -> Result<&'a Token, ParseError> {
        match self.peek() {
            Some(token) if token.kind == kind => {
                self.advance();
                Ok(token)
            }
            Some(token) => Err(self.unexpected_token(token, expected)),
            None => Err(ParseError::UnexpectedEnd { expected }),
        }
    }

    fn unexpected_token(&self, token: &Token, expected: &'static str) -> ParseError {
        ParseError::UnexpectedToken {
            found: token.lexeme.clone(),
            position: self.position,
            expected,
        }
    }

    /// Expression -> Term ( ('+'|'-') Term )*
    ///
    /// Consumes every token; anything left after a complete expression is an error.
    fn parse_expression(&mut self) -> Result<Node, ParseError> {
        let mut open_groups: Vec<Frame> = Vec::new();
        let mut frame = Frame::default();

        'primary: loop {
            // Factor -> Primary ('^' Factor)?
            let mut takes_exponent = matches!(
                self.token_after_primary(),
                Some(Token {
                    kind: TokenKind::Caret,
                    ..
                })
            );
            trace!(
                "factor at token {}, exponent follows: {}",
                self.cursor,
                takes_exponent
            );

            // Primary -> Atom | '(' Expression ')'
            let mut operand = match self.peek() {
                Some(token) if token.is_atom() => {
                    self.advance();
                    Node::new_atom(token.lexeme.clone())
                }
                Some(token) if token.kind == TokenKind::LeftParenthesis => {
                    self.advance();
                    trace!("group opened at depth {}", open_groups.len() + 1);
                    let parent = std::mem::replace(&mut frame, Frame::group(takes_exponent));
                    open_groups.push(parent);
                    continue 'primary;
                }
                Some(token) => return Err(self.unexpected_token(token, EXPECTED_PRIMARY)),
                None => {
                    return Err(ParseError::UnexpectedEnd {
                        expected: EXPECTED_PRIMARY,
                    })
                }
            };

            loop {
                if takes_exponent {
                    self.expect(TokenKind::Caret, EXPECTED_CARET)?;
                    frame.bases.push(operand);
                    continue 'primary;
                }
                let factor = frame.close_factor(operand);

                let token = match self.peek() {
                    Some(token) => token,
                    None if open_groups.is_empty() => return Ok(frame.close(factor)),
                    None => {
                        return Err(ParseError::UnexpectedEnd {
                            expected: EXPECTED_RIGHT_PARENTHESIS,
                        })
                    }
                };

                // Term -> Factor ( ('*'|'/') Factor )*
                if let Some(operator) = self.peek_operator(BinaryOperator::is_multiplicative) {
                    self.advance();
                    frame.continue_term(factor, operator);
                    continue 'primary;
                }
                if let Some(operator) = self.peek_operator(BinaryOperator::is_additive) {
                    self.advance();
                    frame.continue_expression(factor, operator);
                    continue 'primary;
                }

                match open_groups.pop() {
                    Some(parent) if token.kind == TokenKind::RightParenthesis => {
                        self.advance();
                        let group = std::mem::replace(&mut frame, parent);
                        takes_exponent = group.group_takes_exponent;
                        operand = Node::new_group(group.close(factor));
                        trace!("group closed at depth {}", open_groups.len() + 1);
                    }
                    Some(_) => {
                        return Err(self.unexpected_token(token, EXPECTED_RIGHT_PARENTHESIS))
                    }
                    None => return Err(self.unexpected_token(token, EXPECTED_OPERATOR)),
                }
            }
        }
    }

    fn peek_operator(&self, level: impl Fn(&BinaryOperator) -> bool) -> Option<BinaryOperator> {
        self.peek()
            .and_then(|token| BinaryOperator::from_kind(token.kind))
            .filter(|operator| level(operator))
    }

    /// Finds the token right after the primary starting at the cursor, without consuming
    /// anything. A parenthesized primary is skipped as a balanced run, so the token after
    /// its matching `)` is returned.
    ///
    /// Returns `None` when the primary ends the input, is unbalanced, or does not start
    /// with an atom or `(`; the real parse reports those cases.
    fn token_after_primary(&self) -> Option<&'a Token> {
        let last = match self.tokens.get(self.cursor)?.kind {
            TokenKind::Atom => self.cursor,
            TokenKind::LeftParenthesis => self.closing[self.cursor]?,
            _ => return None,
        };
        self.tokens.get(last + 1)
    }
}

/// Pairs every `(` with its `)` in one pass. Unbalanced parentheses have no entry.
fn matching_parentheses(tokens: &[Token]) -> Vec<Option<usize>> {
    let mut closing = vec![None; tokens.len()];
    let mut open = Vec::new();
    for (index, token) in tokens.iter().enumerate() {
        match token.kind {
            TokenKind::LeftParenthesis => open.push(index),
            TokenKind::RightParenthesis => {
                if let Some(start) = open.pop() {
                    closing[start] = Some(index);
                }
            }
            _ => {}
        }
    }
    closing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notation::lexer::tokenize;
    use parameterized_macro::parameterized;

    fn parse_text(expression: &str) -> Result<Node, ParseError> {
        parse(tokenize(expression).unwrap())
    }

    fn atom_factor(lexeme: &str) -> Node {
        Node::new_factor(Node::new_atom(lexeme))
    }

    fn atom_term(lexeme: &str) -> Node {
        Node::new_single_term(atom_factor(lexeme))
    }

    #[test]
    fn single_atom_is_wrapped_in_every_level() {
        let tree = parse_text("x").unwrap();

        assert_eq!(tree, Node::new_expression(atom_term("x"), vec![]))
    }

    #[test]
    fn additive_chain_is_flattened_left_to_right() {
        let tree = parse_text("a+b-c").unwrap();

        let expected = Node::new_expression(
            atom_term("a"),
            vec![
                ChainLink::new(BinaryOperator::Add, atom_term("b")),
                ChainLink::new(BinaryOperator::Subtract, atom_term("c")),
            ],
        );
        assert_eq!(tree, expected)
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        let tree = parse_text("a+b*c").unwrap();

        let product = Node::new_term(
            atom_factor("b"),
            vec![ChainLink::new(BinaryOperator::Multiply, atom_factor("c"))],
        );
        let expected = Node::new_expression(
            atom_term("a"),
            vec![ChainLink::new(BinaryOperator::Add, product)],
        );
        assert_eq!(tree, expected)
    }

    #[test]
    fn exponentiation_nests_to_the_right() {
        let tree = parse_text("a^b^c").unwrap();

        let power = Node::new_power(
            Node::new_atom("a"),
            Node::new_power(Node::new_atom("b"), atom_factor("c")),
        );
        let expected = Node::new_expression(Node::new_single_term(power), vec![]);
        assert_eq!(tree, expected)
    }

    #[test]
    fn parenthesized_base_takes_exponent() {
        let tree = parse_text("(a+(b))^c").unwrap();

        let inner_group = Node::new_group(Node::new_expression(atom_term("b"), vec![]));
        let group = Node::new_group(Node::new_expression(
            atom_term("a"),
            vec![ChainLink::new(
                BinaryOperator::Add,
                Node::new_single_term(Node::new_factor(inner_group)),
            )],
        ));
        let expected = Node::new_expression(
            Node::new_single_term(Node::new_power(group, atom_factor("c"))),
            vec![],
        );
        assert_eq!(tree, expected)
    }

    #[test]
    fn lookahead_does_not_consume_tokens() {
        let tokens = tokenize("(a)^b").unwrap();
        let parser = Parser::new(&tokens);

        let after = parser.token_after_primary().unwrap();

        assert_eq!(after.kind, TokenKind::Caret);
        assert_eq!(parser.cursor, 0);
    }

    #[test]
    fn lookahead_past_unbalanced_group_finds_nothing() {
        let tokens = tokenize("((a)^b").unwrap();
        let parser = Parser::new(&tokens);

        assert_eq!(parser.token_after_primary(), None)
    }

    #[test]
    fn matching_parentheses_are_paired_once() {
        let tokens = tokenize("((a)+(b))^c").unwrap();

        let closing = matching_parentheses(&tokens);

        assert_eq!(closing[0], Some(8));
        assert_eq!(closing[1], Some(3));
        assert_eq!(closing[5], Some(7));
        assert_eq!(closing[2], None);
    }

    #[test]
    fn long_power_chain_nests_to_the_right() {
        let expression = vec!["a"; 50_000].join("^");

        let tree = parse_text(&expression).unwrap();

        let mut depth = 0;
        let mut factor = match &tree {
            Node::Expression(chain) => match chain.head() {
                Node::Term(term) => term.head(),
                other => panic!("expected a term, got {}", other.node_name()),
            },
            other => panic!("expected an expression, got {}", other.node_name()),
        };
        while let Node::Factor {
            exponent: Some(exponent),
            ..
        } = factor
        {
            depth += 1;
            factor = &**exponent;
        }
        assert_eq!(depth, 49_999);
    }

    #[test]
    fn deeply_nested_groups_parse() {
        let expression = format!("{}a{}", "(".repeat(20_000), ")".repeat(20_000));

        let mut node = &parse_text(&expression).unwrap();
        let mut groups = 0;
        loop {
            node = match node {
                Node::Expression(chain) | Node::Term(chain) => chain.head(),
                Node::Factor { base, .. } => &**base,
                Node::Group(inner) => {
                    groups += 1;
                    &**inner
                }
                Node::Atom(_) => break,
            }
        }
        assert_eq!(groups, 20_000);
    }

    #[test]
    fn group_inside_power_chain_is_a_base() {
        let tree = parse_text("a^(b)^c").unwrap();

        let group = Node::new_group(Node::new_expression(atom_term("b"), vec![]));
        let power = Node::new_power(
            Node::new_atom("a"),
            Node::new_power(group, atom_factor("c")),
        );
        assert_eq!(
            tree,
            Node::new_expression(Node::new_single_term(power), vec![])
        )
    }

    #[parameterized(
    expression = {
    "",
    "(a+b",
    "a+",
    "a^",
    "(",
    "((a)",
    },
    expected = {
    EXPECTED_PRIMARY,
    EXPECTED_RIGHT_PARENTHESIS,
    EXPECTED_PRIMARY,
    EXPECTED_PRIMARY,
    EXPECTED_PRIMARY,
    EXPECTED_RIGHT_PARENTHESIS,
    }
    )]
    fn incomplete_expression_is_unexpected_end(expression: &str, expected: &'static str) {
        let error = parse_text(expression).unwrap_err();

        assert_eq!(error, ParseError::UnexpectedEnd { expected })
    }

    #[parameterized(
    expression = {
    "a+*b",
    "a)",
    "a(b)",
    "ab12",
    ")a",
    "a+()",
    "(a+b))",
    },
    found = {
    "*",
    ")",
    "(",
    "12",
    ")",
    ")",
    ")",
    },
    position = {
    2,
    1,
    1,
    2,
    0,
    3,
    5,
    }
    )]
    fn misplaced_token_is_unexpected_token(expression: &str, found: &str, position: usize) {
        let error = parse_text(expression).unwrap_err();

        match error {
            ParseError::UnexpectedToken {
                found: actual_found,
                position: actual_position,
                ..
            } => {
                assert_eq!(actual_found, found);
                assert_eq!(actual_position, position);
            }
            other => panic!("expected an unexpected token error, got {:?}", other),
        }
    }
}
