use crate::notation::operator::BinaryOperator;
use crate::notation::syntax::chain::ChainData;
use crate::notation::syntax::expression_tree::Node;
use crate::notation::syntax::syntax_visitor::{SyntaxVisitor, Walker};
use crate::notation::token::{Token, TokenKind};

pub(crate) fn render(root: &Node) -> Vec<Token> {
    let mut visitor = ParenthesizedVisitor { tokens: Vec::new() };
    root.accept(&mut visitor);
    strip_enclosing_parentheses(visitor.tokens)
}

struct ParenthesizedVisitor {
    tokens: Vec<Token>,
}

impl ParenthesizedVisitor {
    /// `a+b-c` becomes `((a+b)-c)`: one opening parenthesis per link up front, and
    /// one closing parenthesis after each link's operand.
    fn add_chain<'a>(&mut self, chain: &'a ChainData, walker: &mut Walker<'a, Token>) {
        self.tokens
            .extend(chain.links().iter().map(|_| Token::left_parenthesis()));
        walker.visit(chain.head());
        for link in chain.links() {
            walker.act(link.operator().token());
            walker.visit(link.operand());
            walker.act(Token::right_parenthesis());
        }
    }
}

impl<'a> SyntaxVisitor<'a> for ParenthesizedVisitor {
    type Action = Token;

    fn act(&mut self, token: Token) {
        self.tokens.push(token);
    }
    fn visit_atom(&mut self, lexeme: &'a str, _walker: &mut Walker<'a, Token>) {
        self.tokens.push(Token::atom(lexeme));
    }
    fn visit_expression(&mut self, chain: &'a ChainData, walker: &mut Walker<'a, Token>) {
        self.add_chain(chain, walker);
    }
    fn visit_term(&mut self, chain: &'a ChainData, walker: &mut Walker<'a, Token>) {
        self.add_chain(chain, walker);
    }
    fn visit_factor(
        &mut self,
        base: &'a Node,
        exponent: Option<&'a Node>,
        walker: &mut Walker<'a, Token>,
    ) {
        match exponent {
            None => walker.visit(base),
            Some(exponent) => {
                self.tokens.push(Token::left_parenthesis());
                walker.visit(base);
                walker.act(BinaryOperator::Exponentiate.token());
                walker.visit(exponent);
                walker.act(Token::right_parenthesis());
            }
        }
    }
}

/// Removes the outermost parenthesis pair, but only when it encloses everything.
pub(crate) fn strip_enclosing_parentheses(mut tokens: Vec<Token>) -> Vec<Token> {
    if matching_parenthesis(&tokens, 0) == Some(tokens.len().wrapping_sub(1)) {
        tokens.pop();
        tokens.remove(0);
    }
    tokens
}

/// Index of the `)` matching the `(` at `open`.
fn matching_parenthesis(tokens: &[Token], open: usize) -> Option<usize> {
    if tokens.get(open)?.kind != TokenKind::LeftParenthesis {
        return None;
    }
    let mut depth = 0usize;
    for (index, token) in tokens.iter().enumerate().skip(open) {
        match token.kind {
            TokenKind::LeftParenthesis => depth += 1,
            TokenKind::RightParenthesis => {
                depth -= 1;
                if depth == 0 {
                    return Some(index);
                }
            }
            _ => {}
        }
    }
    None
}
