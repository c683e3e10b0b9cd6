use crate::notation::operator::BinaryOperator;
use crate::notation::syntax::chain::ChainData;
use crate::notation::syntax::expression_tree::Node;
use crate::notation::syntax::syntax_visitor::{walk_factor, SyntaxVisitor, Walker};
use crate::notation::token::Token;

pub(crate) fn render(root: &Node) -> Vec<Token> {
    let mut visitor = PostfixVisitor { tokens: Vec::new() };
    root.accept(&mut visitor);
    visitor.tokens
}

struct PostfixVisitor {
    tokens: Vec<Token>,
}

impl PostfixVisitor {
    /// Each operator follows the operand to its right, which keeps the chain
    /// left-associative: `a+b-c` becomes `a b + c -`.
    fn add_chain<'a>(&mut self, chain: &'a ChainData, walker: &mut Walker<'a, Token>) {
        walker.visit(chain.head());
        for link in chain.links() {
            walker.visit(link.operand());
            walker.act(link.operator().token());
        }
    }
}

impl<'a> SyntaxVisitor<'a> for PostfixVisitor {
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
        walk_factor(walker, base, exponent);
        if exponent.is_some() {
            walker.act(BinaryOperator::Exponentiate.token());
        }
    }
}
