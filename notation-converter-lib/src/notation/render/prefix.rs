use crate::notation::operator::BinaryOperator;
use crate::notation::syntax::chain::ChainData;
use crate::notation::syntax::expression_tree::Node;
use crate::notation::syntax::syntax_visitor::{walk_chain, walk_factor, SyntaxVisitor, Walker};
use crate::notation::token::Token;

pub(crate) fn render(root: &Node) -> Vec<Token> {
    let mut visitor = PrefixVisitor { tokens: Vec::new() };
    root.accept(&mut visitor);
    visitor.tokens
}

struct PrefixVisitor {
    tokens: Vec<Token>,
}

impl PrefixVisitor {
    /// The last applied operator is the outermost one, so the chain's operators are
    /// emitted in reverse before its operands: `a+b-c`, i.e. `((a+b)-c)`, becomes
    /// `- + a b c`.
    fn add_chain<'a>(&mut self, chain: &'a ChainData, walker: &mut Walker<'a, Token>) {
        self.tokens
            .extend(chain.operators().rev().map(|operator| operator.token()));
        walk_chain(walker, chain);
    }
}

impl<'a> SyntaxVisitor<'a> for PrefixVisitor {
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
        if exponent.is_some() {
            self.tokens.push(BinaryOperator::Exponentiate.token());
        }
        walk_factor(walker, base, exponent);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notation::render::test_support::{parse_text, spaced};
    use parameterized_macro::parameterized;

    #[parameterized(
    expression = {
    "a",
    "a+b",
    "a-b-c",
    "a-b+c*d",
    "a^b^c",
    "a+b*c",
    "(a+b)*c",
    "a*b/c*d",
    "(x)^2",
    "(a+3)+var^(b+282*c)",
    },
    expected = {
    "a",
    "+ a b",
    "- - a b c",
    "+ - a b * c d",
    "^ a ^ b c",
    "+ a * b c",
    "* + a b c",
    "* / * a b c d",
    "^ x 2",
    "+ + a 3 ^ var + b * 282 c",
    }
    )]
    fn expression_renders_in_prefix(expression: &str, expected: &str) {
        let tree = parse_text(expression);

        assert_eq!(spaced(&render(&tree)), expected)
    }
}
