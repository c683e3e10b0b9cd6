use crate::notation::render::{parenthesized, postfix, prefix};
use crate::notation::syntax::chain::{ChainData, ChainLink};
use crate::notation::syntax::syntax_visitor::{walk, walk_group, SyntaxVisitor, Walker};
use crate::notation::token::Token;
use ptree::{write_tree, TreeBuilder};
use std::fmt;
use std::fmt::{Display, Formatter};

/// A node of the parse tree, with one variant per grammar symbol.
///
/// ```text
/// Expression -> Term ( ('+'|'-') Term )*
/// Term       -> Factor ( ('*'|'/') Factor )*
/// Factor     -> Primary ('^' Factor)?
/// Primary    -> Atom | '(' Expression ')'
/// ```
///
/// The empty continuation of a rule is an empty list of chain links or an absent
/// exponent, never a node of its own.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Node {
    // Terminal symbols (leaves)
    Atom(String),
    // Non-terminal symbols (non-leaves)
    Group(Box<Node>),
    Factor {
        base: Box<Node>,
        exponent: Option<Box<Node>>,
    },
    Term(ChainData),
    Expression(ChainData),
}

impl Node {
    pub fn new_atom(lexeme: impl Into<String>) -> Node {
        Node::Atom(lexeme.into())
    }

    pub fn new_group(inner: Node) -> Node {
        Node::Group(Box::new(inner))
    }

    pub fn new_factor(base: Node) -> Node {
        Node::Factor {
            base: Box::new(base),
            exponent: None,
        }
    }

    pub fn new_power(base: Node, exponent: Node) -> Node {
        Node::Factor {
            base: Box::new(base),
            exponent: Some(Box::new(exponent)),
        }
    }

    pub fn new_term(head: Node, links: Vec<ChainLink>) -> Node {
        Node::Term(ChainData::new(head, links))
    }

    pub fn new_single_term(head: Node) -> Node {
        Node::Term(ChainData::new_single(head))
    }

    pub fn new_expression(head: Node, links: Vec<ChainLink>) -> Node {
        Node::Expression(ChainData::new(head, links))
    }

    pub fn node_name(&self) -> String {
        match self {
            Node::Atom(lexeme) => lexeme.clone(),
            Node::Group(_) => "Group".into(),
            Node::Factor { .. } => "Factor".into(),
            Node::Term(_) => "Term".into(),
            Node::Expression(_) => "Expression".into(),
        }
    }

    /// Walks the whole tree with the given visitor.
    pub(crate) fn accept<'a, V: SyntaxVisitor<'a>>(&'a self, visitor: &mut V) {
        walk(self, visitor)
    }

    /// Calls the correct visitor method for the node variant on the given visitor.
    pub(crate) fn dispatch<'a, V: SyntaxVisitor<'a>>(
        &'a self,
        visitor: &mut V,
        walker: &mut Walker<'a, V::Action>,
    ) {
        match self {
            Node::Atom(lexeme) => visitor.visit_atom(lexeme, walker),
            Node::Group(inner) => visitor.visit_group(inner, walker),
            Node::Factor { base, exponent } => {
                visitor.visit_factor(base, exponent.as_deref(), walker)
            }
            Node::Term(chain) => visitor.visit_term(chain, walker),
            Node::Expression(chain) => visitor.visit_expression(chain, walker),
        }
    }

    /// Moves the children out of the node, leaving empty atoms in their place.
    fn take_children(&mut self, children: &mut Vec<Node>) {
        let mut take =
            |node: &mut Node| children.push(std::mem::replace(node, Node::Atom(String::new())));
        match self {
            Node::Atom(_) => {}
            Node::Group(inner) => take(&mut **inner),
            Node::Factor { base, exponent } => {
                take(&mut **base);
                if let Some(exponent) = exponent {
                    take(&mut **exponent);
                }
            }
            Node::Term(chain) | Node::Expression(chain) => {
                take(&mut *chain.head);
                for mut link in std::mem::take(&mut chain.links) {
                    take(&mut link.operand);
                }
            }
        }
    }

    /// Infix tokens with a parenthesis pair around every binary operation,
    /// except for the one pair that would enclose the whole expression.
    pub fn to_fully_parenthesized(&self) -> Vec<Token> {
        parenthesized::render(self)
    }

    pub fn to_postfix(&self) -> Vec<Token> {
        postfix::render(self)
    }

    pub fn to_prefix(&self) -> Vec<Token> {
        prefix::render(self)
    }

    fn format_tree(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut visitor = TreeBuilderVisitor {
            builder: TreeBuilder::new("parse tree".into()),
        };
        self.accept(&mut visitor);

        let mut buffer: Vec<u8> = Vec::new();
        match write_tree(&visitor.builder.build(), &mut buffer) {
            Ok(_) => {}
            Err(_) => return Err(fmt::Error),
        }
        let text = match std::str::from_utf8(&buffer) {
            Ok(text) => text,
            Err(_) => return Err(fmt::Error),
        };
        f.write_str(text)
    }
}

/// Tears the tree down from an explicit list of detached subtrees, so dropping takes
/// constant call-stack space at any depth.
impl Drop for Node {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.take_children(&mut pending);
        while let Some(mut node) = pending.pop() {
            node.take_children(&mut pending);
        }
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.format_tree(f)
    }
}

struct TreeBuilderVisitor {
    builder: TreeBuilder,
}

enum TreeAction {
    Leaf(String),
    End,
}

impl TreeBuilderVisitor {
    fn add_chain<'a>(
        &mut self,
        node_name: &str,
        chain: &'a ChainData,
        walker: &mut Walker<'a, TreeAction>,
    ) {
        self.builder.begin_child(node_name.into());
        walker.visit(chain.head());
        for link in chain.links() {
            walker.act(TreeAction::Leaf(link.operator().to_string()));
            walker.visit(link.operand());
        }
        walker.act(TreeAction::End);
    }
}

impl<'a> SyntaxVisitor<'a> for TreeBuilderVisitor {
    type Action = TreeAction;

    fn act(&mut self, action: TreeAction) {
        match action {
            TreeAction::Leaf(text) => {
                self.builder.add_empty_child(text);
            }
            TreeAction::End => {
                self.builder.end_child();
            }
        }
    }
    fn visit_atom(&mut self, lexeme: &'a str, _walker: &mut Walker<'a, TreeAction>) {
        self.builder.add_empty_child(lexeme.to_string());
    }
    fn visit_group(&mut self, inner: &'a Node, walker: &mut Walker<'a, TreeAction>) {
        self.builder.begin_child("Group".into());
        self.builder.add_empty_child("(".into());
        walk_group(walker, inner);
        walker.act(TreeAction::Leaf(")".into()));
        walker.act(TreeAction::End);
    }
    fn visit_expression(&mut self, chain: &'a ChainData, walker: &mut Walker<'a, TreeAction>) {
        self.add_chain("Expression", chain, walker);
    }
    fn visit_term(&mut self, chain: &'a ChainData, walker: &mut Walker<'a, TreeAction>) {
        self.add_chain("Term", chain, walker);
    }
    fn visit_factor(
        &mut self,
        base: &'a Node,
        exponent: Option<&'a Node>,
        walker: &mut Walker<'a, TreeAction>,
    ) {
        self.builder.begin_child("Factor".into());
        walker.visit(base);
        if let Some(exponent) = exponent {
            walker.act(TreeAction::Leaf("^".into()));
            walker.visit(exponent);
        }
        walker.act(TreeAction::End);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notation::operator::BinaryOperator;
    use pretty_assertions::assert_eq;

    fn create_simple_tree() -> Node {
        // x+y
        let x = Node::new_single_term(Node::new_factor(Node::new_atom("x")));
        let y = Node::new_single_term(Node::new_factor(Node::new_atom("y")));
        Node::new_expression(x, vec![ChainLink::new(BinaryOperator::Add, y)])
    }

    #[test]
    fn print_succeeds() {
        let tree = create_simple_tree();

        print!("{}", tree);
    }

    #[test]
    fn printed_tree_contains_every_symbol() {
        let printed = create_simple_tree().to_string();

        for expected in ["parse tree", "Expression", "Term", "Factor", "x", "+", "y"] {
            assert!(printed.contains(expected), "missing {} in\n{}", expected, printed)
        }
    }

    #[test]
    fn node_names_match_grammar_symbols() {
        let tree = create_simple_tree();

        assert_eq!(tree.node_name(), "Expression");
        assert_eq!(Node::new_atom("x").node_name(), "x");
        assert_eq!(Node::new_group(Node::new_atom("x")).node_name(), "Group");
    }

    #[test]
    fn deep_power_chain_is_dropped_without_overflow() {
        let mut tree = Node::new_factor(Node::new_atom("x"));
        for _ in 0..200_000 {
            tree = Node::new_power(Node::new_atom("x"), tree);
        }

        drop(tree);
    }

    #[test]
    fn trees_built_the_same_way_are_equal() {
        assert_eq!(create_simple_tree(), create_simple_tree());
        assert_ne!(
            create_simple_tree(),
            Node::new_single_term(Node::new_factor(Node::new_atom("x")))
        );
    }
}
