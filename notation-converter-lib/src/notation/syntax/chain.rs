use crate::notation::operator::BinaryOperator;
use crate::notation::syntax::expression_tree::Node;

/// A flattened run of same-precedence, left-associative operations:
/// `head op₁ operand₁ op₂ operand₂ …`, applied left to right.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChainData {
    pub(crate) head: Box<Node>,
    pub(crate) links: Vec<ChainLink>,
}

/// One continuation of a chain: the operator and the operand to its right.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChainLink {
    pub(crate) operator: BinaryOperator,
    pub(crate) operand: Node,
}

impl ChainData {
    pub(crate) fn new(head: Node, links: Vec<ChainLink>) -> ChainData {
        ChainData {
            head: Box::new(head),
            links,
        }
    }

    pub(crate) fn new_single(head: Node) -> ChainData {
        Self::new(head, Vec::new())
    }

    pub fn head(&self) -> &Node {
        &self.head
    }

    pub fn links(&self) -> &[ChainLink] {
        &self.links
    }

    /// Operators in the order they are applied.
    pub fn operators(&self) -> impl DoubleEndedIterator<Item = BinaryOperator> + '_ {
        self.links.iter().map(|link| link.operator)
    }

    /// Operands in source order, head first.
    pub fn operands(&self) -> impl Iterator<Item = &Node> {
        std::iter::once(&*self.head).chain(self.links.iter().map(|link| &link.operand))
    }
}

impl ChainLink {
    pub(crate) fn new(operator: BinaryOperator, operand: Node) -> ChainLink {
        ChainLink { operator, operand }
    }

    pub fn operator(&self) -> BinaryOperator {
        self.operator
    }

    pub fn operand(&self) -> &Node {
        &self.operand
    }
}
