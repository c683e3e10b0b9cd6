use crate::notation::syntax::chain::ChainData;
use crate::notation::syntax::expression_tree::Node;

/// Work still to be done by a traversal: a subtree to visit, or an action the visitor
/// performs once everything scheduled before it has been handled.
pub(crate) enum Step<'a, A> {
    Visit(&'a Node),
    Act(A),
}

/// The explicit work stack of a traversal, so nesting depth is bounded by memory
/// instead of the call stack.
///
/// A visitor method schedules the node's children and actions in the order they should
/// happen. Anything it does directly on itself happens before all of them.
pub(crate) struct Walker<'a, A> {
    stack: Vec<Step<'a, A>>,
    scheduled: Vec<Step<'a, A>>,
}

impl<'a, A> Walker<'a, A> {
    pub(crate) fn visit(&mut self, node: &'a Node) {
        self.scheduled.push(Step::Visit(node));
    }

    pub(crate) fn act(&mut self, action: A) {
        self.scheduled.push(Step::Act(action));
    }

    fn commit(&mut self) {
        self.stack.extend(self.scheduled.drain(..).rev());
    }
}

/// If a method is not implemented, the default implementation will continue in a pre-order
/// traversal of the tree.
pub(crate) trait SyntaxVisitor<'a>: Sized {
    /// What the visitor defers until after a node's children.
    type Action;

    fn act(&mut self, action: Self::Action);

    fn visit_atom(&mut self, _lexeme: &'a str, _walker: &mut Walker<'a, Self::Action>) {}
    fn visit_group(&mut self, inner: &'a Node, walker: &mut Walker<'a, Self::Action>) {
        walk_group(walker, inner)
    }
    fn visit_expression(&mut self, chain: &'a ChainData, walker: &mut Walker<'a, Self::Action>) {
        walk_chain(walker, chain)
    }
    fn visit_term(&mut self, chain: &'a ChainData, walker: &mut Walker<'a, Self::Action>) {
        walk_chain(walker, chain)
    }
    fn visit_factor(
        &mut self,
        base: &'a Node,
        exponent: Option<&'a Node>,
        walker: &mut Walker<'a, Self::Action>,
    ) {
        walk_factor(walker, base, exponent)
    }
}

/// Runs the visitor over every node below and including `root`.
pub(crate) fn walk<'a, V: SyntaxVisitor<'a>>(root: &'a Node, visitor: &mut V) {
    let mut walker = Walker {
        stack: vec![Step::Visit(root)],
        scheduled: Vec::new(),
    };
    while let Some(step) = walker.stack.pop() {
        match step {
            Step::Act(action) => visitor.act(action),
            Step::Visit(node) => {
                node.dispatch(visitor, &mut walker);
                walker.commit();
            }
        }
    }
}

pub(crate) fn walk_group<'a, A>(walker: &mut Walker<'a, A>, inner: &'a Node) {
    walker.visit(inner);
}

pub(crate) fn walk_chain<'a, A>(walker: &mut Walker<'a, A>, chain: &'a ChainData) {
    chain.operands().for_each(|node| walker.visit(node));
}

pub(crate) fn walk_factor<'a, A>(
    walker: &mut Walker<'a, A>,
    base: &'a Node,
    exponent: Option<&'a Node>,
) {
    walker.visit(base);
    if let Some(exponent) = exponent {
        walker.visit(exponent);
    }
}
