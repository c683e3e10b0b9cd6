//! Renderers turning a parse tree back into a token sequence.
//!
//! Each renderer is a read-only visitor over the tree. Atoms are copied verbatim,
//! groups and chains without continuations are transparent, and a flattened
//! chain is expanded with the left-associative grouping it stands for.

pub(crate) mod parenthesized;
pub(crate) mod postfix;
pub(crate) mod prefix;
