//! Converts infix arithmetic expressions into fully-parenthesized, postfix and
//! prefix notation.

pub mod notation;
