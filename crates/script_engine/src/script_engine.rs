//! Script Engine - Structural editing for event script trees
//!
//! This crate contains the arena-backed script structure and the mutation
//! engine behind the script editor. Every operation is a pure function of
//! the input tree: callers get a new tree back and adopt it wholesale.

pub use script_types;

mod clone;
mod ops;
mod script;
mod traversal;
mod validate;

pub use clone::*;
pub use ops::*;
pub use script::*;
pub use traversal::*;
pub use validate::*;
