mod ast;
mod build;
mod resolved;
mod runtime;

pub use ast::{CompareOp, ComparePredicate, Predicate};
pub use build::build_predicate;
pub use runtime::{PredicateProgram, matches};
