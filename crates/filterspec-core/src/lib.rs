//! Core of filterspec: compiles declarative filter lists into typed
//! predicate graphs over registered entity types.
//!
//! The pipeline is: decode [`spec::FilterSpec`] lines, resolve each field
//! through [`accessor`], validate and build each leaf through [`registry`],
//! fold the lines into one [`predicate::Predicate`], then either evaluate it
//! in memory ([`predicate::PredicateProgram`]) or push it down to a backend
//! ([`pushdown`]).

pub mod accessor;
pub mod error;
pub mod model;
pub mod predicate;
pub mod pushdown;
pub mod registry;
pub mod spec;
pub mod value;

mod coercion;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub mod prelude {
    pub use crate::{
        accessor::{Accessor, resolve},
        error::BuildError,
        model::{EntityKind, EntityModel, EntityValue, FieldKind, FieldModel},
        predicate::{CompareOp, ComparePredicate, Predicate, PredicateProgram, build_predicate, matches},
        pushdown::{SqlParam, to_sql},
        registry::{OperatorRegistry, OperatorToken},
        spec::{Connector, FilterSpec},
        value::{CoercionId, Float64, KindClass, Timestamp, Value},
    };
}
