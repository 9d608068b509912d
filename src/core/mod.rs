pub mod errors;
pub mod kind;
pub mod value;
pub mod candidate;


pub use errors::{Result, ValidationError};
pub use kind::DependencyKind;
pub use value::{Row, Value};
pub use candidate::{
    DependencyCandidate, FunctionalCandidate, InclusionCandidate, OrderCandidate, UniqueCandidate,
};
