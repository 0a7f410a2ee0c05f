//! Domain logic: reason about functional dependencies over a relation's attributes.
//!
//! This crate owns the algorithms (closure, candidate keys, minimal cover, normal-form
//! classification) and the derivation logs that explain them. It does not own parsing of
//! files, serialization, or presentation; those live in `fdkit-core` and `fdkit-types`.
//!
//! Every value here is immutable once built. Transformations return new values, and the
//! only interior state is the compute-once key cache on [`DependencySet`].

mod attrs;
mod cover;
mod dependency;
mod error;
mod log;
mod normal_form;
mod set;

pub use attrs::{Attribute, AttributeSet};
pub use dependency::FunctionalDependency;
pub use error::{ParseError, ParseErrorKind};
pub use log::{ClosureDiagnostic, ClosureLog, ClosureStep, CoverLog, Minimization};
pub use normal_form::{NormalForm, Reason, Verdict};
pub use set::DependencySet;
