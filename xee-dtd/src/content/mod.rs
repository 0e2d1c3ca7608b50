//! Content models: the declared content spec trees, their canonical form,
//! and the matchers built from them.
mod canonical;
mod dfa;
mod mixed;
mod model;
mod simple;
mod spec;

pub use canonical::{canonicalize, CanonicalNode, CanonicalTree};
pub use dfa::Dfa;
pub use mixed::MixedModel;
pub use model::{ContentModel, ValidationResult};
pub use simple::{SimpleModel, SimpleOperator};
pub use spec::{ContentSpecDisplay, ContentSpecId, ContentSpecNode, ContentSpecs, Symbol};
