//! DTD grammar validation.
//!
//! This crate turns the element, attribute list, entity and notation
//! declarations of a DTD into executable validators, and checks a document
//! against them as it is scanned: content models, attribute types and
//! defaults, and the document-wide ID/IDREF, entity and notation
//! constraints.
//!
//! Scanning the DTD and the document is left to the caller, which drives a
//! [`Validator`] with declaration and document events. Names are interned
//! through [`xot`]. Problems in the document are reported as
//! [`Diagnostic`]s to a [`Reporter`]; validation always continues to the
//! end of the document.
//!
//! ```
//! use xee_dtd::{Attribute, Code, ContentSpecType, SourceSpan, Validator};
//! use xot::Xot;
//!
//! let mut xot = Xot::new();
//! let doc = xot.add_name("doc");
//! let p = xot.add_name("p");
//!
//! let mut validator = Validator::collecting();
//! let specs = validator.content_specs_mut();
//! let leaf = specs.leaf(p);
//! let content = specs.one_or_more(leaf);
//! validator.declare_element_content(
//!     doc,
//!     ContentSpecType::Children,
//!     Some(content),
//!     false,
//!     SourceSpan::empty(),
//! );
//! validator.declare_element_content(p, ContentSpecType::Mixed, None, false, SourceSpan::empty());
//! validator.end_dtd();
//!
//! validator.start_element(doc, Vec::<Attribute>::new(), SourceSpan::new(0, 5));
//! validator.end_element(doc, SourceSpan::new(5, 11));
//! assert_eq!(validator.reporter().codes(), vec![Code::ContentIncomplete]);
//! ```
#![allow(dead_code)]

mod attribute;
mod config;
mod content;
mod declaration;
mod diagnostic;
mod error;
mod grammar;
mod handler;
mod ids;
mod lexical;
mod span;
mod validator;

pub use attribute::{is_valid_default, normalize_value, Attribute};
pub use config::{ValidatorBuilder, ValidatorConfig};
pub use content::{
    canonicalize, CanonicalNode, CanonicalTree, ContentModel, ContentSpecDisplay, ContentSpecId,
    ContentSpecNode, ContentSpecs, Dfa, MixedModel, SimpleModel, SimpleOperator, Symbol,
    ValidationResult,
};
pub use declaration::{
    AttributeDecl, AttributeDef, AttributeId, AttributeType, ContentSpecType, DeclarationError,
    DeclarationStore, DefaultKind, ElementDecl, ElementId, EntityDecl, EntityId, EntityValue,
    NotationDecl, NotationId,
};
pub use diagnostic::{Code, Diagnostic, DiagnosticArg, Diagnostics, Reporter, Severity};
pub use error::{Error, Result};
pub use grammar::Grammar;
pub use handler::DocumentHandler;
pub use ids::IdRegistry;
pub use lexical::{is_name, is_nmtoken};
pub use span::SourceSpan;
pub use validator::Validator;
