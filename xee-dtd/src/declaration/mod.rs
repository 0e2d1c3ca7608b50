//! The declaration store: elements, attribute definitions, entities and
//! notations of one grammar.
mod attribute;
mod element;
mod entity;
mod store;

use thiserror::Error;

pub use attribute::{AttributeDecl, AttributeDef, AttributeType, DefaultKind};
pub use element::{ContentSpecType, ElementDecl};
pub use entity::{EntityDecl, EntityValue, NotationDecl};
pub use store::DeclarationStore;

macro_rules! declaration_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize))]
        pub struct $name(usize);

        impl $name {
            pub(crate) fn new(index: usize) -> Self {
                Self(index)
            }

            pub fn get(self) -> usize {
                self.0
            }
        }
    };
}

declaration_id!(ElementId);
declaration_id!(AttributeId);
declaration_id!(EntityId);
declaration_id!(NotationId);

/// A declaration that conflicts with an earlier one.
///
/// In every case the earlier declaration stays in effect.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationError {
    #[error("unknown element {0:?}")]
    UnknownElement(ElementId),
    #[error("element content already declared")]
    DuplicateElement,
    #[error("attribute already declared for this element")]
    DuplicateAttribute(AttributeId),
    #[error("element already has an ID attribute")]
    MultipleIdAttributes(AttributeId),
    #[error("element already has a NOTATION attribute")]
    MultipleNotationAttributes(AttributeId),
    #[error("entity already declared")]
    DuplicateEntity(EntityId),
    #[error("notation already declared")]
    DuplicateNotation(NotationId),
}
