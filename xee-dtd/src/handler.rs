use xot::NameId;

use crate::attribute::Attribute;
use crate::content::ContentSpecId;
use crate::declaration::{AttributeDef, ContentSpecType, EntityDecl, NotationDecl};

/// Receives the events a [`Validator`](crate::Validator) forwards.
///
/// Declarations are forwarded as they were received, document events after
/// validation, with the final attribute list. Every method does nothing by
/// default.
pub trait DocumentHandler {
    fn element_declaration(
        &mut self,
        _name: NameId,
        _content_type: ContentSpecType,
        _content_spec: Option<ContentSpecId>,
    ) {
    }

    fn attribute_declaration(&mut self, _element: NameId, _def: &AttributeDef) {}

    fn entity_declaration(&mut self, _entity: &EntityDecl) {}

    fn notation_declaration(&mut self, _notation: &NotationDecl) {}

    fn end_dtd(&mut self) {}

    fn start_element(&mut self, _name: NameId, _attributes: &[Attribute]) {}

    fn end_element(&mut self, _name: NameId) {}

    fn characters(&mut self, _text: &str) {}

    /// Whitespace in element content.
    fn ignorable_whitespace(&mut self, _text: &str) {}

    fn push_namespace_context(&mut self) {}

    fn pop_namespace_context(&mut self) {}

    fn end_document(&mut self) {}
}

impl DocumentHandler for () {}

impl<H: DocumentHandler + ?Sized> DocumentHandler for &mut H {
    fn element_declaration(
        &mut self,
        name: NameId,
        content_type: ContentSpecType,
        content_spec: Option<ContentSpecId>,
    ) {
        (**self).element_declaration(name, content_type, content_spec)
    }

    fn attribute_declaration(&mut self, element: NameId, def: &AttributeDef) {
        (**self).attribute_declaration(element, def)
    }

    fn entity_declaration(&mut self, entity: &EntityDecl) {
        (**self).entity_declaration(entity)
    }

    fn notation_declaration(&mut self, notation: &NotationDecl) {
        (**self).notation_declaration(notation)
    }

    fn end_dtd(&mut self) {
        (**self).end_dtd()
    }

    fn start_element(&mut self, name: NameId, attributes: &[Attribute]) {
        (**self).start_element(name, attributes)
    }

    fn end_element(&mut self, name: NameId) {
        (**self).end_element(name)
    }

    fn characters(&mut self, text: &str) {
        (**self).characters(text)
    }

    fn ignorable_whitespace(&mut self, text: &str) {
        (**self).ignorable_whitespace(text)
    }

    fn push_namespace_context(&mut self) {
        (**self).push_namespace_context()
    }

    fn pop_namespace_context(&mut self) {
        (**self).pop_namespace_context()
    }

    fn end_document(&mut self) {
        (**self).end_document()
    }
}
