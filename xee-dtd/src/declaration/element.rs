use strum_macros::Display;
use xot::NameId;

use crate::content::ContentSpecId;
use crate::span::SourceSpan;

use super::AttributeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[strum(serialize_all = "UPPERCASE")]
pub enum ContentSpecType {
    Empty,
    Any,
    Mixed,
    Children,
    /// Referenced (in a content model or attribute list) but not declared.
    Undeclared,
}

#[derive(Debug, Clone)]
pub struct ElementDecl {
    name: NameId,
    content_type: ContentSpecType,
    content_spec: Option<ContentSpecId>,
    external: bool,
    span: SourceSpan,
    // definitions with a default value are scanned before the others
    with_default: Vec<AttributeId>,
    without_default: Vec<AttributeId>,
    id_attribute: Option<AttributeId>,
    notation_attribute: Option<AttributeId>,
}

impl ElementDecl {
    pub(crate) fn placeholder(name: NameId) -> Self {
        Self {
            name,
            content_type: ContentSpecType::Undeclared,
            content_spec: None,
            external: false,
            span: SourceSpan::empty(),
            with_default: Vec::new(),
            without_default: Vec::new(),
            id_attribute: None,
            notation_attribute: None,
        }
    }

    pub(crate) fn set_content(
        &mut self,
        content_type: ContentSpecType,
        content_spec: Option<ContentSpecId>,
        external: bool,
        span: SourceSpan,
    ) {
        self.content_type = content_type;
        self.content_spec = content_spec;
        self.external = external;
        self.span = span;
    }

    pub(crate) fn add_attribute(&mut self, id: AttributeId, has_default: bool) {
        if has_default {
            self.with_default.push(id);
        } else {
            self.without_default.push(id);
        }
    }

    pub(crate) fn set_id_attribute(&mut self, id: AttributeId) {
        self.id_attribute = Some(id);
    }

    pub(crate) fn set_notation_attribute(&mut self, id: AttributeId) {
        self.notation_attribute = Some(id);
    }

    pub fn name(&self) -> NameId {
        self.name
    }

    pub fn content_type(&self) -> ContentSpecType {
        self.content_type
    }

    pub fn content_spec(&self) -> Option<ContentSpecId> {
        self.content_spec
    }

    pub fn is_declared(&self) -> bool {
        self.content_type != ContentSpecType::Undeclared
    }

    pub fn is_external(&self) -> bool {
        self.external
    }

    /// Where the element's content was declared.
    pub fn span(&self) -> SourceSpan {
        self.span
    }

    /// Attribute definitions: those with a default value first, then the
    /// rest, each in declaration order.
    pub fn attributes(&self) -> impl Iterator<Item = AttributeId> + '_ {
        self.with_default
            .iter()
            .chain(self.without_default.iter())
            .copied()
    }

    pub fn has_attributes(&self) -> bool {
        !self.with_default.is_empty() || !self.without_default.is_empty()
    }

    pub fn id_attribute(&self) -> Option<AttributeId> {
        self.id_attribute
    }

    pub fn notation_attribute(&self) -> Option<AttributeId> {
        self.notation_attribute
    }
}
