use strum_macros::{Display, EnumString};
use xot::NameId;

use crate::span::SourceSpan;

use super::ElementId;

/// The declared type of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[strum(serialize_all = "UPPERCASE")]
pub enum AttributeType {
    Cdata,
    Id,
    Idref,
    Idrefs,
    Entity,
    Entities,
    Nmtoken,
    Nmtokens,
    Notation,
    /// A parenthesized list of name tokens.
    Enumeration,
}

impl AttributeType {
    /// Types whose value is a whitespace separated list.
    pub fn is_list(self) -> bool {
        matches!(
            self,
            AttributeType::Idrefs | AttributeType::Entities | AttributeType::Nmtokens
        )
    }

    /// Types whose value must be one of the declared enumeration values.
    pub fn is_enumerated(self) -> bool {
        matches!(self, AttributeType::Notation | AttributeType::Enumeration)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum DefaultKind {
    #[strum(serialize = "#REQUIRED")]
    Required,
    #[strum(serialize = "#IMPLIED")]
    Implied,
    #[strum(serialize = "#FIXED")]
    Fixed,
    /// A plain default value.
    #[strum(serialize = "")]
    Default,
}

/// An attribute definition from an `<!ATTLIST>` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AttributeDef {
    pub name: NameId,
    pub attribute_type: AttributeType,
    /// Allowed values for `NOTATION` and enumerated types.
    pub enumeration: Vec<String>,
    pub default_kind: DefaultKind,
    pub default_value: Option<String>,
    /// Declared in the external subset.
    pub external: bool,
    pub span: SourceSpan,
}

impl AttributeDef {
    pub fn new(name: NameId, attribute_type: AttributeType, default_kind: DefaultKind) -> Self {
        Self {
            name,
            attribute_type,
            enumeration: Vec::new(),
            default_kind,
            default_value: None,
            external: false,
            span: SourceSpan::empty(),
        }
    }

    pub fn with_enumeration<S: AsRef<str>>(mut self, values: &[S]) -> Self {
        self.enumeration = values.iter().map(|v| v.as_ref().to_string()).collect();
        self
    }

    pub fn with_default(mut self, value: &str) -> Self {
        self.default_value = Some(value.to_string());
        self
    }

    pub fn declared_externally(mut self, external: bool) -> Self {
        self.external = external;
        self
    }

    pub fn with_span(mut self, span: SourceSpan) -> Self {
        self.span = span;
        self
    }

    pub fn has_default(&self) -> bool {
        self.default_value.is_some()
    }

    pub fn is_required(&self) -> bool {
        self.default_kind == DefaultKind::Required
    }

    pub fn is_fixed(&self) -> bool {
        self.default_kind == DefaultKind::Fixed
    }
}

/// An attribute definition together with the element it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AttributeDecl {
    pub element: ElementId,
    pub def: AttributeDef,
}
