use xot::NameId;

use crate::declaration::{AttributeDef, AttributeType, DeclarationStore, ElementId};
use crate::diagnostic::{Code, Diagnostic, DiagnosticArg, Reporter};
use crate::ids::IdRegistry;
use crate::lexical::{collapse_xml_whitespace, is_name, is_nmtoken, tokens};
use crate::span::SourceSpan;

/// An attribute of a start tag.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Attribute {
    pub name: NameId,
    pub value: String,
    /// False if the value was filled in from a declared default.
    pub specified: bool,
    /// The declared type; `CDATA` for undeclared attributes.
    pub attribute_type: AttributeType,
    pub span: SourceSpan,
}

impl Attribute {
    pub fn new(name: NameId, value: impl Into<String>) -> Self {
        Self {
            name,
            value: value.into(),
            specified: true,
            attribute_type: AttributeType::Cdata,
            span: SourceSpan::empty(),
        }
    }

    pub fn with_span(mut self, span: SourceSpan) -> Self {
        self.span = span;
        self
    }
}

/// Normalize an attribute value for its declared type.
///
/// Values of any type but `CDATA` are trimmed, and runs of whitespace
/// inside them are replaced by a single space.
pub fn normalize_value(attribute_type: AttributeType, value: &str) -> String {
    match attribute_type {
        AttributeType::Cdata => value.to_string(),
        _ => collapse_xml_whitespace(value),
    }
}

/// Check that a declared default value is lexically valid for the type of
/// its definition.
pub fn is_valid_default(def: &AttributeDef) -> bool {
    let Some(default) = &def.default_value else {
        return true;
    };
    let value = normalize_value(def.attribute_type, default);
    use AttributeType::*;
    match def.attribute_type {
        Cdata => true,
        Id | Idref | Entity => is_name(&value),
        Nmtoken => is_nmtoken(&value),
        Idrefs | Entities => !value.is_empty() && tokens(&value).all(is_name),
        Nmtokens => !value.is_empty() && tokens(&value).all(is_nmtoken),
        Notation | Enumeration => def.enumeration.iter().any(|v| *v == value),
    }
}

fn enumeration_list(def: &AttributeDef) -> String {
    format!("({})", def.enumeration.join("|"))
}

/// Normalizes attribute values and checks them against their definitions.
///
/// Side effects on the ID registry happen whether or not validation is
/// on; diagnostics are only reported when it is.
pub(crate) struct AttributeChecker<'a, R: Reporter> {
    pub(crate) validation: bool,
    pub(crate) standalone: bool,
    pub(crate) declarations: &'a DeclarationStore,
    pub(crate) ids: &'a mut IdRegistry,
    pub(crate) reporter: &'a mut R,
}

impl<R: Reporter> AttributeChecker<'_, R> {
    fn report(&mut self, code: Code, args: Vec<DiagnosticArg>, span: SourceSpan) {
        if self.validation {
            self.reporter.report(Diagnostic::new(code, args, span));
        }
    }

    /// Normalize and check an attribute given in a start tag.
    pub(crate) fn specified(
        &mut self,
        element_name: NameId,
        element: Option<ElementId>,
        attribute: &mut Attribute,
    ) {
        let declarations = self.declarations;
        let def = element
            .and_then(|element| declarations.find_attribute(element, attribute.name))
            .and_then(|id| declarations.attribute(id))
            .map(|decl| &decl.def);
        let Some(def) = def else {
            let declared = element
                .and_then(|element| declarations.element(element))
                .is_some_and(|element| element.is_declared());
            if declared {
                self.report(
                    Code::AttributeNotDeclared,
                    vec![element_name.into(), attribute.name.into()],
                    attribute.span,
                );
            }
            attribute.attribute_type = AttributeType::Cdata;
            return;
        };

        attribute.attribute_type = def.attribute_type;
        let value = self.normalize(def, &attribute.value, attribute.span);
        if self.standalone && def.external && value != attribute.value {
            self.report(
                Code::AttributeNormalizedInStandalone,
                vec![element_name.into(), def.name.into()],
                attribute.span,
            );
        }
        if def.is_fixed() {
            if let Some(fixed) = &def.default_value {
                if value != normalize_value(def.attribute_type, fixed) {
                    self.report(
                        Code::FixedAttributeMismatch,
                        vec![
                            element_name.into(),
                            def.name.into(),
                            value.as_str().into(),
                            fixed.as_str().into(),
                        ],
                        attribute.span,
                    );
                }
            }
        }
        attribute.value = value;
    }

    /// Add the attributes that were not specified but have a default value,
    /// and report required attributes that are missing.
    ///
    /// Definitions with a default value are handled before the others.
    pub(crate) fn defaults(
        &mut self,
        element_name: NameId,
        element: ElementId,
        attributes: &mut Vec<Attribute>,
        span: SourceSpan,
    ) {
        let declarations = self.declarations;
        for id in declarations.element_attributes(element) {
            let Some(decl) = declarations.attribute(id) else {
                continue;
            };
            let def = &decl.def;
            if attributes.iter().any(|attribute| attribute.name == def.name) {
                continue;
            }
            if def.is_required() {
                self.report(
                    Code::RequiredAttributeMissing,
                    vec![element_name.into(), def.name.into()],
                    span,
                );
                continue;
            }
            let Some(default) = &def.default_value else {
                continue;
            };
            if self.standalone && def.external {
                self.report(
                    Code::DefaultedAttributeInStandalone,
                    vec![element_name.into(), def.name.into()],
                    span,
                );
            }
            let value = self.normalize(def, default, span);
            log::trace!("defaulted attribute {:?} of {:?}", def.name, element_name);
            attributes.push(Attribute {
                name: def.name,
                value,
                specified: false,
                attribute_type: def.attribute_type,
                span,
            });
        }
    }

    /// Normalize a value and run the checks and side effects of its type.
    pub(crate) fn normalize(&mut self, def: &AttributeDef, raw: &str, span: SourceSpan) -> String {
        let value = normalize_value(def.attribute_type, raw);
        use AttributeType::*;
        match def.attribute_type {
            Cdata => {}
            Id | Idref | Entity | Nmtoken => {
                self.check_token(def, &value, span);
            }
            Idrefs | Entities | Nmtokens => {
                let mut valid = 0;
                for token in tokens(&value) {
                    if self.check_token(def, token, span) {
                        valid += 1;
                    }
                }
                if valid == 0 {
                    self.report(Code::EmptyTokenList, vec![def.name.into()], span);
                }
            }
            Notation | Enumeration => {
                if !def.enumeration.iter().any(|v| *v == value) {
                    self.report(
                        Code::AttributeValueNotInList,
                        vec![
                            def.name.into(),
                            value.as_str().into(),
                            enumeration_list(def).into(),
                        ],
                        span,
                    );
                }
            }
        }
        value
    }

    // false if the token is lexically invalid
    fn check_token(&mut self, def: &AttributeDef, token: &str, span: SourceSpan) -> bool {
        use AttributeType::*;
        match def.attribute_type {
            Nmtoken | Nmtokens => {
                let valid = is_nmtoken(token);
                if !valid {
                    self.report(
                        Code::InvalidNmtoken,
                        vec![def.name.into(), token.into()],
                        span,
                    );
                }
                return valid;
            }
            Cdata | Notation | Enumeration => return true,
            Id | Idref | Idrefs | Entity | Entities => {}
        }
        if !is_name(token) {
            self.report(Code::InvalidName, vec![def.name.into(), token.into()], span);
            return false;
        }
        match def.attribute_type {
            Id => {
                if !self.ids.add_id(token) {
                    self.report(Code::IdNotUnique, vec![token.into()], span);
                }
            }
            Idref | Idrefs => self.ids.add_idref(token, span),
            Entity | Entities => {
                let unparsed = self
                    .declarations
                    .entity(token)
                    .is_some_and(|entity| entity.is_unparsed());
                if !unparsed {
                    self.report(Code::EntityNotUnparsed, vec![token.into()], span);
                }
            }
            _ => {}
        }
        true
    }
}
