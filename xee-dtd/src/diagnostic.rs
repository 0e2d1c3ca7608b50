use strum::EnumMessage;
use strum_macros::{Display, EnumMessage};
use xot::{NameId, Xot};

use crate::span::SourceSpan;

/// How serious a diagnostic is.
///
/// Nothing this crate reports is fatal: the document is always scanned to the
/// end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Severity {
    Warning,
    Error,
}

/// DTD validation diagnostic code.
///
/// The first paragraph of each variant's documentation is a short title, the
/// second a message template where `{0}`, `{1}` and so on are replaced by the
/// diagnostic arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumMessage)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Code {
    // declaration-time conditions
    /// Duplicate element declaration.
    ///
    /// Element type "{0}" must not be declared more than once.
    DuplicateElementDeclaration,
    /// Duplicate attribute definition.
    ///
    /// Attribute "{1}" for element type "{0}" has already been declared; the
    /// first declaration is binding.
    DuplicateAttributeDefinition,
    /// More than one ID attribute.
    ///
    /// Element type "{0}" already has an attribute "{1}" of type ID; a second
    /// attribute "{2}" of type ID is not permitted.
    MultipleIdAttributes,
    /// More than one NOTATION attribute.
    ///
    /// Element type "{0}" already has an attribute "{1}" of type NOTATION; a
    /// second attribute "{2}" of type NOTATION is not permitted.
    MultipleNotationAttributes,
    /// ID attribute default.
    ///
    /// ID attribute "{1}" of element type "{0}" must have a declared default of
    /// #IMPLIED or #REQUIRED.
    IdAttributeDefault,
    /// NOTATION attribute on EMPTY element.
    ///
    /// Attribute "{1}" of type NOTATION must not be declared on element type
    /// "{0}", which is declared EMPTY.
    NotationOnEmptyElement,
    /// Invalid default value.
    ///
    /// The default value "{2}" of attribute "{1}" of element type "{0}" is not
    /// valid for its declared type.
    InvalidDefaultValue,
    /// Duplicate entity declaration.
    ///
    /// Entity "{0}" is declared more than once; the first declaration is
    /// binding.
    DuplicateEntityDeclaration,
    /// Duplicate notation declaration.
    ///
    /// Notation "{0}" must not be declared more than once.
    DuplicateNotationDeclaration,
    /// Duplicate type in mixed content.
    ///
    /// Element type "{1}" is named more than once in the mixed content model of
    /// element type "{0}".
    DuplicateMixedType,
    /// Malformed content model.
    ///
    /// The content model of element type "{0}" refers to a content spec node
    /// that does not exist.
    MalformedContentModel,
    /// Ambiguous content model.
    ///
    /// The content model of element type "{0}" is not deterministic.
    AmbiguousContentModel,
    /// Undeclared element in content model.
    ///
    /// The content model of element type "{0}" refers to undeclared element
    /// type "{1}".
    UndeclaredElementInContentModel,
    /// Attribute list for undeclared element.
    ///
    /// Attributes are declared for element type "{0}", but the element type
    /// itself is never declared.
    AttlistForUndeclaredElement,
    /// Undeclared notation.
    ///
    /// Notation "{0}" is referenced but never declared.
    NotationNotDeclared,

    // document-time conditions
    /// Root element type.
    ///
    /// The document type declaration names "{0}" but the root element is
    /// "{1}".
    RootElementType,
    /// Element not declared.
    ///
    /// Element type "{0}" must be declared.
    ElementNotDeclared,
    /// Invalid content.
    ///
    /// The content of element type "{0}" is invalid starting at child {1}.
    ContentInvalid,
    /// Incomplete content.
    ///
    /// The content of element type "{0}" is incomplete.
    ContentIncomplete,
    /// Attribute not declared.
    ///
    /// Attribute "{1}" must be declared for element type "{0}".
    AttributeNotDeclared,
    /// Required attribute missing.
    ///
    /// Attribute "{1}" is required and must be specified for element type
    /// "{0}".
    RequiredAttributeMissing,
    /// FIXED attribute mismatch.
    ///
    /// Attribute "{1}" of element type "{0}" has the value "{2}" but must have
    /// the fixed value "{3}".
    FixedAttributeMismatch,
    /// Value not in list.
    ///
    /// Attribute "{0}" with value "{1}" must have a value from the list
    /// "{2}".
    AttributeValueNotInList,
    /// Invalid name.
    ///
    /// Attribute "{0}" has the value "{1}", which is not a valid XML name.
    InvalidName,
    /// Invalid name token.
    ///
    /// Attribute "{0}" has the value "{1}", which is not a valid name token.
    InvalidNmtoken,
    /// Empty token list.
    ///
    /// Attribute "{0}" must contain at least one token.
    EmptyTokenList,
    /// ID not unique.
    ///
    /// ID value "{0}" is not unique.
    IdNotUnique,
    /// IDREF without ID.
    ///
    /// An element with the identifier "{0}" must appear in the document.
    IdRefWithoutId,
    /// Entity not unparsed.
    ///
    /// Attribute value "{0}" must name an unparsed entity.
    EntityNotUnparsed,
    /// Defaulted attribute in standalone document.
    ///
    /// Attribute "{1}" of element type "{0}" has an externally declared default
    /// value, which is not permitted in a standalone document.
    DefaultedAttributeInStandalone,
    /// Attribute normalized in standalone document.
    ///
    /// The value of externally declared attribute "{1}" of element type "{0}"
    /// changes under normalization, which is not permitted in a standalone
    /// document.
    AttributeNormalizedInStandalone,
}

impl Code {
    pub fn severity(&self) -> Severity {
        use Code::*;
        match self {
            DuplicateAttributeDefinition
            | DuplicateEntityDeclaration
            | DuplicateNotationDeclaration
            | AmbiguousContentModel
            | UndeclaredElementInContentModel
            | AttlistForUndeclaredElement => Severity::Warning,
            _ => Severity::Error,
        }
    }

    pub fn title(&self) -> &str {
        self.documentation_pieces().0
    }

    pub fn template(&self) -> &str {
        self.documentation_pieces().1.trim_end()
    }

    fn documentation_pieces(&self) -> (&str, &str) {
        if let Some(documentation) = self.get_documentation() {
            let mut pieces = documentation.splitn(2, "\n\n");
            let first = pieces.next().unwrap_or("");
            let second = pieces.next().unwrap_or("");
            (first, second)
        } else {
            ("", "")
        }
    }
}

/// An argument to a diagnostic message.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum DiagnosticArg {
    Name(NameId),
    Text(String),
    Index(usize),
}

impl DiagnosticArg {
    fn render(&self, xot: &Xot) -> String {
        match self {
            DiagnosticArg::Name(name) => xot.local_name_str(*name).to_string(),
            DiagnosticArg::Text(text) => text.clone(),
            DiagnosticArg::Index(index) => index.to_string(),
        }
    }
}

impl From<NameId> for DiagnosticArg {
    fn from(name: NameId) -> Self {
        DiagnosticArg::Name(name)
    }
}

impl From<&str> for DiagnosticArg {
    fn from(text: &str) -> Self {
        DiagnosticArg::Text(text.to_string())
    }
}

impl From<String> for DiagnosticArg {
    fn from(text: String) -> Self {
        DiagnosticArg::Text(text)
    }
}

impl From<usize> for DiagnosticArg {
    fn from(index: usize) -> Self {
        DiagnosticArg::Index(index)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: Code,
    pub args: Vec<DiagnosticArg>,
    pub span: SourceSpan,
}

impl Diagnostic {
    pub fn new(code: Code, args: Vec<DiagnosticArg>, span: SourceSpan) -> Self {
        Self {
            severity: code.severity(),
            code,
            args,
            span,
        }
    }

    /// Render the message template with the arguments filled in.
    ///
    /// Names are looked up in `xot`, which must be the interner the names
    /// came from.
    pub fn message(&self, xot: &Xot) -> String {
        let mut message = self.code.template().replace('\n', " ");
        for (i, arg) in self.args.iter().enumerate() {
            message = message.replace(&format!("{{{}}}", i), &arg.render(xot));
        }
        message
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} ({})", self.severity, self.code, self.span)
    }
}

/// Receives diagnostics as they are raised.
pub trait Reporter {
    fn report(&mut self, diagnostic: Diagnostic);
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn report(&mut self, diagnostic: Diagnostic) {
        (**self).report(diagnostic)
    }
}

/// A reporter that collects everything it receives.
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    diagnostics: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn codes(&self) -> Vec<Code> {
        self.diagnostics.iter().map(|d| d.code).collect()
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn clear(&mut self) {
        self.diagnostics.clear();
    }
}

impl Reporter for Diagnostics {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}
