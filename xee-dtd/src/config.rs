use xot::NameId;

use crate::diagnostic::Reporter;
use crate::handler::DocumentHandler;
use crate::validator::Validator;

/// Settings of a [`Validator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorConfig {
    /// Check constraints and report diagnostics. When off, attribute values
    /// are still normalized and defaulted.
    pub validation: bool,
    /// Notify the handler of namespace scopes around each element.
    pub namespaces: bool,
    /// The document declared `standalone="yes"`.
    pub standalone: bool,
    pub warn_on_duplicate_attdef: bool,
    pub warn_on_undeclared_elemdef: bool,
    /// The element type named in the document type declaration.
    pub root_element: Option<NameId>,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            validation: true,
            namespaces: false,
            standalone: false,
            warn_on_duplicate_attdef: true,
            warn_on_undeclared_elemdef: true,
            root_element: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ValidatorBuilder {
    config: ValidatorConfig,
}

impl ValidatorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Turn constraint checking on or off.
    pub fn validation(&mut self, validation: bool) -> &mut Self {
        self.config.validation = validation;
        self
    }

    pub fn namespaces(&mut self, namespaces: bool) -> &mut Self {
        self.config.namespaces = namespaces;
        self
    }

    /// Apply the additional constraints of a standalone document.
    pub fn standalone(&mut self, standalone: bool) -> &mut Self {
        self.config.standalone = standalone;
        self
    }

    /// Warn when an attribute is defined more than once for an element.
    pub fn warn_on_duplicate_attdef(&mut self, warn: bool) -> &mut Self {
        self.config.warn_on_duplicate_attdef = warn;
        self
    }

    /// Warn when a content model refers to an element type that is never
    /// declared.
    pub fn warn_on_undeclared_elemdef(&mut self, warn: bool) -> &mut Self {
        self.config.warn_on_undeclared_elemdef = warn;
        self
    }

    /// Set the element type the document type declaration names. The root
    /// element of the document must have this type.
    pub fn root_element(&mut self, root_element: Option<NameId>) -> &mut Self {
        self.config.root_element = root_element;
        self
    }

    pub fn config(&self) -> ValidatorConfig {
        self.config.clone()
    }

    /// Build a validator that forwards events to `handler` and diagnostics
    /// to `reporter`.
    pub fn build<H: DocumentHandler, R: Reporter>(
        &self,
        handler: H,
        reporter: R,
    ) -> Validator<H, R> {
        Validator::new(self.config(), handler, reporter)
    }
}
