use ahash::{HashSet, HashSetExt};
use xot::NameId;

use crate::attribute::{is_valid_default, Attribute, AttributeChecker};
use crate::config::ValidatorConfig;
use crate::content::{ContentModel, ContentSpecId, ContentSpecs, Symbol, ValidationResult};
use crate::declaration::{
    AttributeDef, AttributeType, ContentSpecType, DeclarationError, DefaultKind, ElementId,
    EntityDecl, NotationDecl,
};
use crate::diagnostic::{Code, Diagnostic, DiagnosticArg, Diagnostics, Reporter};
use crate::grammar::Grammar;
use crate::handler::DocumentHandler;
use crate::ids::IdRegistry;
use crate::lexical::is_xml_whitespace;
use crate::span::SourceSpan;

// an open element
#[derive(Debug, Clone)]
struct Frame {
    name: NameId,
    // only set for declared elements
    element: Option<ElementId>,
    content_type: ContentSpecType,
    external: bool,
    children: Vec<Symbol>,
}

impl Frame {
    fn push_text(&mut self) {
        // adjacent character data is a single child
        if self.children.last() != Some(&Symbol::Text) {
            self.children.push(Symbol::Text);
        }
    }
}

/// A DTD validator driven by declaration and document events.
///
/// A scanner first feeds it the declarations of a DTD, then the start tags,
/// character data and end tags of the document. The validator checks them,
/// fills in default attributes, reports diagnostics to `R` and forwards the
/// events to `H`.
///
/// One validator can be used for many documents by calling
/// [`Validator::reset`] in between.
pub struct Validator<H: DocumentHandler = (), R: Reporter = Diagnostics> {
    config: ValidatorConfig,
    grammar: Grammar,
    ids: IdRegistry,
    // frames above `depth` are kept to reuse their allocations
    frames: Vec<Frame>,
    depth: usize,
    grammar_complete: bool,
    handler: H,
    reporter: R,
}

impl Validator {
    /// A validator with the default configuration that collects its
    /// diagnostics.
    pub fn collecting() -> Self {
        Self::new(ValidatorConfig::default(), (), Diagnostics::new())
    }
}

impl<H: DocumentHandler, R: Reporter> Validator<H, R> {
    pub fn new(config: ValidatorConfig, handler: H, reporter: R) -> Self {
        Self {
            config,
            grammar: Grammar::new(),
            ids: IdRegistry::new(),
            frames: Vec::new(),
            depth: 0,
            grammar_complete: false,
            handler,
            reporter,
        }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    pub fn reporter_mut(&mut self) -> &mut R {
        &mut self.reporter
    }

    pub fn into_parts(self) -> (H, R) {
        (self.handler, self.reporter)
    }

    /// Record the standalone document declaration of the next document.
    pub fn set_standalone(&mut self, standalone: bool) {
        self.config.standalone = standalone;
    }

    /// Record the element type named by the document type declaration.
    pub fn set_root_element(&mut self, root_element: Option<NameId>) {
        self.config.root_element = root_element;
    }

    /// The number of open elements.
    pub fn depth(&self) -> usize {
        self.depth
    }

    fn report(&mut self, code: Code, args: Vec<DiagnosticArg>, span: SourceSpan) {
        if self.config.validation {
            self.reporter.report(Diagnostic::new(code, args, span));
        }
    }

    /// Get the element with this name, creating it if it hasn't been
    /// referenced before.
    pub fn declare_element(&mut self, name: NameId) -> ElementId {
        self.grammar.declarations_mut().declare_element(name)
    }

    /// The arena content spec trees are built in before they're passed to
    /// [`Validator::declare_element_content`].
    pub fn content_specs_mut(&mut self) -> &mut ContentSpecs {
        self.grammar.declarations_mut().content_specs_mut()
    }

    /// Declare the content of an element: `<!ELEMENT name content>`.
    ///
    /// `content_spec` is the root of the content spec tree for mixed and
    /// element content.
    pub fn declare_element_content(
        &mut self,
        name: NameId,
        content_type: ContentSpecType,
        content_spec: Option<ContentSpecId>,
        external: bool,
        span: SourceSpan,
    ) {
        let id = self.declare_element(name);
        match self
            .grammar
            .set_element_content(id, content_type, content_spec, external, span)
        {
            Ok(()) => {
                if let (ContentSpecType::Mixed, Some(root)) = (content_type, content_spec) {
                    self.check_mixed_content(name, root, span);
                }
            }
            Err(DeclarationError::DuplicateElement) => {
                self.report(Code::DuplicateElementDeclaration, vec![name.into()], span);
            }
            Err(e) => log::debug!("element declaration ignored: {}", e),
        }
        self.handler
            .element_declaration(name, content_type, content_spec);
    }

    fn check_mixed_content(&mut self, name: NameId, root: ContentSpecId, span: SourceSpan) {
        // a malformed tree is reported when its model is built
        let Ok(leaves) = self.grammar.declarations().content_specs().leaves(root) else {
            return;
        };
        let mut seen = HashSet::new();
        for leaf in leaves {
            if let Symbol::Element(child) = leaf {
                if !seen.insert(child) {
                    self.report(
                        Code::DuplicateMixedType,
                        vec![name.into(), child.into()],
                        span,
                    );
                }
            }
        }
    }

    /// Declare an attribute of an element: one definition of an
    /// `<!ATTLIST>` declaration.
    pub fn declare_attribute(&mut self, element: NameId, def: AttributeDef) {
        self.handler.attribute_declaration(element, &def);
        let id = self.declare_element(element);

        let name = def.name;
        let span = def.span;
        let id_default = def.attribute_type == AttributeType::Id
            && matches!(def.default_kind, DefaultKind::Fixed | DefaultKind::Default);
        let invalid_default = if is_valid_default(&def) {
            None
        } else {
            def.default_value.clone()
        };
        let notations = if def.attribute_type == AttributeType::Notation {
            def.enumeration.clone()
        } else {
            Vec::new()
        };

        let existing = match self.grammar.declarations_mut().add_attribute(id, def) {
            Ok(_) => None,
            Err(DeclarationError::DuplicateAttribute(_)) => {
                if self.config.warn_on_duplicate_attdef {
                    self.report(
                        Code::DuplicateAttributeDefinition,
                        vec![element.into(), name.into()],
                        span,
                    );
                }
                return;
            }
            Err(DeclarationError::MultipleIdAttributes(existing)) => {
                Some((Code::MultipleIdAttributes, existing))
            }
            Err(DeclarationError::MultipleNotationAttributes(existing)) => {
                Some((Code::MultipleNotationAttributes, existing))
            }
            Err(e) => {
                log::debug!("attribute declaration ignored: {}", e);
                return;
            }
        };
        if let Some((code, existing)) = existing {
            if let Some(first) = self.grammar.declarations().attribute(existing) {
                let first = first.def.name;
                self.report(code, vec![element.into(), first.into(), name.into()], span);
            }
            return;
        }

        if id_default {
            self.report(
                Code::IdAttributeDefault,
                vec![element.into(), name.into()],
                span,
            );
        }
        if let Some(value) = invalid_default {
            self.report(
                Code::InvalidDefaultValue,
                vec![element.into(), name.into(), value.into()],
                span,
            );
        }
        for notation in notations {
            if self.grammar.declarations().notation(&notation).is_none() {
                self.ids.require_notation(&notation, span);
            }
        }
    }

    /// Declare an internal general entity.
    pub fn declare_internal_entity(
        &mut self,
        name: &str,
        replacement_text: &str,
        external: bool,
        span: SourceSpan,
    ) {
        self.declare_entity(
            EntityDecl::internal(name, replacement_text).declared_externally(external),
            span,
        );
    }

    /// Declare an external parsed entity.
    pub fn declare_external_entity(
        &mut self,
        name: &str,
        public_id: Option<&str>,
        system_id: &str,
        external: bool,
        span: SourceSpan,
    ) {
        self.declare_entity(
            EntityDecl::external(name, public_id, system_id).declared_externally(external),
            span,
        );
    }

    /// Declare an unparsed entity: an external entity with an `NDATA`
    /// notation.
    pub fn declare_unparsed_entity(
        &mut self,
        name: &str,
        public_id: Option<&str>,
        system_id: &str,
        notation: &str,
        external: bool,
        span: SourceSpan,
    ) {
        let declared = self.declare_entity(
            EntityDecl::unparsed(name, public_id, system_id, notation)
                .declared_externally(external),
            span,
        );
        if declared && self.grammar.declarations().notation(notation).is_none() {
            self.ids.require_notation(notation, span);
        }
    }

    fn declare_entity(&mut self, decl: EntityDecl, span: SourceSpan) -> bool {
        self.handler.entity_declaration(&decl);
        let name = decl.name.clone();
        match self.grammar.declarations_mut().declare_entity(decl) {
            Ok(_) => true,
            Err(_) => {
                self.report(Code::DuplicateEntityDeclaration, vec![name.into()], span);
                false
            }
        }
    }

    pub fn declare_notation(
        &mut self,
        name: &str,
        public_id: Option<&str>,
        system_id: Option<&str>,
        span: SourceSpan,
    ) {
        let decl = NotationDecl::new(name, public_id, system_id);
        self.handler.notation_declaration(&decl);
        if self.grammar.declarations_mut().declare_notation(decl).is_err() {
            self.report(Code::DuplicateNotationDeclaration, vec![name.into()], span);
        }
    }

    /// The DTD is complete.
    pub fn end_dtd(&mut self) {
        self.complete_grammar();
        self.handler.end_dtd();
    }

    // checks that need all declarations; runs once per grammar
    fn complete_grammar(&mut self) {
        if self.grammar_complete {
            return;
        }
        self.grammar_complete = true;
        log::debug!(
            "grammar complete: {} element types",
            self.grammar.declarations().element_count()
        );

        let declarations = self.grammar.declarations();
        let specs = declarations.content_specs();
        let mut pending: Vec<(Code, Vec<DiagnosticArg>, SourceSpan)> = Vec::new();
        for (_, element) in declarations.elements() {
            let name = element.name();
            if !element.is_declared() {
                // an undeclared element has no span of its own
                let first = element
                    .attributes()
                    .min()
                    .and_then(|id| declarations.attribute(id));
                if let Some(first) = first {
                    pending.push((
                        Code::AttlistForUndeclaredElement,
                        vec![name.into()],
                        first.def.span,
                    ));
                }
                continue;
            }
            if element.content_type() == ContentSpecType::Empty {
                if let Some(notation) = element
                    .notation_attribute()
                    .and_then(|id| declarations.attribute(id))
                {
                    pending.push((
                        Code::NotationOnEmptyElement,
                        vec![name.into(), notation.def.name.into()],
                        notation.def.span,
                    ));
                }
            }
            if !self.config.warn_on_undeclared_elemdef {
                continue;
            }
            let Some(root) = element.content_spec() else {
                continue;
            };
            let Ok(leaves) = specs.leaves(root) else {
                continue;
            };
            for leaf in leaves {
                if let Symbol::Element(child) = leaf {
                    let declared = declarations
                        .element_by_name(child)
                        .is_some_and(|child| child.is_declared());
                    if !declared {
                        pending.push((
                            Code::UndeclaredElementInContentModel,
                            vec![name.into(), child.into()],
                            element.span(),
                        ));
                    }
                }
            }
        }
        for (code, args, span) in pending {
            self.report(code, args, span);
        }
        self.check_required_notations();
    }

    /// Report every notation that was referenced but never declared, once,
    /// at the place it was first referenced.
    pub fn check_required_notations(&mut self) {
        let declarations = self.grammar.declarations();
        let missing: Vec<(String, SourceSpan)> = self
            .ids
            .required_notations()
            .filter(|(name, _)| declarations.notation(name).is_none())
            .map(|(name, span)| (name.to_string(), span))
            .collect();
        for (name, span) in missing {
            self.report(Code::NotationNotDeclared, vec![name.into()], span);
        }
    }

    /// A start tag.
    ///
    /// Returns the final attributes: the specified ones normalized, followed
    /// by the defaulted ones. The same list is passed on to the handler.
    pub fn start_element(
        &mut self,
        name: NameId,
        attributes: Vec<Attribute>,
        span: SourceSpan,
    ) -> Vec<Attribute> {
        self.complete_grammar();
        if self.depth == 0 {
            self.ids.clear_document();
            if let Some(root) = self.config.root_element {
                if root != name {
                    self.report(Code::RootElementType, vec![root.into(), name.into()], span);
                }
            }
        }

        let declarations = self.grammar.declarations();
        let element = declarations.element_id(name);
        let decl = element.and_then(|element| declarations.element(element));
        let declared = decl.is_some_and(|decl| decl.is_declared());
        let content_type = decl.map_or(ContentSpecType::Undeclared, |decl| decl.content_type());
        let external = decl.is_some_and(|decl| decl.is_external());
        if !declared {
            self.report(Code::ElementNotDeclared, vec![name.into()], span);
        }

        let mut attributes = attributes;
        let mut checker = AttributeChecker {
            validation: self.config.validation,
            standalone: self.config.standalone,
            declarations: self.grammar.declarations(),
            ids: &mut self.ids,
            reporter: &mut self.reporter,
        };
        for attribute in attributes.iter_mut() {
            if attribute.span.is_empty() {
                attribute.span = span;
            }
            checker.specified(name, element, attribute);
        }
        if let Some(element) = element {
            checker.defaults(name, element, &mut attributes, span);
        }

        if let Some(parent) = self.depth.checked_sub(1) {
            self.frames[parent].children.push(Symbol::Element(name));
        }
        self.push_frame(name, element.filter(|_| declared), content_type, external);
        log::trace!("start {:?} at depth {}", name, self.depth);

        if self.config.namespaces {
            self.handler.push_namespace_context();
        }
        self.handler.start_element(name, &attributes);
        attributes
    }

    fn push_frame(
        &mut self,
        name: NameId,
        element: Option<ElementId>,
        content_type: ContentSpecType,
        external: bool,
    ) {
        if let Some(frame) = self.frames.get_mut(self.depth) {
            frame.name = name;
            frame.element = element;
            frame.content_type = content_type;
            frame.external = external;
            frame.children.clear();
        } else {
            self.frames.push(Frame {
                name,
                element,
                content_type,
                external,
                children: Vec::new(),
            });
        }
        self.depth += 1;
    }

    /// Character data.
    ///
    /// Whitespace in element content is forwarded as ignorable whitespace,
    /// except in a standalone document where the element was declared
    /// externally; there it counts as character data.
    pub fn characters(&mut self, text: &str) {
        let Some(top) = self.depth.checked_sub(1) else {
            self.handler.characters(text);
            return;
        };
        let whitespace = is_xml_whitespace(text);
        let frame = &mut self.frames[top];
        match frame.content_type {
            ContentSpecType::Children if whitespace => {
                if self.config.standalone && frame.external {
                    frame.push_text();
                } else {
                    self.handler.ignorable_whitespace(text);
                    return;
                }
            }
            ContentSpecType::Empty => frame.push_text(),
            _ => {
                if !whitespace {
                    frame.push_text();
                }
            }
        }
        self.handler.characters(text);
    }

    /// An end tag. Checks the content of the element; at the end of the root
    /// element, checks that all IDREFs resolved.
    pub fn end_element(&mut self, name: NameId, span: SourceSpan) {
        let Some(top) = self.depth.checked_sub(1) else {
            log::debug!("end tag without open element");
            return;
        };
        self.depth = top;
        let element = self.frames[top].element;
        if let (Some(element), true) = (element, self.config.validation) {
            let children = std::mem::take(&mut self.frames[top].children);
            let result = self.validate_element_content(element, &children);
            match result.failure_index(children.len()) {
                Some(i) if i < children.len() => {
                    self.report(Code::ContentInvalid, vec![name.into(), i.into()], span)
                }
                Some(_) => self.report(Code::ContentIncomplete, vec![name.into()], span),
                None => {}
            }
            self.frames[top].children = children;
        }
        log::trace!("end {:?} at depth {}", name, top);

        self.handler.end_element(name);
        if self.config.namespaces {
            self.handler.pop_namespace_context();
        }
        if top == 0 {
            self.check_idrefs();
        }
    }

    /// Match a child sequence against the content model of an element.
    ///
    /// Undeclared elements accept any content.
    pub fn validate_content(&mut self, name: NameId, children: &[Symbol]) -> ValidationResult {
        match self.grammar.declarations().element_id(name) {
            Some(element) => self.validate_element_content(element, children),
            None => ValidationResult::Valid,
        }
    }

    fn validate_element_content(
        &mut self,
        element: ElementId,
        children: &[Symbol],
    ) -> ValidationResult {
        let name = match self.grammar.element(element) {
            Ok(decl) => decl.name(),
            Err(_) => return ValidationResult::Valid,
        };
        let span = self.element_span(element);
        match self.grammar.ensure_model(element) {
            Ok(true) => {
                if self
                    .grammar
                    .content_model(element)
                    .is_some_and(ContentModel::is_ambiguous)
                {
                    self.report(Code::AmbiguousContentModel, vec![name.into()], span);
                }
            }
            Ok(false) => {}
            Err(e) => {
                log::debug!("content model of element {:?}: {}", name, e);
                self.report(Code::MalformedContentModel, vec![name.into()], span);
            }
        }
        self.grammar
            .content_model(element)
            .map_or(ValidationResult::Valid, |model| model.validate(children))
    }

    fn element_span(&self, element: ElementId) -> SourceSpan {
        self.grammar
            .element(element)
            .map_or(SourceSpan::empty(), |decl| decl.span())
    }

    /// Normalize a single attribute value of an element, with the checks
    /// and side effects of its declared type.
    pub fn normalize_attribute(
        &mut self,
        element_name: NameId,
        name: NameId,
        raw: &str,
        specified: bool,
        span: SourceSpan,
    ) -> String {
        let declarations = self.grammar.declarations();
        let element = declarations.element_id(element_name);
        let mut checker = AttributeChecker {
            validation: self.config.validation,
            standalone: self.config.standalone,
            declarations,
            ids: &mut self.ids,
            reporter: &mut self.reporter,
        };
        if specified {
            let mut attribute = Attribute::new(name, raw).with_span(span);
            checker.specified(element_name, element, &mut attribute);
            return attribute.value;
        }
        match element
            .and_then(|element| declarations.find_attribute(element, name))
            .and_then(|id| declarations.attribute(id))
        {
            Some(decl) => checker.normalize(&decl.def, raw, span),
            None => raw.to_string(),
        }
    }

    /// Report every IDREF value that has no matching ID, once, at the place
    /// it was first used.
    pub fn check_idrefs(&mut self) {
        let unresolved: Vec<(String, SourceSpan)> = self
            .ids
            .unresolved_idrefs()
            .map(|(value, span)| (value.to_string(), span))
            .collect();
        for (value, span) in unresolved {
            self.report(Code::IdRefWithoutId, vec![value.into()], span);
        }
    }

    /// The document is complete.
    pub fn end_document(&mut self) {
        if self.depth != 0 {
            log::debug!("document ended with {} open elements", self.depth);
            self.depth = 0;
        }
        self.handler.end_document();
    }

    /// Forget the grammar and all document state so the validator can be
    /// used for a new document. Allocations are kept.
    pub fn reset(&mut self) {
        log::debug!("reset validator");
        self.grammar.clear();
        self.ids.clear();
        self.depth = 0;
        self.grammar_complete = false;
    }
}
