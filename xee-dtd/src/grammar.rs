use crate::content::{ContentModel, ContentSpecId};
use crate::declaration::{
    ContentSpecType, DeclarationError, DeclarationStore, ElementDecl, ElementId,
};
use crate::error::{Error, Result};
use crate::span::SourceSpan;

/// The declarations of a DTD together with the content models built from
/// them.
///
/// Content models are built the first time they're needed and kept for
/// the lifetime of the grammar.
#[derive(Debug, Default, Clone)]
pub struct Grammar {
    declarations: DeclarationStore,
    models: Vec<Option<ContentModel>>,
}

impl Grammar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declarations(&self) -> &DeclarationStore {
        &self.declarations
    }

    pub fn declarations_mut(&mut self) -> &mut DeclarationStore {
        &mut self.declarations
    }

    pub fn element(&self, id: ElementId) -> Result<&ElementDecl> {
        self.declarations
            .element(id)
            .ok_or(Error::UnknownElement(id))
    }

    /// Set the content of an element, dropping any model built while it
    /// was still undeclared.
    pub fn set_element_content(
        &mut self,
        id: ElementId,
        content_type: ContentSpecType,
        content_spec: Option<ContentSpecId>,
        external: bool,
        span: SourceSpan,
    ) -> std::result::Result<(), DeclarationError> {
        self.declarations
            .set_element_content(id, content_type, content_spec, external, span)?;
        if let Some(model) = self.models.get_mut(id.get()) {
            *model = None;
        }
        Ok(())
    }

    /// Make sure the content model of an element is built. Returns true if
    /// it was built by this call.
    ///
    /// If the content spec is malformed the element falls back to `ANY`
    /// content and the error is returned, once.
    pub fn ensure_model(&mut self, id: ElementId) -> Result<bool> {
        if self.content_model(id).is_some() {
            return Ok(false);
        }
        let element = self.element(id)?;
        let built = ContentModel::build(
            self.declarations.content_specs(),
            element.content_type(),
            element.content_spec(),
        );
        if self.models.len() <= id.get() {
            self.models.resize(id.get() + 1, None);
        }
        match built {
            Ok(model) => {
                self.models[id.get()] = Some(model);
                Ok(true)
            }
            Err(e) => {
                self.models[id.get()] = Some(ContentModel::Any);
                Err(e)
            }
        }
    }

    pub fn content_model(&self, id: ElementId) -> Option<&ContentModel> {
        self.models.get(id.get()).and_then(|model| model.as_ref())
    }

    pub fn clear(&mut self) {
        self.declarations.clear();
        self.models.clear();
    }
}
