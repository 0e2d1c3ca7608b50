use ahash::{HashMap, HashMapExt};
use xot::NameId;

use crate::content::{ContentSpecId, ContentSpecs};
use crate::span::SourceSpan;

use super::{
    AttributeDecl, AttributeDef, AttributeId, AttributeType, ContentSpecType, DeclarationError,
    ElementDecl, ElementId, EntityDecl, EntityId, NotationDecl, NotationId,
};

/// All declarations of one grammar.
///
/// Declarations live in vectors indexed by their typed ids. Elements are
/// also created on first reference, so a content model or attribute list
/// can name an element before its `<!ELEMENT>` declaration is seen.
#[derive(Debug, Clone)]
pub struct DeclarationStore {
    elements: Vec<ElementDecl>,
    element_index: HashMap<NameId, ElementId>,
    attributes: Vec<AttributeDecl>,
    entities: Vec<EntityDecl>,
    entity_index: HashMap<String, EntityId>,
    notations: Vec<NotationDecl>,
    notation_index: HashMap<String, NotationId>,
    content_specs: ContentSpecs,
}

impl Default for DeclarationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DeclarationStore {
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            element_index: HashMap::new(),
            attributes: Vec::new(),
            entities: Vec::new(),
            entity_index: HashMap::new(),
            notations: Vec::new(),
            notation_index: HashMap::new(),
            content_specs: ContentSpecs::new(),
        }
    }

    /// Get the element with this name, creating an undeclared placeholder
    /// if it doesn't exist yet.
    pub fn declare_element(&mut self, name: NameId) -> ElementId {
        if let Some(id) = self.element_index.get(&name) {
            return *id;
        }
        let id = ElementId::new(self.elements.len());
        self.elements.push(ElementDecl::placeholder(name));
        self.element_index.insert(name, id);
        id
    }

    /// Set the content of an element. This can happen only once.
    pub fn set_element_content(
        &mut self,
        id: ElementId,
        content_type: ContentSpecType,
        content_spec: Option<ContentSpecId>,
        external: bool,
        span: SourceSpan,
    ) -> Result<(), DeclarationError> {
        let element = self
            .elements
            .get_mut(id.get())
            .ok_or(DeclarationError::UnknownElement(id))?;
        if element.is_declared() {
            return Err(DeclarationError::DuplicateElement);
        }
        element.set_content(content_type, content_spec, external, span);
        Ok(())
    }

    pub fn element_id(&self, name: NameId) -> Option<ElementId> {
        self.element_index.get(&name).copied()
    }

    pub fn element(&self, id: ElementId) -> Option<&ElementDecl> {
        self.elements.get(id.get())
    }

    pub fn element_by_name(&self, name: NameId) -> Option<&ElementDecl> {
        self.element_id(name).and_then(|id| self.element(id))
    }

    pub fn elements(&self) -> impl Iterator<Item = (ElementId, &ElementDecl)> {
        self.elements
            .iter()
            .enumerate()
            .map(|(i, element)| (ElementId::new(i), element))
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Add an attribute definition to an element.
    ///
    /// The first definition of a name wins, as does the first ID and the
    /// first NOTATION attribute of an element. A rejected definition is
    /// dropped and the error carries the definition that stays in effect.
    pub fn add_attribute(
        &mut self,
        element: ElementId,
        def: AttributeDef,
    ) -> Result<AttributeId, DeclarationError> {
        if let Some(existing) = self.find_attribute(element, def.name) {
            return Err(DeclarationError::DuplicateAttribute(existing));
        }
        let decl = self
            .elements
            .get(element.get())
            .ok_or(DeclarationError::UnknownElement(element))?;
        match def.attribute_type {
            AttributeType::Id => {
                if let Some(existing) = decl.id_attribute() {
                    return Err(DeclarationError::MultipleIdAttributes(existing));
                }
            }
            AttributeType::Notation => {
                if let Some(existing) = decl.notation_attribute() {
                    return Err(DeclarationError::MultipleNotationAttributes(existing));
                }
            }
            _ => {}
        }

        let id = AttributeId::new(self.attributes.len());
        let attribute_type = def.attribute_type;
        let has_default = def.has_default();
        self.attributes.push(AttributeDecl { element, def });
        let decl = &mut self.elements[element.get()];
        decl.add_attribute(id, has_default);
        match attribute_type {
            AttributeType::Id => decl.set_id_attribute(id),
            AttributeType::Notation => decl.set_notation_attribute(id),
            _ => {}
        }
        Ok(id)
    }

    pub fn attribute(&self, id: AttributeId) -> Option<&AttributeDecl> {
        self.attributes.get(id.get())
    }

    /// Find an attribute definition of an element by name.
    pub fn find_attribute(&self, element: ElementId, name: NameId) -> Option<AttributeId> {
        self.element_attributes(element)
            .find(|id| self.attributes[id.get()].def.name == name)
    }

    /// The attribute definitions of an element, those with a default value
    /// first.
    pub fn element_attributes(&self, element: ElementId) -> impl Iterator<Item = AttributeId> + '_ {
        self.elements
            .get(element.get())
            .into_iter()
            .flat_map(|decl| decl.attributes())
    }

    pub fn declare_entity(&mut self, decl: EntityDecl) -> Result<EntityId, DeclarationError> {
        if let Some(existing) = self.entity_index.get(&decl.name) {
            return Err(DeclarationError::DuplicateEntity(*existing));
        }
        let id = EntityId::new(self.entities.len());
        self.entity_index.insert(decl.name.clone(), id);
        self.entities.push(decl);
        Ok(id)
    }

    pub fn entity(&self, name: &str) -> Option<&EntityDecl> {
        self.entity_index
            .get(name)
            .map(|id| &self.entities[id.get()])
    }

    pub fn declare_notation(&mut self, decl: NotationDecl) -> Result<NotationId, DeclarationError> {
        if let Some(existing) = self.notation_index.get(&decl.name) {
            return Err(DeclarationError::DuplicateNotation(*existing));
        }
        let id = NotationId::new(self.notations.len());
        self.notation_index.insert(decl.name.clone(), id);
        self.notations.push(decl);
        Ok(id)
    }

    pub fn notation(&self, name: &str) -> Option<&NotationDecl> {
        self.notation_index
            .get(name)
            .map(|id| &self.notations[id.get()])
    }

    pub fn content_specs(&self) -> &ContentSpecs {
        &self.content_specs
    }

    pub fn content_specs_mut(&mut self) -> &mut ContentSpecs {
        &mut self.content_specs
    }

    /// Forget all declarations, keeping allocated capacity.
    pub fn clear(&mut self) {
        self.elements.clear();
        self.element_index.clear();
        self.attributes.clear();
        self.entities.clear();
        self.entity_index.clear();
        self.notations.clear();
        self.notation_index.clear();
        self.content_specs.clear();
    }
}
