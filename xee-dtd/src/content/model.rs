use crate::declaration::ContentSpecType;
use crate::error::Result;

use super::canonical::canonicalize;
use super::dfa::Dfa;
use super::mixed::MixedModel;
use super::simple::SimpleModel;
use super::spec::{ContentSpecId, ContentSpecs, Symbol};

/// The outcome of matching a child sequence against a content model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    /// The child at this index cannot be accepted.
    InvalidAt(usize),
    /// All children were accepted but more are required.
    Incomplete,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    /// The index of the first child that doesn't fit, where running out of
    /// children counts as failing at `len`.
    pub fn failure_index(&self, len: usize) -> Option<usize> {
        match self {
            ValidationResult::Valid => None,
            ValidationResult::InvalidAt(i) => Some(*i),
            ValidationResult::Incomplete => Some(len),
        }
    }
}

/// An executable content model for one element type.
#[derive(Debug, Clone)]
pub enum ContentModel {
    Empty,
    Any,
    Simple(SimpleModel),
    Mixed(MixedModel),
    Dfa(Dfa),
}

impl ContentModel {
    /// Select and build the model for a declared content type.
    ///
    /// Undeclared elements get `Any`; that they are undeclared is reported
    /// elsewhere.
    pub fn build(
        specs: &ContentSpecs,
        content_type: ContentSpecType,
        root: Option<ContentSpecId>,
    ) -> Result<Self> {
        let model = match (content_type, root) {
            (ContentSpecType::Empty, _) => ContentModel::Empty,
            (ContentSpecType::Any | ContentSpecType::Undeclared, _) => ContentModel::Any,
            (ContentSpecType::Mixed, Some(root)) => {
                ContentModel::Mixed(MixedModel::new(specs.leaves(root)?))
            }
            (ContentSpecType::Children, Some(root)) => {
                if let Some(simple) = SimpleModel::from_spec(specs, root)? {
                    ContentModel::Simple(simple)
                } else {
                    ContentModel::Dfa(Dfa::build(&canonicalize(specs, root)?))
                }
            }
            // a mixed declaration without a tree only allows text
            (ContentSpecType::Mixed, None) => ContentModel::Mixed(MixedModel::new([])),
            (ContentSpecType::Children, None) => ContentModel::Empty,
        };
        log::debug!("selected {} content model", model.kind());
        Ok(model)
    }

    pub fn validate(&self, children: &[Symbol]) -> ValidationResult {
        match self {
            ContentModel::Empty => {
                if children.is_empty() {
                    ValidationResult::Valid
                } else {
                    ValidationResult::InvalidAt(0)
                }
            }
            ContentModel::Any => ValidationResult::Valid,
            ContentModel::Simple(simple) => simple.validate(children),
            ContentModel::Mixed(mixed) => mixed.validate(children),
            ContentModel::Dfa(dfa) => dfa.validate(children),
        }
    }

    pub fn is_ambiguous(&self) -> bool {
        matches!(self, ContentModel::Dfa(dfa) if dfa.is_ambiguous())
    }

    fn kind(&self) -> &'static str {
        match self {
            ContentModel::Empty => "empty",
            ContentModel::Any => "any",
            ContentModel::Simple(_) => "simple",
            ContentModel::Mixed(_) => "mixed",
            ContentModel::Dfa(_) => "automaton",
        }
    }
}
