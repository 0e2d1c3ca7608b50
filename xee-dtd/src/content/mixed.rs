use ahash::{HashSet, HashSetExt};
use xot::NameId;

use super::model::ValidationResult;
use super::spec::Symbol;

/// Mixed content: character data and the listed element types, in any order
/// and number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MixedModel {
    allowed: HashSet<NameId>,
}

impl MixedModel {
    pub fn new(leaves: impl IntoIterator<Item = Symbol>) -> Self {
        let mut allowed = HashSet::new();
        for leaf in leaves {
            if let Symbol::Element(name) = leaf {
                allowed.insert(name);
            }
        }
        Self { allowed }
    }

    pub fn allows(&self, symbol: Symbol) -> bool {
        match symbol {
            Symbol::Text => true,
            Symbol::Element(name) => self.allowed.contains(&name),
        }
    }

    pub fn validate(&self, children: &[Symbol]) -> ValidationResult {
        match children.iter().position(|child| !self.allows(*child)) {
            Some(i) => ValidationResult::InvalidAt(i),
            None => ValidationResult::Valid,
        }
    }
}
