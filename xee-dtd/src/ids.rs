use ahash::{HashSet, HashSetExt};

use crate::span::SourceSpan;

/// Document-wide identifier and notation bookkeeping.
///
/// IDs and IDREFs belong to one document and are cleared when the next
/// root element starts. Required notations belong to the grammar.
#[derive(Debug, Clone)]
pub struct IdRegistry {
    ids: HashSet<String>,
    idrefs: Vec<(String, SourceSpan)>,
    seen_idrefs: HashSet<String>,
    notations: Vec<(String, SourceSpan)>,
    seen_notations: HashSet<String>,
}

impl Default for IdRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl IdRegistry {
    pub fn new() -> Self {
        Self {
            ids: HashSet::new(),
            idrefs: Vec::new(),
            seen_idrefs: HashSet::new(),
            notations: Vec::new(),
            seen_notations: HashSet::new(),
        }
    }

    /// Register an ID value. Returns false if it was already defined.
    pub fn add_id(&mut self, value: &str) -> bool {
        if self.ids.contains(value) {
            return false;
        }
        self.ids.insert(value.to_string());
        true
    }

    /// Record a reference to an ID; only the first location of each value
    /// is kept.
    pub fn add_idref(&mut self, value: &str, span: SourceSpan) {
        if self.seen_idrefs.contains(value) {
            return;
        }
        self.seen_idrefs.insert(value.to_string());
        self.idrefs.push((value.to_string(), span));
    }

    /// IDREF values without a matching ID, with the location they were
    /// first seen, in the order they were first seen.
    pub fn unresolved_idrefs(&self) -> impl Iterator<Item = (&str, SourceSpan)> {
        self.idrefs
            .iter()
            .filter(|(value, _)| !self.ids.contains(value))
            .map(|(value, span)| (value.as_str(), *span))
    }

    /// Record that a notation must be declared; only the first location of
    /// each name is kept.
    pub fn require_notation(&mut self, name: &str, span: SourceSpan) {
        if self.seen_notations.contains(name) {
            return;
        }
        self.seen_notations.insert(name.to_string());
        self.notations.push((name.to_string(), span));
    }

    pub fn required_notations(&self) -> impl Iterator<Item = (&str, SourceSpan)> {
        self.notations
            .iter()
            .map(|(name, span)| (name.as_str(), *span))
    }

    /// Forget the IDs and IDREFs of the current document.
    pub fn clear_document(&mut self) {
        self.ids.clear();
        self.idrefs.clear();
        self.seen_idrefs.clear();
    }

    pub fn clear(&mut self) {
        self.clear_document();
        self.notations.clear();
        self.seen_notations.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unresolved_idrefs_first_location() {
        let mut ids = IdRegistry::new();
        ids.add_idref("a", SourceSpan::new(1, 2));
        ids.add_idref("b", SourceSpan::new(3, 4));
        ids.add_idref("a", SourceSpan::new(5, 6));
        assert!(ids.add_id("b"));
        assert!(!ids.add_id("b"));

        let unresolved: Vec<_> = ids.unresolved_idrefs().collect();
        assert_eq!(unresolved, vec![("a", SourceSpan::new(1, 2))]);
    }

    #[test]
    fn test_clear_document_keeps_notations() {
        let mut ids = IdRegistry::new();
        ids.add_id("x");
        ids.require_notation("gif", SourceSpan::new(0, 1));
        ids.require_notation("gif", SourceSpan::new(4, 5));
        ids.clear_document();
        assert!(ids.add_id("x"));
        assert_eq!(ids.required_notations().count(), 1);
        ids.clear();
        assert_eq!(ids.required_notations().count(), 0);
    }
}
