use std::fmt;

use xot::{NameId, Xot};

use crate::error::{Error, Result};

/// Something that can appear as a child in element content.
///
/// Character data is a single reserved symbol; all text between two
/// element children counts as one occurrence of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Symbol {
    Element(NameId),
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ContentSpecId(usize);

impl ContentSpecId {
    pub fn get(self) -> usize {
        self.0
    }
}

/// A node of a declared content model, as the DTD spells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ContentSpecNode {
    Leaf(Symbol),
    Choice(ContentSpecId, ContentSpecId),
    Seq(ContentSpecId, ContentSpecId),
    ZeroOrOne(ContentSpecId),
    ZeroOrMore(ContentSpecId),
    OneOrMore(ContentSpecId),
}

/// Arena of content spec nodes for all elements of a grammar.
///
/// Nodes can only refer to nodes created before them, so a tree read back
/// from the arena is always finite.
#[derive(Debug, Default, Clone)]
pub struct ContentSpecs {
    nodes: Vec<ContentSpecNode>,
}

impl ContentSpecs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, node: ContentSpecNode) -> ContentSpecId {
        let id = ContentSpecId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    pub fn leaf(&mut self, name: NameId) -> ContentSpecId {
        self.add(ContentSpecNode::Leaf(Symbol::Element(name)))
    }

    /// The `#PCDATA` leaf.
    pub fn text(&mut self) -> ContentSpecId {
        self.add(ContentSpecNode::Leaf(Symbol::Text))
    }

    pub fn choice(&mut self, left: ContentSpecId, right: ContentSpecId) -> ContentSpecId {
        self.add(ContentSpecNode::Choice(left, right))
    }

    pub fn seq(&mut self, left: ContentSpecId, right: ContentSpecId) -> ContentSpecId {
        self.add(ContentSpecNode::Seq(left, right))
    }

    pub fn zero_or_one(&mut self, child: ContentSpecId) -> ContentSpecId {
        self.add(ContentSpecNode::ZeroOrOne(child))
    }

    pub fn zero_or_more(&mut self, child: ContentSpecId) -> ContentSpecId {
        self.add(ContentSpecNode::ZeroOrMore(child))
    }

    pub fn one_or_more(&mut self, child: ContentSpecId) -> ContentSpecId {
        self.add(ContentSpecNode::OneOrMore(child))
    }

    /// Build a choice over all the given nodes, folding to the left.
    pub fn choices(&mut self, items: &[ContentSpecId]) -> Option<ContentSpecId> {
        let (first, rest) = items.split_first()?;
        Some(
            rest.iter()
                .fold(*first, |left, right| self.choice(left, *right)),
        )
    }

    /// Build a sequence over all the given nodes, folding to the left.
    pub fn seqs(&mut self, items: &[ContentSpecId]) -> Option<ContentSpecId> {
        let (first, rest) = items.split_first()?;
        Some(
            rest.iter()
                .fold(*first, |left, right| self.seq(left, *right)),
        )
    }

    /// The mixed content model `(#PCDATA|a|b)*`, or `(#PCDATA)` when no
    /// names are given.
    pub fn mixed(&mut self, names: &[NameId]) -> ContentSpecId {
        let text = self.text();
        if names.is_empty() {
            return text;
        }
        let choice = names.iter().fold(text, |left, name| {
            let leaf = self.leaf(*name);
            self.choice(left, leaf)
        });
        self.zero_or_more(choice)
    }

    pub fn get(&self, id: ContentSpecId) -> Result<&ContentSpecNode> {
        self.nodes.get(id.0).ok_or(Error::UnknownContentSpec(id))
    }

    /// Look up a child of `parent`, refusing references that don't point
    /// backwards.
    pub(crate) fn child(
        &self,
        parent: ContentSpecId,
        child: ContentSpecId,
    ) -> Result<&ContentSpecNode> {
        if child >= parent {
            return Err(Error::ForwardContentSpec { parent, child });
        }
        self.get(child)
    }

    /// Check that the tree under `root` is well formed.
    pub fn check(&self, root: ContentSpecId) -> Result<()> {
        self.walk(root, &mut |_| {})
    }

    /// All leaf symbols under `root`, in document order.
    pub fn leaves(&self, root: ContentSpecId) -> Result<Vec<Symbol>> {
        let mut leaves = Vec::new();
        self.walk(root, &mut |node| {
            if let ContentSpecNode::Leaf(symbol) = node {
                leaves.push(*symbol);
            }
        })?;
        Ok(leaves)
    }

    fn walk(&self, id: ContentSpecId, f: &mut impl FnMut(&ContentSpecNode)) -> Result<()> {
        let node = self.get(id)?;
        self.walk_node(id, node, f)
    }

    fn walk_node(
        &self,
        id: ContentSpecId,
        node: &ContentSpecNode,
        f: &mut impl FnMut(&ContentSpecNode),
    ) -> Result<()> {
        use ContentSpecNode::*;
        f(node);
        match node {
            Leaf(_) => {}
            Choice(left, right) | Seq(left, right) => {
                self.walk_node(*left, self.child(id, *left)?, f)?;
                self.walk_node(*right, self.child(id, *right)?, f)?;
            }
            ZeroOrOne(child) | ZeroOrMore(child) | OneOrMore(child) => {
                self.walk_node(*child, self.child(id, *child)?, f)?;
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Display the content spec under `root` in DTD syntax.
    pub fn display<'a>(&'a self, root: ContentSpecId, xot: &'a Xot) -> ContentSpecDisplay<'a> {
        ContentSpecDisplay {
            specs: self,
            root,
            xot,
        }
    }
}

pub struct ContentSpecDisplay<'a> {
    specs: &'a ContentSpecs,
    root: ContentSpecId,
    xot: &'a Xot,
}

impl ContentSpecDisplay<'_> {
    fn fmt_node(&self, f: &mut fmt::Formatter<'_>, id: ContentSpecId, top: bool) -> fmt::Result {
        use ContentSpecNode::*;
        let node = self.specs.get(id).map_err(|_| fmt::Error)?;
        match node {
            Leaf(symbol) => {
                if top {
                    write!(f, "(")?;
                }
                self.fmt_symbol(f, *symbol)?;
                if top {
                    write!(f, ")")?;
                }
                Ok(())
            }
            Choice(..) | Seq(..) => {
                let separator = if matches!(node, Choice(..)) { "|" } else { "," };
                let mut operands = Vec::new();
                self.operands(id, node, &mut operands)?;
                write!(f, "(")?;
                for (i, operand) in operands.iter().enumerate() {
                    if i > 0 {
                        write!(f, "{}", separator)?;
                    }
                    self.fmt_node(f, *operand, false)?;
                }
                write!(f, ")")
            }
            ZeroOrOne(child) => self.fmt_unary(f, *child, '?', top),
            ZeroOrMore(child) => self.fmt_unary(f, *child, '*', top),
            OneOrMore(child) => self.fmt_unary(f, *child, '+', top),
        }
    }

    // flatten left and right nested operators of the same kind, so
    // (a,(b,c)) and ((a,b),c) both come out as (a,b,c)
    fn operands(
        &self,
        id: ContentSpecId,
        node: &ContentSpecNode,
        operands: &mut Vec<ContentSpecId>,
    ) -> fmt::Result {
        let (left, right) = match node {
            ContentSpecNode::Choice(left, right) | ContentSpecNode::Seq(left, right) => {
                (*left, *right)
            }
            _ => {
                operands.push(id);
                return Ok(());
            }
        };
        for child in [left, right] {
            let child_node = self.specs.child(id, child).map_err(|_| fmt::Error)?;
            if std::mem::discriminant(child_node) == std::mem::discriminant(node) {
                self.operands(child, child_node, operands)?;
            } else {
                operands.push(child);
            }
        }
        Ok(())
    }

    fn fmt_unary(
        &self,
        f: &mut fmt::Formatter<'_>,
        child: ContentSpecId,
        suffix: char,
        top: bool,
    ) -> fmt::Result {
        self.fmt_node(f, child, top)?;
        write!(f, "{}", suffix)
    }

    fn fmt_symbol(&self, f: &mut fmt::Formatter<'_>, symbol: Symbol) -> fmt::Result {
        match symbol {
            Symbol::Element(name) => write!(f, "{}", self.xot.local_name_str(name)),
            Symbol::Text => write!(f, "#PCDATA"),
        }
    }
}

impl fmt::Display for ContentSpecDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_node(f, self.root, true)
    }
}
