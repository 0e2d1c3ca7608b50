use crate::error::Result;

use super::spec::{ContentSpecId, ContentSpecNode, ContentSpecs, Symbol};

/// A node of a content model reduced to three operators.
///
/// Children always have a lower index than their parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanonicalNode {
    Leaf { symbol: Symbol, position: usize },
    /// Matches the empty sequence; it has no position.
    Epsilon,
    Choice(usize, usize),
    Seq(usize, usize),
    ZeroOrMore(usize),
}

/// A content spec tree with `?` and `+` rewritten away.
///
/// `x?` becomes `(x|ε)` and `x+` becomes `(x,x*)`, where the repeated `x` is
/// a fresh copy with its own leaf positions. Copies keep the id of the
/// declared leaf they came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalTree {
    nodes: Vec<CanonicalNode>,
    positions: Vec<Symbol>,
    sources: Vec<ContentSpecId>,
}

impl CanonicalTree {
    pub fn root(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn nodes(&self) -> &[CanonicalNode] {
        &self.nodes
    }

    pub fn node(&self, index: usize) -> CanonicalNode {
        self.nodes[index]
    }

    /// The number of positioned leaves.
    pub fn leaf_count(&self) -> usize {
        self.positions.len()
    }

    /// The symbol of each leaf position, in position order.
    pub fn positions(&self) -> &[Symbol] {
        &self.positions
    }

    /// The declared leaf a position was rewritten from.
    pub fn source(&self, position: usize) -> ContentSpecId {
        self.sources[position]
    }
}

pub fn canonicalize(specs: &ContentSpecs, root: ContentSpecId) -> Result<CanonicalTree> {
    let mut tree = CanonicalTree {
        nodes: Vec::new(),
        positions: Vec::new(),
        sources: Vec::new(),
    };
    let node = specs.get(root)?;
    rewrite(specs, &mut tree, root, node)?;
    Ok(tree)
}

fn rewrite(
    specs: &ContentSpecs,
    tree: &mut CanonicalTree,
    id: ContentSpecId,
    node: &ContentSpecNode,
) -> Result<usize> {
    use ContentSpecNode::*;
    let canonical = match node {
        Leaf(symbol) => {
            let position = tree.positions.len();
            tree.positions.push(*symbol);
            tree.sources.push(id);
            CanonicalNode::Leaf {
                symbol: *symbol,
                position,
            }
        }
        Choice(left, right) => {
            let left = rewrite(specs, tree, *left, specs.child(id, *left)?)?;
            let right = rewrite(specs, tree, *right, specs.child(id, *right)?)?;
            CanonicalNode::Choice(left, right)
        }
        Seq(left, right) => {
            let left = rewrite(specs, tree, *left, specs.child(id, *left)?)?;
            let right = rewrite(specs, tree, *right, specs.child(id, *right)?)?;
            CanonicalNode::Seq(left, right)
        }
        ZeroOrMore(child) => {
            let child = rewrite(specs, tree, *child, specs.child(id, *child)?)?;
            CanonicalNode::ZeroOrMore(child)
        }
        ZeroOrOne(child) => {
            let child = rewrite(specs, tree, *child, specs.child(id, *child)?)?;
            let epsilon = push(tree, CanonicalNode::Epsilon);
            CanonicalNode::Choice(child, epsilon)
        }
        OneOrMore(child) => {
            let child_node = specs.child(id, *child)?;
            let first = rewrite(specs, tree, *child, child_node)?;
            let copy = rewrite(specs, tree, *child, child_node)?;
            let repeat = push(tree, CanonicalNode::ZeroOrMore(copy));
            CanonicalNode::Seq(first, repeat)
        }
    };
    Ok(push(tree, canonical))
}

fn push(tree: &mut CanonicalTree, node: CanonicalNode) -> usize {
    tree.nodes.push(node);
    tree.nodes.len() - 1
}
