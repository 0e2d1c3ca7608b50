use crate::error::Result;

use super::model::ValidationResult;
use super::spec::{ContentSpecId, ContentSpecNode, ContentSpecs, Symbol};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimpleOperator {
    Leaf,
    ZeroOrOne,
    ZeroOrMore,
    OneOrMore,
    Choice,
    Seq,
}

/// A content model small enough to match without an automaton: `a`, `a?`,
/// `a*`, `a+`, `(a|b)` or `(a,b)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimpleModel {
    operator: SimpleOperator,
    first: Symbol,
    second: Option<Symbol>,
}

impl SimpleModel {
    /// Recognize a simple model from the declared tree, or `None` if the
    /// tree is more complicated.
    pub fn from_spec(specs: &ContentSpecs, root: ContentSpecId) -> Result<Option<Self>> {
        use ContentSpecNode::*;
        let leaf = |id: ContentSpecId| -> Result<Option<Symbol>> {
            match specs.child(root, id)? {
                Leaf(symbol) => Ok(Some(*symbol)),
                _ => Ok(None),
            }
        };
        let model = match specs.get(root)? {
            Leaf(symbol) => Some(Self::unary(SimpleOperator::Leaf, *symbol)),
            ZeroOrOne(child) => {
                leaf(*child)?.map(|symbol| Self::unary(SimpleOperator::ZeroOrOne, symbol))
            }
            ZeroOrMore(child) => {
                leaf(*child)?.map(|symbol| Self::unary(SimpleOperator::ZeroOrMore, symbol))
            }
            OneOrMore(child) => {
                leaf(*child)?.map(|symbol| Self::unary(SimpleOperator::OneOrMore, symbol))
            }
            Choice(left, right) => match (leaf(*left)?, leaf(*right)?) {
                (Some(l), Some(r)) => Some(Self::binary(SimpleOperator::Choice, l, r)),
                _ => None,
            },
            Seq(left, right) => match (leaf(*left)?, leaf(*right)?) {
                (Some(l), Some(r)) => Some(Self::binary(SimpleOperator::Seq, l, r)),
                _ => None,
            },
        };
        Ok(model)
    }

    fn unary(operator: SimpleOperator, first: Symbol) -> Self {
        Self {
            operator,
            first,
            second: None,
        }
    }

    fn binary(operator: SimpleOperator, first: Symbol, second: Symbol) -> Self {
        Self {
            operator,
            first,
            second: Some(second),
        }
    }

    pub fn operator(&self) -> SimpleOperator {
        self.operator
    }

    pub fn validate(&self, children: &[Symbol]) -> ValidationResult {
        use ValidationResult::*;
        match self.operator {
            SimpleOperator::Leaf => match children {
                [] => Incomplete,
                [first, ..] if *first != self.first => InvalidAt(0),
                [_] => Valid,
                _ => InvalidAt(1),
            },
            SimpleOperator::ZeroOrOne => match children {
                [] => Valid,
                [first, ..] if *first != self.first => InvalidAt(0),
                [_] => Valid,
                _ => InvalidAt(1),
            },
            SimpleOperator::ZeroOrMore => self.all_first(children),
            SimpleOperator::OneOrMore => {
                if children.is_empty() {
                    Incomplete
                } else {
                    self.all_first(children)
                }
            }
            SimpleOperator::Choice => match children {
                [] => Incomplete,
                [first, ..] if *first != self.first && Some(*first) != self.second => {
                    InvalidAt(0)
                }
                [_] => Valid,
                _ => InvalidAt(1),
            },
            SimpleOperator::Seq => match children {
                [] => Incomplete,
                [first, ..] if *first != self.first => InvalidAt(0),
                [_] => Incomplete,
                [_, second, ..] if Some(*second) != self.second => InvalidAt(1),
                [_, _] => Valid,
                _ => InvalidAt(2),
            },
        }
    }

    fn all_first(&self, children: &[Symbol]) -> ValidationResult {
        match children.iter().position(|child| *child != self.first) {
            Some(i) => ValidationResult::InvalidAt(i),
            None => ValidationResult::Valid,
        }
    }
}
