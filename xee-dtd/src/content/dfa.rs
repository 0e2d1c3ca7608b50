use ahash::{HashMap, HashMapExt};

use super::canonical::{CanonicalNode, CanonicalTree};
use super::model::ValidationResult;
use super::spec::Symbol;

type StateId = usize;

// per-node annotations for the follow-position construction
#[derive(Debug, Default, Clone)]
struct Annotation {
    nullable: bool,
    first: Vec<usize>,
    last: Vec<usize>,
}

/// A deterministic automaton built directly from a canonical content model
/// tree.
///
/// States are sets of leaf positions; position `leaf_count` is the end
/// marker, and a state containing it accepts.
#[derive(Debug, Clone)]
pub struct Dfa {
    symbols: HashMap<Symbol, usize>,
    // transitions[state][symbol index]
    transitions: Vec<Vec<Option<StateId>>>,
    accepting: Vec<bool>,
    ambiguous: bool,
}

impl Dfa {
    pub fn build(tree: &CanonicalTree) -> Self {
        let positions = tree.positions();
        let end = positions.len();

        let mut symbols = HashMap::new();
        let mut position_symbols = Vec::with_capacity(positions.len());
        for symbol in positions {
            let next = symbols.len();
            let index = *symbols.entry(*symbol).or_insert(next);
            position_symbols.push(index);
        }

        let (annotations, follow) = follow_positions(tree);
        let root = &annotations[tree.root()];
        let mut start = root.first.clone();
        if root.nullable {
            start.push(end);
        }
        let mut follow = follow;
        for p in &root.last {
            union(&mut follow[*p], &[end]);
        }

        let mut states: Vec<Vec<usize>> = vec![start.clone()];
        let mut state_ids: HashMap<Vec<usize>, StateId> = HashMap::new();
        state_ids.insert(start, 0);
        let mut transitions = Vec::new();
        let mut accepting = Vec::new();
        let mut ambiguous = false;

        let mut current = 0;
        while current < states.len() {
            let state = states[current].clone();
            let mut row = vec![None; symbols.len()];
            let mut targets: Vec<Vec<usize>> = vec![Vec::new(); symbols.len()];
            // a symbol reachable from two different declared leaves is
            // ambiguous; copies made for `+` share their source
            let mut seen = vec![None; symbols.len()];
            for p in &state {
                if *p == end {
                    continue;
                }
                let symbol = position_symbols[*p];
                let source = tree.source(*p);
                match seen[symbol] {
                    Some(other) => ambiguous |= other != source,
                    None => seen[symbol] = Some(source),
                }
                union(&mut targets[symbol], &follow[*p]);
            }
            for (symbol, target) in targets.into_iter().enumerate() {
                if target.is_empty() {
                    continue;
                }
                let id = match state_ids.get(&target) {
                    Some(id) => *id,
                    None => {
                        let id = states.len();
                        states.push(target.clone());
                        state_ids.insert(target, id);
                        id
                    }
                };
                row[symbol] = Some(id);
            }
            accepting.push(state.contains(&end));
            transitions.push(row);
            current += 1;
        }

        log::debug!(
            "built content automaton: {} positions, {} symbols, {} states{}",
            positions.len(),
            symbols.len(),
            states.len(),
            if ambiguous { ", ambiguous" } else { "" }
        );

        Self {
            symbols,
            transitions,
            accepting,
            ambiguous,
        }
    }

    pub fn validate(&self, children: &[Symbol]) -> ValidationResult {
        let mut state = 0;
        for (i, child) in children.iter().enumerate() {
            let next = self
                .symbols
                .get(child)
                .and_then(|symbol| self.transitions[state][*symbol]);
            match next {
                Some(next) => {
                    log::trace!("content automaton {} -> {} on {:?}", state, next, child);
                    state = next;
                }
                None => return ValidationResult::InvalidAt(i),
            }
        }
        if self.accepting[state] {
            ValidationResult::Valid
        } else {
            ValidationResult::Incomplete
        }
    }

    /// True if some state could continue on the same symbol through two
    /// different declared leaves; XML requires content models to be
    /// deterministic.
    pub fn is_ambiguous(&self) -> bool {
        self.ambiguous
    }
}

fn follow_positions(tree: &CanonicalTree) -> (Vec<Annotation>, Vec<Vec<usize>>) {
    let mut annotations: Vec<Annotation> = Vec::with_capacity(tree.nodes().len());
    let mut follow = vec![Vec::new(); tree.leaf_count()];

    // children come before their parents, so a single forward pass suffices
    for node in tree.nodes() {
        let annotation = match *node {
            CanonicalNode::Leaf { position, .. } => Annotation {
                nullable: false,
                first: vec![position],
                last: vec![position],
            },
            CanonicalNode::Epsilon => Annotation {
                nullable: true,
                first: Vec::new(),
                last: Vec::new(),
            },
            CanonicalNode::Choice(left, right) => {
                let (left, right) = (&annotations[left], &annotations[right]);
                let mut first = left.first.clone();
                union(&mut first, &right.first);
                let mut last = left.last.clone();
                union(&mut last, &right.last);
                Annotation {
                    nullable: left.nullable || right.nullable,
                    first,
                    last,
                }
            }
            CanonicalNode::Seq(left, right) => {
                let (left, right) = (&annotations[left], &annotations[right]);
                for p in &left.last {
                    union(&mut follow[*p], &right.first);
                }
                let mut first = left.first.clone();
                if left.nullable {
                    union(&mut first, &right.first);
                }
                let mut last = right.last.clone();
                if right.nullable {
                    union(&mut last, &left.last);
                }
                Annotation {
                    nullable: left.nullable && right.nullable,
                    first,
                    last,
                }
            }
            CanonicalNode::ZeroOrMore(child) => {
                let child = &annotations[child];
                for p in &child.last {
                    union(&mut follow[*p], &child.first);
                }
                Annotation {
                    nullable: true,
                    first: child.first.clone(),
                    last: child.last.clone(),
                }
            }
        };
        annotations.push(annotation);
    }
    (annotations, follow)
}

// sorted set union
fn union(target: &mut Vec<usize>, other: &[usize]) {
    if other.is_empty() {
        return;
    }
    target.extend_from_slice(other);
    target.sort_unstable();
    target.dedup();
}
