//! Insertion-ordered set of type handles.

use apt_types::Idx;
use rustc_hash::FxHashSet;

/// Deduplicated type handles in first-insertion order.
///
/// Order matters: generated text must not depend on hash iteration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TypeSet {
    order: Vec<Idx>,
    seen: FxHashSet<Idx>,
}

impl TypeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `idx`; `false` if it was already present.
    pub fn insert(&mut self, idx: Idx) -> bool {
        if self.seen.insert(idx) {
            self.order.push(idx);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, idx: Idx) -> bool {
        self.seen.contains(&idx)
    }

    pub fn iter(&self) -> impl Iterator<Item = Idx> + '_ {
        self.order.iter().copied()
    }

    pub fn as_slice(&self) -> &[Idx] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl Extend<Idx> for TypeSet {
    fn extend<I: IntoIterator<Item = Idx>>(&mut self, iter: I) {
        for idx in iter {
            self.insert(idx);
        }
    }
}
