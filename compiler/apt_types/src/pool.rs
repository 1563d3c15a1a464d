//! Type pool.
//!
//! The pool is the arena every type of one API description lives in. Items
//! are appended and never removed, so an [`Idx`] stays valid for the pool's
//! lifetime. The pool owns the identifier registry: registering a type and
//! allocating its slot is one operation.
//!
//! # Layout
//!
//! - `items[idx]` holds the id, rendered expression and kind of `idx`
//! - `Idx::VOID` and `Idx::STRING` occupy the first two slots

mod construct;

use smallvec::SmallVec;

use crate::{CollisionPolicy, Function, Idx, KindFlags, TypeError, TypeKind, TypeRegistry};

/// One pooled type.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeItem {
    /// Registry-unique identifier.
    pub id: String,
    /// Rendered C type text, e.g. `const int *`.
    pub expr: String,
    pub kind: TypeKind,
}

/// Arena of types for one API description.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Pool {
    items: Vec<TypeItem>,
    registry: TypeRegistry,
}

impl Default for Pool {
    fn default() -> Self {
        Self::new()
    }
}

impl Pool {
    /// Create a pool holding only the `void` and `char *` singletons.
    pub fn new() -> Self {
        Self::with_policy(CollisionPolicy::default())
    }

    /// Create a pool whose registry renumbers collisions under `policy`.
    pub fn with_policy(policy: CollisionPolicy) -> Self {
        let mut pool = Self {
            items: Vec::with_capacity(64),
            registry: TypeRegistry::with_policy(policy),
        };
        pool.push_singleton("Void", "void", TypeKind::Void);
        pool.push_singleton("String", "char *", TypeKind::String);
        debug_assert_eq!(pool.items.len(), Idx::FIRST_DYNAMIC as usize);
        pool
    }

    fn push_singleton(&mut self, id: &str, expr: &str, kind: TypeKind) {
        let idx = self.next_idx();
        self.registry.reserve(id, idx);
        self.items.push(TypeItem {
            id: id.to_owned(),
            expr: expr.to_owned(),
            kind,
        });
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "a pool never approaches u32::MAX types"
    )]
    fn next_idx(&self) -> Idx {
        Idx::from_raw(self.items.len() as u32)
    }

    /// Register `candidate` and append a new item under the final id.
    pub(crate) fn alloc(
        &mut self,
        candidate: &str,
        expr: String,
        kind: TypeKind,
    ) -> Result<Idx, TypeError> {
        let idx = self.next_idx();
        let id = self.registry.register(candidate, idx)?;
        self.items.push(TypeItem { id, expr, kind });
        Ok(idx)
    }

    pub(crate) fn kind_mut(&mut self, idx: Idx) -> &mut TypeKind {
        &mut self.items[idx.index()].kind
    }

    // === Lookup ===

    /// Get the item behind `idx`.
    ///
    /// Handles are only minted by this pool, so an out-of-range handle is a
    /// bug in the caller and panics.
    #[inline]
    pub fn item(&self, idx: Idx) -> &TypeItem {
        &self.items[idx.index()]
    }

    #[inline]
    pub fn kind(&self, idx: Idx) -> &TypeKind {
        &self.item(idx).kind
    }

    #[inline]
    pub fn id(&self, idx: Idx) -> &str {
        &self.item(idx).id
    }

    #[inline]
    pub fn expr(&self, idx: Idx) -> &str {
        &self.item(idx).expr
    }

    #[inline]
    pub fn flags(&self, idx: Idx) -> KindFlags {
        self.kind(idx).flags()
    }

    /// Find a type by its registered id.
    pub fn lookup(&self, id: &str) -> Option<Idx> {
        self.registry.lookup(id)
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Never true: the singletons are always present.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All types in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (Idx, &TypeItem)> {
        (0u32..).map(Idx::from_raw).zip(self.items.iter())
    }

    // === Interfaces ===

    /// Methods declared directly on an interface (empty for other kinds).
    pub fn own_methods(&self, idx: Idx) -> &[Function] {
        match self.kind(idx) {
            TypeKind::Interface { methods, .. } => methods,
            _ => &[],
        }
    }

    /// Base interface, if any.
    pub fn base(&self, idx: Idx) -> Option<Idx> {
        match self.kind(idx) {
            TypeKind::Interface { base, .. } => *base,
            _ => None,
        }
    }

    /// Iterate an interface's methods: the base chain's methods first, root
    /// to leaf, then its own, each group in declaration order.
    ///
    /// The sequence is produced lazily; call again to restart it.
    pub fn methods(&self, idx: Idx) -> MethodIter<'_> {
        let mut chain = SmallVec::new();
        let mut cursor = Some(idx);
        while let Some(current) = cursor {
            if !matches!(self.kind(current), TypeKind::Interface { .. }) {
                break;
            }
            chain.push(current);
            cursor = self.base(current);
        }
        MethodIter {
            pool: self,
            chain,
            current: [].iter(),
        }
    }
}

/// Lazy root-to-leaf iterator over an interface chain's methods.
pub struct MethodIter<'a> {
    pool: &'a Pool,
    /// Remaining interfaces, leaf first; popped from the root end.
    chain: SmallVec<[Idx; 4]>,
    current: std::slice::Iter<'a, Function>,
}

impl<'a> Iterator for MethodIter<'a> {
    type Item = &'a Function;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(method) = self.current.next() {
                return Some(method);
            }
            let next = self.chain.pop()?;
            self.current = self.pool.own_methods(next).iter();
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "tests use unwrap/expect to fail fast on malformed fixtures"
)]
mod tests;
