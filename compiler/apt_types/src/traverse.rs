//! Type traversal traits.
//!
//! - [`TypeVisitor`]: read-only double dispatch. One required method per
//!   variant, so adding a variant breaks every visitor at compile time
//!   instead of failing at run time.
//! - [`OnceVisitor`]: a visitor that remembers which handles it has seen.
//!   Type graphs share nodes and may loop through struct members, so any
//!   visitor that recurses should do it through [`OnceVisitor::visit_once`].
//! - [`TypeFolder`]: shape-preserving rebuild into the same pool. Override a
//!   `fold_*` method to substitute nodes of one variant; the defaults rebuild
//!   composites from their folded children and keep leaves as they are.

use apt_stack::ensure_sufficient_stack;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::{EnumValue, Function, Idx, LiteralFormat, Member, Pool, TypeError, TypeKind};

/// Read-only visitor over pooled types.
///
/// # Example
///
/// ```text
/// struct ExprCollector { exprs: Vec<String> }
///
/// impl TypeVisitor for ExprCollector {
///     type Output = ();
///     fn visit_pointer(&mut self, pool: &Pool, idx: Idx, inner: Idx) {
///         self.exprs.push(pool.expr(idx).to_owned());
///         self.visit(pool, inner);
///     }
///     // ... one method per variant
/// }
/// ```
pub trait TypeVisitor {
    type Output;

    /// Dispatch to the method matching `idx`'s variant.
    fn visit(&mut self, pool: &Pool, idx: Idx) -> Self::Output {
        walk_type(self, pool, idx)
    }

    fn visit_void(&mut self, pool: &Pool, idx: Idx) -> Self::Output;

    fn visit_literal(
        &mut self,
        pool: &Pool,
        idx: Idx,
        format: LiteralFormat,
        base: u32,
    ) -> Self::Output;

    fn visit_string(&mut self, pool: &Pool, idx: Idx) -> Self::Output;

    fn visit_const(&mut self, pool: &Pool, idx: Idx, inner: Idx) -> Self::Output;

    fn visit_pointer(&mut self, pool: &Pool, idx: Idx, inner: Idx) -> Self::Output;

    fn visit_handle(&mut self, pool: &Pool, idx: Idx, name: &str, inner: Idx) -> Self::Output;

    fn visit_array(&mut self, pool: &Pool, idx: Idx, inner: Idx, length: &str) -> Self::Output;

    fn visit_blob(&mut self, pool: &Pool, idx: Idx, inner: Idx, size: &str) -> Self::Output;

    fn visit_enum(&mut self, pool: &Pool, idx: Idx, values: &[EnumValue]) -> Self::Output;

    fn visit_bitmask(
        &mut self,
        pool: &Pool,
        idx: Idx,
        inner: Idx,
        values: &[EnumValue],
    ) -> Self::Output;

    fn visit_struct(
        &mut self,
        pool: &Pool,
        idx: Idx,
        name: &str,
        members: &[Member],
    ) -> Self::Output;

    fn visit_alias(&mut self, pool: &Pool, idx: Idx, inner: Idx) -> Self::Output;

    fn visit_opaque(&mut self, pool: &Pool, idx: Idx) -> Self::Output;

    fn visit_interface(
        &mut self,
        pool: &Pool,
        idx: Idx,
        name: &str,
        base: Option<Idx>,
        methods: &[Function],
    ) -> Self::Output;
}

/// Call the `visit_*` method matching `idx`'s variant.
pub fn walk_type<V: TypeVisitor + ?Sized>(visitor: &mut V, pool: &Pool, idx: Idx) -> V::Output {
    match pool.kind(idx) {
        TypeKind::Void => visitor.visit_void(pool, idx),
        TypeKind::Literal { format, base } => visitor.visit_literal(pool, idx, *format, *base),
        TypeKind::String => visitor.visit_string(pool, idx),
        TypeKind::Const { inner } => visitor.visit_const(pool, idx, *inner),
        TypeKind::Pointer { inner } => visitor.visit_pointer(pool, idx, *inner),
        TypeKind::Handle { name, inner } => visitor.visit_handle(pool, idx, name, *inner),
        TypeKind::Array { inner, length } => visitor.visit_array(pool, idx, *inner, length),
        TypeKind::Blob { inner, size } => visitor.visit_blob(pool, idx, *inner, size),
        TypeKind::Enum { values } => visitor.visit_enum(pool, idx, values),
        TypeKind::Bitmask { inner, values } => visitor.visit_bitmask(pool, idx, *inner, values),
        TypeKind::Struct { name, members } => visitor.visit_struct(pool, idx, name, members),
        TypeKind::Alias { inner } => visitor.visit_alias(pool, idx, *inner),
        TypeKind::Opaque => visitor.visit_opaque(pool, idx),
        TypeKind::Interface {
            name,
            base,
            methods,
        } => visitor.visit_interface(pool, idx, name, *base, methods),
    }
}

/// Handles already seen by one visitor instance.
#[derive(Clone, Debug, Default)]
pub struct VisitedSet(FxHashSet<Idx>);

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `idx` as seen; `true` if it was not seen before.
    pub fn insert(&mut self, idx: Idx) -> bool {
        self.0.insert(idx)
    }

    pub fn contains(&self, idx: Idx) -> bool {
        self.0.contains(&idx)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A visitor that handles each type at most once.
///
/// The set lives in the visitor, so it covers exactly one traversal; never
/// share an instance between unrelated walks.
pub trait OnceVisitor: TypeVisitor {
    fn visited(&mut self) -> &mut VisitedSet;

    /// Visit `idx` unless this visitor has seen it already, in which case
    /// nothing is called and `None` is returned.
    fn visit_once(&mut self, pool: &Pool, idx: Idx) -> Option<Self::Output> {
        if self.visited().insert(idx) {
            Some(ensure_sufficient_stack(|| self.visit(pool, idx)))
        } else {
            None
        }
    }
}

/// Shape-preserving transformation of pooled types.
///
/// Results are memoized per source handle, so a node shared by several
/// composites is rebuilt once. A struct is allocated as an empty shell and
/// recorded before its members fold, which lets a struct that reaches itself
/// through a pointer member fold without looping.
pub trait TypeFolder {
    fn pool(&mut self) -> &mut Pool;

    /// Source handle -> rebuilt handle.
    fn folded(&mut self) -> &mut FxHashMap<Idx, Idx>;

    fn fold(&mut self, idx: Idx) -> Result<Idx, TypeError> {
        if let Some(&done) = self.folded().get(&idx) {
            return Ok(done);
        }
        let kind = self.pool().kind(idx).clone();
        let rebuilt = ensure_sufficient_stack(|| fold_kind(self, idx, &kind))?;
        Ok(*self.folded().entry(idx).or_insert(rebuilt))
    }

    // === Leaves: kept as-is ===

    fn fold_void(&mut self, idx: Idx) -> Result<Idx, TypeError> {
        Ok(idx)
    }

    fn fold_literal(&mut self, idx: Idx) -> Result<Idx, TypeError> {
        Ok(idx)
    }

    fn fold_string(&mut self, idx: Idx) -> Result<Idx, TypeError> {
        Ok(idx)
    }

    fn fold_opaque(&mut self, idx: Idx) -> Result<Idx, TypeError> {
        Ok(idx)
    }

    fn fold_enum(&mut self, idx: Idx, _values: &[EnumValue]) -> Result<Idx, TypeError> {
        Ok(idx)
    }

    fn fold_interface(&mut self, idx: Idx) -> Result<Idx, TypeError> {
        Ok(idx)
    }

    // === Composites: rebuilt around the folded child ===

    fn fold_const(&mut self, idx: Idx, inner: Idx) -> Result<Idx, TypeError> {
        rebuild_around(self, idx, inner, Pool::constant)
    }

    fn fold_pointer(&mut self, idx: Idx, inner: Idx) -> Result<Idx, TypeError> {
        rebuild_around(self, idx, inner, Pool::pointer)
    }

    fn fold_handle(&mut self, idx: Idx, name: &str, inner: Idx) -> Result<Idx, TypeError> {
        rebuild_around(self, idx, inner, |pool, inner| pool.handle(name, inner))
    }

    fn fold_array(&mut self, idx: Idx, inner: Idx, length: &str) -> Result<Idx, TypeError> {
        rebuild_around(self, idx, inner, |pool, inner| pool.array(inner, length))
    }

    fn fold_blob(&mut self, idx: Idx, inner: Idx, size: &str) -> Result<Idx, TypeError> {
        rebuild_around(self, idx, inner, |pool, inner| pool.blob(inner, size))
    }

    fn fold_bitmask(
        &mut self,
        idx: Idx,
        inner: Idx,
        values: &[EnumValue],
    ) -> Result<Idx, TypeError> {
        rebuild_around(self, idx, inner, |pool, inner| {
            pool.bitmask(inner, values.to_vec())
        })
    }

    fn fold_alias(&mut self, idx: Idx, inner: Idx) -> Result<Idx, TypeError> {
        let expr = self.pool().expr(idx).to_owned();
        rebuild_around(self, idx, inner, |pool, inner| pool.alias(&expr, inner))
    }

    fn fold_struct(&mut self, idx: Idx, name: &str, members: &[Member]) -> Result<Idx, TypeError> {
        let shell = self.pool().structure(name, Vec::new())?;
        self.folded().insert(idx, shell);

        let mut rebuilt = Vec::with_capacity(members.len());
        for member in members {
            rebuilt.push(Member::new(member.name.clone(), self.fold(member.ty)?));
        }
        self.pool().set_members(shell, rebuilt)?;
        Ok(shell)
    }
}

fn fold_kind<F: TypeFolder + ?Sized>(
    folder: &mut F,
    idx: Idx,
    kind: &TypeKind,
) -> Result<Idx, TypeError> {
    match kind {
        TypeKind::Void => folder.fold_void(idx),
        TypeKind::Literal { .. } => folder.fold_literal(idx),
        TypeKind::String => folder.fold_string(idx),
        TypeKind::Opaque => folder.fold_opaque(idx),
        TypeKind::Enum { values } => folder.fold_enum(idx, values),
        TypeKind::Interface { .. } => folder.fold_interface(idx),
        TypeKind::Const { inner } => folder.fold_const(idx, *inner),
        TypeKind::Pointer { inner } => folder.fold_pointer(idx, *inner),
        TypeKind::Handle { name, inner } => folder.fold_handle(idx, name, *inner),
        TypeKind::Array { inner, length } => folder.fold_array(idx, *inner, length),
        TypeKind::Blob { inner, size } => folder.fold_blob(idx, *inner, size),
        TypeKind::Bitmask { inner, values } => folder.fold_bitmask(idx, *inner, values),
        TypeKind::Alias { inner } => folder.fold_alias(idx, *inner),
        TypeKind::Struct { name, members } => folder.fold_struct(idx, name, members),
    }
}

/// Fold `inner`, then build the replacement for `idx` around it.
///
/// If folding `inner` came back around a cycle and already produced a
/// replacement for `idx`, that one is returned and nothing new is built.
pub fn rebuild_around<F: TypeFolder + ?Sized>(
    folder: &mut F,
    idx: Idx,
    inner: Idx,
    build: impl FnOnce(&mut Pool, Idx) -> Result<Idx, TypeError>,
) -> Result<Idx, TypeError> {
    let inner = folder.fold(inner)?;
    if let Some(&done) = folder.folded().get(&idx) {
        return Ok(done);
    }
    build(folder.pool(), inner)
}

/// The identity-shaped folder: every composite is rebuilt, every leaf kept.
pub struct Rebuilder<'p> {
    pool: &'p mut Pool,
    folded: FxHashMap<Idx, Idx>,
}

impl<'p> Rebuilder<'p> {
    pub fn new(pool: &'p mut Pool) -> Self {
        Self {
            pool,
            folded: FxHashMap::default(),
        }
    }

    /// Rebuild the graph rooted at `idx`, returning the new root.
    pub fn rebuild(&mut self, idx: Idx) -> Result<Idx, TypeError> {
        self.fold(idx)
    }
}

impl TypeFolder for Rebuilder<'_> {
    fn pool(&mut self) -> &mut Pool {
        self.pool
    }

    fn folded(&mut self) -> &mut FxHashMap<Idx, Idx> {
        &mut self.folded
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "tests use unwrap/expect to fail fast on malformed fixtures"
)]
mod tests;
