//! Transitive type closure.

use apt_types::{
    EnumValue, Function, Idx, LiteralFormat, Member, OnceVisitor, Pool, TypeVisitor, VisitedSet,
};

use crate::TypeSet;

/// Collects every type reachable from a set of roots.
///
/// Order is pre-order discovery, so a composite precedes its children. An
/// interface reaches its base and the argument and return types of its own
/// methods; the base's methods are reached through the base.
#[derive(Debug, Default)]
pub struct ClosureCollector {
    visited: VisitedSet,
    reached: TypeSet,
}

impl ClosureCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Walk everything reachable from `root` not already collected.
    pub fn collect(&mut self, pool: &Pool, root: Idx) {
        self.visit_once(pool, root);
    }

    pub fn finish(self) -> TypeSet {
        self.reached
    }

    fn enter(&mut self, pool: &Pool, idx: Idx, children: impl IntoIterator<Item = Idx>) {
        self.reached.insert(idx);
        for child in children {
            self.visit_once(pool, child);
        }
    }
}

impl TypeVisitor for ClosureCollector {
    type Output = ();

    fn visit_void(&mut self, _pool: &Pool, idx: Idx) {
        self.reached.insert(idx);
    }

    fn visit_literal(&mut self, _pool: &Pool, idx: Idx, _format: LiteralFormat, _base: u32) {
        self.reached.insert(idx);
    }

    fn visit_string(&mut self, _pool: &Pool, idx: Idx) {
        self.reached.insert(idx);
    }

    fn visit_const(&mut self, pool: &Pool, idx: Idx, inner: Idx) {
        self.enter(pool, idx, Some(inner));
    }

    fn visit_pointer(&mut self, pool: &Pool, idx: Idx, inner: Idx) {
        self.enter(pool, idx, Some(inner));
    }

    fn visit_handle(&mut self, pool: &Pool, idx: Idx, _name: &str, inner: Idx) {
        self.enter(pool, idx, Some(inner));
    }

    fn visit_array(&mut self, pool: &Pool, idx: Idx, inner: Idx, _length: &str) {
        self.enter(pool, idx, Some(inner));
    }

    fn visit_blob(&mut self, pool: &Pool, idx: Idx, inner: Idx, _size: &str) {
        self.enter(pool, idx, Some(inner));
    }

    fn visit_enum(&mut self, _pool: &Pool, idx: Idx, _values: &[EnumValue]) {
        self.reached.insert(idx);
    }

    fn visit_bitmask(&mut self, pool: &Pool, idx: Idx, inner: Idx, _values: &[EnumValue]) {
        self.enter(pool, idx, Some(inner));
    }

    fn visit_struct(&mut self, pool: &Pool, idx: Idx, _name: &str, members: &[Member]) {
        self.enter(pool, idx, members.iter().map(|m| m.ty));
    }

    fn visit_alias(&mut self, pool: &Pool, idx: Idx, inner: Idx) {
        self.enter(pool, idx, Some(inner));
    }

    fn visit_opaque(&mut self, _pool: &Pool, idx: Idx) {
        self.reached.insert(idx);
    }

    fn visit_interface(
        &mut self,
        pool: &Pool,
        idx: Idx,
        _name: &str,
        base: Option<Idx>,
        methods: &[Function],
    ) {
        let method_types = methods.iter().flat_map(Function::referenced_types);
        self.enter(pool, idx, base.into_iter().chain(method_types));
    }
}

impl OnceVisitor for ClosureCollector {
    fn visited(&mut self) -> &mut VisitedSet {
        &mut self.visited
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "tests use unwrap/expect to fail fast on malformed fixtures"
)]
