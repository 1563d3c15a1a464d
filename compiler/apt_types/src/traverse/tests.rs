use super::*;
use crate::{method, EnumValue, LiteralFormat, Member};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

/// Records kind names in preorder, recursing through `visit_once`.
#[derive(Default)]
struct KindTrace {
    visited: VisitedSet,
    kinds: Vec<&'static str>,
    handled: usize,
}

impl KindTrace {
    fn record(&mut self, pool: &Pool, idx: Idx) {
        self.handled += 1;
        self.kinds.push(pool.kind(idx).name());
    }

    fn descend(&mut self, pool: &Pool, inner: Idx) {
        self.visit_once(pool, inner);
    }
}

impl OnceVisitor for KindTrace {
    fn visited(&mut self) -> &mut VisitedSet {
        &mut self.visited
    }
}

impl TypeVisitor for KindTrace {
    type Output = ();

    fn visit_void(&mut self, pool: &Pool, idx: Idx) {
        self.record(pool, idx);
    }

    fn visit_literal(&mut self, pool: &Pool, idx: Idx, _format: LiteralFormat, _base: u32) {
        self.record(pool, idx);
    }

    fn visit_string(&mut self, pool: &Pool, idx: Idx) {
        self.record(pool, idx);
    }

    fn visit_const(&mut self, pool: &Pool, idx: Idx, inner: Idx) {
        self.record(pool, idx);
        self.descend(pool, inner);
    }

    fn visit_pointer(&mut self, pool: &Pool, idx: Idx, inner: Idx) {
        self.record(pool, idx);
        self.descend(pool, inner);
    }

    fn visit_handle(&mut self, pool: &Pool, idx: Idx, _name: &str, inner: Idx) {
        self.record(pool, idx);
        self.descend(pool, inner);
    }

    fn visit_array(&mut self, pool: &Pool, idx: Idx, inner: Idx, _length: &str) {
        self.record(pool, idx);
        self.descend(pool, inner);
    }

    fn visit_blob(&mut self, pool: &Pool, idx: Idx, inner: Idx, _size: &str) {
        self.record(pool, idx);
        self.descend(pool, inner);
    }

    fn visit_enum(&mut self, pool: &Pool, idx: Idx, _values: &[EnumValue]) {
        self.record(pool, idx);
    }

    fn visit_bitmask(&mut self, pool: &Pool, idx: Idx, inner: Idx, _values: &[EnumValue]) {
        self.record(pool, idx);
        self.descend(pool, inner);
    }

    fn visit_struct(&mut self, pool: &Pool, idx: Idx, _name: &str, members: &[Member]) {
        self.record(pool, idx);
        for member in members {
            self.descend(pool, member.ty);
        }
    }

    fn visit_alias(&mut self, pool: &Pool, idx: Idx, inner: Idx) {
        self.record(pool, idx);
        self.descend(pool, inner);
    }

    fn visit_opaque(&mut self, pool: &Pool, idx: Idx) {
        self.record(pool, idx);
    }

    fn visit_interface(
        &mut self,
        pool: &Pool,
        idx: Idx,
        _name: &str,
        base: Option<Idx>,
        _methods: &[Function],
    ) {
        self.record(pool, idx);
        if let Some(base) = base {
            self.descend(pool, base);
        }
    }
}

/// Kind names in preorder, following children without memoization.
/// Only for acyclic graphs.
fn shape(pool: &Pool, idx: Idx) -> Vec<&'static str> {
    let mut out = vec![pool.kind(idx).name()];
    for child in pool.kind(idx).children() {
        out.extend(shape(pool, child));
    }
    out
}

#[test]
fn visit_dispatches_on_variant() {
    let mut pool = Pool::new();
    let int = pool.literal("int", LiteralFormat::SInt).unwrap();
    let pcint = pool.const_pointer(int).unwrap();

    let mut trace = KindTrace::default();
    trace.visit(&pool, pcint);
    assert_eq!(trace.kinds, vec!["pointer", "const", "literal"]);
}

#[test]
fn repeat_visit_calls_handler_once() {
    let mut pool = Pool::new();
    let int = pool.literal("int", LiteralFormat::SInt).unwrap();

    let mut trace = KindTrace::default();
    assert_eq!(trace.visit_once(&pool, int), Some(()));
    assert_eq!(trace.visit_once(&pool, int), None);
    assert_eq!(trace.handled, 1);
}

#[test]
fn shared_nodes_are_visited_once() {
    let mut pool = Pool::new();
    let int = pool.literal("int", LiteralFormat::SInt).unwrap();
    let rect = pool
        .structure(
            "Rect",
            vec![
                Member::new("x", int),
                Member::new("y", int),
                Member::new("w", int),
            ],
        )
        .unwrap();

    let mut trace = KindTrace::default();
    trace.visit_once(&pool, rect);
    assert_eq!(trace.kinds, vec!["struct", "literal"]);
    assert_eq!(trace.visited.len(), 2);
}

#[test]
fn cycles_terminate() {
    let mut pool = Pool::new();
    let node = pool.structure("Node", vec![]).unwrap();
    let next = pool.pointer(node).unwrap();
    pool.set_members(node, vec![Member::new("next", next)]).unwrap();

    let mut trace = KindTrace::default();
    trace.visit_once(&pool, node);
    assert_eq!(trace.kinds, vec!["struct", "pointer"]);
}

#[test]
fn visited_set_is_per_instance() {
    let mut pool = Pool::new();
    let int = pool.literal("int", LiteralFormat::SInt).unwrap();

    let mut first = KindTrace::default();
    let mut second = KindTrace::default();
    first.visit_once(&pool, int);
    assert_eq!(second.visit_once(&pool, int), Some(()));
}

#[test]
fn rebuild_keeps_leaves_and_renews_composites() {
    let mut pool = Pool::new();
    let int = pool.literal("int", LiteralFormat::SInt).unwrap();
    let color = pool.enumeration("Color", vec![EnumValue::new("RED")]).unwrap();
    let hwnd = pool.opaque("HWND").unwrap();
    let pcint = pool.const_pointer(int).unwrap();
    let widget = pool
        .structure(
            "Widget",
            vec![
                Member::new("values", pcint),
                Member::new("color", color),
                Member::new("window", hwnd),
                Member::new("label", Idx::STRING),
            ],
        )
        .unwrap();

    let rebuilt = Rebuilder::new(&mut pool).rebuild(widget).unwrap();

    assert_ne!(rebuilt, widget);
    assert_eq!(shape(&pool, rebuilt), shape(&pool, widget));

    let TypeKind::Struct { name, members } = pool.kind(rebuilt).clone() else {
        panic!("rebuilt a non-struct");
    };
    assert_eq!(name, "Widget");
    let names: Vec<&str> = members.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["values", "color", "window", "label"]);

    // Composites are new, with identical rendering.
    assert_ne!(members[0].ty, pcint);
    assert_eq!(pool.expr(members[0].ty), "const int *");
    // Leaves are the very same handles.
    assert_eq!(members[1].ty, color);
    assert_eq!(members[2].ty, hwnd);
    assert_eq!(members[3].ty, Idx::STRING);
    let TypeKind::Pointer { inner } = *pool.kind(members[0].ty) else {
        panic!("expected pointer");
    };
    assert_eq!(pool.kind(inner), &TypeKind::Const { inner: int });
}

#[test]
fn rebuild_shares_rebuilt_nodes() {
    let mut pool = Pool::new();
    let int = pool.literal("int", LiteralFormat::SInt).unwrap();
    let pint = pool.pointer(int).unwrap();
    let pair = pool
        .structure("Pair", vec![Member::new("a", pint), Member::new("b", pint)])
        .unwrap();

    let rebuilt = Rebuilder::new(&mut pool).rebuild(pair).unwrap();
    let children = pool.kind(rebuilt).children();
    assert_eq!(children[0], children[1]);
    assert_ne!(children[0], pint);
}

#[test]
fn rebuild_closes_cycles() {
    let mut pool = Pool::new();
    let node = pool.structure("Node", vec![]).unwrap();
    let next = pool.pointer(node).unwrap();
    pool.set_members(node, vec![Member::new("next", next)]).unwrap();
    let before = pool.len();

    let rebuilt = Rebuilder::new(&mut pool).rebuild(node).unwrap();

    // Exactly one new struct and one new pointer.
    assert_eq!(pool.len(), before + 2);
    let new_next = pool.kind(rebuilt).children()[0];
    assert_eq!(pool.kind(new_next), &TypeKind::Pointer { inner: rebuilt });
}

#[test]
fn interfaces_pass_through_rebuild() {
    let mut pool = Pool::new();
    let unknown = pool.interface("IUnknown", None).unwrap();
    pool.add_methods(unknown, [method(Idx::VOID, "Release", vec![])])
        .unwrap();
    let punknown = pool.pointer(unknown).unwrap();

    let rebuilt = Rebuilder::new(&mut pool).rebuild(punknown).unwrap();
    assert_eq!(pool.kind(rebuilt), &TypeKind::Pointer { inner: unknown });
}

/// Replaces every interface pointer with an opaque traced wrapper.
struct WrapInterfaces<'p> {
    pool: &'p mut Pool,
    folded: FxHashMap<Idx, Idx>,
}

impl TypeFolder for WrapInterfaces<'_> {
    fn pool(&mut self) -> &mut Pool {
        self.pool
    }

    fn folded(&mut self) -> &mut FxHashMap<Idx, Idx> {
        &mut self.folded
    }

    fn fold_pointer(&mut self, idx: Idx, inner: Idx) -> Result<Idx, TypeError> {
        if let TypeKind::Interface { name, .. } = self.pool.kind(inner) {
            let wrapper = format!("Wrap{name} *");
            return self.pool.opaque(&wrapper);
        }
        rebuild_around(self, idx, inner, Pool::pointer)
    }
}

#[test]
fn custom_folder_substitutes_pointer_targets() {
    let mut pool = Pool::new();
    let unknown = pool.interface("IUnknown", None).unwrap();
    let punknown = pool.pointer(unknown).unwrap();
    let ppunknown = pool.pointer(punknown).unwrap();

    let mut folder = WrapInterfaces {
        pool: &mut pool,
        folded: FxHashMap::default(),
    };
    let rebuilt = folder.fold(ppunknown).unwrap();

    assert_eq!(pool.expr(rebuilt), "WrapIUnknown * *");
    let inner = pool.kind(rebuilt).inner().unwrap();
    assert_eq!(pool.kind(inner), &TypeKind::Opaque);
}

/// Wraps `depth` random composites around `int`.
fn random_chain(pool: &mut Pool, ops: &[u8]) -> Idx {
    let mut idx = pool.literal("int", LiteralFormat::SInt).unwrap();
    for op in ops {
        idx = match op % 6 {
            0 => pool.constant(idx),
            1 => pool.pointer(idx),
            2 => pool.array(idx, "n"),
            3 => pool.blob(idx, "size"),
            4 => pool.alias("T", idx),
            _ => pool.handle("h", idx),
        }
        .unwrap();
    }
    idx
}

proptest! {
    #[test]
    fn rebuild_preserves_shape(ops in proptest::collection::vec(any::<u8>(), 0..12)) {
        let mut pool = Pool::new();
        let root = random_chain(&mut pool, &ops);
        let rebuilt = Rebuilder::new(&mut pool).rebuild(root).unwrap();

        prop_assert_eq!(shape(&pool, rebuilt), shape(&pool, root));
        prop_assert_eq!(pool.expr(rebuilt), pool.expr(root));
        if ops.is_empty() {
            prop_assert_eq!(rebuilt, root);
        } else {
            prop_assert_ne!(rebuilt, root);
        }
    }
}
