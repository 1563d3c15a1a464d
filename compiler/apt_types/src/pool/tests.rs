use super::*;
use crate::{method, Arg, LiteralFormat};
use pretty_assertions::assert_eq;

#[test]
fn pool_starts_with_singletons() {
    let pool = Pool::new();
    assert_eq!(pool.len(), Idx::FIRST_DYNAMIC as usize);
    assert_eq!(pool.kind(Idx::VOID), &TypeKind::Void);
    assert_eq!(pool.expr(Idx::VOID), "void");
    assert_eq!(pool.id(Idx::VOID), "Void");
    assert_eq!(pool.kind(Idx::STRING), &TypeKind::String);
    assert_eq!(pool.expr(Idx::STRING), "char *");
    assert_eq!(pool.lookup("String"), Some(Idx::STRING));
}

#[test]
fn iter_follows_registration_order() {
    let mut pool = Pool::new();
    let int = pool.literal("int", LiteralFormat::SInt).unwrap();
    let ids: Vec<(Idx, &str)> = pool.iter().map(|(idx, item)| (idx, item.id.as_str())).collect();
    assert_eq!(
        ids,
        vec![(Idx::VOID, "Void"), (Idx::STRING, "String"), (int, "Int")]
    );
}

#[test]
fn separate_pools_do_not_share_ids() {
    let mut a = Pool::new();
    let mut b = Pool::new();
    let in_a = a.literal("int", LiteralFormat::SInt).unwrap();
    let in_b = b.literal("int", LiteralFormat::SInt).unwrap();
    assert_eq!(a.id(in_a), "Int");
    assert_eq!(b.id(in_b), "Int");
}

fn chain() -> (Pool, Idx, Idx, Idx) {
    let mut pool = Pool::new();
    let unknown = pool.interface("IUnknown", None).unwrap();
    let device = pool.interface("IDirect3DDevice", Some(unknown)).unwrap();
    let device9 = pool.interface("IDirect3DDevice9", Some(device)).unwrap();

    let ulong = pool.literal("ULONG", LiteralFormat::UInt).unwrap();
    pool.add_methods(
        unknown,
        [
            method(ulong, "AddRef", vec![]),
            method(ulong, "Release", vec![]),
        ],
    )
    .unwrap();
    pool.add_methods(device, [method(Idx::VOID, "Reset", vec![])])
        .unwrap();
    pool.add_methods(
        device9,
        [
            method(Idx::VOID, "Clear", vec![Arg::new(ulong, "Count")]),
            method(Idx::VOID, "Present", vec![]),
        ],
    )
    .unwrap();
    (pool, unknown, device, device9)
}

fn names<'a>(iter: impl Iterator<Item = &'a Function>) -> Vec<&'a str> {
    iter.map(|m| m.name.as_str()).collect()
}

#[test]
fn methods_yield_root_to_leaf() {
    let (pool, unknown, device, device9) = chain();
    assert_eq!(names(pool.methods(unknown)), vec!["AddRef", "Release"]);
    assert_eq!(names(pool.methods(device)), vec!["AddRef", "Release", "Reset"]);
    assert_eq!(
        names(pool.methods(device9)),
        vec!["AddRef", "Release", "Reset", "Clear", "Present"]
    );
}

#[test]
fn methods_are_restartable_and_lazy() {
    let (pool, _, _, device9) = chain();
    let mut first = pool.methods(device9);
    assert_eq!(first.next().map(|m| m.name.as_str()), Some("AddRef"));
    assert_eq!(names(pool.methods(device9)).len(), 5);
    assert_eq!(names(first).len(), 4);
}

#[test]
fn methods_of_non_interface_is_empty() {
    let pool = Pool::new();
    assert_eq!(pool.methods(Idx::VOID).count(), 0);
}
