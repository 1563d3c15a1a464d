use apt_types::{EnumValue, Pool};
use pretty_assertions::assert_eq;

use super::{DumpBody, DumpHooks};
use crate::{concrete, CodegenContext, Concrete, ConcreteKind, EmitError};

struct EnumSwitch;

impl DumpBody for EnumSwitch {
    fn emit_body(
        &self,
        ctx: &mut CodegenContext,
        ty: &Concrete<'_>,
        value: &str,
    ) -> Result<(), EmitError> {
        let ConcreteKind::Enum { values } = ty.kind else {
            return Err(EmitError::Body {
                id: ty.id.to_owned(),
                message: "expected an enum".to_owned(),
            });
        };
        ctx.writeln(&format!("switch ({value}) {{"));
        for v in values {
            ctx.writeln(&format!("case {}: break;", v.name));
        }
        ctx.writeln("}");
        Ok(())
    }
}

fn color(pool: &mut Pool) -> apt_types::Idx {
    pool.enumeration(
        "Color",
        vec![EnumValue::new("RED"), EnumValue::new("GREEN")],
    )
    .unwrap()
}

#[test]
fn body_is_found_by_handle() {
    let mut pool = Pool::new();
    let idx = color(&mut pool);
    let mut hooks = DumpHooks::new();
    hooks.insert(idx, EnumSwitch);
    assert!(hooks.contains(idx));
    assert_eq!(hooks.len(), 1);

    let mut ctx = CodegenContext::new();
    let ty = concrete(&pool, idx).unwrap();
    hooks.get(idx).unwrap().emit_body(&mut ctx, &ty, "c").unwrap();
    assert_eq!(
        ctx.output(),
        "switch (c) {\ncase RED: break;\ncase GREEN: break;\n}\n"
    );
}

#[test]
fn closure_bodies_are_accepted() {
    let mut pool = Pool::new();
    let idx = color(&mut pool);
    let mut hooks = DumpHooks::new();
    hooks.insert_fn(idx, |ctx, ty, value| {
        ctx.writeln(&format!("trace::writeEnum(\"{}\", {value});", ty.id));
        Ok(())
    });

    let mut ctx = CodegenContext::new();
    let ty = concrete(&pool, idx).unwrap();
    hooks.get(idx).unwrap().emit_body(&mut ctx, &ty, "v").unwrap();
    assert_eq!(ctx.output(), "trace::writeEnum(\"Color\", v);\n");
}

#[test]
fn missing_body_without_fallback() {
    let mut pool = Pool::new();
    let idx = color(&mut pool);
    let hooks = DumpHooks::new();
    assert!(hooks.get(idx).is_none());
    assert!(hooks.is_empty());
}

#[test]
fn fallback_covers_unregistered_types() {
    let mut pool = Pool::new();
    let idx = color(&mut pool);
    let mut hooks = DumpHooks::new();
    hooks.set_fallback(EnumSwitch);
    assert!(!hooks.contains(idx));
    assert!(hooks.get(idx).is_some());
}
