//! Typed view over the variants that own a dump routine.

use apt_types::{EnumValue, Idx, Member, Pool, TypeKind};

use crate::EmitError;

/// Variant payload of a concrete type.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ConcreteKind<'a> {
    Enum {
        values: &'a [EnumValue],
    },
    Bitmask {
        inner: Idx,
        values: &'a [EnumValue],
    },
    Struct {
        name: &'a str,
        members: &'a [Member],
    },
}

/// A pooled type known to be concrete.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Concrete<'a> {
    pub idx: Idx,
    pub id: &'a str,
    pub expr: &'a str,
    pub kind: ConcreteKind<'a>,
}

/// View `idx` as a concrete type, or fail with [`EmitError::NotConcrete`].
pub fn concrete(pool: &Pool, idx: Idx) -> Result<Concrete<'_>, EmitError> {
    let item = pool.item(idx);
    let kind = match &item.kind {
        TypeKind::Enum { values } => ConcreteKind::Enum { values },
        TypeKind::Bitmask { inner, values } => ConcreteKind::Bitmask {
            inner: *inner,
            values,
        },
        TypeKind::Struct { name, members } => ConcreteKind::Struct { name, members },
        other => {
            return Err(EmitError::NotConcrete {
                id: item.id.clone(),
                kind: other.name(),
            })
        }
    };
    Ok(Concrete {
        idx,
        id: &item.id,
        expr: &item.expr,
        kind,
    })
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "tests use unwrap/expect to fail fast on malformed fixtures"
)]
mod tests {
    use super::*;
    use apt_types::LiteralFormat;
    use pretty_assertions::assert_eq;

    #[test]
    fn struct_view_exposes_members() {
        let mut pool = Pool::new();
        let int = pool.literal("int", LiteralFormat::SInt).unwrap();
        let point = pool
            .structure("Point", vec![Member::new("x", int), Member::new("y", int)])
            .unwrap();

        let view = concrete(&pool, point).unwrap();
        assert_eq!(view.id, "Point");
        assert_eq!(view.expr, "Point");
        match view.kind {
            ConcreteKind::Struct { name, members } => {
                assert_eq!(name, "Point");
                assert_eq!(members.len(), 2);
            }
            other => panic!("expected struct, got {other:?}"),
        }
    }

    #[test]
    fn bitmask_is_concrete() {
        let mut pool = Pool::new();
        let uint = pool.literal("unsigned int", LiteralFormat::UInt).unwrap();
        let mask = pool
            .bitmask(uint, vec![EnumValue::new("GL_COLOR_BUFFER_BIT")])
            .unwrap();
        assert!(matches!(
            concrete(&pool, mask).unwrap().kind,
            ConcreteKind::Bitmask { inner, .. } if inner == uint
        ));
    }

    #[test]
    fn non_concrete_kinds_are_rejected() {
        let mut pool = Pool::new();
        let int = pool.literal("int", LiteralFormat::SInt).unwrap();
        let ptr = pool.pointer(int).unwrap();
        let alias = pool.alias("GLint", int).unwrap();

        for (idx, id, kind) in [
            (int, "Int", "literal"),
            (ptr, "PInt", "pointer"),
            (alias, "GLint", "alias"),
            (Idx::VOID, "Void", "void"),
        ] {
            assert_eq!(
                concrete(&pool, idx),
                Err(EmitError::NotConcrete {
                    id: id.to_owned(),
                    kind,
                })
            );
        }
    }
}
