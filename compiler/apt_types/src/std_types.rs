//! The standard C scalar types.

use crate::{Idx, LiteralFormat, Pool, TypeError};

/// Handles of the built-in scalars, registered in one go.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StdTypes {
    pub bool: Idx,
    pub schar: Idx,
    pub uchar: Idx,
    pub short: Idx,
    pub int: Idx,
    pub long: Idx,
    pub long_long: Idx,
    pub ushort: Idx,
    pub uint: Idx,
    pub ulong: Idx,
    pub ulong_long: Idx,
    pub float: Idx,
    pub double: Idx,
    pub size_t: Idx,
    pub wstring: Idx,
}

impl StdTypes {
    /// Register every standard scalar in `pool`.
    pub fn register(pool: &mut Pool) -> Result<Self, TypeError> {
        use LiteralFormat::{Bool, Float, SInt, UInt, WString};

        Ok(Self {
            bool: pool.literal("bool", Bool)?,
            schar: pool.literal("signed char", SInt)?,
            uchar: pool.literal("unsigned char", UInt)?,
            short: pool.literal("short", SInt)?,
            int: pool.literal("int", SInt)?,
            long: pool.literal("long", SInt)?,
            long_long: pool.literal("long long", SInt)?,
            ushort: pool.literal("unsigned short", UInt)?,
            uint: pool.literal("unsigned int", UInt)?,
            ulong: pool.literal("unsigned long", UInt)?,
            ulong_long: pool.literal("unsigned long long", UInt)?,
            float: pool.literal("float", Float)?,
            double: pool.literal("double", Float)?,
            size_t: pool.literal("size_t", UInt)?,
            wstring: pool.literal("wchar_t *", WString)?,
        })
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "tests use unwrap/expect to fail fast on malformed fixtures"
)]
mod tests {
    use super::*;
    use crate::TypeKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn registers_all_scalars() {
        let mut pool = Pool::new();
        let std = StdTypes::register(&mut pool).unwrap();

        assert_eq!(pool.id(std.int), "Int");
        assert_eq!(pool.id(std.ulong_long), "UnsignedLongLong");
        assert_eq!(pool.id(std.wstring), "Wchar_tP");
        assert_eq!(pool.expr(std.schar), "signed char");
        assert_eq!(
            pool.kind(std.double),
            &TypeKind::Literal {
                format: LiteralFormat::Float,
                base: 10
            }
        );
        assert_eq!(pool.registry().sequence(), 0);
    }

    #[test]
    fn second_registration_is_renumbered() {
        let mut pool = Pool::new();
        let first = StdTypes::register(&mut pool).unwrap();
        let second = StdTypes::register(&mut pool).unwrap();
        assert_ne!(first.int, second.int);
        assert_ne!(pool.id(first.int), pool.id(second.int));
    }
}
