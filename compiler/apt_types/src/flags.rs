//! Kind classification flags.
//!
//! Computed from a [`TypeKind`](crate::TypeKind) without touching the pool,
//! so callers can gate on "is this concrete?" or "does this hold an
//! underlying type?" with one bit test.

use bitflags::bitflags;

bitflags! {
    /// Static properties of a type kind.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct KindFlags: u8 {
        /// No underlying type (Void, Literal, String, Opaque, Enum).
        const LEAF = 1 << 0;
        /// Wraps exactly one underlying type.
        const COMPOSITE = 1 << 1;
        /// Holds several typed members (Struct).
        const AGGREGATE = 1 << 2;
        /// Has a runtime value with its own dump routine.
        const CONCRETE = 1 << 3;
        /// Introduced under a caller-chosen name.
        const NAMED = 1 << 4;
    }
}

impl KindFlags {
    #[inline]
    pub fn is_leaf(self) -> bool {
        self.contains(Self::LEAF)
    }

    #[inline]
    pub fn is_concrete(self) -> bool {
        self.contains(Self::CONCRETE)
    }
}
