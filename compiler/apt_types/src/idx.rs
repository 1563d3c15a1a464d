//! Type handle.
//!
//! `Idx` is the only way to refer to a type. Every type lives in a [`Pool`]
//! and is referenced by its 32-bit position; composites hold handles to their
//! underlying types, never the types themselves, so sharing and cycles cost
//! nothing.
//!
//! [`Pool`]: crate::Pool

use std::fmt;

/// A 32-bit index into a type pool.
///
/// Handles compare by position: two handles are equal exactly when they name
/// the same registered type.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct Idx(u32);

impl Idx {
    // === Singletons ===
    // Registered by every pool at creation.

    /// The `void` type.
    pub const VOID: Self = Self(0);
    /// The `char *` string type.
    pub const STRING: Self = Self(1);

    /// First index handed out for caller-described types.
    pub const FIRST_DYNAMIC: u32 = 2;

    /// Create an index from a raw value.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Position in the pool's item vector.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Check if this is one of the pre-registered singletons.
    #[inline]
    pub const fn is_singleton(self) -> bool {
        self.0 < Self::FIRST_DYNAMIC
    }
}

impl fmt::Debug for Idx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::VOID => write!(f, "Idx::VOID"),
            Self::STRING => write!(f, "Idx::STRING"),
            _ => write!(f, "Idx({})", self.0),
        }
    }
}

impl fmt::Display for Idx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "type#{}", self.0)
    }
}

// Compile-time size assertion: Idx must be exactly 4 bytes
const _: () = assert!(std::mem::size_of::<Idx>() == 4);
