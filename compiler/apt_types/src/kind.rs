//! Type variants.
//!
//! `TypeKind` is the closed set of node kinds a type pool can hold. Each
//! variant carries only its own attributes; the rendered expression and the
//! registry id live next to it in the pool item.

use smallvec::SmallVec;

use crate::{Function, Idx, KindFlags};

/// How a literal's value is printed by the tracer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum LiteralFormat {
    Bool,
    SInt,
    UInt,
    Float,
    WString,
}

/// One named constant of an enum or bitmask, in declaration order.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct EnumValue {
    pub name: String,
    /// Explicit value text, if the C declaration spells one.
    pub value: Option<String>,
}

impl EnumValue {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }

    pub fn with_value(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }
}

/// A named struct field.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Member {
    pub name: String,
    pub ty: Idx,
}

impl Member {
    pub fn new(name: impl Into<String>, ty: Idx) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// The kind of a pooled type.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum TypeKind {
    /// `void`.
    Void,
    /// A built-in scalar such as `int` or `float`.
    Literal { format: LiteralFormat, base: u32 },
    /// `char *`, dumped as text.
    String,
    /// `const T`.
    Const { inner: Idx },
    /// `T *`.
    Pointer { inner: Idx },
    /// A pointer used as an object handle (`HGLRC`, `GLuint` names, ...).
    Handle { name: String, inner: Idx },
    /// `length` elements of `T`, passed as `T *`.
    Array { inner: Idx, length: String },
    /// `size` bytes starting at a `T *`.
    Blob { inner: Idx, size: String },
    /// A set of named constants.
    Enum { values: Vec<EnumValue> },
    /// An integer interpreted as an or-combination of flags.
    Bitmask { inner: Idx, values: Vec<EnumValue> },
    /// A C struct with named members.
    Struct { name: String, members: Vec<Member> },
    /// A typedef that renders under its own name.
    Alias { inner: Idx },
    /// A type whose contents are never inspected.
    Opaque,
    /// A COM-style interface with at most one base.
    Interface {
        name: String,
        base: Option<Idx>,
        methods: Vec<Function>,
    },
}

impl TypeKind {
    /// Human-readable kind name, used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            TypeKind::Void => "void",
            TypeKind::Literal { .. } => "literal",
            TypeKind::String => "string",
            TypeKind::Const { .. } => "const",
            TypeKind::Pointer { .. } => "pointer",
            TypeKind::Handle { .. } => "handle",
            TypeKind::Array { .. } => "array",
            TypeKind::Blob { .. } => "blob",
            TypeKind::Enum { .. } => "enum",
            TypeKind::Bitmask { .. } => "bitmask",
            TypeKind::Struct { .. } => "struct",
            TypeKind::Alias { .. } => "alias",
            TypeKind::Opaque => "opaque",
            TypeKind::Interface { .. } => "interface",
        }
    }

    pub fn flags(&self) -> KindFlags {
        match self {
            TypeKind::Void | TypeKind::Literal { .. } | TypeKind::String | TypeKind::Opaque => {
                KindFlags::LEAF
            }
            TypeKind::Enum { .. } => KindFlags::LEAF | KindFlags::CONCRETE | KindFlags::NAMED,
            TypeKind::Const { .. }
            | TypeKind::Pointer { .. }
            | TypeKind::Array { .. }
            | TypeKind::Blob { .. }
            | TypeKind::Alias { .. } => KindFlags::COMPOSITE,
            TypeKind::Handle { .. } => KindFlags::COMPOSITE | KindFlags::NAMED,
            TypeKind::Bitmask { .. } => KindFlags::COMPOSITE | KindFlags::CONCRETE,
            TypeKind::Struct { .. } => {
                KindFlags::AGGREGATE | KindFlags::CONCRETE | KindFlags::NAMED
            }
            TypeKind::Interface { .. } => KindFlags::NAMED,
        }
    }

    /// The single underlying type of a composite.
    pub fn inner(&self) -> Option<Idx> {
        match self {
            TypeKind::Const { inner }
            | TypeKind::Pointer { inner }
            | TypeKind::Handle { inner, .. }
            | TypeKind::Array { inner, .. }
            | TypeKind::Blob { inner, .. }
            | TypeKind::Bitmask { inner, .. }
            | TypeKind::Alias { inner } => Some(*inner),
            _ => None,
        }
    }

    /// Every type this node points at directly, in declaration order.
    ///
    /// Interface methods are not included; they are reached through the API
    /// that owns the interface.
    pub fn children(&self) -> SmallVec<[Idx; 4]> {
        match self {
            TypeKind::Struct { members, .. } => members.iter().map(|m| m.ty).collect(),
            TypeKind::Interface { base, .. } => base.iter().copied().collect(),
            kind => kind.inner().into_iter().collect(),
        }
    }
}
