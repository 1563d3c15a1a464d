//! Type metamodel for traced C APIs.
//!
//! Describes the type surface of a foreign API (scalars, pointers, structs,
//! enums, arrays, opaque handles, COM-style interfaces) so that a tracer can
//! generate one value-dump routine per type.
//!
//! # Model
//!
//! - [`Pool`]: arena of every type of one description, addressed by [`Idx`]
//! - [`TypeRegistry`]: per-pool table of unique type ids (`Dump<id>` names)
//! - [`TypeKind`]: the closed set of variants
//! - [`Function`] / [`Arg`]: callable signatures, also used as interface methods
//!
//! # Traversal
//!
//! - [`TypeVisitor`] / [`OnceVisitor`]: exhaustive read-only dispatch, with
//!   per-visitor memoization for shared and cyclic graphs
//! - [`TypeFolder`] / [`Rebuilder`]: shape-preserving rebuild

#[cfg(feature = "cache")]
mod cache;
mod error;
mod flags;
mod function;
mod idx;
mod kind;
mod pool;
mod registry;
mod shared;
mod std_types;
mod traverse;

#[cfg(feature = "cache")]
pub use cache::CachedPool;
pub use error::{RegistryError, TypeError};
pub use flags::KindFlags;
pub use function::{method, std_function, Arg, Function, GLAPIENTRY, STDCALL};
pub use idx::Idx;
pub use kind::{EnumValue, LiteralFormat, Member, TypeKind};
pub use pool::{MethodIter, Pool, TypeItem};
pub use registry::{derive_ident, CollisionPolicy, TypeRegistry};
pub use shared::SharedPool;
pub use std_types::StdTypes;
pub use traverse::{
    rebuild_around, walk_type, OnceVisitor, Rebuilder, TypeFolder, TypeVisitor, VisitedSet,
};
