//! API aggregate.
//!
//! An [`Api`] gathers the functions and interfaces of one traced API together
//! with the set of types they reference. Code generators walk it to decide
//! which dump routines to emit.

mod api;
mod closure;
mod type_set;

pub use api::{Api, ApiOptions};
pub use closure::ClosureCollector;
pub use type_set::TypeSet;
