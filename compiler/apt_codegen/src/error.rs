//! Emission errors.

use thiserror::Error;

/// Failure to emit a dump routine.
///
/// Like description errors, these are fatal: partial output is never
/// returned.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EmitError {
    /// Only enums, bitmasks and structs have dump routines; other kinds are
    /// dumped through their underlying type.
    #[error("type `{id}` is a {kind} and has no dump routine")]
    NotConcrete { id: String, kind: &'static str },

    /// A concrete type reached implementation with no body registered.
    #[error("no dump body registered for `{id}`")]
    MissingDumpBody { id: String },

    /// A body hook rejected its type.
    #[error("dump body for `{id}` failed: {message}")]
    Body { id: String, message: String },
}
