//! Errors raised while describing an API.
//!
//! Every error here is a defect in the caller's description. Generation is
//! deterministic, so there is nothing to retry: callers propagate with `?`
//! and abort.

use thiserror::Error;

/// Failure to assign a type identifier.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Identifiers admit ASCII letters, digits, `_` and space only.
    #[error("invalid character {ch:?} in type identifier {candidate:?}")]
    InvalidCharacter { candidate: String, ch: char },

    /// The candidate was empty, e.g. derived from an expr made only of
    /// punctuation. An empty id would name the routine after the bare prefix.
    #[error("empty type identifier")]
    EmptyIdentifier,

    /// Renumbering produced an id that is already registered
    /// (only under [`CollisionPolicy::SingleRetry`]).
    ///
    /// [`CollisionPolicy::SingleRetry`]: crate::CollisionPolicy::SingleRetry
    #[error("type identifier {id:?} collides after renumbering")]
    Collision { id: String },
}

/// Failure to build or complete a type.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TypeError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Members can only be attached to a struct.
    #[error("type `{id}` is a {kind}, not a struct")]
    NotAStruct { id: String, kind: &'static str },

    /// Methods and bases must be interfaces.
    #[error("type `{id}` is a {kind}, not an interface")]
    NotAnInterface { id: String, kind: &'static str },
}
