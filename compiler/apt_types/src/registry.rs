//! Type identifier registry.
//!
//! Every type gets a textual id, unique within its registry, from which
//! generated routine names are derived (`Dump<id>`). Requested ids are
//! validated, spaces are folded to underscores, and collisions are resolved
//! by appending a registry-wide sequence number.
//!
//! # Design
//!
//! - One registry per [`Pool`](crate::Pool); no process-wide state
//! - The sequence counter is shared by all ids and never reset, so two
//!   renumbered ids never repeat a suffix
//! - Ids are never removed

use rustc_hash::FxHashMap;

use crate::{Idx, RegistryError};

/// How a colliding id is renumbered.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum CollisionPolicy {
    /// Bump the counter until the suffixed id is verified free.
    #[default]
    Verified,
    /// Bump once and fail if the suffixed id is still taken.
    ///
    /// Matches generators that never re-checked the renumbered id; a caller
    /// that explicitly requested `Color2` earlier can make this fail.
    SingleRetry,
}

/// Table of registered type identifiers.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeRegistry {
    /// Id -> owning type.
    ids: FxHashMap<String, Idx>,
    /// Collision counter, bumped once per renumbering attempt.
    seq: u32,
    policy: CollisionPolicy,
}

impl TypeRegistry {
    /// Create an empty registry with the default collision policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry with an explicit collision policy.
    pub fn with_policy(policy: CollisionPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Register `candidate` for `owner` and return the final id.
    ///
    /// The candidate must be non-empty and may contain ASCII letters, digits,
    /// `_` and space. Spaces become underscores. A taken id gets the next
    /// sequence number appended.
    pub fn register(&mut self, candidate: &str, owner: Idx) -> Result<String, RegistryError> {
        if candidate.is_empty() {
            return Err(RegistryError::EmptyIdentifier);
        }
        if let Some(ch) = candidate
            .chars()
            .find(|&c| !(c.is_ascii_alphanumeric() || c == '_' || c == ' '))
        {
            return Err(RegistryError::InvalidCharacter {
                candidate: candidate.to_owned(),
                ch,
            });
        }

        let folded = candidate.replace(' ', "_");
        let id = if self.ids.contains_key(&folded) {
            self.renumber(&folded)?
        } else {
            folded
        };

        tracing::trace!(%id, ?owner, "registered type id");
        self.ids.insert(id.clone(), owner);
        Ok(id)
    }

    /// Insert a known-valid, known-free id. Used for pool singletons.
    pub(crate) fn reserve(&mut self, id: &str, owner: Idx) {
        self.ids.insert(id.to_owned(), owner);
    }

    fn renumber(&mut self, base: &str) -> Result<String, RegistryError> {
        loop {
            self.seq += 1;
            let id = format!("{base}{}", self.seq);
            if !self.ids.contains_key(&id) {
                tracing::debug!(base, %id, "type id collision, renumbered");
                return Ok(id);
            }
            if self.policy == CollisionPolicy::SingleRetry {
                return Err(RegistryError::Collision { id });
            }
        }
    }

    /// Find the type registered under `id`.
    pub fn lookup(&self, id: &str) -> Option<Idx> {
        self.ids.get(id).copied()
    }

    /// Check if `id` is taken.
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains_key(id)
    }

    /// Current value of the collision counter.
    pub fn sequence(&self) -> u32 {
        self.seq
    }

    pub fn policy(&self) -> CollisionPolicy {
        self.policy
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Derive a candidate id from a rendered C type expression.
///
/// Words are camel-cased, `*` becomes `P`, and any other punctuation is
/// dropped: `unsigned long` -> `UnsignedLong`, `wchar_t *` -> `Wchar_tP`.
pub fn derive_ident(expr: &str) -> String {
    let mut id = String::with_capacity(expr.len());
    for word in expr.split_whitespace() {
        let mut upper = true;
        for ch in word.chars() {
            if ch == '*' {
                id.push('P');
                upper = true;
            } else if ch.is_ascii_alphanumeric() || ch == '_' {
                id.push(if upper { ch.to_ascii_uppercase() } else { ch });
                upper = false;
            }
        }
    }
    id
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "tests use unwrap/expect to fail fast on malformed fixtures"
)]
