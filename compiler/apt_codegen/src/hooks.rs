//! Dump-body hooks.
//!
//! The body of a dump routine is the one piece the emitter cannot derive:
//! it depends on the tracer's writer API. Callers register one [`DumpBody`]
//! per concrete type.

use apt_types::Idx;
use rustc_hash::FxHashMap;

use crate::{CodegenContext, Concrete, EmitError};

/// Emits the statements that serialize one value of a concrete type.
///
/// `value` names the instance inside the routine. Write at the context's
/// current indentation; the emitter opens and closes the routine.
pub trait DumpBody {
    fn emit_body(
        &self,
        ctx: &mut CodegenContext,
        ty: &Concrete<'_>,
        value: &str,
    ) -> Result<(), EmitError>;
}

impl<F> DumpBody for F
where
    F: Fn(&mut CodegenContext, &Concrete<'_>, &str) -> Result<(), EmitError>,
{
    fn emit_body(
        &self,
        ctx: &mut CodegenContext,
        ty: &Concrete<'_>,
        value: &str,
    ) -> Result<(), EmitError> {
        self(ctx, ty, value)
    }
}

/// Dump bodies keyed by type handle, with an optional fallback.
#[derive(Default)]
pub struct DumpHooks {
    bodies: FxHashMap<Idx, Box<dyn DumpBody>>,
    fallback: Option<Box<dyn DumpBody>>,
}

impl DumpHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the body for `idx`, replacing any earlier one.
    pub fn insert(&mut self, idx: Idx, body: impl DumpBody + 'static) {
        self.bodies.insert(idx, Box::new(body));
    }

    /// Register a closure body.
    ///
    /// Same as [`insert`](Self::insert), but the bound is spelled out so
    /// closure parameter types are inferred.
    pub fn insert_fn<F>(&mut self, idx: Idx, body: F)
    where
        F: Fn(&mut CodegenContext, &Concrete<'_>, &str) -> Result<(), EmitError> + 'static,
    {
        self.insert(idx, body);
    }

    /// Body used for concrete types without a registered one.
    pub fn set_fallback(&mut self, body: impl DumpBody + 'static) {
        self.fallback = Some(Box::new(body));
    }

    /// Closure form of [`set_fallback`](Self::set_fallback).
    pub fn set_fallback_fn<F>(&mut self, body: F)
    where
        F: Fn(&mut CodegenContext, &Concrete<'_>, &str) -> Result<(), EmitError> + 'static,
    {
        self.set_fallback(body);
    }

    pub fn contains(&self, idx: Idx) -> bool {
        self.bodies.contains_key(&idx)
    }

    /// The body for `idx`, falling back to the default body if set.
    pub fn get(&self, idx: Idx) -> Option<&dyn DumpBody> {
        self.bodies
            .get(&idx)
            .or(self.fallback.as_ref())
            .map(Box::as_ref)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

impl std::fmt::Debug for DumpHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<_> = self.bodies.keys().copied().collect();
        keys.sort_unstable();
        f.debug_struct("DumpHooks")
            .field("bodies", &keys)
            .field("fallback", &self.fallback.is_some())
            .finish()
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "tests use unwrap/expect to fail fast on malformed fixtures"
)]
mod tests;
