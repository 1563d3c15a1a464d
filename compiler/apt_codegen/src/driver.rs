//! Whole-API emission.

use apt_api::Api;
use apt_types::{Idx, Pool};

use crate::{CodegenContext, DumpEmitter, DumpHooks, EmitError, EmitOptions};

/// Emit every dump routine the API needs.
///
/// Output layout: `#include` lines for the API headers, then one declaration
/// per concrete type in the API closure, then every implementation. Types are
/// visited once each, in closure order, so the text is stable across runs.
#[tracing::instrument(level = "debug", skip_all, fields(api = %api.name))]
pub fn emit_api(
    pool: &Pool,
    api: &Api,
    hooks: &DumpHooks,
    options: &EmitOptions,
) -> Result<String, EmitError> {
    let concrete: Vec<Idx> = api
        .closure(pool)
        .iter()
        .filter(|&idx| pool.flags(idx).is_concrete())
        .collect();
    tracing::debug!(count = concrete.len(), "emitting dump routines");

    let emitter = DumpEmitter::new(pool, options);
    let mut ctx = CodegenContext::new();

    if !api.headers().is_empty() {
        for header in api.headers() {
            ctx.writeln(&format!("#include \"{header}\""));
        }
        ctx.newline();
    }

    if concrete.is_empty() {
        return Ok(ctx.take_output());
    }

    for &idx in &concrete {
        emitter.declare(&mut ctx, idx)?;
    }
    ctx.newline();

    for &idx in &concrete {
        emitter.implement(&mut ctx, idx, hooks)?;
    }

    Ok(ctx.take_output())
}
