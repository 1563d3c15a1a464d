//! Declare / implement / invoke for dump routines.

use apt_types::{Idx, Pool};

use crate::{concrete, CodegenContext, Concrete, DumpHooks, EmitError, EmitOptions};

/// Emits dump routines for the concrete types of one pool.
///
/// Routine names come from registry ids, which are unique per pool, so two
/// distinct types never emit the same routine.
#[derive(Copy, Clone, Debug)]
pub struct DumpEmitter<'a> {
    pool: &'a Pool,
    options: &'a EmitOptions,
}

impl<'a> DumpEmitter<'a> {
    pub fn new(pool: &'a Pool, options: &'a EmitOptions) -> Self {
        Self { pool, options }
    }

    /// `Dump<Id>` for a concrete type.
    pub fn routine_name(&self, idx: Idx) -> Result<String, EmitError> {
        let ty = concrete(self.pool, idx)?;
        Ok(self.name_of(&ty))
    }

    /// `static void Dump<Id>(const <Expr> &value);`
    pub fn declare(&self, ctx: &mut CodegenContext, idx: Idx) -> Result<(), EmitError> {
        let ty = concrete(self.pool, idx)?;
        ctx.writeln(&format!("{};", self.signature(&ty)));
        Ok(())
    }

    /// The full routine, with the body supplied by `hooks`.
    ///
    /// Nothing is written unless the body is registered and succeeds.
    #[tracing::instrument(level = "trace", skip(self, ctx, hooks))]
    pub fn implement(
        &self,
        ctx: &mut CodegenContext,
        idx: Idx,
        hooks: &DumpHooks,
    ) -> Result<(), EmitError> {
        let ty = concrete(self.pool, idx)?;
        let body = hooks.get(idx).ok_or_else(|| EmitError::MissingDumpBody {
            id: ty.id.to_owned(),
        })?;

        let mut inner = ctx.nested();
        body.emit_body(&mut inner, &ty, &self.options.value_name)?;

        ctx.writeln(&format!("{} {{", self.signature(&ty)));
        ctx.absorb(inner);
        ctx.writeln("}");
        ctx.newline();
        Ok(())
    }

    /// `Dump<Id>(<instance>);`
    pub fn invoke(
        &self,
        ctx: &mut CodegenContext,
        idx: Idx,
        instance: &str,
    ) -> Result<(), EmitError> {
        let ty = concrete(self.pool, idx)?;
        ctx.writeln(&format!("{}({instance});", self.name_of(&ty)));
        Ok(())
    }

    fn name_of(&self, ty: &Concrete<'_>) -> String {
        format!("{}{}", self.options.prefix, ty.id)
    }

    fn signature(&self, ty: &Concrete<'_>) -> String {
        format!(
            "static void {}(const {} &{})",
            self.name_of(ty),
            ty.expr,
            self.options.value_name
        )
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "tests use unwrap/expect to fail fast on malformed fixtures"
)]
