//! Callable signatures.
//!
//! A `Function` describes one entry point of the traced API: its return
//! type, ordered arguments, ABI token and the metadata the wrapper generator
//! needs (failure sentinel, side effects, visibility). Interface methods are
//! plain functions carrying the `__stdcall` token.

use crate::{Idx, Pool};

/// Calling-convention token of the GL entry points.
pub const GLAPIENTRY: &str = "GLAPIENTRY";

/// Calling-convention token of COM methods.
pub const STDCALL: &str = "__stdcall";

/// One function argument.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Arg {
    pub ty: Idx,
    pub name: String,
    /// The callee writes through this argument. Declaration syntax is not
    /// affected; wrapper generation dumps it after the call.
    pub output: bool,
}

impl Arg {
    pub fn new(ty: Idx, name: impl Into<String>) -> Self {
        Self {
            ty,
            name: name.into(),
            output: false,
        }
    }

    /// An output argument.
    pub fn out(ty: Idx, name: impl Into<String>) -> Self {
        Self {
            output: true,
            ..Self::new(ty, name)
        }
    }

    /// Render as `<expr> <name>`.
    pub fn render(&self, pool: &Pool) -> String {
        format!("{} {}", pool.expr(self.ty), self.name)
    }
}

/// A described entry point.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Function {
    pub ret: Idx,
    pub name: String,
    pub args: Vec<Arg>,
    /// Calling-convention token placed before the name.
    pub call: Option<String>,
    /// Expression to invoke instead of `name` when forwarding the call.
    pub invoke: Option<String>,
    /// Return value that signals failure.
    pub fail: Option<String>,
    pub side_effects: bool,
    pub hidden: bool,
}

impl Function {
    pub fn new(ret: Idx, name: impl Into<String>, args: Vec<Arg>) -> Self {
        Self {
            ret,
            name: name.into(),
            args,
            call: None,
            invoke: None,
            fail: None,
            side_effects: true,
            hidden: false,
        }
    }

    #[must_use]
    pub fn with_call(mut self, call: impl Into<String>) -> Self {
        self.call = Some(call.into());
        self
    }

    #[must_use]
    pub fn with_invoke(mut self, invoke: impl Into<String>) -> Self {
        self.invoke = Some(invoke.into());
        self
    }

    #[must_use]
    pub fn with_fail(mut self, fail: impl Into<String>) -> Self {
        self.fail = Some(fail.into());
        self
    }

    /// Mark as free of side effects.
    #[must_use]
    pub fn pure(mut self) -> Self {
        self.side_effects = false;
        self
    }

    /// Exclude from the generated dispatch tables.
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Render the C prototype under the function's own name.
    pub fn prototype(&self, pool: &Pool) -> String {
        self.prototype_as(pool, &self.name)
    }

    /// Render the C prototype under `name`.
    ///
    /// A name starting with `*` is a function-pointer declarator and is
    /// parenthesized together with the calling convention:
    /// `void (GLAPIENTRY *pfn)(void)`.
    pub fn prototype_as(&self, pool: &Pool, name: &str) -> String {
        let name = name.trim();
        let mut declarator = match &self.call {
            Some(call) => format!("{call} {name}"),
            None => name.to_owned(),
        };
        if name.starts_with('*') {
            declarator = format!("({declarator})");
        }

        let params = if self.args.is_empty() {
            "void".to_owned()
        } else {
            self.args
                .iter()
                .map(|arg| arg.render(pool))
                .collect::<Vec<_>>()
                .join(", ")
        };

        format!("{} {declarator}({params})", pool.expr(self.ret))
    }

    /// Render the forwarding call `<invoke or name>(<arg names>)`.
    pub fn call_expr(&self) -> String {
        let callee = self.invoke.as_deref().unwrap_or(&self.name);
        let names: Vec<&str> = self.args.iter().map(|arg| arg.name.as_str()).collect();
        format!("{callee}({})", names.join(", "))
    }

    /// Every type referenced by the signature: arguments first, then the
    /// return type.
    pub fn referenced_types(&self) -> impl Iterator<Item = Idx> + '_ {
        self.args
            .iter()
            .map(|arg| arg.ty)
            .chain(std::iter::once(self.ret))
    }
}

/// A GL entry point (`GLAPIENTRY` calling convention).
pub fn std_function(ret: Idx, name: impl Into<String>, args: Vec<Arg>) -> Function {
    Function::new(ret, name, args).with_call(GLAPIENTRY)
}

/// A COM interface method (`__stdcall` calling convention).
pub fn method(ret: Idx, name: impl Into<String>, args: Vec<Arg>) -> Function {
    Function::new(ret, name, args).with_call(STDCALL)
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "tests use unwrap/expect to fail fast on malformed fixtures"
)]
