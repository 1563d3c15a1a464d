//! Type constructors.
//!
//! Each constructor renders the new type's expression, derives its candidate
//! id from the underlying type, registers it, and returns the handle.

use crate::registry::derive_ident;
use crate::{EnumValue, Function, Idx, LiteralFormat, Member, Pool, TypeError, TypeKind};

impl Pool {
    // === Leaves ===

    /// A built-in scalar printed in base 10.
    pub fn literal(&mut self, expr: &str, format: LiteralFormat) -> Result<Idx, TypeError> {
        self.literal_with_base(expr, format, 10)
    }

    /// A built-in scalar printed in `base`.
    pub fn literal_with_base(
        &mut self,
        expr: &str,
        format: LiteralFormat,
        base: u32,
    ) -> Result<Idx, TypeError> {
        self.alloc(
            &derive_ident(expr),
            expr.to_owned(),
            TypeKind::Literal { format, base },
        )
    }

    /// A type whose contents are never inspected.
    pub fn opaque(&mut self, expr: &str) -> Result<Idx, TypeError> {
        self.alloc(&derive_ident(expr), expr.to_owned(), TypeKind::Opaque)
    }

    /// An opaque `T *`.
    pub fn opaque_pointer(&mut self, inner: Idx) -> Result<Idx, TypeError> {
        let expr = format!("{} *", self.expr(inner));
        self.opaque(&expr)
    }

    /// A function-pointer typedef, treated as opaque.
    pub fn function_pointer(&mut self, name: &str) -> Result<Idx, TypeError> {
        self.opaque(name)
    }

    /// An enum named `name`.
    pub fn enumeration(&mut self, name: &str, values: Vec<EnumValue>) -> Result<Idx, TypeError> {
        self.alloc(name, name.to_owned(), TypeKind::Enum { values })
    }

    /// An enum over an existing integer typedef, e.g. `GLenum`.
    pub fn fake_enum(&mut self, ty: Idx, values: Vec<EnumValue>) -> Result<Idx, TypeError> {
        let name = self.expr(ty).to_owned();
        self.enumeration(&name, values)
    }

    // === Composites ===

    /// `const T`, or `T const` when `T` already starts with `const`.
    pub fn constant(&mut self, inner: Idx) -> Result<Idx, TypeError> {
        let inner_expr = self.expr(inner);
        let expr = if inner_expr.starts_with("const ") {
            format!("{inner_expr} const")
        } else {
            format!("const {inner_expr}")
        };
        let candidate = format!("C{}", self.id(inner));
        self.alloc(&candidate, expr, TypeKind::Const { inner })
    }

    /// `T *`.
    pub fn pointer(&mut self, inner: Idx) -> Result<Idx, TypeError> {
        let expr = format!("{} *", self.expr(inner));
        let candidate = format!("P{}", self.id(inner));
        self.alloc(&candidate, expr, TypeKind::Pointer { inner })
    }

    /// `const T *`.
    pub fn const_pointer(&mut self, inner: Idx) -> Result<Idx, TypeError> {
        let constant = self.constant(inner)?;
        self.pointer(constant)
    }

    /// A pointer the wrapper generator may substitute with a traced wrapper.
    pub fn wrap_pointer(&mut self, inner: Idx) -> Result<Idx, TypeError> {
        self.pointer(inner)
    }

    /// An object handle of kind `name` represented as `T`.
    pub fn handle(&mut self, name: &str, inner: Idx) -> Result<Idx, TypeError> {
        let expr = self.expr(inner).to_owned();
        let candidate = format!("P{}", self.id(inner));
        self.alloc(
            &candidate,
            expr,
            TypeKind::Handle {
                name: name.to_owned(),
                inner,
            },
        )
    }

    /// `length` elements of `T`; `length` is a C expression over sibling
    /// arguments.
    pub fn array(&mut self, inner: Idx, length: &str) -> Result<Idx, TypeError> {
        let expr = format!("{} *", self.expr(inner));
        let candidate = format!("A{}", self.id(inner));
        self.alloc(
            &candidate,
            expr,
            TypeKind::Array {
                inner,
                length: length.to_owned(),
            },
        )
    }

    /// `size` raw bytes behind a `T *`.
    pub fn blob(&mut self, inner: Idx, size: &str) -> Result<Idx, TypeError> {
        let expr = format!("{} *", self.expr(inner));
        let candidate = format!("B{}", self.id(inner));
        self.alloc(
            &candidate,
            expr,
            TypeKind::Blob {
                inner,
                size: size.to_owned(),
            },
        )
    }

    /// Flags over an integer type `T`.
    pub fn bitmask(&mut self, inner: Idx, values: Vec<EnumValue>) -> Result<Idx, TypeError> {
        let expr = self.expr(inner).to_owned();
        self.alloc(
            &derive_ident(&expr),
            expr,
            TypeKind::Bitmask { inner, values },
        )
    }

    /// Alias of [`Pool::bitmask`].
    pub fn flags_of(&mut self, inner: Idx, values: Vec<EnumValue>) -> Result<Idx, TypeError> {
        self.bitmask(inner, values)
    }

    /// A typedef `expr` standing for `T`.
    pub fn alias(&mut self, expr: &str, inner: Idx) -> Result<Idx, TypeError> {
        self.alloc(&derive_ident(expr), expr.to_owned(), TypeKind::Alias { inner })
    }

    // === Named aggregates ===

    /// A struct named `name`.
    ///
    /// Pass no members to forward-declare a struct that reaches itself
    /// through a pointer, then complete it with [`Pool::set_members`].
    pub fn structure(&mut self, name: &str, members: Vec<Member>) -> Result<Idx, TypeError> {
        self.alloc(
            name,
            name.to_owned(),
            TypeKind::Struct {
                name: name.to_owned(),
                members,
            },
        )
    }

    /// Replace a struct's members.
    pub fn set_members(&mut self, idx: Idx, new_members: Vec<Member>) -> Result<(), TypeError> {
        let not_struct = self.not_struct(idx);
        match self.kind_mut(idx) {
            TypeKind::Struct { members, .. } => {
                *members = new_members;
                Ok(())
            }
            _ => Err(not_struct),
        }
    }

    /// An interface named `name`, optionally extending `base`.
    pub fn interface(&mut self, name: &str, base: Option<Idx>) -> Result<Idx, TypeError> {
        if let Some(base) = base {
            if !matches!(self.kind(base), TypeKind::Interface { .. }) {
                return Err(self.not_interface(base));
            }
        }
        self.alloc(
            name,
            name.to_owned(),
            TypeKind::Interface {
                name: name.to_owned(),
                base,
                methods: Vec::new(),
            },
        )
    }

    /// Append methods to an interface's own method list.
    pub fn add_methods(
        &mut self,
        idx: Idx,
        new_methods: impl IntoIterator<Item = Function>,
    ) -> Result<(), TypeError> {
        let not_interface = self.not_interface(idx);
        match self.kind_mut(idx) {
            TypeKind::Interface { methods, .. } => {
                methods.extend(new_methods);
                Ok(())
            }
            _ => Err(not_interface),
        }
    }

    fn not_struct(&self, idx: Idx) -> TypeError {
        TypeError::NotAStruct {
            id: self.id(idx).to_owned(),
            kind: self.kind(idx).name(),
        }
    }

    fn not_interface(&self, idx: Idx) -> TypeError {
        TypeError::NotAnInterface {
            id: self.id(idx).to_owned(),
            kind: self.kind(idx).name(),
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "tests use unwrap/expect to fail fast on malformed fixtures"
)]
