//! The API aggregate.

use apt_types::{Function, Idx, Pool};

use crate::{ClosureCollector, TypeSet};

/// How registration harvests referenced types.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ApiOptions {
    /// Also harvest the return and argument types of every method when an
    /// interface is added. Off by default: only functions feed the type set,
    /// interfaces are reached through [`Api::closure`].
    pub harvest_interface_methods: bool,
}

/// One described API.
#[derive(Clone, Debug, Default)]
pub struct Api {
    pub name: String,
    headers: Vec<String>,
    types: TypeSet,
    functions: Vec<Function>,
    interfaces: Vec<Idx>,
    options: ApiOptions,
}

impl Api {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_options(name, ApiOptions::default())
    }

    pub fn with_options(name: impl Into<String>, options: ApiOptions) -> Self {
        Self {
            name: name.into(),
            options,
            ..Self::default()
        }
    }

    /// Header to include in the generated compilation unit.
    pub fn add_header(&mut self, header: impl Into<String>) {
        self.headers.push(header.into());
    }

    /// Add a type to the set; `false` if it was already present.
    pub fn add_type(&mut self, idx: Idx) -> bool {
        self.types.insert(idx)
    }

    /// Register a function and harvest its argument and return types.
    pub fn add_function(&mut self, function: Function) {
        tracing::debug!(api = %self.name, function = %function.name, "registered function");
        self.types.extend(function.referenced_types());
        self.functions.push(function);
    }

    pub fn add_functions(&mut self, functions: impl IntoIterator<Item = Function>) {
        for function in functions {
            self.add_function(function);
        }
    }

    /// Register an interface.
    ///
    /// Method types are harvested only under
    /// [`ApiOptions::harvest_interface_methods`].
    pub fn add_interface(&mut self, pool: &Pool, interface: Idx) {
        tracing::debug!(api = %self.name, interface = pool.id(interface), "registered interface");
        if self.options.harvest_interface_methods {
            for method in pool.methods(interface) {
                self.types.extend(method.referenced_types());
            }
        }
        self.interfaces.push(interface);
    }

    pub fn add_interfaces(&mut self, pool: &Pool, interfaces: impl IntoIterator<Item = Idx>) {
        for interface in interfaces {
            self.add_interface(pool, interface);
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn types(&self) -> &TypeSet {
        &self.types
    }

    pub fn functions(&self) -> &[Function] {
        &self.functions
    }

    pub fn interfaces(&self) -> &[Idx] {
        &self.interfaces
    }

    pub fn options(&self) -> ApiOptions {
        self.options
    }

    /// Find a function by name.
    pub fn function(&self, name: &str) -> Option<&Function> {
        self.functions.iter().find(|f| f.name == name)
    }

    /// Every type reachable from the API, in discovery order: the type set
    /// first, then interfaces together with their bases and method types.
    #[tracing::instrument(level = "debug", skip_all, fields(api = %self.name))]
    pub fn closure(&self, pool: &Pool) -> TypeSet {
        let mut collector = ClosureCollector::new();
        for idx in self.types.iter().chain(self.interfaces.iter().copied()) {
            collector.collect(pool, idx);
        }
        let reached = collector.finish();
        tracing::debug!(types = reached.len(), "computed type closure");
        reached
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "tests use unwrap/expect to fail fast on malformed fixtures"
)]
