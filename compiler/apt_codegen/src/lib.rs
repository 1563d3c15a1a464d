//! Dump-routine emission for traced API types.
//!
//! Every concrete type (enum, bitmask, struct) gets one value-dump routine,
//! named after its registry id so names never collide:
//!
//! ```text
//! static void DumpPoint(const Point &value);      declare
//! static void DumpPoint(const Point &value) {     implement
//!     <body from the type's DumpBody hook>
//! }
//! DumpPoint(p);                                   invoke
//! ```
//!
//! # Architecture
//!
//! ```text
//! Pool + Api
//!     ↓
//!  Api::closure       (every reachable type, memoized)
//!     ↓
//!  concrete filter    (Enum / Bitmask / Struct)
//!     ↓
//!  DumpEmitter        (declarations, then implementations)
//!     ↓
//!  String
//! ```

mod concrete;
mod context;
mod driver;
mod emitter;
mod error;
mod hooks;
mod options;

use std::sync::Once;

pub use concrete::{concrete, Concrete, ConcreteKind};
pub use context::CodegenContext;
pub use driver::emit_api;
pub use emitter::DumpEmitter;
pub use error::EmitError;
pub use hooks::{DumpBody, DumpHooks};
pub use options::EmitOptions;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Call this once at startup. Safe to call multiple times.
/// Enable with `RUST_LOG=apt_codegen=debug` or `RUST_LOG=apt_types=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
