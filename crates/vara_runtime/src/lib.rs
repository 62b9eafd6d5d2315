//! Vara typed-view runtime.
//!
//! A small embeddable host providing garbage-collected byte buffers and
//! typed numeric views over them: `Buffer`, `Int8View` through
//! `Float64View`, plus the coercion and aliasing rules scripts rely on.

#![allow(clippy::new_without_default)]
#![allow(clippy::manual_range_contains)]

pub mod coerce;
pub mod core;
pub mod errors;
mod util;

mod builtins;
pub mod builtins_registry;
mod methods;
mod runtime;

// Re-exports from core/
pub use core::env::Env;
pub use core::heap::{Heap, ManagedObject};
pub use core::raw::RawData;
pub use core::value::Value;
pub use core::view::{ElementKind, ReclaimState, Storage, ViewInstance};
pub use core::ObjectId;

// Re-exports from other modules
pub use builtins_registry::{BuiltinFn, BuiltinProvider, BuiltinRegistry, StdBuiltinProvider};
pub use coerce::MAX_VIEW_LENGTH;
pub use vara_core::error::{ErrorKind, ScriptError};

// Runtime structs and enums
pub use runtime::Runtime;
pub use runtime::RuntimeConfig;
