//! Core runtime infrastructure.
//!
//! This module contains the fundamental types and systems for the runtime:
//! - `Value` - The runtime value representation
//! - `Heap` and GC - Garbage collection and memory management
//! - `Env` - Global bindings visible to scripts
//! - `RawData` - Owned raw byte storage backing buffers
//! - `ViewInstance` - Typed numeric views and buffers over raw bytes

pub mod env;
pub mod heap;
pub mod raw;
pub mod view;

pub use vara_core::gc::ObjectId;
pub use vara_core::value;
pub use vara_core::value::*;

pub use env::Env;
