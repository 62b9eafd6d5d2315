//! Core types for the Vara runtime.
//!
//! This crate contains the fundamental types that are independent of the runtime:
//! - `Value` - NaN-boxed runtime value representation
//! - `ObjectId` - Handle to heap-allocated objects
//! - `ScriptError` - Error values surfaced to scripts

pub mod error;
pub mod gc;
pub mod value;

pub use error::{ErrorKind, ScriptError};
pub use gc::ObjectId;
pub use value::Value;
