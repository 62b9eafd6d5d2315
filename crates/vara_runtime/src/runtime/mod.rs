//! Runtime module - the embedding surface of the host.
//!
//! This module contains the Runtime struct and all its associated
//! functionality, organized into submodules for better maintainability.

mod config;
mod gc;

// Re-export all public types
pub use config::RuntimeConfig;

// The main Runtime implementation is in core.rs
mod core;
pub use self::core::Runtime;
