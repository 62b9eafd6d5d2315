//! Utility modules.

mod helpers;

pub(crate) use helpers::{to_i64, value_to_string};
