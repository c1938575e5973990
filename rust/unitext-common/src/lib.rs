//! Core definitions (error type and precondition helpers), relied upon by all unitext-* crates.

pub mod error;
pub mod result;

pub use result::Result;
