//! UI primitives for the Quick Notes CLI.

pub mod format;
mod mode;
pub mod render;

pub use mode::OutputMode;
pub use render::{kv, simple_table};
