//! Terminal output and interactive prompts.

pub mod formatter;
pub mod select;

pub use select::{MainAction, OutputOptions};
