//! Core types shared across the text board crates
//!
//! - **Correlation types**: RequestId, CommandContext
//! - **Schema constants**: Canonical field keys and event names

pub mod correlation;
pub mod schema;

pub use correlation::{CommandContext, RequestId};
