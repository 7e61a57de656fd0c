//! Deviation Relay - forwards sensor deviation events to notification topics
//!
//! Each incoming stream record carries a JSON deviation event. The relay
//! decodes it, formats a human-readable message and publishes it to a topic
//! derived from the sensor id.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod formatting;
pub mod handler;
pub mod internal_metrics;
pub mod notification;
pub mod parsing;
pub mod relay;
pub mod replay;
pub mod telemetry;

// Re-export core types for convenience
pub use crate::core::*;
pub use crate::relay::{BatchOutcome, FailurePolicy, Relay};
