//! Common utilities module
//!
//! Error types shared by the EXR model, the LDR conversion and the canvas sinks.

pub mod error;

pub use error::{ConversionError, Result};
