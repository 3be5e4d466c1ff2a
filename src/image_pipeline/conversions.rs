//! Pipeline conversions module
//!
//! This module contains the orchestration of EXR to LDR conversions.

mod exr_to_ldr;


pub use exr_to_ldr::ExrToLdrPipeline;
