//! LDR conversion module
//!
//! Layer classification and the numeric conversion of HDR samples into
//! 8-bit interleaved pixel buffers.

mod convert;
mod layer_type;
pub mod types;

pub use convert::{convert_layer, to_ldr};
pub use layer_type::{LayerType, classify, classify_names};
pub use types::{BaseMode, ConversionSettings, ConversionSettingsBuilder, LdrLayer, LdrPixelFormat};
