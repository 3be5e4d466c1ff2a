//! Canvas sinks
//!
//! Destinations that receive the converted 8-bit layers: an in-memory layer
//! stack and a directory of per-layer TIFF files.

mod memory_sink;
mod sink;
mod tiff_sink;

pub use memory_sink::{LayerStack, MemoryLayerSink};
pub use sink::{LayerSink, check_layer};
pub use tiff_sink::{TiffCanvas, TiffCompression, TiffLayerSink, layer_file_name};
