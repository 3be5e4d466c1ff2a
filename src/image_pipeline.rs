//! Image processing pipeline module
//!
//! This module turns multi-layer EXR files into 8-bit layers, with separate
//! modules for the EXR channel model, LDR conversion, canvas sinks and
//! conversion orchestration.

pub mod exr;
pub mod ldr;
pub mod canvas;
pub mod conversions;
pub mod common;

pub use common::{
    ConversionError,
    Result,
};

pub use exr::{
    Channel,
    DecodedChannel,
    DecodedImage,
    ExrChannelReader,
    ExrFile,
    ExrsReader,
    Layer,
    SampleBuffer,
    SampleEncoding,
    SUBSAMPLING_UNSUPPORTED,
};

pub use ldr::{
    BaseMode,
    ConversionSettings,
    ConversionSettingsBuilder,
    LayerType,
    LdrLayer,
    LdrPixelFormat,
    classify,
    convert_layer,
};

pub use canvas::{
    LayerSink,
    LayerStack,
    MemoryLayerSink,
    TiffCanvas,
    TiffCompression,
    TiffLayerSink,
};

pub use conversions::{
    ExrToLdrPipeline,
};
