//! Multi-layer EXR to 8-bit layer conversion.
//!
//! Channels of a decoded EXR file are grouped into layers by their dotted
//! name prefix, each layer is classified by its channel names (Y, YA, YC, YCA,
//! RGB, RGBA) and converted into an 8-bit interleaved buffer handed to a
//! [`LayerSink`](image_pipeline::LayerSink).

pub mod image_pipeline;
pub mod logger;
