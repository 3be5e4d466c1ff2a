//! EXR channel/layer model
//!
//! This module holds the in-memory representation of a decoded EXR file:
//! channels grouped into layers by their dotted name prefix.

mod channel;
mod exrs_reader;
mod file;
mod layer;
mod reader;
pub mod types;

pub use channel::Channel;
pub use exrs_reader::{ExrsReader, SUBSAMPLING_UNSUPPORTED, is_exr_data};
pub use file::{ExrFile, split_channel_name};
pub use layer::Layer;
pub use reader::ExrChannelReader;
pub use types::{DecodedChannel, DecodedImage, SampleBuffer, SampleEncoding};
