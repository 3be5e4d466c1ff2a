//! EXR decoder backed by the `exr` crate.
//!
//! All parts and channels are read at their largest resolution level. Part
//! names become dotted layer prefixes so multi-part files group the same way
//! as single-part files with dotted channel names.
//!
//! The `exr` crate refuses channels with x/y sampling other than 1 while it
//! validates the header, so files storing subsampled chroma fail to load with
//! [`SUBSAMPLING_UNSUPPORTED`].

use std::io::Cursor;

use exr::image::{AnyChannels, FlatSamples, Image, Layers};
use tracing::debug;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::exr::reader::ExrChannelReader;
use crate::image_pipeline::exr::types::{DecodedChannel, DecodedImage, SampleBuffer};

/// First four bytes of every OpenEXR file.
const EXR_MAGIC: [u8; 4] = [0x76, 0x2f, 0x31, 0x01];

pub const SUBSAMPLING_UNSUPPORTED: &str = "subsampled channels are not supported by the decoder";

/// Checks the OpenEXR magic number.
pub fn is_exr_data(data: &[u8]) -> bool {
    data.starts_with(&EXR_MAGIC)
}

pub struct ExrsReader;

impl ExrChannelReader for ExrsReader {
    fn read_channels(&self, data: &[u8]) -> Result<DecodedImage> {
        if !is_exr_data(data) {
            return Err(ConversionError::DecodeError(
                "file is not a valid OpenEXR file".to_string(),
            ));
        }

        debug!("Decoding EXR image, {} bytes", data.len());

        let image = decode_all_layers(data).map_err(decode_error)?;

        let first = image
            .layer_data
            .first()
            .ok_or_else(|| ConversionError::DecodeError("file contains no layers".to_string()))?;
        let width = first.size.0;
        let height = first.size.1;

        let mut channels = Vec::new();
        for layer in image.layer_data.iter() {
            if layer.size.0 != width || layer.size.1 != height {
                return Err(ConversionError::DecodeError(format!(
                    "part resolution {}x{} differs from {}x{}",
                    layer.size.0, layer.size.1, width, height
                )));
            }

            let prefix = layer.attributes.layer_name.as_ref().map(|name| name.to_string());

            for channel in layer.channel_data.list.iter() {
                let short_name = channel.name.to_string();
                let name = match &prefix {
                    Some(prefix) => format!("{}.{}", prefix, short_name),
                    None => short_name,
                };

                if channel.sampling.0 != 1 || channel.sampling.1 != 1 {
                    return Err(ConversionError::DecodeError(format!(
                        "{} (channel '{}')",
                        SUBSAMPLING_UNSUPPORTED, name
                    )));
                }

                let samples = match &channel.sample_data {
                    FlatSamples::F16(values) => SampleBuffer::Half16(values.clone()),
                    FlatSamples::F32(values) => SampleBuffer::Float32(values.clone()),
                    FlatSamples::U32(values) => SampleBuffer::UInt32(values.clone()),
                };
                if samples.len() != width * height {
                    return Err(ConversionError::DecodeError(format!(
                        "channel '{}' holds {} samples, expected {}",
                        name,
                        samples.len(),
                        width * height
                    )));
                }

                debug!(
                    channel = %name,
                    encoding = ?samples.encoding(),
                    "Decoded channel"
                );
                channels.push(DecodedChannel { name, samples });
            }
        }

        debug!("Decoded image: {}x{}, {} channels", width, height, channels.len());

        Ok(DecodedImage {
            width,
            height,
            channels,
        })
    }
}

fn decode_all_layers(data: &[u8]) -> exr::error::Result<Image<Layers<AnyChannels<FlatSamples>>>> {
    use exr::prelude::*;

    read()
        .no_deep_data()
        .largest_resolution_level()
        .all_channels()
        .all_layers()
        .all_attributes()
        .from_buffered(Cursor::new(data))
}

fn decode_error(error: exr::error::Error) -> ConversionError {
    match error {
        exr::error::Error::NotSupported(message) if message.contains("subsampling") => {
            ConversionError::DecodeError(SUBSAMPLING_UNSUPPORTED.to_string())
        }
        other => ConversionError::DecodeError(other.to_string()),
    }
}
