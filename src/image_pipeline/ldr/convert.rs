//! HDR sample to 8-bit conversion kernels.
//!
//! Every output byte is `clamp(round(v * 255), 0, 255)` of its source sample.
//! There is no gamma, exposure or knee curve in this path.

use half::f16;
use tracing::debug;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::exr::{Channel, Layer, SampleBuffer};
use crate::image_pipeline::ldr::layer_type::LayerType;
use crate::image_pipeline::ldr::types::{BaseMode, ConversionSettings, LdrLayer, LdrPixelFormat};

/// Maps one HDR sample onto the 8-bit range. NaN maps to 0.
#[inline]
pub fn to_ldr(value: f32) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}

trait Sample: Copy {
    fn to_f32(self) -> f32;
}

impl Sample for f32 {
    #[inline]
    fn to_f32(self) -> f32 {
        self
    }
}

impl Sample for f16 {
    #[inline]
    fn to_f32(self) -> f32 {
        f16::to_f32(self)
    }
}

impl Sample for u32 {
    #[inline]
    fn to_f32(self) -> f32 {
        self as f32
    }
}

/// Where an output pixel `(x, y)` reads its source sample from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sampling {
    /// `(x, y)`
    Full,
    /// `(x / 2, y / 2)`, for chroma planes subsampled in both axes
    Half,
}

/// One interleaved output byte per pixel, filled from a source channel.
struct Slot<'a> {
    channel: &'a Channel,
    sampling: Sampling,
}

/// Converts a classified layer to an 8-bit buffer.
///
/// `mode` is the base mode of the whole destination image: Y and YA layers
/// stay single channel on a grayscale canvas and are widened to RGB(A) on a
/// color canvas. The tone-mapping knobs in `_settings` are not applied.
pub fn convert_layer(
    _settings: &ConversionSettings,
    layer: &Layer,
    layer_type: LayerType,
    mode: BaseMode,
) -> Result<LdrLayer> {
    let (format, slots) = plan(layer, layer_type, mode)?;

    let first = slots[0].channel;
    let (width, height) = (first.width(), first.height());
    if let Some(odd) = slots
        .iter()
        .find(|slot| slot.channel.width() != width || slot.channel.height() != height)
    {
        return Err(ConversionError::InvalidDimensions(odd.channel.width(), odd.channel.height()));
    }

    debug!(
        layer = layer.name(),
        layer_type = %layer_type,
        format = ?format,
        encoding = ?first.encoding(),
        "Converting layer"
    );

    let stride = format.channels();
    let mut data = vec![0u8; width * height * stride];
    for (offset, slot) in slots.iter().enumerate() {
        write_slot(&mut data, stride, offset, slot, width, height);
    }

    Ok(LdrLayer {
        name: layer.name().to_string(),
        width,
        height,
        format,
        data,
    })
}

fn plan<'a>(
    layer: &'a Layer,
    layer_type: LayerType,
    mode: BaseMode,
) -> Result<(LdrPixelFormat, Vec<Slot<'a>>)> {
    let unsupported = || ConversionError::UnsupportedLayout {
        layer: layer.name().to_string(),
        channels: layer.channel_names().collect::<Vec<_>>().join(", "),
    };
    let full = |name: &str| {
        layer
            .channel(name)
            .map(|channel| Slot { channel, sampling: Sampling::Full })
            .ok_or_else(unsupported)
    };
    let half = |name: &str| {
        layer
            .channel(name)
            .map(|channel| Slot { channel, sampling: Sampling::Half })
            .ok_or_else(unsupported)
    };

    let planned = match (layer_type, mode) {
        (LayerType::Y, BaseMode::Grayscale) => (LdrPixelFormat::Gray, vec![full("Y")?]),
        (LayerType::Y, BaseMode::Color) => {
            (LdrPixelFormat::Rgb, vec![full("Y")?, full("Y")?, full("Y")?])
        }
        (LayerType::YA, BaseMode::Grayscale) => {
            (LdrPixelFormat::GrayAlpha, vec![full("Y")?, full("A")?])
        }
        (LayerType::YA, BaseMode::Color) => (
            LdrPixelFormat::Rgba,
            vec![full("Y")?, full("Y")?, full("Y")?, full("A")?],
        ),
        (LayerType::YC, _) => (LdrPixelFormat::Rgb, vec![half("RY")?, full("Y")?, half("BY")?]),
        (LayerType::YCA, _) => (
            LdrPixelFormat::Rgba,
            vec![half("RY")?, full("Y")?, half("BY")?, full("A")?],
        ),
        (LayerType::RGB, _) => (LdrPixelFormat::Rgb, vec![full("R")?, full("G")?, full("B")?]),
        (LayerType::RGBA, _) => (
            LdrPixelFormat::Rgba,
            vec![full("R")?, full("G")?, full("B")?, full("A")?],
        ),
        (LayerType::Undefined, _) => return Err(unsupported()),
    };
    Ok(planned)
}

fn write_slot(out: &mut [u8], stride: usize, offset: usize, slot: &Slot<'_>, width: usize, height: usize) {
    match slot.channel.samples() {
        SampleBuffer::Float32(values) => write_plane(out, stride, offset, values, slot.sampling, width, height),
        SampleBuffer::Half16(values) => write_plane(out, stride, offset, values, slot.sampling, width, height),
        SampleBuffer::UInt32(values) => write_plane(out, stride, offset, values, slot.sampling, width, height),
    }
}

fn write_plane<S: Sample>(
    out: &mut [u8],
    stride: usize,
    offset: usize,
    values: &[S],
    sampling: Sampling,
    width: usize,
    height: usize,
) {
    match sampling {
        Sampling::Full => {
            for (dst, &value) in out.iter_mut().skip(offset).step_by(stride).zip(values) {
                *dst = to_ldr(value.to_f32());
            }
        }
        Sampling::Half => {
            for y in 0..height {
                let source_row = (y / 2) * width;
                let dest_row = y * width;
                for x in 0..width {
                    out[(dest_row + x) * stride + offset] = to_ldr(values[source_row + x / 2].to_f32());
                }
            }
        }
    }
}
