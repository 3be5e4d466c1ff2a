//! Sample storage types shared by the decoder and the channel model

use half::f16;

/// Encoding of the samples stored in a channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleEncoding {
    /// 32-bit IEEE float
    Float32,
    /// 16-bit IEEE half float
    Half16,
    /// 32-bit unsigned integer
    UInt32,
}

impl SampleEncoding {
    /// Size in bytes of a single sample.
    pub fn byte_width(self) -> usize {
        match self {
            SampleEncoding::Half16 => 2,
            SampleEncoding::Float32 | SampleEncoding::UInt32 => 4,
        }
    }
}

/// Flat, row-major sample buffer of one channel
#[derive(Debug, Clone, PartialEq)]
pub enum SampleBuffer {
    Float32(Vec<f32>),
    Half16(Vec<f16>),
    UInt32(Vec<u32>),
}

impl SampleBuffer {
    /// Allocates a zero-filled buffer of `len` samples.
    pub fn zeroed(encoding: SampleEncoding, len: usize) -> Self {
        match encoding {
            SampleEncoding::Float32 => SampleBuffer::Float32(vec![0.0; len]),
            SampleEncoding::Half16 => SampleBuffer::Half16(vec![f16::ZERO; len]),
            SampleEncoding::UInt32 => SampleBuffer::UInt32(vec![0; len]),
        }
    }

    pub fn encoding(&self) -> SampleEncoding {
        match self {
            SampleBuffer::Float32(_) => SampleEncoding::Float32,
            SampleBuffer::Half16(_) => SampleEncoding::Half16,
            SampleBuffer::UInt32(_) => SampleEncoding::UInt32,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            SampleBuffer::Float32(values) => values.len(),
            SampleBuffer::Half16(values) => values.len(),
            SampleBuffer::UInt32(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reads sample `index` widened to `f32`.
    ///
    /// Panics if `index` is out of bounds, like slice indexing.
    #[inline]
    pub fn get_f32(&self, index: usize) -> f32 {
        match self {
            SampleBuffer::Float32(values) => values[index],
            SampleBuffer::Half16(values) => values[index].to_f32(),
            SampleBuffer::UInt32(values) => values[index] as f32,
        }
    }
}

/// One named channel as produced by a decoder, before grouping into layers
#[derive(Debug, Clone)]
pub struct DecodedChannel {
    /// Full channel name, possibly dotted (`"AO.G"`)
    pub name: String,
    /// Row-major samples, `width * height` of them
    pub samples: SampleBuffer,
}

/// Decoded image: flat channel list plus the shared resolution
#[derive(Debug, Clone)]
pub struct DecodedImage {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
    /// All channels of the image, in decoder order
    pub channels: Vec<DecodedChannel>,
}
