use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::exr::types::{SampleBuffer, SampleEncoding};

/// A single data plane of the image, e.g. `R`, `Y` or `RY`.
///
/// Pixel `(x, y)` lives at byte offset `x * x_stride + y * y_stride`, or at
/// sample index `x + y * width`.
#[derive(Debug, Clone)]
pub struct Channel {
    name: String,
    layer_index: Option<usize>,
    width: usize,
    height: usize,
    samples: SampleBuffer,
}

impl Channel {
    /// Creates a zero-filled channel.
    pub fn new(name: impl Into<String>, encoding: SampleEncoding, width: usize, height: usize) -> Self {
        Self {
            name: name.into(),
            layer_index: None,
            width,
            height,
            samples: SampleBuffer::zeroed(encoding, width * height),
        }
    }

    /// Wraps decoded samples, which must cover exactly `width * height` pixels.
    pub fn with_samples(
        name: impl Into<String>,
        width: usize,
        height: usize,
        samples: SampleBuffer,
    ) -> Result<Self> {
        let name = name.into();
        if samples.len() != width * height {
            return Err(ConversionError::DecodeError(format!(
                "channel '{}' holds {} samples, expected {}x{}",
                name,
                samples.len(),
                width,
                height
            )));
        }

        Ok(Self {
            name,
            layer_index: None,
            width,
            height,
            samples,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Index of the owning layer in the file's layer table, once adopted.
    pub fn layer_index(&self) -> Option<usize> {
        self.layer_index
    }

    pub(crate) fn set_layer_index(&mut self, index: usize) {
        self.layer_index = Some(index);
    }

    pub fn encoding(&self) -> SampleEncoding {
        self.samples.encoding()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Size of a single sample in bytes.
    pub fn x_stride(&self) -> usize {
        self.encoding().byte_width()
    }

    /// Size of a row in bytes.
    pub fn y_stride(&self) -> usize {
        self.x_stride() * self.width
    }

    pub fn byte_size(&self) -> usize {
        self.y_stride() * self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    pub fn samples(&self) -> &SampleBuffer {
        &self.samples
    }

    #[inline]
    pub fn sample_f32(&self, index: usize) -> f32 {
        self.samples.get_f32(index)
    }

    #[inline]
    pub fn sample_at(&self, x: usize, y: usize) -> f32 {
        self.samples.get_f32(x + y * self.width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use half::f16;

    #[test]
    fn strides_follow_encoding() {
        let half = Channel::new("Y", SampleEncoding::Half16, 3, 2);
        assert_eq!(half.x_stride(), 2);
        assert_eq!(half.y_stride(), 6);
        assert_eq!(half.byte_size(), 12);

        let float = Channel::new("R", SampleEncoding::Float32, 3, 2);
        assert_eq!(float.x_stride(), 4);
        assert_eq!(float.byte_size(), 24);

        let uint = Channel::new("id", SampleEncoding::UInt32, 3, 2);
        assert_eq!(uint.y_stride(), 12);
        assert_eq!(uint.pixel_count(), 6);
    }

    #[test]
    fn with_samples_rejects_wrong_length() {
        let result = Channel::with_samples("R", 2, 2, SampleBuffer::Float32(vec![0.0; 3]));
        assert!(matches!(result, Err(ConversionError::DecodeError(_))));
    }

    #[test]
    fn sample_at_reads_row_major() {
        let samples = SampleBuffer::Half16((0..6).map(|v| f16::from_f32(v as f32)).collect());
        let channel = Channel::with_samples("Y", 3, 2, samples).unwrap();
        assert_eq!(channel.sample_at(2, 0), 2.0);
        assert_eq!(channel.sample_at(1, 1), 4.0);
        assert_eq!(channel.encoding(), SampleEncoding::Half16);
        assert_eq!(channel.layer_index(), None);
    }
}
