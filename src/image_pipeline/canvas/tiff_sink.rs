//! Sink that writes every converted layer as its own TIFF file.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::image_pipeline::canvas::sink::{LayerSink, check_layer};
use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::ldr::types::{BaseMode, LdrLayer, LdrPixelFormat};

/// TIFF compression methods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TiffCompression {
    /// No compression (fastest, largest file)
    None,
    /// LZW compression
    Lzw,
    /// Deflate compression - fast level
    DeflateFast,
    /// Deflate compression - balanced
    DeflateBalanced,
    /// Deflate compression - best compression (slower)
    DeflateBest,
}

/// Output directory plus the files written into it so far
#[derive(Debug, Clone)]
pub struct TiffCanvas {
    pub directory: PathBuf,
    pub width: usize,
    pub height: usize,
    pub mode: BaseMode,
    pub written: Vec<PathBuf>,
}

pub struct TiffLayerSink {
    directory: PathBuf,
    compression: TiffCompression,
}

impl TiffLayerSink {
    pub fn new<P: AsRef<Path>>(directory: P) -> Self {
        Self {
            directory: directory.as_ref().to_path_buf(),
            compression: TiffCompression::None,
        }
    }

    pub fn with_compression(mut self, compression: TiffCompression) -> Self {
        self.compression = compression;
        self
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn encode(&self, layer: &LdrLayer) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();

        {
            let compression = match self.compression {
                TiffCompression::None => tiff::encoder::Compression::Uncompressed,
                TiffCompression::Lzw => tiff::encoder::Compression::Lzw,
                TiffCompression::DeflateFast => tiff::encoder::Compression::Deflate(tiff::encoder::compression::DeflateLevel::Fast),
                TiffCompression::DeflateBalanced => tiff::encoder::Compression::Deflate(tiff::encoder::compression::DeflateLevel::Balanced),
                TiffCompression::DeflateBest => tiff::encoder::Compression::Deflate(tiff::encoder::compression::DeflateLevel::Best),
            };

            let mut encoder = tiff::encoder::TiffEncoder::new(Cursor::new(&mut buffer))
                .map_err(|e| ConversionError::EncodeError(e.to_string()))?
                .with_compression(compression);

            let width = layer.width as u32;
            let height = layer.height as u32;
            let result = match layer.format {
                LdrPixelFormat::Gray => {
                    encoder.write_image::<tiff::encoder::colortype::Gray8>(width, height, &layer.data)
                }
                LdrPixelFormat::Rgb => {
                    encoder.write_image::<tiff::encoder::colortype::RGB8>(width, height, &layer.data)
                }
                LdrPixelFormat::Rgba => {
                    encoder.write_image::<tiff::encoder::colortype::RGBA8>(width, height, &layer.data)
                }
                LdrPixelFormat::GrayAlpha => {
                    // no gray+alpha color type in baseline TIFF
                    let rgba = gray_alpha_to_rgba(&layer.data);
                    encoder.write_image::<tiff::encoder::colortype::RGBA8>(width, height, &rgba)
                }
            };
            result.map_err(|e| ConversionError::EncodeError(e.to_string()))?;
        }

        Ok(buffer)
    }
}

impl LayerSink for TiffLayerSink {
    type Canvas = TiffCanvas;

    fn create_canvas(&self, width: usize, height: usize, mode: BaseMode) -> Result<TiffCanvas> {
        if width == 0 || height == 0 {
            return Err(ConversionError::CanvasCreationFailed(format!(
                "cannot create a {}x{} canvas",
                width, height
            )));
        }

        std::fs::create_dir_all(&self.directory).map_err(|e| {
            ConversionError::CanvasCreationFailed(format!("{}: {}", self.directory.display(), e))
        })?;

        debug!(directory = %self.directory.display(), width, height, mode = ?mode, "Created TIFF canvas");

        Ok(TiffCanvas {
            directory: self.directory.clone(),
            width,
            height,
            mode,
            written: Vec::new(),
        })
    }

    fn append_layer(&self, canvas: &mut TiffCanvas, layer: LdrLayer) -> Result<()> {
        check_layer(canvas.width, canvas.height, canvas.mode, &layer)?;

        debug!("Encoding TIFF layer '{}': {}x{}", layer.name, layer.width, layer.height);
        let encoded = self.encode(&layer)?;

        let path = canvas
            .directory
            .join(layer_file_name(canvas.written.len(), &layer.name));
        std::fs::write(&path, &encoded).map_err(|e| {
            ConversionError::OutputWriteError(format!("{}: {}", path.display(), e))
        })?;

        debug!("TIFF layer written to {}", path.display());
        canvas.written.push(path);
        Ok(())
    }
}

/// `NN_<name>.tiff`, with `default` for the unnamed layer.
pub fn layer_file_name(position: usize, layer_name: &str) -> String {
    let name = if layer_name.is_empty() {
        "default".to_string()
    } else {
        layer_name
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '.' { c } else { '_' })
            .collect()
    };
    format!("{:02}_{}.tiff", position, name)
}

fn gray_alpha_to_rgba(data: &[u8]) -> Vec<u8> {
    data.chunks_exact(2)
        .flat_map(|pixel| [pixel[0], pixel[0], pixel[0], pixel[1]])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names() {
        assert_eq!(layer_file_name(0, ""), "00_default.tiff");
        assert_eq!(layer_file_name(3, "AO"), "03_AO.tiff");
        assert_eq!(layer_file_name(12, "left/diffuse color"), "12_left_diffuse_color.tiff");
        assert_eq!(layer_file_name(1, "left.diffuse"), "01_left.diffuse.tiff");
    }

    #[test]
    fn gray_alpha_expansion() {
        assert_eq!(gray_alpha_to_rgba(&[10, 200, 30, 0]), vec![10, 10, 10, 200, 30, 30, 30, 0]);
    }

    #[test]
    fn writes_one_file_per_layer() {
        let dir = tempfile::tempdir().unwrap();
        let sink = TiffLayerSink::new(dir.path().join("out")).with_compression(TiffCompression::Lzw);
        let mut canvas = sink.create_canvas(2, 2, BaseMode::Grayscale).unwrap();

        let layer = LdrLayer {
            name: "mask".to_string(),
            width: 2,
            height: 2,
            format: LdrPixelFormat::Gray,
            data: vec![0, 64, 128, 255],
        };
        sink.append_layer(&mut canvas, layer).unwrap();

        assert_eq!(canvas.written.len(), 1);
        assert!(canvas.written[0].ends_with("00_mask.tiff"));

        let mut decoder = tiff::decoder::Decoder::new(std::fs::File::open(&canvas.written[0]).unwrap()).unwrap();
        assert_eq!(decoder.dimensions().unwrap(), (2, 2));
        match decoder.read_image().unwrap() {
            tiff::decoder::DecodingResult::U8(data) => assert_eq!(data, vec![0, 64, 128, 255]),
            _ => panic!("expected 8-bit data"),
        }
    }

    #[test]
    fn rejects_layer_of_wrong_size() {
        let dir = tempfile::tempdir().unwrap();
        let sink = TiffLayerSink::new(dir.path());
        let mut canvas = sink.create_canvas(4, 4, BaseMode::Color).unwrap();

        let layer = LdrLayer {
            name: "small".to_string(),
            width: 2,
            height: 2,
            format: LdrPixelFormat::Rgb,
            data: vec![0; 12],
        };
        let result = sink.append_layer(&mut canvas, layer);
        assert!(matches!(result, Err(ConversionError::LayerCreationFailed(_))));
        assert!(canvas.written.is_empty());
    }

    #[test]
    fn encoder_errors_are_not_rewrapped() {
        let sink = TiffLayerSink::new("unused");
        let short = LdrLayer {
            name: "short".to_string(),
            width: 4,
            height: 4,
            format: LdrPixelFormat::Rgb,
            data: vec![0; 3],
        };

        let error = sink.encode(&short).unwrap_err();
        assert!(matches!(error, ConversionError::EncodeError(_)));
        let message = error.to_string();
        assert!(message.starts_with("Failed to encode layer: "));
        assert!(!message.contains("Failed to add layer"));
    }

    #[test]
    fn write_failure_is_an_output_error() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let sink = TiffLayerSink::new(&out);
        let mut canvas = sink.create_canvas(1, 1, BaseMode::Grayscale).unwrap();
        std::fs::remove_dir(&out).unwrap();

        let layer = LdrLayer {
            name: "gone".to_string(),
            width: 1,
            height: 1,
            format: LdrPixelFormat::Gray,
            data: vec![7],
        };
        let result = sink.append_layer(&mut canvas, layer);
        assert!(matches!(result, Err(ConversionError::OutputWriteError(msg)) if msg.contains("00_gone.tiff")));
        assert!(canvas.written.is_empty());
    }
}
