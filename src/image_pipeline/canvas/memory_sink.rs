use tracing::debug;

use crate::image_pipeline::canvas::sink::{LayerSink, check_layer};
use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::ldr::types::{BaseMode, LdrLayer};

/// Converted image held in memory, layers in append order
#[derive(Debug, Clone, PartialEq)]
pub struct LayerStack {
    pub width: usize,
    pub height: usize,
    pub mode: BaseMode,
    pub layers: Vec<LdrLayer>,
}

impl LayerStack {
    pub fn layer(&self, name: &str) -> Option<&LdrLayer> {
        self.layers.iter().find(|layer| layer.name == name)
    }
}

/// Sink that collects layers into a [`LayerStack`].
pub struct MemoryLayerSink;

impl LayerSink for MemoryLayerSink {
    type Canvas = LayerStack;

    fn create_canvas(&self, width: usize, height: usize, mode: BaseMode) -> Result<LayerStack> {
        if width == 0 || height == 0 {
            return Err(ConversionError::CanvasCreationFailed(format!(
                "cannot create a {}x{} canvas",
                width, height
            )));
        }

        Ok(LayerStack {
            width,
            height,
            mode,
            layers: Vec::new(),
        })
    }

    fn append_layer(&self, canvas: &mut LayerStack, layer: LdrLayer) -> Result<()> {
        check_layer(canvas.width, canvas.height, canvas.mode, &layer)?;
        debug!(layer = %layer.name, format = ?layer.format, "Appending layer to memory canvas");
        canvas.layers.push(layer);
        Ok(())
    }
}
