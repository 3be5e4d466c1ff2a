use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::ldr::types::{BaseMode, LdrLayer};

/// Destination for converted layers.
///
/// Layers stack in the order they are appended.
pub trait LayerSink {
    type Canvas;

    fn create_canvas(&self, width: usize, height: usize, mode: BaseMode) -> Result<Self::Canvas>;

    fn append_layer(&self, canvas: &mut Self::Canvas, layer: LdrLayer) -> Result<()>;
}

/// Checks a layer against the canvas it is about to join.
pub fn check_layer(canvas_width: usize, canvas_height: usize, mode: BaseMode, layer: &LdrLayer) -> Result<()> {
    if layer.width != canvas_width || layer.height != canvas_height {
        return Err(ConversionError::LayerCreationFailed(format!(
            "layer '{}' is {}x{}, canvas is {}x{}",
            layer.name, layer.width, layer.height, canvas_width, canvas_height
        )));
    }

    if layer.data.len() != layer.expected_len() {
        return Err(ConversionError::LayerCreationFailed(format!(
            "layer '{}' holds {} bytes, expected {}",
            layer.name,
            layer.data.len(),
            layer.expected_len()
        )));
    }

    if !mode.accepts(layer.format) {
        return Err(ConversionError::LayerAppendFailed(format!(
            "{:?} layer '{}' does not fit a {:?} canvas",
            layer.format, layer.name, mode
        )));
    }

    Ok(())
}
