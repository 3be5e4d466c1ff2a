use std::path::Path;

use tracing::{info, instrument, warn};

use crate::image_pipeline::{
    canvas::{LayerSink, TiffLayerSink},
    common::error::{ConversionError, Result},
    exr::{ExrChannelReader, ExrFile, ExrsReader},
    ldr::{BaseMode, ConversionSettings, LayerType, classify, convert_layer},
};

/// Converts every layer of an EXR file into 8-bit layers of a sink canvas.
pub struct ExrToLdrPipeline<R: ExrChannelReader, S: LayerSink> {
    reader: R,
    sink: S,
    settings: ConversionSettings,
}

impl ExrToLdrPipeline<ExrsReader, TiffLayerSink> {
    pub fn new<P: AsRef<Path>>(output_dir: P, settings: ConversionSettings) -> Self {
        Self {
            reader: ExrsReader,
            sink: TiffLayerSink::new(output_dir),
            settings,
        }
    }
}

impl<R: ExrChannelReader, S: LayerSink> ExrToLdrPipeline<R, S> {
    pub fn with_custom(reader: R, sink: S, settings: ConversionSettings) -> Self {
        Self {
            reader,
            sink,
            settings,
        }
    }

    fn validate_dimensions(&self, width: usize, height: usize) -> Result<()> {
        if !self.settings.validate_dimensions {
            return Ok(());
        }

        if width == 0 || height == 0 {
            return Err(ConversionError::InvalidDimensions(width, height));
        }

        Ok(())
    }

    /// Grayscale only when every layer is Y or YA.
    pub fn base_mode(file: &ExrFile) -> BaseMode {
        if file.layers().iter().all(|layer| classify(layer).is_grayscale()) {
            BaseMode::Grayscale
        } else {
            BaseMode::Color
        }
    }

    /// Converts a loaded file layer by layer, in file order.
    ///
    /// Stops at the first layer that fails. Layers appended before the failure
    /// stay on the sink's canvas.
    #[instrument(skip(self, file), fields(path = %file.path().display()))]
    pub fn convert(&self, file: &ExrFile) -> Result<S::Canvas> {
        if !file.is_loaded() {
            return Err(ConversionError::NotLoaded);
        }

        info!("Starting EXR to LDR conversion");

        let ignored = self.settings.customized_tone_knobs();
        if !ignored.is_empty() {
            warn!(knobs = ?ignored, "Tone-mapping settings are not applied by the linear conversion");
        }

        {
            let _span = tracing::info_span!("validate_dimensions",
                width = file.width(),
                height = file.height()
            ).entered();
            self.validate_dimensions(file.width(), file.height())?;
        }

        let mode = {
            let _span = tracing::info_span!("classify_layers", layers = file.layer_count()).entered();
            Self::base_mode(file)
        };

        let mut canvas = {
            let _span = tracing::info_span!("create_canvas", mode = ?mode).entered();
            self.sink.create_canvas(file.width(), file.height(), mode)?
        };

        for layer in file.layers() {
            let _span = tracing::info_span!("convert_layer", layer = layer.name()).entered();

            let layer_type = classify(layer);
            if layer_type == LayerType::Undefined {
                warn!(
                    layer = layer.name(),
                    channels = layer.channel_count(),
                    "No known layout for layer"
                );
            }

            let converted = convert_layer(&self.settings, layer, layer_type, mode)?;
            self.sink.append_layer(&mut canvas, converted)?;
        }

        info!(
            width = file.width(),
            height = file.height(),
            layers = file.layer_count(),
            mode = ?mode,
            "Conversion complete"
        );
        Ok(canvas)
    }

    /// Loads `input_path` with the pipeline's reader and converts it.
    #[instrument(skip(self, input_path))]
    pub fn convert_file<P: AsRef<Path>>(&self, input_path: P) -> Result<S::Canvas> {
        let input_path = input_path.as_ref();

        info!(input = %input_path.display(), "Converting file");

        let mut file = ExrFile::new(input_path);
        file.load(&self.reader)?;

        self.convert(&file)
    }

    pub fn settings(&self) -> &ConversionSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: ConversionSettings) {
        self.settings = settings;
    }

    pub fn reader(&self) -> &R {
        &self.reader
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
