//! In-memory store for all layers and channels of one EXR file.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::exr::channel::Channel;
use crate::image_pipeline::exr::layer::Layer;
use crate::image_pipeline::exr::reader::ExrChannelReader;
use crate::image_pipeline::exr::types::DecodedImage;

/// Splits a full channel name into its layer prefix and short name.
///
/// The prefix is everything before the last dot: `"AO.G"` gives `("AO", "G")`,
/// `"R"` gives `("", "R")`.
pub fn split_channel_name(full_name: &str) -> (&str, &str) {
    match full_name.rfind('.') {
        Some(dot) => (&full_name[..dot], &full_name[dot + 1..]),
        None => ("", full_name),
    }
}

/// All data of an EXR file, held in memory once loaded.
#[derive(Debug)]
pub struct ExrFile {
    path: PathBuf,
    loaded: bool,
    width: usize,
    height: usize,
    index: HashMap<String, usize>,
    layers: Vec<Layer>,
}

impl ExrFile {
    /// Creates an unloaded file; nothing is read yet.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            loaded: false,
            width: 0,
            height: 0,
            index: HashMap::new(),
            layers: Vec::new(),
        }
    }

    /// Reads the file from disk and decodes it with `reader`.
    ///
    /// On failure the file stays unloaded and keeps no layers.
    #[instrument(skip(self, reader), fields(path = %self.path.display()))]
    pub fn load<R: ExrChannelReader>(&mut self, reader: &R) -> Result<()> {
        let data = {
            let _span = tracing::info_span!("read_input_file").entered();
            std::fs::read(&self.path).map_err(|e| {
                ConversionError::InputReadError(format!("{}: {}", self.path.display(), e))
            })?
        };

        let decoded = {
            let _span = tracing::info_span!("decode_exr", input_size = data.len()).entered();
            reader.read_channels(&data)?
        };

        self.load_decoded(decoded)
    }

    /// Groups an already decoded image into layers.
    ///
    /// Prefixed layers come first in alphabetical order, the default layer
    /// holding unprefixed channels comes last.
    pub fn load_decoded(&mut self, image: DecodedImage) -> Result<()> {
        if self.loaded {
            return Err(ConversionError::DecodeError(format!(
                "{} is already loaded",
                self.path.display()
            )));
        }

        let DecodedImage { width, height, channels } = image;
        if width == 0 || height == 0 {
            return Err(ConversionError::InvalidDimensions(width, height));
        }

        let mut grouped: BTreeMap<String, Layer> = BTreeMap::new();
        let mut default_layer: Option<Layer> = None;

        for decoded in channels {
            let (prefix, short_name) = split_channel_name(&decoded.name);
            let channel = Channel::with_samples(short_name, width, height, decoded.samples)?;

            let layer = if prefix.is_empty() {
                default_layer.get_or_insert_with(|| Layer::new(""))
            } else {
                grouped
                    .entry(prefix.to_string())
                    .or_insert_with(|| Layer::new(prefix))
            };
            layer.insert_channel(channel).map_err(|_| {
                ConversionError::DuplicateChannel(decoded.name.clone())
            })?;
        }

        let mut layers: Vec<Layer> = grouped.into_values().collect();
        layers.extend(default_layer);

        let mut index = HashMap::with_capacity(layers.len());
        for (i, layer) in layers.iter_mut().enumerate() {
            layer.adopt(i);
            index.insert(layer.name().to_string(), i);
            debug!(
                layer = layer.name(),
                channels = layer.channel_count(),
                "Grouped layer"
            );
        }

        self.width = width;
        self.height = height;
        self.layers = layers;
        self.index = index;
        self.loaded = true;

        info!(
            width,
            height,
            layers = self.layers.len(),
            "EXR file loaded"
        );
        Ok(())
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn layer(&self, name: &str) -> Option<&Layer> {
        self.index.get(name).map(|&i| &self.layers[i])
    }

    pub fn layer_at(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Looks up a channel by its full dotted name, e.g. `"AO.G"`.
    pub fn find_channel(&self, full_name: &str) -> Option<&Channel> {
        let (prefix, short_name) = split_channel_name(full_name);
        self.layer(prefix)?.channel(short_name)
    }

    pub fn has_channel(&self, full_name: &str) -> bool {
        self.find_channel(full_name).is_some()
    }
}
