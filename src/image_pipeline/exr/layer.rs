use std::collections::HashMap;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::exr::channel::Channel;

/// Groups the channels that make up one addressable sub-image.
///
/// The default layer (channels without a dotted prefix) has an empty name.
#[derive(Debug, Clone, Default)]
pub struct Layer {
    name: String,
    index: HashMap<String, usize>,
    channels: Vec<Channel>,
}

impl Layer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            index: HashMap::new(),
            channels: Vec::new(),
        }
    }

    /// Appends a channel, rejecting a second channel with the same name.
    pub fn insert_channel(&mut self, channel: Channel) -> Result<()> {
        if self.index.contains_key(channel.name()) {
            return Err(ConversionError::DuplicateChannel(format!(
                "'{}' already present in layer '{}'",
                channel.name(),
                self.name
            )));
        }
        self.index.insert(channel.name().to_string(), self.channels.len());
        self.channels.push(channel);
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_default(&self) -> bool {
        self.name.is_empty()
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    pub fn channel(&self, name: &str) -> Option<&Channel> {
        self.index.get(name).map(|&i| &self.channels[i])
    }

    pub fn channel_at(&self, index: usize) -> Option<&Channel> {
        self.channels.get(index)
    }

    pub fn has_channel(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Channels in insertion order.
    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    pub fn channel_names(&self) -> impl Iterator<Item = &str> {
        self.channels.iter().map(Channel::name)
    }

    pub(crate) fn adopt(&mut self, layer_index: usize) {
        for channel in &mut self.channels {
            channel.set_layer_index(layer_index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_pipeline::exr::types::SampleEncoding;

    #[test]
    fn lookup_by_name_and_index() {
        let mut layer = Layer::new("AO");
        layer.insert_channel(Channel::new("R", SampleEncoding::Float32, 1, 1)).unwrap();
        layer.insert_channel(Channel::new("G", SampleEncoding::Float32, 1, 1)).unwrap();

        assert_eq!(layer.channel_count(), 2);
        assert_eq!(layer.channel("G").map(Channel::name), Some("G"));
        assert_eq!(layer.channel_at(0).map(Channel::name), Some("R"));
        assert!(layer.channel_at(2).is_none());
        assert!(layer.channel("B").is_none());
        assert!(!layer.is_default());
        assert_eq!(layer.channel_names().collect::<Vec<_>>(), vec!["R", "G"]);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut layer = Layer::new("");
        layer.insert_channel(Channel::new("Y", SampleEncoding::Half16, 1, 1)).unwrap();
        let result = layer.insert_channel(Channel::new("Y", SampleEncoding::Float32, 1, 1));

        assert!(matches!(result, Err(ConversionError::DuplicateChannel(_))));
        assert_eq!(layer.channel_count(), 1);
        assert_eq!(layer.channel("Y").unwrap().encoding(), SampleEncoding::Half16);
    }
}
