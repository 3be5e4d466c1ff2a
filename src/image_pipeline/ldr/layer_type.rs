use std::fmt;

use crate::image_pipeline::exr::Layer;

/// Pixel layouts recognized from a layer's channel names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerType {
    Undefined,
    /// Luminance
    Y,
    /// Luminance and alpha
    YA,
    /// Luminance and two chroma planes (`Y`, `RY`, `BY`)
    YC,
    /// Luminance, chroma and alpha
    YCA,
    RGB,
    RGBA,
}

impl LayerType {
    pub fn is_grayscale(self) -> bool {
        matches!(self, LayerType::Y | LayerType::YA)
    }

    pub fn is_defined(self) -> bool {
        self != LayerType::Undefined
    }
}

impl fmt::Display for LayerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LayerType::Undefined => "undefined",
            LayerType::Y => "Y",
            LayerType::YA => "YA",
            LayerType::YC => "YC",
            LayerType::YCA => "YCA",
            LayerType::RGB => "RGB",
            LayerType::RGBA => "RGBA",
        };
        f.write_str(name)
    }
}

const MAX_CHANNELS: usize = 4;

/// Classifies a layer by its channel names.
pub fn classify(layer: &Layer) -> LayerType {
    if layer.channel_count() > MAX_CHANNELS {
        return LayerType::Undefined;
    }
    classify_names(layer.channel_names())
}

/// Classifies a set of channel names.
///
/// All names are concatenated and the characters sorted, so the order the
/// decoder produced the channels in never matters.
pub fn classify_names<'a>(names: impl IntoIterator<Item = &'a str>) -> LayerType {
    let mut chars: Vec<char> = names.into_iter().flat_map(str::chars).collect();
    chars.sort_unstable();
    let sorted: String = chars.into_iter().collect();

    match sorted.as_str() {
        "Y" => LayerType::Y,
        "AY" => LayerType::YA,
        "BRYYY" => LayerType::YC,
        "ABRYYY" => LayerType::YCA,
        "BGR" => LayerType::RGB,
        "ABGR" => LayerType::RGBA,
        _ => LayerType::Undefined,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_pipeline::exr::{Channel, SampleEncoding};

    fn layer_with(names: &[&str]) -> Layer {
        let mut layer = Layer::new("test");
        for name in names {
            layer
                .insert_channel(Channel::new(*name, SampleEncoding::Half16, 1, 1))
                .unwrap();
        }
        layer
    }

    #[test]
    fn recognizes_known_layouts() {
        assert_eq!(classify(&layer_with(&["Y"])), LayerType::Y);
        assert_eq!(classify(&layer_with(&["A", "Y"])), LayerType::YA);
        assert_eq!(classify(&layer_with(&["Y", "RY", "BY"])), LayerType::YC);
        assert_eq!(classify(&layer_with(&["A", "BY", "RY", "Y"])), LayerType::YCA);
        assert_eq!(classify(&layer_with(&["B", "G", "R"])), LayerType::RGB);
        assert_eq!(classify(&layer_with(&["A", "B", "G", "R"])), LayerType::RGBA);
    }

    #[test]
    fn insertion_order_does_not_matter() {
        let orders: [&[&str]; 4] = [
            &["R", "G", "B", "A"],
            &["A", "B", "G", "R"],
            &["G", "A", "R", "B"],
            &["B", "R", "A", "G"],
        ];
        for order in orders {
            assert_eq!(classify(&layer_with(order)), LayerType::RGBA);
        }
        assert_eq!(classify(&layer_with(&["BY", "Y", "RY"])), LayerType::YC);
        assert_eq!(classify(&layer_with(&["Y", "A"])), LayerType::YA);
    }

    #[test]
    fn unknown_sets_are_undefined() {
        assert_eq!(classify(&layer_with(&[])), LayerType::Undefined);
        assert_eq!(classify(&layer_with(&["R", "G"])), LayerType::Undefined);
        assert_eq!(classify(&layer_with(&["Z"])), LayerType::Undefined);
        assert_eq!(classify(&layer_with(&["R", "G", "B", "Y"])), LayerType::Undefined);
        assert_eq!(classify(&layer_with(&["red", "green", "blue"])), LayerType::Undefined);
    }

    #[test]
    fn more_than_four_channels_is_undefined() {
        let layer = layer_with(&["R", "G", "B", "A", "Z"]);
        assert_eq!(classify(&layer), LayerType::Undefined);
    }

    #[test]
    fn grayscale_helpers() {
        assert!(LayerType::Y.is_grayscale());
        assert!(LayerType::YA.is_grayscale());
        assert!(!LayerType::YC.is_grayscale());
        assert!(!LayerType::Undefined.is_defined());
        assert_eq!(LayerType::RGBA.to_string(), "RGBA");
    }
}
