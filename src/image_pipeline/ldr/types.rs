//! LDR conversion configuration and output types

/// Base mode of the destination canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseMode {
    /// Every layer is single-channel luminance (with optional alpha)
    Grayscale,
    /// At least one layer carries color
    Color,
}

impl BaseMode {
    /// Whether a canvas of this mode can hold a layer of `format`.
    pub fn accepts(self, format: LdrPixelFormat) -> bool {
        match self {
            BaseMode::Grayscale => matches!(format, LdrPixelFormat::Gray | LdrPixelFormat::GrayAlpha),
            BaseMode::Color => matches!(format, LdrPixelFormat::Rgb | LdrPixelFormat::Rgba),
        }
    }
}

/// Layout of an 8-bit interleaved output buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LdrPixelFormat {
    /// `[Y, Y, ...]`
    Gray,
    /// `[Y, A, Y, A, ...]`
    GrayAlpha,
    /// `[R, G, B, R, G, B, ...]`
    Rgb,
    /// `[R, G, B, A, R, G, B, A, ...]`
    Rgba,
}

impl LdrPixelFormat {
    pub fn channels(self) -> usize {
        match self {
            LdrPixelFormat::Gray => 1,
            LdrPixelFormat::GrayAlpha => 2,
            LdrPixelFormat::Rgb => 3,
            LdrPixelFormat::Rgba => 4,
        }
    }

    pub fn has_alpha(self) -> bool {
        matches!(self, LdrPixelFormat::GrayAlpha | LdrPixelFormat::Rgba)
    }
}

/// A converted layer, ready to be handed to a sink
#[derive(Debug, Clone, PartialEq)]
pub struct LdrLayer {
    /// Layer name, empty for the default layer
    pub name: String,
    /// Width of the layer in pixels
    pub width: usize,
    /// Height of the layer in pixels
    pub height: usize,
    /// Interpretation of `data`
    pub format: LdrPixelFormat,
    /// Row-major pixels, channels interleaved per pixel
    pub data: Vec<u8>,
}

impl LdrLayer {
    /// Number of bytes `data` must hold for the declared size and format.
    pub fn expected_len(&self) -> usize {
        self.width * self.height * self.format.channels()
    }
}

/// Settings for HDR to LDR conversion
///
/// The tone-mapping knobs are accepted for compatibility with the usual EXR
/// viewer controls, but the conversion is a linear scale-and-clamp and does
/// not apply them.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionSettings {
    /// Display gamma
    pub gamma: f32,
    /// Exposure in stops
    pub exposure: f32,
    /// Lower knee of the highlight compression curve
    pub knee_low: f32,
    /// Upper knee of the highlight compression curve
    pub knee_high: f32,
    /// Defog amount
    pub defog: f32,
    /// Whether to reject zero-sized files before creating a canvas
    pub validate_dimensions: bool,
}

impl Default for ConversionSettings {
    fn default() -> Self {
        Self {
            gamma: 2.2,
            exposure: 0.0,
            knee_low: 0.0,
            knee_high: 5.0,
            defog: 0.0,
            validate_dimensions: true,
        }
    }
}

impl ConversionSettings {
    pub fn builder() -> ConversionSettingsBuilder {
        ConversionSettingsBuilder::default()
    }

    /// Names of the tone-mapping knobs that differ from their defaults.
    pub fn customized_tone_knobs(&self) -> Vec<&'static str> {
        let default = Self::default();
        let mut knobs = Vec::new();
        if self.gamma != default.gamma {
            knobs.push("gamma");
        }
        if self.exposure != default.exposure {
            knobs.push("exposure");
        }
        if self.knee_low != default.knee_low {
            knobs.push("knee_low");
        }
        if self.knee_high != default.knee_high {
            knobs.push("knee_high");
        }
        if self.defog != default.defog {
            knobs.push("defog");
        }
        knobs
    }
}

/// Builder for ConversionSettings
#[derive(Default)]
pub struct ConversionSettingsBuilder {
    gamma: Option<f32>,
    exposure: Option<f32>,
    knee_low: Option<f32>,
    knee_high: Option<f32>,
    defog: Option<f32>,
    validate_dimensions: Option<bool>,
}

impl ConversionSettingsBuilder {
    pub fn gamma(mut self, gamma: f32) -> Self {
        self.gamma = Some(gamma);
        self
    }

    pub fn exposure(mut self, stops: f32) -> Self {
        self.exposure = Some(stops);
        self
    }

    pub fn knee_low(mut self, knee_low: f32) -> Self {
        self.knee_low = Some(knee_low);
        self
    }

    pub fn knee_high(mut self, knee_high: f32) -> Self {
        self.knee_high = Some(knee_high);
        self
    }

    pub fn defog(mut self, defog: f32) -> Self {
        self.defog = Some(defog);
        self
    }

    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn build(self) -> ConversionSettings {
        let default = ConversionSettings::default();
        ConversionSettings {
            gamma: self.gamma.unwrap_or(default.gamma),
            exposure: self.exposure.unwrap_or(default.exposure),
            knee_low: self.knee_low.unwrap_or(default.knee_low),
            knee_high: self.knee_high.unwrap_or(default.knee_high),
            defog: self.defog.unwrap_or(default.defog),
            validate_dimensions: self.validate_dimensions.unwrap_or(default.validate_dimensions),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_builder() {
        let settings = ConversionSettings::builder()
            .gamma(1.8)
            .exposure(-1.0)
            .validate_dimensions(false)
            .build();

        assert_eq!(settings.gamma, 1.8);
        assert_eq!(settings.exposure, -1.0);
        assert_eq!(settings.knee_high, 5.0);
        assert!(!settings.validate_dimensions);
        assert_eq!(settings.customized_tone_knobs(), vec!["gamma", "exposure"]);
    }

    #[test]
    fn default_settings_have_no_custom_knobs() {
        let settings = ConversionSettings::default();
        assert_eq!(settings.gamma, 2.2);
        assert!(settings.customized_tone_knobs().is_empty());
    }

    #[test]
    fn base_mode_accepts_matching_formats() {
        assert!(BaseMode::Grayscale.accepts(LdrPixelFormat::GrayAlpha));
        assert!(!BaseMode::Grayscale.accepts(LdrPixelFormat::Rgb));
        assert!(BaseMode::Color.accepts(LdrPixelFormat::Rgba));
        assert!(!BaseMode::Color.accepts(LdrPixelFormat::Gray));
    }
}
