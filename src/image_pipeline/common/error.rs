use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("File not loaded in memory")]
    NotLoaded,

    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Failed to decode EXR image: {0}")]
    DecodeError(String),

    #[error("Failed to encode layer: {0}")]
    EncodeError(String),

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("Duplicate channel: {0}")]
    DuplicateChannel(String),

    #[error("Conversion not implemented for layer '{layer}' with channels [{channels}]")]
    UnsupportedLayout { layer: String, channels: String },

    #[error("Failed to create canvas: {0}")]
    CanvasCreationFailed(String),

    #[error("Failed to create layer: {0}")]
    LayerCreationFailed(String),

    #[error("Failed to add layer: {0}")]
    LayerAppendFailed(String),
}

pub type Result<T> = std::result::Result<T, ConversionError>;
