use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::exr::types::DecodedImage;

pub trait ExrChannelReader {
    fn read_channels(&self, data: &[u8]) -> Result<DecodedImage>;
}
