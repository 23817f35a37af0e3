//! Preview decoding for DDJ-wrapped and plain DDS textures.
//!
//! [`decode_texture`] takes the raw bytes of an asset, strips the DDJ container if there is one,
//! and decodes the base level of the DXT1/3/5 texture inside into RGBA8 pixels.  The individual
//! layers are available in [`ddj`], [`dds`] and [`dxt`].
pub mod read_from;

pub mod dds;
pub mod ddj;
pub mod dxt;
pub mod error;
pub mod image;

pub use crate::error::{Error, ErrorKind, FormatError, Result, UnsupportedFormat};
pub use crate::image::Image;

use crate::dds::DdsFile;

pub fn decode_texture(data: &[u8]) -> Result<Image> {
    let unwrapped = ddj::unwrap(data)?;
    let dds = DdsFile::parse(unwrapped.payload())?;
    dxt::decode_dds(&dds)
}
