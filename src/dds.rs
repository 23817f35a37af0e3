//! `.dds` header parsing.  Only the fields needed to locate and decode the base mip level of a
//! DXT1/3/5 texture are read; everything else in the 124-byte header is skipped.
use std::fmt;
use std::io::{Cursor, Seek, SeekFrom};
use tracing::debug;
use crate::error::{Error, FormatError, Result, UnsupportedFormat};
use crate::read_from::ReadExt;

pub const MAGIC: [u8; 4] = *b"DDS ";
pub const HEADER_SIZE: u32 = 124;
pub const PIXEL_FORMAT_SIZE: u32 = 32;
/// Magic plus header.
pub const HEADER_LEN: usize = 128;
pub const DX10_HEADER_LEN: usize = 20;

const HEIGHT_OFFSET: u64 = 0x0c;
const PIXEL_FORMAT_OFFSET: u64 = 0x4c;

const DDPF_FOURCC: u32 = 0x4;
const DDPF_RGB: u32 = 0x40;

const FOURCC_DXT1: [u8; 4] = *b"DXT1";
const FOURCC_DXT3: [u8; 4] = *b"DXT3";
const FOURCC_DXT5: [u8; 4] = *b"DXT5";
const FOURCC_DX10: [u8; 4] = *b"DX10";

const DXGI_FORMAT_BC1_TYPELESS: u32 = 70;
const DXGI_FORMAT_BC1_UNORM_SRGB: u32 = 72;
const DXGI_FORMAT_BC2_TYPELESS: u32 = 73;
const DXGI_FORMAT_BC2_UNORM_SRGB: u32 = 75;
const DXGI_FORMAT_BC3_TYPELESS: u32 = 76;
const DXGI_FORMAT_BC3_UNORM_SRGB: u32 = 78;


/// The S3TC variants we can decode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlockFormat {
    /// Color only, with optional 1-bit transparency.
    Dxt1,
    /// Color plus explicit 4-bit alpha.
    Dxt3,
    /// Color plus interpolated alpha.
    Dxt5,
}

impl BlockFormat {
    /// Bytes per 4x4 block.
    pub fn block_size(self) -> usize {
        match self {
            BlockFormat::Dxt1 => 8,
            BlockFormat::Dxt3 | BlockFormat::Dxt5 => 16,
        }
    }

    pub fn fourcc(self) -> [u8; 4] {
        match self {
            BlockFormat::Dxt1 => FOURCC_DXT1,
            BlockFormat::Dxt3 => FOURCC_DXT3,
            BlockFormat::Dxt5 => FOURCC_DXT5,
        }
    }

    fn from_fourcc(code: [u8; 4]) -> Option<BlockFormat> {
        match code {
            FOURCC_DXT1 => Some(BlockFormat::Dxt1),
            FOURCC_DXT3 => Some(BlockFormat::Dxt3),
            FOURCC_DXT5 => Some(BlockFormat::Dxt5),
            _ => None,
        }
    }

    fn from_dxgi(format: u32) -> Option<BlockFormat> {
        match format {
            DXGI_FORMAT_BC1_TYPELESS ..= DXGI_FORMAT_BC1_UNORM_SRGB => Some(BlockFormat::Dxt1),
            DXGI_FORMAT_BC2_TYPELESS ..= DXGI_FORMAT_BC2_UNORM_SRGB => Some(BlockFormat::Dxt3),
            DXGI_FORMAT_BC3_TYPELESS ..= DXGI_FORMAT_BC3_UNORM_SRGB => Some(BlockFormat::Dxt5),
            _ => None,
        }
    }
}

impl fmt::Display for BlockFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match *self {
            BlockFormat::Dxt1 => "DXT1",
            BlockFormat::Dxt3 => "DXT3",
            BlockFormat::Dxt5 => "DXT5",
        };
        f.write_str(name)
    }
}


#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DdsHeader {
    pub width: u32,
    pub height: u32,
    /// Always at least 1.  Only the first level is ever decoded.
    pub mip_count: u32,
    pub format: BlockFormat,
}

impl DdsHeader {
    /// Blocks in the base level, counting partial blocks at the right and bottom edges.
    pub fn block_count(&self) -> (usize, usize) {
        (blocks_for(self.width), blocks_for(self.height))
    }

    /// Bytes of block data in the base level, or `None` if that doesn't fit in a `usize`.
    pub fn base_level_len(&self) -> Option<usize> {
        let (bw, bh) = self.block_count();
        bw.checked_mul(bh)?.checked_mul(self.format.block_size())
    }
}

pub fn blocks_for(pixels: u32) -> usize {
    (pixels as usize + 3) / 4
}


/// A parsed DDS stream: header plus everything after it.
#[derive(Clone, Copy, Debug)]
pub struct DdsFile<'a> {
    pub header: DdsHeader,
    /// Block data for the base level, followed by any further mip levels.
    pub data: &'a [u8],
}

impl<'a> DdsFile<'a> {
    pub fn parse(data: &'a [u8]) -> Result<DdsFile<'a>> {
        let (header, offset) = read_header(data)?;
        debug!(
            width = header.width,
            height = header.height,
            mips = header.mip_count,
            format = %header.format,
            "parsed DDS header"
        );
        Ok(DdsFile { header, data: &data[offset ..] })
    }
}

fn too_short(len: usize, needed: usize) -> Error {
    FormatError::HeaderTooShort { len, needed }.into()
}

/// Returns the header and the offset of the first block.
fn read_header(data: &[u8]) -> Result<(DdsHeader, usize)> {
    if data.len() < HEADER_LEN {
        return Err(too_short(data.len(), HEADER_LEN));
    }

    let mut curs = Cursor::new(&data[.. HEADER_LEN]);
    let short = |_| too_short(data.len(), HEADER_LEN);

    let magic: [u8; 4] = curs.read_one().map_err(short)?;
    if magic != MAGIC {
        return Err(FormatError::BadMagic(magic).into());
    }
    let (header_size, _flags): (u32, u32) = curs.read_one().map_err(short)?;
    if header_size != HEADER_SIZE {
        return Err(FormatError::BadHeaderSize(header_size).into());
    }

    curs.seek(SeekFrom::Start(HEIGHT_OFFSET)).map_err(short)?;
    let (height, width): (u32, u32) = curs.read_one().map_err(short)?;
    let (_pitch, _depth, mip_count): (u32, u32, u32) = curs.read_one().map_err(short)?;

    curs.seek(SeekFrom::Start(PIXEL_FORMAT_OFFSET)).map_err(short)?;
    let (pf_size, pf_flags): (u32, u32) = curs.read_one().map_err(short)?;
    if pf_size != PIXEL_FORMAT_SIZE {
        return Err(FormatError::BadPixelFormatSize(pf_size).into());
    }
    let fourcc: [u8; 4] = curs.read_one().map_err(short)?;
    let rgb_bit_count: u32 = curs.read_one().map_err(short)?;

    if width == 0 || height == 0 {
        return Err(FormatError::ZeroDimension { width, height }.into());
    }

    let (format, offset) = if pf_flags & DDPF_FOURCC != 0 {
        if fourcc == FOURCC_DX10 {
            (read_dx10_format(data)?, HEADER_LEN + DX10_HEADER_LEN)
        } else {
            let format = BlockFormat::from_fourcc(fourcc)
                .ok_or(UnsupportedFormat::FourCc(fourcc))?;
            (format, HEADER_LEN)
        }
    } else if pf_flags & DDPF_RGB != 0 {
        return Err(UnsupportedFormat::Uncompressed { bit_count: rgb_bit_count }.into());
    } else {
        return Err(UnsupportedFormat::PixelFlags(pf_flags).into());
    };

    let header = DdsHeader {
        width,
        height,
        mip_count: mip_count.max(1),
        format,
    };
    Ok((header, offset))
}

fn read_dx10_format(data: &[u8]) -> Result<BlockFormat> {
    let needed = HEADER_LEN + DX10_HEADER_LEN;
    if data.len() < needed {
        return Err(too_short(data.len(), needed));
    }
    let mut curs = Cursor::new(&data[HEADER_LEN .. needed]);
    let dxgi_format: u32 = curs.read_one().map_err(|_| too_short(data.len(), needed))?;
    BlockFormat::from_dxgi(dxgi_format)
        .ok_or_else(|| UnsupportedFormat::Dxgi(dxgi_format).into())
}
