//! Error types shared by the container and texture layers.
use std::fmt;
use thiserror::Error;

/// Everything that can go wrong while turning an asset into pixels.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The container or texture header is structurally invalid.
    #[error("malformed texture data: {0}")]
    Format(#[from] FormatError),

    /// The header is well formed but names a pixel format we don't decode.
    #[error("unsupported texture format: {0}")]
    UnsupportedFormat(UnsupportedFormat),

    /// The block data ends before the base level is complete.
    #[error("truncated texture data: needed {needed} bytes, found {available}")]
    TruncatedData {
        needed: usize,
        available: usize,
    },
}

/// The three ways a decode can fail, without the details.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Format,
    UnsupportedFormat,
    TruncatedData,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match *self {
            Error::Format(_) => ErrorKind::Format,
            Error::UnsupportedFormat(_) => ErrorKind::UnsupportedFormat,
            Error::TruncatedData { .. } => ErrorKind::TruncatedData,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("DDJ container is {0} bytes, shorter than its 20-byte header")]
    ContainerTooShort(usize),

    #[error("bad DDJ padding: expected [30, 30, 30], got {0:02X?}")]
    BadPadding([u8; 3]),

    #[error("bad DDJ tag: expected [03, 00, 00, 00], got {0:02X?}")]
    BadTag([u8; 4]),

    #[error("bad DDS magic: expected \"DDS \", got {0:02X?}")]
    BadMagic([u8; 4]),

    #[error("DDS stream is {len} bytes, shorter than its {needed}-byte header")]
    HeaderTooShort {
        len: usize,
        needed: usize,
    },

    #[error("bad DDS header size: {0}")]
    BadHeaderSize(u32),

    #[error("bad DDS pixel format size: {0}")]
    BadPixelFormatSize(u32),

    #[error("texture has zero area: {width}x{height}")]
    ZeroDimension {
        width: u32,
        height: u32,
    },
}

/// A pixel format that the DDS header describes correctly but that has no
/// block decoder here.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnsupportedFormat {
    FourCc([u8; 4]),
    /// DXGI format from a DX10 extension header.
    Dxgi(u32),
    Uncompressed { bit_count: u32 },
    PixelFlags(u32),
}

impl fmt::Display for UnsupportedFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            UnsupportedFormat::FourCc(code) => {
                write!(f, "FourCC \"{}\"", String::from_utf8_lossy(&code).escape_default())
            },
            UnsupportedFormat::Dxgi(format) => write!(f, "DXGI format {}", format),
            UnsupportedFormat::Uncompressed { bit_count } => {
                write!(f, "uncompressed {}-bit RGB", bit_count)
            },
            UnsupportedFormat::PixelFlags(flags) => write!(f, "pixel format flags {:#x}", flags),
        }
    }
}

impl From<UnsupportedFormat> for Error {
    fn from(x: UnsupportedFormat) -> Error {
        Error::UnsupportedFormat(x)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
