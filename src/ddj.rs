//! `.ddj` container support.  A DDJ file is a DDS stream behind a fixed 20-byte header:
//!
//! | Offset | Size | Content                         |
//! |--------|------|---------------------------------|
//! | 0      | 9    | `JMXVDDJ 1`                     |
//! | 9      | 3    | `0x30` padding                  |
//! | 12     | 4    | payload size - 1, big-endian    |
//! | 16     | 4    | `03 00 00 00`                   |
//! | 20     | ...  | DDS stream                      |
use std::convert::TryInto;
use std::io::Cursor;
use byteorder::{ByteOrder, ReadBytesExt, BE};
use tracing::{debug, warn};
use crate::error::{FormatError, Result};
use crate::read_from::ReadExt;

pub const MAGIC: &[u8; 9] = b"JMXVDDJ 1";
pub const PADDING: [u8; 3] = [0x30; 3];
pub const TAG: [u8; 4] = [0x03, 0x00, 0x00, 0x00];
pub const HEADER_LEN: usize = 20;


#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DdjHeader {
    /// Raw size field, one less than the payload length it declares.
    pub size_field: u32,
}

impl DdjHeader {
    pub fn for_payload(len: usize) -> DdjHeader {
        let len: u32 = len.try_into().unwrap_or(u32::MAX);
        DdjHeader { size_field: len.saturating_sub(1) }
    }

    /// Parse the header at the start of `data`.  The caller has already checked the magic.
    pub fn parse(data: &[u8]) -> Result<DdjHeader> {
        if data.len() < HEADER_LEN {
            return Err(FormatError::ContainerTooShort(data.len()).into());
        }

        let mut curs = Cursor::new(&data[MAGIC.len() .. HEADER_LEN]);
        let read_err = |_| FormatError::ContainerTooShort(data.len());
        let padding: [u8; 3] = curs.read_one().map_err(read_err)?;
        let size_field = curs.read_u32::<BE>().map_err(read_err)?;
        let tag: [u8; 4] = curs.read_one().map_err(read_err)?;

        if padding != PADDING {
            return Err(FormatError::BadPadding(padding).into());
        }
        if tag != TAG {
            return Err(FormatError::BadTag(tag).into());
        }
        Ok(DdjHeader { size_field })
    }

    pub fn declared_size(&self) -> u64 {
        self.size_field as u64 + 1
    }

    pub fn matches_payload(&self, len: usize) -> bool {
        self.declared_size() == len as u64
    }

    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut buf = [0; HEADER_LEN];
        buf[.. 9].copy_from_slice(MAGIC);
        buf[9 .. 12].copy_from_slice(&PADDING);
        BE::write_u32(&mut buf[12 .. 16], self.size_field);
        buf[16 ..].copy_from_slice(&TAG);
        buf
    }
}


/// Result of stripping the container from an asset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Unwrapped<'a> {
    Container {
        header: DdjHeader,
        payload: &'a [u8],
    },
    /// No DDJ magic; the input is handed back as-is.
    Raw(&'a [u8]),
}

impl<'a> Unwrapped<'a> {
    pub fn payload(&self) -> &'a [u8] {
        match *self {
            Unwrapped::Container { payload, .. } => payload,
            Unwrapped::Raw(data) => data,
        }
    }

    pub fn header(&self) -> Option<DdjHeader> {
        match *self {
            Unwrapped::Container { header, .. } => Some(header),
            Unwrapped::Raw(_) => None,
        }
    }
}


pub fn is_ddj(data: &[u8]) -> bool {
    data.starts_with(MAGIC)
}

/// Strip the DDJ header from `data`, or pass `data` through if it isn't DDJ-wrapped.
pub fn unwrap(data: &[u8]) -> Result<Unwrapped<'_>> {
    if !is_ddj(data) {
        debug!(len = data.len(), "no DDJ magic, passing through");
        return Ok(Unwrapped::Raw(data));
    }

    let header = DdjHeader::parse(data)?;
    let payload = &data[HEADER_LEN ..];
    if !header.matches_payload(payload.len()) {
        warn!(
            declared = header.declared_size(),
            actual = payload.len(),
            "DDJ size field disagrees with payload length"
        );
    }
    debug!(payload_len = payload.len(), "stripped DDJ container");
    Ok(Unwrapped::Container { header, payload })
}

/// Put a DDJ header in front of `payload`.
pub fn wrap(payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(HEADER_LEN + payload.len());
    out.extend_from_slice(&DdjHeader::for_payload(payload.len()).to_bytes());
    out.extend_from_slice(payload);
    out
}
