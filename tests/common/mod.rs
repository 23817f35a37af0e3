//! In-memory DDS/DDJ fixtures.
#![allow(dead_code)]

use byteorder::{ByteOrder, WriteBytesExt, LE};

const DDSD_CAPS_HEIGHT_WIDTH_PIXELFORMAT: u32 = 0x1007;
const DDPF_FOURCC: u32 = 0x4;

pub struct DdsBuilder {
    width: u32,
    height: u32,
    mips: u32,
    fourcc: [u8; 4],
    blocks: Vec<u8>,
}

impl DdsBuilder {
    pub fn new(fourcc: &[u8; 4], width: u32, height: u32) -> DdsBuilder {
        DdsBuilder { width, height, mips: 1, fourcc: *fourcc, blocks: Vec::new() }
    }

    pub fn mips(mut self, mips: u32) -> DdsBuilder {
        self.mips = mips;
        self
    }

    pub fn block(mut self, bytes: &[u8]) -> DdsBuilder {
        self.blocks.extend_from_slice(bytes);
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut v = vec![0; 128];
        v[.. 4].copy_from_slice(b"DDS ");
        LE::write_u32(&mut v[4 ..], 124);
        LE::write_u32(&mut v[8 ..], DDSD_CAPS_HEIGHT_WIDTH_PIXELFORMAT);
        LE::write_u32(&mut v[12 ..], self.height);
        LE::write_u32(&mut v[16 ..], self.width);
        LE::write_u32(&mut v[28 ..], self.mips);
        LE::write_u32(&mut v[76 ..], 32);
        LE::write_u32(&mut v[80 ..], DDPF_FOURCC);
        v[84 .. 88].copy_from_slice(&self.fourcc);
        v.extend_from_slice(&self.blocks);
        v
    }
}

/// An 8-byte DXT1 block.
pub fn color_block(color0: u16, color1: u16, indices: u32) -> Vec<u8> {
    let mut v = Vec::with_capacity(8);
    v.write_u16::<LE>(color0).unwrap();
    v.write_u16::<LE>(color1).unwrap();
    v.write_u32::<LE>(indices).unwrap();
    v
}

/// An 8-byte DXT5 alpha block.
pub fn alpha_block(alpha0: u8, alpha1: u8, indices: u64) -> Vec<u8> {
    let mut v = vec![alpha0, alpha1];
    v.write_u48::<LE>(indices).unwrap();
    v
}

/// Container with a hand-written header, for cases `ddj::wrap` can't produce.
pub fn ddj_with(padding: &[u8; 3], size_field: u32, tag: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut v = b"JMXVDDJ 1".to_vec();
    v.extend_from_slice(padding);
    v.write_u32::<byteorder::BE>(size_field).unwrap();
    v.extend_from_slice(tag);
    v.extend_from_slice(payload);
    v
}
