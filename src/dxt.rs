//! S3TC (DXT1/3/5) block decoding.
//!
//! Every block covers a 4x4 tile.  Blocks are read as little-endian words (`u64` for DXT1, `u128`
//! for DXT3/5, alpha half first) and taken apart with shifts and masks.  Pixel `i` of a block sits
//! at `(i % 4, i / 4)`.
use std::io::Cursor;
use crate::dds::{blocks_for, BlockFormat, DdsFile};
use crate::error::{Error, Result};
use crate::image::Image;
use crate::read_from::{ReadExt, ReadFrom};

/// The 16 decoded pixels of one block.
pub type Pixels = [[u8; 4]; 16];

const RED_SHIFT: u32 = 11;
const RED_BITS: u32 = 5;
const GREEN_SHIFT: u32 = 5;
const GREEN_BITS: u32 = 6;
const BLUE_SHIFT: u32 = 0;
const BLUE_BITS: u32 = 5;

const COLOR_INDEX_BITS: u32 = 2;
const SHARP_ALPHA_BITS: u32 = 4;
const ALPHA_INDEX_BITS: u32 = 3;

const OPAQUE: u8 = 0xff;
const TRANSPARENT_BLACK: [u8; 4] = [0; 4];


/// Replicate the low `width` bits of `x` across a byte, high bits first, so that the all-ones
/// value maps to 0xff and zero maps to zero.
fn repeat_bits(x: u64, width: u32) -> u8 {
    let bits = (x & ((1 << width) - 1)) as u32;
    let mut acc = 0;
    let mut pos = 8 - width as i32;
    while pos > -(width as i32) {
        if pos >= 0 {
            acc |= bits << pos;
        } else {
            acc |= bits >> -pos;
        }
        pos -= width as i32;
    }
    acc as u8
}

fn extract_rep(x: u64, pos: u32, width: u32) -> u8 {
    repeat_bits(x >> pos, width)
}

fn extract(x: u64, pos: u32, width: u32) -> usize {
    ((x >> pos) & ((1 << width) - 1)) as usize
}

/// Expand a packed RGB565 value to opaque RGBA8.
pub fn read_color(x: u16) -> [u8; 4] {
    let x = x as u64;
    [
        extract_rep(x, RED_SHIFT, RED_BITS),
        extract_rep(x, GREEN_SHIFT, GREEN_BITS),
        extract_rep(x, BLUE_SHIFT, BLUE_BITS),
        OPAQUE,
    ]
}

/// `(wa * a + wb * b) / (wa + wb)` on the color channels, truncating.
fn mix(a: [u8; 4], b: [u8; 4], wa: u32, wb: u32) -> [u8; 4] {
    let ch = |i: usize| ((wa * a[i] as u32 + wb * b[i] as u32) / (wa + wb)) as u8;
    [ch(0), ch(1), ch(2), OPAQUE]
}


#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct ColorBlock {
    pub color0: u16,
    pub color1: u16,
    /// Sixteen 2-bit palette indices, pixel 0 in the low bits.
    pub indices: u32,
}

impl ColorBlock {
    pub fn from_word(word: u64) -> ColorBlock {
        ColorBlock {
            color0: word as u16,
            color1: (word >> 16) as u16,
            indices: (word >> 32) as u32,
        }
    }

    /// Build the 4-entry palette.  With `punch_through` set (DXT1 only), a block whose first
    /// endpoint is not greater than the second uses three colors plus transparent black.
    pub fn palette(&self, punch_through: bool) -> [[u8; 4]; 4] {
        let c0 = read_color(self.color0);
        let c1 = read_color(self.color1);
        if punch_through && self.color0 <= self.color1 {
            [c0, c1, mix(c0, c1, 1, 1), TRANSPARENT_BLACK]
        } else {
            [c0, c1, mix(c0, c1, 2, 1), mix(c0, c1, 1, 2)]
        }
    }

    pub fn decode(&self, punch_through: bool) -> Pixels {
        let palette = self.palette(punch_through);
        let mut pixels = [[0; 4]; 16];
        for (i, px) in pixels.iter_mut().enumerate() {
            let idx = extract(self.indices as u64, COLOR_INDEX_BITS * i as u32, COLOR_INDEX_BITS);
            *px = palette[idx];
        }
        pixels
    }
}


/// DXT5 alpha: two endpoints and sixteen 3-bit indices.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct AlphaBlock {
    pub alpha0: u8,
    pub alpha1: u8,
    /// 48 bits of indices, pixel 0 in the low bits.
    pub indices: u64,
}

impl AlphaBlock {
    pub fn from_word(word: u64) -> AlphaBlock {
        AlphaBlock {
            alpha0: word as u8,
            alpha1: (word >> 8) as u8,
            indices: word >> 16,
        }
    }

    pub fn palette(&self) -> [u8; 8] {
        let a0 = self.alpha0 as u32;
        let a1 = self.alpha1 as u32;
        let mut table = [self.alpha0, self.alpha1, 0, 0, 0, 0, 0, 0];
        if a0 > a1 {
            for i in 1 .. 7 {
                table[i as usize + 1] = (((7 - i) * a0 + i * a1) / 7) as u8;
            }
        } else {
            for i in 1 .. 5 {
                table[i as usize + 1] = (((5 - i) * a0 + i * a1) / 5) as u8;
            }
            table[6] = 0;
            table[7] = 0xff;
        }
        table
    }

    pub fn decode(&self) -> [u8; 16] {
        let palette = self.palette();
        let mut alpha = [0; 16];
        for (i, a) in alpha.iter_mut().enumerate() {
            *a = palette[extract(self.indices, ALPHA_INDEX_BITS * i as u32, ALPHA_INDEX_BITS)];
        }
        alpha
    }
}

/// DXT3 alpha: one nibble per pixel, low nibble of each byte first.
pub fn decode_sharp_alpha(word: u64) -> [u8; 16] {
    let mut alpha = [0; 16];
    for (i, a) in alpha.iter_mut().enumerate() {
        *a = extract_rep(word, SHARP_ALPHA_BITS * i as u32, SHARP_ALPHA_BITS);
    }
    alpha
}

fn with_alpha(mut pixels: Pixels, alpha: [u8; 16]) -> Pixels {
    for (px, &a) in pixels.iter_mut().zip(alpha.iter()) {
        px[3] = a;
    }
    pixels
}

pub fn decode_dxt1_block(word: u64) -> Pixels {
    ColorBlock::from_word(word).decode(true)
}

pub fn decode_dxt3_block(word: u128) -> Pixels {
    let colors = ColorBlock::from_word((word >> 64) as u64).decode(false);
    with_alpha(colors, decode_sharp_alpha(word as u64))
}

pub fn decode_dxt5_block(word: u128) -> Pixels {
    let colors = ColorBlock::from_word((word >> 64) as u64).decode(false);
    with_alpha(colors, AlphaBlock::from_word(word as u64).decode())
}


/// Decode the base level of a parsed DDS stream.
pub fn decode_dds(dds: &DdsFile) -> Result<Image> {
    decode(dds.header.format, dds.header.width, dds.header.height, dds.data)
}

/// Decode a `w` x `h` texture from `data`, which must hold at least the base level's blocks.
/// Blocks overhanging the right or bottom edge are cropped.
pub fn decode(format: BlockFormat, w: u32, h: u32, data: &[u8]) -> Result<Image> {
    let (bw, bh) = (blocks_for(w), blocks_for(h));
    let count = bw.checked_mul(bh);
    let needed = count.and_then(|n| n.checked_mul(format.block_size()));
    let (count, needed) = match (count, needed) {
        (Some(count), Some(needed)) if needed <= data.len() => (count, needed),
        _ => {
            return Err(Error::TruncatedData {
                needed: needed.unwrap_or(usize::MAX),
                available: data.len(),
            });
        },
    };

    let mut curs = Cursor::new(&data[.. needed]);
    match format {
        BlockFormat::Dxt1 => decode_words(w, h, read_blocks::<u64>(&mut curs, count)?, decode_dxt1_block),
        BlockFormat::Dxt3 => decode_words(w, h, read_blocks::<u128>(&mut curs, count)?, decode_dxt3_block),
        BlockFormat::Dxt5 => decode_words(w, h, read_blocks::<u128>(&mut curs, count)?, decode_dxt5_block),
    }
}

fn read_blocks<T: ReadFrom>(curs: &mut Cursor<&[u8]>, count: usize) -> Result<Vec<T>> {
    let available = curs.get_ref().len();
    curs.read_many(count).map_err(|_| Error::TruncatedData {
        needed: count * std::mem::size_of::<T>(),
        available,
    })
}

fn decode_words<T>(w: u32, h: u32, words: Vec<T>, decode_block: fn(T) -> Pixels) -> Result<Image> {
    let mut image = Image::new(w, h);
    let bw = blocks_for(w);
    for (i, word) in words.into_iter().enumerate() {
        let pixels = decode_block(word);
        write_block(&mut image, i % bw, i / bw, &pixels);
    }
    Ok(image)
}

fn write_block(image: &mut Image, bx: usize, by: usize, pixels: &Pixels) {
    let (w, h) = (image.size.0 as usize, image.size.1 as usize);
    for (i, &px) in pixels.iter().enumerate() {
        let x = bx * 4 + i % 4;
        let y = by * 4 + i / 4;
        if x < w && y < h {
            *image.pixel_mut(x, y) = px;
        }
    }
}
