use std::io::{self, Write};
use std::slice;

/// Decoded RGBA8 pixels, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    pub size: (u32, u32),
    pub data: Box<[[u8; 4]]>,
}

impl Image {
    pub fn new(w: u32, h: u32) -> Image {
        let size = w as usize * h as usize;
        Image {
            size: (w, h),
            data: vec![[0; 4]; size].into_boxed_slice(),
        }
    }

    pub fn width(&self) -> u32 {
        self.size.0
    }

    pub fn height(&self) -> u32 {
        self.size.1
    }

    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        self.data[self.index(x, y)]
    }

    pub fn pixel_mut(&mut self, x: usize, y: usize) -> &mut [u8; 4] {
        let idx = self.index(x, y);
        &mut self.data[idx]
    }

    fn index(&self, x: usize, y: usize) -> usize {
        assert!(x < self.size.0 as usize);
        assert!(y < self.size.1 as usize);
        y * self.size.0 as usize + x
    }

    pub fn bytes(&self) -> &[u8] {
        // `[u8; 4]` has no padding and alignment 1.
        unsafe {
            let byte_len = self.data.len() * 4;
            slice::from_raw_parts(self.data.as_ptr() as *const u8, byte_len)
        }
    }

    /// Flatten into `width * height * 4` bytes.
    pub fn into_rgba(self) -> Vec<u8> {
        self.bytes().to_vec()
    }

    pub fn write_raw<W: Write>(&self, w: W) -> io::Result<()> {
        let mut w = w;
        w.write_all(self.bytes())
    }

    pub fn write_png<W: Write>(&self, w: W) -> io::Result<()> {
        let mut enc = png::Encoder::new(w, self.size.0, self.size.1);
        enc.set_color(png::ColorType::RGBA);
        enc.set_depth(png::BitDepth::Eight);
        let mut writer = enc.write_header()?;
        writer.write_image_data(self.bytes())?;
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_follow_row_major_order() {
        let mut img = Image::new(2, 2);
        *img.pixel_mut(1, 0) = [1, 2, 3, 4];
        *img.pixel_mut(0, 1) = [5, 6, 7, 8];
        assert_eq!(img.bytes(), &[
            0, 0, 0, 0,  1, 2, 3, 4,
            5, 6, 7, 8,  0, 0, 0, 0,
        ]);
        assert_eq!(img.pixel(1, 0), [1, 2, 3, 4]);
        assert_eq!(img.into_rgba().len(), 16);
    }

    #[test]
    #[should_panic]
    fn pixel_outside_image_panics() {
        let img = Image::new(3, 3);
        img.pixel(3, 0);
    }

    #[test]
    fn png_output_has_signature() {
        let img = Image::new(4, 4);
        let mut buf = Vec::new();
        img.write_png(&mut buf).unwrap();
        assert_eq!(&buf[..8], b"\x89PNG\r\n\x1a\n");
    }
}
