mod common;

use ddj_texture::dds::{BlockFormat, DdsFile};
use ddj_texture::{ddj, decode_texture, Error, ErrorKind, FormatError, UnsupportedFormat};
use rstest::rstest;
use common::{alpha_block, color_block, ddj_with, DdsBuilder};

const WHITE: [u8; 4] = [0xff; 4];

#[test]
fn ddj_wrapped_white_block() {
    let dds = DdsBuilder::new(b"DXT1", 4, 4)
        .block(&color_block(0xffff, 0x0000, 0))
        .build();
    let data = ddj_with(b"000", dds.len() as u32 - 1, &[3, 0, 0, 0], &dds);

    let img = decode_texture(&data).unwrap();
    assert_eq!((img.width(), img.height()), (4, 4));
    assert_eq!(img.into_rgba(), [0xff; 64].to_vec());
}

#[test]
fn plain_dds_decodes_the_same_as_wrapped() {
    let dds = DdsBuilder::new(b"DXT5", 8, 4)
        .block(&alpha_block(255, 0, 0x0000_ffff_0000))
        .block(&color_block(0xf800, 0x001f, 0x5555_5555))
        .block(&alpha_block(0, 255, 0))
        .block(&color_block(0x07e0, 0x0000, 0))
        .build();
    let plain = decode_texture(&dds).unwrap();
    let wrapped = decode_texture(&ddj::wrap(&dds)).unwrap();
    assert_eq!(plain, wrapped);

    // Second block: index 0 of an alpha palette starting at 0.
    assert_eq!(plain.pixel(4, 0), [0, 0xff, 0, 0]);
    // First block: color index 1 everywhere, alpha index 0 for pixel 0 and 7 for pixels 6-9.
    assert_eq!(plain.pixel(0, 0), [0, 0, 0xff, 255]);
    assert_eq!(plain.pixel(2, 1), [0, 0, 0xff, 36]);
}

#[test]
fn odd_sized_texture_is_cropped() {
    let dds = DdsBuilder::new(b"DXT3", 6, 5)
        .block(&[0xff; 8]).block(&color_block(0xffff, 0, 0))
        .block(&[0xff; 8]).block(&color_block(0xffff, 0, 0))
        .block(&[0xff; 8]).block(&color_block(0xffff, 0, 0))
        .block(&[0x00; 8]).block(&color_block(0xffff, 0, 0))
        .build();
    let img = decode_texture(&dds).unwrap();
    assert_eq!(img.size, (6, 5));
    assert_eq!(img.bytes().len(), 6 * 5 * 4);
    assert_eq!(img.pixel(5, 3), WHITE);
    assert_eq!(img.pixel(4, 4), [0xff, 0xff, 0xff, 0]);
}

#[test]
fn extra_mip_levels_are_skipped() {
    let dds = DdsBuilder::new(b"DXT1", 8, 8)
        .mips(4)
        .block(&color_block(0xffff, 0, 0))
        .block(&color_block(0xffff, 0, 0))
        .block(&color_block(0xffff, 0, 0))
        .block(&color_block(0xffff, 0, 0))
        // 4x4, 2x2 and 1x1 levels
        .block(&color_block(0, 0, 0))
        .block(&color_block(0, 0, 0))
        .block(&color_block(0, 0, 0))
        .build();
    let parsed = DdsFile::parse(&dds).unwrap();
    assert_eq!(parsed.header.mip_count, 4);
    assert_eq!(parsed.header.format, BlockFormat::Dxt1);

    let img = decode_texture(&dds).unwrap();
    assert!(img.data.iter().all(|&px| px == WHITE));
}

#[test]
fn truncated_before_last_block() {
    let mut dds = DdsBuilder::new(b"DXT1", 6, 5)
        .block(&[0; 32])
        .build();
    dds.pop();
    let err = decode_texture(&ddj::wrap(&dds)).unwrap_err();
    assert_eq!(err, Error::TruncatedData { needed: 32, available: 31 });
}

#[test]
fn unknown_fourcc_is_unsupported_not_malformed() {
    let dds = DdsBuilder::new(b"BC7\0", 4, 4).block(&[0; 16]).build();
    let err = decode_texture(&ddj::wrap(&dds)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedFormat);
    assert_eq!(err, Error::UnsupportedFormat(UnsupportedFormat::FourCc(*b"BC7\0")));
}

#[rstest]
#[case(ddj_with(b"00 ", 0, &[3, 0, 0, 0], &[]), FormatError::BadPadding(*b"00 "))]
#[case(ddj_with(b"000", 0, &[0, 0, 0, 0], &[]), FormatError::BadTag([0; 4]))]
#[case(b"JMXVDDJ 1000".to_vec(), FormatError::ContainerTooShort(12))]
#[case(ddj::wrap(b"not a dds stream"), FormatError::HeaderTooShort { len: 16, needed: 128 })]
#[case(b"PNG?".to_vec(), FormatError::HeaderTooShort { len: 4, needed: 128 })]
fn corrupt_inputs_are_format_errors(#[case] data: Vec<u8>, #[case] expected: FormatError) {
    let err = decode_texture(&data).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);
    assert_eq!(err, Error::Format(expected));
}

#[test]
fn errors_are_send_and_sync() {
    fn check<T: Send + Sync + std::error::Error + 'static>() {}
    check::<Error>();
}
