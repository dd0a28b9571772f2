use super::*;
use crate::base64::encode_to_vec;

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut data = b"\x89PNG\r\n\x1a\n".to_vec();
    data.extend_from_slice(&13u32.to_be_bytes());
    data.extend_from_slice(b"IHDR");
    data.extend_from_slice(&width.to_be_bytes());
    data.extend_from_slice(&height.to_be_bytes());
    // bit depth, color type, compression, filter, interlace
    data.extend_from_slice(&[8, 6, 0, 0, 0]);
    data
}

fn gif_bytes(version: &[u8; 3], width: u16, height: u16) -> Vec<u8> {
    let mut data = b"GIF".to_vec();
    data.extend_from_slice(version);
    data.extend_from_slice(&width.to_le_bytes());
    data.extend_from_slice(&height.to_le_bytes());
    data.extend_from_slice(&[0xF7, 0, 0]);
    data
}

/// SOI + APP0/JFIF + DQT stub, without a frame header.
fn jpeg_prefix() -> Vec<u8> {
    let mut data = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
    data.extend_from_slice(b"JFIF\0");
    data.extend_from_slice(&[1, 1, 0, 0, 1, 0, 1, 0, 0]);
    data.extend_from_slice(&[0xFF, 0xDB, 0x00, 0x04, 0x00, 0x00]);
    data
}

fn jpeg_bytes(marker: u8, width: u16, height: u16) -> Vec<u8> {
    let mut data = jpeg_prefix();
    data.extend_from_slice(&[0xFF, marker, 0x00, 0x11, 0x08]);
    data.extend_from_slice(&height.to_be_bytes());
    data.extend_from_slice(&width.to_be_bytes());
    data.extend_from_slice(&[0x03, 0x01, 0x22, 0x00]);
    data.extend_from_slice(&[0xFF, 0xD9]);
    data
}

fn size(width: i32, height: i32, kind: ImageType) -> ImageSize {
    ImageSize {
        width,
        height,
        kind,
    }
}

// ===== PNG TESTS =====

#[test]
fn test_png_raw() {
    let data = png_bytes(72, 48);
    assert_eq!(from_png(&data, false), size(72, 48, ImageType::Png));
}

#[test]
fn test_png_minimal_header() {
    let data = png_bytes(148, 148);
    assert_eq!(from_png(&data[..24], false), size(148, 148, ImageType::Png));
}

#[test]
fn test_png_base64() {
    let encoded = encode_to_vec(&png_bytes(3264, 2448), true);
    assert!(encoded.starts_with(b"iVBORw0K"));
    assert_eq!(from_png(&encoded, true), size(3264, 2448, ImageType::Png));
}

#[test]
fn test_png_truncated() {
    let data = png_bytes(72, 48);
    assert_eq!(from_png(&data[..20], false), ImageSize::INVALID);
    let encoded = encode_to_vec(&data[..20], true);
    assert_eq!(from_png(&encoded, true), ImageSize::INVALID);
}

#[test]
fn test_png_corrupted_signature() {
    let mut data = png_bytes(72, 48);
    data[1] = b'Q';
    assert_eq!(from_png(&data, false), ImageSize::INVALID);
}

#[test]
fn test_png_missing_ihdr() {
    let mut data = png_bytes(72, 48);
    data[12..16].copy_from_slice(b"IDAT");
    assert_eq!(from_png(&data, false), ImageSize::INVALID);
}

#[test]
fn test_png_base64_noise_in_header_window() {
    // a line break inside the first 32 symbols leaves the window one symbol short
    let mut encoded = encode_to_vec(&png_bytes(72, 48), true);
    encoded.insert(10, b'\n');
    assert_eq!(from_png(&encoded, true), ImageSize::INVALID);
}

// ===== GIF TESTS =====

#[test]
fn test_gif_raw() {
    assert_eq!(
        from_gif(&gif_bytes(b"89a", 72, 48), false),
        size(72, 48, ImageType::Gif)
    );
    assert_eq!(
        from_gif(&gif_bytes(b"87a", 640, 480), false),
        size(640, 480, ImageType::Gif)
    );
}

#[test]
fn test_gif_base64() {
    let encoded = encode_to_vec(&gif_bytes(b"89a", 500, 300), true);
    assert!(encoded.starts_with(b"R0lG"));
    assert_eq!(from_gif(&encoded, true), size(500, 300, ImageType::Gif));
}

#[test]
fn test_gif_bad_version() {
    assert_eq!(from_gif(&gif_bytes(b"88a", 72, 48), false), ImageSize::INVALID);
}

#[test]
fn test_gif_truncated() {
    let data = gif_bytes(b"89a", 72, 48);
    assert_eq!(from_gif(&data[..9], false), ImageSize::INVALID);
    let encoded = encode_to_vec(&data[..9], true);
    assert_eq!(from_gif(&encoded, true), ImageSize::INVALID);
}

// ===== JPEG TESTS =====

#[test]
fn test_jpeg_sof0() {
    let data = jpeg_bytes(0xC0, 800, 600);
    assert_eq!(from_jpeg(&data, false), size(800, 600, ImageType::Jpeg));
}

#[test]
fn test_jpeg_sof2_progressive() {
    let data = jpeg_bytes(0xC2, 6000, 4000);
    assert_eq!(from_jpeg(&data, false), size(6000, 4000, ImageType::Jpeg));
}

#[test]
fn test_jpeg_exif() {
    let mut data = jpeg_bytes(0xC0, 8, 8);
    data[3] = 0xE1;
    data[6..11].copy_from_slice(b"Exif\0");
    assert_eq!(from_jpeg(&data, false), size(8, 8, ImageType::Jpeg));
}

#[test]
fn test_jpeg_base64() {
    let encoded = encode_to_vec(&jpeg_bytes(0xC0, 72, 48), true);
    assert!(encoded.starts_with(b"/9j/"));
    assert_eq!(from_jpeg(&encoded, true), size(72, 48, ImageType::Jpeg));
}

#[test]
fn test_jpeg_base64_line_wrapped() {
    let encoded = encode_to_vec(&jpeg_bytes(0xC0, 72, 48), true);
    let mut wrapped = Vec::new();
    for line in encoded.chunks(8) {
        wrapped.extend_from_slice(line);
        wrapped.push(b'\n');
    }
    assert_eq!(from_jpeg(&wrapped, true), size(72, 48, ImageType::Jpeg));
}

#[test]
fn test_jpeg_without_frame_header() {
    assert_eq!(from_jpeg(&jpeg_prefix(), false), size(-1, -1, ImageType::Jpeg));
}

#[test]
fn test_jpeg_truncated_frame_header() {
    let mut data = jpeg_prefix();
    data.extend_from_slice(&[0xFF, 0xC0, 0x00, 0x11, 0x08]);
    assert_eq!(from_jpeg(&data, false), ImageSize::INVALID);
}

#[test]
fn test_jpeg_bad_segment_start() {
    let mut data = jpeg_prefix();
    data.extend_from_slice(&[0x00, 0xC0, 0x00, 0x11, 0x08, 0, 1, 0, 1]);
    assert_eq!(from_jpeg(&data, false), ImageSize::INVALID);
}

#[test]
fn test_jpeg_bad_identifier() {
    let mut data = jpeg_bytes(0xC0, 72, 48);
    data[6..11].copy_from_slice(b"JFXX\0");
    assert_eq!(from_jpeg(&data, false), ImageSize::INVALID);
}

#[test]
fn test_jpeg_too_short() {
    assert_eq!(from_jpeg(&[0xFF, 0xD8, 0xFF, 0xE0], false), ImageSize::INVALID);
    assert_eq!(from_jpeg(b"/9j/", true), ImageSize::INVALID);
}

// ===== DISPATCH TESTS =====

#[test]
fn test_guess_format_raw() {
    assert_eq!(guess_format(&png_bytes(1, 2), false), size(1, 2, ImageType::Png));
    assert_eq!(guess_format(&gif_bytes(b"89a", 3, 4), false), size(3, 4, ImageType::Gif));
    assert_eq!(guess_format(&jpeg_bytes(0xC0, 5, 6), false), size(5, 6, ImageType::Jpeg));
}

#[test]
fn test_guess_format_base64() {
    let png = encode_to_vec(&png_bytes(1, 2), true);
    let gif = encode_to_vec(&gif_bytes(b"89a", 3, 4), true);
    let jpeg = encode_to_vec(&jpeg_bytes(0xC2, 5, 6), true);
    assert_eq!(guess_format(&png, true), size(1, 2, ImageType::Png));
    assert_eq!(guess_format(&gif, true), size(3, 4, ImageType::Gif));
    assert_eq!(guess_format(&jpeg, true), size(5, 6, ImageType::Jpeg));
}

#[test]
fn test_guess_format_unknown() {
    assert_eq!(guess_format(b"", false), ImageSize::INVALID);
    assert_eq!(guess_format(b"", true), ImageSize::INVALID);
    assert_eq!(guess_format(b"BM\x00\x00", false), ImageSize::INVALID);
    // raw PNG bytes are not valid in base64 mode
    assert_eq!(guess_format(&png_bytes(1, 2), true), ImageSize::INVALID);
}

#[test]
fn test_dimensions() {
    assert_eq!(size(72, 48, ImageType::Png).dimensions(), Some((72, 48)));
    assert_eq!(size(-1, -1, ImageType::Jpeg).dimensions(), None);
    assert_eq!(ImageSize::INVALID.dimensions(), None);
}

#[test]
fn test_type_names() {
    assert_eq!(ImageType::Jpeg.name(), "JPEG");
    assert_eq!(ImageType::Invalid.name(), "INVALID");
}

// ===== DATA URI TESTS =====

#[test]
fn test_strip_data_uri() {
    assert_eq!(strip_data_uri(b"data:image/png;base64,iVBORw0K"), b"iVBORw0K");
    assert_eq!(strip_data_uri(b"iVBORw0K"), b"iVBORw0K");
    assert_eq!(strip_data_uri(b"data:broken"), b"data:broken");
}

#[test]
fn test_data_uri_roundtrip() {
    let mut uri = b"data:image/gif;base64,".to_vec();
    uri.extend_from_slice(&encode_to_vec(&gif_bytes(b"89a", 16, 16), true));
    assert_eq!(
        guess_format(strip_data_uri(&uri), true),
        size(16, 16, ImageType::Gif)
    );
}
