use crate::base64;

/// Image formats recognized by the header sniffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageType {
    Jpeg,
    Png,
    Gif,
    /// The data did not pass the header checks.
    Invalid,
}

impl ImageType {
    pub fn name(self) -> &'static str {
        match self {
            ImageType::Jpeg => "JPEG",
            ImageType::Png => "PNG",
            ImageType::Gif => "GIF",
            ImageType::Invalid => "INVALID",
        }
    }
}

/// Result of a header sniff.
///
/// `width`/`height` are -1 when the dimensions could not be determined.
/// PNG and GIF have fixed-size headers, so -1 there always comes with
/// `Invalid`. A JPEG may pass the header checks and still report -1 if no
/// SOF0/SOF2 frame was found within the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSize {
    pub width: i32,
    pub height: i32,
    pub kind: ImageType,
}

impl ImageSize {
    pub const INVALID: ImageSize = ImageSize {
        width: -1,
        height: -1,
        kind: ImageType::Invalid,
    };

    /// Width and height, if both are known and non-negative.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        if self.width < 0 || self.height < 0 {
            return None;
        }
        Some((self.width as u32, self.height as u32))
    }
}

/// Encoded PNG prefix "iVBO" (the signature encodes to "iVBORw0K").
const PNG_BASE64_MAGIC: &[u8; 4] = b"iVBO";
const PNG_SIGNATURE: &[u8; 8] = b"\x89PNG\r\n\x1a\n";
/// 32 symbols decode to the 24 bytes holding signature, IHDR and dimensions.
const PNG_BASE64_HEADER: usize = 32;
const PNG_HEADER: usize = 24;

const GIF_BASE64_MAGIC: &[u8; 4] = b"R0lG";
/// 16 symbols decode to 12 bytes; 10 are needed.
const GIF_BASE64_HEADER: usize = 16;
const GIF_DECODED_HEADER: usize = 12;
const GIF_HEADER: usize = 10;

const JPEG_BASE64_MAGIC: &[u8; 4] = b"/9j/";
const JPEG_MIN_LEN: usize = 10;

#[inline]
fn be16(data: &[u8], i: usize) -> Option<usize> {
    let hi = *data.get(i)?;
    let lo = *data.get(i + 1)?;
    Some(((hi as usize) << 8) | lo as usize)
}

/// Sniff PNG dimensions. With `base64` set, only the first 32 symbols are decoded.
pub fn from_png(data: &[u8], base64: bool) -> ImageSize {
    if base64 {
        if data.len() < PNG_BASE64_HEADER || !data.starts_with(PNG_BASE64_MAGIC) {
            return ImageSize::INVALID;
        }
        let mut header = [0u8; PNG_HEADER];
        if base64::decode(&data[..PNG_BASE64_HEADER], &mut header) != PNG_HEADER {
            return ImageSize::INVALID;
        }
        return png_header(&header);
    }
    png_header(data)
}

fn png_header(data: &[u8]) -> ImageSize {
    if data.len() < PNG_HEADER || !data.starts_with(PNG_SIGNATURE) {
        return ImageSize::INVALID;
    }
    // first chunk must be IHDR
    if &data[12..16] != b"IHDR" {
        return ImageSize::INVALID;
    }
    ImageSize {
        width: i32::from_be_bytes([data[16], data[17], data[18], data[19]]),
        height: i32::from_be_bytes([data[20], data[21], data[22], data[23]]),
        kind: ImageType::Png,
    }
}

/// Sniff GIF dimensions. With `base64` set, only the first 16 symbols are decoded.
pub fn from_gif(data: &[u8], base64: bool) -> ImageSize {
    if base64 {
        if data.len() < GIF_BASE64_HEADER || !data.starts_with(GIF_BASE64_MAGIC) {
            return ImageSize::INVALID;
        }
        let mut header = [0u8; GIF_DECODED_HEADER];
        if base64::decode(&data[..GIF_BASE64_HEADER], &mut header) != GIF_DECODED_HEADER {
            return ImageSize::INVALID;
        }
        return gif_header(&header);
    }
    gif_header(data)
}

fn gif_header(data: &[u8]) -> ImageSize {
    if data.len() < GIF_HEADER || !data.starts_with(b"GIF") {
        return ImageSize::INVALID;
    }
    // "87a" or "89a"
    if data[3] != b'8' || (data[4] != b'7' && data[4] != b'9') || data[5] != b'a' {
        return ImageSize::INVALID;
    }
    ImageSize {
        width: u16::from_le_bytes([data[6], data[7]]) as i32,
        height: u16::from_le_bytes([data[8], data[9]]) as i32,
        kind: ImageType::Gif,
    }
}

/// Sniff JPEG dimensions by walking the segment list up to the first
/// SOF0/SOF2 frame.
///
/// With `base64` set the whole payload is decoded, since segment walking
/// needs to see everything up to the frame header.
pub fn from_jpeg(data: &[u8], base64: bool) -> ImageSize {
    if base64 {
        if !data.starts_with(JPEG_BASE64_MAGIC) {
            return ImageSize::INVALID;
        }
        let decoded = base64::decode_to_vec(data);
        return jpeg_segments(&decoded);
    }
    jpeg_segments(data)
}

fn jpeg_segments(data: &[u8]) -> ImageSize {
    let length = data.len();
    if length < JPEG_MIN_LEN {
        return ImageSize::INVALID;
    }
    // SOI followed by APP0 (JFIF) or APP1 (Exif)
    if data[0] != 0xFF || data[1] != 0xD8 || data[2] != 0xFF || (data[3] != 0xE0 && data[3] != 0xE1) {
        return ImageSize::INVALID;
    }
    let mut i = 4;
    let ident = data.get(i + 2..i + 7).unwrap_or_default();
    if ident != b"JFIF\0" && ident != b"Exif\0" {
        return ImageSize::INVALID;
    }

    let mut block_length = be16(data, i).unwrap_or(0);
    loop {
        i += block_length;
        if i >= length {
            // exhausted without a frame header
            return ImageSize {
                kind: ImageType::Jpeg,
                ..ImageSize::INVALID
            };
        }
        if data[i] != 0xFF {
            return ImageSize::INVALID;
        }
        match data.get(i + 1).copied() {
            Some(0xC0) | Some(0xC2) => {
                if i + 8 >= length {
                    return ImageSize::INVALID;
                }
                return ImageSize {
                    width: ((data[i + 7] as i32) << 8) | data[i + 8] as i32,
                    height: ((data[i + 5] as i32) << 8) | data[i + 6] as i32,
                    kind: ImageType::Jpeg,
                };
            }
            _ => {
                i += 2;
                // a truncated length field ends the walk on the next round
                block_length = be16(data, i).unwrap_or(length);
            }
        }
    }
}

/// Pick a sniffer from the first byte and run it.
pub fn guess_format(data: &[u8], base64: bool) -> ImageSize {
    let Some(&first) = data.first() else {
        return ImageSize::INVALID;
    };
    match (base64, first) {
        (true, b'/') => from_jpeg(data, true),
        (true, b'i') => from_png(data, true),
        (true, b'R') => from_gif(data, true),
        (false, 0xFF) => from_jpeg(data, false),
        (false, 0x89) => from_png(data, false),
        (false, b'G') => from_gif(data, false),
        _ => ImageSize::INVALID,
    }
}

/// Return the payload of a `data:` URI (everything after the first comma),
/// or the input unchanged when it is not a data URI.
pub fn strip_data_uri(data: &[u8]) -> &[u8] {
    if !data.starts_with(b"data:") {
        return data;
    }
    match memchr::memchr(b',', data) {
        Some(pos) => &data[pos + 1..],
        None => data,
    }
}
