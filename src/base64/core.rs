use thiserror::Error;

/// Standard Base64 alphabet (RFC 4648, table 1).
pub const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// Padding symbol used to fill the last group up to 4 symbols.
pub const PAD: u8 = b'=';

/// Byte-wise decode sentinel: the byte is not part of the alphabet.
pub const INVALID: u8 = 0xFF;

/// Fast-path sentinel bit. Survives OR-ing of the four group lookups,
/// so a single test tells whether any symbol of the group was invalid.
const FAST_INVALID: u32 = 1 << 24;

/// Byte -> 6-bit value, `INVALID` for everything outside the alphabet.
const fn make_decode_table() -> [u8; 256] {
    let mut t = [INVALID; 256];
    let mut i = 0;
    while i < ALPHABET.len() {
        t[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    t
}

/// Byte -> 6-bit value pre-shifted into its slot of the 24-bit output word.
const fn make_fast_table(shift: u32) -> [u32; 256] {
    let mut t = [FAST_INVALID; 256];
    let mut i = 0;
    while i < ALPHABET.len() {
        t[ALPHABET[i] as usize] = (i as u32) << shift;
        i += 1;
    }
    t
}

const DECODE_TABLE: [u8; 256] = make_decode_table();

/// One table per symbol position of a group (shifts 18, 12, 6, 0).
const FAST_TABLES: [[u32; 256]; 4] = [
    make_fast_table(18),
    make_fast_table(12),
    make_fast_table(6),
    make_fast_table(0),
];

/// Encoding failed before anything was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("not enough room to encode base64 data: need {needed} bytes, have {available}")]
    InsufficientCapacity { needed: usize, available: usize },
}

/// Source and target positions handed between the fast path and the
/// byte-wise fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub source: usize,
    pub target: usize,
}

/// Exact encoded length of `length` input bytes with padding.
/// Without padding the output is 1 or 2 bytes shorter when `length % 3 != 0`.
#[inline]
pub fn encode_size(length: usize) -> usize {
    length.div_ceil(3) * 4
}

/// Decoded length of `length` encoded symbols.
/// Exact for clean, unpadded input; an upper bound when the input carries
/// padding or bytes outside the alphabet.
#[inline]
pub fn decode_size(length: usize) -> usize {
    let groups = length.div_ceil(4);
    groups * 3 - (groups * 4 - length)
}

/// Look up the 6-bit value of a symbol, `INVALID` if it is not in the alphabet.
#[inline]
pub fn symbol_value(byte: u8) -> u8 {
    DECODE_TABLE[byte as usize]
}

/// Encode `source` into the front of `target`.
///
/// Returns the number of bytes written. `target` must hold at least
/// `encode_size(source.len())` bytes, even when `pad` is false.
pub fn encode(source: &[u8], target: &mut [u8], pad: bool) -> Result<usize, EncodeError> {
    let length = source.len();
    if length == 0 {
        return Ok(0);
    }
    let needed = encode_size(length);
    if target.len() < needed {
        return Err(EncodeError::InsufficientCapacity {
            needed,
            available: target.len(),
        });
    }

    let mut j = 0;
    let mut groups = source.chunks_exact(3);
    for group in &mut groups {
        let acc = (group[0] as u32) << 16 | (group[1] as u32) << 8 | group[2] as u32;
        target[j] = ALPHABET[(acc >> 18) as usize];
        target[j + 1] = ALPHABET[((acc >> 12) & 0x3F) as usize];
        target[j + 2] = ALPHABET[((acc >> 6) & 0x3F) as usize];
        target[j + 3] = ALPHABET[(acc & 0x3F) as usize];
        j += 4;
    }

    match *groups.remainder() {
        [b0, b1] => {
            let acc = ((b0 as u32) << 8 | b1 as u32) << 2;
            target[j] = ALPHABET[(acc >> 12) as usize];
            target[j + 1] = ALPHABET[((acc >> 6) & 0x3F) as usize];
            target[j + 2] = ALPHABET[(acc & 0x3F) as usize];
            j += 3;
            if pad {
                target[j] = PAD;
                j += 1;
            }
        }
        [b0] => {
            let acc = (b0 as u32) << 4;
            target[j] = ALPHABET[(acc >> 6) as usize];
            target[j + 1] = ALPHABET[(acc & 0x3F) as usize];
            j += 2;
            if pad {
                target[j] = PAD;
                target[j + 1] = PAD;
                j += 2;
            }
        }
        _ => {}
    }
    Ok(j)
}

/// Encode into a freshly allocated buffer of the exact output length.
pub fn encode_to_vec(source: &[u8], pad: bool) -> Vec<u8> {
    let mut out = vec![0u8; encode_size(source.len())];
    // The buffer is sized by encode_size, so the capacity check cannot fail.
    let n = encode(source, &mut out, pad).unwrap_or(0);
    out.truncate(n);
    out
}

/// Encode into a `String`. The alphabet and padding are ASCII.
pub fn encode_to_string(source: &[u8], pad: bool) -> String {
    encode_to_vec(source, pad).into_iter().map(char::from).collect()
}

/// Byte-wise decoder for the last partial group and for groups the fast
/// path rejected.
///
/// Scans `source[cursor.source..end]`, skipping bytes outside the alphabet.
/// Returns as soon as four valid symbols have produced three bytes, with the
/// cursor pointing just past the last consumed symbol. When `end` is reached
/// first, the partial group is flushed: two symbols yield one byte, three
/// yield two, a single dangling symbol is dropped.
pub fn decode_chunk(source: &[u8], target: &mut [u8], end: usize, cursor: Cursor) -> Cursor {
    let Cursor {
        source: mut pos,
        target: mut out,
    } = cursor;
    let mut count = 0u32;
    let mut acc = 0u32;

    while pos < end {
        let d = DECODE_TABLE[source[pos] as usize];
        pos += 1;
        if d == INVALID {
            continue;
        }
        acc = acc << 6 | d as u32;
        count += 1;
        if count == 4 {
            target[out] = (acc >> 16) as u8;
            target[out + 1] = (acc >> 8) as u8;
            target[out + 2] = acc as u8;
            return Cursor {
                source: pos,
                target: out + 3,
            };
        }
    }

    match count {
        2 => {
            target[out] = (acc >> 4) as u8;
            out += 1;
        }
        3 => {
            let acc = acc >> 2;
            target[out] = (acc >> 8) as u8;
            target[out + 1] = acc as u8;
            out += 2;
        }
        _ => {}
    }
    Cursor {
        source: pos,
        target: out,
    }
}

/// Decode `source` into the front of `target`, returning the bytes written.
///
/// Decoding is lenient: bytes outside the alphabet (padding, whitespace,
/// line breaks, control bytes) are skipped rather than reported.
///
/// # Panics
///
/// Panics if `target` is shorter than the decoded output. Sizing it with
/// `decode_size(source.len())` is always enough.
pub fn decode(source: &[u8], target: &mut [u8]) -> usize {
    if source.is_empty() {
        return 0;
    }

    let mut end = source.len();
    while end > 0 && DECODE_TABLE[source[end - 1] as usize] == INVALID {
        end -= 1;
    }

    let [dec0, dec1, dec2, dec3] = &FAST_TABLES;
    let mut cursor = Cursor::default();
    while cursor.source + 4 <= end {
        let s = cursor.source;
        let word = dec0[source[s] as usize]
            | dec1[source[s + 1] as usize]
            | dec2[source[s + 2] as usize]
            | dec3[source[s + 3] as usize];
        if word & FAST_INVALID != 0 {
            cursor = decode_chunk(source, target, end, cursor);
            continue;
        }
        let t = cursor.target;
        target[t] = (word >> 16) as u8;
        target[t + 1] = (word >> 8) as u8;
        target[t + 2] = word as u8;
        cursor.source += 4;
        cursor.target += 3;
    }

    decode_chunk(source, target, end, cursor).target
}

/// Decode into a freshly allocated buffer, truncated to the decoded length.
pub fn decode_to_vec(source: &[u8]) -> Vec<u8> {
    let mut out = vec![0u8; decode_size(source.len())];
    let n = decode(source, &mut out);
    out.truncate(n);
    out
}
