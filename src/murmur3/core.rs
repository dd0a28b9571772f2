//! MurmurHash3, x86 32-bit variant. Non-cryptographic.

const C1: u32 = 0xcc9e_2d51;
const C2: u32 = 0x1b87_3593;

/// Block size used by `fmurmur3` when chaining seeds across a stream.
pub const BLOCK_SIZE: usize = 4096;

#[inline(always)]
fn scramble(k: u32) -> u32 {
    k.wrapping_mul(C1).rotate_left(15).wrapping_mul(C2)
}

#[inline(always)]
fn mix(hash: u32, k: u32) -> u32 {
    (hash ^ scramble(k))
        .rotate_left(13)
        .wrapping_mul(5)
        .wrapping_add(0xe654_6b64)
}

#[inline(always)]
fn fmix(mut hash: u32) -> u32 {
    hash ^= hash >> 16;
    hash = hash.wrapping_mul(0x85eb_ca6b);
    hash ^= hash >> 13;
    hash = hash.wrapping_mul(0xc2b2_ae35);
    hash ^= hash >> 16;
    hash
}

/// Hash a sequence of 32-bit words. No tail handling is needed, the
/// length folded into the finalizer is the byte length (`words.len() * 4`).
///
/// For little-endian input this equals `murmur3_32` over the same bytes.
pub fn murmur3a(words: &[u32], seed: u32) -> u32 {
    let hash = words.iter().fold(seed, |hash, &k| mix(hash, k));
    fmix(hash ^ (words.len() as u32).wrapping_mul(4))
}

/// Hash a byte slice. Blocks are read little-endian; 1-3 trailing bytes
/// are folded in without the rotate/multiply step.
pub fn murmur3_32(bytes: &[u8], seed: u32) -> u32 {
    let mut blocks = bytes.chunks_exact(4);
    let mut hash = (&mut blocks).fold(seed, |hash, block| {
        mix(hash, u32::from_le_bytes([block[0], block[1], block[2], block[3]]))
    });

    let tail = blocks.remainder();
    if !tail.is_empty() {
        let k = tail
            .iter()
            .rev()
            .fold(0u32, |k, &b| (k << 8) | b as u32);
        hash ^= scramble(k);
    }
    fmix(hash ^ bytes.len() as u32)
}

/// Hash `bytes` in consecutive blocks of `block_size`, feeding each block's
/// hash in as the seed of the next. Empty input returns `seed` unchanged.
pub fn murmur3_blocks(bytes: &[u8], block_size: usize, seed: u32) -> u32 {
    bytes
        .chunks(block_size.max(1))
        .fold(seed, |seed, block| murmur3_32(block, seed))
}
