mod core;


pub use self::core::{BLOCK_SIZE, murmur3_32, murmur3_blocks, murmur3a};
