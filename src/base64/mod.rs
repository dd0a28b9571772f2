mod core;


pub use self::core::{ALPHABET, Cursor, EncodeError, INVALID, PAD};
pub use self::core::{decode, decode_chunk, decode_size, decode_to_vec, symbol_value};
pub use self::core::{encode, encode_size, encode_to_string, encode_to_vec};
