mod core;

#[cfg(test)]
mod tests;

pub use self::core::{ImageSize, ImageType};
pub use self::core::{from_gif, from_jpeg, from_png, guess_format, strip_data_uri};
