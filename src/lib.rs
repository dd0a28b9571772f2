/// Use mimalloc as the global allocator for all binaries.
/// Faster than glibc malloc for the many small per-file buffers
/// the tools allocate.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

pub mod base64;
pub mod common;
pub mod imagesize;
pub mod murmur3;
