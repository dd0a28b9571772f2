use std::fs::File;
use std::io::{self, Read};
use std::ops::Deref;
use std::path::Path;

use memmap2::{Mmap, MmapOptions};

/// Input bytes, either memory-mapped or owned.
/// Dereferences to `&[u8]`.
pub enum FileData {
    Mmap(Mmap),
    Owned(Vec<u8>),
}

impl Deref for FileData {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            FileData::Mmap(m) => m,
            FileData::Owned(v) => v,
        }
    }
}

/// Files below this size are read; mmap setup costs more than it saves.
const MMAP_THRESHOLD: u64 = 1024 * 1024;

/// Read a whole file, mapping it when it is a large regular file.
pub fn read_file(path: &Path) -> io::Result<FileData> {
    let mut file = File::open(path)?;
    let metadata = file.metadata()?;
    let len = metadata.len();

    if metadata.file_type().is_file() && len >= MMAP_THRESHOLD {
        // SAFETY: read-only mapping; the tools never write to their inputs.
        if let Ok(mmap) = unsafe { MmapOptions::new().map(&file) } {
            #[cfg(target_os = "linux")]
            {
                let _ = mmap.advise(memmap2::Advice::Sequential);
            }
            return Ok(FileData::Mmap(mmap));
        }
    }

    let mut buf = Vec::with_capacity(len as usize);
    file.read_to_end(&mut buf)?;
    Ok(FileData::Owned(buf))
}

/// Read all of stdin.
pub fn read_stdin() -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    io::stdin().lock().read_to_end(&mut buf)?;
    Ok(buf)
}

/// Read `filename`, or stdin when it is `-`.
pub fn read_input(filename: &str) -> io::Result<FileData> {
    if filename == "-" {
        return read_stdin().map(FileData::Owned);
    }
    read_file(Path::new(filename))
}

/// Read as many bytes as possible into `buf`, retrying on partial and
/// interrupted reads. Returns less than `buf.len()` only at EOF.
pub fn read_full(reader: &mut impl Read, buf: &mut [u8]) -> io::Result<usize> {
    let mut total = 0;
    while total < buf.len() {
        match reader.read(&mut buf[total..]) {
            Ok(0) => break,
            Ok(n) => total += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(total)
}
