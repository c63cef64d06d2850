pub mod atomic;
pub mod backup;
pub mod discover;

pub use atomic::AtomicFile;
pub use backup::create_backup;
pub use discover::{discover, SourceFile};

use std::fs;
use std::io;
use std::path::Path;

/// Reads a file as text, replacing invalid UTF-8 sequences instead of failing
pub fn read_lossy(path: &Path) -> io::Result<String> {
    let bytes = fs::read(path)?;
    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    })
}
