use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Replaces a file's content via a synced sibling temp file and a rename,
/// so readers see either the old content or the new one, never a mix.
pub struct AtomicFile {
    path: PathBuf,
    temp_path: PathBuf,
}

impl AtomicFile {
    pub fn new<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let temp_path = Self::temp_path(&path)?;

        Ok(Self { path, temp_path })
    }

    fn temp_path(path: &Path) -> io::Result<PathBuf> {
        let file_name = path.file_name().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid file path: {}", path.display()),
            )
        })?;

        let temp_name = format!(
            ".{}.tmp.{}",
            file_name.to_string_lossy(),
            std::process::id()
        );

        Ok(path.with_file_name(temp_name))
    }

    pub fn write(&self, content: &[u8]) -> io::Result<()> {
        let result = self.write_temp(content).and_then(|_| fs::rename(&self.temp_path, &self.path));

        if result.is_err() && self.temp_path.exists() {
            let _ = fs::remove_file(&self.temp_path);
        }

        result
    }

    fn write_temp(&self, content: &[u8]) -> io::Result<()> {
        let mut temp_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.temp_path)?;

        temp_file.write_all(content)?;
        temp_file.sync_all()?;

        // Keep the original file's permissions
        if let Ok(metadata) = fs::metadata(&self.path) {
            fs::set_permissions(&self.temp_path, metadata.permissions())?;
        }

        Ok(())
    }
}
