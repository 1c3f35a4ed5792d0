use crate::error::UmaError;
use std::path::{Path, PathBuf};

/// Supplies one encoded image per paste.
///
/// `Ok(None)` means there is nothing to process right now, which is not an
/// error for the source itself; the session reports it as [`UmaError::NoInput`].
pub trait ImageSource {
    fn acquire(&mut self) -> Result<Option<Vec<u8>>, UmaError>;
}

/// Reads the image from a file. A missing or empty file yields no input.
pub struct FileImageSource {
    path: PathBuf,
}

impl FileImageSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileImageSource { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ImageSource for FileImageSource {
    fn acquire(&mut self) -> Result<Option<Vec<u8>>, UmaError> {
        match std::fs::read(&self.path) {
            Ok(bytes) if bytes.is_empty() => Ok(None),
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_is_no_input() {
        let mut src = FileImageSource::new("/nonexistent/screenshot.png");
        assert!(src.acquire().unwrap().is_none());
    }

    #[test]
    fn test_empty_file_is_no_input() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let mut src = FileImageSource::new(file.path());
        assert!(src.acquire().unwrap().is_none());
    }

    #[test]
    fn test_reads_bytes() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"\x89PNG").unwrap();
        let mut src = FileImageSource::new(file.path());
        assert_eq!(src.acquire().unwrap().as_deref(), Some(&b"\x89PNG"[..]));
    }
}
