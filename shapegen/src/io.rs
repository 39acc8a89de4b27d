use std::{fs, io, path::PathBuf};

/// Named-buffer sink a finished run is packaged into. Implementations own
/// the actual byte stream; the pipeline only hands them (name, bytes) pairs
/// in archive order.
pub trait ArchiveWriter {
    fn add_file(&mut self, name: &str, bytes: &[u8]) -> io::Result<()>;

    /// Flushes anything buffered; the archive is complete afterwards.
    fn finish(&mut self) -> io::Result<()>;
}

/// Materializes the archive layout as a directory tree on disk.
pub struct DirArchive {
    root: PathBuf,
}

impl DirArchive {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ArchiveWriter for DirArchive {
    fn add_file(&mut self, name: &str, bytes: &[u8]) -> io::Result<()> {
        let path = self.root.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, bytes)
    }

    fn finish(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Collects entries in memory, for tests and for hosts that hand the
/// buffers to a compressing archiver or download sink.
#[derive(Default)]
pub struct MemArchive {
    pub entries: Vec<(String, Vec<u8>)>,
}

impl MemArchive {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ArchiveWriter for MemArchive {
    fn add_file(&mut self, name: &str, bytes: &[u8]) -> io::Result<()> {
        self.entries.push((name.to_string(), bytes.to_vec()));
        Ok(())
    }

    fn finish(&mut self) -> io::Result<()> {
        Ok(())
    }
}
