//! Artifact sinks for generated bundle files
//!
//! Generation produces named byte buffers and hands them to a sink; where
//! and how they land is the sink's concern. [`TarGzSink`] is the production
//! path, [`DirSink`] lays the same files out in a directory for inspection,
//! and [`MemorySink`] backs tests.

use std::fs;
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;
use tracing::debug;

use kubeforge_core::error::{KubeforgeError, KubeforgeResult};

/// Destination for generated bundle files.
pub trait ArtifactSink {
    /// Stage a named file. Staging a name that was already staged replaces
    /// the earlier contents in place, keeping the first-staged position.
    fn add_file(&mut self, name: &str, contents: &[u8]) -> KubeforgeResult<()>;

    /// Flush everything staged. No files may be added afterwards.
    fn finish(&mut self) -> KubeforgeResult<()>;
}

fn stage(entries: &mut Vec<(String, Vec<u8>)>, name: &str, contents: &[u8]) {
    if let Some(entry) = entries.iter_mut().find(|(existing, _)| existing == name) {
        entry.1 = contents.to_vec();
    } else {
        entries.push((name.to_string(), contents.to_vec()));
    }
}

/// Writes staged files into a gzip-compressed tar archive on `finish`.
pub struct TarGzSink {
    output_path: PathBuf,
    entries: Vec<(String, Vec<u8>)>,
    finished: bool,
}

impl TarGzSink {
    pub fn new<P: AsRef<Path>>(output_path: P) -> Self {
        Self {
            output_path: output_path.as_ref().to_path_buf(),
            entries: Vec::new(),
            finished: false,
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }
}

impl ArtifactSink for TarGzSink {
    fn add_file(&mut self, name: &str, contents: &[u8]) -> KubeforgeResult<()> {
        if self.finished {
            return Err(KubeforgeError::Artifact {
                message: format!(
                    "Archive {} is already finalized",
                    self.output_path.display()
                ),
            });
        }
        stage(&mut self.entries, name, contents);
        Ok(())
    }

    fn finish(&mut self) -> KubeforgeResult<()> {
        if self.finished {
            return Err(KubeforgeError::Artifact {
                message: format!(
                    "Archive {} is already finalized",
                    self.output_path.display()
                ),
            });
        }

        if let Some(parent) = self.output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = fs::File::create(&self.output_path)?;
        let encoder = GzEncoder::new(file, Compression::default());
        let mut builder = tar::Builder::new(encoder);

        for (name, contents) in &self.entries {
            let mut header = tar::Header::new_gnu();
            header.set_entry_type(tar::EntryType::Regular);
            header.set_mode(0o644);
            header.set_size(contents.len() as u64);
            // Fixed mtime keeps repeated runs byte-identical.
            header.set_mtime(0);
            header.set_cksum();
            builder.append_data(&mut header, name, contents.as_slice())?;
        }

        builder.finish()?;
        let encoder = builder.into_inner()?;
        encoder.finish()?;

        self.finished = true;
        debug!("Bundle archive written to {:?}", self.output_path);
        Ok(())
    }
}

/// Writes staged files as plain files under a directory on `finish`.
pub struct DirSink {
    output_dir: PathBuf,
    entries: Vec<(String, Vec<u8>)>,
    finished: bool,
}

impl DirSink {
    pub fn new<P: AsRef<Path>>(output_dir: P) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
            entries: Vec::new(),
            finished: false,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

impl ArtifactSink for DirSink {
    fn add_file(&mut self, name: &str, contents: &[u8]) -> KubeforgeResult<()> {
        if self.finished {
            return Err(KubeforgeError::Artifact {
                message: format!(
                    "Output directory {} is already finalized",
                    self.output_dir.display()
                ),
            });
        }
        stage(&mut self.entries, name, contents);
        Ok(())
    }

    fn finish(&mut self) -> KubeforgeResult<()> {
        if self.finished {
            return Err(KubeforgeError::Artifact {
                message: format!(
                    "Output directory {} is already finalized",
                    self.output_dir.display()
                ),
            });
        }

        fs::create_dir_all(&self.output_dir)?;
        for (name, contents) in &self.entries {
            fs::write(self.output_dir.join(name), contents)?;
        }

        self.finished = true;
        debug!("Bundle files written to {:?}", self.output_dir);
        Ok(())
    }
}

/// Keeps staged files in memory, for tests and previews.
#[derive(Default)]
pub struct MemorySink {
    entries: Vec<(String, Vec<u8>)>,
    finished: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Staged files in staging order.
    pub fn files(&self) -> &[(String, Vec<u8>)] {
        &self.entries
    }

    pub fn contents_of(&self, name: &str) -> Option<&[u8]> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, contents)| contents.as_slice())
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl ArtifactSink for MemorySink {
    fn add_file(&mut self, name: &str, contents: &[u8]) -> KubeforgeResult<()> {
        if self.finished {
            return Err(KubeforgeError::Artifact {
                message: "Memory sink is already finalized".to_string(),
            });
        }
        stage(&mut self.entries, name, contents);
        Ok(())
    }

    fn finish(&mut self) -> KubeforgeResult<()> {
        if self.finished {
            return Err(KubeforgeError::Artifact {
                message: "Memory sink is already finalized".to_string(),
            });
        }
        self.finished = true;
        Ok(())
    }
}
