//! Where the bundled resources come from.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use hashbrown::HashMap;
use tracing::debug;

use crate::error::DatasetError;

/// A read-only store of named resources (`"geo.json"`, `"details/110.json"`, ...).
///
/// Names always use `/` as separator.
pub trait DataSource: Send + Sync {
    /// Read a resource. `Ok(None)` means the resource does not exist.
    fn read(&self, name: &str) -> io::Result<Option<Vec<u8>>>;

    /// Human readable location, used in log messages.
    fn describe(&self) -> String;
}

/// Resources stored as files under a root directory.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl DataSource for DirSource {
    fn read(&self, name: &str) -> io::Result<Option<Vec<u8>>> {
        let path = self.root.join(name);
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}

/// Resources held in memory, e.g. data compiled into the binary with
/// `include_bytes!` or fixtures built by tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    resources: HashMap<String, Vec<u8>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resource, replacing any previous one with the same name.
    pub fn insert(&mut self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.resources.insert(name.into(), bytes.into());
    }

    /// Builder-style [`MemorySource::insert`].
    pub fn with(mut self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(name, bytes);
        self
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

impl DataSource for MemorySource {
    fn read(&self, name: &str) -> io::Result<Option<Vec<u8>>> {
        Ok(self.resources.get(name).cloned())
    }

    fn describe(&self) -> String {
        format!("memory ({} resources)", self.resources.len())
    }
}

/// Read a resource, falling back to a gzip compressed `<name>.gz` copy.
pub(crate) fn read_resource(source: &dyn DataSource, name: &str) -> Result<Vec<u8>, DatasetError> {
    if let Some(bytes) = source.read(name)? {
        return Ok(bytes);
    }

    let gz_name = format!("{}.gz", name);
    match source.read(&gz_name)? {
        Some(compressed) => {
            debug!(resource = %gz_name, "Decompressing gzip resource");
            let mut bytes = Vec::new();
            GzDecoder::new(compressed.as_slice()).read_to_end(&mut bytes)?;
            Ok(bytes)
        }
        None => Err(DatasetError::Missing(PathBuf::from(name))),
    }
}

/// Read a resource and decode it as JSON.
pub(crate) fn read_json<T: serde::de::DeserializeOwned>(
    source: &dyn DataSource,
    name: &str,
) -> Result<T, DatasetError> {
    let bytes = read_resource(source, name)?;
    Ok(serde_json::from_slice(&bytes)?)
}
