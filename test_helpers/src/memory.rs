//! In-memory resource reader for resolver and merger tests.
//!
//! # Examples
//!
//! ```
//! use camino::Utf8Path;
//! use test_helpers::MemoryReader;
//!
//! let reader = MemoryReader::new().with_resource("app.yml", "name: demo");
//! assert_eq!(reader.read(Utf8Path::new("app.yml")).unwrap(), b"name: demo");
//! assert!(reader.read(Utf8Path::new("missing.yml")).is_err());
//! assert_eq!(reader.reads().len(), 2);
//! ```

use camino::{Utf8Path, Utf8PathBuf};
use parking_lot::Mutex;

use std::collections::BTreeMap;

/// Message carried by the error returned for unknown resources.
pub const NOT_FOUND_MESSAGE: &str = "no such resource";

/// Table of resource identifiers to bytes, with a log of attempted reads.
///
/// Lookups are exact: identifiers are not normalised, mirroring a reader that
/// is handed whatever the resolver computed.
#[derive(Debug, Default)]
pub struct MemoryReader {
    resources: BTreeMap<Utf8PathBuf, Vec<u8>>,
    reads: Mutex<Vec<Utf8PathBuf>>,
}

impl MemoryReader {
    /// Create an empty reader.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a reader from `(resource, contents)` pairs.
    #[must_use]
    pub fn from_resources<I, P, C>(resources: I) -> Self
    where
        I: IntoIterator<Item = (P, C)>,
        P: Into<Utf8PathBuf>,
        C: AsRef<[u8]>,
    {
        resources
            .into_iter()
            .fold(Self::new(), |reader, (resource, contents)| {
                reader.with_resource(resource, contents)
            })
    }

    /// Add or replace a resource.
    #[must_use]
    pub fn with_resource(mut self, resource: impl Into<Utf8PathBuf>, contents: impl AsRef<[u8]>) -> Self {
        self.resources
            .insert(resource.into(), contents.as_ref().to_vec());
        self
    }

    /// Read `resource`, recording the attempt.
    ///
    /// # Errors
    ///
    /// Returns [`std::io::ErrorKind::NotFound`] with [`NOT_FOUND_MESSAGE`] when
    /// the resource is unknown.
    pub fn read(&self, resource: &Utf8Path) -> std::io::Result<Vec<u8>> {
        self.reads.lock().push(resource.to_path_buf());
        self.resources.get(resource).cloned().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, NOT_FOUND_MESSAGE)
        })
    }

    /// Every identifier passed to [`MemoryReader::read`], in call order.
    #[must_use]
    pub fn reads(&self) -> Vec<Utf8PathBuf> {
        self.reads.lock().clone()
    }

    /// Number of reads attempted so far.
    #[must_use]
    pub fn read_count(&self) -> usize {
        self.reads.lock().len()
    }
}
