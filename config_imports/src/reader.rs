//! Resource readers: the collaborator that turns identifiers into bytes.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8::Dir};

use crate::resource::normalise_resource;

/// Source of raw document bytes.
///
/// The resolver and the merger call [`ResourceReader::read`] for every resource
/// they touch, so implementations must be deterministic for a fixed identifier.
/// Any closure of the shape `Fn(&Utf8Path) -> io::Result<Vec<u8>>` is a reader.
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use config_imports::ResourceReader;
///
/// let reader = |resource: &Utf8Path| match resource.as_str() {
///     "app.yml" => Ok(b"name: demo".to_vec()),
///     _ => Err(std::io::Error::from(std::io::ErrorKind::NotFound)),
/// };
/// assert!(reader.read(Utf8Path::new("app.yml")).is_ok());
/// assert!(reader.read(Utf8Path::new("missing.yml")).is_err());
/// ```
pub trait ResourceReader {
    /// Read the full contents of `resource`.
    ///
    /// # Errors
    ///
    /// Returns an [`std::io::Error`] when the resource cannot be read.
    fn read(&self, resource: &Utf8Path) -> std::io::Result<Vec<u8>>;

    /// Identity of `resource` used to detect import cycles.
    ///
    /// Identifiers naming the same document should share an identity. The
    /// default collapses `.` and `..` lexically, so aliases introduced outside
    /// the identifier itself (such as symbolic links) are not recognised.
    fn identity(&self, resource: &Utf8Path) -> Utf8PathBuf {
        normalise_resource(resource)
    }
}

impl<F> ResourceReader for F
where
    F: Fn(&Utf8Path) -> std::io::Result<Vec<u8>>,
{
    fn read(&self, resource: &Utf8Path) -> std::io::Result<Vec<u8>> {
        self(resource)
    }
}

/// Reader backed by the local filesystem.
///
/// Identifiers are treated as paths, relative ones resolving against the
/// process working directory. The parent directory is opened through
/// `cap-std` and the file is read relative to that handle. Identities are
/// canonical paths, so symbolic links that loop back are caught as cycles.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsReader;

impl FsReader {
    fn open_parent_dir_and_name(resource: &Utf8Path) -> std::io::Result<(Dir, &str)> {
        let parent = resource
            .parent()
            .filter(|parent| !parent.as_str().is_empty())
            .unwrap_or_else(|| Utf8Path::new("."));
        let file_name = resource.file_name().ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("cannot determine file name for resource '{resource}'"),
            )
        })?;
        let dir = Dir::open_ambient_dir(parent, ambient_authority())?;
        Ok((dir, file_name))
    }
}

impl ResourceReader for FsReader {
    fn read(&self, resource: &Utf8Path) -> std::io::Result<Vec<u8>> {
        let (dir, file_name) = Self::open_parent_dir_and_name(resource)?;
        dir.read(file_name)
    }

    fn identity(&self, resource: &Utf8Path) -> Utf8PathBuf {
        canonicalise(resource)
            .ok()
            .and_then(|canonical| Utf8PathBuf::from_path_buf(canonical).ok())
            .map_or_else(
                || normalise_resource(resource),
                |canonical| normalise_resource(&canonical),
            )
    }
}

fn canonicalise(resource: &Utf8Path) -> std::io::Result<std::path::PathBuf> {
    #[cfg(windows)]
    {
        dunce::canonicalize(resource)
    }
    #[cfg(not(windows))]
    {
        std::fs::canonicalize(resource)
    }
}
