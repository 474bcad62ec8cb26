//! Entry points: the configurable [`ImportLoader`] and [`process_with_imports`].

use camino::Utf8Path;
use tracing::debug;

use crate::document::DocumentSyntax;
use crate::merge::{apply_layers, ensure_record};
use crate::overlay::Overlay;
use crate::reader::{FsReader, ResourceReader};
use crate::resolve::resolve_imports;
use crate::sequence::ImportSequence;
use crate::ImportResult;

/// Resolves import trees and layers them onto destinations.
///
/// The loader owns its [`ResourceReader`] and the syntax used for resources
/// whose extension does not identify one.
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use config_imports::{ImportLoader, Overlay};
///
/// #[derive(Default, Overlay)]
/// struct AppConfig {
///     name: String,
///     workers: u8,
/// }
///
/// let reader = |resource: &Utf8Path| match resource.as_str() {
///     "conf/app.yml" => Ok(b"imports:\n  - resource: base.yml\nname: app\n".to_vec()),
///     "conf/base.yml" => Ok(b"name: base\nworkers: 4\n".to_vec()),
///     _ => Err(std::io::Error::from(std::io::ErrorKind::NotFound)),
/// };
///
/// let mut config = AppConfig::default();
/// ImportLoader::with_reader(reader).load_into("conf/app.yml", &mut config)?;
/// assert_eq!(config.name, "app");
/// assert_eq!(config.workers, 4);
/// # Ok::<_, std::sync::Arc<config_imports::ImportError>>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct ImportLoader<R = FsReader> {
    reader: R,
    default_syntax: DocumentSyntax,
}

impl ImportLoader {
    /// Loader reading resources from the local filesystem.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<R: ResourceReader> ImportLoader<R> {
    /// Loader reading resources through `reader`.
    #[must_use]
    pub fn with_reader(reader: R) -> Self {
        Self {
            reader,
            default_syntax: DocumentSyntax::default(),
        }
    }

    /// Syntax used for resources whose extension does not identify one.
    #[must_use]
    pub const fn default_format(mut self, syntax: DocumentSyntax) -> Self {
        self.default_syntax = syntax;
        self
    }

    /// The reader this loader uses.
    #[must_use]
    pub const fn reader(&self) -> &R {
        &self.reader
    }

    /// Resolve the import graph rooted at `root` without merging anything.
    ///
    /// The returned sequence is root-first; nodes whose failures were tolerated
    /// are marked [corrupted](crate::ImportNode::is_corrupted).
    ///
    /// # Errors
    ///
    /// Returns the first read or parse failure that is not tolerated, or
    /// [`crate::ImportError::CyclicImport`] when an import chain loops.
    pub fn resolve(&self, root: impl AsRef<Utf8Path>) -> ImportResult<ImportSequence> {
        resolve_imports(root.as_ref(), &self.reader, self.default_syntax)
    }

    /// Overlay a previously resolved `sequence` onto `destination`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ImportError::UnsupportedDestination`] before any read
    /// when `destination` is not a record, otherwise the first failure that is
    /// not tolerated. Layers applied before that failure remain applied.
    pub fn apply_layers<T>(&self, sequence: &ImportSequence, destination: &mut T) -> ImportResult<()>
    where
        T: Overlay + ?Sized,
    {
        apply_layers(sequence, destination, &self.reader, self.default_syntax)
    }

    /// Resolve the tree rooted at `root` and layer it onto `destination`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ImportError::UnsupportedDestination`] without any I/O
    /// when `destination` is not a record; otherwise the first error raised by
    /// resolution or merging, unchanged.
    pub fn load_into<T>(&self, root: impl AsRef<Utf8Path>, destination: &mut T) -> ImportResult<()>
    where
        T: Overlay + ?Sized,
    {
        ensure_record::<T>()?;
        let root = root.as_ref();
        let sequence = self.resolve(root)?;
        debug!(root = %root, layers = sequence.len(), "resolved import tree");
        self.apply_layers(&sequence, destination)
    }
}

/// Process the configuration file at `root` and its whole import tree into
/// `destination`, reading from the local filesystem.
///
/// Imported documents are overlaid deepest first, so every document overrides
/// what it imports and later imports override earlier ones at the same level.
///
/// # Examples
///
/// ```rust,no_run
/// use config_imports::{Overlay, process_with_imports};
///
/// #[derive(Default, Overlay)]
/// struct AppConfig {
///     name: String,
/// }
///
/// let mut config = AppConfig::default();
/// process_with_imports("config/app.yml", &mut config)?;
/// # Ok::<_, std::sync::Arc<config_imports::ImportError>>(())
/// ```
///
/// # Errors
///
/// Returns [`crate::ImportError::UnsupportedDestination`] for non-record
/// destinations, or the first failure raised while resolving or merging.
pub fn process_with_imports<T>(root: impl AsRef<Utf8Path>, destination: &mut T) -> ImportResult<()>
where
    T: Overlay + ?Sized,
{
    ImportLoader::new().load_into(root, destination)
}
