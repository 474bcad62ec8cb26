//! Primary error enum for import resolution and layering.

use camino::Utf8PathBuf;
use thiserror::Error;

use std::sync::Arc;

/// Result alias used throughout the crate.
///
/// Errors are shared behind an [`Arc`] so a failure discovered while resolving
/// can be handed back to the caller without cloning the underlying source.
pub type ImportResult<T> = Result<T, Arc<ImportError>>;

/// Errors that can occur while processing a configuration import tree.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ImportError {
    /// The destination is not a fixed-shape record.
    #[error(
        "unsupported destination type: only record (struct) destinations can receive imports"
    )]
    UnsupportedDestination,

    /// The resource reader could not produce the bytes for a resource.
    #[error("failed to read configuration resource '{resource}': {source}")]
    ResourceUnavailable {
        /// Resource that could not be read.
        resource: Utf8PathBuf,
        /// Error reported by the resource reader.
        #[source]
        source: std::io::Error,
    },

    /// The bytes of a resource could not be decoded into the expected shape.
    #[error("invalid configuration document '{resource}': {source}")]
    DocumentFormat {
        /// Resource whose contents failed to decode.
        resource: Utf8PathBuf,
        /// Underlying parser or overlay error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// An import chain leads back to a resource already on its path.
    #[error("cyclic import detected: {cycle}")]
    CyclicImport {
        /// Chain of resources participating in the cycle.
        cycle: String,
    },
}

impl ImportError {
    /// Returns the resource associated with this error, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use camino::Utf8Path;
    /// use config_imports::ImportError;
    ///
    /// let err = ImportError::ResourceUnavailable {
    ///     resource: "base.yml".into(),
    ///     source: std::io::Error::from(std::io::ErrorKind::NotFound),
    /// };
    /// assert_eq!(err.resource(), Some(Utf8Path::new("base.yml")));
    /// assert_eq!(ImportError::UnsupportedDestination.resource(), None);
    /// ```
    #[must_use]
    pub fn resource(&self) -> Option<&camino::Utf8Path> {
        match self {
            Self::ResourceUnavailable { resource, .. } | Self::DocumentFormat { resource, .. } => {
                Some(resource)
            }
            Self::UnsupportedDestination | Self::CyclicImport { .. } => None,
        }
    }
}
