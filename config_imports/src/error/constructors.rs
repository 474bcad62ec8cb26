//! Constructors shared by the resolver, the merger and document parsing.

use camino::Utf8Path;

use std::error::Error;
use std::sync::Arc;

use super::ImportError;

/// Construct an [`ImportError::ResourceUnavailable`] for `resource`.
pub(crate) fn read_error(resource: &Utf8Path, source: std::io::Error) -> Arc<ImportError> {
    Arc::new(ImportError::ResourceUnavailable {
        resource: resource.to_path_buf(),
        source,
    })
}

/// Construct an [`ImportError::DocumentFormat`] for `resource`.
pub(crate) fn document_error(
    resource: &Utf8Path,
    err: impl Into<Box<dyn Error + Send + Sync>>,
) -> Arc<ImportError> {
    Arc::new(ImportError::DocumentFormat {
        resource: resource.to_path_buf(),
        source: err.into(),
    })
}
