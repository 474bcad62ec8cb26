//! Layered merging: replays a resolved sequence onto one destination.

use camino::Utf8Path;
use serde_json::Value as JsonValue;
use tracing::debug;

use std::sync::Arc;

use crate::document::{Document, DocumentSyntax};
use crate::error::{document_error, read_error};
use crate::overlay::{DestinationShape, Overlay, OverlayError};
use crate::reader::ResourceReader;
use crate::sequence::ImportSequence;
use crate::{ImportError, ImportResult};

/// Overlay every usable node of `sequence` onto `destination`, tail first.
///
/// Corrupted nodes are skipped without being read again. Each layer is
/// validated against the destination before it is applied, so a layer either
/// lands whole or not at all. A node that fails to read, parse or fit the
/// destination is skipped when it tolerates failures and aborts the merge
/// otherwise, leaving `destination` with the layers applied so far.
///
/// # Errors
///
/// Returns the first failure of a node that does not tolerate failures.
pub(crate) fn apply_layers<T, R>(
    sequence: &ImportSequence,
    destination: &mut T,
    reader: &R,
    fallback: DocumentSyntax,
) -> ImportResult<()>
where
    T: Overlay + ?Sized,
    R: ResourceReader + ?Sized,
{
    ensure_record::<T>()?;
    for node in sequence.layers() {
        if node.is_corrupted() {
            continue;
        }
        let applied = read_layer(node.resource(), reader, fallback)
            .and_then(|layer| overlay_layer(node.resource(), destination, &layer));
        match applied {
            Ok(()) => debug!(resource = %node.resource(), "applied configuration layer"),
            Err(err)
                if node.ignore_errors()
                    && !matches!(err.as_ref(), ImportError::UnsupportedDestination) =>
            {
                debug!(resource = %node.resource(), error = %err, "skipping unusable layer");
            }
            Err(err) => return Err(err),
        }
    }
    Ok(())
}

/// Reject destinations that are not fixed-shape records.
///
/// # Errors
///
/// Returns [`ImportError::UnsupportedDestination`] for any other shape.
pub(crate) fn ensure_record<T>() -> ImportResult<()>
where
    T: Overlay + ?Sized,
{
    match T::SHAPE {
        DestinationShape::Record => Ok(()),
        DestinationShape::Map => Err(Arc::new(ImportError::UnsupportedDestination)),
    }
}

fn read_layer<R>(
    resource: &Utf8Path,
    reader: &R,
    fallback: DocumentSyntax,
) -> ImportResult<JsonValue>
where
    R: ResourceReader + ?Sized,
{
    let bytes = reader
        .read(resource)
        .map_err(|err| read_error(resource, err))?;
    Document::parse(resource, &bytes, fallback)?.into_layer()
}

fn overlay_layer<T>(resource: &Utf8Path, destination: &mut T, layer: &JsonValue) -> ImportResult<()>
where
    T: Overlay + ?Sized,
{
    destination
        .validate(layer)
        .and_then(|()| destination.overlay(layer))
        .map_err(|err| match err {
            OverlayError::Unsupported => Arc::new(ImportError::UnsupportedDestination),
            other => document_error(resource, other),
        })
}
