//! Import resolution: walks the import graph into an ordered sequence.

use camino::Utf8Path;
use tracing::debug;

use std::collections::VecDeque;
use std::sync::Arc;

use crate::document::{Document, DocumentSyntax, ImportDeclaration};
use crate::error::read_error;
use crate::reader::ResourceReader;
use crate::resource::resolve_import_path;
use crate::sequence::{ImportNode, ImportSequence};
use crate::{ImportError, ImportResult};

/// Resolve the import graph rooted at `root`.
///
/// Nodes are processed from a FIFO work queue whose drain order becomes the
/// returned sequence. Each document's imports are enqueued in reverse of their
/// declared order, so replaying the sequence tail-to-head overlays siblings in
/// declared order and every importer after everything it imports.
///
/// # Errors
///
/// Returns the first read or parse failure of a node that does not tolerate
/// failures, or [`ImportError::CyclicImport`] when an import leads back to a
/// resource on its own ancestry path. No partial sequence is returned.
pub(crate) fn resolve_imports<R>(
    root: &Utf8Path,
    reader: &R,
    fallback: DocumentSyntax,
) -> ImportResult<ImportSequence>
where
    R: ResourceReader + ?Sized,
{
    let mut pending = VecDeque::from([ImportNode::root(root)]);
    let mut sequence = ImportSequence::default();

    while let Some(mut node) = pending.pop_front() {
        let declarations = match read_declarations(node.resource(), reader, fallback) {
            Ok(declarations) => declarations,
            Err(err) if node.ignore_errors() => {
                debug!(resource = %node.resource(), error = %err, "tolerating unusable import");
                node.mark_corrupted();
                sequence.push(node);
                continue;
            }
            Err(err) => return Err(err),
        };

        debug!(
            resource = %node.resource(),
            imports = declarations.len(),
            "resolved configuration resource"
        );
        let importer = node.resource().to_path_buf();
        let index = sequence.push(node);
        for declaration in declarations.into_iter().rev() {
            let resource = resolve_import_path(&importer, &declaration.resource);
            ensure_acyclic(&sequence, index, &resource, reader)?;
            pending.push_back(ImportNode::imported(
                resource,
                declaration.ignore_errors,
                index,
            ));
        }
    }

    Ok(sequence)
}

fn read_declarations<R>(
    resource: &Utf8Path,
    reader: &R,
    fallback: DocumentSyntax,
) -> ImportResult<Vec<ImportDeclaration>>
where
    R: ResourceReader + ?Sized,
{
    let bytes = reader
        .read(resource)
        .map_err(|err| read_error(resource, err))?;
    Document::parse(resource, &bytes, fallback)?.imports()
}

/// Fail when `candidate` already appears on the ancestry path of the node at
/// `importer`, the importer itself included. Resources are compared by their
/// [`ResourceReader::identity`].
fn ensure_acyclic<R>(
    sequence: &ImportSequence,
    importer: usize,
    candidate: &Utf8Path,
    reader: &R,
) -> ImportResult<()>
where
    R: ResourceReader + ?Sized,
{
    let key = reader.identity(candidate);
    let mut path: Vec<&ImportNode> = sequence.ancestry(importer).collect();
    if !path
        .iter()
        .any(|node| reader.identity(node.resource()) == key)
    {
        return Ok(());
    }
    path.reverse();
    let mut cycle: Vec<&str> = path.iter().map(|node| node.resource().as_str()).collect();
    cycle.push(candidate.as_str());
    Err(Arc::new(ImportError::CyclicImport {
        cycle: cycle.join(" -> "),
    }))
}
