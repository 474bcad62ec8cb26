//! Import nodes and the ordered sequence produced by the resolver.

use camino::{Utf8Path, Utf8PathBuf};

/// One resource in the import graph, as scheduled for processing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportNode {
    resource: Utf8PathBuf,
    ignore_errors: bool,
    corrupted: bool,
    parent: Option<usize>,
}

impl ImportNode {
    /// Construct the root node. The root never tolerates failures.
    pub(crate) fn root(resource: impl Into<Utf8PathBuf>) -> Self {
        Self {
            resource: resource.into(),
            ignore_errors: false,
            corrupted: false,
            parent: None,
        }
    }

    /// Construct a node declared by the node at index `parent`.
    pub(crate) fn imported(resource: Utf8PathBuf, ignore_errors: bool, parent: usize) -> Self {
        Self {
            resource,
            ignore_errors,
            corrupted: false,
            parent: Some(parent),
        }
    }

    /// Resolved resource identifier.
    #[must_use]
    pub fn resource(&self) -> &Utf8Path {
        &self.resource
    }

    /// Whether read and parse failures of this resource are tolerated.
    #[must_use]
    pub const fn ignore_errors(&self) -> bool {
        self.ignore_errors
    }

    /// Whether resolution found this resource unreadable or unparsable and
    /// tolerated the failure. Corrupted nodes never contribute content.
    #[must_use]
    pub const fn is_corrupted(&self) -> bool {
        self.corrupted
    }

    /// Index of the importing node, or `None` for the root.
    #[must_use]
    pub const fn parent(&self) -> Option<usize> {
        self.parent
    }

    pub(crate) const fn mark_corrupted(&mut self) {
        self.corrupted = true;
    }
}

/// Ordered, append-only list of [`ImportNode`]s.
///
/// Index 0 is always the root. Replaying the sequence from its tail to its head
/// yields the order in which layers must be overlaid so that every importer has
/// the final say over what it imports.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImportSequence {
    nodes: Vec<ImportNode>,
}

impl ImportSequence {
    /// Number of nodes in the sequence.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` when the sequence holds no nodes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The root node, if the sequence has been populated.
    #[must_use]
    pub fn root(&self) -> Option<&ImportNode> {
        self.nodes.first()
    }

    /// Node at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ImportNode> {
        self.nodes.get(index)
    }

    /// Iterate nodes in resolution order, root first.
    pub fn iter(&self) -> std::slice::Iter<'_, ImportNode> {
        self.nodes.iter()
    }

    /// Iterate nodes in overlay order: deepest-appended first, root last.
    pub fn layers(&self) -> std::iter::Rev<std::slice::Iter<'_, ImportNode>> {
        self.nodes.iter().rev()
    }

    /// Resource identifiers in resolution order.
    #[must_use]
    pub fn resources(&self) -> Vec<&Utf8Path> {
        self.nodes.iter().map(ImportNode::resource).collect()
    }

    /// Walk from the node at `index` up to the root, yielding each node.
    pub fn ancestry(&self, index: usize) -> impl Iterator<Item = &ImportNode> + '_ {
        std::iter::successors(self.nodes.get(index), |node| {
            node.parent.and_then(|parent| self.nodes.get(parent))
        })
    }

    /// Append `node` and return its index.
    pub(crate) fn push(&mut self, node: ImportNode) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }
}

impl<'a> IntoIterator for &'a ImportSequence {
    type Item = &'a ImportNode;
    type IntoIter = std::slice::Iter<'a, ImportNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}
