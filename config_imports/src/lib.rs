//! Layered configuration loading through `imports` declarations.
//!
//! A configuration document may declare other documents to import:
//!
//! ```yaml
//! imports:
//!   - resource: defaults.yml
//!   - resource: /etc/app/site.yml
//!     ignore_errors: true
//! name: app
//! ```
//!
//! [`process_with_imports`] resolves the whole import tree and overlays each
//! document onto a destination record so that a document overrides everything
//! it imports and later imports override earlier ones at the same level.
//! Relative resources resolve against the importing document's directory.
//!
//! Destinations implement [`Overlay`](trait@Overlay), usually through
//! `#[derive(Overlay)]`, which applies only the fields a document mentions.

pub use config_imports_macros::Overlay;
pub use serde_json;

mod document;
mod error;
mod loader;
mod merge;
pub mod overlay;
mod reader;
mod resolve;
mod resource;
mod sequence;

pub use document::{DocumentSyntax, IMPORTS_KEY, ImportDeclaration};
#[cfg(feature = "yaml")]
pub use document::SaphyrYaml;
pub use error::{ImportError, ImportResult};
pub use loader::{ImportLoader, process_with_imports};
pub use overlay::{DestinationShape, Overlay, OverlayError};
pub use reader::{FsReader, ResourceReader};
pub use sequence::{ImportNode, ImportSequence};
