//! Configuration documents: parsing, import declarations and overlay bodies.

mod parser;
mod syntax;
#[cfg(feature = "yaml")]
mod yaml;

use camino::{Utf8Path, Utf8PathBuf};
use figment::{Figment, value::Value as FigmentValue};
use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::ImportResult;
use crate::error::document_error;

pub use syntax::DocumentSyntax;
#[cfg(feature = "yaml")]
pub use yaml::SaphyrYaml;

/// Top-level key holding a document's import declarations.
pub const IMPORTS_KEY: &str = "imports";

/// One entry of a document's `imports` list.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct ImportDeclaration {
    /// Identifier of the imported resource, relative to the importing document
    /// unless absolute.
    pub resource: String,
    /// Tolerate read and parse failures of the imported resource.
    #[serde(default)]
    pub ignore_errors: bool,
}

/// A parsed configuration document.
#[derive(Debug)]
pub(crate) struct Document {
    resource: Utf8PathBuf,
    figment: Figment,
}

impl Document {
    /// Parse `bytes` read from `resource`.
    ///
    /// The syntax is chosen from the resource extension, falling back to
    /// `fallback` when the extension does not identify one.
    pub(crate) fn parse(
        resource: &Utf8Path,
        bytes: &[u8],
        fallback: DocumentSyntax,
    ) -> ImportResult<Self> {
        let data = std::str::from_utf8(bytes).map_err(|err| document_error(resource, err))?;
        let syntax = DocumentSyntax::from_extension(resource).unwrap_or(fallback);
        let figment = parser::parse_document(resource, data, syntax)?;
        Ok(Self {
            resource: resource.to_path_buf(),
            figment,
        })
    }

    /// Extract the `imports` declarations, in declared order.
    ///
    /// A document without an `imports` key (or with an empty one) declares no
    /// imports. Declarations with an empty resource are rejected.
    pub(crate) fn imports(&self) -> ImportResult<Vec<ImportDeclaration>> {
        let value = match self.figment.find_value(IMPORTS_KEY) {
            Ok(value) => value,
            Err(err) if err.missing() => return Ok(Vec::new()),
            Err(err) => return Err(document_error(&self.resource, err)),
        };
        if matches!(value, FigmentValue::Empty(..)) {
            return Ok(Vec::new());
        }
        let declarations: Vec<ImportDeclaration> = value
            .deserialize()
            .map_err(|err| document_error(&self.resource, err))?;
        if declarations.iter().any(|decl| decl.resource.is_empty()) {
            return Err(document_error(
                &self.resource,
                "import 'resource' must be a non-empty string",
            ));
        }
        Ok(declarations)
    }

    /// Convert the document into the layer overlaid onto the destination.
    ///
    /// The `imports` key is removed so it never reaches the destination.
    pub(crate) fn into_layer(self) -> ImportResult<JsonValue> {
        let mut value: JsonValue = self
            .figment
            .extract()
            .map_err(|err| document_error(&self.resource, err))?;
        if let JsonValue::Object(map) = &mut value {
            map.remove(IMPORTS_KEY);
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests;
