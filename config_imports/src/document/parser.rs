//! Syntax-specific parsing of document text into a [`Figment`].

use camino::Utf8Path;
use figment::Figment;
#[cfg(any(feature = "toml", feature = "json5"))]
use figment::providers::Format;
#[cfg(feature = "toml")]
use figment::providers::Toml;
#[cfg(feature = "json5")]
use figment_json5::Json5;

use crate::ImportResult;
use crate::error::document_error;

use super::DocumentSyntax;
#[cfg(feature = "yaml")]
use super::yaml::SaphyrYaml;

/// Parse `data` according to `syntax`.
///
/// Blank documents are treated as empty mappings. TOML is validated eagerly so
/// syntax errors carry the resource context; YAML and JSON5 are validated when
/// the figment is first queried, which the resolver does immediately.
///
/// # Errors
///
/// Returns an [`crate::ImportError::DocumentFormat`] when TOML fails to parse
/// or when the cargo feature for `syntax` is disabled.
pub(super) fn parse_document(
    resource: &Utf8Path,
    data: &str,
    syntax: DocumentSyntax,
) -> ImportResult<Figment> {
    if data.trim().is_empty() {
        return Ok(Figment::new());
    }
    let figment = match syntax {
        DocumentSyntax::Yaml => {
            #[cfg(feature = "yaml")]
            {
                Figment::from(SaphyrYaml::string(resource, data))
            }
            #[cfg(not(feature = "yaml"))]
            {
                return Err(document_error(
                    resource,
                    "yaml feature disabled: enable the 'yaml' feature to support this document syntax",
                ));
            }
        }
        DocumentSyntax::Toml => {
            #[cfg(feature = "toml")]
            {
                toml::from_str::<toml::Table>(data).map_err(|err| document_error(resource, err))?;
                Figment::from(Toml::string(data))
            }
            #[cfg(not(feature = "toml"))]
            {
                return Err(document_error(
                    resource,
                    "toml feature disabled: enable the 'toml' feature to support this document syntax",
                ));
            }
        }
        DocumentSyntax::Json5 => {
            #[cfg(feature = "json5")]
            {
                Figment::from(Json5::string(data))
            }
            #[cfg(not(feature = "json5"))]
            {
                return Err(document_error(
                    resource,
                    "json5 feature disabled: enable the 'json5' feature to support this document syntax",
                ));
            }
        }
    };
    Ok(figment)
}
