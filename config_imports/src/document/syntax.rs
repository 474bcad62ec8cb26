//! Document syntaxes understood by the parser.

use camino::Utf8Path;

/// Syntax used to decode a configuration document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[non_exhaustive]
pub enum DocumentSyntax {
    /// YAML 1.2, parsed with `serde-saphyr`.
    #[cfg_attr(feature = "yaml", default)]
    Yaml,
    /// TOML.
    #[cfg_attr(not(feature = "yaml"), default)]
    Toml,
    /// JSON5 (a superset of JSON).
    Json5,
}

impl DocumentSyntax {
    /// Infer the syntax from the extension of `resource`.
    ///
    /// Returns `None` when the extension is missing or unknown.
    ///
    /// # Examples
    ///
    /// ```
    /// use camino::Utf8Path;
    /// use config_imports::DocumentSyntax;
    ///
    /// assert_eq!(
    ///     DocumentSyntax::from_extension(Utf8Path::new("app.YML")),
    ///     Some(DocumentSyntax::Yaml)
    /// );
    /// assert_eq!(DocumentSyntax::from_extension(Utf8Path::new("app.conf")), None);
    /// ```
    #[must_use]
    pub fn from_extension(resource: &Utf8Path) -> Option<Self> {
        let ext = resource.extension().map(str::to_ascii_lowercase)?;
        match ext.as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            "json" | "json5" => Some(Self::Json5),
            _ => None,
        }
    }
}
