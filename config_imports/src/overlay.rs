//! Sparse overlay of parsed documents onto destination values.
//!
//! A destination receives each layer through [`Overlay::overlay`]. Fields the
//! layer mentions replace the destination's fields; nested records recurse so
//! only the leaves actually present change; everything else is left alone.
//! Implementations are normally generated with `#[derive(Overlay)]`, which
//! builds on the helpers in this module.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// Structural shape of a destination value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum DestinationShape {
    /// Fixed-shape record (a struct with named fields).
    Record,
    /// Associative map. Layering into maps would need a deep-merge key policy,
    /// so these destinations are rejected.
    Map,
}

/// Errors raised while overlaying a layer onto a destination.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum OverlayError {
    /// The destination does not accept overlays.
    #[error("destination does not support overlays")]
    Unsupported,

    /// A record expected a mapping but the layer held something else.
    #[error("expected a mapping at '{path}', found {found}")]
    NotAMapping {
        /// Dotted path of the offending value; empty for the document root.
        path: String,
        /// Kind of value that was found.
        found: &'static str,
    },

    /// A leaf value could not be deserialized into the field's type.
    #[error("invalid value for '{path}': {source}")]
    Field {
        /// Dotted path of the field.
        path: String,
        /// Deserialization failure.
        #[source]
        source: serde_json::Error,
    },
}

impl OverlayError {
    /// Prefix the error path with `key`, producing a dotted path.
    #[must_use]
    pub fn within(self, key: &str) -> Self {
        let prefix = |path: String| {
            if path.is_empty() {
                key.to_owned()
            } else {
                format!("{key}.{path}")
            }
        };
        match self {
            Self::Unsupported => Self::Unsupported,
            Self::NotAMapping { path, found } => Self::NotAMapping {
                path: prefix(path),
                found,
            },
            Self::Field { path, source } => Self::Field {
                path: prefix(path),
                source,
            },
        }
    }
}

/// Capability to receive sparse overlays.
///
/// # Examples
///
/// A hand-written implementation mirrors what `#[derive(Overlay)]` generates:
///
/// ```
/// use config_imports::{Overlay, OverlayError};
/// use config_imports::overlay::{layer_fields, overlay_leaf, validate_leaf};
/// use serde_json::{Value, json};
///
/// #[derive(Default)]
/// struct Server {
///     host: String,
///     port: u16,
/// }
///
/// impl Overlay for Server {
///     fn overlay(&mut self, layer: &Value) -> Result<(), OverlayError> {
///         let fields = layer_fields(layer)?;
///         if let Some(value) = fields.get("host") {
///             overlay_leaf(&mut self.host, value).map_err(|err| err.within("host"))?;
///         }
///         if let Some(value) = fields.get("port") {
///             overlay_leaf(&mut self.port, value).map_err(|err| err.within("port"))?;
///         }
///         Ok(())
///     }
///
///     fn validate(&self, layer: &Value) -> Result<(), OverlayError> {
///         let fields = layer_fields(layer)?;
///         if let Some(value) = fields.get("host") {
///             validate_leaf(&self.host, value).map_err(|err| err.within("host"))?;
///         }
///         if let Some(value) = fields.get("port") {
///             validate_leaf(&self.port, value).map_err(|err| err.within("port"))?;
///         }
///         Ok(())
///     }
/// }
///
/// let mut server = Server { host: "localhost".into(), port: 80 };
/// assert!(server.validate(&json!({"port": "eighty"})).is_err());
/// server.overlay(&json!({"port": 8080}))?;
/// assert_eq!((server.host.as_str(), server.port), ("localhost", 8080));
/// # Ok::<_, OverlayError>(())
/// ```
pub trait Overlay {
    /// Shape reported to the entry operation before any I/O happens.
    const SHAPE: DestinationShape = DestinationShape::Record;

    /// Apply `layer` onto `self`, touching only the fields it mentions.
    ///
    /// # Errors
    ///
    /// Returns an [`OverlayError`] when the layer does not fit the
    /// destination's shape. Fields visited before the failure may already have
    /// been updated.
    fn overlay(&mut self, layer: &Value) -> Result<(), OverlayError>;

    /// Check that [`Overlay::overlay`] would accept `layer`, without changing
    /// `self`.
    ///
    /// # Errors
    ///
    /// Returns the [`OverlayError`] that overlaying `layer` would raise.
    fn validate(&self, layer: &Value) -> Result<(), OverlayError>;
}

/// View `layer` as a mapping of field names to values.
///
/// # Errors
///
/// Returns [`OverlayError::NotAMapping`] when `layer` is not an object.
pub fn layer_fields(layer: &Value) -> Result<&Map<String, Value>, OverlayError> {
    layer.as_object().ok_or_else(|| OverlayError::NotAMapping {
        path: String::new(),
        found: value_kind(layer),
    })
}

/// Replace a leaf field with `value`.
///
/// # Errors
///
/// Returns [`OverlayError::Field`] when `value` cannot be deserialized into
/// `T`; the slot is left unchanged in that case.
pub fn overlay_leaf<T: DeserializeOwned>(slot: &mut T, value: &Value) -> Result<(), OverlayError> {
    *slot = Deserialize::deserialize(value).map_err(|source| OverlayError::Field {
        path: String::new(),
        source,
    })?;
    Ok(())
}

/// Check that `value` deserializes into the type of `slot`.
///
/// # Errors
///
/// Returns the [`OverlayError::Field`] that [`overlay_leaf`] would raise.
pub fn validate_leaf<T: DeserializeOwned>(_slot: &T, value: &Value) -> Result<(), OverlayError> {
    T::deserialize(value)
        .map(drop)
        .map_err(|source| OverlayError::Field {
            path: String::new(),
            source,
        })
}

const fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Optional nested records: `null` clears the value, anything else fills a
/// default record when empty and recurses.
impl<T: Overlay + Default> Overlay for Option<T> {
    const SHAPE: DestinationShape = T::SHAPE;

    fn overlay(&mut self, layer: &Value) -> Result<(), OverlayError> {
        if layer.is_null() {
            *self = None;
            return Ok(());
        }
        self.get_or_insert_with(T::default).overlay(layer)
    }

    fn validate(&self, layer: &Value) -> Result<(), OverlayError> {
        match self {
            _ if layer.is_null() => Ok(()),
            Some(inner) => inner.validate(layer),
            None => T::default().validate(layer),
        }
    }
}

impl<T: Overlay + ?Sized> Overlay for Box<T> {
    const SHAPE: DestinationShape = T::SHAPE;

    fn overlay(&mut self, layer: &Value) -> Result<(), OverlayError> {
        (**self).overlay(layer)
    }

    fn validate(&self, layer: &Value) -> Result<(), OverlayError> {
        (**self).validate(layer)
    }
}

impl<V> Overlay for BTreeMap<String, V> {
    const SHAPE: DestinationShape = DestinationShape::Map;

    fn overlay(&mut self, _layer: &Value) -> Result<(), OverlayError> {
        Err(OverlayError::Unsupported)
    }

    fn validate(&self, _layer: &Value) -> Result<(), OverlayError> {
        Err(OverlayError::Unsupported)
    }
}

impl<V, S: BuildHasher> Overlay for HashMap<String, V, S> {
    const SHAPE: DestinationShape = DestinationShape::Map;

    fn overlay(&mut self, _layer: &Value) -> Result<(), OverlayError> {
        Err(OverlayError::Unsupported)
    }

    fn validate(&self, _layer: &Value) -> Result<(), OverlayError> {
        Err(OverlayError::Unsupported)
    }
}
