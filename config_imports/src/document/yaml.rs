//! YAML provider support backed by `serde-saphyr`.

use camino::Utf8PathBuf;
use figment::{
    Metadata, Profile, Provider,
    error::Kind,
    value::{Dict, Empty, Map, Value as FigmentValue},
};
use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde_saphyr::Options;

use std::fmt;

/// A YAML node whose plain `~`, `null` and empty scalars become
/// [`Empty::None`].
///
/// `serde-saphyr` only recognises null scalars when asked for an option, so
/// every node is requested as one before being read as any other value.
struct YamlNode(FigmentValue);

impl<'de> Deserialize<'de> for YamlNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_option(YamlNodeVisitor)
    }
}

struct YamlNodeVisitor;

impl YamlNodeVisitor {
    fn node<T: Into<FigmentValue>>(value: T) -> YamlNode {
        YamlNode(value.into())
    }
}

impl<'de> Visitor<'de> for YamlNodeVisitor {
    type Value = YamlNode;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a YAML value")
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Self::node(Empty::None))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Self::node(Empty::None))
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<Self::Value, E> {
        Ok(Self::node(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        Ok(Self::node(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        Ok(Self::node(value))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
        Ok(Self::node(value))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Ok(Self::node(value))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<Self::Value, E> {
        Ok(Self::node(value))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut items = Vec::new();
        while let Some(YamlNode(item)) = seq.next_element()? {
            items.push(item);
        }
        Ok(Self::node(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut dict = Dict::new();
        while let Some((key, YamlNode(value))) = map.next_entry::<String, YamlNode>()? {
            dict.insert(key, value);
        }
        Ok(Self::node(dict))
    }
}

/// Figment provider that parses in-memory YAML using `serde-saphyr`.
///
/// The resource identifier is only used for metadata and error messages; the
/// bytes themselves always come from the resource reader.
#[derive(Debug, Clone)]
pub struct SaphyrYaml {
    resource: Utf8PathBuf,
    contents: String,
}

impl SaphyrYaml {
    /// Construct a provider for `contents` read from `resource`.
    #[must_use]
    pub fn string<P, S>(resource: P, contents: S) -> Self
    where
        P: Into<Utf8PathBuf>,
        S: Into<String>,
    {
        Self {
            resource: resource.into(),
            contents: contents.into(),
        }
    }

    /// Parse YAML contents into a Figment `Value` using strict boolean semantics.
    fn parse_value(contents: &str) -> Result<FigmentValue, serde_saphyr::Error> {
        let YamlNode(value) = serde_saphyr::from_str_with_options(
            contents,
            Options {
                strict_booleans: true,
                ..Options::default()
            },
        )?;
        Ok(value)
    }
}

impl Provider for SaphyrYaml {
    fn metadata(&self) -> Metadata {
        Metadata::from("Saphyr YAML", self.resource.as_std_path())
    }

    fn data(&self) -> Result<Map<Profile, Dict>, figment::Error> {
        let value = Self::parse_value(&self.contents).map_err(|err| {
            figment::Error::from(Kind::Message(format!(
                "failed to parse {}: {err}",
                self.resource
            )))
        })?;
        let actual = value.to_actual();
        let dict = value
            .into_dict()
            .ok_or_else(|| figment::Error::from(Kind::InvalidType(actual, "map".into())))?;
        Ok(Profile::Default.collect(dict))
    }
}
