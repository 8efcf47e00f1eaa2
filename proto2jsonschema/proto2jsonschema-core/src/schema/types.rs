use std::ops::Deref;

use serde::{
    Serialize, Serializer,
    ser::{SerializeMap, SerializeSeq},
};

/// Type of a JSON Schema node.
///
/// Every variant except [`SchemaKind::Union`] renders as a `"type"` keyword;
/// a union renders as `"oneOf"` with one `{"type": ...}` entry per alternative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaKind {
    Number,
    Integer,
    String,
    Boolean,
    Object,
    Array,
    Union(Vec<SchemaKind>),
}

impl SchemaKind {
    /// The `string | integer` union used for protobuf enums, which may be
    /// written either by symbolic name or by number.
    pub fn string_or_integer() -> Self {
        SchemaKind::Union(vec![SchemaKind::String, SchemaKind::Integer])
    }

    pub fn is_object(&self) -> bool {
        matches!(self, SchemaKind::Object)
    }

    pub fn type_name(&self) -> Option<&'static str> {
        match self {
            SchemaKind::Number => Some("number"),
            SchemaKind::Integer => Some("integer"),
            SchemaKind::String => Some("string"),
            SchemaKind::Boolean => Some("boolean"),
            SchemaKind::Object => Some("object"),
            SchemaKind::Array => Some("array"),
            SchemaKind::Union(_) => None,
        }
    }
}

/// One entry of an `"enum"` list. Protobuf enums contribute alternating
/// symbolic names and numeric values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum EnumValue {
    Name(String),
    Number(i32),
}

/// Object properties keyed by field name, kept in declaration order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Properties(Vec<(String, Schema)>);

impl Properties {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Insert a property, replacing the schema of an existing entry with the
    /// same name in place.
    pub fn insert(&mut self, name: impl Into<String>, schema: Schema) {
        let name = name.into();
        match self.0.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = schema,
            None => self.0.push((name, schema)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Schema> {
        self.0
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, schema)| schema)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Schema)> {
        self.0.iter().map(|(name, schema)| (name.as_str(), schema))
    }
}

impl Deref for Properties {
    type Target = [(String, Schema)];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<(String, Schema)>> for Properties {
    fn from(value: Vec<(String, Schema)>) -> Self {
        let mut properties = Properties::new();
        for (name, schema) in value {
            properties.insert(name, schema);
        }
        properties
    }
}

impl Serialize for Properties {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, schema) in &self.0 {
            map.serialize_entry(name, schema)?;
        }
        map.end()
    }
}

/// A node of a JSON Schema tree.
///
/// Nodes are built once by a converter and never shared between documents:
/// nested message types are always inlined.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    pub kind: SchemaKind,
    /// Element schema; only meaningful for [`SchemaKind::Array`].
    pub items: Option<Box<Schema>>,
    /// Only meaningful for [`SchemaKind::Object`].
    pub properties: Properties,
    /// `None` leaves the keyword out of the document.
    pub additional_properties: Option<bool>,
    pub enum_values: Vec<EnumValue>,
}

impl Schema {
    pub fn new(kind: SchemaKind) -> Self {
        Self {
            kind,
            items: None,
            properties: Properties::new(),
            additional_properties: None,
            enum_values: Vec::new(),
        }
    }

    /// An object node with the given `additionalProperties` flag.
    pub fn object(additional_properties: Option<bool>) -> Self {
        Self {
            additional_properties,
            ..Self::new(SchemaKind::Object)
        }
    }

    /// An array node whose elements follow `items`.
    pub fn array(items: Schema) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::new(SchemaKind::Array)
        }
    }

    pub(crate) fn serialize_entries<M: SerializeMap>(&self, map: &mut M) -> Result<(), M::Error> {
        match &self.kind {
            SchemaKind::Union(alternatives) => {
                map.serialize_entry("oneOf", &Alternatives(alternatives))?
            }
            kind => map.serialize_entry("type", &kind.type_name())?,
        }
        if let Some(items) = &self.items {
            map.serialize_entry("items", items)?;
        }
        if !self.properties.is_empty() {
            map.serialize_entry("properties", &self.properties)?;
        }
        if let Some(allow) = self.additional_properties {
            map.serialize_entry("additionalProperties", &allow)?;
        }
        if !self.enum_values.is_empty() {
            map.serialize_entry("enum", &self.enum_values)?;
        }
        Ok(())
    }
}

impl Serialize for Schema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        self.serialize_entries(&mut map)?;
        map.end()
    }
}

struct Alternatives<'a>(&'a [SchemaKind]);

impl Serialize for Alternatives<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for kind in self.0 {
            seq.serialize_element(&Schema::new(kind.clone()))?;
        }
        seq.end()
    }
}
