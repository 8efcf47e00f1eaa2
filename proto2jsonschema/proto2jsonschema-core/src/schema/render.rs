use serde::{Serialize, Serializer, ser::SerializeMap};
use serde_json::ser::PrettyFormatter;

use super::Schema;
use crate::RenderError;

/// Value of the `$schema` keyword carried by every rendered document.
pub const SCHEMA_VERSION: &str = "http://json-schema.org/draft-04/schema#";

const INDENT: &[u8] = b"    ";

/// Render `schema` as a standalone document: four-space indented JSON whose
/// root object starts with the `$schema` marker.
pub fn render_document(schema: &Schema) -> Result<String, RenderError> {
    let mut out = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(INDENT));
    Document(schema).serialize(&mut serializer)?;
    Ok(String::from_utf8(out)?)
}

struct Document<'a>(&'a Schema);

impl Serialize for Document<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("$schema", SCHEMA_VERSION)?;
        self.0.serialize_entries(&mut map)?;
        map.end()
    }
}
