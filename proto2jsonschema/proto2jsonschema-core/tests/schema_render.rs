use proto2jsonschema_core::{
    EnumValue, Properties, RenderError, SCHEMA_VERSION, Schema, SchemaKind, render_document,
};
use serde_json::json;

#[test]
fn nested_object_keeps_key_order_and_indentation() -> Result<(), RenderError> {
    let mut inner = Schema::object(Some(false));
    inner
        .properties
        .insert("zeta", Schema::new(SchemaKind::String));
    inner
        .properties
        .insert("alpha", Schema::array(Schema::new(SchemaKind::Integer)));

    let mut root = Schema::object(Some(true));
    root.properties.insert("inner", inner);

    let text = render_document(&root)?;
    let expected = "\
{
    \"$schema\": \"http://json-schema.org/draft-04/schema#\",
    \"type\": \"object\",
    \"properties\": {
        \"inner\": {
            \"type\": \"object\",
            \"properties\": {
                \"zeta\": {
                    \"type\": \"string\"
                },
                \"alpha\": {
                    \"type\": \"array\",
                    \"items\": {
                        \"type\": \"integer\"
                    }
                }
            },
            \"additionalProperties\": false
        }
    },
    \"additionalProperties\": true
}";
    assert_eq!(text, expected);
    Ok(())
}

#[test]
fn union_renders_as_one_of_with_enum_values() -> Result<(), RenderError> {
    let schema = Schema {
        enum_values: vec![
            EnumValue::Name("OK".to_string()),
            EnumValue::Number(0),
            EnumValue::Name("FAIL".to_string()),
            EnumValue::Number(1),
        ],
        ..Schema::new(SchemaKind::string_or_integer())
    };

    let value: serde_json::Value = serde_json::from_str(&render_document(&schema)?)?;
    assert_eq!(
        value,
        json!({
            "$schema": SCHEMA_VERSION,
            "oneOf": [{"type": "string"}, {"type": "integer"}],
            "enum": ["OK", 0, "FAIL", 1],
        })
    );
    Ok(())
}

#[test]
fn nested_nodes_do_not_carry_schema_marker() {
    let mut root = Schema::object(None);
    root.properties
        .insert("child", Schema::object(Some(true)));

    let value = serde_json::to_value(&root).unwrap();
    assert_eq!(
        value,
        json!({
            "type": "object",
            "properties": {"child": {"type": "object", "additionalProperties": true}},
        })
    );
}

#[test]
fn empty_collections_and_unset_flags_are_omitted() {
    let value = serde_json::to_value(Schema::object(None)).unwrap();
    assert_eq!(value, json!({"type": "object"}));
}

#[test]
fn properties_insert_replaces_in_place() {
    let mut properties: Properties = vec![
        ("a".to_string(), Schema::new(SchemaKind::String)),
        ("b".to_string(), Schema::new(SchemaKind::Number)),
    ]
    .into();
    properties.insert("a", Schema::new(SchemaKind::Boolean));

    assert_eq!(properties.names().collect::<Vec<_>>(), ["a", "b"]);
    assert_eq!(
        properties.get("a").map(|s| &s.kind),
        Some(&SchemaKind::Boolean)
    );
}
