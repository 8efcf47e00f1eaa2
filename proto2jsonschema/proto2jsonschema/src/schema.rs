//! Convert protobuf message and enum descriptors into [`Schema`] trees.

use prost_types::{
    DescriptorProto, EnumDescriptorProto, FieldDescriptorProto,
    field_descriptor_proto::{Label, Type},
};
use proto2jsonschema_core::{EnumValue, Schema, SchemaKind};
use tracing::{error, warn};

use crate::{ConvertError, ConverterOptions, NamespaceTree, PackageId};

/// Convert `message` into an object schema, inlining every message-typed
/// field it reaches.
///
/// Type references are resolved through `tree` as seen from `package`, the
/// package of the file that declares the top-level message.
pub fn convert_message_type<'a>(
    tree: &NamespaceTree<'a>,
    package: PackageId,
    message: &'a DescriptorProto,
    options: &ConverterOptions,
) -> Result<Schema, ConvertError> {
    MessageConverter::new(tree, package, options).convert_message(message)
}

/// Convert a standalone enum into a `string | integer` schema listing its
/// symbolic names and numbers in declaration order.
pub fn convert_enum_type(enum_desc: &EnumDescriptorProto) -> Schema {
    Schema {
        enum_values: enum_values(enum_desc),
        ..Schema::new(SchemaKind::string_or_integer())
    }
}

fn enum_values(enum_desc: &EnumDescriptorProto) -> Vec<EnumValue> {
    enum_desc
        .value
        .iter()
        .flat_map(|v| {
            [
                EnumValue::Name(v.name().to_string()),
                EnumValue::Number(v.number()),
            ]
        })
        .collect()
}

/// Recursive converter for one top-level message.
///
/// `inlining` holds the messages whose fields are currently being expanded,
/// outermost first; it guards against infinite expansion of recursive types.
struct MessageConverter<'t, 'a> {
    tree: &'t NamespaceTree<'a>,
    package: PackageId,
    options: &'t ConverterOptions,
    inlining: Vec<&'a DescriptorProto>,
}

impl<'t, 'a> MessageConverter<'t, 'a> {
    fn new(tree: &'t NamespaceTree<'a>, package: PackageId, options: &'t ConverterOptions) -> Self {
        Self {
            tree,
            package,
            options,
            inlining: Vec::new(),
        }
    }

    fn convert_message(&mut self, message: &'a DescriptorProto) -> Result<Schema, ConvertError> {
        let mut schema = Schema::object(Some(self.options.allow_additional_properties));

        self.inlining.push(message);
        let result = self.convert_fields(message, &mut schema);
        self.inlining.pop();

        result.map(|()| schema)
    }

    fn convert_fields(
        &mut self,
        message: &'a DescriptorProto,
        schema: &mut Schema,
    ) -> Result<(), ConvertError> {
        for field in &message.field {
            let converted = self.convert_field(field, message).inspect_err(|e| {
                error!(
                    field = field.name(),
                    message = message.name(),
                    "failed to convert field: {e}"
                )
            })?;
            schema.properties.insert(field.name(), converted);
        }
        Ok(())
    }

    fn convert_field(
        &mut self,
        field: &FieldDescriptorProto,
        message: &'a DescriptorProto,
    ) -> Result<Schema, ConvertError> {
        let label = field.label();
        let kind = field_kind(field, message)?;

        let mut schema = match kind {
            Type::Double | Type::Float => Schema::new(SchemaKind::Number),
            Type::Int64
            | Type::Uint64
            | Type::Int32
            | Type::Uint32
            | Type::Fixed64
            | Type::Fixed32
            | Type::Sfixed32
            | Type::Sfixed64
            | Type::Sint32
            | Type::Sint64 => Schema::new(SchemaKind::Integer),
            Type::String | Type::Bytes => Schema::new(SchemaKind::String),
            Type::Bool => Schema::new(SchemaKind::Boolean),
            Type::Enum => Schema {
                enum_values: nested_enum_values(field, message),
                ..Schema::new(SchemaKind::string_or_integer())
            },
            Type::Group | Type::Message => Schema::object(match label {
                Label::Optional => Some(true),
                Label::Required => Some(false),
                Label::Repeated => None,
            }),
        };

        if label == Label::Repeated && !schema.kind.is_object() {
            // Enum values stay on the array node; items only carry the kind.
            return Ok(Schema {
                enum_values: schema.enum_values,
                ..Schema::array(Schema::new(schema.kind))
            });
        }
        if !schema.kind.is_object() {
            return Ok(schema);
        }

        let record = self
            .tree
            .lookup_from(self.package, field.type_name())
            .ok_or_else(|| ConvertError::UnresolvedTypeReference {
                type_name: field.type_name().to_string(),
                message: message.name().to_string(),
            })?;

        if self.inlining.iter().any(|m| std::ptr::eq(*m, record)) {
            return self.recursive_reference(field, message, label, schema);
        }

        let nested = self.convert_message(record)?;
        if label == Label::Repeated {
            schema.kind = SchemaKind::Array;
            schema.items = Some(Box::new(nested));
        } else {
            schema.properties = nested.properties;
        }
        Ok(schema)
    }

    /// Schema for a field whose message type is already being inlined
    /// further up: the object is kept but its properties are not expanded
    /// again.
    fn recursive_reference(
        &self,
        field: &FieldDescriptorProto,
        message: &DescriptorProto,
        label: Label,
        schema: Schema,
    ) -> Result<Schema, ConvertError> {
        match label {
            Label::Required => Err(ConvertError::RecursiveType {
                field: field.name().to_string(),
                message: message.name().to_string(),
                type_name: field.type_name().to_string(),
            }),
            Label::Repeated => {
                warn!(
                    field = field.name(),
                    message = message.name(),
                    type_name = field.type_name(),
                    "recursive message type is not expanded again"
                );
                Ok(Schema::array(Schema::object(Some(
                    self.options.allow_additional_properties,
                ))))
            }
            Label::Optional => {
                warn!(
                    field = field.name(),
                    message = message.name(),
                    type_name = field.type_name(),
                    "recursive message type is not expanded again"
                );
                Ok(schema)
            }
        }
    }
}

fn field_kind(field: &FieldDescriptorProto, message: &DescriptorProto) -> Result<Type, ConvertError> {
    field
        .r#type
        .and_then(|raw| Type::try_from(raw).ok())
        .ok_or_else(|| ConvertError::UnrecognizedFieldKind {
            field: field.name().to_string(),
            message: message.name().to_string(),
            kind: field.r#type,
        })
}

/// Enum values for an enum-typed field, taken from the enums nested directly
/// in the owning message.
///
/// A nested enum matches when the field's type name ends with
/// `.<Message>.<Enum>`.  Enums declared elsewhere (top level, sibling or
/// ancestor messages, other files) are never consulted, so such fields get
/// the bare `string | integer` union.
fn nested_enum_values(field: &FieldDescriptorProto, message: &DescriptorProto) -> Vec<EnumValue> {
    let type_name = field.type_name();
    message
        .enum_type
        .iter()
        .filter(|e| type_name.ends_with(&format!(".{}.{}", message.name(), e.name())))
        .flat_map(enum_values)
        .collect()
}
