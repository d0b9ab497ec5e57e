use serde_json::Value;
use swagtype_core::ir::{ResolvedProperty, TypeDescriptor};

const RECORD: &str = "Record<string, any>";

/// Map a `TypeDescriptor` to its TypeScript type string.
///
/// `force_required` applies to the fields of inline object literals, the
/// same way it applies to the top-level fields of a block.
pub fn descriptor_to_ts(descriptor: &TypeDescriptor, force_required: bool) -> String {
    match descriptor {
        TypeDescriptor::Primitive(p) => p.as_str().to_string(),
        TypeDescriptor::Enum { base, values } => {
            if values.is_empty() {
                return base.as_str().to_string();
            }
            values.iter().map(literal_to_ts).collect::<Vec<_>>().join(" | ")
        }
        TypeDescriptor::Array(inner) => {
            format!("Array<{}>", descriptor_to_ts(inner, force_required))
        }
        TypeDescriptor::Object(fields) => {
            if fields.is_empty() {
                return RECORD.to_string();
            }
            let field_strs: Vec<String> = fields
                .iter()
                .map(|f| inline_field(f, force_required))
                .collect();
            format!("{{ {} }}", field_strs.join("; "))
        }
        TypeDescriptor::Record => RECORD.to_string(),
        TypeDescriptor::Any | TypeDescriptor::Pending(_) => "any".to_string(),
    }
}

fn inline_field(field: &ResolvedProperty, force_required: bool) -> String {
    let optional = if force_required || field.required {
        ""
    } else {
        "?"
    };
    format!(
        "{}{optional}: {}",
        field_key(&field.key),
        descriptor_to_ts(&field.descriptor, force_required)
    )
}

/// Keys containing `-`, `_` or `.` are emitted as string literals.
pub fn field_key(key: &str) -> String {
    if key.contains(['-', '_', '.']) {
        format!("'{}'", key.replace('\'', "\\'"))
    } else {
        key.to_string()
    }
}

fn literal_to_ts(value: &Value) -> String {
    match value {
        Value::String(s) => format!("'{}'", s.replace('\'', "\\'")),
        other => other.to_string(),
    }
}
