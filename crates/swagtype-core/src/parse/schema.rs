use indexmap::IndexMap;
use serde::Deserialize;

/// A `type` keyword value. `file` only appears in Swagger 2.0 documents.
/// Anything unrecognised lands in `Unknown` and resolves to `any`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
    Null,
    File,
    #[serde(other)]
    Unknown,
}

/// `type` is either one keyword or, in OpenAPI 3.1, a list of them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TypeSet {
    Single(SchemaType),
    Multiple(Vec<SchemaType>),
}

impl TypeSet {
    /// The first non-`null` keyword, which decides how the schema resolves.
    pub fn primary(&self) -> Option<SchemaType> {
        match self {
            TypeSet::Single(t) => Some(*t),
            TypeSet::Multiple(types) => types.iter().copied().find(|t| *t != SchemaType::Null),
        }
    }
}

/// A schema position: a `$ref` or an inline schema.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SchemaOrRef {
    Ref {
        #[serde(rename = "$ref")]
        ref_path: String,
    },
    Schema(Box<Schema>),
}

impl SchemaOrRef {
    pub fn as_ref_path(&self) -> Option<&str> {
        match self {
            SchemaOrRef::Ref { ref_path } => Some(ref_path),
            SchemaOrRef::Schema(_) => None,
        }
    }
}

/// The keywords the resolver looks at; everything else is ignored.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Schema {
    #[serde(rename = "type")]
    pub schema_type: Option<TypeSet>,
    pub description: Option<String>,
    #[serde(rename = "default")]
    pub default_value: Option<serde_json::Value>,

    pub properties: IndexMap<String, SchemaOrRef>,
    pub required: Vec<String>,
    pub items: Option<Box<SchemaOrRef>>,

    pub all_of: Vec<SchemaOrRef>,
    pub one_of: Vec<SchemaOrRef>,
    pub any_of: Vec<SchemaOrRef>,

    #[serde(rename = "enum")]
    pub enum_values: Vec<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ref_takes_precedence_over_siblings() {
        let s: SchemaOrRef =
            serde_yaml_ng::from_str("$ref: '#/components/schemas/Pet'\ndescription: x\n").unwrap();
        assert_eq!(s.as_ref_path(), Some("#/components/schemas/Pet"));
    }

    #[test]
    fn test_primary_type_skips_null() {
        let s: Schema = serde_yaml_ng::from_str("type: ['null', integer]\n").unwrap();
        assert_eq!(
            s.schema_type.and_then(|t| t.primary()),
            Some(SchemaType::Integer)
        );
    }

    #[test]
    fn test_unrecognised_type_keyword() {
        let s: SchemaOrRef = serde_yaml_ng::from_str("type: int\ndescription: odd\n").unwrap();
        let SchemaOrRef::Schema(schema) = s else {
            panic!("expected inline schema");
        };
        assert_eq!(
            schema.schema_type.and_then(|t| t.primary()),
            Some(SchemaType::Unknown)
        );
        assert_eq!(schema.description.as_deref(), Some("odd"));
    }

    #[test]
    fn test_composition_keywords() {
        let s: Schema = serde_yaml_ng::from_str(
            "allOf:\n  - $ref: '#/components/schemas/Base'\nanyOf:\n  - type: string\n",
        )
        .unwrap();
        assert_eq!(s.all_of[0].as_ref_path(), Some("#/components/schemas/Base"));
        assert_eq!(s.any_of.len(), 1);
        assert!(s.one_of.is_empty());
    }
}
