use std::borrow::Cow;

use serde::Deserialize;

use super::schema::{Schema, SchemaOrRef, TypeSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterLocation {
    Query,
    Header,
    Path,
    Cookie,
    /// Swagger 2.0 request body parameter.
    Body,
    /// Swagger 2.0 form field.
    FormData,
}

/// An operation or path parameter.
///
/// OpenAPI 3.x nests the type under `schema`; Swagger 2.0 puts `type`,
/// `items` and `enum` on the parameter itself.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub schema: Option<SchemaOrRef>,

    #[serde(rename = "type", default)]
    inline_type: Option<TypeSet>,
    #[serde(default)]
    items: Option<Box<SchemaOrRef>>,
    #[serde(rename = "enum", default)]
    enum_values: Vec<serde_json::Value>,
    #[serde(rename = "default", default)]
    default_value: Option<serde_json::Value>,
}

impl Parameter {
    /// The schema describing this parameter's value, whichever dialect
    /// declared it.
    pub fn effective_schema(&self) -> Option<Cow<'_, SchemaOrRef>> {
        if let Some(schema) = &self.schema {
            return Some(Cow::Borrowed(schema));
        }
        let inline_type = self.inline_type.clone()?;
        Some(Cow::Owned(SchemaOrRef::Schema(Box::new(Schema {
            schema_type: Some(inline_type),
            items: self.items.clone(),
            enum_values: self.enum_values.clone(),
            ..Schema::default()
        }))))
    }

    /// `default` from the parameter, falling back to its schema's.
    pub fn default_value(&self) -> Option<&serde_json::Value> {
        self.default_value.as_ref().or(match &self.schema {
            Some(SchemaOrRef::Schema(s)) => s.default_value.as_ref(),
            _ => None,
        })
    }
}
