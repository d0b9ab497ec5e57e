use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};

use super::body::{RequestBody, Response};
use super::operation::PathItem;
use super::parameter::Parameter;
use super::reference::RefOr;
use super::schema::SchemaOrRef;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Info {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Unquoted YAML versions such as `1.0` arrive as numbers.
    #[serde(deserialize_with = "scalar_string")]
    pub version: String,
}

fn scalar_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    })
}

fn optional_scalar_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    scalar_string(deserializer).map(Some)
}

/// OpenAPI 3.x reusable definitions.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Components {
    pub schemas: IndexMap<String, SchemaOrRef>,
    pub responses: IndexMap<String, RefOr<Response>>,
    pub parameters: IndexMap<String, RefOr<Parameter>>,
    pub request_bodies: IndexMap<String, RefOr<RequestBody>>,
}

/// Top-level API document, either OpenAPI 3.x or Swagger 2.0.
///
/// Swagger 2.0 keeps its reusable definitions at the top level, OpenAPI 3.x
/// under `components`. The lookup methods hide the difference.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiDocument {
    #[serde(default, deserialize_with = "optional_scalar_string")]
    pub openapi: Option<String>,
    #[serde(default, deserialize_with = "optional_scalar_string")]
    pub swagger: Option<String>,
    pub info: Info,
    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,
    #[serde(default)]
    pub components: Components,

    #[serde(default)]
    definitions: IndexMap<String, SchemaOrRef>,
    #[serde(default)]
    parameters: IndexMap<String, RefOr<Parameter>>,
    #[serde(default)]
    responses: IndexMap<String, RefOr<Response>>,
}

impl ApiDocument {
    /// The named schema table, from `components.schemas` or `definitions`.
    pub fn schemas(&self) -> &IndexMap<String, SchemaOrRef> {
        if self.components.schemas.is_empty() {
            &self.definitions
        } else {
            &self.components.schemas
        }
    }

    pub fn find_parameter(&self, name: &str) -> Option<&Parameter> {
        self.components
            .parameters
            .get(name)
            .or_else(|| self.parameters.get(name))
            .and_then(RefOr::as_item)
    }

    pub fn find_response(&self, name: &str) -> Option<&Response> {
        self.components
            .responses
            .get(name)
            .or_else(|| self.responses.get(name))
            .and_then(RefOr::as_item)
    }

    pub fn find_request_body(&self, name: &str) -> Option<&RequestBody> {
        self.components
            .request_bodies
            .get(name)
            .and_then(RefOr::as_item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swagger_two_definitions_and_shared_parameters() {
        let doc: ApiDocument = serde_yaml_ng::from_str(
            r#"
swagger: "2.0"
info: { title: Old, version: "1" }
definitions:
  Pet: { type: object }
parameters:
  Limit: { name: limit, in: query, type: integer }
"#,
        )
        .unwrap();
        assert!(doc.schemas().contains_key("Pet"));
        assert_eq!(doc.find_parameter("Limit").map(|p| p.name.as_str()), Some("limit"));
        assert!(doc.find_response("Missing").is_none());
    }

    #[test]
    fn test_numeric_version() {
        let doc: ApiDocument =
            serde_yaml_ng::from_str("swagger: 2.0\ninfo: { title: T, version: 1.5 }\n").unwrap();
        assert_eq!(doc.info.version, "1.5");
        assert_eq!(doc.swagger.as_deref(), Some("2.0"));
    }
}
