use indexmap::IndexMap;
use serde::Deserialize;

use super::schema::SchemaOrRef;

pub const JSON_MEDIA_TYPE: &str = "application/json";
const ANY_MEDIA_TYPE: &str = "*/*";

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct MediaType {
    pub schema: Option<SchemaOrRef>,
}

/// A `content` map keyed by media type, in document order.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(transparent)]
pub struct Content(IndexMap<String, MediaType>);

impl Content {
    pub fn schema_for(&self, media_type: &str) -> Option<&SchemaOrRef> {
        self.0.get(media_type).and_then(|mt| mt.schema.as_ref())
    }

    /// `application/json`, then the first other `*json*` entry, then `*/*`.
    pub fn json_schema(&self) -> Option<&SchemaOrRef> {
        self.schema_for(JSON_MEDIA_TYPE)
            .or_else(|| {
                self.0
                    .iter()
                    .find(|(key, _)| key.contains("json"))
                    .and_then(|(_, mt)| mt.schema.as_ref())
            })
            .or_else(|| self.schema_for(ANY_MEDIA_TYPE))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct RequestBody {
    pub description: Option<String>,
    pub content: Content,
    pub required: bool,
}

impl RequestBody {
    /// Only `application/json` bodies become request fields.
    pub fn json_schema(&self) -> Option<&SchemaOrRef> {
        self.content.schema_for(JSON_MEDIA_TYPE)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Response {
    pub description: Option<String>,
    pub content: Content,
    /// Swagger 2.0 puts the body schema directly on the response.
    pub schema: Option<SchemaOrRef>,
}

impl Response {
    pub fn json_schema(&self) -> Option<&SchemaOrRef> {
        self.content.json_schema().or(self.schema.as_ref())
    }
}
