pub mod body;
pub mod document;
pub mod operation;
pub mod parameter;
pub mod reference;
pub mod schema;

use crate::error::ParseError;
use document::ApiDocument;

/// Parse an API document from YAML.
pub fn from_yaml(input: &str) -> Result<ApiDocument, ParseError> {
    let doc: ApiDocument = serde_yaml_ng::from_str(input)?;
    validate_version(&doc)?;
    Ok(doc)
}

/// Parse an API document from JSON.
pub fn from_json(input: &str) -> Result<ApiDocument, ParseError> {
    let doc: ApiDocument = serde_json::from_str(input)?;
    validate_version(&doc)?;
    Ok(doc)
}

/// Parse a document whose format is unknown: JSON first, then YAML.
pub fn from_str(input: &str) -> Result<ApiDocument, ParseError> {
    if input.trim_start().starts_with('{') {
        return from_json(input);
    }
    from_yaml(input)
}

fn validate_version(doc: &ApiDocument) -> Result<(), ParseError> {
    match (doc.openapi.as_deref(), doc.swagger.as_deref()) {
        (Some(v), _) if v.starts_with("3.") => Ok(()),
        (None, Some(v)) if v.starts_with("2.") => Ok(()),
        (Some(v), _) | (None, Some(v)) => Err(ParseError::UnsupportedVersion(v.to_string())),
        (None, None) => Err(ParseError::UnsupportedVersion("<missing>".to_string())),
    }
}
