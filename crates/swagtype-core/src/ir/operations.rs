use std::fmt;

use super::schemas::ResolvedProperty;

/// HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Options,
    Head,
    Trace,
}

impl HttpMethod {
    /// Every method, in the order operations are listed within a path.
    pub const ALL: [HttpMethod; 8] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
        HttpMethod::Patch,
        HttpMethod::Options,
        HttpMethod::Head,
        HttpMethod::Trace,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
            HttpMethod::Trace => "TRACE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a field of a request or response type came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldOrigin {
    Query,
    Path,
    Header,
    Cookie,
    FormData,
    RequestBody,
}

/// A documented operation bound to resolved field lists.
///
/// A type name is `None` when the operation has nothing to put in that type;
/// emitters skip the block.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedOperation {
    pub url: String,
    pub method: HttpMethod,
    pub summary: String,
    pub tag: String,
    pub request_type_name: Option<String>,
    pub response_type_name: Option<String>,
    pub parameters: Option<Vec<ResolvedProperty>>,
    pub request_body: Option<Vec<ResolvedProperty>>,
    pub responses: Option<Vec<ResolvedProperty>>,
}

impl ResolvedOperation {
    /// Parameters followed by request body fields.
    pub fn request_fields(&self) -> impl Iterator<Item = &ResolvedProperty> {
        self.parameters
            .iter()
            .flatten()
            .chain(self.request_body.iter().flatten())
    }
}
