use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::ConfigError;

/// Top-level project configuration loaded from `.swagtype.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SwagtypeConfig {
    pub output_path: String,
    pub required_request_field: bool,
    pub required_response_field: bool,
    pub servers: Vec<ServerConfig>,
}

impl Default for SwagtypeConfig {
    fn default() -> Self {
        Self {
            output_path: "src/types".to_string(),
            required_request_field: false,
            required_response_field: true,
            servers: Vec::new(),
        }
    }
}

impl SwagtypeConfig {
    pub fn policy(&self) -> OutputPolicy {
        OutputPolicy {
            required_request_field: self.required_request_field,
            required_response_field: self.required_response_field,
        }
    }
}

/// One API document to fetch.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// `http(s)` URL or local path of the document.
    pub url: String,
    /// Business name; defaults to the document title.
    pub name: Option<String>,
    /// Version token such as `v2`; defaults to the document's major version.
    pub version: Option<String>,
    /// Sent as `Authorization: Bearer <token>`.
    pub auth_token: Option<String>,
    pub headers: IndexMap<String, String>,
    /// Query string parameters appended to the request.
    pub params: IndexMap<String, String>,
    /// Appended to every synthesized type name for this server.
    pub type_name_suffix: Option<String>,
}

/// Whether emitted fields follow the schema's `required` flags or are forced
/// to required.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputPolicy {
    pub required_request_field: bool,
    pub required_response_field: bool,
}

impl Default for OutputPolicy {
    fn default() -> Self {
        Self {
            required_request_field: false,
            required_response_field: true,
        }
    }
}

/// Naming context for one fetched document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessConfig {
    pub name: String,
    pub version: String,
    pub type_name_suffix: Option<String>,
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            version: BASELINE_VERSION.to_string(),
            type_name_suffix: None,
        }
    }
}

/// Version that adds no token to type names.
pub const BASELINE_VERSION: &str = "v1";

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".swagtype.yaml";

/// Load config from a YAML file.
pub fn load_config(path: &Path) -> Result<SwagtypeConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_yaml_ng::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# swagtype configuration
output_path: src/types

# Force every request field to be required (default: follow the schema).
required_request_field: false
# Force every response field to be required (default: true).
required_response_field: true

servers:
  - url: https://petstore3.swagger.io/api/v3/openapi.json
    # name: petstore          # defaults to the document title
    # version: v3             # defaults to the document's major version
    # auth_token: secret      # sent as a bearer token
    # type_name_suffix: Pet   # appended to every generated type name
    # headers:
    #   X-Tenant: acme
    # params:
    #   group: public
"#
}
