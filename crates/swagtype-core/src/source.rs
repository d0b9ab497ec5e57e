use std::future::Future;

use futures::future::join_all;
use log::{error, info};

use crate::config::{BASELINE_VERSION, BusinessConfig, ServerConfig};
use crate::error::FetchError;
use crate::parse::document::ApiDocument;

/// Something that can produce the API document a server descriptor points to.
pub trait DocumentSource {
    fn fetch(
        &self,
        server: &ServerConfig,
    ) -> impl Future<Output = Result<ApiDocument, FetchError>> + Send;
}

/// A successfully retrieved document with its naming context.
#[derive(Debug, Clone)]
pub struct FetchedDocument {
    pub business: BusinessConfig,
    pub document: ApiDocument,
}

impl FetchedDocument {
    pub fn new(server: &ServerConfig, document: ApiDocument) -> Self {
        let name = server
            .name
            .clone()
            .filter(|n| !n.trim().is_empty())
            .or_else(|| Some(document.info.title.trim().to_string()).filter(|t| !t.is_empty()))
            .unwrap_or_else(|| "default".to_string());
        let version = server
            .version
            .clone()
            .unwrap_or_else(|| version_token(&document.info.version));
        Self {
            business: BusinessConfig {
                name,
                version,
                type_name_suffix: server.type_name_suffix.clone(),
            },
            document,
        }
    }
}

/// Derive `vN` from the first run of digits in a declared version string.
///
/// - `"2.3.1"` → `"v2"`
/// - `"v3"` → `"v3"`
/// - `"beta"` → `"v1"`
pub fn version_token(declared: &str) -> String {
    let major: String = declared
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(char::is_ascii_digit)
        .collect();
    let major = major.trim_start_matches('0');
    if major.is_empty() {
        BASELINE_VERSION.to_string()
    } else {
        format!("v{major}")
    }
}

/// Fetch every server concurrently. Failures are logged and left out; they
/// never cancel the other fetches.
pub async fn fetch_all<S>(source: &S, servers: &[ServerConfig]) -> Vec<FetchedDocument>
where
    S: DocumentSource + Sync,
{
    let results = join_all(
        servers
            .iter()
            .map(|server| async move { (server, source.fetch(server).await) }),
    )
    .await;

    results
        .into_iter()
        .filter_map(|(server, result)| match result {
            Ok(document) => {
                let fetched = FetchedDocument::new(server, document);
                info!(
                    "fetched {} as '{}' ({})",
                    server.url, fetched.business.name, fetched.business.version
                );
                Some(fetched)
            }
            Err(e) => {
                error!("skipping {}: {e}", server.url);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    fn document(title: &str, version: &str) -> ApiDocument {
        let yaml = format!("openapi: 3.0.1\ninfo:\n  title: '{title}'\n  version: '{version}'\n");
        parse::from_yaml(&yaml).unwrap()
    }

    #[test]
    fn test_version_token() {
        assert_eq!(version_token("2.3.1"), "v2");
        assert_eq!(version_token("v3"), "v3");
        assert_eq!(version_token("1.0.0"), "v1");
        assert_eq!(version_token("beta"), "v1");
        assert_eq!(version_token("release-10.2"), "v10");
    }

    #[test]
    fn test_business_name_precedence() {
        let named = ServerConfig {
            name: Some("billing".to_string()),
            ..ServerConfig::default()
        };
        let doc = document("Billing API", "2.0");
        assert_eq!(FetchedDocument::new(&named, doc.clone()).business.name, "billing");

        let unnamed = ServerConfig::default();
        let fetched = FetchedDocument::new(&unnamed, doc);
        assert_eq!(fetched.business.name, "Billing API");
        assert_eq!(fetched.business.version, "v2");

        let untitled = FetchedDocument::new(&unnamed, document("  ", "1"));
        assert_eq!(untitled.business.name, "default");
    }

    #[test]
    fn test_explicit_version_wins() {
        let server = ServerConfig {
            version: Some("v5".to_string()),
            type_name_suffix: Some("Ext".to_string()),
            ..ServerConfig::default()
        };
        let fetched = FetchedDocument::new(&server, document("T", "2.0"));
        assert_eq!(fetched.business.version, "v5");
        assert_eq!(fetched.business.type_name_suffix.as_deref(), Some("Ext"));
    }
}
