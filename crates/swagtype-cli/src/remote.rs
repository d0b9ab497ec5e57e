use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use log::debug;
use reqwest::Client;
use swagtype_core::config::ServerConfig;
use swagtype_core::error::FetchError;
use swagtype_core::parse::{self, document::ApiDocument};
use swagtype_core::source::DocumentSource;

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches documents over HTTP(S), or from disk for anything that is not a URL.
pub struct RemoteSource {
    client: Client,
}

impl RemoteSource {
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(HTTP_TIMEOUT).build()?;
        Ok(Self { client })
    }

    async fn fetch_http(&self, server: &ServerConfig) -> Result<String, FetchError> {
        let transport = |source: reqwest::Error| FetchError::Transport {
            url: server.url.clone(),
            source: Box::new(source),
        };

        let mut request = self.client.get(&server.url).query(&server.params);
        if let Some(token) = &server.auth_token {
            request = request.bearer_auth(token);
        }
        for (name, value) in &server.headers {
            request = request.header(name, value);
        }

        debug!("GET {}", server.url);
        let response = request
            .send()
            .await
            .map_err(transport)?
            .error_for_status()
            .map_err(transport)?;
        response.text().await.map_err(transport)
    }
}

impl DocumentSource for RemoteSource {
    fn fetch(
        &self,
        server: &ServerConfig,
    ) -> impl Future<Output = Result<ApiDocument, FetchError>> + Send {
        async move {
            let body = if is_url(&server.url) {
                self.fetch_http(server).await?
            } else {
                read_local(&server.url).await?
            };
            parse::from_str(&body).map_err(|source| FetchError::Parse {
                url: server.url.clone(),
                source,
            })
        }
    }
}

async fn read_local(path: &str) -> Result<String, FetchError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| FetchError::Read {
            path: PathBuf::from(path),
            source,
        })
}

/// Check if a string looks like a URL (starts with http:// or https://).
fn is_url(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}
