use std::future::Future;

use swagtype_core::config::{OutputPolicy, ServerConfig};
use swagtype_core::error::{EmitError, FetchError, PipelineError};
use swagtype_core::ir::ResolvedOperation;
use swagtype_core::parse;
use swagtype_core::parse::document::ApiDocument;
use swagtype_core::pipeline::generate;
use swagtype_core::source::{DocumentSource, fetch_all};
use swagtype_core::TypeEmitter;

const PETSTORE: &str = include_str!("fixtures/petstore.yaml");
const SWAGGER2: &str = include_str!("fixtures/swagger2.yaml");

/// Serves fixtures by URL; anything else fails like a network error.
struct FixtureSource;

impl DocumentSource for FixtureSource {
    fn fetch(
        &self,
        server: &ServerConfig,
    ) -> impl Future<Output = Result<ApiDocument, FetchError>> + Send {
        let url = server.url.clone();
        async move {
            let body = match url.as_str() {
                "mem://petstore" => PETSTORE,
                "mem://legacy" => SWAGGER2,
                _ => {
                    return Err(FetchError::Transport {
                        url,
                        source: "connection refused".into(),
                    });
                }
            };
            parse::from_yaml(body).map_err(|source| FetchError::Parse { url, source })
        }
    }
}

/// Lists the type names it was asked to render.
struct NameEmitter;

impl TypeEmitter for NameEmitter {
    fn file_extension(&self) -> &'static str {
        "txt"
    }

    fn emit(
        &self,
        business: &str,
        operations: &[ResolvedOperation],
        _policy: &OutputPolicy,
    ) -> Result<String, EmitError> {
        let mut out = format!("# {business}\n");
        for op in operations {
            for name in [&op.request_type_name, &op.response_type_name]
                .into_iter()
                .flatten()
            {
                out.push_str(name);
                out.push('\n');
            }
        }
        Ok(out)
    }
}

fn server(url: &str) -> ServerConfig {
    ServerConfig {
        url: url.to_string(),
        ..ServerConfig::default()
    }
}

#[tokio::test]
async fn failed_fetch_does_not_affect_siblings() {
    let servers = vec![
        server("mem://petstore"),
        server("mem://unreachable"),
        server("mem://legacy"),
    ];
    let fetched = fetch_all(&FixtureSource, &servers).await;
    let names: Vec<&str> = fetched.iter().map(|f| f.business.name.as_str()).collect();
    assert_eq!(names, vec!["Petstore", "Legacy Users"]);
    assert_eq!(fetched[0].business.version, "v2");
    assert_eq!(fetched[1].business.version, "v1");
}

#[tokio::test]
async fn generates_one_file_per_business() {
    let servers = vec![server("mem://petstore"), server("mem://legacy")];
    let fetched = fetch_all(&FixtureSource, &servers).await;
    let files = generate(&fetched, &OutputPolicy::default(), &NameEmitter).unwrap();

    let paths: Vec<&str> = files.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(paths, vec!["Petstore.txt", "Legacy Users.txt"]);
    assert!(files[0].content.contains("GetHealthResTypeV2\n"));
    assert!(!files[0].content.contains("GetHealthReqType"));
    assert!(files[1].content.contains("PostUserAccountsReqType\n"));
}

#[tokio::test]
async fn shared_business_name_is_aggregated() {
    let mut first = server("mem://petstore");
    first.name = Some("shop".to_string());
    let mut second = server("mem://legacy");
    second.name = Some("shop".to_string());

    let fetched = fetch_all(&FixtureSource, &[first, second]).await;
    let files = generate(&fetched, &OutputPolicy::default(), &NameEmitter).unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].path, "shop.txt");
    assert_eq!(files[0].content.matches("# shop\n").count(), 2);
}

#[test]
fn resolution_error_aborts_run() {
    let broken = r#"
openapi: 3.0.0
info: { title: Broken, version: "1" }
components:
  schemas:
    Bad:
      type: object
      properties:
        x: { $ref: '#/components/schemas/' }
"#;
    let doc = parse::from_yaml(broken).unwrap();
    let fetched = vec![swagtype_core::source::FetchedDocument::new(
        &server("mem://broken"),
        doc,
    )];
    let err = generate(&fetched, &OutputPolicy::default(), &NameEmitter).unwrap_err();
    assert!(matches!(err, PipelineError::Resolve { ref business, .. } if business == "Broken"));
}
