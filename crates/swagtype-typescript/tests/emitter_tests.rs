use swagtype_core::TypeEmitter;
use swagtype_core::config::{BusinessConfig, OutputPolicy};
use swagtype_core::ir::{HttpMethod, ResolvedOperation};
use swagtype_core::parse;
use swagtype_core::transform::{resolve_paths, resolve_schemas};
use swagtype_typescript::TypeScriptEmitter;

const PETSTORE: &str = include_str!("../../swagtype-core/tests/fixtures/petstore.yaml");

fn petstore_operations() -> Vec<ResolvedOperation> {
    let doc = parse::from_yaml(PETSTORE).unwrap();
    let schemas = resolve_schemas(doc.schemas()).unwrap();
    resolve_paths(&doc, &schemas, &BusinessConfig::default()).unwrap()
}

fn only(method: HttpMethod, url: &str) -> Vec<ResolvedOperation> {
    petstore_operations()
        .into_iter()
        .filter(|op| op.method == method && op.url == url)
        .collect()
}

fn emit(ops: &[ResolvedOperation], policy: OutputPolicy) -> String {
    TypeScriptEmitter::new()
        .emit("petstore", ops, &policy)
        .unwrap()
}

#[test]
fn response_interface_for_single_pet() {
    let out = emit(
        &only(HttpMethod::Get, "/pets/{petId}"),
        OutputPolicy::default(),
    );
    insta::assert_snapshot!(out, @r"
/**
 * Find pet by ID
 *
 * @url /pets/{petId}
 * @method GET
 * @business petstore
 */
export interface GetPetsPetIdReqType {
  /** petId */
  petId: number;
}

/**
 * Find pet by ID
 *
 * @url /pets/{petId}
 * @method GET
 * @business petstore
 */
export interface GetPetsPetIdResType {
  /** Unique identifier */
  id: number;
  name: string;
}
");
}

#[test]
fn default_policy_keeps_optional_request_fields() {
    let out = emit(&only(HttpMethod::Post, "/api/pets"), OutputPolicy::default());
    let request = concat!(
        "export interface PostPetsReqType {\n",
        "  name: string;\n",
        "  'tag-line'?: string;\n",
        "}",
    );
    assert!(out.contains(request));
    assert!(out.contains("export interface PostPetsResType {\n"));
    assert!(out.contains("  id: number;\n  name: string;\n"));
}

#[test]
fn strict_request_policy_drops_optional_markers() {
    let policy = OutputPolicy {
        required_request_field: true,
        required_response_field: false,
    };
    let out = emit(&only(HttpMethod::Get, "/api/pets"), policy);
    assert!(out.contains("  /** How many items to return */\n  limit: number;\n"));
    assert!(out.contains("  status: 'available' | 'sold';\n"));
    assert!(out.contains("  id: number;\n  name?: string;\n"));
}

#[test]
fn nested_objects_render_inline() {
    let out = emit(&only(HttpMethod::Put, "/orders"), OutputPolicy::default());
    assert!(out.contains(" * Replace an order . Multi-line description.\n"));
    let customer = concat!(
        "  /** A buying customer */\n",
        "  customer?: { name?: string; address?: { city?: string } };\n",
    );
    assert!(out.contains(customer));
    assert!(out.contains("  items?: Array<{ sku?: string; quantity?: number }>;\n"));
    assert!(out.contains("  customer: { name: string; address: { city: string } };\n"));
    assert!(out.contains("  items: Array<{ sku: string; quantity: number }>;\n"));
}

#[test]
fn operations_without_types_are_skipped() {
    let out = emit(&petstore_operations(), OutputPolicy::default());
    assert!(!out.contains("GetHealthReqType"));
    assert!(!out.contains("DeletePetsPetIdResType"));
    assert!(out.contains("export interface DeletePetsPetIdReqType {\n"));
    assert!(out.contains("  'uptime_seconds': number;\n"));
    assert_eq!(out.matches("export interface").count(), 10);
}

#[test]
fn single_schema_document_end_to_end() {
    let yaml = r#"
openapi: 3.0.0
info: { title: Pets, version: "1.0" }
paths:
  /pets/{id}:
    get:
      summary: Get a pet
      responses:
        "200":
          description: ok
          content:
            application/json:
              schema: { $ref: '#/components/schemas/Pet' }
components:
  schemas:
    Pet:
      type: object
      required: [id]
      properties:
        id: { type: number }
        name: { type: string }
"#;
    let doc = parse::from_yaml(yaml).unwrap();
    let schemas = resolve_schemas(doc.schemas()).unwrap();
    let ops = resolve_paths(&doc, &schemas, &BusinessConfig::default()).unwrap();
    let out = emit(&ops, OutputPolicy::default());

    let pet = concat!(
        "export interface GetPetsIdResType {\n",
        "  id: number;\n",
        "  name: string;\n",
        "}\n\n",
    );
    assert!(out.contains(pet));
    assert!(!out.contains("ReqType"));
}
