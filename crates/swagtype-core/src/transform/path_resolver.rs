use log::{debug, warn};

use crate::config::BusinessConfig;
use crate::error::ResolveError;
use crate::ir::{
    FieldOrigin, HttpMethod, ResolvedOperation, ResolvedProperty, SchemaTable, TypeDescriptor,
};
use crate::parse::body::{RequestBody, Response};
use crate::parse::document::ApiDocument;
use crate::parse::operation::Operation;
use crate::parse::parameter::{Parameter, ParameterLocation};
use crate::parse::reference::RefOr;
use crate::parse::schema::SchemaOrRef;

use super::description::clean_description;
use super::schema_resolver::{ResolutionContext, ref_name};
use super::type_name::{TypeRole, synthesize};

/// Response statuses consulted for the response type, in priority order.
const SUCCESS_STATUSES: [&str; 3] = ["200", "201", "204"];

/// Bind every documented operation to resolved field lists and type names.
pub fn resolve_paths(
    doc: &ApiDocument,
    schemas: &SchemaTable,
    business: &BusinessConfig,
) -> Result<Vec<ResolvedOperation>, ResolveError> {
    let resolver = PathResolver {
        doc,
        schemas,
        business,
    };
    let mut operations = Vec::new();
    for (url, item) in &doc.paths {
        for (method, op) in item.operations() {
            operations.push(resolver.resolve_operation(url, method, &item.parameters, op)?);
        }
    }
    Ok(operations)
}

struct PathResolver<'a> {
    doc: &'a ApiDocument,
    schemas: &'a SchemaTable,
    business: &'a BusinessConfig,
}

impl PathResolver<'_> {
    fn resolve_operation(
        &self,
        url: &str,
        method: HttpMethod,
        path_params: &[RefOr<Parameter>],
        op: &Operation,
    ) -> Result<ResolvedOperation, ResolveError> {
        let declared = self.collect_parameters(path_params, &op.parameters)?;

        let mut parameters = Vec::new();
        let mut body_schema = None;
        for param in declared {
            if param.location == ParameterLocation::Body {
                body_schema = param.schema.as_ref();
            } else {
                parameters.push(self.resolve_parameter(param)?);
            }
        }

        let body_schema = match &op.request_body {
            Some(body) => self.request_body_schema(body)?,
            None => body_schema,
        };
        let request_body = match body_schema {
            Some(_) if method == HttpMethod::Get => {
                debug!("{method} {url}: ignoring request body on GET");
                None
            }
            Some(schema) => {
                let fields = self.named_fields(schema)?;
                if fields.is_none() {
                    warn!("{method} {url}: request body schema could not be resolved");
                }
                fields.map(|fields| tag_origin(fields, FieldOrigin::RequestBody))
            }
            None => None,
        };

        let responses = self.resolve_responses(url, method, op)?;

        let parameters = (!parameters.is_empty()).then_some(parameters);
        let request_type_name = (parameters.is_some() || request_body.is_some())
            .then(|| synthesize(method, url, TypeRole::Request, self.business));
        let response_type_name = responses
            .is_some()
            .then(|| synthesize(method, url, TypeRole::Response, self.business));

        Ok(ResolvedOperation {
            url: url.to_string(),
            method,
            summary: op
                .summary
                .as_deref()
                .or(op.description.as_deref())
                .and_then(|s| clean_description(Some(s)))
                .unwrap_or_default(),
            tag: op
                .tags
                .first()
                .cloned()
                .unwrap_or_else(|| "default".to_string()),
            request_type_name,
            response_type_name,
            parameters,
            request_body,
            responses,
        })
    }

    /// Path-level parameters followed by operation-level ones; an operation
    /// parameter replaces a path parameter with the same name and location.
    fn collect_parameters<'p>(
        &'p self,
        path_params: &'p [RefOr<Parameter>],
        op_params: &'p [RefOr<Parameter>],
    ) -> Result<Vec<&'p Parameter>, ResolveError> {
        let mut out: Vec<&Parameter> = Vec::new();
        for param in path_params {
            if let Some(p) = self.lookup_parameter(param)? {
                out.push(p);
            }
        }
        for param in op_params {
            if let Some(p) = self.lookup_parameter(param)? {
                out.retain(|existing| {
                    !(existing.name == p.name && existing.location == p.location)
                });
                out.push(p);
            }
        }
        Ok(out)
    }

    fn lookup_parameter<'p>(
        &'p self,
        param: &'p RefOr<Parameter>,
    ) -> Result<Option<&'p Parameter>, ResolveError> {
        match param {
            RefOr::Item(p) => Ok(Some(p)),
            RefOr::Ref { ref_path } => {
                let found = self.doc.find_parameter(ref_name(ref_path)?);
                if found.is_none() {
                    warn!("parameter reference {ref_path} not found, skipping");
                }
                Ok(found)
            }
        }
    }

    fn resolve_parameter(&self, param: &Parameter) -> Result<ResolvedProperty, ResolveError> {
        let mut ctx = ResolutionContext::new(self.schemas);
        let schema = param.effective_schema();
        let descriptor = match schema.as_deref() {
            Some(s) => ctx.resolve_type(s)?,
            None => TypeDescriptor::Any,
        };
        let description = clean_description(param.description.as_deref())
            .or_else(|| schema.as_deref().and_then(|s| ctx.description_of(s)))
            .or_else(|| {
                param
                    .name
                    .to_ascii_lowercase()
                    .ends_with("id")
                    .then(|| param.name.clone())
            });
        Ok(ResolvedProperty {
            key: param.name.clone(),
            descriptor,
            description,
            required: param.required,
            origin: Some(origin_of(param.location)),
            default: param.default_value().cloned(),
        })
    }

    fn request_body_schema<'b>(
        &'b self,
        body: &'b RefOr<RequestBody>,
    ) -> Result<Option<&'b SchemaOrRef>, ResolveError> {
        let body = match body {
            RefOr::Item(rb) => rb,
            RefOr::Ref { ref_path } => match self.doc.find_request_body(ref_name(ref_path)?) {
                Some(rb) => rb,
                None => {
                    warn!("request body reference {ref_path} not found");
                    return Ok(None);
                }
            },
        };
        Ok(body.json_schema())
    }

    fn resolve_responses(
        &self,
        url: &str,
        method: HttpMethod,
        op: &Operation,
    ) -> Result<Option<Vec<ResolvedProperty>>, ResolveError> {
        let Some(response) = SUCCESS_STATUSES
            .iter()
            .find_map(|status| op.responses.get(*status))
        else {
            debug!("{method} {url}: no 200/201/204 response documented");
            return Ok(None);
        };

        let response: &Response = match response {
            RefOr::Item(r) => r,
            RefOr::Ref { ref_path } => {
                let name = ref_name(ref_path)?;
                match self.doc.find_response(name) {
                    Some(r) => r,
                    None => return Ok(self.schema_fields(name)),
                }
            }
        };
        match response.json_schema() {
            Some(schema) => self.named_fields(schema),
            None => {
                warn!("{method} {url}: success response has no JSON schema");
                Ok(None)
            }
        }
    }

    /// Field list for a body schema: the properties of the named schema it
    /// references directly, through its first `allOf` element, or as its
    /// array item. An inline object contributes its own properties.
    fn named_fields(
        &self,
        schema: &SchemaOrRef,
    ) -> Result<Option<Vec<ResolvedProperty>>, ResolveError> {
        let target = match schema {
            SchemaOrRef::Ref { ref_path } => Some(ref_path.as_str()),
            SchemaOrRef::Schema(s) => s
                .all_of
                .first()
                .and_then(SchemaOrRef::as_ref_path)
                .or_else(|| s.items.as_deref().and_then(SchemaOrRef::as_ref_path)),
        };
        if let Some(ref_path) = target {
            return Ok(self.schema_fields(ref_name(ref_path)?));
        }

        let descriptor = ResolutionContext::new(self.schemas).resolve_type(schema)?;
        Ok(descriptor
            .fields()
            .filter(|f| !f.is_empty())
            .map(<[ResolvedProperty]>::to_vec))
    }

    fn schema_fields(&self, name: &str) -> Option<Vec<ResolvedProperty>> {
        let fields = self
            .schemas
            .get(name)
            .and_then(|s| s.properties())
            .filter(|props| !props.is_empty())
            .map(<[ResolvedProperty]>::to_vec);
        if fields.is_none() {
            debug!("schema {name} has no properties to bind");
        }
        fields
    }
}

fn origin_of(location: ParameterLocation) -> FieldOrigin {
    match location {
        ParameterLocation::Query => FieldOrigin::Query,
        ParameterLocation::Path => FieldOrigin::Path,
        ParameterLocation::Header => FieldOrigin::Header,
        ParameterLocation::Cookie => FieldOrigin::Cookie,
        ParameterLocation::FormData => FieldOrigin::FormData,
        ParameterLocation::Body => FieldOrigin::RequestBody,
    }
}

fn tag_origin(mut fields: Vec<ResolvedProperty>, origin: FieldOrigin) -> Vec<ResolvedProperty> {
    for field in &mut fields {
        field.origin = Some(origin);
    }
    fields
}
