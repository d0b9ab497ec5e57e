use log::debug;
use minijinja::{Environment, Template, context};
use swagtype_core::TypeEmitter;
use swagtype_core::config::OutputPolicy;
use swagtype_core::error::EmitError;
use swagtype_core::ir::{ResolvedOperation, ResolvedProperty};

use crate::type_mapper::{descriptor_to_ts, field_key};

const TEMPLATE_NAME: &str = "interface.ts.j2";

/// Escape `*/` sequences that would prematurely close JSDoc comment blocks.
fn escape_jsdoc(value: String) -> String {
    value.replace("*/", "*\\/")
}

fn template_error(err: minijinja::Error) -> EmitError {
    EmitError::Template(err.to_string())
}

fn environment() -> Result<Environment<'static>, EmitError> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.add_filter("escape_jsdoc", escape_jsdoc);
    env.add_template(TEMPLATE_NAME, include_str!("../templates/interface.ts.j2"))
        .map_err(template_error)?;
    Ok(env)
}

/// Renders one `export interface` per request and response type name.
#[derive(Debug, Default, Clone, Copy)]
pub struct TypeScriptEmitter;

impl TypeScriptEmitter {
    pub fn new() -> Self {
        Self
    }
}

impl TypeEmitter for TypeScriptEmitter {
    fn file_extension(&self) -> &'static str {
        "ts"
    }

    fn emit(
        &self,
        business: &str,
        operations: &[ResolvedOperation],
        policy: &OutputPolicy,
    ) -> Result<String, EmitError> {
        let env = environment()?;
        let tmpl = env.get_template(TEMPLATE_NAME).map_err(template_error)?;

        let mut blocks = Vec::new();
        for op in operations {
            if let Some(name) = &op.request_type_name {
                blocks.push(render_block(
                    &tmpl,
                    business,
                    op,
                    name,
                    op.request_fields(),
                    policy.required_request_field,
                )?);
            }
            if let Some(name) = &op.response_type_name {
                blocks.push(render_block(
                    &tmpl,
                    business,
                    op,
                    name,
                    op.responses.iter().flatten(),
                    policy.required_response_field,
                )?);
            }
        }
        debug!("{business}: rendered {} interfaces", blocks.len());
        Ok(blocks.concat())
    }
}

fn render_block<'f>(
    tmpl: &Template<'_, '_>,
    business: &str,
    op: &ResolvedOperation,
    name: &str,
    fields: impl Iterator<Item = &'f ResolvedProperty>,
    force_required: bool,
) -> Result<String, EmitError> {
    let fields: Vec<minijinja::Value> = fields
        .map(|f| {
            context! {
                key => field_key(&f.key),
                ts_type => descriptor_to_ts(&f.descriptor, force_required),
                required => force_required || f.required,
                description => f.description.clone(),
            }
        })
        .collect();

    let mut block = tmpl
        .render(context! {
            name => name,
            summary => &op.summary,
            url => &op.url,
            method => op.method.as_str(),
            business => business,
            fields => fields,
        })
        .map_err(template_error)?;
    block.push_str("\n\n");
    Ok(block)
}
