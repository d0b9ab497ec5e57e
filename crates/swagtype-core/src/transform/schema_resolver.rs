use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use log::{debug, warn};

use crate::error::ResolveError;
use crate::ir::{Primitive, ResolvedProperty, ResolvedSchema, SchemaTable, TypeDescriptor};
use crate::parse::schema::{Schema, SchemaOrRef, SchemaType, TypeSet};

use super::description::clean_description;

/// Upper bound on retry passes after the first full pass.
pub const MAX_RETRY_PASSES: usize = 16;

/// How many references deep one entry may inline through a reference cycle.
pub const MAX_INLINE_DEPTH: usize = 8;

/// Resolve a document's named schema table into fully expanded descriptors.
///
/// The first pass resolves every entry in declaration order against the
/// table built so far. A reference to a declared entry that is not in the
/// table yet becomes [`TypeDescriptor::Pending`] and the referencing entry is
/// queued. Retry passes then re-resolve only the queued entries until none
/// remain, a pass changes nothing, or [`MAX_RETRY_PASSES`] is reached.
///
/// A reference back to a schema already being expanded resolves to
/// [`TypeDescriptor::Record`], so only the back-edge of a cycle loses its
/// shape. References to undeclared names stay `Pending` wherever they sit.
pub fn resolve_schemas(raw: &IndexMap<String, SchemaOrRef>) -> Result<SchemaTable, ResolveError> {
    let cycles = CycleIndex::build(raw)?;
    let mut table = SchemaTable::with_capacity(raw.len());
    let mut pending: HashSet<String> = HashSet::new();

    for (name, schema) in raw {
        let (resolved, deferred) = resolve_entry(name, schema, raw, &table, &cycles)?;
        if deferred {
            pending.insert(name.clone());
        }
        table.insert(name.clone(), resolved);
    }

    let mut passes = 0;
    while !pending.is_empty() && passes < MAX_RETRY_PASSES {
        passes += 1;
        let mut changed = false;
        let mut still_pending = HashSet::new();

        for (name, schema) in raw.iter().filter(|(n, _)| pending.contains(*n)) {
            let (resolved, deferred) = resolve_entry(name, schema, raw, &table, &cycles)?;
            if deferred {
                still_pending.insert(name.clone());
            }
            if table.get(name) != Some(&resolved) {
                changed = true;
                table.insert(name.clone(), resolved);
            }
        }

        debug!(
            "retry pass {passes}: {} of {} deferred schemas still pending",
            still_pending.len(),
            pending.len()
        );
        let stalled = !changed && still_pending == pending;
        pending = still_pending;
        if stalled {
            break;
        }
    }

    for (name, schema) in &table {
        let targets = schema.descriptor.pending_targets();
        if !targets.is_empty() {
            warn!(
                "schema {name} still references unresolved {}",
                targets.join(", ")
            );
        }
    }

    Ok(table)
}

fn resolve_entry(
    name: &str,
    schema: &SchemaOrRef,
    raw: &IndexMap<String, SchemaOrRef>,
    table: &SchemaTable,
    cycles: &CycleIndex,
) -> Result<(ResolvedSchema, bool), ResolveError> {
    let mut ctx = ResolutionContext::for_schema(raw, table, cycles, name);
    let descriptor = ctx.resolve_type(schema)?;
    let description = ctx.description_of(schema);
    Ok((
        ResolvedSchema {
            descriptor,
            description,
        },
        ctx.deferred(),
    ))
}

struct RawSchemas<'a> {
    schemas: &'a IndexMap<String, SchemaOrRef>,
    cycles: &'a CycleIndex,
}

/// Lookup state for one resolution call, borrowed from the table being built.
pub struct ResolutionContext<'a> {
    table: &'a SchemaTable,
    raw: Option<RawSchemas<'a>>,
    path: Vec<String>,
    deferred: bool,
}

impl<'a> ResolutionContext<'a> {
    /// Context over a finished table, as used for operation parameters and
    /// bodies.
    pub fn new(table: &'a SchemaTable) -> Self {
        Self {
            table,
            raw: None,
            path: Vec::new(),
            deferred: false,
        }
    }

    fn for_schema(
        schemas: &'a IndexMap<String, SchemaOrRef>,
        table: &'a SchemaTable,
        cycles: &'a CycleIndex,
        current: &str,
    ) -> Self {
        Self {
            table,
            raw: Some(RawSchemas { schemas, cycles }),
            path: vec![current.to_string()],
            deferred: false,
        }
    }

    /// Whether a lookup hit a declared schema that was not resolved yet.
    pub fn deferred(&self) -> bool {
        self.deferred
    }

    /// Apply the property resolution rules to a schema or reference.
    pub fn resolve_type(
        &mut self,
        schema_or_ref: &SchemaOrRef,
    ) -> Result<TypeDescriptor, ResolveError> {
        match schema_or_ref {
            SchemaOrRef::Ref { ref_path } => self.resolve_ref(ref_path),
            SchemaOrRef::Schema(schema) => self.resolve_schema(schema),
        }
    }

    /// Cleaned description: the node's own, else the referenced schema's.
    pub fn description_of(&self, schema_or_ref: &SchemaOrRef) -> Option<String> {
        match schema_or_ref {
            SchemaOrRef::Schema(schema) => clean_description(schema.description.as_deref()),
            SchemaOrRef::Ref { ref_path } => {
                let name = ref_name(ref_path).ok()?;
                match (self.table.get(name), &self.raw) {
                    (Some(target), _) => target.description.clone(),
                    (None, Some(raw)) => match raw.schemas.get(name) {
                        Some(SchemaOrRef::Schema(s)) => clean_description(s.description.as_deref()),
                        _ => None,
                    },
                    (None, None) => None,
                }
            }
        }
    }

    fn resolve_ref(&mut self, ref_path: &str) -> Result<TypeDescriptor, ResolveError> {
        let name = ref_name(ref_path)?;
        if self.path.iter().any(|seen| seen == name) {
            return Ok(TypeDescriptor::Record);
        }

        let Some(raw) = &self.raw else {
            return Ok(match self.table.get(name) {
                Some(target) => target.descriptor.clone(),
                None => TypeDescriptor::Pending(name.to_string()),
            });
        };
        let Some(target_schema) = raw.schemas.get(name) else {
            return Ok(TypeDescriptor::Pending(name.to_string()));
        };

        if !raw.cycles.reaches_any(name, &self.path) {
            return Ok(match self.table.get(name) {
                Some(target) => {
                    if target
                        .descriptor
                        .pending_targets()
                        .iter()
                        .any(|t| raw.schemas.contains_key(*t))
                    {
                        self.deferred = true;
                    }
                    target.descriptor.clone()
                }
                None => {
                    self.deferred = true;
                    TypeDescriptor::Pending(name.to_string())
                }
            });
        }

        // Inside a cycle the expansion depends on the current path, so the
        // target is inlined from its declaration rather than from the table.
        if self.path.len() >= MAX_INLINE_DEPTH {
            return Ok(TypeDescriptor::Record);
        }
        let target_schema = target_schema.clone();
        self.path.push(name.to_string());
        let resolved = self.resolve_type(&target_schema);
        self.path.pop();
        resolved
    }

    fn resolve_schema(&mut self, schema: &Schema) -> Result<TypeDescriptor, ResolveError> {
        let primary = schema.schema_type.as_ref().and_then(TypeSet::primary);

        if !schema.enum_values.is_empty() {
            let base = primary.and_then(primitive_of).unwrap_or(Primitive::String);
            return Ok(TypeDescriptor::Enum {
                base,
                values: schema.enum_values.clone(),
            });
        }

        match primary {
            Some(SchemaType::Object) => self.resolve_object(schema),
            Some(SchemaType::Array) => self.resolve_array(schema),
            Some(t) => Ok(primitive_of(t).map_or(TypeDescriptor::Any, TypeDescriptor::Primitive)),
            None if !schema.properties.is_empty() => self.resolve_object(schema),
            None if schema.items.is_some() => self.resolve_array(schema),
            None if !schema.all_of.is_empty() => self.resolve_type(&schema.all_of[0]),
            None if !schema.one_of.is_empty() || !schema.any_of.is_empty() => {
                Ok(TypeDescriptor::Record)
            }
            None => Ok(TypeDescriptor::Any),
        }
    }

    fn resolve_object(&mut self, schema: &Schema) -> Result<TypeDescriptor, ResolveError> {
        if !schema.properties.is_empty() {
            return Ok(TypeDescriptor::Object(self.resolve_fields(schema)?));
        }
        if let Some(first) = schema.all_of.first() {
            return match self.resolve_type(first)? {
                TypeDescriptor::Any => Ok(TypeDescriptor::Record),
                resolved => Ok(resolved),
            };
        }
        Ok(TypeDescriptor::Record)
    }

    fn resolve_array(&mut self, schema: &Schema) -> Result<TypeDescriptor, ResolveError> {
        let item = match &schema.items {
            Some(items) => self.resolve_type(items)?,
            None => TypeDescriptor::Any,
        };
        Ok(TypeDescriptor::Array(Box::new(item)))
    }

    fn resolve_fields(&mut self, schema: &Schema) -> Result<Vec<ResolvedProperty>, ResolveError> {
        let mut fields = Vec::with_capacity(schema.properties.len());
        for (key, prop) in &schema.properties {
            let descriptor = self.resolve_type(prop)?;
            let default = match prop {
                SchemaOrRef::Schema(s) => s.default_value.clone(),
                SchemaOrRef::Ref { .. } => None,
            };
            fields.push(ResolvedProperty {
                key: key.clone(),
                descriptor,
                description: self.description_of(prop),
                required: schema.required.contains(key),
                origin: None,
                default,
            });
        }
        Ok(fields)
    }
}

fn primitive_of(t: SchemaType) -> Option<Primitive> {
    match t {
        SchemaType::String => Some(Primitive::String),
        SchemaType::Number | SchemaType::Integer => Some(Primitive::Number),
        SchemaType::Boolean => Some(Primitive::Boolean),
        _ => None,
    }
}

/// Extract the schema name from a `$ref` such as `#/components/schemas/Pet`
/// or `#/definitions/Pet`: the segment after the last `/`.
pub fn ref_name(ref_path: &str) -> Result<&str, ResolveError> {
    match ref_path.rsplit('/').next() {
        Some(name) if !name.is_empty() => Ok(name),
        _ => Err(ResolveError::InvalidRefFormat(ref_path.to_string())),
    }
}

/// Which schemas can reach which, following the same edges resolution does.
pub struct CycleIndex {
    reachable: HashMap<String, HashSet<String>>,
}

impl CycleIndex {
    pub fn build(raw: &IndexMap<String, SchemaOrRef>) -> Result<Self, ResolveError> {
        let mut edges: HashMap<&str, Vec<&str>> = HashMap::with_capacity(raw.len());
        for (name, schema) in raw {
            let mut targets = Vec::new();
            collect_refs(schema, &mut targets)?;
            edges.insert(name.as_str(), targets);
        }

        let mut reachable = HashMap::with_capacity(raw.len());
        for name in raw.keys() {
            let mut seen: HashSet<String> = HashSet::new();
            let mut stack: Vec<&str> = edges.get(name.as_str()).cloned().unwrap_or_default();
            while let Some(next) = stack.pop() {
                if seen.insert(next.to_string())
                    && let Some(more) = edges.get(next)
                {
                    stack.extend(more.iter().copied());
                }
            }
            reachable.insert(name.clone(), seen);
        }
        Ok(Self { reachable })
    }

    /// Whether `from` can reach any of `names` by following references.
    pub fn reaches_any(&self, from: &str, names: &[String]) -> bool {
        self.reachable
            .get(from)
            .is_some_and(|targets| names.iter().any(|n| targets.contains(n)))
    }
}

fn collect_refs<'a>(schema: &'a SchemaOrRef, out: &mut Vec<&'a str>) -> Result<(), ResolveError> {
    match schema {
        SchemaOrRef::Ref { ref_path } => out.push(ref_name(ref_path)?),
        SchemaOrRef::Schema(s) => {
            for prop in s.properties.values() {
                collect_refs(prop, out)?;
            }
            if let Some(ref items) = s.items {
                collect_refs(items, out)?;
            }
            if let Some(first) = s.all_of.first() {
                collect_refs(first, out)?;
            }
        }
    }
    Ok(())
}
