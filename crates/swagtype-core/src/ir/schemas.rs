use indexmap::IndexMap;

use super::operations::FieldOrigin;

/// Resolved schemas keyed by their document name, in declaration order.
pub type SchemaTable = IndexMap<String, ResolvedSchema>;

/// A primitive scalar after normalization (`integer` becomes `Number`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    String,
    Number,
    Boolean,
}

impl Primitive {
    pub fn as_str(&self) -> &'static str {
        match self {
            Primitive::String => "string",
            Primitive::Number => "number",
            Primitive::Boolean => "boolean",
        }
    }
}

/// The shape of a resolved type.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDescriptor {
    Primitive(Primitive),
    Enum {
        base: Primitive,
        values: Vec<serde_json::Value>,
    },
    Array(Box<TypeDescriptor>),
    /// Inline object literal with its fields in declaration order.
    Object(Vec<ResolvedProperty>),
    /// `Record<string, any>`: a composition with no concrete shape, or a
    /// back-reference to a schema already being expanded.
    Record,
    Any,
    /// Reference to a schema that had not been resolved yet.
    Pending(String),
}

impl TypeDescriptor {
    /// Whether a placeholder remains anywhere inside this descriptor.
    pub fn has_pending(&self) -> bool {
        match self {
            TypeDescriptor::Pending(_) => true,
            TypeDescriptor::Array(inner) => inner.has_pending(),
            TypeDescriptor::Object(props) => props.iter().any(|p| p.descriptor.has_pending()),
            _ => false,
        }
    }

    /// Fields of an inline object, or of the item of an array of objects.
    pub fn fields(&self) -> Option<&[ResolvedProperty]> {
        match self {
            TypeDescriptor::Object(props) => Some(props),
            TypeDescriptor::Array(inner) => match inner.as_ref() {
                TypeDescriptor::Object(props) => Some(props),
                _ => None,
            },
            _ => None,
        }
    }

    /// Names of every placeholder left inside this descriptor.
    pub fn pending_targets(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_pending(&mut out);
        out
    }

    fn collect_pending<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            TypeDescriptor::Pending(name) => out.push(name),
            TypeDescriptor::Array(inner) => inner.collect_pending(out),
            TypeDescriptor::Object(props) => {
                for p in props {
                    p.descriptor.collect_pending(out);
                }
            }
            _ => {}
        }
    }
}

/// Coarse classification of a resolved schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaKind {
    Primitive,
    Object,
    Array,
    Record,
    Unknown,
}

/// A named schema after full expansion.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSchema {
    pub descriptor: TypeDescriptor,
    pub description: Option<String>,
}

impl ResolvedSchema {
    pub fn kind(&self) -> SchemaKind {
        match self.descriptor {
            TypeDescriptor::Primitive(_) | TypeDescriptor::Enum { .. } => SchemaKind::Primitive,
            TypeDescriptor::Object(_) => SchemaKind::Object,
            TypeDescriptor::Array(_) => SchemaKind::Array,
            TypeDescriptor::Record => SchemaKind::Record,
            TypeDescriptor::Any | TypeDescriptor::Pending(_) => SchemaKind::Unknown,
        }
    }

    /// Fields of an object schema, or of the item of an array schema.
    pub fn properties(&self) -> Option<&[ResolvedProperty]> {
        self.descriptor.fields()
    }

    pub fn enum_values(&self) -> Option<&[serde_json::Value]> {
        match &self.descriptor {
            TypeDescriptor::Enum { values, .. } => Some(values),
            _ => None,
        }
    }
}

/// A single field: an object property, a parameter, or a body field.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedProperty {
    pub key: String,
    pub descriptor: TypeDescriptor,
    pub description: Option<String>,
    pub required: bool,
    pub origin: Option<FieldOrigin>,
    pub default: Option<serde_json::Value>,
}

impl ResolvedProperty {
    pub fn new(key: impl Into<String>, descriptor: TypeDescriptor) -> Self {
        Self {
            key: key.into(),
            descriptor,
            description: None,
            required: false,
            origin: None,
            default: None,
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }
}
