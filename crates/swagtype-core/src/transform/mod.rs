pub mod description;
pub mod path_resolver;
pub mod schema_resolver;
pub mod type_name;

pub use path_resolver::resolve_paths;
pub use schema_resolver::{ResolutionContext, resolve_schemas};
