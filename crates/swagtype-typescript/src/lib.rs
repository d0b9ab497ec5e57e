pub mod emitter;
pub mod type_mapper;

pub use emitter::TypeScriptEmitter;
