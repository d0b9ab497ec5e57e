pub mod config;
pub mod error;
pub mod ir;
pub mod parse;
pub mod pipeline;
pub mod source;
pub mod transform;

use config::OutputPolicy;
use error::EmitError;
use ir::ResolvedOperation;

/// A generated file with path and content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: String,
    pub content: String,
}

/// Trait for emitters that render one business unit's operations as source
/// text in a target language.
pub trait TypeEmitter {
    /// Extension of the files this emitter produces, without the dot.
    fn file_extension(&self) -> &'static str;

    fn emit(
        &self,
        business: &str,
        operations: &[ResolvedOperation],
        policy: &OutputPolicy,
    ) -> Result<String, EmitError>;
}
