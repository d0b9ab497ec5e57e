use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use log::{error, info};

use crate::config::OutputPolicy;
use crate::error::PipelineError;
use crate::source::FetchedDocument;
use crate::transform::{resolve_paths, resolve_schemas};
use crate::{GeneratedFile, TypeEmitter};

/// Resolve and emit one document: schemas, then operations, then text.
pub fn process_document<E: TypeEmitter>(
    fetched: &FetchedDocument,
    policy: &OutputPolicy,
    emitter: &E,
) -> Result<String, PipelineError> {
    let business = &fetched.business;
    let resolve_err = |source| PipelineError::Resolve {
        business: business.name.clone(),
        source,
    };

    let schemas = resolve_schemas(fetched.document.schemas()).map_err(resolve_err)?;
    let operations = resolve_paths(&fetched.document, &schemas, business).map_err(resolve_err)?;
    info!(
        "'{}': resolved {} schemas and {} operations",
        business.name,
        schemas.len(),
        operations.len()
    );

    emitter
        .emit(&business.name, &operations, policy)
        .map_err(|source| PipelineError::Emit {
            business: business.name.clone(),
            source,
        })
}

/// Run every document through the pipeline, in order, and collect one file
/// per business name. Documents sharing a business name are appended in the
/// order they were fetched.
///
/// The first document that fails to resolve aborts the run.
pub fn generate<E: TypeEmitter>(
    documents: &[FetchedDocument],
    policy: &OutputPolicy,
    emitter: &E,
) -> Result<Vec<GeneratedFile>, PipelineError> {
    let mut outputs: IndexMap<String, Vec<String>> = IndexMap::new();
    for fetched in documents {
        let text = process_document(fetched, policy, emitter)?;
        outputs
            .entry(fetched.business.name.clone())
            .or_default()
            .push(text);
    }

    Ok(outputs
        .into_iter()
        .map(|(business, parts)| GeneratedFile {
            path: format!("{}.{}", file_stem(&business), emitter.file_extension()),
            content: parts.concat(),
        })
        .collect())
}

/// Business names become file names; path separators must not escape the
/// output directory.
fn file_stem(business: &str) -> String {
    business.replace(['/', '\\'], "-")
}

/// Outcome of writing generated files. Each file is written independently.
#[derive(Debug, Default)]
pub struct WriteReport {
    pub written: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, io::Error)>,
}

impl WriteReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Write generated files under `output_dir`, creating it if needed. A file
/// that fails to write is logged and recorded; the rest are still written.
pub fn write_files(output_dir: &Path, files: &[GeneratedFile]) -> io::Result<WriteReport> {
    fs::create_dir_all(output_dir)?;
    let mut report = WriteReport::default();
    for file in files {
        let path = output_dir.join(&file.path);
        match fs::write(&path, &file.content) {
            Ok(()) => {
                info!("wrote {}", path.display());
                report.written.push(path);
            }
            Err(e) => {
                error!("failed to write {}: {e}", path.display());
                report.failed.push((path, e));
            }
        }
    }
    Ok(report)
}
