//! Artifact emission.
//!
//! Turns expanded models into files under the target directory, one artifact
//! per model, mirroring the namespace as a directory tree. A model that
//! processed nothing never reaches an emitter (the pipeline drops it), so no
//! empty artifacts are ever written.

pub mod json;
pub mod rust_src;

use std::fs;
use std::io;
use std::path::PathBuf;

use thiserror::Error as ThisError;
use tracing::info;

use crate::pipeline::ModelExpansion;

#[derive(Debug, ThisError)]
pub enum EmitError {
    #[error("cannot prepare target directory `{dir}`: {source}")]
    Prepare { dir: PathBuf, source: io::Error },

    #[error("cannot write `{file}`: {source}")]
    Write { file: PathBuf, source: io::Error },

    #[error("generated code for `{model}` is not valid Rust: {source}")]
    InvalidCodegen { model: String, source: syn::Error },
}

/// Output artifact flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// A Rust module of `FieldPathMeta` constants per model.
    Rust,
    /// A JSON entry array per model.
    Json,
}

/// Writes one artifact per expanded model under a target directory.
pub struct Emitter {
    target: PathBuf,
    format: OutputFormat,
}

impl Emitter {
    pub fn new(target: impl Into<PathBuf>, format: OutputFormat) -> Self {
        Self {
            target: target.into(),
            format,
        }
    }

    /// Clear and recreate the target directory. Runs once per scan, before
    /// any model is emitted.
    pub fn prepare(&self) -> Result<(), EmitError> {
        if self.target.exists() {
            fs::remove_dir_all(&self.target).map_err(|source| EmitError::Prepare {
                dir: self.target.clone(),
                source,
            })?;
        }
        fs::create_dir_all(&self.target).map_err(|source| EmitError::Prepare {
            dir: self.target.clone(),
            source,
        })?;
        info!(target = %self.target.display(), "emitting into");
        Ok(())
    }

    /// Emit one model's artifact and return its path.
    pub fn emit_model(&self, model: &ModelExpansion) -> Result<PathBuf, EmitError> {
        let (content, extension) = match self.format {
            OutputFormat::Rust => (rust_src::render(model)?, "rs"),
            OutputFormat::Json => (json::render(model), "json"),
        };

        let file = self.artifact_path(model, extension);
        if let Some(parent) = file.parent() {
            fs::create_dir_all(parent).map_err(|source| EmitError::Prepare {
                dir: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&file, content).map_err(|source| EmitError::Write {
            file: file.clone(),
            source,
        })?;
        Ok(file)
    }

    /// `<target>/<namespace as path>/<SimpleName>MetaData.<ext>`.
    fn artifact_path(&self, model: &ModelExpansion, extension: &str) -> PathBuf {
        let mut path = self.target.clone();
        if let modelmeta_core::TypeIdentity::Model { namespace, .. } = &model.identity {
            for segment in namespace.split('.') {
                path.push(segment);
            }
        }
        path.push(format!("{}MetaData.{extension}", model.identity.simple_name()));
        path
    }
}
