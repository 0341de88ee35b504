//! Class providers: pluggable backends that list the classes of a namespace.
//!
//! The registry build is backend-agnostic; the expansion engine never learns
//! whether a namespace came from parsed source files or from programmatic
//! registration. [`SourceDirProvider`] is the production backend;
//! [`InMemoryProvider`] serves embedders and tests.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use modelmeta_core::RawClass;
use modelmeta_syntax::parse_unit;
use thiserror::Error as ThisError;
use tracing::{debug, warn};

/// Failure to enumerate a namespace at all. Per-class extraction failures are
/// *not* errors; they are reported as [`SkippedClass`] warnings so one broken
/// file does not abort the run.
#[derive(Debug, ThisError)]
pub enum ProviderError {
    #[error("cannot read namespace directory `{dir}`: {source}")]
    NamespaceDir {
        dir: PathBuf,
        source: std::io::Error,
    },

    #[error("namespace `{0}` is not registered with this provider")]
    UnknownNamespace(String),
}

/// A source file that could not be extracted, with a rendered reason.
#[derive(Debug, Clone)]
pub struct SkippedClass {
    pub file: PathBuf,
    pub reason: String,
}

/// One namespace's extraction result.
#[derive(Debug, Default)]
pub struct NamespaceScan {
    pub classes: Vec<RawClass>,
    pub skipped: Vec<SkippedClass>,
}

/// Capability: given a namespace identifier, list its classes.
pub trait ClassProvider {
    fn classes(&self, namespace: &str) -> Result<NamespaceScan, ProviderError>;
}

/// Scans `<source_dir>/<namespace as path>/*.java` and parses each file.
///
/// Files are visited in lexical name order so discovery is reproducible.
pub struct SourceDirProvider {
    source_dir: PathBuf,
}

impl SourceDirProvider {
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
        }
    }

    fn namespace_dir(&self, namespace: &str) -> PathBuf {
        let mut dir = self.source_dir.clone();
        for segment in namespace.split('.') {
            dir.push(segment);
        }
        dir
    }
}

impl ClassProvider for SourceDirProvider {
    fn classes(&self, namespace: &str) -> Result<NamespaceScan, ProviderError> {
        let dir = self.namespace_dir(namespace);
        let entries = fs::read_dir(&dir).map_err(|source| ProviderError::NamespaceDir {
            dir: dir.clone(),
            source,
        })?;

        let mut files: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .map(|e| e.path())
            .filter(|p| p.extension().is_some_and(|ext| ext == "java"))
            .collect();
        files.sort();

        let mut scan = NamespaceScan::default();
        for file in files {
            match extract_file(&file) {
                Ok(class) => {
                    debug!(file = %file.display(), class = %class.simple_name, "extracted class");
                    scan.classes.push(class);
                }
                Err(reason) => {
                    warn!(file = %file.display(), "skipping file: extraction failed");
                    scan.skipped.push(SkippedClass { file, reason });
                }
            }
        }
        Ok(scan)
    }
}

fn extract_file(file: &Path) -> Result<RawClass, String> {
    let source = fs::read_to_string(file).map_err(|e| e.to_string())?;
    match parse_unit(&source) {
        Ok(unit) => Ok(unit.class),
        Err(err) => {
            let diagnostic = err.into_diagnostic(&file.display().to_string(), &source);
            Err(format!("{:?}", miette::Report::new(diagnostic)))
        }
    }
}

/// Programmatically registered namespaces; the parsing-free backend.
#[derive(Debug, Default)]
pub struct InMemoryProvider {
    namespaces: BTreeMap<String, Vec<RawClass>>,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_class(&mut self, namespace: impl Into<String>, class: RawClass) -> &mut Self {
        self.namespaces.entry(namespace.into()).or_default().push(class);
        self
    }
}

impl ClassProvider for InMemoryProvider {
    fn classes(&self, namespace: &str) -> Result<NamespaceScan, ProviderError> {
        let classes = self
            .namespaces
            .get(namespace)
            .ok_or_else(|| ProviderError::UnknownNamespace(namespace.to_string()))?;
        Ok(NamespaceScan {
            classes: classes.clone(),
            skipped: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_provider_returns_registered_classes() {
        let mut provider = InMemoryProvider::new();
        provider.add_class(
            "com.example",
            RawClass {
                simple_name: "User".to_string(),
                ..RawClass::default()
            },
        );
        let scan = provider.classes("com.example").unwrap();
        assert_eq!(scan.classes.len(), 1);
        assert!(provider.classes("com.missing").is_err());
    }
}
