//! The scan pipeline: provider → registry build → per-model expansion.
//!
//! Synchronous and single-threaded by design: the registry is fully populated
//! before the first expansion starts, and is never mutated afterwards.

use modelmeta_core::{
    ConfigurationError, DepthLimit, Expansion, MetadataEntry, ModelRegistry, NamespaceInput,
    RegistryBuilder, ResolutionStats, TypeIdentity,
};
use thiserror::Error as ThisError;
use tracing::{debug, info};

use crate::provider::{ClassProvider, ProviderError, SkippedClass};

#[derive(Debug, ThisError)]
pub enum PipelineError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Validated run configuration.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub namespaces: Vec<String>,
    pub depth_limit: DepthLimit,
    pub default_namespace: String,
}

impl ScanConfig {
    pub fn new(namespaces: Vec<String>, depth_limit: u32) -> Result<Self, ConfigurationError> {
        if namespaces.is_empty() {
            return Err(ConfigurationError::NoNamespaces);
        }
        Ok(Self {
            namespaces,
            depth_limit: DepthLimit::new(depth_limit)?,
            default_namespace: modelmeta_core::DEFAULT_EXTERNAL_NAMESPACE.to_string(),
        })
    }

    pub fn with_default_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.default_namespace = namespace.into();
        self
    }
}

/// One expanded root model with its entry catalogue.
#[derive(Debug)]
pub struct ModelExpansion {
    pub identity: TypeIdentity,
    pub entries: Vec<MetadataEntry>,
}

/// Everything a run produced, ready for emission.
#[derive(Debug)]
pub struct ScanReport {
    /// Expanded models in lexical qualified-name order. Models whose
    /// expansion processed nothing are excluded; nothing is emitted for them.
    pub models: Vec<ModelExpansion>,
    pub stats: ResolutionStats,
    pub classes_scanned: usize,
    pub skipped: Vec<SkippedClass>,
}

/// Run the full scan: pull every namespace from the provider, build the
/// registry in two phases, and expand every registered model.
pub fn scan(provider: &dyn ClassProvider, config: &ScanConfig) -> Result<ScanReport, PipelineError> {
    if config.namespaces.is_empty() {
        return Err(ConfigurationError::NoNamespaces.into());
    }

    let mut builder = RegistryBuilder::new(&config.default_namespace);
    let mut classes_scanned = 0;
    let mut skipped = Vec::new();
    for namespace in &config.namespaces {
        info!(namespace, "scanning namespace");
        let mut scan = provider.classes(namespace)?;
        classes_scanned += scan.classes.len();
        skipped.append(&mut scan.skipped);
        builder.add_namespace(NamespaceInput {
            namespace: namespace.clone(),
            classes: scan.classes,
        });
    }

    let (registry, stats) = builder.build()?;
    let models = expand_all(&registry, config.depth_limit);

    info!(
        classes = classes_scanned,
        models = models.len(),
        entries = models.iter().map(|m| m.entries.len()).sum::<usize>(),
        opaque_fallbacks = stats.opaque_fallbacks,
        skipped = skipped.len(),
        "scan complete"
    );
    Ok(ScanReport {
        models,
        stats,
        classes_scanned,
        skipped,
    })
}

fn expand_all(registry: &ModelRegistry, depth_limit: DepthLimit) -> Vec<ModelExpansion> {
    let mut models = Vec::new();
    for identity in registry.model_identities() {
        let Expansion { entries } = modelmeta_core::expand(identity, registry, depth_limit);
        if entries.is_empty() {
            debug!(model = %identity, "nothing processed; no artifact will be emitted");
            continue;
        }
        models.push(ModelExpansion {
            identity: identity.clone(),
            entries,
        });
    }
    models
}
