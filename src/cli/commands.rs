//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::path::Path;

use tracing::info;

use super::{CliError, CliResult, ExitCode, Format};
use crate::emit::{Emitter, OutputFormat};
use crate::pipeline::{self, ScanConfig, ScanReport};
use crate::provider::SourceDirProvider;

/// Run the scan shared by both commands and report skipped files.
fn scan(
    source_dir: &Path,
    packages: Vec<String>,
    depth_limit: u32,
    default_namespace: String,
) -> CliResult<ScanReport> {
    let config = ScanConfig::new(packages, depth_limit)
        .map_err(|e| CliError::failure(e.to_string()))?
        .with_default_namespace(default_namespace);

    let provider = SourceDirProvider::new(source_dir);
    let report =
        pipeline::scan(&provider, &config).map_err(|e| CliError::failure(e.to_string()))?;

    // Extraction failures are best-effort warnings, not run failures.
    for skipped in &report.skipped {
        eprintln!("warning: skipped {}\n{}", skipped.file.display(), skipped.reason);
    }
    Ok(report)
}

/// `modelmeta generate`: scan and write artifacts.
pub fn generate(
    source_dir: &Path,
    packages: Vec<String>,
    target: &Path,
    depth_limit: u32,
    format: Format,
    default_namespace: String,
) -> CliResult<ExitCode> {
    let report = scan(source_dir, packages, depth_limit, default_namespace)?;

    let format = match format {
        Format::Rust => OutputFormat::Rust,
        Format::Json => OutputFormat::Json,
    };
    let emitter = Emitter::new(target, format);
    emitter
        .prepare()
        .map_err(|e| CliError::failure(e.to_string()))?;

    for model in &report.models {
        let file = emitter
            .emit_model(model)
            .map_err(|e| CliError::failure(e.to_string()))?;
        info!(model = %model.identity, file = %file.display(), "wrote artifact");
    }

    println!(
        "generated {} artifact(s) from {} class(es); {} name(s) assumed external",
        report.models.len(),
        report.classes_scanned,
        report.stats.opaque_fallbacks
    );
    Ok(ExitCode::SUCCESS)
}

/// `modelmeta paths`: scan and print the catalogue to stdout.
pub fn paths(
    source_dir: &Path,
    packages: Vec<String>,
    depth_limit: u32,
    default_namespace: String,
) -> CliResult<ExitCode> {
    let report = scan(source_dir, packages, depth_limit, default_namespace)?;

    for model in &report.models {
        println!("{}", model.identity);
        for entry in &model.entries {
            let element = entry
                .element_type
                .as_ref()
                .map(|t| format!("<{t}>"))
                .unwrap_or_default();
            println!("  {} : {}{}", entry.dotted(), entry.value_type, element);
        }
    }
    Ok(ExitCode::SUCCESS)
}
