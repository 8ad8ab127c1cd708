//! Generation command implementations

use crate::catalog;
use anyhow::{Context, Result};
use schemabind_codegen::{Dispatcher, Generator};
use schemabind_core::{
    GenerationRequest, GenerationResult, GeneratorConfig, LogLevel, RequestKind,
};
use std::path::PathBuf;
use std::sync::Arc;

/// Global flags shared by every generation command
pub struct Options {
    pub catalog: PathBuf,
    pub config: Option<PathBuf>,
    pub log_level: Option<LogLevel>,
}

/// Run one generation request
pub fn run(
    options: &Options,
    kind: RequestKind,
    output: Option<PathBuf>,
    namespaces: Vec<String>,
) -> Result<()> {
    let dispatcher = prepare(options)?;
    let request = build_request(kind, output, namespaces);

    let result = dispatcher
        .dispatch(&request)
        .with_context(|| format!("Failed to generate {kind} artifacts"))?;
    report(&result);

    Ok(())
}

/// Run every request kind concurrently into its default output location
pub fn run_all(options: &Options, namespaces: Vec<String>) -> Result<()> {
    let dispatcher = prepare(options)?;

    let outcomes: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = RequestKind::ALL
            .into_iter()
            .map(|kind| {
                let request = build_request(kind, None, namespaces.clone());
                let dispatcher = &dispatcher;
                scope.spawn(move || (kind, dispatcher.dispatch(&request)))
            })
            .collect();
        handles.into_iter().map(|handle| handle.join()).collect()
    });

    let mut failed = Vec::new();
    for outcome in outcomes {
        match outcome {
            Ok((_, Ok(result))) => report(&result),
            Ok((kind, Err(e))) => {
                eprintln!("✗ {kind}: {e}");
                failed.push(kind.to_string());
            }
            Err(_) => anyhow::bail!("A generator thread panicked"),
        }
    }

    if !failed.is_empty() {
        anyhow::bail!("Generation failed for: {}", failed.join(", "));
    }
    Ok(())
}

/// Load configuration, install logging and open the catalog
fn prepare(options: &Options) -> Result<Dispatcher> {
    let config = load_config(options)?;
    schemabind_logging::init_logging(config.log_level).context("Failed to initialize logging")?;

    tracing::debug!(catalog = %options.catalog.display(), "opening catalog");
    let catalog = catalog::load(&options.catalog)?;

    Ok(Dispatcher::new(Arc::new(Generator::new(catalog, config))))
}

fn load_config(options: &Options) -> Result<GeneratorConfig> {
    let mut config = match &options.config {
        Some(path) => GeneratorConfig::from_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => GeneratorConfig::default(),
    };
    if let Some(level) = options.log_level {
        config.log_level = level;
    }
    Ok(config)
}

fn build_request(
    kind: RequestKind,
    output: Option<PathBuf>,
    namespaces: Vec<String>,
) -> GenerationRequest {
    let mut request = GenerationRequest::new(kind);
    if let Some(output) = output {
        request = request.with_output(output);
    }
    for namespace in namespaces {
        request = request.with_namespace(namespace);
    }
    request
}

fn report(result: &GenerationResult) {
    println!(
        "✓ {}: {} files in {}",
        result.kind,
        result.files.len(),
        result.output.display()
    );
    println!("  digest: {}", result.digest);
}
