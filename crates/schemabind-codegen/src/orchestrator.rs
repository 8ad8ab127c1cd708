//! Generation orchestrator
//!
//! One call to [`Generator::handle`] is one generation session: it builds a
//! fresh type model and memo, renders every artifact in memory, then replaces
//! the output location and publishes a completion event.
//!
//! ```text
//! GenerationRequest
//!   → resolve output + namespaces
//!   → ModelBuilder (catalog lookups, per-type failures skipped)
//!   → emitters (shared EmissionMemo)
//!   → reset output → write artifacts → CompletionBus
//! ```

use crate::artifact::{Artifact, digest};
use crate::bus::CompletionBus;
use crate::emit::typescript::InterfaceSets;
use crate::emit::{actions, document, groovy, json, python, sql, typescript};
use crate::error::{GenerateError, GenerateResult};
use crate::events::{DescriptorEventTypeFactory, EventTypeFactory};
use crate::extension::BindingWriter;
use crate::memo::EmissionMemo;
use crate::model::{ModelBuilder, TypeModel};
use schemabind_core::{
    CatalogError, Category, GenerationEvent, GenerationRequest, GenerationResult,
    GeneratorConfig, RequestKind, TagFilter, TypeCatalog,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Drives generation requests against one catalog
pub struct Generator {
    catalog: Arc<dyn TypeCatalog>,
    config: GeneratorConfig,
    events: Arc<dyn EventTypeFactory>,
    writers: Vec<Arc<dyn BindingWriter>>,
    bus: CompletionBus,
}

impl Generator {
    pub fn new(catalog: Arc<dyn TypeCatalog>, config: GeneratorConfig) -> Self {
        Self {
            catalog,
            config,
            events: Arc::new(DescriptorEventTypeFactory),
            writers: Vec::new(),
            bus: CompletionBus::new(),
        }
    }

    /// Replace the factory used to read event-type tags
    pub fn with_event_factory(mut self, events: Arc<dyn EventTypeFactory>) -> Self {
        self.events = events;
        self
    }

    /// Publish completion events on `bus`
    pub fn with_bus(mut self, bus: CompletionBus) -> Self {
        self.bus = bus;
        self
    }

    /// Append an extension writer; writers run in registration order
    pub fn register_writer(&mut self, writer: Arc<dyn BindingWriter>) {
        tracing::debug!(writer = writer.name(), "registered binding writer");
        self.writers.push(writer);
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn bus(&self) -> &CompletionBus {
        &self.bus
    }

    /// Run one request and publish its completion event
    ///
    /// Exactly one event is published, on success and on failure alike.
    pub fn handle(&self, request: &GenerationRequest) -> GenerateResult<GenerationResult> {
        let output = self.config.resolve_output(request);
        match self.generate(request, &output) {
            Ok(result) => {
                self.bus.publish(GenerationEvent::from(&result));
                Ok(result)
            }
            Err(e) => {
                tracing::error!(
                    request_id = %request.id,
                    kind = %request.kind,
                    error_code = e.error_code(),
                    "generation failed: {e}"
                );
                self.bus
                    .publish(GenerationEvent::failed(request, output, e.to_string()));
                Err(e)
            }
        }
    }

    fn generate(&self, request: &GenerationRequest, output: &Path) -> GenerateResult<GenerationResult> {
        tracing::info!(
            request_id = %request.id,
            kind = %request.kind,
            output = %output.display(),
            "generation started"
        );

        let artifacts = self.render(request)?;
        let files = write_artifacts(request.kind, output, &artifacts)?;

        tracing::info!(
            request_id = %request.id,
            files = files.len(),
            "generated result in {}",
            output.display()
        );
        Ok(GenerationResult {
            request_id: request.id,
            kind: request.kind,
            output: output.to_path_buf(),
            success: true,
            files,
            digest: digest(&artifacts),
        })
    }

    /// Render every artifact of a request without touching the filesystem
    ///
    /// Artifact paths are relative to the output directory; the interface kind
    /// yields one artifact named after the output file.
    pub fn render(&self, request: &GenerationRequest) -> GenerateResult<Vec<Artifact>> {
        let mut session = Session::new(
            self.catalog.as_ref(),
            self.config.resolve_namespaces(request),
        )?;

        match request.kind {
            RequestKind::DataClassBinding => self.render_data_classes(&mut session),
            RequestKind::StubBinding => self.render_stubs(&mut session),
            RequestKind::InterfaceBinding => {
                let output = self.config.resolve_output(request);
                self.render_interfaces(&mut session, &output)
            }
            RequestKind::SqlView => self.render_views(&mut session),
            RequestKind::SqlForeignKey => self.render_foreign_keys(&mut session),
            RequestKind::SqlIndex => self.render_indexes(&mut session),
            RequestKind::DocumentArtifact => self.render_document(&mut session),
        }
    }

    fn render_data_classes(&self, session: &mut Session<'_>) -> GenerateResult<Vec<Artifact>> {
        let mut artifacts = Vec::new();

        let api = session
            .select_any(&[Category::Message, Category::Event, Category::Reply], &[])?
            .filter(|n| !n.is_abstract());
        for node in api.iter() {
            tracing::debug!(type_name = node.name(), "dumping json template");
            artifacts.push(Artifact::new(
                Path::new("json").join(json::template_file_name(node)),
                json::json_template(node)?,
            ));
        }

        let listed = session
            .select_any(&[Category::Message], &[])?
            .filter(|n| n.is_concrete() && !n.is_query());
        artifacts.push(Artifact::new(
            "python/api_messages.py",
            json::api_messages(&listed),
        ));

        let mut out = String::new();
        python::write_sentinels(&mut out);
        python::write_session(&mut out);
        for helper in &self.config.data_class.helper_types {
            if session.memo.is_emitted(helper) {
                continue;
            }
            match session.builder.resolve(helper)? {
                Some(node) => {
                    python::write_simple_class(&node, &mut out);
                    session.memo.mark_emitted(node.name());
                }
                None => tracing::warn!(type_name = %helper, "helper type not found in catalog"),
            }
        }

        let messages = session
            .select_any(&[Category::Message, Category::Reply], &[TagFilter::NoBinding])?
            .filter(|n| n.is_concrete() && !n.is_query());
        let names = python::write_messages(&messages, &mut session.memo, &mut out)?;
        python::write_api_names(&names, &mut out);

        let inventories = session.select_any(
            &[Category::Inventory],
            &[TagFilter::Enum, TagFilter::NoBinding],
        )?;
        python::write_inventories(&inventories, &mut session.memo, &mut out)?;

        let constants = session.select(&[TagFilter::ExportsConstants], &[])?;
        python::write_constants(&constants, &mut out);

        let configs = session.select_any(&[Category::Config], &[])?;
        python::write_global_configs(&configs, &mut out);

        for writer in &self.writers {
            out.push('\n');
            writer.write_binding(&mut out).map_err(|e| {
                GenerateError::Render(format!("binding writer {} failed: {e}", writer.name()))
            })?;
        }
        artifacts.push(Artifact::new("python/inventory.py", out));

        let commands = session
            .select_any(&[Category::Message], &[])?
            .filter(|n| n.is_concrete());
        artifacts.push(Artifact::new(
            "python/api_actions.py",
            actions::render_actions(&commands),
        ));

        Ok(artifacts)
    }

    fn render_stubs(&self, session: &mut Session<'_>) -> GenerateResult<Vec<Artifact>> {
        let stub = &self.config.stub;
        let api_event_type = match stub.base_event_type.as_deref() {
            Some(name) => {
                let node = session.builder.resolve(name)?.ok_or_else(|| {
                    CatalogError::Config(format!("base event type {name} not found in catalog"))
                })?;
                Some(self.events.event_type(&node)?)
            }
            None => None,
        };

        let api = session
            .select_any(&[Category::Message, Category::Event, Category::Reply], &[])?
            .filter(|n| !n.is_abstract());
        let constants = groovy::render_constants(&api, &stub.package, api_event_type.as_deref());
        let stubs = groovy::render_stubs(&api, &stub.package, &mut session.memo, self.events.as_ref())?;

        Ok(vec![
            Artifact::new("ApiConstants.groovy", constants),
            Artifact::new("ApiStubs.groovy", stubs),
        ])
    }

    fn render_interfaces(&self, session: &mut Session<'_>, output: &Path) -> GenerateResult<Vec<Artifact>> {
        let messages = session
            .select_any(&[Category::Message], &[])?
            .filter(|n| !n.is_abstract());
        let events = session
            .select_any(&[Category::Event, Category::Reply], &[])?
            .filter(|n| !n.is_abstract());
        let inventories = session
            .select_any(&[Category::Inventory], &[TagFilter::Enum])?
            .filter(|n| !n.is_abstract());

        let contents = typescript::render_interfaces(
            InterfaceSets {
                messages: &messages,
                events: &events,
                inventories: &inventories,
            },
            &mut session.memo,
        )?;

        let file_name = output
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(&self.config.interface_file));
        Ok(vec![Artifact::new(file_name, contents)])
    }

    fn render_views(&self, session: &mut Session<'_>) -> GenerateResult<Vec<Artifact>> {
        let tagged = session.select(&[TagFilter::ExtendedObject], &[])?;
        let views = sql::render_views(&tagged, &self.config.sql.schema)?;
        Ok(vec![Artifact::new("view.sql", views)])
    }

    fn render_foreign_keys(&self, session: &mut Session<'_>) -> GenerateResult<Vec<Artifact>> {
        let entities = session.select_any(&[Category::PersistedEntity], &[])?;
        let Session { builder, memo, .. } = session;
        let table_of = |name: &str| {
            builder
                .lookup(name)
                .map(|descriptor| sql::storage_table(descriptor).to_string())
        };
        let keys = sql::render_foreign_keys(&entities, &self.config.sql.schema, memo, &table_of)?;
        Ok(vec![Artifact::new("foreignKeys.sql", keys)])
    }

    fn render_indexes(&self, session: &mut Session<'_>) -> GenerateResult<Vec<Artifact>> {
        let entities = session.select_any(&[Category::PersistedEntity], &[])?;
        let indexes = sql::render_indexes(&entities, &self.config.sql.schema, &mut session.memo);
        Ok(vec![Artifact::new("indexes.sql", indexes)])
    }

    fn render_document(&self, session: &mut Session<'_>) -> GenerateResult<Vec<Artifact>> {
        let messages = session
            .select_any(&[Category::Message], &[])?
            .filter(|n| n.is_concrete());
        Ok(vec![Artifact::new(
            "requirements.xml",
            document::render_requirements(&messages),
        )])
    }
}

/// State owned by one generation session
struct Session<'a> {
    catalog: &'a dyn TypeCatalog,
    namespaces: Vec<String>,
    builder: ModelBuilder,
    memo: EmissionMemo,
}

impl<'a> Session<'a> {
    fn new(catalog: &'a dyn TypeCatalog, namespaces: Vec<String>) -> GenerateResult<Self> {
        Ok(Self {
            catalog,
            namespaces,
            builder: ModelBuilder::new(catalog)?,
            memo: EmissionMemo::new(),
        })
    }

    fn select(&mut self, include: &[TagFilter], exclude: &[TagFilter]) -> GenerateResult<TypeModel> {
        self.builder
            .select(self.catalog, &self.namespaces, include, exclude)
    }

    /// Types of any of `categories`, ordered together
    fn select_any(
        &mut self,
        categories: &[Category],
        exclude: &[TagFilter],
    ) -> GenerateResult<TypeModel> {
        let mut names = Vec::new();
        for category in categories {
            let model = self.select(&[TagFilter::Category(*category)], exclude)?;
            names.extend(model.names().into_iter().map(String::from));
        }
        self.builder.build_model(names)
    }
}

/// Replace the output location with `artifacts`
///
/// Directory kinds delete and recreate the whole directory. The interface kind
/// replaces only its file and never removes the parent directory.
fn write_artifacts(
    kind: RequestKind,
    output: &Path,
    artifacts: &[Artifact],
) -> GenerateResult<Vec<PathBuf>> {
    let dir = if kind.writes_single_file() {
        let parent = output.parent().unwrap_or(Path::new("."));
        ignore_missing(output, std::fs::remove_file(output))?;
        parent.to_path_buf()
    } else {
        ignore_missing(output, std::fs::remove_dir_all(output))?;
        output.to_path_buf()
    };
    std::fs::create_dir_all(&dir).map_err(|e| GenerateError::filesystem(&dir, e))?;

    let mut files = Vec::with_capacity(artifacts.len());
    for artifact in artifacts {
        let path = dir.join(&artifact.path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| GenerateError::filesystem(parent, e))?;
        }
        std::fs::write(&path, &artifact.contents).map_err(|e| GenerateError::filesystem(&path, e))?;
        tracing::debug!(file = %path.display(), bytes = artifact.contents.len(), "wrote artifact");
        files.push(artifact.path.clone());
    }
    Ok(files)
}

fn ignore_missing(path: &Path, removed: std::io::Result<()>) -> GenerateResult<()> {
    match removed {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(GenerateError::filesystem(path, e)),
    }
}
