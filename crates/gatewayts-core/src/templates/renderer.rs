//! Tera-backed renderer producing one TypeScript module per schema file.

use std::sync::Arc;

use tera::{Context, Tera};

use super::functions;
use super::types::FileView;
use crate::error::{error_chain, Error, Result};
use crate::registry::{File, Registry};

/// Name of the top-level per-file template
const FILE_TEMPLATE: &str = "file";

const TEMPLATES: [(&str, &str); 5] = [
    (FILE_TEMPLATE, include_str!("../../templates/file.tera")),
    ("dependencies", include_str!("../../templates/dependencies.tera")),
    ("enums", include_str!("../../templates/enums.tera")),
    ("messages", include_str!("../../templates/messages.tera")),
    ("services", include_str!("../../templates/services.tera")),
];

const FETCH_TEMPLATE: &str = include_str!("../../templates/fetch.tera");

/// Renders client modules for the files of one registry
#[derive(Clone)]
pub struct Renderer {
    registry: Arc<Registry>,
    tera: Arc<Tera>,
}

impl Renderer {
    /// Build a template engine whose functions are bound to `registry`
    pub fn new(registry: Arc<Registry>) -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES)?;

        let tera = Arc::new_cyclic(|this| {
            functions::register(&mut tera, &registry, this.clone());
            tera
        });

        Ok(Self { registry, tera })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Render the client module for `file`
    pub fn render_file(&self, file: &File) -> Result<String> {
        let view = FileView::new(&self.registry, file);
        log::debug!("Rendering {} -> {}", file.name, view.ts_file_name);

        let mut context = Context::new();
        context.insert("file", &view);

        self.tera.render(FILE_TEMPLATE, &context).map_err(|e| {
            let message = error_chain(&e);
            log::error!("Template rendering failed for '{}': {}", file.name, message);
            Error::template(format!("{}: {}", file.name, message))
        })
    }

    /// Render the shared fetch helper module; its content does not depend on the registry
    pub fn render_fetch_module() -> Result<String> {
        Ok(Tera::one_off(FETCH_TEMPLATE, &Context::new(), false)?)
    }
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("files", &self.registry.files().len())
            .field(
                "templates",
                &self.tera.get_template_names().collect::<Vec<_>>(),
            )
            .finish()
    }
}
