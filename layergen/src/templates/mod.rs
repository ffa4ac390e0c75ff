//! Template registry for the generated files
//!
//! Built-in templates live in [`files`]. A project can replace any of them by
//! dropping `<name>.hbs` into the directory named by
//! `templates.override_dir`.

use crate::error::{Result, ScaffoldError};
use handlebars::Handlebars;
use std::path::Path;

pub mod files;
pub use files::*;

/// Template names and their built-in sources
pub const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    ("route", ROUTE_TEMPLATE),
    ("controller", CONTROLLER_TEMPLATE),
    ("service", SERVICE_TEMPLATE),
    ("repository", REPOSITORY_TEMPLATE),
    ("test", TEST_TEMPLATE),
    ("aggregator_import", AGGREGATOR_IMPORT_TEMPLATE),
    ("aggregator_registration", AGGREGATOR_REGISTRATION_TEMPLATE),
];

/// Extension of override files
const OVERRIDE_EXTENSION: &str = "hbs";

/// Registered Handlebars templates
pub struct TemplateRegistry {
    handlebars: Handlebars<'static>,
}

impl TemplateRegistry {
    /// Create a registry with the built-in templates
    ///
    /// # Errors
    ///
    /// Returns an error if a built-in template fails to parse.
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();

        // Generated code, not HTML
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars.set_strict_mode(true);

        for (name, source) in BUILTIN_TEMPLATES {
            handlebars.register_template_string(name, source).map_err(Box::new)?;
        }

        Ok(Self { handlebars })
    }

    /// Create a registry, replacing built-ins with files from `override_dir`
    ///
    /// Only names listed in [`BUILTIN_TEMPLATES`] are looked up; other files
    /// in the directory are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if an override file cannot be read or parsed.
    pub fn with_overrides(override_dir: &Path) -> Result<Self> {
        let mut registry = Self::new()?;

        for (name, _) in BUILTIN_TEMPLATES {
            let path = override_dir.join(format!("{name}.{OVERRIDE_EXTENSION}"));
            if !path.is_file() {
                continue;
            }

            let source =
                std::fs::read_to_string(&path).map_err(|e| ScaffoldError::fs(&path, e))?;
            registry
                .handlebars
                .register_template_string(name, source)
                .map_err(Box::new)?;
            tracing::info!(template = *name, path = %path.display(), "using template override");
        }

        Ok(registry)
    }

    /// Render a registered template
    ///
    /// # Errors
    ///
    /// Returns an error if the template is unknown or references a variable
    /// missing from `context`.
    pub fn render(&self, name: &str, context: &serde_json::Value) -> Result<String> {
        Ok(self.handlebars.render(name, context)?)
    }

    /// Whether a template with this name is registered
    #[must_use]
    pub fn has_template(&self, name: &str) -> bool {
        self.handlebars.has_template(name)
    }
}
