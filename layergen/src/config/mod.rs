//! Configuration management for layergen
//!
//! Configuration is loaded from multiple sources with clear precedence:
//!
//! 1. Environment variables (highest priority, `LAYERGEN_` prefix, `__` for nesting)
//! 2. An explicit file passed with `--config`
//! 3. `<project root>/layergen.toml`
//! 4. Hardcoded defaults (fallback)
//!
//! The defaults describe the conventional layout: routes collected in
//! `src/routes/_index.ts`, one folder per layer, Jest integration tests.
//!
//! # Example Configuration
//!
//! ```toml
//! # layergen.toml
//! default_name = "myNewResourceName"
//!
//! [layout]
//! routes_dir = "src/routes"
//! aggregator_file = "_index.ts"
//!
//! [aggregator]
//! import_anchor = "const appRoutes = Router();"
//! registration_anchor = "export default appRoutes;"
//! router_ident = "appRoutes"
//!
//! [templates]
//! auth_middleware = ""        # empty disables the auth guard
//!
//! [verify]
//! enabled = true
//! command = ["npx", "jest"]
//! ```

use crate::error::Result;
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name looked up in the project root
pub const CONFIG_FILE_NAME: &str = "layergen.toml";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "LAYERGEN_";

/// Resource name used when none is given on the command line
pub const DEFAULT_RESOURCE_NAME: &str = "myNewResourceName";

/// Where each layer lives, relative to the project root
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LayoutSettings {
    /// Directory holding route files and the aggregator
    pub routes_dir: PathBuf,
    /// Aggregator file name inside `routes_dir`
    pub aggregator_file: String,
    /// Controller directory
    pub controller_dir: PathBuf,
    /// Service directory
    pub service_dir: PathBuf,
    /// Repository directory
    pub repository_dir: PathBuf,
    /// Integration test directory
    pub test_dir: PathBuf,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            routes_dir: PathBuf::from("src/routes"),
            aggregator_file: "_index.ts".to_string(),
            controller_dir: PathBuf::from("src/controller"),
            service_dir: PathBuf::from("src/service"),
            repository_dir: PathBuf::from("src/repository"),
            test_dir: PathBuf::from("test/integration"),
        }
    }
}

impl LayoutSettings {
    /// Aggregator path relative to the project root
    #[must_use]
    pub fn aggregator_path(&self) -> PathBuf {
        self.routes_dir.join(&self.aggregator_file)
    }
}

/// Anchors used to splice into the aggregator
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AggregatorSettings {
    /// Route imports are inserted before this text
    pub import_anchor: String,
    /// Route registrations are inserted before this text
    pub registration_anchor: String,
    /// Identifier of the root router object
    pub router_ident: String,
}

impl Default for AggregatorSettings {
    fn default() -> Self {
        Self {
            import_anchor: "const appRoutes = Router();".to_string(),
            registration_anchor: "export default appRoutes;".to_string(),
            router_ident: "appRoutes".to_string(),
        }
    }
}

/// Optional lines and identifiers injected into the generated files
///
/// An empty string disables the corresponding line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TemplateSettings {
    /// Import line for the authentication middleware
    pub auth_import: String,
    /// Middleware identifier placed in front of the handler
    pub auth_middleware: String,
    /// Import line for a project-specific request type
    pub request_import: String,
    /// Request type used when `request_import` is set
    pub request_type: String,
    /// Import line placed at the top of repositories
    pub database_import: String,
    /// Directory of `<template>.hbs` files replacing the built-ins
    #[serde(skip_serializing_if = "Option::is_none")]
    pub override_dir: Option<PathBuf>,
}

impl Default for TemplateSettings {
    fn default() -> Self {
        Self {
            auth_import: "import auth from '../middleware/auth';".to_string(),
            auth_middleware: "auth".to_string(),
            request_import: "import { CustomRequest } from '../../types/custom';".to_string(),
            request_type: "CustomRequest".to_string(),
            database_import: "import prisma from '../database/client';".to_string(),
            override_dir: None,
        }
    }
}

/// Post-generation test run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct VerifySettings {
    /// Run the generated test after writing
    pub enabled: bool,
    /// Program and leading arguments; the test file path is appended
    pub command: Vec<String>,
}

impl Default for VerifySettings {
    fn default() -> Self {
        Self {
            enabled: true,
            command: vec!["yarn".to_string(), "test".to_string()],
        }
    }
}

/// Complete generator configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ScaffoldConfig {
    /// Resource name used when none is supplied
    pub default_name: String,
    /// Directory layout
    pub layout: LayoutSettings,
    /// Aggregator anchors
    pub aggregator: AggregatorSettings,
    /// Template switches
    pub templates: TemplateSettings,
    /// Verification
    pub verify: VerifySettings,
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self {
            default_name: DEFAULT_RESOURCE_NAME.to_string(),
            layout: LayoutSettings::default(),
            aggregator: AggregatorSettings::default(),
            templates: TemplateSettings::default(),
            verify: VerifySettings::default(),
        }
    }
}

impl ScaffoldConfig {
    /// Load configuration for a project
    ///
    /// Sources, lowest priority first:
    /// 1. Defaults
    /// 2. `<root>/layergen.toml`
    /// 3. `explicit` file, when given
    /// 4. `LAYERGEN_*` environment variables
    ///
    /// A relative `templates.override_dir` is resolved against `root`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Default configuration cannot be serialized to TOML
    /// - A configuration file contains invalid TOML
    /// - A value has the wrong type
    pub fn load(root: &Path, explicit: Option<&Path>) -> Result<Self> {
        let mut figment = Self::base_figment()?;

        let project_config = root.join(CONFIG_FILE_NAME);
        if project_config.exists() {
            tracing::debug!(path = %project_config.display(), "loading project config");
            figment = figment.merge(Toml::file(&project_config));
        }

        if let Some(path) = explicit {
            tracing::debug!(path = %path.display(), "loading explicit config");
            figment = figment.merge(Toml::file_exact(path));
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__").lowercase(true));

        let mut config = Self::extract(&figment)?;
        if let Some(dir) = config.templates.override_dir.as_mut() {
            if dir.is_relative() {
                *dir = root.join(&*dir);
            }
        }
        Ok(config)
    }

    /// Load configuration from a TOML string layered over the defaults
    ///
    /// Environment variables are not consulted.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or a value has the wrong type.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let figment = Self::base_figment()?.merge(Toml::string(source));
        Self::extract(&figment)
    }

    fn base_figment() -> Result<Figment> {
        let defaults = toml::to_string(&Self::default())?;
        Ok(Figment::new().merge(Toml::string(&defaults)))
    }

    fn extract(figment: &Figment) -> Result<Self> {
        figment.extract().map_err(|e| Box::new(e).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_conventional_layout() {
        let config = ScaffoldConfig::default();
        assert_eq!(config.default_name, "myNewResourceName");
        assert_eq!(
            config.layout.aggregator_path(),
            PathBuf::from("src/routes/_index.ts")
        );
        assert_eq!(
            config.aggregator.import_anchor,
            "const appRoutes = Router();"
        );
        assert_eq!(
            config.aggregator.registration_anchor,
            "export default appRoutes;"
        );
        assert_eq!(config.verify.command, vec!["yarn", "test"]);
    }

    #[test]
    fn test_toml_overrides_single_key() {
        let config = ScaffoldConfig::from_toml_str(
            r#"
            [verify]
            enabled = false
            "#,
        )
        .unwrap();

        assert!(!config.verify.enabled);
        assert_eq!(config.verify.command, vec!["yarn", "test"]);
        assert_eq!(config.layout, LayoutSettings::default());
    }

    #[test]
    fn test_toml_overrides_nested_sections() {
        let config = ScaffoldConfig::from_toml_str(
            r#"
            default_name = "widget"

            [aggregator]
            router_ident = "api"

            [templates]
            auth_middleware = ""
            "#,
        )
        .unwrap();

        assert_eq!(config.default_name, "widget");
        assert_eq!(config.aggregator.router_ident, "api");
        assert_eq!(
            config.aggregator.import_anchor,
            "const appRoutes = Router();"
        );
        assert!(config.templates.auth_middleware.is_empty());
    }

    #[test]
    fn test_invalid_type_is_rejected() {
        let result = ScaffoldConfig::from_toml_str("[verify]\nenabled = \"sometimes\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_reads_project_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[layout]\ntest_dir = \"tests/e2e\"\n",
        )
        .unwrap();

        let config = ScaffoldConfig::load(dir.path(), None).unwrap();
        assert_eq!(config.layout.test_dir, PathBuf::from("tests/e2e"));
        assert_eq!(config.layout.routes_dir, PathBuf::from("src/routes"));
    }

    #[test]
    fn test_explicit_file_overrides_project_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "default_name = \"project\"\n",
        )
        .unwrap();
        let explicit = dir.path().join("custom.toml");
        std::fs::write(&explicit, "default_name = \"explicit\"\n").unwrap();

        let config = ScaffoldConfig::load(dir.path(), Some(&explicit)).unwrap();
        assert_eq!(config.default_name, "explicit");
    }

    #[test]
    fn test_relative_override_dir_resolves_against_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[templates]\noverride_dir = \"scaffold\"\n",
        )
        .unwrap();

        let config = ScaffoldConfig::load(dir.path(), None).unwrap();
        assert_eq!(
            config.templates.override_dir,
            Some(dir.path().join("scaffold"))
        );
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = ScaffoldConfig::load(dir.path(), Some(&dir.path().join("nope.toml")));
        assert!(result.is_err());
    }
}
