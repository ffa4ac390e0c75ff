//! Resource scaffold generator
//!
//! Renders the five layer files for one resource and computes the
//! aggregator splice. Nothing here touches the file system except reading
//! the aggregator in [`ScaffoldGenerator::plan`].

use super::naming::ResourceName;
use super::plan::{AggregatorEdit, ScaffoldPlan};
use super::splice::AggregatorSplice;
use crate::config::ScaffoldConfig;
use crate::error::{Result, ScaffoldError};
use crate::templates::TemplateRegistry;
use std::path::{Path, PathBuf};

/// Architectural layer a generated file belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    /// Router sub-object
    Route,
    /// HTTP handler class
    Controller,
    /// Business logic class
    Service,
    /// Persistence class
    Repository,
    /// Integration test
    Test,
}

impl Layer {
    /// Every layer, in write order
    pub const ALL: [Self; 5] = [
        Self::Route,
        Self::Controller,
        Self::Service,
        Self::Repository,
        Self::Test,
    ];

    /// Name of the template rendering this layer
    #[must_use]
    pub const fn template_name(self) -> &'static str {
        match self {
            Self::Route => "route",
            Self::Controller => "controller",
            Self::Service => "service",
            Self::Repository => "repository",
            Self::Test => "test",
        }
    }
}

impl std::fmt::Display for Layer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.template_name())
    }
}

/// Represents a generated file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Relative path from project root
    pub path: PathBuf,
    /// File content
    pub content: String,
    /// File description for user feedback
    pub description: String,
    /// Layer the file belongs to
    pub layer: Layer,
}

/// Resource scaffold generator
pub struct ScaffoldGenerator {
    name: ResourceName,
    config: ScaffoldConfig,
    templates: TemplateRegistry,
}

impl ScaffoldGenerator {
    /// Create a new scaffold generator
    ///
    /// # Errors
    ///
    /// Returns an error if the template registry cannot be built (including
    /// unreadable or invalid override templates).
    pub fn new(name: ResourceName, config: ScaffoldConfig) -> Result<Self> {
        let templates = match &config.templates.override_dir {
            Some(dir) => TemplateRegistry::with_overrides(dir)?,
            None => TemplateRegistry::new()?,
        };

        Ok(Self {
            name,
            config,
            templates,
        })
    }

    /// Resource this generator was built for
    #[must_use]
    pub const fn name(&self) -> &ResourceName {
        &self.name
    }

    /// Configuration in effect
    #[must_use]
    pub const fn config(&self) -> &ScaffoldConfig {
        &self.config
    }

    /// Template variables shared by every file
    ///
    /// All identifiers in the output come from this one value.
    #[must_use]
    pub fn context(&self) -> serde_json::Value {
        let templates = &self.config.templates;
        let request_type = if templates.request_import.is_empty() {
            "Request"
        } else {
            templates.request_type.as_str()
        };

        serde_json::json!({
            "camel": self.name.camel(),
            "pascal": self.name.pascal(),
            "kebab": self.name.kebab(),
            "id_field": self.name.id_field(),
            "title": self.name.title(),
            "base_path": self.name.base_path(),
            "routes_ident": self.name.routes_ident(),
            "router_ident": self.config.aggregator.router_ident,
            "auth_import": templates.auth_import,
            "auth_middleware": templates.auth_middleware,
            "request_import": templates.request_import,
            "request_type": request_type,
            "database_import": templates.database_import,
        })
    }

    /// Target path of a layer's file, relative to the project root
    #[must_use]
    pub fn path_for(&self, layer: Layer) -> PathBuf {
        let layout = &self.config.layout;
        let pascal = self.name.pascal();

        match layer {
            // Matches the import path spliced into the aggregator
            Layer::Route => layout
                .routes_dir
                .join(format!("{}.routes.ts", self.name.camel())),
            Layer::Controller => layout.controller_dir.join(format!("{pascal}Controller.ts")),
            Layer::Service => layout.service_dir.join(format!("{pascal}Service.ts")),
            Layer::Repository => layout.repository_dir.join(format!("{pascal}Repository.ts")),
            Layer::Test => layout.test_dir.join(format!("{pascal}.test.ts")),
        }
    }

    /// Render the five layer files, in write order
    ///
    /// # Errors
    ///
    /// Returns an error if any template fails to render.
    pub fn generate(&self) -> Result<Vec<GeneratedFile>> {
        let context = self.context();
        Layer::ALL
            .iter()
            .map(|&layer| self.render_layer(layer, &context))
            .collect()
    }

    /// Render the route file
    ///
    /// # Errors
    ///
    /// Returns an error if the template fails to render.
    pub fn generate_route(&self) -> Result<GeneratedFile> {
        self.render_layer(Layer::Route, &self.context())
    }

    /// Render the controller file
    ///
    /// # Errors
    ///
    /// Returns an error if the template fails to render.
    pub fn generate_controller(&self) -> Result<GeneratedFile> {
        self.render_layer(Layer::Controller, &self.context())
    }

    /// Render the service file
    ///
    /// # Errors
    ///
    /// Returns an error if the template fails to render.
    pub fn generate_service(&self) -> Result<GeneratedFile> {
        self.render_layer(Layer::Service, &self.context())
    }

    /// Render the repository file
    ///
    /// # Errors
    ///
    /// Returns an error if the template fails to render.
    pub fn generate_repository(&self) -> Result<GeneratedFile> {
        self.render_layer(Layer::Repository, &self.context())
    }

    /// Render the integration test file
    ///
    /// # Errors
    ///
    /// Returns an error if the template fails to render.
    pub fn generate_test(&self) -> Result<GeneratedFile> {
        self.render_layer(Layer::Test, &self.context())
    }

    /// The import and registration insertions for this resource
    ///
    /// # Errors
    ///
    /// Returns an error if a snippet template fails to render.
    pub fn aggregator_splice(&self) -> Result<AggregatorSplice> {
        let context = self.context();
        let aggregator = &self.config.aggregator;

        Ok(AggregatorSplice {
            import_anchor: aggregator.import_anchor.clone(),
            registration_anchor: aggregator.registration_anchor.clone(),
            import: self.templates.render("aggregator_import", &context)?,
            registration: self.templates.render("aggregator_registration", &context)?,
        })
    }

    /// Splice this resource into aggregator text
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::MissingAnchor`] if an anchor is absent.
    pub fn splice_aggregator(&self, text: &str) -> Result<String> {
        let path = self.config.layout.aggregator_path();
        self.aggregator_splice()?.apply(text, &path)
    }

    /// Read the aggregator and compute every change, without writing
    ///
    /// # Errors
    ///
    /// Returns an error if the aggregator cannot be read, an anchor is
    /// missing, or a template fails to render.
    pub fn plan(&self, root: &Path) -> Result<ScaffoldPlan> {
        let relative = self.config.layout.aggregator_path();
        let full = root.join(&relative);

        let original = std::fs::read_to_string(&full).map_err(|e| ScaffoldError::fs(&full, e))?;
        let updated = self.aggregator_splice()?.apply(&original, &relative)?;
        let files = self.generate()?;

        tracing::debug!(
            resource = %self.name,
            files = files.len(),
            "scaffold plan ready"
        );

        Ok(ScaffoldPlan {
            aggregator: AggregatorEdit {
                path: relative,
                original,
                updated,
            },
            files,
        })
    }

    fn render_layer(&self, layer: Layer, context: &serde_json::Value) -> Result<GeneratedFile> {
        let rendered = self.templates.render(layer.template_name(), context)?;
        tracing::debug!(%layer, resource = %self.name, "rendered template");

        Ok(GeneratedFile {
            path: self.path_for(layer),
            content: rendered,
            description: self.describe(layer),
            layer,
        })
    }

    fn describe(&self, layer: Layer) -> String {
        let pascal = self.name.pascal();
        match layer {
            Layer::Route => format!("Routes for {}", self.name.base_path()),
            Layer::Controller => format!("{pascal}Controller"),
            Layer::Service => format!("{pascal}Service"),
            Layer::Repository => format!("{pascal}Repository stub"),
            Layer::Test => format!("Integration test for {pascal}Controller"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator_with(name: &str, config: ScaffoldConfig) -> ScaffoldGenerator {
        let name = ResourceName::parse(name).unwrap();
        ScaffoldGenerator::new(name, config).unwrap()
    }

    fn generator(name: &str) -> ScaffoldGenerator {
        generator_with(name, ScaffoldConfig::default())
    }

    fn assert_has(content: &str, needle: &str) {
        assert!(
            content.contains(needle),
            "missing `{needle}` in:\n{content}"
        );
    }

    #[test]
    fn test_context_projections() {
        let context = generator("myResource").context();
        assert_eq!(context["pascal"], "MyResource");
        assert_eq!(context["kebab"], "my-resource");
        assert_eq!(context["id_field"], "idMyResource");
        assert_eq!(context["base_path"], "/my-resource");
        assert_eq!(context["routes_ident"], "myResourceRoutes");
        assert_eq!(context["request_type"], "CustomRequest");
    }

    #[test]
    fn test_request_type_falls_back_without_import() {
        let mut config = ScaffoldConfig::default();
        config.templates.request_import = String::new();
        let generator = generator_with("order", config);
        assert_eq!(generator.context()["request_type"], "Request");
    }

    #[test]
    fn test_paths() {
        let generator = generator("order");
        assert_eq!(
            generator.path_for(Layer::Route),
            PathBuf::from("src/routes/order.routes.ts")
        );
        assert_eq!(
            generator.path_for(Layer::Controller),
            PathBuf::from("src/controller/OrderController.ts")
        );
        assert_eq!(
            generator.path_for(Layer::Service),
            PathBuf::from("src/service/OrderService.ts")
        );
        assert_eq!(
            generator.path_for(Layer::Repository),
            PathBuf::from("src/repository/OrderRepository.ts")
        );
        assert_eq!(
            generator.path_for(Layer::Test),
            PathBuf::from("test/integration/Order.test.ts")
        );
    }

    #[test]
    fn test_generate_route() {
        let route = generator("order").generate_route().unwrap();
        let endpoint = "orderRoutes.get(`${BASE_PATH}/:idOrder`, auth, (req, res) => orderController.getById(req, res));";

        assert_eq!(route.layer, Layer::Route);
        assert_has(&route.content, "const orderRoutes = Router();");
        assert_has(&route.content, "export const makeOrderController = () => {");
        assert_has(&route.content, "const BASE_PATH = '/order';");
        assert_has(&route.content, endpoint);
        assert_has(&route.content, "export { orderRoutes };");
        assert_has(&route.content, "import auth from '../middleware/auth';");
    }

    #[test]
    fn test_generate_route_without_auth() {
        let mut config = ScaffoldConfig::default();
        config.templates.auth_import = String::new();
        config.templates.auth_middleware = String::new();

        let route = generator_with("order", config).generate_route().unwrap();
        assert!(!route.content.contains("auth"));
        assert_has(
            &route.content,
            "orderRoutes.get(`${BASE_PATH}/:idOrder`, (req, res) =>",
        );
    }

    #[test]
    fn test_generate_controller() {
        let controller = generator("order").generate_controller().unwrap();
        let content = &controller.content;

        assert_has(content, "import { Response } from 'express';");
        assert_has(
            content,
            "import { CustomRequest } from '../../types/custom';",
        );
        assert_has(content, "export class OrderController {");
        assert_has(
            content,
            "constructor(private orderService: OrderService) {}",
        );
        assert_has(content, "const { idOrder } = req.params;");
        assert_has(content, "await this.orderService.getById(Number(idOrder));");
        assert_has(content, "return res.status(200).json(result);");
    }

    #[test]
    fn test_generate_service() {
        let service = generator("order").generate_service().unwrap();
        let content = &service.content;

        assert_has(content, "export class OrderService {");
        assert_has(
            content,
            "constructor(private orderRepository: OrderRepository) {}",
        );
        assert_has(content, "async getById(idOrder: number) {");
        assert_has(content, "return this.orderRepository.getById(idOrder);");
    }

    #[test]
    fn test_generate_repository() {
        let repository = generator("order").generate_repository().unwrap();
        let content = &repository.content;

        assert_has(content, "import prisma from '../database/client';");
        assert_has(content, "export class OrderRepository {");
        assert_has(content, "console.log({ idOrder });");
        assert_has(content, "return { idOrder: 'Ok' };");
    }

    #[test]
    fn test_generate_test() {
        let test = generator("order").generate_test().unwrap();
        let content = &test.content;

        assert_has(content, "describe('Order Integration', () => {");
        assert_has(content, "let mockRequest: Partial<CustomRequest>;");
        assert_has(content, "params: { idOrder: '1' },");
        assert_has(content, "const orderController = makeOrderController();");
        assert_has(
            content,
            "expect(mockResponse.json).toHaveBeenCalledWith({ idOrder: 'Ok' });",
        );
        assert_has(
            content,
            "expect(mockResponse.status).toHaveBeenCalledWith(200);",
        );
    }

    #[test]
    fn test_generate_test_carries_user_fixture_with_custom_request() {
        let test = generator("order").generate_test().unwrap();
        assert_has(
            &test.content,
            "user: { id_user: 1, id_app: 29, user_name: 'Tester' } as any,",
        );
    }

    #[test]
    fn test_generate_test_without_custom_request_has_no_user() {
        let mut config = ScaffoldConfig::default();
        config.templates.request_import = String::new();

        let test = generator_with("order", config).generate_test().unwrap();
        assert!(!test.content.contains("user:"));
        assert_has(&test.content, "let mockRequest: Partial<Request>;");
    }

    #[test]
    fn test_generate_all_layers_in_order() {
        let files = generator("order").generate().unwrap();
        let layers: Vec<_> = files.iter().map(|f| f.layer).collect();
        assert_eq!(layers, Layer::ALL.to_vec());
    }

    #[test]
    fn test_generate_is_deterministic() {
        let first = generator("invoiceLine").generate().unwrap();
        let second = generator("invoiceLine").generate().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_splice_aggregator_uses_router_ident() {
        let mut config = ScaffoldConfig::default();
        config.aggregator.router_ident = "api".to_string();
        config.aggregator.import_anchor = "const api = Router();".to_string();
        config.aggregator.registration_anchor = "export default api;".to_string();

        let out = generator_with("order", config)
            .splice_aggregator("const api = Router();\nexport default api;\n")
            .unwrap();
        let expected = "import { orderRoutes } from './order.routes';\n\nconst api = Router();\napi.use(orderRoutes);\n\nexport default api;\n";
        assert_eq!(out, expected);
    }

    #[test]
    fn test_empty_anchor_from_config_is_rejected() {
        let toml = "[aggregator]\nregistration_anchor = \"\"\n";
        let config = ScaffoldConfig::from_toml_str(toml).unwrap();
        let aggregator = "const appRoutes = Router();\nexport default appRoutes;\n";

        let err = generator_with("order", config).splice_aggregator(aggregator).unwrap_err();
        assert!(matches!(err, ScaffoldError::MissingAnchor { .. }));
    }
}
