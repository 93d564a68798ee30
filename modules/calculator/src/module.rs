use std::sync::Arc;

use axum::Router;
use lmc_bootstrap::{AppConfig, ConfigError};
use tracing::info;

use crate::api::rest::{openapi, routes};
use crate::config::CalculatorConfig;
use crate::domain::Service;

/// Calculator module: owns the domain service and mounts its REST routes.
#[derive(Clone)]
pub struct CalculatorModule {
    config: CalculatorConfig,
    service: Arc<Service>,
}

impl CalculatorModule {
    /// Key of this module's section under `modules` in the app config.
    pub const NAME: &'static str = "calculator";

    #[must_use]
    pub fn new(config: CalculatorConfig) -> Self {
        Self {
            config,
            service: Arc::new(Service::new()),
        }
    }

    /// Build the module from the `modules.calculator` section.
    ///
    /// # Errors
    /// Returns [`ConfigError::Module`] if the section is malformed or fails validation.
    pub fn from_app_config(app: &AppConfig) -> Result<Self, ConfigError> {
        let config: CalculatorConfig = app.module_config(Self::NAME)?;
        config.validate().map_err(|reason| ConfigError::Module {
            module: Self::NAME.to_owned(),
            reason,
        })?;
        info!(route = %config.route, "Calculator module initialized");
        Ok(Self::new(config))
    }

    #[must_use]
    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    #[must_use]
    pub fn service(&self) -> Arc<Service> {
        Arc::clone(&self.service)
    }

    /// Add the calculate endpoint to `router`.
    #[must_use]
    pub fn register_rest(&self, router: Router) -> Router {
        let router = routes::register_routes(router, &self.config, self.service());
        info!(route = %self.config.route, "Calculator REST routes registered");
        router
    }

    /// `OpenAPI` document describing the mounted endpoint.
    #[must_use]
    pub fn openapi(&self) -> utoipa::openapi::OpenApi {
        openapi::document(&self.config.route)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn from_app_config_uses_defaults() {
        let module = CalculatorModule::from_app_config(&AppConfig::default()).unwrap();
        assert_eq!(module.config().route, "/api/v1/calculate");
    }

    #[test]
    fn from_app_config_reads_module_section() {
        let mut app = AppConfig::default();
        app.modules.insert(
            CalculatorModule::NAME.to_owned(),
            serde_json::json!({ "route": "/calc" }),
        );
        let module = CalculatorModule::from_app_config(&app).unwrap();
        assert_eq!(module.config().route, "/calc");
        assert!(module.openapi().paths.paths.contains_key("/calc"));
    }

    #[test]
    fn from_app_config_rejects_invalid_route() {
        let mut app = AppConfig::default();
        app.modules.insert(
            CalculatorModule::NAME.to_owned(),
            serde_json::json!({ "route": "calc" }),
        );
        let err = CalculatorModule::from_app_config(&app).err().unwrap();
        assert!(err.to_string().contains("invalid config for module 'calculator'"));
    }
}
