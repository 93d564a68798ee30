//! Route registration for calculator module

use std::sync::Arc;

use axum::routing::post;
use axum::{Extension, Router};

use crate::config::CalculatorConfig;
use crate::domain::Service;

use super::handlers;

/// Register all REST routes for calculator module.
///
/// # Arguments
/// * `router` - Axum router to add routes to
/// * `config` - Module configuration (route path)
/// * `service` - Domain Service
#[must_use]
pub fn register_routes(router: Router, config: &CalculatorConfig, service: Arc<Service>) -> Router {
    // POST {route} - evaluate an expression, any other method answers 405
    let router = router.route(
        &config.route,
        post(handlers::calculate).fallback(handlers::method_not_allowed),
    );

    router.layer(Extension(service))
}
