//! `OpenAPI` document for the calculator REST API.

use utoipa::OpenApi;

use super::dto::{CalculateRequest, CalculationResponse};
use super::handlers;

/// Path the document is generated for; [`document`] rewrites it when the
/// module is configured with another route.
pub const DOCUMENTED_ROUTE: &str = "/api/v1/calculate";

#[derive(OpenApi)]
#[openapi(
    info(title = "LMC Calculator API", description = "Arithmetic expression evaluation"),
    paths(handlers::calculate),
    components(schemas(CalculateRequest, CalculationResponse)),
    tags((name = "calculator", description = "Expression evaluation"))
)]
pub struct ApiDoc;

/// Build the document for the calculate endpoint mounted at `route`.
#[must_use]
pub fn document(route: &str) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    if route != DOCUMENTED_ROUTE
        && let Some(item) = doc.paths.paths.remove(DOCUMENTED_ROUTE)
    {
        doc.paths.paths.insert(route.to_owned(), item);
    }
    doc
}
