//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Application-level endpoints (root banner, readiness)
#[derive(OpenApi)]
#[openapi(
    info(
        title = "eShop API",
        version = "0.1.0",
        description = "Product catalogue browsing for the eShop storefront",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:5000", description = "Local development server")
    ),
    paths(crate::api::root, crate::api::health::readiness_check),
    tags(
        (name = "Status", description = "Service status endpoints")
    )
)]
struct AppDoc;

/// Combined OpenAPI documentation for all APIs
pub struct ApiDoc;

impl OpenApi for ApiDoc {
    fn openapi() -> utoipa::openapi::OpenApi {
        let mut doc = AppDoc::openapi();
        doc.merge(domain_products::ApiDoc::openapi());
        doc
    }
}
