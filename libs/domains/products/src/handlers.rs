//! HTTP handlers for the products listing

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ProductResult;
use crate::models::{Product, ProductPage};
use crate::query::{ListingParams, SortOrder};
use crate::repository::ProductRepository;
use crate::service::ProductService;

/// OpenAPI documentation for the products listing
#[derive(OpenApi)]
#[openapi(
    paths(list_products),
    components(schemas(Product, ProductPage, SortOrder)),
    tags(
        (name = "Products", description = "Product catalogue browsing")
    )
)]
pub struct ApiDoc;

/// Create the products router, serving `GET /products`
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/products", get(list_products::<R>))
        .with_state(shared_service)
}

/// List products with search, filters, sorting and pagination
///
/// Parameters that are missing or cannot be parsed fall back to their
/// defaults; the request is never rejected.
#[utoipa::path(
    get,
    path = "/products",
    tag = "Products",
    params(ListingParams),
    responses(
        (status = 200, description = "One page of matching products", body = ProductPage),
        (status = 500, description = "Store failure", body = String, content_type = "text/plain")
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> ProductResult<Json<ProductPage>> {
    let query = ListingParams::from_pairs(pairs).into_query(service.listing());
    let page = service.list_products(&query).await?;
    Ok(Json(page))
}
