use async_trait::async_trait;

use crate::error::ProductResult;
use crate::models::Product;
use crate::query::ProductQuery;

/// Read access to the product catalogue.
///
/// Both methods must apply the same filter for a given query so that the
/// page count agrees with the pages actually served.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Matching products, ordered and windowed per the query
    async fn find_page(&self, query: &ProductQuery) -> ProductResult<Vec<Product>>;

    /// Number of matching products, ignoring the window
    async fn count_matching(&self, query: &ProductQuery) -> ProductResult<u64>;
}
